//! Strategy cycle HTTP handlers.
//!
//! This module implements cycle management within a scenario:
//! - POST /api/v1/scenarios/{scenario}/cycles - Append a cycle
//! - GET /api/v1/scenarios/{scenario}/cycles - List cycles
//! - PUT /api/v1/scenarios/{scenario}/cycles/{index} - Replace a cycle
//! - DELETE /api/v1/scenarios/{scenario}/cycles/{index} - Remove a cycle
//!
//! Cycles are addressed positionally: `{index}` is the 0-based position
//! within the scenario, and removing a cycle shifts later ones down.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::error::AppError;
use crate::middleware::session::SessionContext;
use crate::models::cycle::{CycleRequest, CycleResponse};
use crate::models::scenario::ScenarioId;
use crate::services::scenario_service;
use crate::store::SessionStore;

/// Append a cycle to a scenario.
///
/// # Endpoint
///
/// `POST /api/v1/scenarios/{scenario}/cycles`
///
/// # Request Body
///
/// ```json
/// {
///   "loan_amount": 100000.0,
///   "loan_interest_rate": 0.06,
///   "loan_repayment_years": 20,
///   "monthly_contribution": 500.0,
///   "contribution_years": 20
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: The stored cycle, including its index and the
///   derived monthly loan repayment
/// - **Error (400)**: A field is out of range
/// - **Error (404)**: Scenario is not 1 or 2
/// - **Error (422)**: Scenario 2 is locked by the comparison flag
/// - **Error (401)**: Invalid session token
pub async fn add_cycle(
    State(store): State<SessionStore>,
    Extension(ctx): Extension<SessionContext>,
    Path(scenario): Path<u8>,
    Json(request): Json<CycleRequest>,
) -> Result<Json<CycleResponse>, AppError> {
    let scenario = ScenarioId::try_from(scenario)?;

    let response = store
        .with_session_mut(&ctx.token_hash, |session| {
            let index = scenario_service::add_cycle(session, scenario, &request)?;
            Ok(CycleResponse::from((index, &session.cycles(scenario)[index])))
        })
        .await?;

    tracing::debug!(session_id = %ctx.session_id, %scenario, "cycle added");
    Ok(Json(response))
}

/// List all cycles of a scenario, in execution order.
///
/// # Endpoint
///
/// `GET /api/v1/scenarios/{scenario}/cycles`
///
/// # Response
///
/// - **Success (200 OK)**: Array of cycles (may be empty)
/// - **Error (404)**: Scenario is not 1 or 2
/// - **Error (401)**: Invalid session token
pub async fn list_cycles(
    State(store): State<SessionStore>,
    Extension(ctx): Extension<SessionContext>,
    Path(scenario): Path<u8>,
) -> Result<Json<Vec<CycleResponse>>, AppError> {
    let scenario = ScenarioId::try_from(scenario)?;

    let responses = store
        .with_session(&ctx.token_hash, |session| {
            Ok(session
                .cycles(scenario)
                .iter()
                .enumerate()
                .map(CycleResponse::from)
                .collect())
        })
        .await?;

    Ok(Json(responses))
}

/// Replace the cycle at a given index.
///
/// The monthly repayment is recomputed from the new loan fields.
///
/// # Endpoint
///
/// `PUT /api/v1/scenarios/{scenario}/cycles/{index}`
///
/// # Response
///
/// - **Success (200 OK)**: The updated cycle
/// - **Error (400)**: A field is out of range
/// - **Error (404)**: Unknown scenario or index out of range
/// - **Error (422)**: Scenario 2 is locked by the comparison flag
/// - **Error (401)**: Invalid session token
pub async fn update_cycle(
    State(store): State<SessionStore>,
    Extension(ctx): Extension<SessionContext>,
    Path((scenario, index)): Path<(u8, usize)>,
    Json(request): Json<CycleRequest>,
) -> Result<Json<CycleResponse>, AppError> {
    let scenario = ScenarioId::try_from(scenario)?;

    let response = store
        .with_session_mut(&ctx.token_hash, |session| {
            scenario_service::update_cycle(session, scenario, index, &request)?;
            Ok(CycleResponse::from((index, &session.cycles(scenario)[index])))
        })
        .await?;

    tracing::debug!(session_id = %ctx.session_id, %scenario, index, "cycle updated");
    Ok(Json(response))
}

/// Remove the cycle at a given index.
///
/// # Endpoint
///
/// `DELETE /api/v1/scenarios/{scenario}/cycles/{index}`
///
/// # Response
///
/// - **Success (200 OK)**: The remaining cycles of the scenario
/// - **Error (404)**: Unknown scenario or index out of range
/// - **Error (422)**: Scenario 2 is locked by the comparison flag
/// - **Error (401)**: Invalid session token
pub async fn delete_cycle(
    State(store): State<SessionStore>,
    Extension(ctx): Extension<SessionContext>,
    Path((scenario, index)): Path<(u8, usize)>,
) -> Result<Json<Vec<CycleResponse>>, AppError> {
    let scenario = ScenarioId::try_from(scenario)?;

    let responses = store
        .with_session_mut(&ctx.token_hash, |session| {
            scenario_service::remove_cycle(session, scenario, index)?;
            Ok(session
                .cycles(scenario)
                .iter()
                .enumerate()
                .map(CycleResponse::from)
                .collect())
        })
        .await?;

    tracing::debug!(session_id = %ctx.session_id, %scenario, index, "cycle removed");
    Ok(Json(responses))
}
