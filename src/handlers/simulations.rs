//! Simulation HTTP handlers.
//!
//! This module implements the comparison run:
//! - POST /api/v1/simulations/compare - Simulate both scenarios and return
//!   their outcomes side by side

use axum::{Extension, Json, extract::State};

use crate::error::AppError;
use crate::middleware::session::SessionContext;
use crate::models::scenario::ScenarioId;
use crate::models::simulation::ComparisonResponse;
use crate::services::simulation_service;
use crate::store::SessionStore;

/// Run both scenarios and return the comparison.
///
/// # Endpoint
///
/// `POST /api/v1/simulations/compare`
///
/// The simulation is a pure function of the session state: nothing is
/// stored, and re-running with unchanged cycles returns identical
/// results. Each scenario runs with its own parameters, so different
/// investment rates or starting ages can be compared directly.
///
/// # Response
///
/// - **Success (200 OK)**: Both outcomes, each with the chart series
///   (`ages`, `net_gains_by_year`), the per-year breakdown, and rounded
///   summary figures. A scenario with no cycles yields empty series and
///   zeroed summary values.
/// - **Error (401)**: Invalid or expired session token
///
/// ```json
/// {
///   "scenario1": {
///     "ages": [31, 32],
///     "net_gains_by_year": [-1203.5, 2410.9],
///     "years": [ … ],
///     "final_portfolio": 154230.12,
///     "total_out_of_pocket": 120000.0,
///     "net_gains": 34230.12
///   },
///   "scenario2": { … }
/// }
/// ```
pub async fn compare(
    State(store): State<SessionStore>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let response = store
        .with_session(&ctx.token_hash, |session| {
            Ok(ComparisonResponse {
                scenario1: simulation_service::simulate_scenario(
                    session.cycles(ScenarioId::One),
                    session.params(ScenarioId::One),
                ),
                scenario2: simulation_service::simulate_scenario(
                    session.cycles(ScenarioId::Two),
                    session.params(ScenarioId::Two),
                ),
            })
        })
        .await?;

    tracing::info!(session_id = %ctx.session_id, "comparison simulated");
    Ok(Json(response))
}
