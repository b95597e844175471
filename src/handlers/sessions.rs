//! Session lifecycle HTTP handlers.
//!
//! This module implements the session-related API endpoints:
//! - POST /api/v1/sessions - Create a new comparison session (public)
//! - GET /api/v1/session - Read the full session state
//! - PUT /api/v1/session/params - Update global parameters and the
//!   lump-sum-vs-DCA flag

use axum::{Extension, Json, extract::State};

use crate::error::AppError;
use crate::middleware::session::SessionContext;
use crate::models::scenario::UpdateParamsRequest;
use crate::models::session::{CreateSessionResponse, SessionResponse};
use crate::services::scenario_service;
use crate::store::SessionStore;

/// Create a new comparison session.
///
/// # Endpoint
///
/// `POST /api/v1/sessions`
///
/// This is the only state-creating endpoint that requires no
/// authentication: it is how a client obtains its bearer token.
///
/// # Response
///
/// ```json
/// {
///   "session_id": "550e8400-e29b-41d4-a716-446655440000",
///   "session_token": "64 hex characters",
///   "expires_at": "2026-08-07T11:00:00Z"
/// }
/// ```
///
/// # Security Note
///
/// The token appears only in this response. The server keeps its SHA-256
/// hash, so a lost token means a lost session.
pub async fn create_session(State(store): State<SessionStore>) -> Json<CreateSessionResponse> {
    let (token, session) = store.create().await;

    tracing::info!(session_id = %session.id, "session created");

    Json(CreateSessionResponse {
        session_id: session.id,
        session_token: token,
        expires_at: session.expires_at,
    })
}

/// Read the full state of the caller's session.
///
/// # Endpoint
///
/// `GET /api/v1/session`
///
/// # Response
///
/// - **Success (200 OK)**: Settings plus both scenarios' cycles
/// - **Error (401)**: Invalid or expired session token
pub async fn get_session(
    State(store): State<SessionStore>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<SessionResponse>, AppError> {
    let response = store
        .with_session(&ctx.token_hash, |session| Ok(SessionResponse::from(session)))
        .await?;

    Ok(Json(response))
}

/// Update per-scenario parameters and the comparison flag.
///
/// # Endpoint
///
/// `PUT /api/v1/session/params`
///
/// # Request Body
///
/// All fields optional; omitted fields keep their current value.
///
/// ```json
/// {
///   "compare_lump_sum_dca": true,
///   "scenario1": { "annual_investment_rate": 0.08, "start_age": 30 }
/// }
/// ```
///
/// # Behavior
///
/// Enabling `compare_lump_sum_dca` immediately rebuilds scenario 2 as a
/// DCA mirror of scenario 1 and locks it; disabling it leaves scenario 2's
/// current cycles in place, editable again.
///
/// # Response
///
/// - **Success (200 OK)**: The updated session state
/// - **Error (400)**: A parameter is out of range (nothing is applied)
/// - **Error (401)**: Invalid or expired session token
pub async fn update_params(
    State(store): State<SessionStore>,
    Extension(ctx): Extension<SessionContext>,
    Json(request): Json<UpdateParamsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let response = store
        .with_session_mut(&ctx.token_hash, |session| {
            scenario_service::apply_params_update(session, &request)?;
            Ok(SessionResponse::from(&*session))
        })
        .await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        middleware as axum_middleware,
        routing::{get, post, put},
    };
    use tower::ServiceExt;

    use crate::middleware::session::session_middleware;

    fn app(store: &SessionStore) -> Router {
        let protected = Router::new()
            .route("/api/v1/session", get(get_session))
            .route("/api/v1/session/params", put(update_params))
            .route_layer(axum_middleware::from_fn_with_state(
                store.clone(),
                session_middleware,
            ));

        Router::new()
            .route("/api/v1/sessions", post(create_session))
            .merge(protected)
            .with_state(store.clone())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_then_read_session_roundtrip() {
        let store = SessionStore::new(60);
        let app = app(&store);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        let token = created["session_token"].as_str().unwrap().to_string();
        assert_eq!(token.len(), 64);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/session")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let session = body_json(response).await;
        assert_eq!(session["session_id"], created["session_id"]);
        assert_eq!(session["compare_lump_sum_dca"], false);
        assert_eq!(session["scenario1"]["params"]["start_age"], 30);
        assert!(session["scenario1"]["cycles"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let store = SessionStore::new(60);
        let app = app(&store);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/session")
                    .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "invalid_session_token");
    }

    #[tokio::test]
    async fn missing_authorization_header_is_rejected() {
        let store = SessionStore::new(60);
        let app = app(&store);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn params_update_applies_and_validates() {
        let store = SessionStore::new(60);
        let (token, _) = store.create().await;
        let app = app(&store);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/session/params")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"scenario1": {"annual_investment_rate": 0.05, "start_age": 45}}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let session = body_json(response).await;
        assert_eq!(session["scenario1"]["params"]["start_age"], 45);
        // Scenario 2 keeps its defaults.
        assert_eq!(session["scenario2"]["params"]["start_age"], 30);

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/session/params")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"scenario1": {"annual_investment_rate": 9.0, "start_age": 45}}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
