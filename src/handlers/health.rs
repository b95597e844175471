//! Health check endpoint for service monitoring.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::SessionStore;

/// Health check response.
///
/// Returns service status and the number of live comparison sessions.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Number of unexpired sessions currently held in memory
    pub active_sessions: usize,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "active_sessions": 3,
///   "timestamp": "2026-08-07T10:00:00Z"
/// }
/// ```
pub async fn health_check(State(store): State<SessionStore>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        active_sessions: store.active_count().await,
        timestamp: Utc::now(),
    })
}
