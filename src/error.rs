//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Authentication Errors**: Invalid, missing, or expired session tokens
/// - **Resource Errors**: Requested scenarios or cycles not found
/// - **Business Logic Errors**: Operations that violate scenario rules
/// - **Validation Errors**: Invalid request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Session token is missing, unknown, or the session has expired.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid session token")]
    InvalidSessionToken,

    /// Requested scenario does not exist (only scenarios 1 and 2 are defined).
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Scenario not found")]
    ScenarioNotFound,

    /// Requested cycle index is out of range for the scenario.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Cycle not found")]
    CycleNotFound,

    /// Scenario 2 cycles cannot be modified while lump-sum-vs-DCA comparison
    /// is enabled, because they are regenerated from scenario 1.
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error("Cycle is auto-generated and cannot be modified")]
    CycleLocked,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidSessionToken` → 401 Unauthorized
/// - `ScenarioNotFound` → 404 Not Found
/// - `CycleNotFound` → 404 Not Found
/// - `CycleLocked` → 422 Unprocessable Entity
/// - `InvalidRequest` → 400 Bad Request
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::InvalidSessionToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_session_token",
                self.to_string(),
            ),
            AppError::ScenarioNotFound => (
                StatusCode::NOT_FOUND,
                "scenario_not_found",
                self.to_string(),
            ),
            AppError::CycleNotFound => {
                (StatusCode::NOT_FOUND, "cycle_not_found", self.to_string())
            }
            AppError::CycleLocked => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "cycle_locked",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}
