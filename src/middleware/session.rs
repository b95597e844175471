//! Session token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the session token from the Authorization header
//! 2. Hash it and verify a live session exists in the store
//! 3. Inject the session context into the request
//! 4. Reject unknown or expired sessions with HTTP 401

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::store::{self, SessionStore};

/// Session context attached to authenticated requests.
///
/// This struct is inserted into the request's extension map and can be
/// extracted by route handlers to address the caller's session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// ID of the authenticated session
    pub session_id: Uuid,

    /// Hashed token, used as the store key for all further access
    pub token_hash: String,
}

/// Session authentication middleware function.
///
/// # Flow
///
/// 1. Extract `Authorization: Bearer <token>` header from request
/// 2. Hash the `<token>` using SHA-256
/// 3. Look the hash up in the session store
/// 4. If a live session is found: inject `SessionContext`, call next handler
/// 5. If not: return 401 Unauthorized error
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer 3f1c…9ab2
/// ```
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::InvalidSessionToken)` if authentication fails (401)
pub async fn session_middleware(
    State(store): State<SessionStore>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Step 1: Extract Authorization header
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidSessionToken)?;

    // Step 2: Extract Bearer token
    // Expected format: "Bearer <session_token>"
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidSessionToken)?;

    // Step 3: Hash the token and look it up (also filters expired sessions)
    let token_hash = store::hash_token(token);
    let session = store
        .find(&token_hash)
        .await
        .ok_or(AppError::InvalidSessionToken)?;

    // Step 4: Inject context into request extensions
    // Route handlers can now extract this using Extension<SessionContext>
    request.extensions_mut().insert(SessionContext {
        session_id: session.id,
        token_hash,
    });

    // Step 5: Call the next middleware/handler
    Ok(next.run(request).await)
}
