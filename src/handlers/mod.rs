//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs business logic (session access, validation)
//! 3. Returns HTTP response (JSON, status code)

/// Strategy cycle endpoints
pub mod cycles;
/// Health check endpoint
pub mod health;
/// Session lifecycle endpoints
pub mod sessions;
/// Simulation endpoints
pub mod simulations;
