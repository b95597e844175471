//! Investment Comparison Service - Main Application Entry Point
//!
//! This is a REST API server for comparing two investment strategies built out of loan/contribution cycles. It provides session-scoped endpoints for configuring scenarios and running a month-by-month compound-growth simulation over both.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **State**: In-memory per-session store (sessions expire after a TTL)
//! - **Authentication**: Session token with SHA-256 hashing
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create the in-memory session store
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create the in-memory session store
    let store = store::SessionStore::new(config.session_ttl_minutes);
    tracing::info!(
        ttl_minutes = config.session_ttl_minutes,
        "Session store created"
    );

    // Create authenticated routes (API endpoints)
    let authenticated_routes = Router::new()
        // Session state routes
        .route("/api/v1/session", get(handlers::sessions::get_session))
        .route(
            "/api/v1/session/params",
            put(handlers::sessions::update_params),
        )
        // Cycle management routes
        .route(
            "/api/v1/scenarios/{scenario}/cycles",
            post(handlers::cycles::add_cycle),
        )
        .route(
            "/api/v1/scenarios/{scenario}/cycles",
            get(handlers::cycles::list_cycles),
        )
        .route(
            "/api/v1/scenarios/{scenario}/cycles/{index}",
            put(handlers::cycles::update_cycle),
        )
        .route(
            "/api/v1/scenarios/{scenario}/cycles/{index}",
            delete(handlers::cycles::delete_cycle),
        )
        // Simulation routes
        .route(
            "/api/v1/simulations/compare",
            post(handlers::simulations::compare),
        )
        // Apply session authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            store.clone(),
            middleware::session::session_middleware,
        ));

    // Combine authenticated routes with public routes
    let app = Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/sessions", post(handlers::sessions::create_session))
        // Merge authenticated routes
        .merge(authenticated_routes)
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // The dashboard front end is served from a different origin
        .layer(CorsLayer::permissive())
        // Share the session store with all handlers via State extraction
        .with_state(store);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
