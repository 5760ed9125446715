use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no state needed)
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Authentication and session endpoints
        .nest("/auth", auth::create_auth_router())
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
