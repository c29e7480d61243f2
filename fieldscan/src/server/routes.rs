//! HTTP route definitions.

use axum::{routing::get, Router};

use super::handlers;
use super::AppState;

/// Creates the router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/reports", get(handlers::list_reports))
        .route("/reports/:name", get(handlers::report))
        .with_state(state)
}
