//! HTTP REST API routes

mod generation_routes;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub(crate) use generation_routes::parse_run_id;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/generations",
            get(generation_routes::list_generations).post(generation_routes::start_generation),
        )
        .route(
            "/api/generations/{id}",
            get(generation_routes::get_generation),
        )
}
