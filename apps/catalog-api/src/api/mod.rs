//! API routes module
//!
//! This module defines all HTTP API routes for the catalog API.

pub mod health;
pub mod items;

use axum::{Router, routing::get};

use crate::state::AppState;

pub const BANNER: &str = "Item Management Backend API is running!";

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/items", items::router(state))
        .merge(health::router(state.clone()))
}

/// Plain-text liveness banner at `/`
pub fn root_router() -> Router {
    Router::new().route("/", get(|| async { BANNER }))
}
