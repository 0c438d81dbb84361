//! Items API routes
//!
//! This module wires up the items domain to HTTP routes.

use axum::Router;
use domain_items::{ItemService, MongoItemRepository, handlers};

use crate::state::AppState;

/// Create items router
pub fn router(state: &AppState) -> Router {
    let repository = MongoItemRepository::new(state.db.clone());

    let service = ItemService::new(repository, state.storage.clone(), state.notifier.clone());

    handlers::router(service)
}
