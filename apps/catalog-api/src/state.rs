//! Application state management.
//!
//! This module defines the shared application state passed to all request handlers.
//! The state contains:
//! - Configuration
//! - MongoDB client
//! - Image storage and enquiry notifier

use domain_notifications::EnquiryNotifier;
use image_storage::ImageStorage;
use mongodb::{Client, Database};
use std::sync::Arc;

/// Shared application state.
///
/// Cloned into each router; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
    /// Remote image host
    pub storage: Arc<dyn ImageStorage>,
    /// Sends item enquiries to the configured recipient
    pub notifier: Arc<dyn EnquiryNotifier>,
}
