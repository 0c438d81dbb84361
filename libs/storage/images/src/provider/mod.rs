//! Storage provider implementations.
//!
//! This module contains the `ImageStorage` trait and implementations
//! for the remote stores images can be sent to.

mod cloudinary;
mod mock;

pub use cloudinary::{CloudinaryConfig, CloudinaryStorage};
pub use mock::MockImageStorage;

use crate::error::StorageResult;
use crate::models::{ImageUpload, StoredImage};
use async_trait::async_trait;

/// Trait for remote image stores.
///
/// Callers are expected to run [`crate::validate_upload`] first; providers
/// assume the file has already passed type and size checks.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Upload one image and return its public URL.
    async fn upload(&self, image: &ImageUpload) -> StorageResult<StoredImage>;

    /// Get the provider name for logging.
    fn name(&self) -> &'static str;
}
