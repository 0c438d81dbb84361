//! Image upload adapter.
//!
//! Validates incoming image files and forwards them to a remote object store,
//! returning a publicly retrievable URL.
//!
//! ```ignore
//! use image_storage::{CloudinaryConfig, CloudinaryStorage, ImageStorage, ImageUpload};
//!
//! let storage = CloudinaryStorage::new(CloudinaryConfig::from_env()?)?;
//! image_storage::validate_upload(&upload)?;
//! let stored = storage.upload(&upload).await?;
//! println!("{}", stored.url);
//! ```

pub mod error;
pub mod models;
pub mod provider;
pub mod validation;

pub use error::{StorageError, StorageResult};
pub use models::{ImageUpload, StoredImage};
pub use provider::{CloudinaryConfig, CloudinaryStorage, ImageStorage, MockImageStorage};
pub use validation::{ACCEPTED_IMAGE_TYPES, MAX_UPLOAD_BYTES, validate_upload};
