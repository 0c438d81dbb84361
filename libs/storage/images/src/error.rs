//! Error types for image storage.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Declared content type or extension is outside the accepted set.
    #[error("Only image files (jpeg, jpg, png, gif, webp, tiff, bmp) are allowed!")]
    UnsupportedMediaType { file_name: String, content_type: String },

    #[error("File '{file_name}' is {size} bytes, the limit is {max} bytes")]
    PayloadTooLarge { file_name: String, size: usize, max: usize },

    #[error("File '{0}' is empty")]
    EmptyFile(String),

    /// The remote store rejected the upload or returned an unusable response.
    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage configuration error: {0}")]
    Config(String),
}

impl StorageError {
    /// True for failures caused by the submitted file rather than the remote store.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            StorageError::UnsupportedMediaType { .. }
                | StorageError::PayloadTooLarge { .. }
                | StorageError::EmptyFile(_)
        )
    }
}

impl From<core_config::ConfigError> for StorageError {
    fn from(err: core_config::ConfigError) -> Self {
        StorageError::Config(err.to_string())
    }
}
