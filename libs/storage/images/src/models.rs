use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A buffered file waiting to be uploaded.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Multipart field the file arrived under (`coverImage`, `additionalImages`).
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Lowercased extension including the leading dot, or empty when absent.
    pub fn extension(&self) -> String {
        self.file_name
            .rfind('.')
            .map(|idx| self.file_name[idx..].to_lowercase())
            .unwrap_or_default()
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    /// Public HTTPS URL of the stored image.
    pub url: String,
    /// Identifier assigned by the remote store.
    pub public_id: String,
}
