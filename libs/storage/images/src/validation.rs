//! Pre-upload checks on file type and size.

use crate::error::{StorageError, StorageResult};
use crate::models::ImageUpload;

/// Image types accepted by the upload pipeline.
pub const ACCEPTED_IMAGE_TYPES: [&str; 7] = ["jpeg", "jpg", "png", "gif", "webp", "tiff", "bmp"];

/// Per-file size limit (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

fn is_accepted(value: &str) -> bool {
    ACCEPTED_IMAGE_TYPES.iter().any(|t| value.contains(t))
}

/// Reject a file before anything is sent to the remote store.
///
/// Both the declared content type and the file extension have to name an
/// accepted image type.
pub fn validate_upload(upload: &ImageUpload) -> StorageResult<()> {
    let content_type = upload.content_type.to_lowercase();
    if !is_accepted(&content_type) || !is_accepted(&upload.extension()) {
        return Err(StorageError::UnsupportedMediaType {
            file_name: upload.file_name.clone(),
            content_type: upload.content_type.clone(),
        });
    }

    if upload.data.is_empty() {
        return Err(StorageError::EmptyFile(upload.file_name.clone()));
    }

    if upload.size() > MAX_UPLOAD_BYTES {
        return Err(StorageError::PayloadTooLarge {
            file_name: upload.file_name.clone(),
            size: upload.size(),
            max: MAX_UPLOAD_BYTES,
        });
    }

    Ok(())
}
