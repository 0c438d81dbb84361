//! Mock image storage for testing

use super::ImageStorage;
use crate::error::{StorageError, StorageResult};
use crate::models::{ImageUpload, StoredImage};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock storage that records uploads and returns predictable URLs
#[derive(Clone, Default)]
pub struct MockImageStorage {
    uploads: Arc<Mutex<Vec<ImageUpload>>>,
    /// Uploads beyond this count fail
    fail_after: Option<usize>,
    failure_message: Option<String>,
    /// Accept uploads but report no URL
    empty_urls: bool,
}

impl MockImageStorage {
    /// Create a new mock storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock storage where every upload fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self::failing_after(0, message)
    }

    /// Create a mock storage that accepts `count` uploads and fails afterwards
    pub fn failing_after(count: usize, message: impl Into<String>) -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            fail_after: Some(count),
            failure_message: Some(message.into()),
            empty_urls: false,
        }
    }

    /// Create a mock storage that accepts uploads but returns an empty URL
    pub fn returning_empty_urls() -> Self {
        Self {
            empty_urls: true,
            ..Self::default()
        }
    }

    /// Get all recorded uploads
    pub async fn uploads(&self) -> Vec<ImageUpload> {
        self.uploads.lock().await.clone()
    }

    /// Get the count of recorded uploads
    pub async fn upload_count(&self) -> usize {
        self.uploads.lock().await.len()
    }
}

#[async_trait]
impl ImageStorage for MockImageStorage {
    async fn upload(&self, image: &ImageUpload) -> StorageResult<StoredImage> {
        let mut uploads = self.uploads.lock().await;

        if self.fail_after.is_some_and(|limit| uploads.len() >= limit) {
            let message = self
                .failure_message
                .clone()
                .unwrap_or_else(|| "Mock failure".to_string());
            return Err(StorageError::Upload(message));
        }

        let public_id = format!("item_images/{}-{}", image.field_name, uploads.len());
        uploads.push(image.clone());

        let url = if self.empty_urls {
            String::new()
        } else {
            format!("https://images.test/{public_id}.webp")
        };

        Ok(StoredImage { url, public_id })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(field: &str) -> ImageUpload {
        ImageUpload::new(field, "photo.png", "image/png", vec![1u8, 2, 3])
    }

    #[tokio::test]
    async fn test_mock_records_uploads() {
        let storage = MockImageStorage::new();

        let cover = storage.upload(&image("coverImage")).await.unwrap();
        let extra = storage.upload(&image("additionalImages")).await.unwrap();

        assert_eq!(cover.url, "https://images.test/item_images/coverImage-0.webp");
        assert_eq!(extra.url, "https://images.test/item_images/additionalImages-1.webp");
        assert_eq!(storage.upload_count().await, 2);
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let storage = MockImageStorage::failing("quota exceeded");

        let err = storage.upload(&image("coverImage")).await.unwrap_err();
        assert_eq!(err.to_string(), "Image upload failed: quota exceeded");
        assert_eq!(storage.upload_count().await, 0);
    }

    #[tokio::test]
    async fn test_mock_failing_after() {
        let storage = MockImageStorage::failing_after(1, "second upload rejected");

        assert!(storage.upload(&image("coverImage")).await.is_ok());
        assert!(storage.upload(&image("additionalImages")).await.is_err());
        assert_eq!(storage.upload_count().await, 1);
    }

    #[tokio::test]
    async fn test_mock_returning_empty_urls() {
        let storage = MockImageStorage::returning_empty_urls();

        let stored = storage.upload(&image("coverImage")).await.unwrap();
        assert!(stored.url.is_empty());
        assert_eq!(storage.upload_count().await, 1);
    }
}
