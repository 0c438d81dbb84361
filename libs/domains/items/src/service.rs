//! Item Service - Business logic layer

use domain_notifications::{EnquiryDetails, EnquiryNotifier};
use image_storage::{ImageStorage, ImageUpload, validate_upload};
use std::sync::Arc;
use tracing::instrument;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, MAX_ADDITIONAL_IMAGES, NewItem, parse_item_id};
use crate::repository::ItemRepository;

/// Item service providing business logic operations
///
/// Owns the create flow (validate, upload, persist) and the enquiry flow.
/// Collaborators are injected so tests can substitute fakes.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    storage: Arc<dyn ImageStorage>,
    notifier: Arc<dyn EnquiryNotifier>,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given collaborators
    pub fn new(
        repository: R,
        storage: Arc<dyn ImageStorage>,
        notifier: Arc<dyn EnquiryNotifier>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            storage,
            notifier,
        }
    }

    /// Create a new item
    ///
    /// Every file is checked before the first upload, and nothing is stored
    /// unless every upload succeeds.
    #[instrument(skip_all, fields(item_name = %input.name, additional = additional.len()))]
    pub async fn create_item(
        &self,
        input: NewItem,
        cover: Option<ImageUpload>,
        additional: Vec<ImageUpload>,
    ) -> ItemResult<Item> {
        let input = input.trimmed();
        input.validate()?;

        if additional.len() > MAX_ADDITIONAL_IMAGES {
            let mut errors = ValidationErrors::new();
            errors.add(
                "additionalImages",
                ValidationError::new("too_many_files")
                    .with_message(format!("At most {} additional images are allowed", MAX_ADDITIONAL_IMAGES).into()),
            );
            return Err(ItemError::Validation(errors));
        }

        let cover = cover.ok_or(ItemError::MissingCoverImage)?;

        for upload in std::iter::once(&cover).chain(additional.iter()) {
            validate_upload(upload).map_err(ItemError::InvalidImage)?;
        }

        let cover_url = self
            .storage
            .upload(&cover)
            .await
            .map(|stored| stored.url)
            .map_err(|e| {
                tracing::warn!(error = %e, storage = self.storage.name(), "Cover image upload failed");
                ItemError::MissingCoverImage
            })?;

        if cover_url.is_empty() {
            return Err(ItemError::MissingCoverImage);
        }

        let mut additional_urls = Vec::with_capacity(additional.len());
        for upload in &additional {
            let stored = self.storage.upload(upload).await.map_err(|e| {
                tracing::warn!(error = %e, file = %upload.file_name, "Additional image upload failed");
                ItemError::Upload(e.to_string())
            })?;
            additional_urls.push(stored.url);
        }

        let item = Item::new(input, cover_url, additional_urls);
        self.repository.create(item).await
    }

    /// Get an item by its raw path identifier
    #[instrument(skip(self))]
    pub async fn get_item(&self, raw_id: &str) -> ItemResult<Item> {
        let id = parse_item_id(raw_id)?;
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// List every item, newest first
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.list().await
    }

    /// Email the enquiry inbox about an item
    ///
    /// One call is one send attempt; repeated calls are not deduplicated.
    #[instrument(skip(self))]
    pub async fn send_enquiry(&self, raw_id: &str) -> ItemResult<()> {
        let item = self.get_item(raw_id).await?;

        let details = EnquiryDetails {
            item_id: item.id.to_string(),
            item_name: item.name,
            item_type: item.item_type,
            description: item.description,
        };

        self.notifier.send_enquiry(&details).await?;
        tracing::info!(item_id = %details.item_id, "Enquiry sent");
        Ok(())
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            storage: Arc::clone(&self.storage),
            notifier: Arc::clone(&self.notifier),
        }
    }
}
