//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, doc},
    options::IndexOptions,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ItemResult;
use crate::models::Item;
use crate::repository::ItemRepository;

pub const ITEMS_COLLECTION: &str = "items";

/// Stored shape of an item
///
/// `_id` is a BSON UUID (binary subtype 4) and `dateAdded` a native BSON
/// datetime so the server sorts chronologically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
    #[serde(rename = "_id")]
    pub id: bson::Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub description: String,
    pub cover_image: String,
    #[serde(default)]
    pub additional_images: Vec<String>,
    pub date_added: bson::DateTime,
}

impl From<Item> for ItemDocument {
    fn from(item: Item) -> Self {
        Self {
            id: bson::Uuid::from(item.id),
            name: item.name,
            item_type: item.item_type,
            description: item.description,
            cover_image: item.cover_image,
            additional_images: item.additional_images,
            date_added: bson::DateTime::from_chrono(item.date_added),
        }
    }
}

impl From<ItemDocument> for Item {
    fn from(doc: ItemDocument) -> Self {
        Self {
            id: Uuid::from(doc.id),
            name: doc.name,
            item_type: doc.item_type,
            description: doc.description,
            cover_image: doc.cover_image,
            additional_images: doc.additional_images,
            date_added: doc.date_added.to_chrono(),
        }
    }
}

/// MongoDB implementation of the ItemRepository
#[derive(Clone)]
pub struct MongoItemRepository {
    collection: Collection<ItemDocument>,
}

impl MongoItemRepository {
    /// Create a new MongoItemRepository
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoItemRepository::new(client.database("catalog"));
    /// repo.ensure_indexes().await?;
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, ITEMS_COLLECTION)
    }

    /// Create a new MongoItemRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<ItemDocument>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<ItemDocument> {
        &self.collection
    }

    /// Create the `dateAdded` descending index backing `list`. Idempotent.
    #[instrument(skip(self))]
    pub async fn ensure_indexes(&self) -> ItemResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "dateAdded": -1 })
            .options(
                IndexOptions::builder()
                    .name("dateAdded_desc".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!(collection = %self.collection.name(), "Item indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self, item), fields(item_id = %item.id, item_name = %item.name))]
    async fn create(&self, item: Item) -> ItemResult<Item> {
        let document = ItemDocument::from(item.clone());

        self.collection.insert_one(&document).await?;

        tracing::info!("Item created successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let filter = doc! { "_id": bson::Uuid::from(id) };
        let item = self.collection.find_one(filter).await?;
        Ok(item.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ItemResult<Vec<Item>> {
        // `_id` breaks ties between items added in the same millisecond
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "dateAdded": -1, "_id": -1 })
            .await?;
        let documents: Vec<ItemDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Item::from).collect())
    }
}
