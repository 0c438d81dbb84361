use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ItemResult;
use crate::models::Item;

/// Repository trait for Item persistence
///
/// Items are append-only, so the store only inserts and reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a fully built item
    async fn create(&self, item: Item) -> ItemResult<Item>;

    /// Get an item by ID
    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// All items, newest `date_added` first
    async fn list(&self) -> ItemResult<Vec<Item>>;
}
