//! Integration tests for Items domain
//!
//! These tests use real MongoDB via testcontainers to ensure:
//! - Documents round-trip through the collection
//! - Listing is ordered newest first
//! - Indexes can be created repeatedly
//!
//! Run with `cargo test -p domain_items -- --ignored` on a host with Docker.

use chrono::{Duration, Utc};
use domain_items::*;
use test_utils::{TestDataBuilder, TestMongo, assertions::*};

fn item(builder: &TestDataBuilder, suffix: &str) -> Item {
    Item::new(
        NewItem::new(builder.name("item", suffix), "Shirt", "Integration test item"),
        format!("https://images.test/item_images/{suffix}.webp"),
        vec![],
    )
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_item() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("create_and_get");
    let repo = MongoItemRepository::new(mongo.database(&builder.database_name()));

    let mut input = item(&builder, "main");
    input.additional_images = vec![
        "https://images.test/item_images/a.webp".to_string(),
        "https://images.test/item_images/b.webp".to_string(),
    ];

    let created = repo.create(input.clone()).await.unwrap();
    assert_uuid_eq(created.id, input.id, "created item id");

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "item should exist");

    assert_uuid_eq(retrieved.id, created.id, "retrieved item id");
    assert_eq!(retrieved.name, input.name);
    assert_eq!(retrieved.item_type, "Shirt");
    assert_eq!(retrieved.cover_image, input.cover_image);
    assert_eq!(retrieved.additional_images, input.additional_images);
    // BSON dates keep millisecond precision
    assert_eq!(
        retrieved.date_added.timestamp_millis(),
        input.date_added.timestamp_millis()
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_get_missing_item_returns_none() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("get_missing");
    let repo = MongoItemRepository::new(mongo.database(&builder.database_name()));

    let found = repo.get_by_id(builder.id()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_items_newest_first() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("list_order");
    let repo = MongoItemRepository::new(mongo.database(&builder.database_name()));
    repo.ensure_indexes().await.unwrap();

    let now = Utc::now();
    let mut oldest = item(&builder, "oldest");
    oldest.date_added = now - Duration::hours(2);
    let mut newest = item(&builder, "newest");
    newest.date_added = now;
    let mut middle = item(&builder, "middle");
    middle.date_added = now - Duration::hours(1);

    // Insertion order differs from the expected listing order
    for entry in [oldest.clone(), newest.clone(), middle.clone()] {
        repo.create(entry).await.unwrap();
    }

    let listed = repo.list().await.unwrap();
    let ids: Vec<_> = listed.iter().map(|i| i.id).collect();

    assert_eq!(ids, vec![newest.id, middle.id, oldest.id]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_items_empty_collection() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("list_empty");
    let repo = MongoItemRepository::new(mongo.database(&builder.database_name()));

    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_ensure_indexes_is_idempotent() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("indexes");
    let repo = MongoItemRepository::new(mongo.database(&builder.database_name()));

    repo.ensure_indexes().await.unwrap();
    repo.ensure_indexes().await.unwrap();

    let names = repo.collection().list_index_names().await.unwrap();
    assert!(names.iter().any(|n| n == "dateAdded_desc"));
}
