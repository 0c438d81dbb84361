use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};

/// Upper bound on `additionalImages` per item.
pub const MAX_ADDITIONAL_IMAGES: usize = 5;

/// Item entity - a catalog entry with its uploaded image URLs
///
/// Items are append-only: once created they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier (UUID v7, time-ordered)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Item name
    pub name: String,
    /// Free-form category label
    #[serde(rename = "type")]
    pub item_type: String,
    /// Item description
    pub description: String,
    /// Public URL of the cover image
    pub cover_image: String,
    /// Public URLs of extra images, in upload order
    pub additional_images: Vec<String>,
    /// Creation timestamp
    pub date_added: DateTime<Utc>,
}

impl Item {
    /// Build an item from validated input and uploaded image URLs.
    ///
    /// `date_added` is kept at millisecond precision, the resolution of a
    /// BSON datetime, so the value returned on create matches every later read.
    pub fn new(input: NewItem, cover_image: String, additional_images: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            item_type: input.item_type,
            description: input.description,
            cover_image,
            additional_images,
            date_added: now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now),
        }
    }
}

/// Text fields submitted when creating an item
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NewItem {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub item_type: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        item_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            item_type: item_type.into(),
            description: description.into(),
        }
    }

    /// Strip surrounding whitespace from `name` so a blank name fails validation.
    ///
    /// `type` and `description` are stored as submitted.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ..self
        }
    }
}

/// Multipart body accepted by `POST /items` (documentation only)
#[allow(dead_code)]
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemForm {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub description: String,
    /// Exactly one image file
    #[schema(value_type = String, format = Binary)]
    pub cover_image: Vec<u8>,
    /// Up to 5 image files
    #[schema(value_type = Vec<String>, format = Binary)]
    pub additional_images: Vec<Vec<u8>>,
}

/// Response body for a created item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateItemResponse {
    pub message: String,
    pub item: Item,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Parse a path identifier, rejecting anything that is not a UUID.
pub fn parse_item_id(raw: &str) -> ItemResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ItemError::InvalidId(raw.to_string()))
}
