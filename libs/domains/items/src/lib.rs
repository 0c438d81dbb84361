//! Items Domain
//!
//! Catalog items backed by MongoDB, with images stored remotely and enquiry
//! emails sent on request.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (multipart create, list, get, enquire)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, upload orchestration, enquiries
//! └──┬───┬───┬──┘
//!    │   │   └──────────────┐
//!    │   └──────────┐       │
//! ┌──▼──────────┐ ┌─▼─────┐ ┌▼──────────────┐
//! │ Repository  │ │Storage│ │EnquiryNotifier│
//! └──────┬──────┘ └───────┘ └───────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_items::{handlers, MongoItemRepository, ItemService};
//!
//! let repository = MongoItemRepository::new(client.database("catalog"));
//! repository.ensure_indexes().await?;
//!
//! let service = ItemService::new(repository, storage, mailer);
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{CreateItemResponse, Item, MAX_ADDITIONAL_IMAGES, MessageResponse, NewItem};
pub use mongodb::{ItemDocument, MongoItemRepository};
pub use repository::ItemRepository;
pub use service::ItemService;
