use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_items::MongoItemRepository;
use domain_notifications::{EnquiryMailer, SmtpProvider};
use image_storage::CloudinaryStorage;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    MongoItemRepository::new(db.clone()).ensure_indexes().await?;

    let smtp = SmtpProvider::new(config.smtp.clone())?;
    let notifier = EnquiryMailer::new(Arc::new(smtp), config.recipient_email.clone())?;
    let storage = CloudinaryStorage::new(config.cloudinary.clone())?;

    info!(
        folder = %config.cloudinary.folder,
        smtp_host = %config.smtp.host,
        "Image storage and enquiry mailer configured"
    );

    let state = AppState {
        config,
        mongo_client,
        db,
        storage: Arc::new(storage),
        notifier: Arc::new(notifier),
    };

    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.environment)?;

    let app = router
        .merge(health_router(state.config.app))
        .merge(api::root_router());

    info!("Starting Item Catalog API with graceful shutdown");

    let mongo_client = state.mongo_client.clone();
    create_production_app(app, &state.config.server, async move {
        info!("Shutting down: closing MongoDB connections");
        mongo_client.shutdown().await;
        info!("MongoDB connection closed successfully");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Item Catalog API shutdown complete");
    Ok(())
}
