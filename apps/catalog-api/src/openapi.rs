//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Item Catalog API",
        version = "0.1.0",
        description = "Inventory catalog backed by MongoDB, with Cloudinary image hosting and enquiry emails",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/items", api = domain_items::ApiDoc)
    ),
    tags(
        (name = "Items", description = "Item catalog endpoints (MongoDB + Cloudinary)")
    )
)]
pub struct ApiDoc;
