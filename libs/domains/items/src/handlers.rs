use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, MultipartForm, UploadedFile,
    errors::responses::{
        BadRequestIdentifierResponse, BadRequestUploadResponse, BadRequestValidationResponse,
        EmailFailureResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use image_storage::ImageUpload;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{
    CreateItemForm, CreateItemResponse, Item, MAX_ADDITIONAL_IMAGES, MessageResponse, NewItem,
};
use crate::repository::ItemRepository;
use crate::service::ItemService;

pub const COVER_IMAGE_FIELD: &str = "coverImage";
pub const ADDITIONAL_IMAGES_FIELD: &str = "additionalImages";

/// Whole-request cap for item creation; each file is capped separately at 10 MiB.
pub const CREATE_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, send_enquiry),
    components(
        schemas(Item, NewItem, CreateItemForm, CreateItemResponse, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdentifierResponse,
            BadRequestUploadResponse,
            EmailFailureResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Item catalog endpoints (MongoDB + Cloudinary)")
    )
)]
pub struct ApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_items).post(create_item).layer(DefaultBodyLimit::max(CREATE_BODY_LIMIT)),
        )
        .route("/{id}", get(get_item))
        .route("/{id}/enquire", post(send_enquiry))
        .with_state(shared_service)
}

fn into_upload(file: UploadedFile) -> ImageUpload {
    ImageUpload {
        field_name: file.field_name,
        file_name: file.file_name,
        content_type: file.content_type,
        data: file.data,
    }
}

/// Browsers submit an empty, nameless part for an untouched file input.
fn is_placeholder(file: &UploadedFile) -> bool {
    file.file_name.is_empty() && file.is_empty()
}

/// List all items, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    responses(
        (status = 200, description = "All items sorted by dateAdded descending", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.list_items().await?;
    Ok(Json(items))
}

/// Create a new item with uploaded images
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body(content = CreateItemForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Item created successfully", body = CreateItemResponse),
        (status = 400, response = BadRequestUploadResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    mut form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    form.reject_unknown_files(&[COVER_IMAGE_FIELD, ADDITIONAL_IMAGES_FIELD])?;

    let cover = form
        .take_files(COVER_IMAGE_FIELD, 1)?
        .into_iter()
        .find(|f| !is_placeholder(f))
        .map(into_upload);

    let additional: Vec<ImageUpload> = form
        .take_files(ADDITIONAL_IMAGES_FIELD, MAX_ADDITIONAL_IMAGES)?
        .into_iter()
        .filter(|f| !is_placeholder(f))
        .map(into_upload)
        .collect();

    let input = NewItem::new(
        form.text("name").unwrap_or_default(),
        form.text("type").unwrap_or_default(),
        form.text("description").unwrap_or_default(),
    );

    let item = service.create_item(input, cover, additional).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateItemResponse {
            message: "Item successfully added".to_string(),
            item,
        }),
    ))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID (UUID)")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
) -> ItemResult<Json<Item>> {
    let item = service.get_item(&id).await?;
    Ok(Json(item))
}

/// Send an enquiry email about an item
#[utoipa::path(
    post,
    path = "/{id}/enquire",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID (UUID)")
    ),
    responses(
        (status = 200, description = "Enquiry email sent", body = MessageResponse),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = EmailFailureResponse)
    )
)]
async fn send_enquiry<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
) -> ItemResult<Json<MessageResponse>> {
    service.send_enquiry(&id).await?;
    Ok(Json(MessageResponse {
        message: "Enquiry email sent successfully!".to_string(),
    }))
}
