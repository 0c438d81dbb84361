//! Handler tests for Items domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Multipart parsing (form fields and files → service input)
//! - Response serialization and status codes
//! - Error responses
//!
//! The store is an in-memory repository and the image/email collaborators are
//! the mock providers, so no external services are needed.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_items::*;
use domain_notifications::{EnquiryMailer, MockEmailProvider};
use http_body_util::BodyExt;
use image_storage::{MAX_UPLOAD_BYTES, MockImageStorage};
use serde_json::Value;
use std::sync::Arc;
use test_utils::TestDataBuilder;
use tokio::sync::Mutex;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

const BOUNDARY: &str = "catalog-test-boundary";

#[derive(Clone, Default)]
struct InMemoryItemRepository {
    items: Arc<Mutex<Vec<Item>>>,
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, item: Item) -> ItemResult<Item> {
        self.items.lock().await.push(item.clone());
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        Ok(self.items.lock().await.iter().find(|i| i.id == id).cloned())
    }

    async fn list(&self) -> ItemResult<Vec<Item>> {
        let mut items = self.items.lock().await.clone();
        items.sort_by(|a, b| b.date_added.cmp(&a.date_added).then(b.id.cmp(&a.id)));
        Ok(items)
    }
}

struct TestApp {
    router: Router,
    repo: InMemoryItemRepository,
    storage: Arc<MockImageStorage>,
    email: Arc<MockEmailProvider>,
}

impl TestApp {
    fn new() -> Self {
        Self::with(MockImageStorage::new(), MockEmailProvider::new())
    }

    fn with(storage: MockImageStorage, email: MockEmailProvider) -> Self {
        let repo = InMemoryItemRepository::default();
        let storage = Arc::new(storage);
        let email = Arc::new(email);
        let mailer = EnquiryMailer::new(email.clone(), "owner@shop.test").unwrap();
        let service = ItemService::new(repo.clone(), storage.clone(), Arc::new(mailer));

        Self {
            router: handlers::router(service),
            repo,
            storage,
            email,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn stored_count(&self) -> usize {
        self.repo.items.lock().await.len()
    }
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        field: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: Vec<u8>,
    },
}

fn multipart_body(parts: Vec<Part<'_>>) -> Body {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                field,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(&data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

fn create_request(parts: Vec<Part<'_>>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(multipart_body(parts))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn cover(builder: &TestDataBuilder) -> Part<'static> {
    Part::File {
        field: "coverImage",
        file_name: "cover.jpg",
        content_type: "image/jpeg",
        data: builder.jpeg_bytes(256),
    }
}

fn item_fields<'a>(name: &'a str) -> Vec<Part<'a>> {
    vec![
        Part::Text("name", name),
        Part::Text("type", "Shirt"),
        Part::Text("description", "Warm jacket"),
    ]
}

#[tokio::test]
async fn test_create_item_handler_returns_201() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("handler_create_201");

    let mut parts = item_fields("Red Jacket");
    parts.push(cover(&builder));

    let (status, body) = app.send(create_request(parts)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Item successfully added");
    assert_eq!(body["item"]["type"], "Shirt");
    assert!(body["item"]["coverImage"].as_str().unwrap().starts_with("https://"));
    assert_eq!(body["item"]["additionalImages"], serde_json::json!([]));
    assert!(body["item"]["_id"].is_string());
    assert_eq!(app.stored_count().await, 1);
}

#[tokio::test]
async fn test_create_item_handler_with_additional_images() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("handler_additional");

    let mut parts = item_fields("Lamp");
    parts.push(cover(&builder));
    for name in ["side.png", "back.png"] {
        parts.push(Part::File {
            field: "additionalImages",
            file_name: name,
            content_type: "image/png",
            data: builder.png_bytes(64),
        });
    }

    let (status, body) = app.send(create_request(parts)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item"]["additionalImages"].as_array().unwrap().len(), 2);
    assert_eq!(app.storage.upload_count().await, 3);
}

#[tokio::test]
async fn test_create_item_handler_missing_cover_returns_400() {
    let app = TestApp::new();

    let (status, body) = app.send(create_request(item_fields("No Cover"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cover image upload failed or was missing.");
    assert_eq!(app.stored_count().await, 0);
}

#[tokio::test]
async fn test_create_item_handler_ignores_empty_file_input() {
    let app = TestApp::new();

    let mut parts = item_fields("Empty Input");
    parts.push(Part::File {
        field: "coverImage",
        file_name: "",
        content_type: "application/octet-stream",
        data: vec![],
    });

    let (status, body) = app.send(create_request(parts)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_FILE");
}

#[tokio::test]
async fn test_create_item_handler_validates_fields() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("handler_validate");

    let parts = vec![
        Part::Text("name", "   "),
        Part::Text("type", "Shirt"),
        Part::Text("description", "Warm jacket"),
        cover(&builder),
    ];

    let (status, body) = app.send(create_request(parts)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
    assert_eq!(app.storage.upload_count().await, 0);
}

#[tokio::test]
async fn test_create_item_handler_rejects_unsupported_type() {
    let app = TestApp::new();

    let mut parts = item_fields("Document");
    parts.push(Part::File {
        field: "coverImage",
        file_name: "notes.pdf",
        content_type: "application/pdf",
        data: b"%PDF-1.7".to_vec(),
    });

    let (status, body) = app.send(create_request(parts)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UNSUPPORTED_MEDIA_TYPE");
    assert_eq!(
        body["message"],
        "Only image files (jpeg, jpg, png, gif, webp, tiff, bmp) are allowed!"
    );
    assert_eq!(app.stored_count().await, 0);
}

#[tokio::test]
async fn test_create_item_handler_rejects_oversized_file() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("handler_oversized");

    let mut parts = item_fields("Huge");
    parts.push(Part::File {
        field: "coverImage",
        file_name: "huge.png",
        content_type: "image/png",
        data: builder.png_bytes(MAX_UPLOAD_BYTES + 1),
    });

    let (status, body) = app.send(create_request(parts)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "PAYLOAD_TOO_LARGE");
    assert_eq!(app.storage.upload_count().await, 0);
}

#[tokio::test]
async fn test_create_item_handler_rejects_too_many_additional_images() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("handler_too_many");

    let mut parts = item_fields("Gallery");
    parts.push(cover(&builder));
    for _ in 0..6 {
        parts.push(Part::File {
            field: "additionalImages",
            file_name: "extra.png",
            content_type: "image/png",
            data: builder.png_bytes(16),
        });
    }

    let (status, _) = app.send(create_request(parts)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.stored_count().await, 0);
}

#[tokio::test]
async fn test_create_item_handler_rejects_unknown_file_field() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("handler_unknown_field");

    let mut parts = item_fields("Odd");
    parts.push(cover(&builder));
    parts.push(Part::File {
        field: "avatar",
        file_name: "me.png",
        content_type: "image/png",
        data: builder.png_bytes(16),
    });

    let (status, _) = app.send(create_request(parts)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_item_handler_upload_failure_returns_400() {
    let app = TestApp::with(MockImageStorage::failing("cloud unavailable"), MockEmailProvider::new());
    let builder = TestDataBuilder::from_test_name("handler_upload_failure");

    let mut parts = item_fields("Unlucky");
    parts.push(cover(&builder));

    let (status, body) = app.send(create_request(parts)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cover image upload failed or was missing.");
    assert_eq!(app.stored_count().await, 0);
}

#[tokio::test]
async fn test_list_items_handler_newest_first() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("handler_list");

    for name in ["First", "Second", "Third"] {
        let mut parts = item_fields(name);
        parts.push(cover(&builder));
        let (status, _) = app.send(create_request(parts)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.send(get_request("/")).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_list_items_handler_empty() {
    let app = TestApp::new();

    let (status, body) = app.send(get_request("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_get_item_handler() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("handler_get");

    let mut parts = item_fields("Red Jacket");
    parts.push(cover(&builder));
    let (_, created) = app.send(create_request(parts)).await;
    let id = created["item"]["_id"].as_str().unwrap().to_string();

    let (status, body) = app.send(get_request(&format!("/{id}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], id.as_str());
    assert_eq!(body["name"], "Red Jacket");
}

#[tokio::test]
async fn test_get_item_handler_not_found() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("handler_get_404");

    let (status, body) = app.send(get_request(&format!("/{}", builder.id()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found");
}

#[tokio::test]
async fn test_get_item_handler_invalid_id() {
    let app = TestApp::new();

    let (status, body) = app.send(get_request("/not-a-valid-id")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_IDENTIFIER");
    assert_eq!(body["message"], "Invalid Item ID format");
}

#[tokio::test]
async fn test_enquire_handler_sends_email() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("handler_enquire");

    let mut parts = item_fields("Red Jacket");
    parts.push(cover(&builder));
    let (_, created) = app.send(create_request(parts)).await;
    let id = created["item"]["_id"].as_str().unwrap().to_string();

    let (status, body) = app.send(post_request(&format!("/{id}/enquire"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Enquiry email sent successfully!");

    let sent = app.email.sent_emails().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to_email, "owner@shop.test");
    assert_eq!(sent[0].subject, "Enquiry for Item: Red Jacket");
}

#[tokio::test]
async fn test_enquire_handler_not_found_sends_nothing() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("handler_enquire_404");

    let (status, _) = app
        .send(post_request(&format!("/{}/enquire", builder.id())))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.email.attempt_count().await, 0);
}

#[tokio::test]
async fn test_enquire_handler_auth_failure_returns_500() {
    let app = TestApp::with(MockImageStorage::new(), MockEmailProvider::failing_auth());
    let builder = TestDataBuilder::from_test_name("handler_enquire_auth");

    let mut parts = item_fields("Red Jacket");
    parts.push(cover(&builder));
    let (_, created) = app.send(create_request(parts)).await;
    let id = created["item"]["_id"].as_str().unwrap().to_string();

    let (status, body) = app.send(post_request(&format!("/{id}/enquire"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "EMAIL_AUTHENTICATION");
    assert_eq!(
        body["message"],
        "Email authentication failed. Check EMAIL_USER and EMAIL_PASS"
    );
}

#[tokio::test]
async fn test_enquire_handler_delivery_failure_returns_500() {
    let app = TestApp::with(
        MockImageStorage::new(),
        MockEmailProvider::failing_delivery(Some(550), "5.1.1 mailbox unavailable"),
    );
    let builder = TestDataBuilder::from_test_name("handler_enquire_delivery");

    let mut parts = item_fields("Red Jacket");
    parts.push(cover(&builder));
    let (_, created) = app.send(create_request(parts)).await;
    let id = created["item"]["_id"].as_str().unwrap().to_string();

    let (status, body) = app.send(post_request(&format!("/{id}/enquire"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Email service error: 550 - 5.1.1 mailbox unavailable");
}
