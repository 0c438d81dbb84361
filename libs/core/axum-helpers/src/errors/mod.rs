pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// ```json
/// {
///   "code": 1002,
///   "error": "INVALID_IDENTIFIER",
///   "message": "Invalid Item ID format"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Per-field validation failures, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Multipart rejection: {0}")]
    MultipartRejection(#[from] MultipartRejection),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Missing file: {0}")]
    MissingFile(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Email authentication failed: {0}")]
    EmailAuthentication(String),

    #[error("Email delivery failed: {0}")]
    EmailDelivery(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code) = match self {
            AppError::MultipartRejection(e) => {
                tracing::info!(error_code = ErrorCode::MultipartError.code(), error = %e, "Multipart rejection");
                (StatusCode::BAD_REQUEST, e.body_text(), None, ErrorCode::MultipartError)
            }
            AppError::Multipart(e) => {
                tracing::info!(error_code = ErrorCode::MultipartError.code(), error = %e, "Multipart read error");
                // Body limit hits are reported like any other oversize upload
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    (
                        StatusCode::BAD_REQUEST,
                        e.body_text(),
                        None,
                        ErrorCode::PayloadTooLarge,
                    )
                } else {
                    (StatusCode::BAD_REQUEST, e.body_text(), None, ErrorCode::MultipartError)
                }
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), error = ?e, "Validation error");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(validation_details(&e)),
                    ErrorCode::ValidationError,
                )
            }
            AppError::BadRequest(msg) => client_error(StatusCode::BAD_REQUEST, msg, ErrorCode::BadRequest),
            AppError::InvalidIdentifier(msg) => {
                client_error(StatusCode::BAD_REQUEST, msg, ErrorCode::InvalidIdentifier)
            }
            AppError::MissingFile(msg) => client_error(StatusCode::BAD_REQUEST, msg, ErrorCode::MissingFile),
            AppError::UnsupportedMediaType(msg) => {
                client_error(StatusCode::BAD_REQUEST, msg, ErrorCode::UnsupportedMediaType)
            }
            AppError::PayloadTooLarge(msg) => {
                client_error(StatusCode::BAD_REQUEST, msg, ErrorCode::PayloadTooLarge)
            }
            AppError::UploadFailed(msg) => {
                tracing::warn!(error_code = ErrorCode::UploadFailed.code(), "Upload failed: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None, ErrorCode::UploadFailed)
            }
            AppError::NotFound(msg) => client_error(StatusCode::NOT_FOUND, msg, ErrorCode::NotFound),
            AppError::Database(msg) => {
                tracing::error!(error_code = ErrorCode::DatabaseError.code(), "Database error: {}", msg);
                server_error(ErrorCode::DatabaseError)
            }
            AppError::EmailAuthentication(msg) => {
                tracing::error!(error_code = ErrorCode::EmailAuthentication.code(), "{}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg,
                    None,
                    ErrorCode::EmailAuthentication,
                )
            }
            AppError::EmailDelivery(msg) => {
                tracing::error!(error_code = ErrorCode::EmailDelivery.code(), "{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None, ErrorCode::EmailDelivery)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = ErrorCode::InternalError.code(), "Internal server error: {}", msg);
                server_error(ErrorCode::InternalError)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = ErrorCode::ServiceUnavailable.code(), "Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg, None, ErrorCode::ServiceUnavailable)
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

type ErrorParts = (StatusCode, String, Option<serde_json::Value>, ErrorCode);

fn client_error(status: StatusCode, message: String, code: ErrorCode) -> ErrorParts {
    tracing::info!(error_code = code.code(), status = status.as_u16(), "{}", message);
    (status, message, None, code)
}

/// Server-side failures never echo internal details to the client.
fn server_error(code: ErrorCode) -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code.default_message().to_string(),
        None,
        code,
    )
}

/// Flatten `validator` errors into `{ field: [{ code, message, params }] }`.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let entries: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}

/// Build a bare error response.
///
/// ```rust,ignore
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(StatusCode::BAD_REQUEST, "Invalid input".to_string(), ErrorCode::BadRequest);
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}
