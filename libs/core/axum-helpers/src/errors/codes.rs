//! Type-safe error codes for API responses.
//!
//! Each code has a string form for clients (`"VALIDATION_ERROR"`), an integer
//! for logs and dashboards (`1001`), and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Path identifier is not in the expected shape
    InvalidIdentifier,

    /// Requested resource was not found
    NotFound,

    /// Generic malformed request
    BadRequest,

    /// A required file part was absent
    MissingFile,

    /// Uploaded file type is not accepted
    UnsupportedMediaType,

    /// Uploaded file or request body exceeds the size limit
    PayloadTooLarge,

    /// Multipart body could not be read
    MultipartError,

    /// HTTP method not supported by the route
    MethodNotAllowed,

    // Server errors (1000s, historical numbering)
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Database errors (2000-2999)
    /// Document store query or write failed
    DatabaseError,

    // Upstream services (6000s)
    /// Object storage rejected or failed an upload
    UploadFailed,

    /// Mail transport rejected the configured credentials
    EmailAuthentication,

    /// Mail transport failed to accept the message
    EmailDelivery,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for programmatic handling by clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidIdentifier => "INVALID_IDENTIFIER",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::MissingFile => "MISSING_FILE",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::MultipartError => "MULTIPART_ERROR",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::UploadFailed => "UPLOAD_FAILED",
            Self::EmailAuthentication => "EMAIL_AUTHENTICATION",
            Self::EmailDelivery => "EMAIL_DELIVERY",
        }
    }

    /// Integer code for structured logs and metrics.
    ///
    /// - 1000-1999: client errors (plus the two generic server codes)
    /// - 2000-2999: database errors
    /// - 6000-6999: upstream services (object storage 60xx, mail 61xx)
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidIdentifier => 1002,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::BadRequest => 1006,
            Self::MissingFile => 1007,
            Self::UnsupportedMediaType => 1008,
            Self::PayloadTooLarge => 1009,
            Self::MultipartError => 1010,
            Self::ServiceUnavailable => 1011,
            Self::MethodNotAllowed => 1012,

            Self::DatabaseError => 2003,

            Self::UploadFailed => 6001,
            Self::EmailAuthentication => 6101,
            Self::EmailDelivery => 6102,
        }
    }

    /// Default user-facing message; handlers usually supply a more specific one.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidIdentifier => "Invalid identifier format",
            Self::NotFound => "Resource not found",
            Self::BadRequest => "Bad request",
            Self::MissingFile => "A required file was not provided",
            Self::UnsupportedMediaType => "Unsupported file type",
            Self::PayloadTooLarge => "File is too large",
            Self::MultipartError => "Failed to read multipart body",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "Database error occurred",
            Self::UploadFailed => "Image upload failed",
            Self::EmailAuthentication => "Email authentication failed",
            Self::EmailDelivery => "Failed to send email",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
