use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_notifications::NotificationError;
use image_storage::StorageError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

pub const MISSING_COVER_MESSAGE: &str = "Cover image upload failed or was missing.";

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid Item ID format: {0}")]
    InvalidId(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{}", MISSING_COVER_MESSAGE)]
    MissingCoverImage,

    #[error("Rejected image: {0}")]
    InvalidImage(#[source] StorageError),

    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Enquiry notification failed: {0}")]
    Notification(#[from] NotificationError),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(_) => AppError::NotFound("Item not found".to_string()),
            ItemError::InvalidId(_) => AppError::InvalidIdentifier("Invalid Item ID format".to_string()),
            ItemError::Validation(errors) => AppError::ValidationError(errors),
            ItemError::MissingCoverImage => AppError::MissingFile(MISSING_COVER_MESSAGE.to_string()),
            ItemError::InvalidImage(e) => match e {
                StorageError::PayloadTooLarge { .. } => AppError::PayloadTooLarge(e.to_string()),
                StorageError::EmptyFile(_) => AppError::BadRequest(e.to_string()),
                _ => AppError::UnsupportedMediaType(e.to_string()),
            },
            ItemError::Upload(msg) => AppError::UploadFailed(msg),
            ItemError::Database(msg) => AppError::Database(msg),
            ItemError::Notification(e) if e.is_authentication() => AppError::EmailAuthentication(e.to_string()),
            ItemError::Notification(e) => AppError::EmailDelivery(e.to_string()),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ItemError {
    fn from(err: mongodb::error::Error) -> Self {
        ItemError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: ItemError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(ItemError::NotFound(Uuid::nil())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ItemError::InvalidId("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ItemError::MissingCoverImage), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ItemError::Upload("boom".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(ItemError::Database("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejected_images_are_client_errors() {
        let too_large = StorageError::PayloadTooLarge {
            file_name: "big.jpg".into(),
            size: 11,
            max: 10,
        };
        assert!(matches!(
            AppError::from(ItemError::InvalidImage(too_large)),
            AppError::PayloadTooLarge(_)
        ));

        let wrong_type = StorageError::UnsupportedMediaType {
            file_name: "a.txt".into(),
            content_type: "text/plain".into(),
        };
        assert!(matches!(
            AppError::from(ItemError::InvalidImage(wrong_type)),
            AppError::UnsupportedMediaType(_)
        ));
    }

    #[test]
    fn test_notification_errors_are_server_errors() {
        let auth = ItemError::Notification(NotificationError::from_smtp_reply(Some(535), "bad creds"));
        assert!(matches!(AppError::from(auth), AppError::EmailAuthentication(_)));

        let delivery = ItemError::Notification(NotificationError::from_smtp_reply(Some(550), "nope"));
        assert_eq!(status_of(delivery), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
