//! Error types for the notifications domain.

use thiserror::Error;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors that can occur in the notifications domain.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The mail server rejected the configured credentials.
    #[error("Email authentication failed. Check EMAIL_USER and EMAIL_PASS")]
    AuthenticationFailed { detail: String },

    /// Any other transport failure. `code` is the SMTP reply code when the server sent one.
    #[error("{}", delivery_message(.code, .response))]
    Delivery { code: Option<u16>, response: String },

    /// Email provider could not be built or used.
    #[error("Email provider error: {0}")]
    ProviderError(String),

    /// Template rendering error.
    #[error("Template rendering error: {0}")]
    TemplateError(String),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn delivery_message(code: &Option<u16>, response: &str) -> String {
    match code {
        Some(code) => format!("Email service error: {} - {}", code, response),
        None => "Failed to send enquiry email".to_string(),
    }
}

impl NotificationError {
    /// Classify a failed send by its SMTP reply.
    ///
    /// 530, 534 and 535 are the codes servers use for rejected or missing
    /// credentials.
    pub fn from_smtp_reply(code: Option<u16>, response: impl Into<String>) -> Self {
        let response = response.into();
        match code {
            Some(530 | 534 | 535) => NotificationError::AuthenticationFailed { detail: response },
            _ => NotificationError::Delivery { code, response },
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, NotificationError::AuthenticationFailed { .. })
    }
}

impl From<handlebars::RenderError> for NotificationError {
    fn from(err: handlebars::RenderError) -> Self {
        NotificationError::TemplateError(err.to_string())
    }
}

impl From<core_config::ConfigError> for NotificationError {
    fn from(err: core_config::ConfigError) -> Self {
        NotificationError::ConfigError(err.to_string())
    }
}
