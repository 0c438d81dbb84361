//! Mock email provider for testing

use super::{EmailContent, EmailProvider, SentEmail};
use crate::error::{NotificationError, NotificationResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
enum Failure {
    Authentication,
    Delivery { code: Option<u16>, response: String },
}

/// Mock email provider that captures sent emails
#[derive(Clone, Default)]
pub struct MockEmailProvider {
    sent_emails: Arc<Mutex<Vec<EmailContent>>>,
    /// Every call to `send`, including failed ones
    attempts: Arc<Mutex<usize>>,
    failure: Option<Failure>,
}

impl MockEmailProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider whose credentials are always rejected
    pub fn failing_auth() -> Self {
        Self {
            failure: Some(Failure::Authentication),
            ..Self::default()
        }
    }

    /// Create a mock provider that fails delivery with the given SMTP reply
    pub fn failing_delivery(code: Option<u16>, response: impl Into<String>) -> Self {
        Self {
            failure: Some(Failure::Delivery {
                code,
                response: response.into(),
            }),
            ..Self::default()
        }
    }

    /// Get all sent emails
    pub async fn sent_emails(&self) -> Vec<EmailContent> {
        self.sent_emails.lock().await.clone()
    }

    /// Get the count of sent emails
    pub async fn sent_count(&self) -> usize {
        self.sent_emails.lock().await.len()
    }

    /// Get the count of send attempts, successful or not
    pub async fn attempt_count(&self) -> usize {
        *self.attempts.lock().await
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send(&self, email: &EmailContent) -> NotificationResult<SentEmail> {
        *self.attempts.lock().await += 1;

        match &self.failure {
            Some(Failure::Authentication) => Err(NotificationError::AuthenticationFailed {
                detail: "535 5.7.8 Username and Password not accepted".to_string(),
            }),
            Some(Failure::Delivery { code, response }) => {
                Err(NotificationError::from_smtp_reply(*code, response.clone()))
            }
            None => {
                let mut sent = self.sent_emails.lock().await;
                sent.push(email.clone());
                Ok(SentEmail {
                    message_id: Some(format!("mock-{}", sent.len())),
                    accepted: true,
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    async fn health_check(&self) -> NotificationResult<bool> {
        if self.failure.is_some() {
            return Err(NotificationError::ProviderError(
                "Mock health check failed".to_string(),
            ));
        }
        Ok(true)
    }
}
