//! Enquiry notifications.

use crate::error::{NotificationError, NotificationResult};
use crate::models::EnquiryDetails;
use crate::providers::{EmailContent, EmailProvider, SentEmail};
use crate::templates::TemplateEngine;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Sends an email about an item to the shop's enquiry inbox.
///
/// Every call is a single delivery attempt. Repeated calls for the same item
/// send repeated emails.
#[async_trait]
pub trait EnquiryNotifier: Send + Sync {
    async fn send_enquiry(&self, enquiry: &EnquiryDetails) -> NotificationResult<SentEmail>;

    /// Whether the underlying transport is reachable.
    async fn health_check(&self) -> NotificationResult<()>;
}

/// [`EnquiryNotifier`] that renders the enquiry template and sends it through an [`EmailProvider`].
#[derive(Clone)]
pub struct EnquiryMailer {
    provider: Arc<dyn EmailProvider>,
    templates: TemplateEngine,
    recipient: String,
}

impl EnquiryMailer {
    pub fn new(provider: Arc<dyn EmailProvider>, recipient: impl Into<String>) -> NotificationResult<Self> {
        let recipient = recipient.into();
        if recipient.trim().is_empty() || !recipient.contains('@') {
            return Err(NotificationError::InvalidEmail(format!(
                "recipient '{}'",
                recipient
            )));
        }

        Ok(Self {
            provider,
            templates: TemplateEngine::new()?,
            recipient,
        })
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

#[async_trait]
impl EnquiryNotifier for EnquiryMailer {
    #[instrument(skip(self, enquiry), fields(item_id = %enquiry.item_id, provider = self.provider.name()))]
    async fn send_enquiry(&self, enquiry: &EnquiryDetails) -> NotificationResult<SentEmail> {
        let rendered = self.templates.render_enquiry(enquiry)?;

        let email = EmailContent {
            to_email: self.recipient.clone(),
            subject: rendered.subject,
            html_body: rendered.html,
            text_body: rendered.text,
            ..Default::default()
        };

        let sent = self.provider.send(&email).await?;
        info!(message_id = ?sent.message_id, "Enquiry email sent");
        Ok(sent)
    }

    async fn health_check(&self) -> NotificationResult<()> {
        match self.provider.health_check().await? {
            true => Ok(()),
            false => Err(NotificationError::ProviderError(format!(
                "{} provider is not reachable",
                self.provider.name()
            ))),
        }
    }
}
