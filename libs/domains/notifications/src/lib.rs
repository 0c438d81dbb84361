//! Notifications Domain
//!
//! Email notifications for the item catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Item Service   │  ← Calls EnquiryNotifier
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │  EnquiryMailer  │  ← Renders templates, addresses the recipient
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ Email Provider  │  ← SMTP, mock
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_notifications::{EnquiryMailer, SmtpConfig, SmtpProvider};
//! use core_config::FromEnv;
//!
//! let provider = Arc::new(SmtpProvider::new(SmtpConfig::from_env()?)?);
//! let mailer = EnquiryMailer::new(provider, "owner@example.com")?;
//! mailer.send_enquiry(&details).await?;
//! ```

pub mod error;
pub mod models;
pub mod notifier;
pub mod providers;
pub mod templates;

// Re-export commonly used types
pub use error::{NotificationError, NotificationResult};
pub use models::EnquiryDetails;
pub use notifier::{EnquiryMailer, EnquiryNotifier};
pub use providers::{EmailContent, EmailProvider, MockEmailProvider, SentEmail, SmtpConfig, SmtpProvider};
pub use templates::TemplateEngine;
