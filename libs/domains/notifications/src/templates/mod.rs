//! Email template rendering engine.
//!
//! This module provides Handlebars-based template rendering for emails.
//! HTML templates use `{{...}}` so item fields are escaped; text templates use
//! `{{{...}}}` to keep them verbatim.

use crate::error::{NotificationError, NotificationResult};
use crate::models::EnquiryDetails;
use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Rendered email content.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    /// HTML body content.
    pub html: String,
    /// Plain text body content.
    pub text: String,
    /// Email subject line.
    pub subject: String,
}

/// Template engine for rendering email templates.
#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Arc<Handlebars<'static>>,
}

impl TemplateEngine {
    /// Create a new template engine with all templates registered.
    pub fn new() -> NotificationResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        handlebars
            .register_template_string("enquiry_html", ENQUIRY_HTML_TEMPLATE)
            .map_err(|e| NotificationError::TemplateError(format!("Failed to register enquiry_html: {}", e)))?;
        handlebars
            .register_template_string("enquiry_text", ENQUIRY_TEXT_TEMPLATE)
            .map_err(|e| NotificationError::TemplateError(format!("Failed to register enquiry_text: {}", e)))?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    /// Render a template with the given data.
    fn render<T: Serialize>(&self, template_name: &str, data: &T) -> NotificationResult<String> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| NotificationError::TemplateError(e.to_string()))
    }

    /// Render an item enquiry email.
    pub fn render_enquiry(&self, data: &EnquiryDetails) -> NotificationResult<RenderedEmail> {
        debug!(item_id = %data.item_id, "Rendering enquiry email");

        let html = self.render("enquiry_html", data)?;
        let text = self.render("enquiry_text", data)?;

        Ok(RenderedEmail {
            html,
            text,
            subject: format!("Enquiry for Item: {}", data.item_name),
        })
    }
}

// ============================================================================
// Email Templates
// ============================================================================

const ENQUIRY_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Enquiry for Item: {{item_name}}</title>
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #18181b;">
  <p>Hello,</p>
  <p>An enquiry has been made for the following item:</p>
  <ul>
    <li><strong>Item Name:</strong> {{item_name}}</li>
    <li><strong>Item Type:</strong> {{item_type}}</li>
    <li><strong>Description:</strong> {{description}}</li>
    <li><strong>Item ID:</strong> {{item_id}}</li>
  </ul>
  <p style="color: #71717a; font-size: 12px;">
    This is an automated email. Do not reply to this email. For further details, please contact the interested party directly.
  </p>
</body>
</html>"#;

const ENQUIRY_TEXT_TEMPLATE: &str = r#"Hello,

An enquiry has been made for the following item:

  Item Name:   {{{item_name}}}
  Item Type:   {{{item_type}}}
  Description: {{{description}}}
  Item ID:     {{{item_id}}}

This is an automated email. Do not reply to this email. For further details, please contact the interested party directly.
"#;
