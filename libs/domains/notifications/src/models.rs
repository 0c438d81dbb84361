//! Notification payloads.

use serde::{Deserialize, Serialize};

/// The item an enquiry refers to, as shown in the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryDetails {
    pub item_id: String,
    pub item_name: String,
    pub item_type: String,
    pub description: String,
}
