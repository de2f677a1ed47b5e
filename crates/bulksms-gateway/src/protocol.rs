//! Wire types for the Africa's Talking bulk messaging endpoint.

use bulksms_core::{Contact, GatewayConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status code the gateway uses for an accepted recipient.
pub const STATUS_ACCEPTED: i64 = 101;

/// One outbound request covering every recipient.
#[derive(Clone, PartialEq, Eq)]
pub struct BulkRequest<'a> {
    pub username: &'a str,
    pub api_key: &'a str,
    pub sender_id: &'a str,
    pub message: &'a str,
    /// Canonical phones joined by `,`; the gateway echoes them back verbatim.
    pub to: String,
}

impl<'a> BulkRequest<'a> {
    pub fn new(config: &'a GatewayConfig, message: &'a str, contacts: &[Contact]) -> Self {
        let to = contacts
            .iter()
            .map(|contact| contact.phone.as_str())
            .collect::<Vec<_>>()
            .join(",");
        Self {
            username: &config.username,
            api_key: &config.api_key,
            sender_id: &config.sender_id,
            message,
            to,
        }
    }

    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("username", self.username),
            ("to", self.to.as_str()),
            ("message", self.message),
            ("from", self.sender_id),
        ]
    }

    pub fn recipient_count(&self) -> usize {
        if self.to.is_empty() {
            0
        } else {
            self.to.split(',').count()
        }
    }
}

impl fmt::Debug for BulkRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkRequest")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("sender_id", &self.sender_id)
            .field("message", &self.message)
            .field("to", &self.to)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GatewayResponse {
    #[serde(rename = "SMSMessageData", default)]
    pub data: Option<SmsMessageData>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SmsMessageData {
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
    #[serde(rename = "Recipients", default)]
    pub recipients: Vec<RecipientReceipt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientReceipt {
    #[serde(rename = "statusCode")]
    pub status_code: i64,
    pub number: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub cost: String,
    #[serde(rename = "messageId", default)]
    pub message_id: String,
}

impl RecipientReceipt {
    pub fn accepted(&self) -> bool {
        self.status_code == STATUS_ACCEPTED
    }
}

pub fn parse_response(body: &str) -> Result<GatewayResponse, serde_json::Error> {
    serde_json::from_str(body)
}
