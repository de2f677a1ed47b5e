use crate::domain::ids::ContactId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Pending,
    Sent,
    Failed,
}

impl ContactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Sent => "sent",
            ContactStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipient whose `phone` is already in canonical `+<digits>` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub original_phone: String,
    pub status: ContactStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Contact {
    pub fn pending(name: String, phone: String, original_phone: String) -> Self {
        Self {
            id: ContactId::generate(),
            name,
            phone,
            original_phone,
            status: ContactStatus::Pending,
            error: None,
        }
    }

    pub fn mark_sent(&mut self) {
        self.status = ContactStatus::Sent;
        self.error = None;
    }

    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.status = ContactStatus::Failed;
        self.error = Some(error.into());
    }

    /// Contacts with both a name and a phone are eligible for sending.
    pub fn is_ready(&self) -> bool {
        !self.name.trim().is_empty() && !self.phone.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactStatus};

    fn jane() -> Contact {
        Contact::pending(
            "Jane".to_string(),
            "+256712345678".to_string(),
            "0712345678".to_string(),
        )
    }

    #[test]
    fn pending_contact_has_no_error() {
        let contact = jane();
        assert_eq!(contact.status, ContactStatus::Pending);
        assert!(contact.error.is_none());
        assert!(contact.is_ready());
    }

    #[test]
    fn mark_sent_clears_previous_error() {
        let mut contact = jane();
        contact.mark_failed("InvalidSenderId");
        assert_eq!(contact.error.as_deref(), Some("InvalidSenderId"));

        contact.mark_sent();
        assert_eq!(contact.status, ContactStatus::Sent);
        assert!(contact.error.is_none());
    }

    #[test]
    fn status_serializes_lowercase() {
        let mut contact = jane();
        contact.mark_failed("boom");
        let value = serde_json::to_value(&contact).expect("serialize");
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], "boom");
        assert_eq!(value["original_phone"], "0712345678");
    }
}
