use crate::domain::{Contact, ContactStatus};
use crate::rules::{estimate_cost, message_length, page_count};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageStatsDto {
    pub characters: usize,
    pub pages: u32,
    pub recipients: usize,
    pub estimated_cost: f64,
}

impl MessageStatsDto {
    pub fn compute(message: &str, recipients: usize, cost_per_segment: f64) -> Self {
        let pages = page_count(message);
        Self {
            characters: message_length(message),
            pages,
            recipients,
            estimated_cost: estimate_cost(pages, recipients, cost_per_segment),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummaryDto {
    pub total: usize,
    pub ready: usize,
    pub pending: usize,
    pub sent: usize,
    pub failed: usize,
}

impl StatusSummaryDto {
    pub fn from_contacts(contacts: &[Contact]) -> Self {
        let mut summary = Self {
            total: contacts.len(),
            ..Self::default()
        };
        for contact in contacts {
            if contact.is_ready() {
                summary.ready += 1;
            }
            match contact.status {
                ContactStatus::Pending => summary.pending += 1,
                ContactStatus::Sent => summary.sent += 1,
                ContactStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageStatsDto, StatusSummaryDto};
    use crate::domain::Contact;

    #[test]
    fn summary_counts_each_status() {
        let mut sent = Contact::pending("A".into(), "+256700000001".into(), "1".into());
        sent.mark_sent();
        let mut failed = Contact::pending("B".into(), "+256700000002".into(), "2".into());
        failed.mark_failed("InvalidPhoneNumber");
        let pending = Contact::pending("".into(), "+256700000003".into(), "3".into());

        let summary = StatusSummaryDto::from_contacts(&[sent, failed, pending]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.ready, 2);
        assert_eq!(summary.sent, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.pending, 1);
    }

    #[test]
    fn message_stats_combine_sizer_and_cost() {
        let stats = MessageStatsDto::compute(&"x".repeat(200), 4, 0.05);
        assert_eq!(stats.characters, 200);
        assert_eq!(stats.pages, 2);
        assert_eq!(stats.recipients, 4);
        assert!((stats.estimated_cost - 0.4).abs() < 1e-9);
    }
}
