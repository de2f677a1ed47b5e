use crate::error::SendRejected;
use crate::protocol::{BulkRequest, RecipientReceipt};
use crate::transport::Transport;
use bulksms_core::{Contact, GatewayConfig};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize)]
pub struct SendReport {
    pub contacts: Vec<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub receipts: Vec<RecipientReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_error: Option<String>,
}

/// Sends `message` to every contact in one request and returns the contacts
/// with their delivery status filled in.
///
/// Only blank input or incomplete credentials are rejected, before any I/O.
/// Transport failures mark the whole batch failed with a shared error; gateway
/// receipts are joined back on the canonical phone. Contacts with no receipt
/// keep their previous status. Order and membership never change.
pub fn send_bulk<T>(
    transport: &T,
    message: &str,
    contacts: &[Contact],
    config: &GatewayConfig,
) -> Result<SendReport, SendRejected>
where
    T: Transport + ?Sized,
{
    if message.trim().is_empty() {
        return Err(SendRejected::EmptyMessage);
    }
    if contacts.is_empty() {
        return Err(SendRejected::NoRecipients);
    }
    config.validate()?;

    let request = BulkRequest::new(config, message, contacts);
    debug!(
        transport = transport.transport_name(),
        recipients = request.recipient_count(),
        sandbox = config.mode.is_sandbox(),
        "sending bulk message"
    );

    let mut updated = contacts.to_vec();
    match transport.send(&request) {
        Ok(response) => {
            let data = response.data.unwrap_or_default();
            reconcile(&mut updated, &data.recipients);
            Ok(SendReport {
                contacts: updated,
                summary: data.message,
                receipts: data.recipients,
                transport_error: None,
            })
        }
        Err(err) => {
            let error = err.to_string();
            warn!(error = %error, "gateway request failed; marking batch failed");
            for contact in &mut updated {
                contact.mark_failed(error.clone());
            }
            Ok(SendReport {
                contacts: updated,
                summary: None,
                receipts: Vec::new(),
                transport_error: Some(error),
            })
        }
    }
}

/// Applies receipts to every contact whose phone matches the echoed number.
pub fn reconcile(contacts: &mut [Contact], receipts: &[RecipientReceipt]) {
    for receipt in receipts {
        let mut matched = false;
        for contact in contacts.iter_mut().filter(|c| c.phone == receipt.number) {
            matched = true;
            if receipt.accepted() {
                contact.mark_sent();
            } else {
                contact.mark_failed(receipt.status.clone());
            }
        }
        if !matched {
            debug!(number = %receipt.number, "receipt matches no contact");
        }
    }
}
