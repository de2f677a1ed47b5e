use crate::domain::Contact;
use std::collections::HashSet;

/// Appends `incoming` contacts whose phone is not already present.
///
/// Existing entries keep their position and status.
pub fn merge_contacts(existing: Vec<Contact>, incoming: Vec<Contact>) -> Vec<Contact> {
    let mut seen: HashSet<String> = existing.iter().map(|c| c.phone.clone()).collect();
    let mut merged = existing;
    for contact in incoming {
        if seen.insert(contact.phone.clone()) {
            merged.push(contact);
        }
    }
    merged
}
