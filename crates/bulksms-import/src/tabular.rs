use crate::error::{ImportError, Result};
use bulksms_core::{normalize_phone, Contact, CountryCode};
use serde::Serialize;
use std::collections::HashSet;

pub const NAME_ALIASES: &[&str] = &["name", "full name", "contact name"];
pub const PHONE_ALIASES: &[&str] = &[
    "phone",
    "phone number",
    "number",
    "tel",
    "telephone",
    "mobile",
];

#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    pub contacts: Vec<Contact>,
    pub warnings: Vec<String>,
    pub skipped: usize,
    pub duplicates: usize,
}

/// Accumulates candidates for one extraction call; the seen set never outlives it.
pub(crate) struct Batch<'a> {
    country: &'a CountryCode,
    seen: HashSet<String>,
    out: Extraction,
}

impl<'a> Batch<'a> {
    pub(crate) fn new(country: &'a CountryCode) -> Self {
        Self {
            country,
            seen: HashSet::new(),
            out: Extraction::default(),
        }
    }

    pub(crate) fn offer(&mut self, name: &str, raw_phone: &str, original_phone: &str) {
        let phone = match normalize_phone(raw_phone, self.country) {
            Ok(phone) => phone,
            Err(_) => {
                self.out
                    .warnings
                    .push(format!("skipping invalid phone number: {original_phone}"));
                self.out.skipped += 1;
                return;
            }
        };

        if !self.seen.insert(phone.clone()) {
            self.out.duplicates += 1;
            return;
        }

        self.out.contacts.push(Contact::pending(
            name.to_string(),
            phone,
            original_phone.to_string(),
        ));
    }

    pub(crate) fn skip(&mut self) {
        self.out.skipped += 1;
    }

    pub(crate) fn finish(self) -> Extraction {
        self.out
    }
}

/// Builds contacts from stringly rows whose first row is the header.
pub fn extract(rows: &[Vec<String>], country: &CountryCode) -> Result<Extraction> {
    if rows.len() < 2 {
        return Err(ImportError::MissingHeaderRow);
    }

    let headers: Vec<String> = rows[0]
        .iter()
        .map(|cell| cell.trim().to_lowercase())
        .collect();
    let name_index =
        find_column(&headers, NAME_ALIASES).ok_or(ImportError::MissingRequiredColumn("name"))?;
    let phone_index =
        find_column(&headers, PHONE_ALIASES).ok_or(ImportError::MissingRequiredColumn("phone"))?;

    let mut batch = Batch::new(country);
    for row in &rows[1..] {
        if row.is_empty() {
            continue;
        }

        let name = cell(row, name_index);
        let phone = cell(row, phone_index);
        if name.is_empty() || phone.is_empty() {
            batch.skip();
            continue;
        }

        batch.offer(name, phone, phone);
    }

    Ok(batch.finish())
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|value| value.trim()).unwrap_or("")
}

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|header| header.contains(alias)))
}
