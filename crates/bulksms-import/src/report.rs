use crate::csv::write_delimited;
use bulksms_core::Contact;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_HEADER: [&str; 5] = ["Name", "Phone", "Original Phone", "Status", "Error"];

/// Flat delivery report, one row per contact in list order.
pub fn export_report_csv(contacts: &[Contact]) -> String {
    let header: Vec<String> = REPORT_HEADER.iter().map(|cell| cell.to_string()).collect();
    let rows = contacts.iter().map(|contact| {
        vec![
            contact.name.clone(),
            contact.phone.clone(),
            contact.original_phone.clone(),
            contact.status.as_str().to_string(),
            contact.error.clone().unwrap_or_default(),
        ]
    });
    write_delimited(std::iter::once(header).chain(rows), ',')
}

pub fn default_report_filename(date: NaiveDate) -> String {
    format!("sms-report-{}.csv", date.format("%Y-%m-%d"))
}

/// Directories receive a dated file name; any other path is used as given.
pub fn resolve_report_path(target: &Path, today: NaiveDate) -> PathBuf {
    if target.is_dir() {
        target.join(default_report_filename(today))
    } else {
        target.to_path_buf()
    }
}

pub fn write_report(
    target: &Path,
    today: NaiveDate,
    contacts: &[Contact],
) -> crate::Result<PathBuf> {
    let path = resolve_report_path(target, today);
    fs::write(&path, export_report_csv(contacts))?;
    Ok(path)
}
