use crate::error::{ImportError, Result};
use crate::tabular::{Batch, Extraction};
use bulksms_core::CountryCode;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_NAME: &str = "Unknown";

/// A contact record as handed over by a device contact picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceContact {
    #[serde(default)]
    pub name: Vec<String>,
    #[serde(default)]
    pub tel: Vec<String>,
}

impl DeviceContact {
    pub fn display_name(&self) -> &str {
        match self.name.first() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNKNOWN_NAME,
        }
    }
}

/// Every (name, tel) pair is a candidate; normalization and dedup match [`crate::extract`].
pub fn extract_device(records: &[DeviceContact], country: &CountryCode) -> Result<Extraction> {
    if records.is_empty() {
        return Err(ImportError::NoContactsSelected);
    }

    let mut batch = Batch::new(country);
    for record in records {
        let name = record.display_name();
        for tel in &record.tel {
            batch.offer(name, tel, tel);
        }
    }

    let extraction = batch.finish();
    if extraction.contacts.is_empty() {
        return Err(ImportError::NoValidPhoneNumbers);
    }
    Ok(extraction)
}

pub fn parse_device_json(data: &str) -> Result<Vec<DeviceContact>> {
    serde_json::from_str(data).map_err(|err| ImportError::Parse(err.to_string()))
}
