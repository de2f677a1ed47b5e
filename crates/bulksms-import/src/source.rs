use crate::csv::parse_delimited;
use crate::device::{extract_device, parse_device_json};
use crate::error::{ImportError, Result};
use crate::spreadsheet::read_first_sheet;
use crate::tabular::{extract, Extraction};
use crate::vcf::parse_vcf;
use bulksms_core::CountryCode;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Tsv,
    Spreadsheet,
    Vcard,
    DeviceJson,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") | Some("txt") => Ok(FileKind::Csv),
            Some("tsv") => Ok(FileKind::Tsv),
            Some("xlsx") | Some("xls") | Some("xlsm") | Some("ods") => Ok(FileKind::Spreadsheet),
            Some("vcf") | Some("vcard") => Ok(FileKind::Vcard),
            Some("json") => Ok(FileKind::DeviceJson),
            _ => Err(ImportError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Csv => "csv",
            FileKind::Tsv => "tsv",
            FileKind::Spreadsheet => "spreadsheet",
            FileKind::Vcard => "vcard",
            FileKind::DeviceJson => "device-json",
        }
    }
}

/// Reads one contact file and runs it through the matching extraction path.
pub fn load_contacts(path: &Path, country: &CountryCode) -> Result<Extraction> {
    let kind = FileKind::from_path(path)?;
    if kind == FileKind::Spreadsheet {
        return extract(&read_first_sheet(path)?, country);
    }
    let data = fs::read_to_string(path)?;
    extract_from_str(kind, &data, country)
}

pub fn extract_from_str(kind: FileKind, data: &str, country: &CountryCode) -> Result<Extraction> {
    match kind {
        FileKind::Csv => extract(&parse_delimited(data, ',')?, country),
        FileKind::Tsv => extract(&parse_delimited(data, '\t')?, country),
        FileKind::Vcard => {
            let parsed = parse_vcf(data);
            let mut extraction = extract_device(&parsed.records, country)?;
            let mut warnings = parsed.warnings;
            warnings.append(&mut extraction.warnings);
            extraction.warnings = warnings;
            Ok(extraction)
        }
        FileKind::DeviceJson => extract_device(&parse_device_json(data)?, country),
        FileKind::Spreadsheet => Err(ImportError::UnsupportedFormat(
            "spreadsheets are read from a file path".to_string(),
        )),
    }
}
