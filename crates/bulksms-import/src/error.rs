use bulksms_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("file must contain at least a header row and one data row")]
    MissingHeaderRow,
    #[error("could not find a {0} column; expected headers such as \"Name\" and \"Phone\"")]
    MissingRequiredColumn(&'static str),
    #[error("no contacts selected")]
    NoContactsSelected,
    #[error("no valid phone numbers found in selected contacts")]
    NoValidPhoneNumbers,
    #[error("unsupported contact file: {0}")]
    UnsupportedFormat(String),
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
