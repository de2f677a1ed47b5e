pub mod csv;
pub mod device;
pub mod error;
pub mod report;
pub mod source;
pub mod spreadsheet;
pub mod tabular;
pub mod vcf;

pub use device::{extract_device, parse_device_json, DeviceContact};
pub use error::{ImportError, Result};
pub use source::{load_contacts, FileKind};
pub use tabular::{extract, Extraction};
