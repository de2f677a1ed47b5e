use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid phone format: {0}")]
    InvalidPhoneFormat(String),
    #[error("invalid country code: {0}")]
    InvalidCountryCode(String),
    #[error("gateway config invalid: {0} is required")]
    GatewayConfigInvalid(&'static str),
}
