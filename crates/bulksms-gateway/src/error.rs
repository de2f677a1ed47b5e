use bulksms_core::CoreError;
use thiserror::Error;

/// Preconditions that stop a send before any network activity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendRejected {
    #[error("message is empty")]
    EmptyMessage,
    #[error("no recipients to send to")]
    NoRecipients,
    #[error(transparent)]
    InvalidConfig(#[from] CoreError),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid gateway response: {0}")]
    Decode(String),
    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "http")]
    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, TransportError>;
