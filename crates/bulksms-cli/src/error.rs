use anyhow::Error;
use bulksms_config::ConfigError;
use bulksms_core::CoreError;
use bulksms_gateway::{SendRejected, TransportError};
use bulksms_import::ImportError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            };
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
        if let Some(import_err) = cause.downcast_ref::<ImportError>() {
            return import_exit_code(import_err);
        }
        if let Some(_rejected) = cause.downcast_ref::<SendRejected>() {
            return EXIT_INVALID_INPUT;
        }
        if let Some(transport_err) = cause.downcast_ref::<TransportError>() {
            return transport_exit_code(transport_err);
        }
        if let Some(_core_err) = cause.downcast_ref::<CoreError>() {
            return EXIT_INVALID_INPUT;
        }
    }
    EXIT_FAILURE
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidCountryCode(_)
        | ConfigError::InvalidCostPerSegment(_)
        | ConfigError::InvalidGatewayField { .. }
        | ConfigError::MissingApiKeyEnv(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn import_exit_code(err: &ImportError) -> u8 {
    match err {
        ImportError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => EXIT_NOT_FOUND,
        ImportError::Io(_) => EXIT_FAILURE,
        ImportError::Core(_)
        | ImportError::MissingHeaderRow
        | ImportError::MissingRequiredColumn(_)
        | ImportError::NoContactsSelected
        | ImportError::NoValidPhoneNumbers
        | ImportError::UnsupportedFormat(_)
        | ImportError::Spreadsheet(_)
        | ImportError::Parse(_) => EXIT_INVALID_INPUT,
    }
}

fn transport_exit_code(err: &TransportError) -> u8 {
    match err {
        TransportError::Decode(_) => EXIT_FAILURE,
        TransportError::Http(_) => EXIT_FAILURE,
        TransportError::Url(_) => EXIT_INVALID_INPUT,
    }
}
