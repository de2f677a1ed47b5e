use crate::commands::Context;
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use bulksms_core::CountryCode;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::PathBuf;

pub fn resolve_country(ctx: &Context<'_>, flag: Option<&str>) -> Result<CountryCode> {
    match flag {
        Some(raw) => CountryCode::parse(raw)
            .map_err(|_| invalid_input(format!("invalid country code: {raw}"))),
        None => Ok(ctx.config.default_country.clone()),
    }
}

/// Message text from `--message` or `--message-file`; a trailing newline from
/// the file is dropped.
pub fn read_message(inline: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (inline, file) {
        (Some(message), None) => Ok(message),
        (None, Some(path)) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("read message file {}", path.display()))?;
            Ok(raw
                .strip_suffix("\r\n")
                .or_else(|| raw.strip_suffix('\n'))
                .unwrap_or(&raw)
                .to_string())
        }
        (None, None) => Err(invalid_input("provide --message or --message-file")),
        (Some(_), Some(_)) => Err(invalid_input(
            "--message and --message-file are mutually exclusive",
        )),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_cost(value: f64) -> String {
    format!("{value:.2}")
}
