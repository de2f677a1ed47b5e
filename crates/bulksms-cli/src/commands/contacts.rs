use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{resolve_country, today};
use anyhow::{Context as _, Result};
use bulksms_core::{known_country, merge_contacts, Contact, CountryCode, StatusSummaryDto};
use bulksms_import::{load_contacts, report::write_report, Extraction, FileKind};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct ContactFilesArgs {
    /// Contact files (.csv, .txt, .tsv, .xlsx, .xls, .vcf, .vcard or device .json)
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
    /// Calling code for numbers without one, e.g. +254
    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub source: ContactFilesArgs,
    /// Write the contact list as a report CSV (file or directory)
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Contacts merged across every input file.
#[derive(Debug, Default, Serialize)]
pub struct LoadedContacts {
    pub contacts: Vec<Contact>,
    pub warnings: Vec<String>,
    pub skipped: usize,
    pub duplicates: usize,
}

#[derive(Debug, Serialize)]
struct ImportOutput<'a> {
    country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_name: Option<&'static str>,
    summary: StatusSummaryDto,
    #[serde(flatten)]
    loaded: &'a LoadedContacts,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<String>,
}

pub fn load_contact_files(files: &[PathBuf], country: &CountryCode) -> Result<LoadedContacts> {
    let mut loaded = LoadedContacts::default();
    for path in files {
        let extraction = load_file(path, country)?;
        if extraction.contacts.is_empty() {
            return Err(invalid_input(format!(
                "no valid contacts found in {}",
                path.display()
            )));
        }
        debug!(
            path = %path.display(),
            kind = FileKind::from_path(path).map(FileKind::label).unwrap_or("unknown"),
            contacts = extraction.contacts.len(),
            skipped = extraction.skipped,
            "loaded contact file"
        );
        let before = loaded.contacts.len() + extraction.contacts.len();
        loaded.contacts = merge_contacts(std::mem::take(&mut loaded.contacts), extraction.contacts);
        loaded.duplicates += extraction.duplicates + (before - loaded.contacts.len());
        loaded.skipped += extraction.skipped;
        loaded.warnings.extend(
            extraction
                .warnings
                .into_iter()
                .map(|warning| format!("{}: {warning}", path.display())),
        );
    }
    Ok(loaded)
}

fn load_file(path: &Path, country: &CountryCode) -> Result<Extraction> {
    if !path.exists() {
        return Err(not_found(format!("contact file {}", path.display())));
    }
    load_contacts(path, country).with_context(|| format!("import {}", path.display()))
}

pub fn log_warnings(loaded: &LoadedContacts) {
    for warning in &loaded.warnings {
        warn!("{warning}");
    }
}

pub fn import(ctx: &Context<'_>, args: ImportArgs) -> Result<()> {
    let country = resolve_country(ctx, args.source.country.as_deref())?;
    let loaded = load_contact_files(&args.source.files, &country)?;
    log_warnings(&loaded);

    let report = match args.report.as_deref() {
        Some(target) => Some(
            write_report(target, today(), &loaded.contacts)
                .with_context(|| format!("write report {}", target.display()))?,
        ),
        None => None,
    };

    if ctx.json {
        let output = ImportOutput {
            country: country.to_string(),
            country_name: known_country(&country).map(|known| known.name),
            summary: StatusSummaryDto::from_contacts(&loaded.contacts),
            loaded: &loaded,
            report: report.as_ref().map(|path| path.display().to_string()),
        };
        return print_json(&output);
    }

    for contact in &loaded.contacts {
        let name = if contact.name.is_empty() {
            "-"
        } else {
            contact.name.as_str()
        };
        println!("{}  {}  ({})", contact.phone, name, contact.original_phone);
    }
    let country_label = match known_country(&country) {
        Some(known) => format!("{} ({})", known.code, known.name),
        None => country.to_string(),
    };
    println!(
        "{} contacts for {}, {} skipped, {} duplicates",
        loaded.contacts.len(),
        country_label,
        loaded.skipped,
        loaded.duplicates
    );
    if let Some(path) = report {
        println!("report written to {}", path.display());
    }
    Ok(())
}
