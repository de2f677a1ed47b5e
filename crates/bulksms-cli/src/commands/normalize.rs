use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::resolve_country;
use anyhow::Result;
use bulksms_core::normalize_phone;
use clap::Args;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Phone numbers as typed, e.g. "0712 345 678"
    #[arg(value_name = "PHONE", required = true)]
    pub phones: Vec<String>,
    /// Calling code for numbers without one, e.g. +254
    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
struct NormalizedPhone {
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn normalize(ctx: &Context<'_>, args: NormalizeArgs) -> Result<()> {
    let country = resolve_country(ctx, args.country.as_deref())?;
    let results: Vec<NormalizedPhone> = args
        .phones
        .into_iter()
        .map(|input| match normalize_phone(&input, &country) {
            Ok(phone) => NormalizedPhone {
                input,
                phone: Some(phone),
                error: None,
            },
            Err(err) => NormalizedPhone {
                input,
                phone: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    if ctx.json {
        print_json(&results)?;
    } else {
        for result in &results {
            match (&result.phone, &result.error) {
                (Some(phone), _) => println!("{} -> {}", result.input, phone),
                (None, Some(error)) => println!("{} -> {}", result.input, error),
                (None, None) => {}
            }
        }
    }

    let invalid = results.iter().filter(|result| result.phone.is_none()).count();
    if invalid > 0 {
        return Err(invalid_input(format!(
            "{invalid} of {} phone numbers could not be normalized",
            results.len()
        )));
    }
    Ok(())
}
