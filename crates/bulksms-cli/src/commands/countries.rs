use crate::commands::{print_json, Context};
use anyhow::Result;
use bulksms_core::{KnownCountry, KNOWN_COUNTRIES};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CountryRow {
    #[serde(flatten)]
    country: KnownCountry,
    default: bool,
}

pub fn list_countries(ctx: &Context<'_>) -> Result<()> {
    let default_code = ctx.config.default_country.with_plus();
    let rows: Vec<CountryRow> = KNOWN_COUNTRIES
        .iter()
        .map(|country| CountryRow {
            country: *country,
            default: country.code == default_code,
        })
        .collect();

    if ctx.json {
        return print_json(&rows);
    }

    for row in rows {
        let marker = if row.default { "*" } else { " " };
        println!("{marker} {:<5} {}", row.country.code, row.country.name);
    }
    Ok(())
}
