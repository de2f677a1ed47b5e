use crate::commands::compose::MessageArgs;
use crate::commands::contacts::{load_contact_files, log_warnings, ContactFilesArgs};
use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{format_cost, resolve_country, today};
use anyhow::{Context as _, Result};
use bulksms_core::domain::gateway::{SANDBOX_SENDER_ID, SANDBOX_USERNAME};
use bulksms_core::{ContactStatus, GatewayConfig, GatewayMode, MessageStatsDto, StatusSummaryDto};
use bulksms_gateway::{send_bulk, HttpTransport, SendReport};
use bulksms_import::report::write_report;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct SendArgs {
    #[command(flatten)]
    pub source: ContactFilesArgs,
    #[command(flatten)]
    pub message: MessageArgs,
    /// Use the gateway sandbox with its default credentials
    #[arg(long, conflicts_with = "live")]
    pub sandbox: bool,
    /// Use the live gateway
    #[arg(long)]
    pub live: bool,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub sender_id: Option<String>,
    /// Write the delivery report CSV (file or directory)
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SendOutput<'a> {
    sandbox: bool,
    stats: MessageStatsDto,
    status: StatusSummaryDto,
    #[serde(flatten)]
    result: &'a SendReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<String>,
}

pub fn send(ctx: &Context<'_>, args: SendArgs) -> Result<()> {
    let message = args.message.read()?;
    let country = resolve_country(ctx, args.source.country.as_deref())?;
    let gateway = gateway_config(
        &ctx.config.gateway,
        args.sandbox,
        args.live,
        args.username,
        args.sender_id,
    );

    let loaded = load_contact_files(&args.source.files, &country)?;
    log_warnings(&loaded);
    let stats = MessageStatsDto::compute(
        &message,
        loaded.contacts.len(),
        ctx.config.cost_per_segment,
    );

    let transport = HttpTransport::from_config(&gateway).context("build gateway client")?;
    info!(
        endpoint = %transport.endpoint(),
        recipients = loaded.contacts.len(),
        pages = stats.pages,
        "sending"
    );
    let result = send_bulk(&transport, &message, &loaded.contacts, &gateway)
        .map_err(|err| invalid_input(err.to_string()))?;

    let report = match args.report.as_deref() {
        Some(target) => Some(
            write_report(target, today(), &result.contacts)
                .with_context(|| format!("write report {}", target.display()))?,
        ),
        None => None,
    };
    let status = StatusSummaryDto::from_contacts(&result.contacts);

    if ctx.json {
        let output = SendOutput {
            sandbox: gateway.mode.is_sandbox(),
            stats,
            status,
            result: &result,
            report: report.as_ref().map(|path| path.display().to_string()),
        };
        return print_json(&output);
    }

    if let Some(error) = &result.transport_error {
        println!("gateway request failed: {error}");
    } else if let Some(summary) = &result.summary {
        println!("{summary}");
    }
    for contact in &result.contacts {
        if contact.status == ContactStatus::Failed && result.transport_error.is_none() {
            println!(
                "failed {}: {}",
                contact.phone,
                contact.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
    println!(
        "{} sent, {} failed, {} pending of {} (estimated cost {})",
        status.sent,
        status.failed,
        status.pending,
        status.total,
        format_cost(stats.estimated_cost)
    );
    if let Some(path) = report {
        println!("report written to {}", path.display());
    }
    Ok(())
}

/// Applies command-line overrides on top of the configured gateway.
///
/// Switching to the sandbox resets the credentials to the sandbox defaults
/// unless they are given explicitly.
fn gateway_config(
    base: &GatewayConfig,
    sandbox: bool,
    live: bool,
    username: Option<String>,
    sender_id: Option<String>,
) -> GatewayConfig {
    let mut gateway = base.clone();
    if sandbox {
        gateway.mode = GatewayMode::Sandbox;
        gateway.username = SANDBOX_USERNAME.to_string();
        gateway.sender_id = SANDBOX_SENDER_ID.to_string();
    } else if live {
        gateway.mode = GatewayMode::Live;
    }
    if let Some(username) = username {
        gateway.username = username;
    }
    if let Some(sender_id) = sender_id {
        gateway.sender_id = sender_id;
    }
    gateway
}
