mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{compose, completions, contacts, countries, normalize, send, Context};
use crate::error::{exit_code_for, report_error};
use bulksms_config as config;

#[derive(Debug, Parser)]
#[command(name = "bulksms", version, about = "bulksms CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the canonical form of phone numbers
    Normalize(normalize::NormalizeArgs),
    /// Load contact files and print the deduplicated contact list
    Import(contacts::ImportArgs),
    /// Show length, segment count and estimated cost of a message
    Compose(compose::ComposeArgs),
    /// Send a message to every contact in the given files
    Send(send::SendArgs),
    /// List known country calling codes
    Countries,
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        Command::Normalize(args) => with_config(config_path, json, verbose, |ctx| {
            normalize::normalize(ctx, args)
        }),
        Command::Import(args) => {
            with_config(config_path, json, verbose, |ctx| contacts::import(ctx, args))
        }
        Command::Compose(args) => {
            with_config(config_path, json, verbose, |ctx| compose::compose(ctx, args))
        }
        Command::Send(args) => {
            with_config(config_path, json, verbose, |ctx| send::send(ctx, args))
        }
        Command::Countries => with_config(config_path, json, verbose, countries::list_countries),
    }
}

/// Loads the config and hands the command its context.
fn with_config<F>(
    config_path: Option<PathBuf>,
    json: bool,
    verbose: bool,
    command: F,
) -> Result<()>
where
    F: FnOnce(&Context<'_>) -> Result<()>,
{
    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let ctx = Context {
        json,
        config: &app_config,
    };
    command(&ctx)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
