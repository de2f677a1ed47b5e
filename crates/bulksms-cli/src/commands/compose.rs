use crate::commands::{print_json, Context};
use crate::util::{format_cost, read_message};
use anyhow::Result;
use bulksms_core::MessageStatsDto;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MessageArgs {
    /// Message text
    #[arg(long, short, conflicts_with = "message_file")]
    pub message: Option<String>,
    /// Read the message text from a file
    #[arg(long, value_name = "PATH")]
    pub message_file: Option<PathBuf>,
}

impl MessageArgs {
    pub fn read(self) -> Result<String> {
        read_message(self.message, self.message_file)
    }
}

#[derive(Debug, Args)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub message: MessageArgs,
    /// Number of recipients used for the cost estimate
    #[arg(long, default_value_t = 1)]
    pub recipients: usize,
}

pub fn compose(ctx: &Context<'_>, args: ComposeArgs) -> Result<()> {
    let message = args.message.read()?;
    let stats = MessageStatsDto::compute(&message, args.recipients, ctx.config.cost_per_segment);

    if ctx.json {
        return print_json(&stats);
    }

    println!("characters: {}", stats.characters);
    println!("pages: {}", stats.pages);
    println!("recipients: {}", stats.recipients);
    println!("estimated cost: {}", format_cost(stats.estimated_cost));
    Ok(())
}
