//! OMT CLI
//!
//! Runs a batch of nmap scans described by a JSON file, a bounded number
//! at a time, and prints a per-scan summary.

mod commands;
mod config;
mod console;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "omt")]
#[command(about = "Old Man Touchy: run multiple Nmap scans from a JSON config", long_about = None)]
#[command(after_help = "Example: omt run teams_short.json ./results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so they never interleave with the scan table
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "omt_cli=info,omt_runner=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    handle_command(cli.command).await
}
