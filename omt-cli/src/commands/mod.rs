//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod plan;
mod run;

use anyhow::Result;
use clap::Subcommand;
use plan::PlanArgs;
use run::RunArgs;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run every scan in the config file
    Run(RunArgs),
    /// Show the command each scan would run, without running anything
    Plan(PlanArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run::handle_run(args).await,
        Commands::Plan(args) => plan::handle_plan(args),
    }
}
