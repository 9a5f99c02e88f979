//! Run command handler
//!
//! Loads the scan file, executes every scan under the worker pool and
//! prints the summary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use omt_core::domain::config::DEFAULT_MAX_CONCURRENCY;
use omt_runner::config::DEFAULT_TOOL;
use omt_runner::{ProcessRunner, RunObserver, RunnerConfig, Scheduler};
use tracing::info;

use crate::config::{load_scan_file, prepare_output_dir};
use crate::console::{ConsoleObserver, announce, print_summary};

/// Arguments for `omt run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// JSON file describing the scans
    pub input_file: PathBuf,

    /// Directory receiving the scan output files
    pub output_dir: PathBuf,

    /// Scan tool to launch
    #[arg(long, env = "OMT_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Maximum number of scans running at once
    #[arg(long, env = "OMT_MAX_WORKERS", default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_workers: usize,

    /// Also write every outcome as JSON to this file
    #[arg(long)]
    pub json_report: Option<PathBuf>,
}

/// Handle the run command
///
/// Configuration problems abort before any scan starts. Once scheduling
/// begins, individual scan failures only show up in the summary.
pub async fn handle_run(args: RunArgs) -> Result<()> {
    let scan_file = load_scan_file(&args.input_file)?;
    prepare_output_dir(&args.output_dir)?;

    let mut plan = scan_file
        .into_plan(&args.output_dir)
        .context("Invalid scan file")?;
    plan.config = plan.config.with_max_concurrency(args.max_workers);
    plan.config.validate().context("Invalid run configuration")?;

    let runner_config = RunnerConfig::new(args.tool);
    runner_config
        .validate()
        .context("Invalid runner configuration")?;

    announce(format!(
        "{} Loaded {} scans",
        "[+]".green(),
        plan.jobs.len().to_string().bold()
    ));
    let skipped = plan.rejected().count();
    if skipped > 0 {
        announce(format!(
            "{} {} scan(s) will be skipped for invalid entries",
            "[!]".yellow(),
            skipped
        ));
    }
    announce(format!(
        "{} Output directory: {}",
        "[+]".green(),
        args.output_dir.display()
    ));
    info!(
        "Running with {} worker(s) using {}",
        plan.config.max_concurrency, runner_config.tool
    );

    let observer: Arc<dyn RunObserver> = Arc::new(ConsoleObserver::new());
    let runner = Arc::new(ProcessRunner::new(runner_config, observer.clone()));
    let scheduler = Scheduler::new(runner, observer);

    let report = scheduler
        .run(plan.config, plan.jobs)
        .await
        .context("Invalid run configuration")?;

    print_summary(&report);

    if let Some(path) = &args.json_report {
        let json = report.to_json().context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        announce(format!("{} Report written to {}", "[+]".green(), path.display()));
    }

    announce("[+] All scans finished".green().bold());
    Ok(())
}
