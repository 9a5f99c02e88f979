//! Plan command handler
//!
//! Prints the command each scan would run without launching anything.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use omt_core::dto::scan_file::RunPlan;
use omt_runner::config::DEFAULT_TOOL;
use omt_runner::process::ScanCommand;

use crate::config::load_scan_file;

/// Stands in for the launch time, which is only known once a scan starts
const TIMESTAMP_PLACEHOLDER: &str = "<timestamp>";

/// Arguments for `omt plan`
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// JSON file describing the scans
    pub input_file: PathBuf,

    /// Directory the scan output would be written to
    #[arg(default_value = ".")]
    pub output_dir: PathBuf,

    /// Scan tool that would be launched
    #[arg(long, env = "OMT_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: String,
}

/// Handle the plan command
pub fn handle_plan(args: PlanArgs) -> Result<()> {
    let plan = load_scan_file(&args.input_file)?
        .into_plan(&args.output_dir)
        .context("Invalid scan file")?;

    println!(
        "{}",
        format!("Planned {} scan(s):", plan.jobs.len()).bold()
    );
    println!();

    for line in plan_lines(&plan, &args.tool, TIMESTAMP_PLACEHOLDER) {
        println!("  {}", line);
    }

    Ok(())
}

/// One line per scan entry, in file order
///
/// Accepted jobs show their command line; rejected entries show why they
/// would be skipped.
fn plan_lines(plan: &RunPlan, tool: &str, timestamp: &str) -> Vec<String> {
    plan.jobs
        .iter()
        .map(|request| match request {
            Ok(job) => {
                let stem = output_stem(&plan.config.output_dir, job.name(), timestamp);
                let command = ScanCommand::build(tool, job, &plan.config, &stem);
                match job.timeout_secs() {
                    Some(secs) => format!("{}: {} (timeout {}s)", job.name(), command, secs),
                    None => format!("{}: {}", job.name(), command),
                }
            }
            Err(rejected) => format!("{}: skipped ({})", rejected.name, rejected.error),
        })
        .collect()
}

fn output_stem(output_dir: &Path, name: &str, timestamp: &str) -> PathBuf {
    output_dir.join(format!("{}_{}", name, timestamp))
}
