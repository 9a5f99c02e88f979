//! Console output
//!
//! Renders live job status and the final summary on stdout.

use std::fmt::Display;
use std::io::{self, Write};

use colored::*;
use omt_core::domain::job::JobDescriptor;
use omt_core::domain::outcome::Outcome;
use omt_core::domain::report::RunReport;
use omt_runner::RunObserver;
use omt_runner::process::ScanCommand;
use omt_runner::report::render_summary;

/// Prints job progress as it happens
///
/// Each event is one `writeln!` on a locked stdout, so lines from
/// concurrent jobs interleave but never tear. Write errors (e.g. a closed
/// pipe) are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleObserver;

impl ConsoleObserver {
    pub fn new() -> Self {
        Self
    }
}

impl RunObserver for ConsoleObserver {
    fn job_started(&self, job: &JobDescriptor, command: &ScanCommand) {
        let mut out = io::stdout().lock();
        let _ = writeln!(
            out,
            "{} Starting scan: {}\n    Command: {}",
            "[+]".green(),
            job.name().bold(),
            command
        );
    }

    fn progress(&self, job: &JobDescriptor, line: &str) {
        let _ = writeln!(io::stdout().lock(), "    [{}] {}", job.name().cyan(), line);
    }

    fn job_finished(&self, outcome: &Outcome) {
        let _ = writeln!(io::stdout().lock(), "{}", finish_line(outcome));
    }
}

/// One line describing a finished job
fn finish_line(outcome: &Outcome) -> String {
    if outcome.is_success() {
        return format!("{} {} completed", "[✓]".green(), outcome.name);
    }

    format!(
        "{} {} failed ({}): {}",
        "[✗]".red(),
        outcome.name,
        outcome.status(),
        outcome.detail().unwrap_or_default().trim()
    )
}

/// Prints one status line; a closed stdout is ignored
pub fn announce(line: impl Display) {
    let _ = writeln!(io::stdout().lock(), "{}", line);
}

/// Prints the end-of-run summary table
pub fn print_summary(report: &RunReport) {
    let _ = write_summary(&mut io::stdout().lock(), report);
}

fn write_summary(out: &mut impl Write, report: &RunReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=== Summary ===".bold())?;
    writeln!(out, "{}", render_summary(report))
}
