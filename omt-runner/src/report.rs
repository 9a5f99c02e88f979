//! Summary rendering
//!
//! Turns a finished [`RunReport`] into the plain-text table printed at the
//! end of a batch.

use omt_core::domain::report::RunReport;

/// Renders one `<name>: <status>` line per outcome, in report order,
/// followed by a totals line
pub fn render_summary(report: &RunReport) -> String {
    let mut summary = String::new();

    for outcome in &report.outcomes {
        summary.push_str(&format!("{}: {}\n", outcome.name, outcome.status()));
    }

    let counts = report.counts();
    summary.push_str(&format!(
        "Total: {} job(s), {} succeeded, {} failed ({} error, {} timeout, {} exception)",
        counts.total,
        counts.succeeded,
        counts.failed(),
        counts.errored,
        counts.timed_out,
        counts.exceptions
    ));

    summary
}
