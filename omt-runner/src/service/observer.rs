//! Run observer
//!
//! Receives live status while a batch executes. Every method has a no-op
//! default so implementations only override what they render.

use omt_core::domain::job::JobDescriptor;
use omt_core::domain::outcome::Outcome;
use tracing::{info, warn};

use crate::process::ScanCommand;

/// Sink for live job status
///
/// Methods are called from worker tasks concurrently and must not block.
/// They return nothing: a failing observer cannot affect a job's outcome.
pub trait RunObserver: Send + Sync {
    /// A job acquired a worker slot and its process is about to start
    fn job_started(&self, _job: &JobDescriptor, _command: &ScanCommand) {}

    /// The job's tool printed a progress line
    fn progress(&self, _job: &JobDescriptor, _line: &str) {}

    /// The job's outcome has been recorded
    fn job_finished(&self, _outcome: &Outcome) {}
}

/// Observer that forwards everything to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn job_started(&self, job: &JobDescriptor, command: &ScanCommand) {
        info!("Starting scan: {}", job.name());
        info!("Command: {}", command);
    }

    fn progress(&self, job: &JobDescriptor, line: &str) {
        info!("[{}] {}", job.name(), line);
    }

    fn job_finished(&self, outcome: &Outcome) {
        match outcome.detail() {
            None => info!("{} completed", outcome.name),
            Some(detail) => warn!("{} failed ({}): {}", outcome.name, outcome.status(), detail.trim()),
        }
    }
}
