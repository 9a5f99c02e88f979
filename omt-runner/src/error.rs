//! Error types for the runner
//!
//! None of these reach the scheduler: the process runner turns each one
//! into an `exception` outcome for the job that hit it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while executing a single job
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The tool could not be started (missing binary, permissions, ...)
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A pipe requested at spawn time was not available
    #[error("Failed to capture {0} of the scan process")]
    MissingPipe(&'static str),

    /// Reading output or waiting for exit failed
    #[error("I/O error while running scan: {0}")]
    Io(#[from] io::Error),

    /// The deadline passed and the process could not be killed
    #[error("Failed to terminate scan after {timeout_secs}s: {source}")]
    Terminate {
        timeout_secs: u64,
        #[source]
        source: io::Error,
    },

    /// The scan succeeded but its XML result could not be published
    #[error("Failed to copy {} to latest: {source}", path.display())]
    LatestCopy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
