//! Run configuration
//!
//! The read-only context shared by every job of one batch.

use std::path::PathBuf;

use thiserror::Error;

/// Upper bound on concurrently running scans unless overridden
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("No args defined for the scan tool")]
    MissingArgs,

    #[error("max_concurrency must be greater than 0")]
    ZeroConcurrency,

    #[error("No scans to run")]
    NoJobs,
}

/// Shared context for one batch run
///
/// Handed to every worker behind an `Arc` and never mutated after
/// construction, so no locking is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Flag string passed to the tool for every job, split on whitespace
    pub args: String,

    /// Directory receiving every job's output files; must already exist
    pub output_dir: PathBuf,

    /// Ceiling on the worker pool size
    pub max_concurrency: usize,
}

impl RunConfig {
    /// Creates a configuration with the default concurrency ceiling
    pub fn new(args: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            args: args.into(),
            output_dir: output_dir.into(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Overrides the concurrency ceiling
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// The shared argument string as discrete argv tokens
    pub fn arg_tokens(&self) -> impl Iterator<Item = &str> {
        self.args.split_whitespace()
    }

    /// Number of worker slots for a batch of `job_count` jobs
    ///
    /// Never more slots than there is work.
    pub fn concurrency_limit(&self, job_count: usize) -> usize {
        self.max_concurrency.min(job_count)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.args.trim().is_empty() {
            return Err(ConfigError::MissingArgs);
        }

        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        Ok(())
    }
}
