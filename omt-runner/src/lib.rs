//! OMT Runner
//!
//! Runs a batch of external scan invocations under a bounded worker pool.
//!
//! Architecture:
//! - Configuration: which tool to launch and which output lines count as progress
//! - Process: argv construction, spawning, streaming and forced termination
//! - Services: the per-job runner, the outcome collector and the observer seam
//! - Scheduler: the bounded pool driving a batch to completion
//! - Report: plain-text summary of a finished batch
//!
//! Every job yields exactly one [`Outcome`](omt_core::domain::outcome::Outcome);
//! failures are values, never errors escaping the pool.

pub mod config;
pub mod error;
pub mod output;
pub mod process;
pub mod report;
pub mod scheduler;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use scheduler::Scheduler;
pub use service::{JobRunner, ProcessRunner, ResultCollector, RunObserver, TracingObserver};
