//! Scheduler layer for the runner
//!
//! Drives a batch of jobs through a bounded worker pool and gathers
//! every outcome into one report.

pub mod pool;

pub use pool::Scheduler;
