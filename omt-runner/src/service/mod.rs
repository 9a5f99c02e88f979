//! Service layer
//!
//! Services hold the per-job logic of a batch: running one job,
//! collecting outcomes from concurrent workers, and reporting live status.
//!
//! The runner and observer are trait-based so the scheduler can be driven
//! by fakes in tests and by a console renderer in the CLI.

mod collector;
mod execution;
mod observer;

// Re-export traits
pub use execution::JobRunner;
pub use observer::RunObserver;

// Re-export implementations
pub use collector::ResultCollector;
pub use execution::ProcessRunner;
pub use observer::TracingObserver;
