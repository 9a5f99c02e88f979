//! Result collector
//!
//! Accumulates outcomes from concurrently running workers into one list.
//! This is the only mutable state workers share.

use std::sync::{Mutex, MutexGuard, PoisonError};

use omt_core::domain::outcome::Outcome;
use omt_core::domain::report::RunReport;
use uuid::Uuid;

/// Thread-safe, append-only outcome list
///
/// Outcomes keep their arrival order.
#[derive(Debug, Default)]
pub struct ResultCollector {
    outcomes: Mutex<Vec<Outcome>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one outcome; safe to call from any number of tasks
    pub fn record(&self, outcome: Outcome) {
        self.lock().push(outcome);
    }

    /// Whether an outcome for `job_id` has been recorded
    pub fn contains(&self, job_id: Uuid) -> bool {
        self.lock().iter().any(|o| o.job_id == job_id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drains everything recorded so far into a report
    ///
    /// Call once all workers have finished.
    pub fn finish(&self) -> RunReport {
        RunReport::new(self.lock().drain(..).collect())
    }

    // A worker that panicked mid-push cannot leave a torn Vec behind, so a
    // poisoned lock still guards valid data.
    fn lock(&self) -> MutexGuard<'_, Vec<Outcome>> {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
