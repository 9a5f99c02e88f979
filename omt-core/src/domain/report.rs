//! Run report types

use serde::{Deserialize, Serialize};

use super::outcome::{Outcome, OutcomeStatus};

/// Tally of outcomes by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub total: usize,
    pub succeeded: usize,
    pub errored: usize,
    pub timed_out: usize,
    pub exceptions: usize,
}

impl RunCounts {
    /// Everything that did not succeed
    pub fn failed(&self) -> usize {
        self.errored + self.timed_out + self.exceptions
    }
}

/// Every outcome of one batch, in completion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn counts(&self) -> RunCounts {
        let mut counts = RunCounts {
            total: self.outcomes.len(),
            ..RunCounts::default()
        };

        for outcome in &self.outcomes {
            match outcome.status() {
                OutcomeStatus::Success => counts.succeeded += 1,
                OutcomeStatus::Error => counts.errored += 1,
                OutcomeStatus::Timeout => counts.timed_out += 1,
                OutcomeStatus::Exception => counts.exceptions += 1,
            }
        }

        counts
    }

    /// Outcomes ordered by job name, for consumers that must not depend
    /// on completion order
    pub fn sorted_by_name(&self) -> Vec<&Outcome> {
        let mut sorted: Vec<&Outcome> = self.outcomes.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
