//! Outcome domain types

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::job::{JobDescriptor, RejectedJob};

/// Terminal classification of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
    Timeout,
    Exception,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Success => "success",
            OutcomeStatus::Error => "error",
            OutcomeStatus::Timeout => "timeout",
            OutcomeStatus::Exception => "exception",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status plus the payload that goes with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeKind {
    /// Tool exited 0; `output` is the per-job output stem passed to `-oA`
    Success { output: PathBuf },
    /// Tool exited non-zero; stderr kept verbatim
    Error { stderr: String },
    /// Deadline expired and the tool was killed
    Timeout { error: String },
    /// Anything else: rejected entry, spawn failure, I/O fault
    Exception { error: String },
}

/// Result of one job
///
/// Produced exactly once per submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub job_id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub kind: OutcomeKind,
    pub finished_at: DateTime<Utc>,
}

impl Outcome {
    pub fn new(job_id: Uuid, name: impl Into<String>, kind: OutcomeKind) -> Self {
        Self {
            job_id,
            name: name.into(),
            kind,
            finished_at: Utc::now(),
        }
    }

    pub fn success(job: &JobDescriptor, output: impl Into<PathBuf>) -> Self {
        Self::new(
            job.id(),
            job.name(),
            OutcomeKind::Success {
                output: output.into(),
            },
        )
    }

    pub fn error(job: &JobDescriptor, stderr: impl Into<String>) -> Self {
        Self::new(
            job.id(),
            job.name(),
            OutcomeKind::Error {
                stderr: stderr.into(),
            },
        )
    }

    pub fn timeout(job: &JobDescriptor, limit_secs: u64) -> Self {
        Self::new(
            job.id(),
            job.name(),
            OutcomeKind::Timeout {
                error: format!("Scan exceeded {}s", limit_secs),
            },
        )
    }

    pub fn exception(job: &JobDescriptor, error: impl Into<String>) -> Self {
        Self::new(
            job.id(),
            job.name(),
            OutcomeKind::Exception {
                error: error.into(),
            },
        )
    }

    /// Outcome for an entry that never became a job
    ///
    /// Gets a fresh id since no descriptor exists.
    pub fn rejected(rejected: &RejectedJob) -> Self {
        Self::new(
            Uuid::new_v4(),
            rejected.name.clone(),
            OutcomeKind::Exception {
                error: rejected.error.to_string(),
            },
        )
    }

    pub fn status(&self) -> OutcomeStatus {
        match self.kind {
            OutcomeKind::Success { .. } => OutcomeStatus::Success,
            OutcomeKind::Error { .. } => OutcomeStatus::Error,
            OutcomeKind::Timeout { .. } => OutcomeStatus::Timeout,
            OutcomeKind::Exception { .. } => OutcomeStatus::Exception,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == OutcomeStatus::Success
    }

    /// Human-readable failure detail, `None` on success
    pub fn detail(&self) -> Option<&str> {
        match &self.kind {
            OutcomeKind::Success { .. } => None,
            OutcomeKind::Error { stderr } => Some(stderr),
            OutcomeKind::Timeout { error } | OutcomeKind::Exception { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::JobError;

    fn job(name: &str) -> JobDescriptor {
        JobDescriptor::new(Some(name.to_string()), Some("10.0.0.1".to_string()), Some(30)).unwrap()
    }

    #[test]
    fn test_timeout_message_names_limit() {
        let outcome = Outcome::timeout(&job("web"), 30);
        assert_eq!(outcome.status(), OutcomeStatus::Timeout);
        assert_eq!(outcome.detail(), Some("Scan exceeded 30s"));
    }

    #[test]
    fn test_rejected_outcome_is_exception() {
        let rejected = RejectedJob::new(Some("db".to_string()), JobError::MissingTarget);
        let outcome = Outcome::rejected(&rejected);
        assert_eq!(outcome.name, "db");
        assert_eq!(outcome.status(), OutcomeStatus::Exception);
        assert_eq!(outcome.detail(), Some("Scan entry missing 'target' field"));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = Outcome::success(&job("web"), "/out/web_20260101_120000");
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["name"], "web");
        assert_eq!(value["status"], "success");
        assert_eq!(value["output"], "/out/web_20260101_120000");

        let outcome = Outcome::error(&job("web"), "boom\n");
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["stderr"], "boom\n");
    }
}
