//! Scan file DTO
//!
//! The JSON document describing a batch:
//!
//! ```json
//! { "args": "-sV", "timeout": 30,
//!   "scans": [ { "name": "web", "target": "10.0.0.1" } ] }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::config::RunConfig;
use crate::domain::job::{JobDescriptor, JobRequest, RejectedJob};

/// Problems that abort a run before any job starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("No scans defined in JSON")]
    NoScans,

    #[error("No args defined in JSON")]
    MissingArgs,
}

/// One entry of the `scans` array
///
/// Every field is optional at this level; missing targets are reported
/// per entry instead of failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry {
    pub name: Option<String>,
    pub target: Option<String>,
    /// Overrides the file-level default timeout
    pub timeout: Option<u64>,
}

/// The whole scan file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFile {
    pub args: Option<String>,
    /// Default per-scan timeout in seconds
    pub timeout: Option<u64>,
    #[serde(default)]
    pub scans: Vec<ScanEntry>,
}

/// A validated batch ready for the scheduler
#[derive(Debug)]
pub struct RunPlan {
    pub config: RunConfig,
    pub jobs: Vec<JobRequest>,
}

impl RunPlan {
    pub fn rejected(&self) -> impl Iterator<Item = &RejectedJob> {
        self.jobs.iter().filter_map(|job| job.as_ref().err())
    }
}

impl ScanFile {
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    /// Checks the file-level preconditions
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.scans.is_empty() {
            return Err(PlanError::NoScans);
        }

        match &self.args {
            Some(args) if !args.trim().is_empty() => Ok(()),
            _ => Err(PlanError::MissingArgs),
        }
    }

    /// Turns the file into a run plan writing under `output_dir`
    ///
    /// File-level problems are fatal; entry-level problems become
    /// [`RejectedJob`]s so the rest of the batch still runs.
    pub fn into_plan(self, output_dir: impl Into<PathBuf>) -> Result<RunPlan, PlanError> {
        self.validate()?;

        let default_timeout = self.timeout;
        let args = self.args.unwrap_or_default();

        let jobs = self
            .scans
            .into_iter()
            .map(|entry| {
                let timeout = entry.timeout.or(default_timeout);
                JobDescriptor::new(entry.name.clone(), entry.target, timeout)
                    .map_err(|error| RejectedJob::new(entry.name, error))
            })
            .collect();

        Ok(RunPlan {
            config: RunConfig::new(args, output_dir),
            jobs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::JobError;

    #[test]
    fn test_parse_scan_file() {
        let file = ScanFile::from_json(
            r#"{"args": "-sV", "timeout": 30, "scans": [{"name":"web","target":"10.0.0.1"}]}"#,
        )
        .unwrap();

        assert_eq!(file.args.as_deref(), Some("-sV"));
        assert_eq!(file.timeout, Some(30));
        assert_eq!(file.scans.len(), 1);
        assert_eq!(file.scans[0].name.as_deref(), Some("web"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let file = ScanFile::from_json(
            r#"{"args": "-sn", "comment": "lab", "scans": [{"target":"10.0.0.0/24","owner":"x"}]}"#,
        )
        .unwrap();
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_validate_preconditions() {
        let file = ScanFile::from_json(r#"{"args": "-sV"}"#).unwrap();
        assert_eq!(file.validate(), Err(PlanError::NoScans));

        let file = ScanFile::from_json(r#"{"scans": [{"target":"10.0.0.1"}]}"#).unwrap();
        assert_eq!(file.validate(), Err(PlanError::MissingArgs));

        let file = ScanFile::from_json(r#"{"args": "  ", "scans": [{"target":"10.0.0.1"}]}"#).unwrap();
        assert_eq!(file.validate(), Err(PlanError::MissingArgs));
    }

    #[test]
    fn test_plan_applies_default_and_override_timeouts() {
        let file = ScanFile::from_json(
            r#"{"args": "-sV", "timeout": 30, "scans": [
                {"name":"web","target":"10.0.0.1"},
                {"name":"db","target":"10.0.0.2","timeout":90}
            ]}"#,
        )
        .unwrap();

        let plan = file.into_plan("/tmp/out").unwrap();
        assert_eq!(plan.config.args, "-sV");
        assert_eq!(plan.config.output_dir, PathBuf::from("/tmp/out"));

        let jobs: Vec<&JobDescriptor> = plan.jobs.iter().map(|j| j.as_ref().unwrap()).collect();
        assert_eq!(jobs[0].timeout_secs(), Some(30));
        assert_eq!(jobs[1].timeout_secs(), Some(90));
    }

    #[test]
    fn test_plan_without_timeout_is_unbounded() {
        let file = ScanFile::from_json(r#"{"args": "-sV", "scans": [{"target":"10.0.0.1"}]}"#)
            .unwrap();
        let plan = file.into_plan("/tmp/out").unwrap();
        let job = plan.jobs[0].as_ref().unwrap();
        assert_eq!(job.timeout_secs(), None);
        assert_eq!(job.name(), "scan");
    }

    #[test]
    fn test_plan_rejects_entry_without_target() {
        let file = ScanFile::from_json(
            r#"{"args": "-sV", "scans": [{"name":"web","target":"10.0.0.1"},{"name":"broken"}]}"#,
        )
        .unwrap();

        let plan = file.into_plan("/tmp/out").unwrap();
        assert_eq!(plan.jobs.len(), 2);

        let rejected: Vec<&RejectedJob> = plan.rejected().collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].name, "broken");
        assert_eq!(rejected[0].error, JobError::MissingTarget);
    }
}
