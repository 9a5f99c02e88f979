//! Job domain types

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

/// Name given to a job whose scan entry does not provide one
pub const DEFAULT_JOB_NAME: &str = "scan";

/// Reasons a scan entry cannot become a job
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    /// The entry has no target, or only whitespace
    #[error("Scan entry missing 'target' field")]
    MissingTarget,

    /// A timeout of zero seconds was requested
    #[error("Scan timeout must be a positive number of seconds")]
    ZeroTimeout,

    /// The name would place output files outside the output directory
    #[error("Scan name '{0}' must not contain path separators")]
    InvalidName(String),
}

/// One unit of work: a single scan of a single target
///
/// Immutable once constructed. The only way to build one is through
/// [`JobDescriptor::new`], so a descriptor always has a non-empty target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    id: Uuid,
    name: String,
    target: String,
    timeout_secs: Option<u64>,
}

impl JobDescriptor {
    /// Creates a new job descriptor
    ///
    /// # Arguments
    /// * `name` - Label used for output files and reporting, defaults to [`DEFAULT_JOB_NAME`]
    /// * `target` - Host, range or network handed to the scan tool
    /// * `timeout_secs` - Optional deadline; `None` waits for the tool indefinitely
    pub fn new(
        name: Option<String>,
        target: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, JobError> {
        let target = target
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(JobError::MissingTarget)?;

        if timeout_secs == Some(0) {
            return Err(JobError::ZeroTimeout);
        }

        let name = resolve_name(name);
        if name.contains(['/', '\\']) || name == ".." {
            return Err(JobError::InvalidName(name));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            target,
            timeout_secs,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn timeout_secs(&self) -> Option<u64> {
        self.timeout_secs
    }

    /// The enforced deadline, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// A scan entry that was refused before reaching the scheduler's workers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedJob {
    pub name: String,
    pub error: JobError,
}

impl RejectedJob {
    pub fn new(name: Option<String>, error: JobError) -> Self {
        Self {
            name: resolve_name(name),
            error,
        }
    }
}

/// What the scheduler is handed for each scan entry
pub type JobRequest = Result<JobDescriptor, RejectedJob>;

fn resolve_name(name: Option<String>) -> String {
    name.map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_JOB_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_defaults_name() {
        let job = JobDescriptor::new(None, Some("10.0.0.1".to_string()), None).unwrap();
        assert_eq!(job.name(), DEFAULT_JOB_NAME);
        assert_eq!(job.target(), "10.0.0.1");
        assert_eq!(job.timeout(), None);
    }

    #[test]
    fn test_new_job_requires_target() {
        assert_eq!(
            JobDescriptor::new(Some("web".to_string()), None, None),
            Err(JobError::MissingTarget)
        );
        assert_eq!(
            JobDescriptor::new(Some("web".to_string()), Some("   ".to_string()), None),
            Err(JobError::MissingTarget)
        );
    }

    #[test]
    fn test_new_job_rejects_zero_timeout() {
        let result = JobDescriptor::new(None, Some("10.0.0.1".to_string()), Some(0));
        assert_eq!(result, Err(JobError::ZeroTimeout));
    }

    #[test]
    fn test_new_job_rejects_path_like_name() {
        let result = JobDescriptor::new(Some("../etc".into()), Some("10.0.0.1".into()), None);
        assert_eq!(result, Err(JobError::InvalidName("../etc".to_string())));
    }

    #[test]
    fn test_jobs_with_same_name_get_distinct_ids() {
        let a = JobDescriptor::new(Some("web".into()), Some("a".into()), Some(5)).unwrap();
        let b = JobDescriptor::new(Some("web".into()), Some("b".into()), Some(5)).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_rejected_job_defaults_name() {
        let rejected = RejectedJob::new(Some(String::new()), JobError::MissingTarget);
        assert_eq!(rejected.name, DEFAULT_JOB_NAME);
    }
}
