//! Execution service
//!
//! Runs one scan job end to end:
//! - Reserving the output stem and building the tool's argv
//! - Spawning the tool and streaming its output
//! - Enforcing the job's deadline
//! - Classifying the exit and publishing the latest XML copy
//!
//! Every path ends in an Outcome; nothing escapes as an error.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use omt_core::domain::config::RunConfig;
use omt_core::domain::job::JobDescriptor;
use omt_core::domain::outcome::Outcome;
use tracing::{debug, error, warn};

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::output::{self, OutputNamer};
use crate::process::{self, ScanCommand};
use crate::service::observer::RunObserver;

/// Service trait for running a single job
#[async_trait]
pub trait JobRunner: Send + Sync {
    /// Runs `job` to completion or forced termination
    ///
    /// # Arguments
    /// * `job` - The job to execute
    /// * `config` - Shared, read-only run configuration
    ///
    /// # Returns
    /// The job's outcome. Implementations must not panic or fail; every
    /// problem is reported through the outcome.
    async fn run(&self, job: &JobDescriptor, config: &RunConfig) -> Outcome;
}

/// Runs jobs as external scan tool processes
pub struct ProcessRunner {
    config: RunnerConfig,
    namer: OutputNamer,
    observer: Arc<dyn RunObserver>,
}

impl ProcessRunner {
    /// Creates a new process runner
    ///
    /// # Arguments
    /// * `config` - Tool and progress-line settings
    /// * `observer` - Receives start notifications and progress lines
    pub fn new(config: RunnerConfig, observer: Arc<dyn RunObserver>) -> Self {
        Self {
            config,
            namer: OutputNamer::new(),
            observer,
        }
    }

    async fn execute(&self, job: &JobDescriptor, run: &RunConfig) -> Result<Outcome, RunnerError> {
        let stem = self.namer.reserve(job.name(), Local::now());
        let stem_path = run.output_dir.join(&stem);
        let command = ScanCommand::build(&self.config.tool, job, run, &stem_path);

        self.observer.job_started(job, &command);
        debug!("Launching {}: {}", job.name(), command);

        let mut child = command.spawn().map_err(|source| RunnerError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        let stdout = child
            .stdout
            .take()
            .ok_or(RunnerError::MissingPipe("stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or(RunnerError::MissingPipe("stderr"))?;

        let on_line = |line: &str| {
            if self.config.is_progress_line(line) {
                self.observer.progress(job, line);
            }
        };

        let completion = async {
            let (status, stdout, stderr) = tokio::join!(
                child.wait(),
                process::stream_lines(stdout, on_line),
                process::read_all(stderr)
            );
            Ok::<_, std::io::Error>((status?, stdout?, stderr?))
        };

        let finished = match job.timeout() {
            Some(limit) => {
                let waited = tokio::time::timeout(limit, completion).await;
                match waited {
                    Ok(result) => result,
                    Err(_) => {
                        let limit_secs = limit.as_secs();
                        warn!("{} exceeded {}s, terminating", job.name(), limit_secs);
                        process::terminate(&mut child)
                            .await
                            .map_err(|source| RunnerError::Terminate {
                                timeout_secs: limit_secs,
                                source,
                            })?;
                        return Ok(Outcome::timeout(job, limit_secs));
                    }
                }
            }
            None => completion.await,
        };

        let (status, stdout, stderr) = finished?;

        if !status.success() {
            debug!(
                "{} exited with {}; stdout was {} bytes",
                job.name(),
                status,
                stdout.len()
            );
            return Ok(Outcome::error(job, stderr));
        }

        let xml = output::xml_path(&stem_path);
        output::publish_latest(&xml, &run.output_dir, job.name(), &stem)
            .await
            .map_err(|source| RunnerError::LatestCopy {
                path: xml.clone(),
                source,
            })?;

        Ok(Outcome::success(job, stem_path))
    }
}

#[async_trait]
impl JobRunner for ProcessRunner {
    async fn run(&self, job: &JobDescriptor, config: &RunConfig) -> Outcome {
        match self.execute(job, config).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{} failed: {}", job.name(), e);
                Outcome::exception(job, e.to_string())
            }
        }
    }
}
