//! Bounded worker pool
//!
//! Runs every job of a batch with at most `concurrency_limit` of them in
//! flight. Each job runs in its own task holding a semaphore permit; the
//! next queued job starts as soon as a permit is released.

use std::sync::Arc;

use omt_core::domain::config::{ConfigError, RunConfig};
use omt_core::domain::job::{JobDescriptor, JobRequest};
use omt_core::domain::outcome::{Outcome, OutcomeKind};
use omt_core::domain::report::RunReport;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::service::{JobRunner, ResultCollector, RunObserver};

/// Runs batches of jobs through a bounded pool
pub struct Scheduler {
    runner: Arc<dyn JobRunner>,
    observer: Arc<dyn RunObserver>,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    /// * `runner` - Executes individual jobs
    /// * `observer` - Notified as each job's outcome is recorded
    pub fn new(runner: Arc<dyn JobRunner>, observer: Arc<dyn RunObserver>) -> Self {
        Self { runner, observer }
    }

    /// Runs the whole batch and returns once every job has an outcome
    ///
    /// Rejected requests are reported without being executed. The report
    /// holds exactly one outcome per request, in completion order.
    ///
    /// # Errors
    /// An invalid `config` or an empty `jobs` list fails before any job
    /// is launched.
    pub async fn run(
        &self,
        config: RunConfig,
        jobs: Vec<JobRequest>,
    ) -> Result<RunReport, ConfigError> {
        config.validate()?;
        if jobs.is_empty() {
            return Err(ConfigError::NoJobs);
        }

        let config = Arc::new(config);
        let collector = Arc::new(ResultCollector::new());

        let mut accepted = Vec::with_capacity(jobs.len());
        for request in jobs {
            match request {
                Ok(job) => accepted.push(job),
                Err(rejected) => {
                    warn!("Rejected scan {}: {}", rejected.name, rejected.error);
                    let outcome = Outcome::rejected(&rejected);
                    collector.record(outcome.clone());
                    self.observer.job_finished(&outcome);
                }
            }
        }

        let limit = config.concurrency_limit(accepted.len());
        info!(
            "Dispatching {} job(s) across {} worker(s)",
            accepted.len(),
            limit
        );

        let semaphore = Arc::new(Semaphore::new(limit));
        let mut handles = Vec::with_capacity(accepted.len());

        for job in accepted {
            let job_id = job.id();
            let name = job.name().to_string();
            let handle = self.spawn_job_task(
                job,
                Arc::clone(&config),
                Arc::clone(&semaphore),
                Arc::clone(&collector),
            );
            handles.push((job_id, name, handle));
        }

        for (job_id, name, handle) in handles {
            if let Err(e) = handle.await {
                warn!("Worker task for {} panicked: {}", name, e);

                // The panic may have happened after the outcome was recorded
                if !collector.contains(job_id) {
                    let outcome = Outcome::new(
                        job_id,
                        name,
                        OutcomeKind::Exception {
                            error: format!("Worker task failed: {}", e),
                        },
                    );
                    collector.record(outcome);
                }
            }
        }

        let report = collector.finish();
        let counts = report.counts();
        info!(
            "Batch finished: {} succeeded, {} failed",
            counts.succeeded,
            counts.failed()
        );
        Ok(report)
    }

    /// Spawns a task that waits for a pool slot, runs one job, and records its outcome
    fn spawn_job_task(
        &self,
        job: JobDescriptor,
        config: Arc<RunConfig>,
        semaphore: Arc<Semaphore>,
        collector: Arc<ResultCollector>,
    ) -> JoinHandle<()> {
        let runner = Arc::clone(&self.runner);
        let observer = Arc::clone(&self.observer);

        tokio::spawn(async move {
            let outcome = match semaphore.acquire_owned().await {
                Ok(permit) => {
                    debug!("Worker slot acquired for {}", job.name());
                    let outcome = Self::run_isolated(runner, job, config).await;
                    // Permit is released here, letting the next queued job start
                    drop(permit);
                    outcome
                }
                Err(e) => Outcome::exception(&job, format!("Worker pool closed: {}", e)),
            };

            collector.record(outcome.clone());
            observer.job_finished(&outcome);
        })
    }

    /// Runs a job in its own task so a panicking runner becomes an outcome
    async fn run_isolated(
        runner: Arc<dyn JobRunner>,
        job: JobDescriptor,
        config: Arc<RunConfig>,
    ) -> Outcome {
        let fallback = job.clone();
        let handle = tokio::spawn(async move { runner.run(&job, &config).await });

        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Job {} aborted: {}", fallback.name(), e);
                Outcome::exception(&fallback, format!("Job execution failed: {}", e))
            }
        }
    }
}
