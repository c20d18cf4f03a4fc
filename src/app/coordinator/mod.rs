//! Download orchestration for one forecast cycle
//!
//! This module ties the pieces together: it resolves the cycle to fetch,
//! builds the link set, drops files already on disk, drives the worker pool,
//! forwards progress to a reporter and finally verifies the target directory.
//!
//! # Architecture
//!
//! - [`config`] - Run configuration and validation
//! - [`stats`] - Outcome tallies and the final session result
//! - [`progress`] - Progress reporting seam used by the CLI
//!
//! # Examples
//!
//! ```rust,no_run
//! use gfs_fetcher::app::{Coordinator, CoordinatorConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CoordinatorConfig::new("https://nomads.ncep.noaa.gov/cgi-bin/filter_gfs_0p25.pl")
//!     .with_forecast(24, 3)
//!     .with_worker_count(4);
//!
//! let coordinator = Coordinator::new(config)?;
//! let result = coordinator.run().await?;
//! println!("Downloaded {} files", result.stats.files_succeeded);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod progress;
pub mod stats;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::app::client::FetchClient;
use crate::app::cycle::resolve_cycle;
use crate::app::links::{build_links, extract_filename, forecast_hours};
use crate::app::models::{Cycle, DownloadOutcome, DownloadTask, TaskProgress};
use crate::app::verification::verify;
use crate::app::worker::FetchWorkerPool;
use crate::errors::{AppError, Result};

pub use config::CoordinatorConfig;
pub use progress::{format_progress, LogReporter, ProgressReporter};
pub use stats::{DownloadStats, SessionResult};

/// Orchestrates a single fetch-and-verify run
pub struct Coordinator {
    config: CoordinatorConfig,
    pool: FetchWorkerPool,
    reporter: Arc<dyn ProgressReporter>,
}

impl Coordinator {
    /// Create a coordinator, validating the configuration and building the
    /// shared HTTP client
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for an invalid configuration and
    /// `AppError::Download` if the HTTP client cannot be built.
    pub fn new(config: CoordinatorConfig) -> Result<Self> {
        config.validate()?;
        let client = FetchClient::new(&config.client_config)?;
        let pool = FetchWorkerPool::new(config.worker_config.clone(), client);

        Ok(Self {
            config,
            pool,
            reporter: Arc::new(LogReporter),
        })
    }

    /// Replace the default log-line reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Get the run configuration
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Fetch the cycle available at the current wall-clock time
    pub async fn run(&self) -> Result<SessionResult> {
        self.run_at(Utc::now()).await
    }

    /// Fetch the cycle available at `now`
    ///
    /// Per-file failures are reported through the outcomes and the
    /// verification report. Only failures that prevent the run as a whole
    /// (link generation, creating the target directory) are errors.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<SessionResult> {
        let session_start = Instant::now();
        let cycle = resolve_cycle(now, self.config.availability_delay_hours)?;
        info!(
            "Starting GFS download for date: {}, cycle: {}Z",
            cycle.date_iso(),
            cycle.hour.label()
        );

        let target_dir = self.config.target_dir(&cycle);
        let tasks = self.build_tasks(&cycle, &target_dir)?;
        if tasks.is_empty() {
            error!("No download links were generated.");
            return Err(AppError::generic(format!(
                "no download links generated for cycle {}",
                cycle
            )));
        }
        let expected: Vec<String> = tasks.iter().map(DownloadTask::file_name).collect();

        tokio::fs::create_dir_all(&target_dir).await?;

        let mut stats = DownloadStats {
            total_links: tasks.len(),
            ..DownloadStats::default()
        };

        let plan = FetchWorkerPool::plan(tasks).await;
        stats.files_skipped = plan.skipped.len();
        stats.files_scheduled = plan.pending.len();

        let outcomes = if plan.is_up_to_date() {
            info!("No new downloads needed. All files are up to date.");
            Vec::new()
        } else {
            info!(
                "Found {} new or incomplete files to download.",
                plan.pending.len()
            );
            let outcomes = self.execute(plan.pending).await;
            info!("Download process finished.");
            outcomes
        };

        for outcome in &outcomes {
            stats.record(outcome);
        }

        info!("--- Starting Verification ---");
        let (verification, verification_error) = match verify(&target_dir, expected).await {
            Ok(report) => {
                report.log_summary();
                (Some(report), None)
            }
            Err(e) => {
                error!("Verification could not run: {}", e);
                (None, Some(e.to_string()))
            }
        };
        info!("--- Verification Finished ---");

        let total_duration = session_start.elapsed();
        info!(
            "Session finished in {:?}: {} succeeded, {} skipped, {} warned, {} failed, {} errored",
            total_duration,
            stats.files_succeeded,
            stats.files_skipped,
            stats.files_warned,
            stats.files_failed,
            stats.files_errored
        );
        if stats.has_failures() {
            warn!(
                "{:.1}% of {} attempted downloads succeeded",
                stats.success_rate(),
                stats.total_processed()
            );
        }

        Ok(SessionResult {
            cycle,
            target_dir,
            stats,
            outcomes,
            verification,
            verification_error,
            total_duration,
        })
    }

    /// Generate one task per forecast offset
    ///
    /// Links whose filename cannot be recovered are logged and dropped.
    fn build_tasks(&self, cycle: &Cycle, target_dir: &Path) -> Result<Vec<DownloadTask>> {
        let hours = forecast_hours(self.config.max_hour, self.config.step)?;
        let links = build_links(
            &self.config.base_url,
            &self.config.model_name,
            cycle,
            &hours,
            &self.config.selection,
        )?;

        let tasks = links
            .into_iter()
            .filter_map(|url| match extract_filename(&url) {
                Some(file_name) => Some(DownloadTask::new(url, target_dir.join(file_name))),
                None => {
                    warn!("Could not extract filename from URL: {}", url);
                    None
                }
            })
            .collect();

        Ok(tasks)
    }

    /// Run the pool while a consumer task feeds the reporter
    async fn execute(&self, tasks: Vec<DownloadTask>) -> Vec<DownloadOutcome> {
        self.reporter.batch_started(tasks.len());

        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<TaskProgress>();
        let reporter = Arc::clone(&self.reporter);
        let consumer = tokio::spawn(async move {
            while let Some(progress) = progress_rx.recv().await {
                reporter.task_finished(&progress);
            }
        });

        // The sender is dropped when the pool returns, which ends the consumer
        let outcomes = self.pool.run(tasks, Some(progress_tx)).await;

        if let Err(e) = consumer.await {
            warn!("Progress reporter stopped early: {}", e);
        }
        self.reporter.batch_finished();

        outcomes
    }
}
