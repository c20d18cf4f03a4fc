//! Bounded-concurrency fetch worker pool
//!
//! A fixed set of workers drains a shared task queue. Each task is fetched
//! once and classified as SUCCESS, WARNING, FAILED or ERROR; failures are
//! values on the completion channel and never abort sibling tasks. Tasks
//! whose destination already holds a non-empty file are dropped before
//! scheduling, which turns a re-run into a pure top-up.
//!
//! # Module Organization
//!
//! - [`config`] - Worker configuration with validation
//! - [`types`] - Scheduling data structures
//! - [`core`] - Individual worker loop
//! - [`pool`] - Pool lifecycle and outcome collection
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use gfs_fetcher::app::client::{ClientConfig, FetchClient};
//! use gfs_fetcher::app::models::DownloadTask;
//! use gfs_fetcher::app::worker::{FetchWorkerPool, WorkerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FetchClient::new(&ClientConfig::default())?;
//! let pool = FetchWorkerPool::new(WorkerConfig::with_worker_count(4), client);
//!
//! let tasks = vec![DownloadTask::new(
//!     "https://nomads.ncep.noaa.gov/cgi-bin/filter_gfs_0p25.pl?file=gfs.t00z.pgrb2.0p25.f000",
//!     "downloaded_data/gfs.t00z.pgrb2.0p25.f000",
//! )];
//!
//! let plan = FetchWorkerPool::plan(tasks).await;
//! let (progress_tx, mut progress_rx) = tokio::sync::mpsc::unbounded_channel();
//! let outcomes = pool.run(plan.pending, Some(progress_tx)).await;
//!
//! while let Some(progress) = progress_rx.recv().await {
//!     println!("({}/{}) {}", progress.completed, progress.total, progress.outcome.message());
//! }
//! println!("{} outcomes", outcomes.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod pool;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export main public API
pub use config::WorkerConfig;
pub use self::core::{FetchWorker, TaskQueue};
pub use pool::FetchWorkerPool;
pub use types::SchedulePlan;
