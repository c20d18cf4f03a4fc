//! Worker pool management and coordination
//!
//! The pool splits a batch into pending and already-satisfied tasks, spawns a
//! fixed set of workers over a shared queue, and collects one outcome per
//! executed task in completion order. Each arriving outcome is forwarded to
//! the progress channel together with a monotonically increasing completed
//! count.

use std::collections::VecDeque;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use super::config::WorkerConfig;
use super::core::{FetchWorker, TaskQueue};
use super::types::SchedulePlan;
use crate::app::client::FetchClient;
use crate::app::models::{DownloadOutcome, DownloadTask, TaskProgress};
use crate::errors::QueueError;

/// Fixed-size pool of fetch workers
#[derive(Debug, Clone)]
pub struct FetchWorkerPool {
    /// Worker configuration
    config: WorkerConfig,
    /// Shared HTTP client
    client: FetchClient,
}

impl FetchWorkerPool {
    /// Create a new worker pool
    pub fn new(config: WorkerConfig, client: FetchClient) -> Self {
        Self { config, client }
    }

    /// Split a batch into tasks to run and tasks already satisfied on disk
    ///
    /// A task is satisfied when its destination is a regular file with
    /// non-zero size; missing and zero-length files are scheduled again.
    pub async fn plan(tasks: Vec<DownloadTask>) -> SchedulePlan {
        let mut plan = SchedulePlan::default();

        for task in tasks {
            match tokio::fs::metadata(&task.destination).await {
                Ok(metadata) if metadata.is_file() && metadata.len() > 0 => {
                    info!("Skipping existing file: {}", task.file_name());
                    plan.skipped.push(task);
                }
                _ => plan.pending.push(task),
            }
        }

        plan
    }

    /// Execute a batch and return one outcome per task, in completion order
    ///
    /// Blocks until every worker has finished. Per-task failures are
    /// outcomes, never errors. A panicking fetch becomes an error outcome for
    /// its task, and anything left queued after every worker exits is
    /// reported the same way.
    pub async fn run(
        &self,
        tasks: Vec<DownloadTask>,
        progress_tx: Option<mpsc::UnboundedSender<TaskProgress>>,
    ) -> Vec<DownloadOutcome> {
        let total = tasks.len();
        if total == 0 {
            return Vec::new();
        }

        let worker_count = self.config.worker_count.clamp(1, total);
        info!("Starting concurrent download with {} workers.", worker_count);

        let queue: TaskQueue = Arc::new(Mutex::new(VecDeque::from(tasks)));
        let (results_tx, mut results_rx) = mpsc::unbounded_channel();

        let handles: Vec<_> = (0..worker_count)
            .map(|worker_id| {
                let worker = FetchWorker::new(
                    worker_id,
                    queue.clone(),
                    self.client.clone(),
                    results_tx.clone(),
                );
                tokio::spawn(worker.run())
            })
            .collect();

        // Workers hold the only remaining senders
        drop(results_tx);

        let mut outcomes = Vec::with_capacity(total);
        while let Some(outcome) = results_rx.recv().await {
            outcomes.push(outcome.clone());
            if let Some(tx) = &progress_tx {
                let _ = tx.send(TaskProgress {
                    completed: outcomes.len(),
                    total,
                    outcome,
                });
            }
        }

        for (worker_id, result) in join_all(handles).await.into_iter().enumerate() {
            match result {
                Ok(processed) => debug!("Worker {} processed {} tasks", worker_id, processed),
                Err(e) => warn!("{}: {}", QueueError::WorkerPanic { worker_id }, e),
            }
        }

        // Only reachable if every worker died before draining the queue
        let stranded: Vec<DownloadTask> = queue.lock().await.drain(..).collect();
        for task in stranded {
            let outcome = DownloadOutcome::Error {
                file_name: task.file_name(),
                reason: "no worker left to run the task".to_string(),
            };
            outcomes.push(outcome.clone());
            if let Some(tx) = &progress_tx {
                let _ = tx.send(TaskProgress {
                    completed: outcomes.len(),
                    total,
                    outcome,
                });
            }
        }

        outcomes
    }

    /// Get pool configuration
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }
}
