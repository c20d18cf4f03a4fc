//! Core fetch worker implementation
//!
//! Workers pull tasks from the shared queue until it is empty and push one
//! outcome per task onto the completion channel. A worker never waits on a
//! specific task and never shares anything with its siblings beyond the
//! queue and the channel. A fetch that panics still yields an outcome, so
//! the completion count always reaches the batch size.

use std::collections::VecDeque;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error};

use crate::app::client::FetchClient;
use crate::app::models::{DownloadOutcome, DownloadTask};

/// Shared FIFO of tasks waiting for a worker
pub type TaskQueue = Arc<Mutex<VecDeque<DownloadTask>>>;

/// Individual fetch worker
#[derive(Debug)]
pub struct FetchWorker {
    /// Worker identifier, for logs
    id: usize,
    /// Shared task queue
    queue: TaskQueue,
    /// Shared HTTP client
    client: FetchClient,
    /// Completion channel
    results_tx: mpsc::UnboundedSender<DownloadOutcome>,
}

impl FetchWorker {
    /// Create a new fetch worker
    pub fn new(
        id: usize,
        queue: TaskQueue,
        client: FetchClient,
        results_tx: mpsc::UnboundedSender<DownloadOutcome>,
    ) -> Self {
        Self {
            id,
            queue,
            client,
            results_tx,
        }
    }

    /// Drain the queue, returning the number of tasks this worker executed
    pub async fn run(self) -> usize {
        debug!("Worker {} starting", self.id);
        let mut processed = 0;

        loop {
            let next = self.queue.lock().await.pop_front();
            let Some(task) = next else {
                break;
            };

            debug!("Worker {} fetching {}", self.id, task.url);
            let outcome = guard_fetch(task.file_name(), self.client.fetch_to_file(&task)).await;
            processed += 1;

            if self.results_tx.send(outcome).is_err() {
                debug!("Worker {} result channel closed", self.id);
                break;
            }
        }

        debug!("Worker {} finished after {} tasks", self.id, processed);
        processed
    }
}

/// Await one fetch, turning a panic into an ERROR outcome for that file
pub(crate) async fn guard_fetch<F>(file_name: String, fetch: F) -> DownloadOutcome
where
    F: Future<Output = DownloadOutcome>,
{
    match AssertUnwindSafe(fetch).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!("Fetch of {} panicked: {}", file_name, detail);
            DownloadOutcome::Error {
                file_name,
                reason: format!("worker panicked: {}", detail),
            }
        }
    }
}
