//! Progress reporting for a download batch
//!
//! The coordinator forwards every finished task to a [`ProgressReporter`].
//! The default [`LogReporter`] writes one log line per task; the CLI swaps in
//! a progress bar.

use tracing::{info, warn};

use crate::app::models::TaskProgress;

/// Receives batch lifecycle and per-task progress notifications
pub trait ProgressReporter: Send + Sync {
    /// Called once before the first task is scheduled
    fn batch_started(&self, _total: usize) {}

    /// Called once per finished task, in completion order
    fn task_finished(&self, progress: &TaskProgress);

    /// Called once after the last task finished
    fn batch_finished(&self) {}
}

/// Reporter writing `(n/total) message` log lines
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn task_finished(&self, progress: &TaskProgress) {
        let line = format_progress(progress);
        if progress.outcome.is_success() {
            info!("{}", line);
        } else {
            warn!("{}", line);
        }
    }
}

/// Format a progress line, e.g. `(3/49) Downloaded: gfs.t06z.pgrb2.0p25.f002`
pub fn format_progress(progress: &TaskProgress) -> String {
    format!(
        "({}/{}) {}",
        progress.completed,
        progress.total,
        progress.outcome.message()
    )
}
