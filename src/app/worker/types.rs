//! Worker type definitions

use crate::app::models::DownloadTask;

/// A batch split into tasks to run and tasks already satisfied on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulePlan {
    /// Tasks whose destination is missing or empty
    pub pending: Vec<DownloadTask>,
    /// Tasks whose destination already exists with non-zero size
    pub skipped: Vec<DownloadTask>,
}

impl SchedulePlan {
    /// Check if nothing needs downloading
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total number of tasks in the batch
    pub fn total(&self) -> usize {
        self.pending.len() + self.skipped.len()
    }
}
