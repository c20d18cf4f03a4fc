//! Download statistics tracking and aggregation
//!
//! This module tallies per-task outcomes of a run and packages them, with the
//! verification report, into the final session result.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::models::{Cycle, DownloadOutcome};
use crate::app::verification::VerificationReport;

/// Aggregated download statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadStats {
    /// Links generated for the cycle
    pub total_links: usize,
    /// Tasks dropped because their file already existed
    pub files_skipped: usize,
    /// Tasks handed to the worker pool
    pub files_scheduled: usize,
    /// SUCCESS outcomes
    pub files_succeeded: usize,
    /// WARNING outcomes (zero-byte files)
    pub files_warned: usize,
    /// FAILED outcomes (non-success HTTP status)
    pub files_failed: usize,
    /// ERROR outcomes (transport failures)
    pub files_errored: usize,
    /// Total bytes written by successful tasks
    pub total_bytes_downloaded: u64,
}

impl DownloadStats {
    /// Record one task outcome
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Success { bytes, .. } => {
                self.files_succeeded += 1;
                self.total_bytes_downloaded += bytes;
            }
            DownloadOutcome::Warning { .. } => self.files_warned += 1,
            DownloadOutcome::Failed { .. } => self.files_failed += 1,
            DownloadOutcome::Error { .. } => self.files_errored += 1,
        }
    }

    /// Outcomes recorded so far
    pub fn total_processed(&self) -> usize {
        self.files_succeeded + self.files_warned + self.files_failed + self.files_errored
    }

    /// Check if any task ended without a usable file
    pub fn has_failures(&self) -> bool {
        self.files_warned + self.files_failed + self.files_errored > 0
    }

    /// Calculate success rate as a percentage of processed tasks
    pub fn success_rate(&self) -> f64 {
        let processed = self.total_processed();
        if processed == 0 {
            0.0
        } else {
            (self.files_succeeded as f64 / processed as f64) * 100.0
        }
    }
}

/// Final result of a download session
#[derive(Debug, Clone)]
pub struct SessionResult {
    /// Cycle that was fetched
    pub cycle: Cycle,
    /// Directory holding the cycle's files
    pub target_dir: PathBuf,
    /// Final download statistics
    pub stats: DownloadStats,
    /// Per-task outcomes in completion order
    pub outcomes: Vec<DownloadOutcome>,
    /// Verification report, absent if verification could not run
    pub verification: Option<VerificationReport>,
    /// Why verification could not run, if it did not
    pub verification_error: Option<String>,
    /// Time taken for the entire session
    pub total_duration: Duration,
}

impl SessionResult {
    /// Check if every expected file is present and non-empty
    pub fn is_verified(&self) -> bool {
        self.verification
            .as_ref()
            .map(VerificationReport::is_successful)
            .unwrap_or(false)
    }
}
