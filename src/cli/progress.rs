//! Terminal progress bar for a download batch
//!
//! Replaces the per-file log lines with a single bar. Non-success outcomes
//! are still logged, above the bar.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::app::coordinator::{format_progress, ProgressReporter};
use crate::app::models::TaskProgress;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// [`ProgressReporter`] drawing an indicatif bar
#[derive(Clone)]
pub struct ProgressBarReporter {
    bar: ProgressBar,
}

impl ProgressBarReporter {
    /// Create a reporter drawing to stderr
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    /// Create a reporter around an existing bar
    pub fn with_bar(bar: ProgressBar) -> Self {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        bar.set_style(style);
        Self { bar }
    }

    /// Current position of the bar
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Default for ProgressBarReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ProgressBarReporter {
    fn batch_started(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.set_message("Downloading GFS files");
    }

    fn task_finished(&self, progress: &TaskProgress) {
        if !progress.outcome.is_success() {
            let line = format_progress(progress);
            self.bar.suspend(|| warn!("{}", line));
        }
        self.bar.set_message(progress.outcome.file_name().to_string());
        self.bar.set_position(progress.completed as u64);
    }

    fn batch_finished(&self) {
        self.bar.finish_with_message("done");
    }
}
