//! Command-line interface components
//!
//! This module contains CLI-specific code for the GFS Fetcher application:
//! argument parsing, subscriber setup and the progress bar.

pub mod args;
pub mod logging;
pub mod progress;

pub use args::Cli;
pub use logging::init_logging;
pub use progress::ProgressBarReporter;
