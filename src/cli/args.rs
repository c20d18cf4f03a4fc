//! Command-line argument parsing for GFS Fetcher
//!
//! A single command: fetch the latest available cycle described by the
//! configuration file. Flags only adjust where the configuration comes from
//! and how much is printed.

use std::path::PathBuf;

use clap::Parser;

/// GFS Fetcher - Download Global Forecast System subsets
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "gfs_fetcher",
    version,
    about = "Download the latest published GFS cycle from a NOMADS filter endpoint",
    long_about = "Resolves the most recent GFS cycle that should be published, requests every
configured forecast hour through the filter endpoint concurrently, skips files already on disk
and verifies the target directory once all downloads have finished."
)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Very verbose logging (trace level)
    #[arg(long)]
    pub very_verbose: bool,

    /// Quiet mode - only errors are logged
    #[arg(short, long)]
    pub quiet: bool,

    /// Show a progress bar instead of one log line per file
    #[arg(long)]
    pub progress: bool,

    /// Write a commented default configuration file and exit
    #[arg(long)]
    pub init_config: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level forced by flags, if any; otherwise the configured level applies
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.quiet {
            Some(tracing::Level::ERROR)
        } else if self.very_verbose {
            Some(tracing::Level::TRACE)
        } else if self.verbose {
            Some(tracing::Level::DEBUG)
        } else {
            None
        }
    }
}
