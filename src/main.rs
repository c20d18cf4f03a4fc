//! GFS Fetcher CLI application
//!
//! Downloads the latest published GFS cycle described by the configuration
//! file, then verifies the target directory.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use chrono::Local;
use tracing::{error, info, warn};

use gfs_fetcher::app::Coordinator;
use gfs_fetcher::cli::{init_logging, Cli, ProgressBarReporter};
use gfs_fetcher::config::AppConfig;
use gfs_fetcher::constants::CONFIG_FILE_NAME;
use gfs_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        if e.is_fatal() {
            error!("Run aborted ({}): {}", e.category(), e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        warn!("{}", e);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    if cli.init_config {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        if AppConfig::write_default_config(&path).await? {
            println!("Created default configuration file: {}", path.display());
        } else {
            println!("Configuration file already exists: {}", path.display());
        }
        return Ok(());
    }

    let config = AppConfig::load(cli.config.clone()).await?;

    let level = cli
        .log_level()
        .map(|level| level.to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let log_path = init_logging(&level, &config.logging, Local::now().date_naive())?;

    info!("GFS Fetcher v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = log_path {
        info!("Logging to {}", path.display());
    }

    config.validate()?;
    let coordinator = Coordinator::new(config.to_coordinator_config()?)?;
    let coordinator = if cli.progress {
        coordinator.with_reporter(Arc::new(ProgressBarReporter::new()))
    } else {
        coordinator
    };

    let result = coordinator.run().await?;

    info!(
        "Cycle {} done in {:.1}s: {}/{} files present, {} downloaded ({} bytes)",
        result.cycle,
        result.total_duration.as_secs_f64(),
        result.stats.files_skipped + result.stats.files_succeeded,
        result.stats.total_links,
        result.stats.files_succeeded,
        result.stats.total_bytes_downloaded
    );
    if !result.is_verified() {
        warn!(
            "Cycle {} is incomplete in {}; re-run to fetch the remaining files",
            result.cycle,
            result.target_dir.display()
        );
    }

    Ok(())
}
