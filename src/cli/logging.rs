//! Tracing subscriber setup
//!
//! Log lines always go to stderr. With file logging enabled they are also
//! appended, without ANSI colors, to a log file whose name carries the date.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::errors::{AppError, Result};

/// Install the global subscriber
///
/// `level` is the level for this crate; `RUST_LOG` directives are honoured
/// for everything else. Returns the log file path when file logging is on.
///
/// # Errors
///
/// Fails if the level cannot be parsed, the log file cannot be opened, or a
/// global subscriber is already installed.
pub fn init_logging(
    level: &str,
    config: &LoggingConfig,
    today: NaiveDate,
) -> Result<Option<PathBuf>> {
    let directive: Directive = format!("{}={}", env!("CARGO_CRATE_NAME"), level.to_lowercase())
        .parse()
        .map_err(|e| AppError::generic(format!("Invalid log level {:?}: {}", level, e)))?;
    let filter = EnvFilter::from_default_env().add_directive(directive);

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, log_path) = if config.file_logging {
        let path = config.dated_log_path(today);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let layer = fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        (Some(layer), Some(path))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::generic(format!("Failed to initialize logging: {}", e)))?;

    Ok(log_path)
}
