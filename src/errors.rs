//! Error types for GFS Fetcher
//!
//! Configuration problems are fatal and surface before any network
//! activity. Download failures are per task and end up as
//! [`DownloadOutcome`](crate::app::models::DownloadOutcome) values rather than
//! propagating. Verification problems are reported but never abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// Download and HTTP client errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Transport failure: connection, timeout, DNS, body stream interruption
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error while writing the destination file
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server returned a non-success status
    #[error("Server error: HTTP {status}")]
    ServerError { status: u16 },

    /// Invalid URL provided
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Post-download verification errors
#[derive(Error, Debug)]
pub enum VerificationError {
    /// The directory that should hold the downloaded files does not exist
    #[error("Target directory not found at {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Listing the target directory failed
    #[error("Failed to list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Worker pool errors
#[derive(Error, Debug)]
pub enum QueueError {
    /// Worker panic or unexpected termination
    #[error("Worker {worker_id} panicked or terminated unexpectedly")]
    WorkerPanic { worker_id: usize },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read or written
    #[error("Failed to access configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    /// Missing required configuration field
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<String> },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Verification error
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error should end the run
    ///
    /// Verification problems are reported and the run still completes;
    /// everything else reaching the top level is fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AppError::Verification(_))
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Download(_) => "download",
            AppError::Verification(_) => "verification",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Verification result type alias
pub type VerificationResult<T> = std::result::Result<T, VerificationError>;
