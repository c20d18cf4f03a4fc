//! Prelude module for GFS Fetcher Library
//!
//! This module re-exports the most commonly used items from the library,
//! providing a convenient way to import everything needed for typical usage
//! with a single `use gfs_fetcher::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use gfs_fetcher::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None).await?;
//!     config.validate()?;
//!
//!     let coordinator = Coordinator::new(config.to_coordinator_config()?)?;
//!     let result = coordinator.run().await?;
//!     println!("{} files verified", result.stats.total_links);
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Configuration
pub use crate::config::AppConfig;

// Essential app components that are used in most integrations
pub use crate::app::{
    // Core orchestration
    Coordinator,
    CoordinatorConfig,
    DownloadStats,
    LogReporter,
    ProgressReporter,
    SessionResult,

    // Data types
    Cycle,
    CycleHour,
    DownloadOutcome,
    DownloadTask,
    SelectionParameters,
    TaskProgress,
    VerificationReport,

    // Free functions
    build_links,
    resolve_cycle,
    verify,
};

// Commonly used constants
pub use crate::constants::{DEFAULT_WORKER_COUNT, USER_AGENT};

// Standard library re-exports that are commonly needed
pub use std::path::{Path, PathBuf};
pub use std::sync::Arc;

pub use tokio;
