//! Core application logic for GFS Fetcher
//!
//! This module contains the main application components: cycle resolution,
//! link construction, the HTTP client, the fetch worker pool, directory
//! verification and the coordinator tying them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use gfs_fetcher::app::{build_links, forecast_hours, resolve_cycle, SelectionParameters};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cycle = resolve_cycle(Utc::now(), 4)?;
//! let hours = forecast_hours(12, 3)?;
//! let links = build_links(
//!     "https://nomads.ncep.noaa.gov/cgi-bin/filter_gfs_0p25.pl",
//!     "gfs",
//!     &cycle,
//!     &hours,
//!     &SelectionParameters::default(),
//! )?;
//!
//! for link in links {
//!     println!("{}", link);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod coordinator;
pub mod cycle;
pub mod links;
pub mod models;
pub mod verification;
pub mod worker;

// Re-export main public API
pub use client::{ClientConfig, FetchClient};
pub use coordinator::{
    Coordinator, CoordinatorConfig, DownloadStats, LogReporter, ProgressReporter, SessionResult,
};
pub use cycle::resolve_cycle;
pub use links::{build_links, build_url, extract_filename, forecast_hours};
pub use models::{
    Cycle, CycleHour, DownloadOutcome, DownloadTask, ForecastHour, OutcomeStatus, RegionBound,
    SelectionParameters, TaskProgress,
};
pub use verification::{verify, VerificationReport};
pub use worker::{FetchWorkerPool, SchedulePlan, WorkerConfig};
