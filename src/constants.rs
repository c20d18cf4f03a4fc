//! Application constants for GFS Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Defaults for the `[default]` configuration section
pub mod defaults {
    /// Model name used as directory component and filename prefix
    pub const MODEL_NAME: &str = "gfs";

    /// Deployment label used as directory component
    pub const LOC: &str = "unknown";

    /// Root of the output tree
    pub const BASE_FOLDER: &str = "downloaded_data";
}

/// GFS distribution service constants
pub mod gfs {
    /// Canonical cycle start hours (UTC)
    pub const CYCLE_HOURS: [u32; 4] = [0, 6, 12, 18];

    /// Default publication lag subtracted from the current time
    pub const DEFAULT_AVAILABILITY_DELAY_HOURS: i64 = 4;

    /// Largest accepted publication lag (one week)
    pub const MAX_AVAILABILITY_DELAY_HOURS: i64 = 24 * 7;

    /// Product segment of the published filenames
    pub const PRODUCT: &str = "pgrb2.0p25";

    /// Sub-directory holding atmospheric products within a cycle
    pub const ATMOS_DIR: &str = "atmos";

    /// Query parameter carrying the filename
    pub const FILE_PARAM: &str = "file";

    /// Query parameter carrying the server-side directory
    pub const DIR_PARAM: &str = "dir";

    /// Trailing query parameter enabling region subsetting
    pub const SUBREGION_PARAM: &str = "subregion";

    /// NOMADS 0.25 degree filter endpoint, written into generated configs
    pub const NOMADS_FILTER_URL: &str = "https://nomads.ncep.noaa.gov/cgi-bin/filter_gfs_0p25.pl";
}

/// Forecast horizon defaults
pub mod forecast {
    /// Highest forecast offset requested
    pub const DEFAULT_MAX_HOUR: u32 = 48;

    /// Longest horizon published for GFS (16 days)
    pub const MAX_FORECAST_HOUR: u32 = 384;

    /// Spacing between forecast offsets
    pub const DEFAULT_STEP: i64 = 1;
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "GFS-Fetcher/0.1.0 (Forecast Data Tool)";

    /// Default per-request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 8;
}

/// File operation constants
pub mod files {
    /// Temporary file suffix for atomic operations
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";

    /// Download chunk size for streaming writes (8KB)
    pub const DOWNLOAD_CHUNK_SIZE: usize = 8 * 1024;

    /// Largest accepted write buffer (8MB)
    pub const MAX_CHUNK_SIZE: usize = 8 * 1024 * 1024;

    /// Configuration file looked up in the working directory
    pub const CONFIG_FILE_NAME: &str = "configGFS.toml";

    /// Alternative configuration file name in the working directory
    pub const ALT_CONFIG_FILE_NAME: &str = "gfs-fetcher.toml";

    /// Directory under the user config dir holding `config.toml`
    pub const USER_CONFIG_DIR: &str = "gfs-fetcher";
}

/// Worker and concurrency configuration
pub mod workers {
    /// Default number of download workers
    pub const DEFAULT_WORKER_COUNT: usize = 5;

    /// Maximum recommended concurrent workers
    pub const MAX_WORKER_COUNT: usize = 32;
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    /// Default log file, dated per run day
    pub const DEFAULT_LOG_FILE: &str = "gfs_download.log";

    /// Date stamp inserted into the log file name
    pub const LOG_DATE_FORMAT: &str = "%Y%m%d";
}

// Re-export commonly used constants for convenience
pub use files::{CONFIG_FILE_NAME, TEMP_FILE_SUFFIX};
pub use gfs::CYCLE_HOURS;
pub use http::USER_AGENT;
pub use workers::DEFAULT_WORKER_COUNT;
