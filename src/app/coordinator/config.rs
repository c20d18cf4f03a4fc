//! Configuration structures for the download coordinator
//!
//! Everything one fetch-and-verify run needs: where to fetch from, what to
//! select, which forecast horizon to cover, where to write, and how the
//! worker pool and HTTP client behave.

use std::path::PathBuf;

use crate::app::client::ClientConfig;
use crate::app::links;
use crate::app::models::{Cycle, SelectionParameters};
use crate::app::worker::WorkerConfig;
use crate::constants::{defaults, files, forecast, gfs};
use crate::errors::{ConfigError, ConfigResult};

/// Configuration for one download run
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Model name, used as directory component and filename prefix
    pub model_name: String,
    /// Deployment label, used as directory component
    pub loc: String,
    /// Root of the output tree
    pub base_folder: PathBuf,
    /// Filter endpoint root
    pub base_url: String,
    /// Variables, levels and region requested
    pub selection: SelectionParameters,
    /// Publication lag subtracted from the current time
    pub availability_delay_hours: i64,
    /// Highest forecast offset requested
    pub max_hour: u32,
    /// Spacing between forecast offsets
    pub step: i64,
    /// Worker pool configuration
    pub worker_config: WorkerConfig,
    /// HTTP client configuration
    pub client_config: ClientConfig,
}

impl CoordinatorConfig {
    /// Create a configuration for `base_url` with every other field defaulted
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            model_name: defaults::MODEL_NAME.to_string(),
            loc: defaults::LOC.to_string(),
            base_folder: PathBuf::from(defaults::BASE_FOLDER),
            base_url: base_url.into(),
            selection: SelectionParameters::default(),
            availability_delay_hours: gfs::DEFAULT_AVAILABILITY_DELAY_HOURS,
            max_hour: forecast::DEFAULT_MAX_HOUR,
            step: forecast::DEFAULT_STEP,
            worker_config: WorkerConfig::default(),
            client_config: ClientConfig::default(),
        }
    }

    /// Set the output root
    pub fn with_base_folder(mut self, base_folder: impl Into<PathBuf>) -> Self {
        self.base_folder = base_folder.into();
        self
    }

    /// Set the forecast horizon
    pub fn with_forecast(mut self, max_hour: u32, step: i64) -> Self {
        self.max_hour = max_hour;
        self.step = step;
        self
    }

    /// Set the worker count
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_config.worker_count = count;
        self
    }

    /// Directory receiving the files of `cycle`
    ///
    /// `<base_folder>/<model_name>/<loc>/<YYYY>/<MM>/<DD>/<HH>`
    pub fn target_dir(&self, cycle: &Cycle) -> PathBuf {
        self.base_folder
            .join(&self.model_name)
            .join(&self.loc)
            .join(cycle.relative_dir())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "gfs_api.base_url".to_string(),
            });
        }
        links::parse_base_url(&self.base_url)?;

        if self.model_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "default.model_name".to_string(),
                value: self.model_name.clone(),
                reason: "Model name cannot be empty".to_string(),
            });
        }

        if !(0..=gfs::MAX_AVAILABILITY_DELAY_HOURS).contains(&self.availability_delay_hours) {
            return Err(ConfigError::InvalidValue {
                field: "gfs_api.availability_delay_hours".to_string(),
                value: self.availability_delay_hours.to_string(),
                reason: format!(
                    "Delay must be between 0 and {} hours",
                    gfs::MAX_AVAILABILITY_DELAY_HOURS
                ),
            });
        }

        if self.max_hour > forecast::MAX_FORECAST_HOUR {
            return Err(ConfigError::InvalidValue {
                field: "forecast.max_hour".to_string(),
                value: self.max_hour.to_string(),
                reason: format!("GFS forecasts end at hour {}", forecast::MAX_FORECAST_HOUR),
            });
        }

        if self.step <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "forecast.step".to_string(),
                value: self.step.to_string(),
                reason: "Step must be a positive number of hours".to_string(),
            });
        }

        if self.client_config.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "download.timeout".to_string(),
                value: "0".to_string(),
                reason: "Timeout cannot be zero".to_string(),
            });
        }

        if !(1..=files::MAX_CHUNK_SIZE).contains(&self.client_config.chunk_size) {
            return Err(ConfigError::InvalidValue {
                field: "download.chunk_size".to_string(),
                value: self.client_config.chunk_size.to_string(),
                reason: format!(
                    "Chunk size must be between 1 and {} bytes",
                    files::MAX_CHUNK_SIZE
                ),
            });
        }

        self.worker_config.validate()
    }
}
