//! Configuration management for GFS Fetcher
//!
//! This module loads the TOML configuration file, applies defaults for every
//! omitted key, validates the result and converts it into the runtime
//! [`CoordinatorConfig`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::models::{RegionBound, SelectionParameters};
use crate::app::{ClientConfig, CoordinatorConfig, WorkerConfig};
use crate::constants::{defaults, files, forecast, gfs, http, logging, workers};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Naming and output root (`[default]`)
    #[serde(rename = "default")]
    pub general: GeneralConfig,
    /// Filter endpoint and selection (`[gfs_api]`)
    pub gfs_api: GfsApiConfig,
    /// Forecast horizon (`[forecast]`)
    pub forecast: ForecastConfig,
    /// Pool and HTTP settings (`[download]`)
    pub download: DownloadConfig,
    /// Logging configuration (`[logging]`)
    pub logging: LoggingConfig,
}

/// Naming and output root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Model name, used as directory component and filename prefix
    pub model_name: String,
    /// Deployment label, used as directory component
    pub loc: String,
    /// Root of the output tree
    pub base_folder: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            model_name: defaults::MODEL_NAME.to_string(),
            loc: defaults::LOC.to_string(),
            base_folder: PathBuf::from(defaults::BASE_FOLDER),
        }
    }
}

/// Filter endpoint and request selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GfsApiConfig {
    /// Filter endpoint root (required)
    pub base_url: Option<String>,
    /// Variables to request, e.g. "TMP"
    pub variables: Vec<String>,
    /// Levels to request, e.g. "2_m_above_ground"
    pub level: Vec<String>,
    /// Bounding box, e.g. `toplat = 60`
    pub region: BTreeMap<String, RegionBound>,
    /// Publication lag in hours
    pub availability_delay_hours: i64,
}

impl Default for GfsApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            variables: Vec::new(),
            level: Vec::new(),
            region: BTreeMap::new(),
            availability_delay_hours: gfs::DEFAULT_AVAILABILITY_DELAY_HOURS,
        }
    }
}

/// Forecast horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Highest forecast offset in hours
    pub max_hour: u32,
    /// Spacing between offsets in hours
    pub step: i64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            max_hour: forecast::DEFAULT_MAX_HOUR,
            step: forecast::DEFAULT_STEP,
        }
    }
}

/// Pool and HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Number of concurrent workers
    pub max_workers: usize,
    /// Per-request timeout in seconds
    pub timeout: u64,
    /// Write buffer size in bytes
    pub chunk_size: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_workers: workers::DEFAULT_WORKER_COUNT,
            timeout: http::DEFAULT_TIMEOUT.as_secs(),
            chunk_size: files::DOWNLOAD_CHUNK_SIZE,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
    /// Also write log lines to a dated file
    pub file_logging: bool,
    /// Log file path before the date stamp is inserted
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
            file_logging: true,
            file: PathBuf::from(logging::DEFAULT_LOG_FILE),
        }
    }
}

impl LoggingConfig {
    /// Log file path for `date`: `<stem>_<YYYYMMDD><ext>` next to the configured file
    pub fn dated_log_path(&self, date: NaiveDate) -> PathBuf {
        let stem = self
            .file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "gfs_download".to_string());
        let stamp = date.format(logging::LOG_DATE_FORMAT);
        let name = match self.file.extension() {
            Some(ext) => format!("{}_{}.{}", stem, stamp, ext.to_string_lossy()),
            None => format!("{}_{}", stem, stamp),
        };
        self.file.with_file_name(name)
    }
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl AppConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `./configGFS.toml`,
    /// `./gfs-fetcher.toml` and the user config directory are searched in
    /// that order; if none exists the defaults are used.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => Self::load_from_file(&path).await,
            None => {
                debug!("No config file found in standard locations, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check every value, reporting all problems at once
    pub fn validate(&self) -> ConfigResult<()> {
        let mut errors = Vec::new();

        match self.gfs_api.base_url.as_deref().map(str::trim) {
            None | Some("") => errors.push("gfs_api.base_url is required".to_string()),
            Some(url) => {
                if let Err(e) = crate::app::links::parse_base_url(url) {
                    errors.push(e.to_string());
                }
            }
        }
        if self.general.model_name.trim().is_empty() {
            errors.push("default.model_name cannot be empty".to_string());
        }
        if !(0..=gfs::MAX_AVAILABILITY_DELAY_HOURS).contains(&self.gfs_api.availability_delay_hours) {
            errors.push(format!(
                "gfs_api.availability_delay_hours must be between 0 and {} (got {})",
                gfs::MAX_AVAILABILITY_DELAY_HOURS,
                self.gfs_api.availability_delay_hours
            ));
        }
        if self.forecast.max_hour > forecast::MAX_FORECAST_HOUR {
            errors.push(format!(
                "forecast.max_hour must be at most {} (got {})",
                forecast::MAX_FORECAST_HOUR,
                self.forecast.max_hour
            ));
        }
        if self.forecast.step <= 0 {
            errors.push(format!(
                "forecast.step must be positive (got {})",
                self.forecast.step
            ));
        }
        if let Err(e) = WorkerConfig::with_worker_count(self.download.max_workers).validate() {
            errors.push(e.to_string());
        }
        if self.download.timeout == 0 {
            errors.push("download.timeout must be at least 1 second".to_string());
        }
        if !(1..=files::MAX_CHUNK_SIZE).contains(&self.download.chunk_size) {
            errors.push(format!(
                "download.chunk_size must be between 1 and {} bytes (got {})",
                files::MAX_CHUNK_SIZE,
                self.download.chunk_size
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "logging.level must be one of {} (got {:?})",
                LOG_LEVELS.join(", "),
                self.logging.level
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationFailed { errors })
        }
    }

    /// Convert to the runtime coordinator configuration
    pub fn to_coordinator_config(&self) -> ConfigResult<CoordinatorConfig> {
        let base_url = self
            .gfs_api
            .base_url
            .clone()
            .ok_or_else(|| ConfigError::MissingField {
                field: "gfs_api.base_url".to_string(),
            })?;

        let timeout = Duration::from_secs(self.download.timeout);
        let client_config = ClientConfig {
            chunk_size: self.download.chunk_size,
            ..ClientConfig::with_timeout(timeout)
        };

        Ok(CoordinatorConfig {
            model_name: self.general.model_name.clone(),
            loc: self.general.loc.clone(),
            base_folder: self.general.base_folder.clone(),
            base_url,
            selection: SelectionParameters::new(
                self.gfs_api.variables.iter().cloned(),
                self.gfs_api.level.iter().cloned(),
                self.gfs_api.region.clone(),
            ),
            availability_delay_hours: self.gfs_api.availability_delay_hours,
            max_hour: self.forecast.max_hour,
            step: self.forecast.step,
            worker_config: WorkerConfig::with_worker_count(self.download.max_workers),
            client_config,
        })
    }

    /// Write a commented default configuration to `path`
    ///
    /// Returns `false` without touching the file if it already exists.
    pub async fn write_default_config(path: &Path) -> ConfigResult<bool> {
        if path.exists() {
            return Ok(false);
        }

        let io_error = |source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        tokio::fs::write(path, Self::generate_default_config_content())
            .await
            .map_err(io_error)?;

        info!("Created default configuration file: {}", path.display());
        Ok(true)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![
            PathBuf::from(files::CONFIG_FILE_NAME),
            PathBuf::from(files::ALT_CONFIG_FILE_NAME),
        ];
        if let Some(user_config) = Self::user_config_path() {
            search_paths.push(user_config);
        }

        search_paths.into_iter().find(|path| {
            let found = path.exists();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    /// Config file path under the user config directory
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(files::USER_CONFIG_DIR).join("config.toml"))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::from_toml(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        format!(
            r#"# GFS Fetcher Configuration
# Every key is optional except gfs_api.base_url.

[default]
# Directory layout: <base_folder>/<model_name>/<loc>/<YYYY>/<MM>/<DD>/<HH>/
model_name = "{model}"
loc = "{loc}"
base_folder = "{base}"

[gfs_api]
base_url = "{url}"
# Fields and levels understood by the NOMADS filter
variables = ["TMP", "UGRD", "VGRD", "PRMSL"]
level = ["2_m_above_ground", "10_m_above_ground", "mean_sea_level"]
# Hours to wait after a cycle starts before it is considered published
availability_delay_hours = {delay}

[gfs_api.region]
# Bounding box in degrees
leftlon = 100
rightlon = 115
toplat = 25
bottomlat = 5

[forecast]
max_hour = {max_hour}
step = {step}

[download]
max_workers = {workers}
timeout = {timeout}  # seconds
chunk_size = {chunk}  # bytes

[logging]
level = "{level}"  # error, warn, info, debug, trace
file_logging = true
file = "{log_file}"  # a _YYYYMMDD stamp is added before the extension
"#,
            model = defaults::MODEL_NAME,
            loc = defaults::LOC,
            base = defaults::BASE_FOLDER,
            url = gfs::NOMADS_FILTER_URL,
            delay = gfs::DEFAULT_AVAILABILITY_DELAY_HOURS,
            max_hour = forecast::DEFAULT_MAX_HOUR,
            step = forecast::DEFAULT_STEP,
            workers = workers::DEFAULT_WORKER_COUNT,
            timeout = http::DEFAULT_TIMEOUT.as_secs(),
            chunk = files::DOWNLOAD_CHUNK_SIZE,
            level = logging::DEFAULT_LOG_LEVEL,
            log_file = logging::DEFAULT_LOG_FILE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_values() {
        let config = AppConfig::default();

        assert_eq!(config.general.model_name, "gfs");
        assert_eq!(config.general.loc, "unknown");
        assert_eq!(config.general.base_folder, PathBuf::from("downloaded_data"));
        assert_eq!(config.gfs_api.base_url, None);
        assert_eq!(config.gfs_api.availability_delay_hours, 4);
        assert_eq!(config.forecast.max_hour, 48);
        assert_eq!(config.forecast.step, 1);
        assert_eq!(config.download.max_workers, 5);
        assert_eq!(config.download.timeout, 60);
        assert_eq!(config.download.chunk_size, 8192);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file_logging);
    }

    /// Test that validation reports every problem together
    #[test]
    fn test_validation_collects_errors() {
        let mut config = AppConfig::default();
        config.forecast.step = 0;
        config.download.max_workers = 0;

        match config.validate() {
            Err(ConfigError::ValidationFailed { errors }) => {
                assert_eq!(errors.len(), 3, "{:?}", errors);
                assert!(errors[0].contains("base_url"));
                assert!(errors.iter().any(|e| e.contains("forecast.step")));
                assert!(errors.iter().any(|e| e.contains("max_workers")));
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    /// Test that values too large to run with fail validation
    #[test]
    fn test_validation_rejects_out_of_range_values() {
        let config = AppConfig::from_toml(
            r#"
[gfs_api]
base_url = "https://example.com/filter_gfs_0p25.pl"
availability_delay_hours = 1000000000000

[forecast]
max_hour = 100000

[download]
chunk_size = 1073741824
"#,
        )
        .unwrap();

        match config.validate() {
            Err(ConfigError::ValidationFailed { errors }) => {
                assert_eq!(errors.len(), 3, "{:?}", errors);
                assert!(errors[0].contains("availability_delay_hours"));
                assert!(errors[1].contains("forecast.max_hour"));
                assert!(errors[2].contains("download.chunk_size"));
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }

        // The runtime configuration rejects the same delay on its own
        let runtime = config.to_coordinator_config().unwrap();
        assert!(runtime.validate().is_err());
    }

    #[test]
    fn test_generated_config_is_valid() {
        let content = AppConfig::generate_default_config_content();
        let config = AppConfig::from_toml(&content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.gfs_api.variables.len(), 4);
        assert_eq!(config.gfs_api.region.get("toplat"), Some(&RegionBound::Integer(25)));
        assert!(content.contains("# GFS Fetcher Configuration"));
    }

    /// Test partial files fall back to defaults for omitted keys
    #[test]
    fn test_partial_config_and_conversion() {
        let config = AppConfig::from_toml(
            r#"
[default]
loc = "hanoi"

[gfs_api]
base_url = "https://example.com/filter_gfs_0p25.pl"
variables = ["TMP"]
level = ["surface"]

[gfs_api.region]
toplat = 23.5
leftlon = 102

[forecast]
max_hour = 12
step = 3
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());

        let runtime = config.to_coordinator_config().unwrap();
        assert_eq!(runtime.loc, "hanoi");
        assert_eq!(runtime.model_name, "gfs");
        assert_eq!(runtime.max_hour, 12);
        assert_eq!(runtime.step, 3);
        assert_eq!(runtime.worker_config.worker_count, 5);
        assert_eq!(runtime.client_config.request_timeout, Duration::from_secs(60));
        assert_eq!(
            runtime.selection.region.get("toplat"),
            Some(&RegionBound::Float(23.5))
        );
        assert!(runtime.selection.levels.contains("surface"));
    }

    #[test]
    fn test_missing_base_url_conversion() {
        assert!(matches!(
            AppConfig::default().to_coordinator_config(),
            Err(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            AppConfig::from_toml("[forecast]\nstep = \"three\""),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_dated_log_path() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        let logging = LoggingConfig::default();
        assert_eq!(logging.dated_log_path(date), PathBuf::from("gfs_download_20240307.log"));

        let logging = LoggingConfig {
            file: PathBuf::from("logs/fetch.txt"),
            ..Default::default()
        };
        assert_eq!(logging.dated_log_path(date), PathBuf::from("logs/fetch_20240307.txt"));

        let logging = LoggingConfig {
            file: PathBuf::from("logs/fetch"),
            ..Default::default()
        };
        assert_eq!(logging.dated_log_path(date), PathBuf::from("logs/fetch_20240307"));
    }

    #[tokio::test]
    async fn test_load_explicit_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::load(Some(temp_dir.path().join("nonexistent.toml"))).await;
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_write_and_load_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("configGFS.toml");

        assert!(AppConfig::write_default_config(&path).await.unwrap());
        assert!(!AppConfig::write_default_config(&path).await.unwrap());

        let config = AppConfig::load(Some(path)).await.unwrap();
        assert_eq!(
            config.gfs_api.base_url.as_deref(),
            Some(gfs::NOMADS_FILTER_URL)
        );
    }
}
