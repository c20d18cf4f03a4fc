//! Worker configuration management
//!
//! The pool size is the only concurrency control: at most `worker_count`
//! downloads are in flight at once.

use serde::{Deserialize, Serialize};

use crate::constants::workers;
use crate::errors::{ConfigError, ConfigResult};

/// Configuration for the fetch worker pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of concurrent workers to spawn
    pub worker_count: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            worker_count: workers::DEFAULT_WORKER_COUNT,
        }
    }
}

impl WorkerConfig {
    /// Create a configuration with the given worker count
    pub fn with_worker_count(worker_count: usize) -> Self {
        Self { worker_count }
    }

    /// Validate configuration values and return errors for invalid settings
    pub fn validate(&self) -> ConfigResult<()> {
        if self.worker_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "download.max_workers".to_string(),
                value: self.worker_count.to_string(),
                reason: "Worker count cannot be zero".to_string(),
            });
        }

        if self.worker_count > workers::MAX_WORKER_COUNT {
            return Err(ConfigError::InvalidValue {
                field: "download.max_workers".to_string(),
                value: self.worker_count.to_string(),
                reason: format!("Worker count exceeds maximum ({})", workers::MAX_WORKER_COUNT),
            });
        }

        Ok(())
    }
}
