//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the HTTP client
//! used for fetching forecast files.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::{files, http};
use crate::errors::{DownloadError, DownloadResult};

/// Configuration for the HTTP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Request timeout, covering connect and body streaming
    pub request_timeout: Duration,
    /// Connect timeout (never longer than the request timeout)
    pub connect_timeout: Duration,
    /// TCP nodelay (disable Nagle's algorithm)
    pub tcp_nodelay: bool,
    /// Connection pool idle timeout
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum number of idle connections per host
    pub pool_max_per_host: usize,
    /// Buffer size for streaming response bodies to disk
    pub chunk_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::DEFAULT_TIMEOUT,
            tcp_nodelay: true,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
            chunk_size: files::DOWNLOAD_CHUNK_SIZE,
        }
    }
}

impl ClientConfig {
    /// Configuration with a single timeout applied to connect and the whole request
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            request_timeout: timeout,
            connect_timeout: timeout,
            ..Default::default()
        }
    }

    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> DownloadResult<Client> {
        let mut client_builder = Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout.min(self.request_timeout))
            .user_agent(http::USER_AGENT)
            .tcp_nodelay(self.tcp_nodelay)
            .pool_max_idle_per_host(self.pool_max_per_host);

        if let Some(idle_timeout) = self.pool_idle_timeout {
            client_builder = client_builder.pool_idle_timeout(idle_timeout);
        }

        client_builder
            .build()
            .map_err(|e| DownloadError::ClientBuild(e.to_string()))
    }
}
