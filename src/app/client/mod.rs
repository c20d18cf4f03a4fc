//! HTTP client for the GFS distribution service
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `download`: streaming file downloads with atomic writes

pub mod config;
pub mod download;

pub use config::ClientConfig;
pub use download::{temp_path_for, DownloadHandler};

use reqwest::Client;

use crate::app::models::{DownloadOutcome, DownloadTask};
use crate::errors::DownloadResult;

/// HTTP client used by the fetch workers
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    chunk_size: usize,
}

impl FetchClient {
    /// Creates a new FetchClient with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::ClientBuild` if the HTTP client cannot be created
    pub fn new(config: &ClientConfig) -> DownloadResult<Self> {
        let client = config.build_http_client()?;
        tracing::debug!(
            "Created fetch client (timeout {:?}, chunk size {})",
            config.request_timeout,
            config.chunk_size
        );

        Ok(Self {
            client,
            chunk_size: config.chunk_size,
        })
    }

    /// Download one task to its destination and classify the result
    pub async fn fetch_to_file(&self, task: &DownloadTask) -> DownloadOutcome {
        DownloadHandler::new(&self.client, self.chunk_size)
            .fetch(task)
            .await
    }
}
