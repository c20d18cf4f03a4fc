//! File download operations with atomic writes and streaming
//!
//! A response body is streamed chunk by chunk into a temporary file next to
//! the destination and renamed into place once complete, so an interrupted
//! transfer never leaves a truncated file under the final name.

use std::path::{Path, PathBuf};

use reqwest::{Client, Response};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;
use url::Url;

use crate::app::models::{DownloadOutcome, DownloadTask};
use crate::constants::files;
use crate::errors::{DownloadError, DownloadResult};

/// File download operations handler
pub struct DownloadHandler<'a> {
    client: &'a Client,
    chunk_size: usize,
}

impl<'a> DownloadHandler<'a> {
    /// Creates a new DownloadHandler over the given HTTP client
    pub fn new(client: &'a Client, chunk_size: usize) -> Self {
        Self {
            client,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Execute one task and classify the result
    ///
    /// Never fails: transport and local I/O problems become
    /// `DownloadOutcome::Error`, non-success statuses `DownloadOutcome::Failed`.
    pub async fn fetch(&self, task: &DownloadTask) -> DownloadOutcome {
        let file_name = task.file_name();

        match self.download_file(&task.url, &task.destination).await {
            Ok(bytes) if bytes > 0 => DownloadOutcome::Success { file_name, bytes },
            Ok(_) => DownloadOutcome::Warning { file_name },
            Err(DownloadError::ServerError { status }) => {
                DownloadOutcome::Failed { file_name, status }
            }
            Err(e) => DownloadOutcome::Error {
                file_name,
                reason: e.to_string(),
            },
        }
    }

    /// Downloads `url` to `destination`, returning the size of the written file
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL cannot be parsed
    /// - The server answers with a non-success status (nothing is written)
    /// - The request or body stream fails, including timeouts
    /// - File I/O operations fail
    pub async fn download_file(&self, url: &str, destination: &Path) -> DownloadResult<u64> {
        let parsed_url = Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
            url: url.to_string(),
            error: e.to_string(),
        })?;

        let mut response = self.client.get(parsed_url).send().await?;

        if !response.status().is_success() {
            return Err(DownloadError::ServerError {
                status: response.status().as_u16(),
            });
        }

        // Create parent directory if it doesn't exist
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = temp_path_for(destination);
        let written = match self.stream_body(&mut response, &temp_path).await {
            Ok(written) => written,
            Err(e) => {
                let _ = tokio::fs::remove_file(&temp_path).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&temp_path, destination).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        let size = tokio::fs::metadata(destination).await?.len();
        debug!(
            "Wrote {} bytes ({} streamed) to {}",
            size,
            written,
            destination.display()
        );
        Ok(size)
    }

    /// Stream the response body into `temp_path`
    async fn stream_body(&self, response: &mut Response, temp_path: &Path) -> DownloadResult<u64> {
        let file = File::create(temp_path).await?;
        let mut writer = BufWriter::with_capacity(self.chunk_size, file);
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        writer.flush().await?;
        Ok(written)
    }
}

/// Temporary sibling path used while a download is in flight
pub fn temp_path_for(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(files::TEMP_FILE_SUFFIX);
    destination.with_file_name(name)
}
