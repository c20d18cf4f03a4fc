//! Completeness and integrity checking of a downloaded cycle
//!
//! Verification re-reads the target directory instead of trusting per-task
//! outcomes, so it also catches files removed or truncated after the fact.

use std::collections::BTreeSet;
use std::path::Path;

use tokio::fs;
use tracing::{error, info, warn};

use crate::errors::{VerificationError, VerificationResult};

/// Result of checking a directory against the expected file set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// Expected files not present in the directory
    pub missing: BTreeSet<String>,
    /// Files present in the directory with zero length
    pub empty: BTreeSet<String>,
    /// Directory entries examined
    pub files_checked: usize,
}

impl VerificationReport {
    /// Create a new empty verification report
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if every expected file is present
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Check if verification passed (nothing missing, nothing empty)
    pub fn is_successful(&self) -> bool {
        self.missing.is_empty() && self.empty.is_empty()
    }

    /// Log the completeness and integrity checks
    pub fn log_summary(&self) {
        if self.missing.is_empty() {
            info!("Completeness Check: PASSED. All expected files are present.");
        } else {
            error!(
                "Completeness Check: FAILED. Found {} missing file(s).",
                self.missing.len()
            );
            for file_name in &self.missing {
                error!("  - MISSING: {}", file_name);
            }
        }

        if self.empty.is_empty() {
            info!("Integrity Check: PASSED. No empty files found.");
        } else {
            for file_name in &self.empty {
                warn!("Integrity Check: FAILED. File is empty: {}", file_name);
            }
            warn!("Integrity Check: Found {} empty file(s).", self.empty.len());
        }
    }
}

/// Compare `target_dir` against the expected filenames
///
/// # Errors
///
/// Returns `VerificationError::DirectoryNotFound` if `target_dir` is not a
/// directory, and `VerificationError::Io` if it cannot be listed. Files whose
/// metadata cannot be read are logged and left out of the empty check.
pub async fn verify<I, S>(target_dir: &Path, expected: I) -> VerificationResult<VerificationReport>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let is_dir = fs::metadata(target_dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(VerificationError::DirectoryNotFound {
            path: target_dir.to_path_buf(),
        });
    }

    let io_error = |source| VerificationError::Io {
        path: target_dir.to_path_buf(),
        source,
    };

    let mut report = VerificationReport::new();
    let mut actual = BTreeSet::new();
    let mut entries = fs::read_dir(target_dir).await.map_err(io_error)?;

    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        report.files_checked += 1;

        match entry.metadata().await {
            Ok(metadata) if metadata.is_file() && metadata.len() == 0 => {
                report.empty.insert(file_name.clone());
            }
            Ok(_) => {}
            Err(e) => error!("Could not check size of {}: {}", file_name, e),
        }

        actual.insert(file_name);
    }

    report.missing = expected
        .into_iter()
        .map(Into::into)
        .filter(|name| !actual.contains(name))
        .collect();

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_and_empty_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("A"), b"data").unwrap();
        std::fs::write(temp_dir.path().join("C"), b"").unwrap();

        let report = verify(temp_dir.path(), ["A", "B", "C"]).await.unwrap();

        assert_eq!(report.missing, BTreeSet::from(["B".to_string()]));
        assert_eq!(report.empty, BTreeSet::from(["C".to_string()]));
        assert_eq!(report.files_checked, 2);
        assert!(!report.is_complete());
        assert!(!report.is_successful());
    }

    #[tokio::test]
    async fn test_complete_directory_passes() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["gfs.t06z.pgrb2.0p25.f000", "gfs.t06z.pgrb2.0p25.f003"] {
            std::fs::write(temp_dir.path().join(name), b"GRIB").unwrap();
        }

        let report = verify(
            temp_dir.path(),
            vec!["gfs.t06z.pgrb2.0p25.f000", "gfs.t06z.pgrb2.0p25.f003"],
        )
        .await
        .unwrap();

        assert!(report.is_successful());
        report.log_summary();
    }

    #[tokio::test]
    async fn test_unexpected_empty_files_are_reported() {
        // Every file in the directory is scanned, not only expected ones
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("expected"), b"x").unwrap();
        std::fs::write(temp_dir.path().join("stray"), b"").unwrap();

        let report = verify(temp_dir.path(), ["expected"]).await.unwrap();

        assert!(report.is_complete());
        assert_eq!(report.empty, BTreeSet::from(["stray".to_string()]));
    }

    #[tokio::test]
    async fn test_missing_directory_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = verify(&temp_dir.path().join("absent"), ["A"]).await;

        assert!(matches!(
            result,
            Err(VerificationError::DirectoryNotFound { .. })
        ));
    }
}
