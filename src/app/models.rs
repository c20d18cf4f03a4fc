//! Data models for GFS Fetcher
//!
//! This module defines the core data structures used throughout the application:
//! forecast cycles and offsets, request selection parameters, download tasks and
//! their per-task outcomes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the four daily GFS cycle start hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CycleHour {
    /// 00Z cycle
    H00,
    /// 06Z cycle
    H06,
    /// 12Z cycle
    H12,
    /// 18Z cycle
    H18,
}

impl CycleHour {
    /// All cycle hours in ascending order
    pub const ALL: [CycleHour; 4] = [Self::H00, Self::H06, Self::H12, Self::H18];

    /// Select the latest cycle that starts at or before `hour` (0..=23)
    pub fn latest_at_or_before(hour: u32) -> Self {
        Self::ALL
            .into_iter()
            .filter(|cycle| cycle.as_u32() <= hour)
            .max()
            .unwrap_or(Self::H00)
    }

    /// Numeric hour of day
    pub fn as_u32(&self) -> u32 {
        match self {
            Self::H00 => 0,
            Self::H06 => 6,
            Self::H12 => 12,
            Self::H18 => 18,
        }
    }

    /// Two-digit label used in paths and filenames (e.g., "06")
    pub fn label(&self) -> &'static str {
        match self {
            Self::H00 => "00",
            Self::H06 => "06",
            Self::H12 => "12",
            Self::H18 => "18",
        }
    }
}

impl fmt::Display for CycleHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A forecast run identified by its UTC base date and cycle hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cycle {
    /// UTC calendar date of the cycle
    pub date: NaiveDate,
    /// Cycle start hour
    pub hour: CycleHour,
}

impl Cycle {
    /// Create a new cycle
    pub fn new(date: NaiveDate, hour: CycleHour) -> Self {
        Self { date, hour }
    }

    /// Compact date used in server directories (e.g., "20240101")
    pub fn date_compact(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    /// ISO date used in log lines (e.g., "2024-01-01")
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Relative directory for this cycle: `YYYY/MM/DD/HH`
    pub fn relative_dir(&self) -> PathBuf {
        let mut path = PathBuf::new();
        path.push(self.date.format("%Y").to_string());
        path.push(self.date.format("%m").to_string());
        path.push(self.date.format("%d").to_string());
        path.push(self.hour.label());
        path
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}Z", self.date_iso(), self.hour)
    }
}

/// Offset in hours from a cycle's base time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ForecastHour(pub u32);

impl fmt::Display for ForecastHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Numeric bounding-box value, kept in the form it was configured in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionBound {
    /// Whole-degree bound
    Integer(i64),
    /// Fractional bound
    Float(f64),
}

impl fmt::Display for RegionBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
        }
    }
}

/// Variables, levels and region encoded into every request of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionParameters {
    /// Physical field names (e.g., "TMP")
    pub variables: BTreeSet<String>,
    /// Vertical level names (e.g., "2_m_above_ground")
    pub levels: BTreeSet<String>,
    /// Bounding-box query parameters (e.g., "toplat" -> 60)
    pub region: BTreeMap<String, RegionBound>,
}

impl SelectionParameters {
    /// Create selection parameters from configured lists
    pub fn new<V, L>(variables: V, levels: L, region: BTreeMap<String, RegionBound>) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            variables: variables.into_iter().map(Into::into).collect(),
            levels: levels.into_iter().map(Into::into).collect(),
            region,
        }
    }
}

/// A single file to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// Source URL
    pub url: String,
    /// Destination path of the finished file
    pub destination: PathBuf,
}

impl DownloadTask {
    /// Create a new task
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
        }
    }

    /// File name of the destination, for log messages
    pub fn file_name(&self) -> String {
        file_name_of(&self.destination)
    }
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Classification of a finished task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeStatus {
    Success,
    Warning,
    Failed,
    Error,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Failed => "FAILED",
            Self::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Result of executing one download task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Non-empty file written
    Success { file_name: String, bytes: u64 },
    /// File written but zero bytes long
    Warning { file_name: String },
    /// Server answered with a non-success status
    Failed { file_name: String, status: u16 },
    /// Request or write failed before a file could be produced
    Error { file_name: String, reason: String },
}

impl DownloadOutcome {
    /// Status of this outcome
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::Success { .. } => OutcomeStatus::Success,
            Self::Warning { .. } => OutcomeStatus::Warning,
            Self::Failed { .. } => OutcomeStatus::Failed,
            Self::Error { .. } => OutcomeStatus::Error,
        }
    }

    /// Name of the file this outcome refers to
    pub fn file_name(&self) -> &str {
        match self {
            Self::Success { file_name, .. }
            | Self::Warning { file_name }
            | Self::Failed { file_name, .. }
            | Self::Error { file_name, .. } => file_name,
        }
    }

    /// Human-readable message for progress logs
    pub fn message(&self) -> String {
        match self {
            Self::Success { file_name, .. } => format!("Downloaded: {}", file_name),
            Self::Warning { file_name } => format!("Downloaded but empty: {}", file_name),
            Self::Failed { file_name, status } => {
                format!("Status {} for {}", status, file_name)
            }
            Self::Error { file_name, reason } => {
                format!("Request failed for {} ({})", file_name, reason)
            }
        }
    }

    /// Check if the outcome produced a usable file
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Progress notification emitted once per finished task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskProgress {
    /// Tasks finished so far, including this one
    pub completed: usize,
    /// Tasks in the batch
    pub total: usize,
    /// Outcome of the task that just finished
    pub outcome: DownloadOutcome,
}
