//! Coordinator tests against a mock filter endpoint

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::app::models::CycleHour;

/// Reporter remembering every notification it receives
#[derive(Default)]
struct RecordingReporter {
    started: Mutex<Option<usize>>,
    lines: Mutex<Vec<String>>,
    finished: Mutex<bool>,
}

impl ProgressReporter for RecordingReporter {
    fn batch_started(&self, total: usize) {
        *self.started.lock().unwrap() = Some(total);
    }

    fn task_finished(&self, progress: &TaskProgress) {
        self.lines.lock().unwrap().push(format_progress(progress));
    }

    fn batch_finished(&self) {
        *self.finished.lock().unwrap() = true;
    }
}

fn test_config(server: &MockServer, base: &TempDir) -> CoordinatorConfig {
    let mut config = CoordinatorConfig::new(format!("{}/filter_gfs_0p25.pl", server.uri()))
        .with_base_folder(base.path())
        .with_forecast(6, 3)
        .with_worker_count(2);
    config.loc = "test".to_string();
    config
}

fn ten_am() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
}

/// Test a full run followed by an idempotent re-run
///
/// With delay 4h at 10:00Z the 06Z cycle is fetched. The second run must
/// find every file on disk and schedule nothing.
#[tokio::test]
async fn test_run_then_rerun_is_noop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/filter_gfs_0p25.pl"))
        .and(query_param("dir", "/gfs.20240101/06/atmos"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"GRIB".to_vec()))
        .expect(3)
        .mount(&server)
        .await;

    let base = TempDir::new().unwrap();
    let coordinator = Coordinator::new(test_config(&server, &base)).unwrap();

    let first = coordinator.run_at(ten_am()).await.unwrap();
    assert_eq!(first.cycle.hour, CycleHour::H06);
    assert_eq!(first.target_dir, base.path().join("gfs/test/2024/01/01/06"));
    assert_eq!(first.stats.total_links, 3);
    assert_eq!(first.stats.files_succeeded, 3);
    assert_eq!(first.stats.total_bytes_downloaded, 12);
    assert!(first.is_verified());

    let second = coordinator.run_at(ten_am()).await.unwrap();
    assert_eq!(second.stats.files_skipped, 3);
    assert_eq!(second.stats.files_scheduled, 0);
    assert!(second.outcomes.is_empty());
    assert!(second.is_verified());
}

/// Test that failed files surface in verification, not as a run error
#[tokio::test]
async fn test_failed_file_reported_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("file", "gfs.t06z.pgrb2.0p25.f003"))
        .respond_with(ResponseTemplate::new(404))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"GRIB".to_vec()))
        .mount(&server)
        .await;

    let base = TempDir::new().unwrap();
    let reporter = Arc::new(RecordingReporter::default());
    let coordinator = Coordinator::new(test_config(&server, &base))
        .unwrap()
        .with_reporter(reporter.clone());

    let result = coordinator.run_at(ten_am()).await.unwrap();

    assert_eq!(result.stats.files_succeeded, 2);
    assert_eq!(result.stats.files_failed, 1);
    let report = result.verification.as_ref().unwrap();
    assert!(report
        .missing
        .contains("gfs.t06z.pgrb2.0p25.f003"));
    assert!(!result.is_verified());

    assert_eq!(*reporter.started.lock().unwrap(), Some(3));
    assert!(*reporter.finished.lock().unwrap());
    let lines = reporter.lines.lock().unwrap();
    assert_eq!(lines.len(), 3);
    assert!(lines
        .iter()
        .any(|l| l.ends_with("Status 404 for gfs.t06z.pgrb2.0p25.f003")));
    assert!(lines[2].starts_with("(3/3)"));
}

/// Test that empty bodies are scheduled again on the next run
#[tokio::test]
async fn test_empty_file_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"GRIB".to_vec()))
        .mount(&server)
        .await;

    let base = TempDir::new().unwrap();
    let coordinator = Coordinator::new(test_config(&server, &base)).unwrap();

    let first = coordinator.run_at(ten_am()).await.unwrap();
    assert_eq!(first.stats.files_warned, 3);
    assert_eq!(first.verification.as_ref().unwrap().empty.len(), 3);

    let second = coordinator.run_at(ten_am()).await.unwrap();
    assert_eq!(second.stats.files_scheduled, 3);
    assert_eq!(second.stats.files_succeeded, 3);
    assert!(second.is_verified());
}

#[test]
fn test_invalid_config_rejected() {
    let config = CoordinatorConfig::new("ftp://example.com/filter");
    assert!(matches!(
        Coordinator::new(config),
        Err(crate::errors::AppError::Config(_))
    ));
}
