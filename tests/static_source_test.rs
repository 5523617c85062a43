// ==========================================
// 内存数据源文件加载测试
// ==========================================

mod helpers;

use helpers::report_builder::ward_reports;
use infection_reports::{
    FetchError, ListReportController, RefreshOutcome, ReportDataSource, StaticReportSource,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn write_reports_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn load_error(path: &std::path::Path) -> FetchError {
    match StaticReportSource::from_json_file(path) {
        Ok(_) => panic!("expected loading {} to fail", path.display()),
        Err(err) => err,
    }
}

#[tokio::test]
async fn test_load_reports_from_file() {
    let file = write_reports_file(&serde_json::to_string(&ward_reports()).unwrap());

    let source = StaticReportSource::from_json_file(file.path()).unwrap();

    assert_eq!(source.fetch_reports().await.unwrap(), ward_reports());
}

#[tokio::test]
async fn test_backend_payload_without_ids() {
    let file = write_reports_file(
        r#"[
            {
                "employeeName": "John Smith",
                "healthPracticeName": "Hand Hygiene",
                "precautionTypeName": "Standard",
                "locationLabel": "USC Unit 2 Room 123",
                "timestamp": "2026-05-18T09:00:00Z"
            }
        ]"#,
    );

    let source = StaticReportSource::from_json_file(file.path()).unwrap();
    let controller = ListReportController::new(Arc::new(source));

    assert_eq!(
        controller.refresh_and_wait().await,
        RefreshOutcome::Applied { count: 1 }
    );
    let reports = controller.all_reports();
    assert_eq!(reports[0].employee_name(), "John Smith");
    assert!(reports[0].id().is_none());
}

#[test]
fn test_malformed_file_is_parse_error() {
    let file = write_reports_file(r#"[{ "employeeName": "John Smith" }"#);
    assert!(matches!(load_error(file.path()), FetchError::Parse(_)));
}

#[test]
fn test_missing_file_is_network_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.json");
    assert!(matches!(load_error(&path), FetchError::Network(_)));
}
