// ==========================================
// 运行配置加载测试
// ==========================================

use infection_reports::config::report_list_config::config_keys;
use infection_reports::{ConfigurationError, FilterCriterion, ReportListConfig};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_config_from_file() {
    let file = write_config(
        r#"{ "search_debounce_ms": 300, "preselected_precaution": "Contact", "locale": "zh-CN" }"#,
    );

    let config = ReportListConfig::from_json_file(file.path()).unwrap();

    assert_eq!(config.search_debounce(), Duration::from_millis(300));
    assert_eq!(config.locale, "zh-CN");
    assert_eq!(
        config.initial_selection(),
        vec![FilterCriterion::precaution_type("Contact")]
    );
}

#[test]
fn test_missing_fields_use_defaults() {
    let file = write_config("{}");
    let config = ReportListConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config, ReportListConfig::default());
    assert!(config.initial_selection().is_empty());
}

#[test]
fn test_malformed_file_is_json_error() {
    let file = write_config("{ search_debounce_ms: ");
    let err = ReportListConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigurationError::Json(_)));
}

#[test]
fn test_zero_debounce_is_rejected() {
    let file = write_config(r#"{ "search_debounce_ms": 0 }"#);
    let err = ReportListConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidValue { .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReportListConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigurationError::Io(_)));
}

#[test]
fn test_overrides_apply_on_top_of_file() {
    let file = write_config(r#"{ "search_debounce_ms": 300 }"#);
    let config = ReportListConfig::from_json_file(file.path())
        .unwrap()
        .with_overrides(|key| match key {
            k if k == config_keys::ENV_SEARCH_DEBOUNCE_MS => Some("750".to_string()),
            k if k == config_keys::ENV_PRESELECTED_PRECAUTION => Some(" Droplet ".to_string()),
            _ => None,
        });

    assert_eq!(config.search_debounce_ms, 750);
    assert_eq!(config.preselected_precaution.as_deref(), Some("Droplet"));
    assert_eq!(config.locale, "en");
}
