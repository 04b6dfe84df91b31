use std::io::Write;
use wristnote_core::{ConfigError, NotifyConfig, PageMetrics};

#[test]
fn defaults_match_reference_display() {
    let config = NotifyConfig::default();

    assert_eq!(config.notify_duration_ms, 500);
    assert_eq!(config.ring_interval_ms, 1000);
    assert_eq!(config.page_metrics(), PageMetrics::default());
    config.validate().expect("defaults are valid");
}

#[test]
fn partial_documents_keep_defaults() {
    let config = NotifyConfig::from_json_str(r#"{"notify_duration_ms": 250}"#).unwrap();

    assert_eq!(config.notify_duration_ms, 250);
    assert_eq!(config.lines_per_page, 9);
    assert_eq!(config.bottom_margin_px, 216);
}

#[test]
fn rejects_unusable_geometry() {
    for raw in [
        r#"{"lines_per_page": 0}"#,
        r#"{"display_width_px": 0}"#,
        r#"{"line_height_px": 0}"#,
        r#"{"bottom_margin_px": 240}"#,
        r#"{"bottom_margin_px": 100}"#,
    ] {
        let err = NotifyConfig::from_json_str(raw).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "accepted {raw}");
    }
}

#[test]
fn reports_parse_and_io_failures() {
    assert!(matches!(
        NotifyConfig::from_json_str("{not json"),
        Err(ConfigError::Parse(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        NotifyConfig::load(dir.path().join("missing.json")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"ring_interval_ms": 750, "line_height_px": 20}}"#).unwrap();

    let config = NotifyConfig::load(file.path()).unwrap();

    assert_eq!(config.ring_interval_ms, 750);
    assert_eq!(config.page_metrics().line_height_px, 20);
}
