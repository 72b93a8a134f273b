use docupright::orientation::DetectionMode;
use docupright::utils::config::AppConfig;
use docupright::utils::ConfigError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[test]
fn test_parse_config_from_json() {
    let json = r#"{
        "detection_mode": "relative",
        "min_fragment_chars": 5,
        "metadata_fallback": true,
        "reset_per_document": true,
        "output_directory": "fixed",
        "output_suffix": "_upright"
    }"#;

    let config: AppConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.detection_mode, DetectionMode::Relative);
    assert_eq!(config.min_fragment_chars, 5);
    assert!(config.metadata_fallback);
    assert!(config.reset_per_document);
    assert_eq!(&*config.output_directory, "fixed");
    assert_eq!(&*config.output_suffix, "_upright");
}

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let json = r#"{
        "detection_mode": "absolute",
        "output_directory": "out"
    }"#;
    temp_file.write_all(json.as_bytes()).unwrap();

    let config = AppConfig::from_file(temp_file.path()).unwrap();

    assert_eq!(config.detection_mode, DetectionMode::Absolute);
    assert_eq!(&*config.output_directory, "out");
}

#[test]
fn test_default_config() {
    let config = AppConfig::default();

    assert_eq!(config.detection_mode, DetectionMode::Auto);
    assert_eq!(config.min_fragment_chars, 3);
    assert!(!config.metadata_fallback);
    assert!(!config.reset_per_document);
    assert_eq!(&*config.output_directory, "corrected");
    assert_eq!(&*config.output_suffix, "_corrected");
}

#[test]
fn test_missing_fields_use_defaults() {
    let config: AppConfig = serde_json::from_str(r#"{ "min_fragment_chars": 4 }"#).unwrap();

    assert_eq!(config.min_fragment_chars, 4);
    assert_eq!(
        config,
        AppConfig {
            min_fragment_chars: 4,
            ..AppConfig::default()
        }
    );

    let empty: AppConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, AppConfig::default());
}

#[test]
fn test_invalid_config_is_rejected() {
    let result: Result<AppConfig, _> =
        serde_json::from_str(r#"{ "detection_mode": "sideways" }"#);
    assert!(result.is_err());

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"{ not json").unwrap();
    assert!(matches!(
        AppConfig::from_file(temp_file.path()),
        Err(ConfigError::Parse { .. })
    ));

    assert!(matches!(
        AppConfig::from_file("does/not/exist.json"),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_output_path_naming() {
    let config = AppConfig::default();
    let dir = Path::new("corrected");

    assert_eq!(
        config.output_path(dir, Path::new("scans/invoice.pdf")),
        PathBuf::from("corrected/invoice_corrected.pdf")
    );
    assert_eq!(
        config.output_path(dir, Path::new("report.v2.PDF")),
        PathBuf::from("corrected/report.v2_corrected.PDF")
    );
    assert_eq!(
        config.output_path(dir, Path::new("notes")),
        PathBuf::from("corrected/notes_corrected")
    );
}

#[test]
fn test_output_path_uses_configured_suffix() {
    let config = AppConfig {
        output_suffix: "".into(),
        ..AppConfig::default()
    };

    assert_eq!(
        config.output_path(Path::new("out"), Path::new("a.pdf")),
        PathBuf::from("out/a.pdf")
    );
}
