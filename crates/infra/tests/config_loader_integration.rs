//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use kinvey_domain::KinveyError;
use kinvey_infra::config;
use tempfile::Builder;

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "app_key": "kid_integration",
        "app_secret": "s3cret",
        "base_url": "https://kinvey.example.test",
        "timeout_secs": 10,
        "max_attempts": 3
    }"#;

    let mut file = Builder::new().suffix(".json").tempfile().expect("Failed to create temp file");
    file.write_all(json_content.as_bytes()).expect("Failed to write to temp file");

    let config = config::load_from_file(Some(file.path().to_path_buf()))
        .expect("Failed to load config from JSON file");

    assert_eq!(config.app_key, "kid_integration");
    assert_eq!(config.app_secret, "s3cret");
    assert_eq!(config.normalized_base_url(), "https://kinvey.example.test/");
    assert_eq!(config.api_version, 3);
    assert_eq!(config.timeout_secs, 10);
    assert_eq!(config.max_attempts, 3);
}

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
app_key = "kid_toml"
app_secret = "toml-secret"
"#;

    let mut file = Builder::new().suffix(".toml").tempfile().expect("Failed to create temp file");
    file.write_all(toml_content.as_bytes()).expect("Failed to write to temp file");

    let config = config::load_from_file(Some(file.path().to_path_buf()))
        .expect("Failed to load config from TOML file");

    assert_eq!(config.app_key, "kid_toml");
    assert_eq!(config.base_url, "https://baas.kinvey.com/");
    assert_eq!(config.max_attempts, 1);
}

#[test]
fn test_blank_secret_in_file_is_rejected() {
    let mut file = Builder::new().suffix(".json").tempfile().expect("Failed to create temp file");
    file.write_all(br#"{"app_key": "kid_app", "app_secret": ""}"#)
        .expect("Failed to write to temp file");

    let err = config::load_from_file(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, KinveyError::Config(_)));
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let mut file = Builder::new().suffix(".yaml").tempfile().expect("Failed to create temp file");
    file.write_all(b"app_key: kid_app").expect("Failed to write to temp file");

    let err = config::load_from_file(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, KinveyError::Config(ref msg) if msg.contains("yaml")));
}
