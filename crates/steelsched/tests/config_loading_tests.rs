//! Configuration loading integration tests.
//!
//! Tests the config loading APIs:
//! - from_file() with TOML/YAML/JSON
//! - discover() for searching parent directories
//! - Error handling for invalid configs

use steelsched::SteelschedError;
use steelsched::core::config::ValidationConfig;
use std::fs;
use tempfile::TempDir;

/// Test loading config from TOML file.
#[test]
fn test_from_file_toml_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
cross_row_checks = true
min_higher_qty_siblings = 3
context_corrections = true
"#;

    fs::write(&config_path, toml_content).unwrap();

    let config = ValidationConfig::from_file(&config_path);
    assert!(config.is_ok(), "Should load TOML config successfully");

    let config = config.unwrap();
    assert_eq!(config.min_higher_qty_siblings, 3);
    assert!(config.context_corrections);
    assert!(config.annotate_confidence, "Unset options keep their defaults");
}

/// Test loading config from YAML file.
#[test]
fn test_from_file_yaml_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");

    let yaml_content = r#"
review_flags: false
annotate_confidence: false
"#;

    fs::write(&config_path, yaml_content).unwrap();

    let config = ValidationConfig::from_file(&config_path).unwrap();
    assert!(!config.review_flags);
    assert!(!config.annotate_confidence);
    assert!(config.cross_row_checks);
}

/// Test loading config from JSON file.
#[test]
fn test_from_file_json_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");

    fs::write(&config_path, r#"{"cross_row_checks": false}"#).unwrap();

    let config = ValidationConfig::from_file(&config_path).unwrap();
    assert!(!config.cross_row_checks);
}

/// Test an empty file yields the defaults.
#[test]
fn test_empty_toml_is_default() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("steelsched.toml");
    fs::write(&config_path, "").unwrap();

    let config = ValidationConfig::from_toml_file(&config_path).unwrap();
    assert_eq!(config, ValidationConfig::default());
}

/// Test loading from a missing file fails with the path in the message.
#[test]
fn test_from_file_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("missing.toml");

    let err = ValidationConfig::from_file(&config_path).unwrap_err();
    assert!(matches!(err, SteelschedError::Validation { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

/// Test malformed TOML is reported as a validation error.
#[test]
fn test_from_file_invalid_toml_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "cross_row_checks = [[[").unwrap();

    let err = ValidationConfig::from_file(&config_path).unwrap_err();
    assert!(matches!(err, SteelschedError::Validation { .. }));
    assert!(err.to_string().contains("Invalid TOML"));
}

/// Test wrong value types are rejected.
#[test]
fn test_from_file_wrong_type_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    fs::write(&config_path, r#"{"min_higher_qty_siblings": "two"}"#).unwrap();

    let err = ValidationConfig::from_file(&config_path).unwrap_err();
    assert!(err.to_string().contains("Invalid JSON"));
}

/// Test unsupported extensions are rejected.
#[test]
fn test_from_file_unsupported_extension_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.ini");
    fs::write(&config_path, "cross_row_checks=false").unwrap();

    let err = ValidationConfig::from_file(&config_path).unwrap_err();
    assert!(err.to_string().contains("Unsupported config file format"));
}

/// Test discover() finds config in current directory.
#[test]
#[serial_test::serial]
fn test_discover_finds_config_in_current_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("steelsched.toml");

    fs::write(&config_path, "cross_row_checks = false\n").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let result = ValidationConfig::discover();

    std::env::set_current_dir(original_dir).unwrap();

    assert!(result.is_ok(), "Discover should succeed");
    let config = result.unwrap();
    assert!(config.is_some(), "Should find config in current directory");
    assert!(!config.unwrap().cross_row_checks);
}

/// Test discover() finds config in parent directory.
#[test]
#[serial_test::serial]
fn test_discover_finds_config_in_parent_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("steelsched.toml");

    fs::write(&config_path, "context_corrections = true\n").unwrap();

    let sub_dir = temp_dir.path().join("subdir");
    fs::create_dir(&sub_dir).unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(&sub_dir).unwrap();

    let result = ValidationConfig::discover();

    std::env::set_current_dir(original_dir).unwrap();

    let config = result.unwrap();
    assert!(config.is_some(), "Should find config in parent directory");
    assert!(config.unwrap().context_corrections);
}

/// Test discover() ignores other file names.
#[test]
#[serial_test::serial]
fn test_discover_ignores_other_names() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("steelsched.yaml"), "review_flags: false\n").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let result = ValidationConfig::discover();

    std::env::set_current_dir(original_dir).unwrap();

    let config = result.unwrap();
    assert!(config.is_none_or(|config| config.review_flags));
}

/// Test discover() surfaces errors from a broken config file.
#[test]
#[serial_test::serial]
fn test_discover_reports_broken_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("steelsched.toml"), "min_higher_qty_siblings = 0\n").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let result = ValidationConfig::discover();

    std::env::set_current_dir(original_dir).unwrap();

    assert!(matches!(result, Err(SteelschedError::Validation { .. })));
}
