//! Integration tests for loading friendly-error settings from files and the
//! environment.

use reinhardt_friendly_conf::settings::{
	ENV_CATCH_ALL_EXCEPTIONS, ENV_CONFIG_PATH, ENV_VALIDATION_FAILED_CODE,
	ENV_VALIDATION_FAILED_MESSAGE,
};
use reinhardt_friendly_conf::{ErrorCode, FriendlySettings, SettingsError};
use rstest::*;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
	TempDir::new().expect("Failed to create temporary directory")
}

fn clear_env() {
	unsafe {
		env::remove_var(ENV_CONFIG_PATH);
		env::remove_var(ENV_CATCH_ALL_EXCEPTIONS);
		env::remove_var(ENV_VALIDATION_FAILED_CODE);
		env::remove_var(ENV_VALIDATION_FAILED_MESSAGE);
	}
}

#[rstest]
fn test_from_toml_file(temp_dir: TempDir) {
	// Arrange
	let path = temp_dir.path().join("errors.toml");
	fs::write(
		&path,
		r#"
validation_failed_code = "E_VALIDATION"

[field_errors.EmailField]
invalid = 7001

[field_errors.PhoneField]
invalid = 7002
required = 7003
"#,
	)
	.expect("Failed to write errors.toml");

	// Act
	let settings = FriendlySettings::from_file(&path).expect("Failed to load settings");

	// Assert
	assert_eq!(
		settings.validation_failed_code,
		ErrorCode::from("E_VALIDATION")
	);
	assert_eq!(
		settings.field_rule_code("EmailField", "invalid"),
		Some(&ErrorCode::Numeric(7001))
	);
	assert_eq!(
		settings.field_rule_code("EmailField", "required"),
		Some(&ErrorCode::Numeric(2031))
	);
	assert_eq!(
		settings.field_rule_code("PhoneField", "required"),
		Some(&ErrorCode::Numeric(7003))
	);
}

#[rstest]
fn test_from_json_file(temp_dir: TempDir) {
	// Arrange
	let path = temp_dir.path().join("errors.json");
	fs::write(
		&path,
		r#"{"catch_all_exceptions": true, "exception_codes": {"Throttled": 1999}}"#,
	)
	.expect("Failed to write errors.json");

	// Act
	let settings = FriendlySettings::from_file(&path).expect("Failed to load settings");

	// Assert
	assert!(settings.catch_all_exceptions);
	assert_eq!(
		settings.exception_code("Throttled"),
		Some(&ErrorCode::Numeric(1999))
	);
}

#[rstest]
fn test_unsupported_extension(temp_dir: TempDir) {
	let path = temp_dir.path().join("errors.yaml");
	fs::write(&path, "catch_all_exceptions: true").expect("Failed to write errors.yaml");

	let result = FriendlySettings::from_file(&path);

	assert!(matches!(result, Err(SettingsError::UnsupportedFormat(_))));
}

#[rstest]
fn test_missing_file(temp_dir: TempDir) {
	let result = FriendlySettings::from_file(temp_dir.path().join("missing.toml"));
	assert!(matches!(result, Err(SettingsError::FileError(_))));
}

#[rstest]
fn test_malformed_toml(temp_dir: TempDir) {
	let path = temp_dir.path().join("broken.toml");
	fs::write(&path, "field_errors = [").expect("Failed to write broken.toml");

	let result = FriendlySettings::from_file(&path);

	assert!(matches!(result, Err(SettingsError::ParseError(_))));
}

#[rstest]
#[serial]
fn test_from_env_scalars() {
	// Arrange
	clear_env();
	unsafe {
		env::set_var(ENV_CATCH_ALL_EXCEPTIONS, "true");
		env::set_var(ENV_VALIDATION_FAILED_CODE, "400");
		env::set_var(ENV_VALIDATION_FAILED_MESSAGE, "Bad input");
	}

	// Act
	let settings = FriendlySettings::from_env().expect("Failed to load settings");
	clear_env();

	// Assert
	assert!(settings.catch_all_exceptions);
	assert_eq!(settings.validation_failed_code, ErrorCode::Numeric(400));
	assert_eq!(settings.validation_failed_message, "Bad input");
}

#[rstest]
#[serial]
fn test_from_env_reads_config_file(temp_dir: TempDir) {
	// Arrange
	clear_env();
	let path = temp_dir.path().join("errors.toml");
	fs::write(&path, "non_field_errors_key = \"__all__\"").expect("Failed to write errors.toml");
	unsafe {
		env::set_var(ENV_CONFIG_PATH, &path);
		env::set_var(ENV_CATCH_ALL_EXCEPTIONS, "0");
	}

	// Act
	let settings = FriendlySettings::from_env().expect("Failed to load settings");
	clear_env();

	// Assert
	assert_eq!(settings.non_field_errors_key, "__all__");
	assert!(!settings.catch_all_exceptions);
}

#[rstest]
#[serial]
fn test_from_env_defaults() {
	clear_env();

	let settings = FriendlySettings::from_env().expect("Failed to load settings");

	assert_eq!(settings, FriendlySettings::default());
}
