//! Friendly-error settings
//!
//! Settings start from the built-in catalog and can be overlaid from a TOML
//! or JSON file and from environment variables. Once built they are only
//! read; share them by reference or behind an `Arc`.

use crate::catalog::{
	self, CodeTable, FieldErrorTable, INVALID_DATA_MESSAGE, NON_FIELD_ERRORS_KEY,
	VALIDATION_FAILED_CODE, VALIDATION_FAILED_MESSAGE,
};
use crate::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a settings file to overlay on the defaults
pub const ENV_CONFIG_PATH: &str = "FRIENDLY_ERRORS_CONFIG";
/// Environment variable overriding [`FriendlySettings::catch_all_exceptions`]
pub const ENV_CATCH_ALL_EXCEPTIONS: &str = "FRIENDLY_ERRORS_CATCH_ALL_EXCEPTIONS";
/// Environment variable overriding [`FriendlySettings::validation_failed_code`]
pub const ENV_VALIDATION_FAILED_CODE: &str = "FRIENDLY_ERRORS_VALIDATION_FAILED_CODE";
/// Environment variable overriding [`FriendlySettings::validation_failed_message`]
pub const ENV_VALIDATION_FAILED_MESSAGE: &str = "FRIENDLY_ERRORS_VALIDATION_FAILED_MESSAGE";

/// Settings controlling how validation errors are coded
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendlySettings {
	/// Rule codes per field type name
	#[serde(default = "catalog::default_field_errors")]
	pub field_errors: FieldErrorTable,

	/// Object-level rule codes
	#[serde(default = "catalog::default_non_field_errors")]
	pub non_field_errors: CodeTable,

	/// Codes for custom validators and `validate_<field>` hooks
	#[serde(default = "catalog::default_validator_errors")]
	pub validator_errors: CodeTable,

	/// Codes for API exceptions, keyed by exception name
	#[serde(default = "catalog::default_exception_codes")]
	pub exception_codes: CodeTable,

	/// Code of the envelope wrapping field errors
	#[serde(default = "default_validation_failed_code")]
	pub validation_failed_code: ErrorCode,

	/// Message of the envelope wrapping field errors
	#[serde(default = "default_validation_failed_message")]
	pub validation_failed_message: String,

	/// Template of the "payload is not an object" error
	#[serde(default = "default_invalid_data_message")]
	pub invalid_data_message: String,

	/// Reserved key holding object-level errors
	#[serde(default = "default_non_field_errors_key")]
	pub non_field_errors_key: String,

	/// Coerce errors without a native API response into the envelope shape
	#[serde(default)]
	pub catch_all_exceptions: bool,
}

fn default_validation_failed_code() -> ErrorCode {
	ErrorCode::Numeric(VALIDATION_FAILED_CODE)
}

fn default_validation_failed_message() -> String {
	VALIDATION_FAILED_MESSAGE.to_string()
}

fn default_invalid_data_message() -> String {
	INVALID_DATA_MESSAGE.to_string()
}

fn default_non_field_errors_key() -> String {
	NON_FIELD_ERRORS_KEY.to_string()
}

impl Default for FriendlySettings {
	fn default() -> Self {
		Self {
			field_errors: catalog::default_field_errors(),
			non_field_errors: catalog::default_non_field_errors(),
			validator_errors: catalog::default_validator_errors(),
			exception_codes: catalog::default_exception_codes(),
			validation_failed_code: default_validation_failed_code(),
			validation_failed_message: default_validation_failed_message(),
			invalid_data_message: default_invalid_data_message(),
			non_field_errors_key: default_non_field_errors_key(),
			catch_all_exceptions: false,
		}
	}
}

/// Partial settings read from a file; present values overlay the defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsOverrides {
	field_errors: Option<FieldErrorTable>,
	non_field_errors: Option<CodeTable>,
	validator_errors: Option<CodeTable>,
	exception_codes: Option<CodeTable>,
	validation_failed_code: Option<ErrorCode>,
	validation_failed_message: Option<String>,
	invalid_data_message: Option<String>,
	non_field_errors_key: Option<String>,
	catch_all_exceptions: Option<bool>,
}

impl FriendlySettings {
	/// Load settings from a `.toml` or `.json` overrides file
	///
	/// Field-error tables are merged per field type, flat code tables per key,
	/// and scalar values replace the defaults.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml_str(&contents),
			Some("json") => Self::from_json_str(&contents),
			_ => Err(SettingsError::UnsupportedFormat(
				"Supported formats: .toml, .json".to_string(),
			)),
		}
	}

	/// Build settings from TOML overrides
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_friendly_conf::{ErrorCode, FriendlySettings};
	///
	/// let settings = FriendlySettings::from_toml_str(r#"
	/// catch_all_exceptions = true
	///
	/// [field_errors.CharField]
	/// blank = 9000
	/// "#).unwrap();
	///
	/// assert!(settings.catch_all_exceptions);
	/// assert_eq!(settings.field_errors["CharField"]["blank"], ErrorCode::Numeric(9000));
	/// // Rules not mentioned keep their built-in codes
	/// assert_eq!(settings.field_errors["CharField"]["required"], ErrorCode::Numeric(2021));
	/// ```
	pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
		let overrides: SettingsOverrides = toml::from_str(contents)
			.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?;
		Self::from_overrides(overrides)
	}

	/// Build settings from JSON overrides
	pub fn from_json_str(contents: &str) -> Result<Self, SettingsError> {
		let overrides: SettingsOverrides = serde_json::from_str(contents)
			.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e)))?;
		Self::from_overrides(overrides)
	}

	/// Load settings from environment variables
	///
	/// Reads the file named by `FRIENDLY_ERRORS_CONFIG` first when set, then
	/// applies the scalar overrides.
	pub fn from_env() -> Result<Self, SettingsError> {
		let mut settings = match std::env::var(ENV_CONFIG_PATH) {
			Ok(path) => Self::from_file(PathBuf::from(path))?,
			Err(_) => Self::default(),
		};

		if let Ok(flag) = std::env::var(ENV_CATCH_ALL_EXCEPTIONS) {
			settings.catch_all_exceptions = flag.to_lowercase() == "true" || flag == "1";
		}

		if let Ok(code) = std::env::var(ENV_VALIDATION_FAILED_CODE) {
			settings.validation_failed_code = ErrorCode::parse(&code);
		}

		if let Ok(message) = std::env::var(ENV_VALIDATION_FAILED_MESSAGE) {
			settings.validation_failed_message = message;
		}

		settings.validate()?;
		Ok(settings)
	}

	fn from_overrides(overrides: SettingsOverrides) -> Result<Self, SettingsError> {
		let mut settings = Self::default();

		if let Some(field_errors) = overrides.field_errors {
			settings.merge_field_errors(field_errors);
		}
		if let Some(codes) = overrides.non_field_errors {
			settings.non_field_errors.extend(codes);
		}
		if let Some(codes) = overrides.validator_errors {
			settings.validator_errors.extend(codes);
		}
		if let Some(codes) = overrides.exception_codes {
			settings.exception_codes.extend(codes);
		}
		if let Some(code) = overrides.validation_failed_code {
			settings.validation_failed_code = code;
		}
		if let Some(message) = overrides.validation_failed_message {
			settings.validation_failed_message = message;
		}
		if let Some(message) = overrides.invalid_data_message {
			settings.invalid_data_message = message;
		}
		if let Some(key) = overrides.non_field_errors_key {
			settings.non_field_errors_key = key;
		}
		if let Some(flag) = overrides.catch_all_exceptions {
			settings.catch_all_exceptions = flag;
		}

		settings.validate()?;
		Ok(settings)
	}

	/// Merge user field-error codes into the current table
	///
	/// Unknown field types are added as a whole; for known types each rule
	/// code is inserted or replaced individually.
	///
	/// # Examples
	///
	/// ```
	/// use indexmap::IndexMap;
	/// use reinhardt_friendly_conf::{ErrorCode, FriendlySettings};
	///
	/// let mut settings = FriendlySettings::default();
	/// let mut rules = IndexMap::new();
	/// rules.insert("invalid".to_string(), ErrorCode::from("E_PHONE"));
	/// let mut user = IndexMap::new();
	/// user.insert("PhoneField".to_string(), rules);
	///
	/// settings.merge_field_errors(user);
	/// assert_eq!(
	///     settings.field_rule_code("PhoneField", "invalid"),
	///     Some(&ErrorCode::from("E_PHONE"))
	/// );
	/// ```
	pub fn merge_field_errors(&mut self, user: FieldErrorTable) {
		for (field_type, rules) in user {
			match self.field_errors.get_mut(&field_type) {
				Some(existing) => existing.extend(rules),
				None => {
					self.field_errors.insert(field_type, rules);
				}
			}
		}
	}

	/// Reject settings the classifier cannot work with
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.non_field_errors_key.is_empty() {
			return Err(SettingsError::ValidationError(
				"non_field_errors_key must not be empty".to_string(),
			));
		}

		if self.validation_failed_message.is_empty() {
			return Err(SettingsError::ValidationError(
				"validation_failed_message must not be empty".to_string(),
			));
		}

		for (field_type, rules) in &self.field_errors {
			if rules.is_empty() {
				tracing::warn!(field_type = %field_type, "field error table has no rules");
			}
		}

		if !self.exception_codes.contains_key("APIException") {
			tracing::warn!("exception_codes has no APIException fallback entry");
		}

		Ok(())
	}

	/// Code configured for a rule on exactly this field type name
	pub fn field_rule_code(&self, field_type: &str, rule: &str) -> Option<&ErrorCode> {
		self.field_errors.get(field_type)?.get(rule)
	}

	/// Code configured for an object-level rule
	pub fn non_field_code(&self, rule: &str) -> Option<&ErrorCode> {
		self.non_field_errors.get(rule)
	}

	/// Code configured for a validator or hook name
	pub fn validator_code(&self, name: &str) -> Option<&ErrorCode> {
		self.validator_errors.get(name)
	}

	/// Code configured for an exception name, falling back to `APIException`
	pub fn exception_code(&self, name: &str) -> Option<&ErrorCode> {
		self.exception_codes
			.get(name)
			.or_else(|| self.exception_codes.get("APIException"))
	}
}

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_settings() {
		let settings = FriendlySettings::default();
		assert_eq!(settings.validation_failed_code, ErrorCode::Numeric(1000));
		assert_eq!(settings.validation_failed_message, "Validation Failed");
		assert_eq!(settings.non_field_errors_key, "non_field_errors");
		assert!(!settings.catch_all_exceptions);
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_json_overrides_merge_tables() {
		// Arrange
		let raw = r#"{
			"validator_errors": {"validate_username": 5001},
			"non_field_errors": {"unique": "E_UNIQUE"},
			"validation_failed_message": "Invalid request"
		}"#;

		// Act
		let settings = FriendlySettings::from_json_str(raw).unwrap();

		// Assert
		assert_eq!(
			settings.validator_code("validate_username"),
			Some(&ErrorCode::Numeric(5001))
		);
		assert_eq!(
			settings.validator_code("UniqueValidator"),
			Some(&ErrorCode::Numeric(4001))
		);
		assert_eq!(
			settings.non_field_code("unique"),
			Some(&ErrorCode::from("E_UNIQUE"))
		);
		assert_eq!(settings.validation_failed_message, "Invalid request");
	}

	#[rstest]
	fn test_unknown_keys_are_rejected() {
		let result = FriendlySettings::from_json_str(r#"{"no_such_setting": 1}"#);
		assert!(matches!(result, Err(SettingsError::ParseError(_))));
	}

	#[rstest]
	fn test_empty_non_field_key_is_invalid() {
		let result = FriendlySettings::from_toml_str(r#"non_field_errors_key = """#);
		assert!(matches!(result, Err(SettingsError::ValidationError(_))));
	}

	#[rstest]
	fn test_exception_code_fallback() {
		let settings = FriendlySettings::default();
		assert_eq!(
			settings.exception_code("NotFound"),
			Some(&ErrorCode::Numeric(1006))
		);
		assert_eq!(
			settings.exception_code("SomethingElse"),
			Some(&ErrorCode::Numeric(1001))
		);
	}
}
