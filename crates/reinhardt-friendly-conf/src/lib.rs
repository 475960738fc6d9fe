//! Error-code catalogs and settings for friendly validation errors
//!
//! This crate holds the configuration side of the friendly-errors layer:
//! the [`ErrorCode`] type, the built-in code catalog and
//! [`FriendlySettings`], which overlays user tables from files or the
//! environment on top of that catalog.

pub mod catalog;
pub mod codes;
pub mod settings;

pub use catalog::{
	CodeTable, FieldErrorTable, INVALID_DATA_MESSAGE, NON_FIELD_ERRORS_KEY,
	VALIDATION_FAILED_CODE, VALIDATION_FAILED_MESSAGE,
};
pub use codes::ErrorCode;
pub use settings::{FriendlySettings, SettingsError};
