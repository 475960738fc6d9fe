//! Validator seam used for attribution
//!
//! When no built-in template explains an error, the classifier re-runs the
//! field's validators against the submitted value and attributes the error
//! to the first one that fails with the same message. Validators must
//! therefore be pure functions of the value.

use crate::tree::ErrorDetail;
use serde_json::Value;
use std::fmt;

/// A named check over a submitted field value
pub trait FieldValidator: Send + Sync {
	/// Name used to look up the validator's error code
	fn name(&self) -> &str;

	fn validate(&self, value: &Value) -> Result<(), ErrorDetail>;
}

/// Validator backed by a closure
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::{ErrorDetail, FieldValidator, FnValidator};
/// use serde_json::json;
///
/// let even = FnValidator::new("validate_even", |value: &serde_json::Value| match value.as_i64() {
///     Some(n) if n % 2 == 0 => Ok(()),
///     _ => Err(ErrorDetail::new("Must be even.")),
/// });
///
/// assert_eq!(even.name(), "validate_even");
/// assert!(even.validate(&json!(4)).is_ok());
/// assert_eq!(even.validate(&json!(3)).unwrap_err().message, "Must be even.");
/// ```
pub struct FnValidator<F> {
	name: String,
	func: F,
}

impl<F> FnValidator<F>
where
	F: Fn(&Value) -> Result<(), ErrorDetail> + Send + Sync,
{
	pub fn new(name: impl Into<String>, func: F) -> Self {
		Self {
			name: name.into(),
			func,
		}
	}
}

impl<F> FieldValidator for FnValidator<F>
where
	F: Fn(&Value) -> Result<(), ErrorDetail> + Send + Sync,
{
	fn name(&self) -> &str {
		&self.name
	}

	fn validate(&self, value: &Value) -> Result<(), ErrorDetail> {
		(self.func)(value)
	}
}

impl<F> fmt::Debug for FnValidator<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnValidator")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

/// Whether `validator` reproduces `message` for `value`
pub fn reproduces(validator: &dyn FieldValidator, value: &Value, message: &str) -> bool {
	match validator.validate(value) {
		Ok(()) => false,
		Err(detail) => detail.message == message,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn no_spaces() -> FnValidator<impl Fn(&Value) -> Result<(), ErrorDetail> + Send + Sync> {
		FnValidator::new("NoSpacesValidator", |value: &Value| {
			match value.as_str() {
				Some(s) if s.contains(' ') => Err(ErrorDetail::new("Spaces are not allowed.")),
				_ => Ok(()),
			}
		})
	}

	#[rstest]
	fn test_reproduces_matching_message() {
		let validator = no_spaces();
		assert!(reproduces(&validator, &json!("a b"), "Spaces are not allowed."));
	}

	#[rstest]
	fn test_reproduces_rejects_other_message() {
		let validator = no_spaces();
		assert!(!reproduces(&validator, &json!("a b"), "Something else."));
	}

	#[rstest]
	fn test_reproduces_rejects_passing_value() {
		let validator = no_spaces();
		assert!(!reproduces(&validator, &json!("ab"), "Spaces are not allowed."));
	}
}
