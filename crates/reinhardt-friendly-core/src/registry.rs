//! Errors registered explicitly during one validation run
//!
//! Code that already knows which code an error must carry registers it
//! before raising. The returned [`ErrorDetail`] carries an opaque key, and
//! the classifier looks that key up before any template matching.

use crate::entry::ErrorEntry;
use crate::field::{FieldDescriptor, Schema};
use crate::messages;
use crate::params::build_template_params;
use crate::tree::ErrorDetail;
use indexmap::IndexMap;
use reinhardt_friendly_conf::{ErrorCode, FriendlySettings};
use serde_json::Value;

/// Misuse of [`ValidationRun::register_error`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
	#[error("Either an error code or a rule key is required")]
	MissingCode,
	#[error("Unknown field: {0}")]
	UnknownField(String),
	#[error("No code configured for rule '{rule}' on {target}")]
	UnconfiguredRule { target: String, rule: String },
}

/// How the code of a registered error is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisteredCode {
	/// Use this code as-is
	Code(ErrorCode),
	/// Use the code the catalog gives the field's type for this rule
	Rule(String),
}

impl From<ErrorCode> for RegisteredCode {
	fn from(code: ErrorCode) -> Self {
		RegisteredCode::Code(code)
	}
}

/// Pre-built entries keyed by the opaque key of their detail
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisteredErrors {
	entries: IndexMap<String, ErrorEntry>,
}

impl RegisteredErrors {
	pub fn get(&self, key: &str) -> Option<&ErrorEntry> {
		self.entries.get(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	fn insert(&mut self, key: String, entry: ErrorEntry) {
		self.entries.insert(key, entry);
	}
}

/// State of a single validation run
///
/// Create one per validation; it must not outlive or be shared across runs.
#[derive(Debug, Clone, Default)]
pub struct ValidationRun {
	registered: RegisteredErrors,
}

impl ValidationRun {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn registered(&self) -> &RegisteredErrors {
		&self.registered
	}

	/// Entry registered for the key carried by `detail`, if any
	pub fn lookup(&self, detail: &ErrorDetail) -> Option<&ErrorEntry> {
		detail
			.code
			.as_deref()
			.and_then(|key| self.registered.get(key))
	}

	/// Register an error with a known code and return the detail to raise
	///
	/// With a field, a rule key resolves through the field's type chain; the
	/// message defaults to the field's template for that rule. Without a
	/// field, a rule key resolves through the object-level tables and the
	/// message defaults to the rule key.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_friendly_core::{
	///     FieldDescriptor, FieldType, RegisteredCode, Schema, ValidationRun,
	/// };
	/// use reinhardt_friendly_conf::{ErrorCode, FriendlySettings};
	///
	/// let settings = FriendlySettings::default();
	/// let schema = Schema::new().with_field(FieldDescriptor::new("email", FieldType::EmailField));
	/// let mut run = ValidationRun::new();
	///
	/// let detail = run
	///     .register_error(
	///         &settings,
	///         &schema,
	///         Some("email"),
	///         None,
	///         Some(RegisteredCode::Rule("invalid".to_string())),
	///     )
	///     .unwrap();
	///
	/// assert_eq!(detail.message, "Enter a valid email address.");
	/// assert_eq!(run.lookup(&detail).unwrap().code, Some(ErrorCode::Numeric(2033)));
	/// ```
	pub fn register_error(
		&mut self,
		settings: &FriendlySettings,
		schema: &Schema,
		field_name: Option<&str>,
		message: Option<&str>,
		code: Option<RegisteredCode>,
	) -> Result<ErrorDetail, RegisterError> {
		let code = code.ok_or(RegisterError::MissingCode)?;

		let (code, message) = match field_name {
			Some(name) => {
				let field = schema
					.field(name)
					.ok_or_else(|| RegisterError::UnknownField(name.to_string()))?;
				match code {
					RegisteredCode::Code(code) => {
						let message = message
							.map(str::to_string)
							.unwrap_or_else(|| settings.validation_failed_message.clone());
						(code, message)
					}
					RegisteredCode::Rule(rule) => {
						let code = field
							.type_chain()
							.into_iter()
							.find_map(|t| settings.field_rule_code(t, &rule))
							.cloned()
							.ok_or_else(|| RegisterError::UnconfiguredRule {
								target: field.field_type.to_string(),
								rule: rule.clone(),
							})?;
						let message = match message {
							Some(message) => message.to_string(),
							None => default_field_message(field, &rule),
						};
						(code, message)
					}
				}
			}
			None => match code {
				RegisteredCode::Code(code) => {
					let message = message
						.map(str::to_string)
						.unwrap_or_else(|| settings.validation_failed_message.clone());
					(code, message)
				}
				RegisteredCode::Rule(rule) => {
					let code = schema
						.non_field_code(&rule)
						.or_else(|| settings.non_field_code(&rule))
						.cloned()
						.ok_or_else(|| RegisterError::UnconfiguredRule {
							target: settings.non_field_errors_key.clone(),
							rule: rule.clone(),
						})?;
					let message = message.map(str::to_string).unwrap_or(rule);
					(code, message)
				}
			},
		};

		let key = registration_key(field_name, &code, &message);
		let entry = match field_name {
			Some(name) => ErrorEntry::field(Some(code), name, message.clone()),
			None => ErrorEntry::non_field(Some(code), message.clone()),
		};
		tracing::trace!(key = %key, "registered friendly error");
		self.registered.insert(key.clone(), entry);

		Ok(ErrorDetail::new(message).with_code(key))
	}
}

fn registration_key(field_name: Option<&str>, code: &ErrorCode, message: &str) -> String {
	format!("registered:{}:{}:{}", field_name.unwrap_or(""), code, message)
}

/// The field's template for `rule`, rendered with no submitted value
fn default_field_message(field: &FieldDescriptor, rule: &str) -> String {
	match field.error_messages.get(rule) {
		Some(template) => {
			let params = build_template_params(field, &Value::Null);
			messages::render(template, &params).unwrap_or_else(|| template.clone())
		}
		None => rule.to_string(),
	}
}
