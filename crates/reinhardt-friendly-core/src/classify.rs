//! Leaf-error classification
//!
//! Turns one observed message into an [`ErrorEntry`] by working out which
//! rule produced it and mapping that rule to a code. Classification never
//! fails: a message nobody can explain is kept with `code: None`.

use crate::entry::ErrorEntry;
use crate::field::{FieldDescriptor, Schema};
use crate::messages::render;
use crate::params::{TemplateParams, build_template_params, data_type_name};
use crate::registry::ValidationRun;
use crate::tree::ErrorDetail;
use crate::validators::reproduces;
use reinhardt_friendly_conf::{ErrorCode, FriendlySettings};
use serde_json::Value;

pub(crate) static NULL: Value = Value::Null;

/// Find the rule key whose template renders to the observed message
///
/// Returns the key together with the descriptor that declared it, which is
/// the child relation when the match came from a many-relation's child.
/// A machine code on the detail naming one of the field's templates wins
/// over template matching.
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::classify::find_key;
/// use reinhardt_friendly_core::{ErrorDetail, FieldDescriptor, FieldType};
/// use serde_json::json;
///
/// let field = FieldDescriptor::new("name", FieldType::CharField).with_max_length(3);
/// let detail = ErrorDetail::new("Ensure this field has no more than 3 characters.");
///
/// let (key, _) = find_key(&field, &detail, &json!("abcd")).unwrap();
/// assert_eq!(key, "max_length");
/// ```
pub fn find_key<'f>(
	field: &'f FieldDescriptor,
	detail: &ErrorDetail,
	value: &Value,
) -> Option<(&'f str, &'f FieldDescriptor)> {
	if let Some(code) = detail.code.as_deref()
		&& let Some((key, _)) = field.error_messages.get_key_value(code)
	{
		return Some((key.as_str(), field));
	}

	let params = build_template_params(field, value);
	for (key, template) in &field.error_messages {
		if matches_template(template, &params, &detail.message) {
			return Some((key.as_str(), field));
		}
		// One message is reported per missing related object
		if key == "does_not_exist"
			&& let Value::Array(items) = value
		{
			for item in items {
				let item_params = build_template_params(field, item);
				if matches_template(template, &item_params, &detail.message) {
					return Some((key.as_str(), field));
				}
			}
		}
	}

	field
		.child_relation
		.as_deref()
		.and_then(|child| find_key(child, detail, value))
}

fn matches_template(template: &str, params: &TemplateParams, message: &str) -> bool {
	render(template, params).is_some_and(|rendered| rendered == message)
}

/// First code configured for `key` along a type chain, most specific first
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::classify::lookup_field_code;
/// use reinhardt_friendly_conf::{ErrorCode, FriendlySettings};
///
/// let settings = FriendlySettings::default();
/// let chain = ["CorporateEmailField", "EmailField", "CharField", "Field"];
///
/// assert_eq!(
///     lookup_field_code(&settings, &chain, "invalid"),
///     Some(ErrorCode::Numeric(2033))
/// );
/// assert_eq!(lookup_field_code(&settings, &chain, "unknown_rule"), None);
/// ```
pub fn lookup_field_code(settings: &FriendlySettings, chain: &[&str], key: &str) -> Option<ErrorCode> {
	chain
		.iter()
		.find_map(|field_type| settings.field_rule_code(field_type, key))
		.cloned()
}

/// Classification context of one serializer level
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
	pub settings: &'a FriendlySettings,
	pub run: &'a ValidationRun,
	pub schema: &'a Schema,
	/// Payload submitted to this level
	pub data: &'a Value,
}

impl<'a> Classifier<'a> {
	pub fn new(
		settings: &'a FriendlySettings,
		run: &'a ValidationRun,
		schema: &'a Schema,
		data: &'a Value,
	) -> Self {
		Self {
			settings,
			run,
			schema,
			data,
		}
	}

	/// Context of a nested level sharing settings and run
	pub fn scoped(&self, schema: &'a Schema, data: &'a Value) -> Self {
		Self {
			settings: self.settings,
			run: self.run,
			schema,
			data,
		}
	}

	/// Value submitted for `field`, `null` when absent
	pub fn value_of(&self, field: &FieldDescriptor) -> &'a Value {
		self.data.get(&field.name).unwrap_or(&NULL)
	}

	/// Name of the validator or hook that reproduces `message`
	pub fn find_validator(&self, field: &FieldDescriptor, message: &str) -> Option<String> {
		let value = self.value_of(field);
		if let Some(validator) = field
			.validators
			.iter()
			.find(|v| reproduces(v.as_ref(), value, message))
		{
			return Some(validator.name().to_string());
		}
		self.schema
			.field_hook(&field.name)
			.filter(|hook| reproduces(hook.as_ref(), value, message))
			.map(|hook| hook.name().to_string())
	}

	fn validator_code(&self, name: &str) -> Option<ErrorCode> {
		self.schema
			.validator_code(name)
			.or_else(|| self.settings.validator_code(name))
			.cloned()
	}

	/// Classify one message reported under `field`
	pub fn field_error_entry(&self, field: &FieldDescriptor, detail: &ErrorDetail) -> ErrorEntry {
		if let Some(entry) = self.run.lookup(detail) {
			return entry.clone().with_field(Some(field.name.clone()));
		}

		let value = self.value_of(field);
		if let Some((key, source)) = find_key(field, detail, value) {
			let code = lookup_field_code(self.settings, &source.type_chain(), key)
				.or_else(|| lookup_field_code(self.settings, &field.type_chain(), key));
			if let Some(code) = code {
				tracing::trace!(field = %field.name, rule = key, code = %code, "matched field rule");
				return ErrorEntry::field(Some(code), &field.name, &detail.message);
			}
			tracing::debug!(field = %field.name, rule = key, "no code configured for rule");
		}

		if let Some(name) = self.find_validator(field, &detail.message) {
			let code = self.validator_code(&name);
			tracing::trace!(field = %field.name, validator = %name, "attributed error to validator");
			return ErrorEntry::field(code, &field.name, &detail.message);
		}

		tracing::debug!(field = %field.name, message = %detail.message, "unclassified field error");
		ErrorEntry::field(None, &field.name, &detail.message)
	}

	/// Classify one object-level message
	pub fn non_field_error_entry(&self, detail: &ErrorDetail) -> ErrorEntry {
		if let Some(entry) = self.run.lookup(detail) {
			return entry.clone().with_field(None);
		}

		let mut params = TemplateParams::new();
		params.insert("data_type", data_type_name(self.data));
		if matches_template(&self.settings.invalid_data_message, &params, &detail.message) {
			return ErrorEntry::non_field(
				self.settings.non_field_code("invalid").cloned(),
				&detail.message,
			);
		}

		let code = detail.code.as_deref().and_then(|rule| {
			self.schema
				.non_field_code(rule)
				.or_else(|| self.settings.non_field_code(rule))
				.cloned()
		});
		if code.is_none() {
			tracing::debug!(message = %detail.message, "unclassified object-level error");
		}
		ErrorEntry::non_field(code, &detail.message)
	}
}
