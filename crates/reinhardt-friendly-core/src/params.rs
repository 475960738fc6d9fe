//! Template-parameter builder
//!
//! Builds the placeholder values a field's built-in templates expect, from
//! the field's declared constraints and the value the client submitted.

use crate::field::FieldDescriptor;
use crate::field_map::{self, FieldKind};
use indexmap::IndexMap;
use serde_json::Value;

/// Placeholder values used to render message templates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateParams(IndexMap<&'static str, Value>);

impl TemplateParams {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, key: &'static str, value: impl Into<Value>) {
		self.0.insert(key, value.into());
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.0.keys().copied()
	}
}

/// Runtime type name of a submitted value, as shown in messages
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::params::data_type_name;
/// use serde_json::json;
///
/// assert_eq!(data_type_name(&json!("a")), "string");
/// assert_eq!(data_type_name(&json!(3)), "integer");
/// assert_eq!(data_type_name(&json!(3.5)), "number");
/// assert_eq!(data_type_name(&json!([])), "array");
/// ```
pub fn data_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

fn optional<T: Into<Value>>(value: Option<T>) -> Value {
	value.map(Into::into).unwrap_or(Value::Null)
}

/// Length of a submitted file value: the filename length for uploads
/// described as objects, the character count for plain strings
fn submitted_length(value: &Value) -> usize {
	match value {
		Value::String(s) => s.chars().count(),
		Value::Object(map) => map
			.get("name")
			.and_then(Value::as_str)
			.map(|name| name.chars().count())
			.unwrap_or(0),
		Value::Array(items) => items.len(),
		_ => 0,
	}
}

/// Build the template parameters for `field` given the submitted `value`
///
/// Every kind receives `data_type`; the remaining keys depend on the field's
/// kind. Constraints the field does not declare render as `None`.
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::params::build_template_params;
/// use reinhardt_friendly_core::{FieldDescriptor, FieldType};
/// use serde_json::json;
///
/// let field = FieldDescriptor::new("price", FieldType::DecimalField)
///     .with_max_digits(5)
///     .with_decimal_places(2);
/// let params = build_template_params(&field, &json!("1234.5"));
///
/// assert_eq!(params.get("max_whole_digits"), Some(&json!(3)));
/// assert_eq!(params.get("data_type"), Some(&json!("string")));
/// ```
pub fn build_template_params(field: &FieldDescriptor, value: &Value) -> TemplateParams {
	let mut params = TemplateParams::new();
	params.insert("data_type", data_type_name(value));

	match field.kind() {
		FieldKind::Boolean => {
			params.insert("input", value.clone());
		}
		FieldKind::String => {
			params.insert("max_length", optional(field.max_length));
			params.insert("min_length", optional(field.min_length));
			params.insert("value", value.clone());
			params.insert("input", value.clone());
		}
		FieldKind::Numeric => {
			params.insert("min_value", optional(field.min_value.clone()));
			params.insert("max_value", optional(field.max_value.clone()));
			params.insert("decimal_places", optional(field.decimal_places));
			params.insert("max_decimal_places", optional(field.decimal_places));
			params.insert("max_digits", optional(field.max_digits));
			if let (Some(max_digits), Some(decimal_places)) = (field.max_digits, field.decimal_places)
			{
				let whole_digits = i64::from(max_digits) - i64::from(decimal_places);
				params.insert("max_whole_digits", whole_digits);
			}
		}
		FieldKind::Date => {
			let format = field
				.format
				.clone()
				.or_else(|| field_map::date_format(field.field_type).map(str::to_string));
			params.insert("format", optional(format));
		}
		FieldKind::Choice => {
			params.insert("input", value.clone());
			params.insert("input_type", data_type_name(value));
		}
		FieldKind::File => {
			params.insert("max_length", optional(field.max_length));
			params.insert("length", submitted_length(value));
		}
		FieldKind::Composite => {
			params.insert("input_type", data_type_name(value));
			params.insert("max_length", optional(field.max_length));
			params.insert("min_length", optional(field.min_length));
		}
		FieldKind::Relation => {
			params.insert("pk_value", value.clone());
			params.insert("slug_name", optional(field.slug_field.clone()));
			params.insert("value", value.clone());
			params.insert("input_type", data_type_name(value));
		}
		FieldKind::Miscellaneous => {
			params.insert("max_length", optional(field.max_length));
		}
	}

	params
}
