//! Built-in message templates and placeholder rendering
//!
//! Templates use `{name}` placeholders; `{{` and `}}` render literal braces.

use crate::field::FieldType;
use crate::params::TemplateParams;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder pattern")
});

fn own_messages(field_type: FieldType) -> &'static [(&'static str, &'static str)] {
	match field_type {
		FieldType::Field => &[
			("required", "This field is required."),
			("null", "This field may not be null."),
		],
		FieldType::BooleanField | FieldType::NullBooleanField => {
			&[("invalid", "\"{input}\" is not a valid boolean.")]
		}
		FieldType::CharField => &[
			("invalid", "Not a valid string."),
			("blank", "This field may not be blank."),
			(
				"max_length",
				"Ensure this field has no more than {max_length} characters.",
			),
			(
				"min_length",
				"Ensure this field has at least {min_length} characters.",
			),
		],
		FieldType::EmailField => &[("invalid", "Enter a valid email address.")],
		FieldType::RegexField => &[("invalid", "This value does not match the required pattern.")],
		FieldType::SlugField => &[(
			"invalid",
			"Enter a valid \"slug\" consisting of letters, numbers, underscores or hyphens.",
		)],
		FieldType::URLField => &[("invalid", "Enter a valid URL.")],
		FieldType::UUIDField => &[("invalid", "\"{value}\" is not a valid UUID.")],
		FieldType::IPAddressField => &[("invalid", "Enter a valid IPv4 or IPv6 address.")],
		FieldType::ChoiceField => &[("invalid_choice", "\"{input}\" is not a valid choice.")],
		FieldType::FilePathField => &[("invalid_choice", "\"{input}\" is not a valid path choice.")],
		FieldType::MultipleChoiceField => &[
			(
				"not_a_list",
				"Expected a list of items but got type \"{input_type}\".",
			),
			("empty", "This selection may not be empty."),
		],
		FieldType::IntegerField => &[
			("invalid", "A valid integer is required."),
			(
				"max_value",
				"Ensure this value is less than or equal to {max_value}.",
			),
			(
				"min_value",
				"Ensure this value is greater than or equal to {min_value}.",
			),
			("max_string_length", "String value too large."),
		],
		FieldType::FloatField => &[
			("invalid", "A valid number is required."),
			(
				"max_value",
				"Ensure this value is less than or equal to {max_value}.",
			),
			(
				"min_value",
				"Ensure this value is greater than or equal to {min_value}.",
			),
			("max_string_length", "String value too large."),
		],
		FieldType::DecimalField => &[
			("invalid", "A valid number is required."),
			(
				"max_value",
				"Ensure this value is less than or equal to {max_value}.",
			),
			(
				"min_value",
				"Ensure this value is greater than or equal to {min_value}.",
			),
			(
				"max_digits",
				"Ensure that there are no more than {max_digits} digits in total.",
			),
			(
				"max_decimal_places",
				"Ensure that there are no more than {max_decimal_places} decimal places.",
			),
			(
				"max_whole_digits",
				"Ensure that there are no more than {max_whole_digits} digits before the decimal point.",
			),
			("max_string_length", "String value too large."),
		],
		FieldType::DateTimeField => &[
			(
				"invalid",
				"Datetime has wrong format. Use one of these formats instead: {format}.",
			),
			("date", "Expected a datetime but got a date."),
		],
		FieldType::DateField => &[
			(
				"invalid",
				"Date has wrong format. Use one of these formats instead: {format}.",
			),
			("datetime", "Expected a date but got a datetime."),
		],
		FieldType::TimeField => &[(
			"invalid",
			"Time has wrong format. Use one of these formats instead: {format}.",
		)],
		FieldType::DurationField => &[(
			"invalid",
			"Duration has wrong format. Use one of these formats instead: {format}.",
		)],
		FieldType::FileField => &[
			("required", "No file was submitted."),
			(
				"invalid",
				"The submitted data was not a file. Check the encoding type on the form.",
			),
			("no_name", "No filename could be determined."),
			("empty", "The submitted file is empty."),
			(
				"max_length",
				"Ensure this filename has at most {max_length} characters (it has {length}).",
			),
		],
		FieldType::ImageField => &[(
			"invalid_image",
			"Upload a valid image. The file you uploaded was either not an image or a corrupted image.",
		)],
		FieldType::ListField => &[
			(
				"not_a_list",
				"Expected a list of items but got type \"{input_type}\".",
			),
			("empty", "This list may not be empty."),
			(
				"min_length",
				"Ensure this field has at least {min_length} elements.",
			),
			(
				"max_length",
				"Ensure this field has no more than {max_length} elements.",
			),
		],
		FieldType::DictField => &[
			(
				"not_a_dict",
				"Expected a dictionary of items but got type \"{input_type}\".",
			),
			("empty", "This dictionary may not be empty."),
		],
		FieldType::JSONField => &[("invalid", "Value must be valid JSON.")],
		FieldType::PrimaryKeyRelatedField => &[
			(
				"does_not_exist",
				"Invalid pk \"{pk_value}\" - object does not exist.",
			),
			(
				"incorrect_type",
				"Incorrect type. Expected pk value, received {data_type}.",
			),
		],
		FieldType::HyperlinkedRelatedField => &[
			("no_match", "Invalid hyperlink - No URL match."),
			("incorrect_match", "Invalid hyperlink - Incorrect URL match."),
			("does_not_exist", "Invalid hyperlink - Object does not exist."),
			(
				"incorrect_type",
				"Incorrect type. Expected URL string, received {data_type}.",
			),
		],
		FieldType::SlugRelatedField => &[
			(
				"does_not_exist",
				"Object with {slug_name}={value} does not exist.",
			),
			("invalid", "Invalid value."),
		],
		FieldType::ManyRelatedField | FieldType::ListSerializer => &[
			(
				"not_a_list",
				"Expected a list of items but got type \"{input_type}\".",
			),
			("empty", "This list may not be empty."),
		],
		FieldType::ModelField => &[(
			"max_length",
			"Ensure this field has no more than {max_length} characters.",
		)],
		FieldType::Serializer => &[(
			"invalid",
			"Invalid data. Expected a dictionary, but got {data_type}.",
		)],
		FieldType::RelatedField
		| FieldType::StringRelatedField
		| FieldType::HyperlinkedIdentityField
		| FieldType::ReadOnlyField
		| FieldType::HiddenField
		| FieldType::SerializerMethodField => &[],
	}
}

/// Built-in templates of a field type, including inherited ones
///
/// Templates are collected from `Field` down to the type itself; a subtype
/// overriding a rule keeps the position the rule had in its ancestor.
pub fn default_messages(field_type: FieldType) -> IndexMap<String, String> {
	let mut messages = IndexMap::new();
	for ancestor in field_type.ancestry().into_iter().rev() {
		for (rule, template) in own_messages(ancestor) {
			messages.insert(rule.to_string(), template.to_string());
		}
	}
	messages
}

/// Placeholder names referenced by a template, in order of appearance
pub fn placeholders(template: &str) -> Vec<&str> {
	PLACEHOLDER_RE
		.captures_iter(template)
		.filter_map(|caps| caps.get(1).map(|m| m.as_str()))
		.collect()
}

/// Render a parameter value the way it appears inside a message
pub fn display_value(value: &Value) -> String {
	match value {
		Value::Null => "None".to_string(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Render a template, or `None` if it references a missing parameter
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::messages::render;
/// use reinhardt_friendly_core::params::TemplateParams;
///
/// let mut params = TemplateParams::new();
/// params.insert("max_length", 5);
///
/// assert_eq!(
///     render("Ensure this field has no more than {max_length} characters.", &params).as_deref(),
///     Some("Ensure this field has no more than 5 characters.")
/// );
/// assert_eq!(render("{unknown} is missing", &params), None);
/// ```
pub fn render(template: &str, params: &TemplateParams) -> Option<String> {
	let mut missing = false;
	let rendered = PLACEHOLDER_RE.replace_all(template, |caps: &Captures<'_>| {
		match caps.get(1) {
			Some(name) => match params.get(name.as_str()) {
				Some(value) => display_value(value),
				None => {
					missing = true;
					String::new()
				}
			},
			None if &caps[0] == "{{" => "{".to_string(),
			None => "}".to_string(),
		}
	});
	if missing {
		None
	} else {
		Some(rendered.into_owned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_inherited_templates() {
		// Arrange & Act
		let messages = default_messages(FieldType::EmailField);

		// Assert
		assert_eq!(messages["required"], "This field is required.");
		assert_eq!(messages["invalid"], "Enter a valid email address.");
		assert_eq!(
			messages["max_length"],
			"Ensure this field has no more than {max_length} characters."
		);
	}

	#[rstest]
	fn test_file_field_overrides_required() {
		let messages = default_messages(FieldType::ImageField);
		assert_eq!(messages["required"], "No file was submitted.");
		assert_eq!(messages.get_index(0).map(|(k, _)| k.as_str()), Some("required"));
		assert!(messages.contains_key("invalid_image"));
	}

	#[rstest]
	#[case("Object with {slug_name}={value} does not exist.", vec!["slug_name", "value"])]
	#[case("No placeholders.", vec![])]
	#[case("Literal {{braces}} and {name}", vec!["name"])]
	fn test_placeholders(#[case] template: &str, #[case] expected: Vec<&str>) {
		assert_eq!(placeholders(template), expected);
	}

	#[rstest]
	#[case(json!(null), "None")]
	#[case(json!("abc"), "abc")]
	#[case(json!(12), "12")]
	#[case(json!(1.5), "1.5")]
	#[case(json!(true), "true")]
	#[case(json!([1, 2]), "[1,2]")]
	fn test_display_value(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(display_value(&value), expected);
	}

	#[rstest]
	fn test_render_escaped_braces() {
		let mut params = TemplateParams::new();
		params.insert("name", "x");
		assert_eq!(
			render("{{literal}} {name}", &params).as_deref(),
			Some("{literal} x")
		);
	}

	proptest! {
		#[test]
		fn test_render_without_placeholders_is_identity(text in "[^{}]*") {
			let params = TemplateParams::new();
			prop_assert_eq!(render(&text, &params), Some(text.clone()));
		}

		#[test]
		fn test_render_substitutes_any_string(value in "[a-zA-Z0-9 ]{0,20}") {
			let mut params = TemplateParams::new();
			params.insert("value", value.clone());
			let rendered = render("\"{value}\" is not a valid UUID.", &params);
			prop_assert_eq!(rendered, Some(format!("\"{}\" is not a valid UUID.", value)));
		}
	}
}
