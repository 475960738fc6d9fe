//! End-to-end flattening of engine error trees into friendly envelopes.

use reinhardt_friendly_conf::{ErrorCode, FriendlySettings};
use reinhardt_friendly_core::classify::lookup_field_code;
use reinhardt_friendly_core::messages::default_messages;
use reinhardt_friendly_core::{
	ApiException, ErrorDetail, ErrorTree, FieldDescriptor, FieldType, FnValidator,
	FriendlyErrors, FriendlySerializer, Schema, ValidationError, friendly_exception_handler,
};
use rstest::*;
use serde_json::{Value, json};

#[fixture]
fn settings() -> FriendlySettings {
	FriendlySettings::default()
}

fn no_profanity(value: &Value) -> Result<(), ErrorDetail> {
	match value.as_str() {
		Some(s) if s.contains("darn") => Err(ErrorDetail::new("Mind your language.")),
		_ => Ok(()),
	}
}

#[fixture]
fn signup_schema() -> Schema {
	let address = Schema::new()
		.with_field(FieldDescriptor::new("city", FieldType::CharField))
		.with_field(FieldDescriptor::new("zip", FieldType::RegexField));

	Schema::new()
		.with_field(FieldDescriptor::new("username", FieldType::SlugField).with_max_length(10))
		.with_field(FieldDescriptor::new("email", FieldType::EmailField))
		.with_field(FieldDescriptor::new("age", FieldType::IntegerField).with_min_value(18))
		.with_field(
			FieldDescriptor::new("bio", FieldType::CharField)
				.with_validator(FnValidator::new("no_profanity", no_profanity)),
		)
		.with_field(FieldDescriptor::new("birthday", FieldType::DateField))
		.with_field(FieldDescriptor::new("avatar", FieldType::ImageField).with_max_length(8))
		.with_field(FieldDescriptor::many_related(
			"groups",
			FieldDescriptor::new("groups", FieldType::PrimaryKeyRelatedField),
		))
		.with_field(FieldDescriptor::nested("address", address))
}

fn flatten(schema: &Schema, settings: &FriendlySettings, data: &Value, tree: ErrorTree) -> FriendlyErrors {
	let serializer = FriendlySerializer::new(schema, settings, data);
	let run = serializer.begin_run();
	serializer.errors(&tree, &run)
}

#[rstest]
fn test_builtin_messages_are_all_coded(settings: FriendlySettings, signup_schema: Schema) {
	// Arrange
	let data = json!({
		"username": "way too long name",
		"email": "nope",
		"age": 12,
		"birthday": "yesterday",
		"avatar": {"name": "portrait.png"},
	});
	let tree = ErrorTree::new()
		.with_messages("username", ["Ensure this field has no more than 10 characters."])
		.with_messages("email", ["Enter a valid email address."])
		.with_messages("age", ["Ensure this value is greater than or equal to 18."])
		.with_messages(
			"birthday",
			["Date has wrong format. Use one of these formats instead: YYYY[-MM[-DD]]."],
		)
		.with_messages(
			"avatar",
			["Ensure this filename has at most 8 characters (it has 12)."],
		)
		.with_messages("bio", ["This field is required."]);

	// Act
	let envelope = flatten(&signup_schema, &settings, &data, tree)
		.into_pretty()
		.unwrap();

	// Assert
	let codes: Vec<_> = envelope
		.errors
		.iter()
		.map(|e| (e.field.as_deref().unwrap(), e.code.clone()))
		.collect();
	assert_eq!(
		codes,
		vec![
			("username", Some(ErrorCode::Numeric(2055))),
			("email", Some(ErrorCode::Numeric(2033))),
			("age", Some(ErrorCode::Numeric(2105))),
			("birthday", Some(ErrorCode::Numeric(2143))),
			("avatar", Some(ErrorCode::Numeric(2206))),
			("bio", Some(ErrorCode::Numeric(2021))),
		]
	);
}

#[rstest]
fn test_every_builtin_rule_has_a_code(settings: FriendlySettings) {
	// Arrange
	let mut missing = Vec::new();

	// Act
	for &field_type in FieldType::ALL {
		let chain: Vec<&str> = field_type
			.ancestry()
			.into_iter()
			.map(FieldType::name)
			.collect();
		for rule in default_messages(field_type).keys() {
			if lookup_field_code(&settings, &chain, rule).is_none() {
				missing.push(format!("{}.{}", field_type.name(), rule));
			}
		}
	}

	// Assert
	assert!(missing.is_empty(), "rules without a code: {:?}", missing);
}

#[rstest]
fn test_non_field_errors_short_circuit(settings: FriendlySettings, signup_schema: Schema) {
	// Arrange
	let data = json!({});
	let tree = ErrorTree::new()
		.with_messages("email", ["Enter a valid email address."])
		.with_messages(
			"non_field_errors",
			["This field is required.", "Another error"],
		);

	// Act
	let errors = flatten(&signup_schema, &settings, &data, tree);

	// Assert
	assert_eq!(
		errors.to_value(),
		json!({"code": null, "message": "This field is required.", "errors": []})
	);
}

#[rstest]
fn test_nested_object_errors(settings: FriendlySettings, signup_schema: Schema) {
	// Arrange
	let data = json!({"address": {"zip": "12345"}});
	let tree = ErrorTree::new().with_nested(
		"address",
		ErrorTree::new().with_messages("city", ["This field is required."]),
	);

	// Act
	let errors = flatten(&signup_schema, &settings, &data, tree);

	// Assert
	assert_eq!(
		errors.to_value(),
		json!({
			"code": 1000,
			"message": "Validation Failed",
			"errors": [{
				"code": 1000,
				"field": "address",
				"message": "Validation Failed",
				"errors": [{
					"code": 2021,
					"field": "city",
					"message": "This field is required.",
					"errors": []
				}]
			}]
		})
	);
}

#[rstest]
fn test_developer_payload_passes_through(settings: FriendlySettings, signup_schema: Schema) {
	// Arrange
	let data = json!({"email": "a@b.c"});
	let serializer = FriendlySerializer::new(&signup_schema, &settings, &data);
	let payload: ErrorTree =
		serde_json::from_value(json!({"code": 228, "message": "kek"})).unwrap();
	let tree = serializer.as_serializer_error(ValidationError::Tree(payload.clone()));
	let run = serializer.begin_run();

	// Act
	let errors = serializer.errors(&tree, &run);

	// Assert
	assert_eq!(errors, FriendlyErrors::Raw(payload));

	// The handler restores the stringified values
	let exception = serializer.validation_exception(&tree, &run);
	let response = friendly_exception_handler(&exception, &settings).unwrap();
	assert_eq!(
		Value::Object(response.body),
		json!({"code": 228, "message": "kek", "errors": []})
	);
}

#[rstest]
fn test_envelope_shaped_developer_payload_is_restored(
	settings: FriendlySettings,
	signup_schema: Schema,
) {
	// Arrange
	let data = json!({});
	let serializer = FriendlySerializer::new(&signup_schema, &settings, &data);
	let payload: ErrorTree =
		serde_json::from_value(json!({"code": 228, "message": "kek", "errors": []})).unwrap();
	let tree = serializer.as_serializer_error(ValidationError::Tree(payload));
	let run = serializer.begin_run();

	// Act
	let exception = serializer.validation_exception(&tree, &run);
	let response = friendly_exception_handler(&exception, &settings).unwrap();

	// Assert
	assert_eq!(
		Value::Object(response.body),
		json!({"code": 228, "message": "kek", "errors": []})
	);
}

#[rstest]
fn test_nested_developer_payload_reaches_response(
	settings: FriendlySettings,
	signup_schema: Schema,
) {
	// Arrange
	let data = json!({"address": {}});
	let tree: ErrorTree =
		serde_json::from_value(json!({"address": {"code": 228, "message": "kek"}})).unwrap();

	// Act
	let errors = flatten(&signup_schema, &settings, &data, tree);
	let response =
		friendly_exception_handler(&ApiException::Validation(errors.to_value()), &settings)
			.unwrap();

	// Assert
	assert_eq!(
		Value::Object(response.body),
		json!({
			"code": 1000,
			"message": "Validation Failed",
			"errors": [{"code": 228, "field": "address", "message": "kek", "errors": []}]
		})
	);
}

#[rstest]
fn test_many_related_missing_objects(settings: FriendlySettings, signup_schema: Schema) {
	// Arrange
	let data = json!({"groups": [1, 41, 42]});
	let tree = ErrorTree::new().with_messages(
		"groups",
		[
			"Invalid pk \"41\" - object does not exist.",
			"Invalid pk \"42\" - object does not exist.",
		],
	);

	// Act
	let envelope = flatten(&signup_schema, &settings, &data, tree)
		.into_pretty()
		.unwrap();

	// Assert
	assert_eq!(envelope.errors.len(), 2);
	for entry in &envelope.errors {
		assert_eq!(entry.field.as_deref(), Some("groups"));
		assert_eq!(entry.code, Some(ErrorCode::Numeric(2253)));
	}
}

#[rstest]
fn test_custom_validator_attribution(settings: FriendlySettings, signup_schema: Schema) {
	// Arrange
	let mut settings = settings;
	settings
		.validator_errors
		.insert("no_profanity".to_string(), ErrorCode::from("E_PROFANITY"));
	let data = json!({"bio": "well darn"});
	let tree = ErrorTree::new().with_messages("bio", ["Mind your language."]);

	// Act
	let envelope = flatten(&signup_schema, &settings, &data, tree)
		.into_pretty()
		.unwrap();

	// Assert
	assert_eq!(envelope.errors[0].code, Some(ErrorCode::from("E_PROFANITY")));
}

#[rstest]
fn test_hook_attribution_and_unknown_messages(settings: FriendlySettings) {
	// Arrange
	let schema = Schema::new()
		.with_field(FieldDescriptor::new("code", FieldType::CharField))
		.with_field_hook("code", |value: &Value| match value.as_str() {
			Some(s) if s.starts_with('X') => Err(ErrorDetail::new("Codes may not start with X.")),
			_ => Ok(()),
		})
		.with_validator_code("validate_code", 4100);
	let data = json!({"code": "XYZ"});
	let tree = ErrorTree::new().with_messages(
		"code",
		["Codes may not start with X.", "Nobody knows where this came from."],
	);

	// Act
	let envelope = flatten(&schema, &settings, &data, tree).into_pretty().unwrap();

	// Assert
	assert_eq!(envelope.errors[0].code, Some(ErrorCode::Numeric(4100)));
	assert_eq!(envelope.errors[1].code, None);
	assert_eq!(envelope.errors[1].message, "Nobody knows where this came from.");
}

#[rstest]
fn test_invalid_payload_type(settings: FriendlySettings, signup_schema: Schema) {
	// Arrange
	let data = json!(["not", "an", "object"]);
	let tree = ErrorTree::new().with_messages(
		"non_field_errors",
		["Invalid data. Expected a dictionary, but got array."],
	);

	// Act
	let envelope = flatten(&signup_schema, &settings, &data, tree)
		.into_pretty()
		.unwrap();

	// Assert
	assert_eq!(envelope.code, Some(ErrorCode::Numeric(3001)));
	assert!(envelope.errors.is_empty());
}

#[rstest]
fn test_custom_non_field_key(signup_schema: Schema) {
	// Arrange
	let settings =
		FriendlySettings::from_json_str(r#"{"non_field_errors_key": "__all__"}"#).unwrap();
	let data = json!({});
	let serializer = FriendlySerializer::new(&signup_schema, &settings, &data);
	let tree = serializer.as_serializer_error(ValidationError::List(vec![
		ErrorDetail::new("Not unique.").with_code("unique"),
	]));

	// Act
	let errors = serializer.errors(&tree, &serializer.begin_run());

	// Assert
	assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["__all__"]);
	assert_eq!(
		errors.into_pretty().unwrap().code,
		Some(ErrorCode::Numeric(3002))
	);
}
