//! Error-tree flattening

use crate::classify::{Classifier, NULL};
use crate::entry::{ErrorEntry, FriendlyErrors};
use crate::tree::{ErrorDetail, ErrorNode, ErrorTree};
use reinhardt_friendly_conf::ErrorCode;

/// Flatten a raw error tree into the friendly envelope
///
/// Walks the tree in order. Messages under known fields become one entry
/// each; nested mappings become one entry carrying the nested level's
/// entries; the object-level key short-circuits with its first message. A
/// key that names no field stops the walk, and when nothing was classified
/// the input is returned unchanged as [`FriendlyErrors::Raw`].
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::{
///     Classifier, ErrorTree, FieldDescriptor, FieldType, Schema, ValidationRun,
///     build_pretty_errors,
/// };
/// use reinhardt_friendly_conf::FriendlySettings;
/// use serde_json::json;
///
/// let settings = FriendlySettings::default();
/// let schema = Schema::new().with_field(FieldDescriptor::new("name", FieldType::CharField));
/// let data = json!({"name": ""});
/// let run = ValidationRun::new();
/// let tree = ErrorTree::new().with_messages("name", ["This field may not be blank."]);
///
/// let errors = build_pretty_errors(&tree, &Classifier::new(&settings, &run, &schema, &data));
///
/// assert_eq!(
///     errors.to_value(),
///     json!({
///         "code": 1000,
///         "message": "Validation Failed",
///         "errors": [{
///             "code": 2024,
///             "field": "name",
///             "message": "This field may not be blank.",
///             "errors": []
///         }]
///     })
/// );
/// ```
pub fn build_pretty_errors(tree: &ErrorTree, cx: &Classifier<'_>) -> FriendlyErrors {
	let settings = cx.settings;
	let mut pretty = Vec::new();

	for (key, node) in tree {
		match node {
			ErrorNode::Nested(inner) => {
				let Some(field) = cx.schema.field(key) else {
					tracing::debug!(key = %key, "nested errors under unknown field, passing through");
					break;
				};
				let schema = field.nested.as_ref().unwrap_or(cx.schema);
				let data = cx.data.get(key.as_str()).unwrap_or(&NULL);
				let entry = match build_pretty_errors(inner, &cx.scoped(schema, data)) {
					FriendlyErrors::Pretty(envelope) => ErrorEntry {
						code: envelope.code,
						field: Some(key.clone()),
						message: envelope.message,
						errors: envelope.errors,
					},
					FriendlyErrors::Raw(raw) => {
						tracing::debug!(field = %key, "nested errors left unclassified");
						raw_nested_entry(key, &raw, cx)
					}
				};
				pretty.push(entry);
			}
			_ if *key == settings.non_field_errors_key => {
				// Only the first object-level error is reported
				let Some(first) = node.details().first() else {
					continue;
				};
				let entry = cx.non_field_error_entry(first);
				return FriendlyErrors::Pretty(ErrorEntry::envelope(
					entry.code,
					entry.message,
					Vec::new(),
				));
			}
			_ => {
				let Some(field) = cx.schema.field(key) else {
					tracing::debug!(key = %key, "unknown field, passing errors through");
					break;
				};
				pretty.extend(
					node.details()
						.iter()
						.map(|detail| cx.field_error_entry(field, detail)),
				);
			}
		}
	}

	if pretty.is_empty() {
		FriendlyErrors::Raw(tree.clone())
	} else {
		FriendlyErrors::Pretty(ErrorEntry::envelope(
			Some(settings.validation_failed_code.clone()),
			settings.validation_failed_message.clone(),
			pretty,
		))
	}
}

/// Wrap a nested level the classifier could not read
///
/// A developer payload carrying its own `code` and `message` keeps them;
/// anything missing falls back to the validation-failed constants.
fn raw_nested_entry(key: &str, raw: &ErrorTree, cx: &Classifier<'_>) -> ErrorEntry {
	let code = match first_detail(raw, "code") {
		Some(detail) => Some(ErrorCode::parse(&detail.message)),
		None => Some(cx.settings.validation_failed_code.clone()),
	};
	let message = match first_detail(raw, "message") {
		Some(detail) => detail.message.clone(),
		None => cx.settings.validation_failed_message.clone(),
	};
	let errors = raw
		.get("errors")
		.map(|node| {
			node.details()
				.iter()
				.map(|detail| ErrorEntry::non_field(None, detail.message.clone()))
				.collect()
		})
		.unwrap_or_default();

	ErrorEntry {
		code,
		field: Some(key.to_string()),
		message,
		errors,
	}
}

fn first_detail<'t>(tree: &'t ErrorTree, key: &str) -> Option<&'t ErrorDetail> {
	tree.get(key).and_then(|node| node.details().first())
}
