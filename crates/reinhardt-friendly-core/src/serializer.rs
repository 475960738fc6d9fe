//! Serializer glue
//!
//! [`FriendlySerializer`] ties a schema, the settings and the submitted
//! payload together so callers do not have to build a [`Classifier`] by
//! hand.

use crate::classify::Classifier;
use crate::entry::FriendlyErrors;
use crate::field::Schema;
use crate::flatten::build_pretty_errors;
use crate::handler::ApiException;
use crate::registry::{RegisterError, RegisteredCode, ValidationRun};
use crate::tree::{ErrorDetail, ErrorTree, ValidationError};
use reinhardt_friendly_conf::FriendlySettings;
use serde_json::Value;

/// A serializer whose errors are reported in the friendly envelope
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::{
///     ErrorTree, FieldDescriptor, FieldType, FriendlySerializer, Schema,
/// };
/// use reinhardt_friendly_conf::FriendlySettings;
/// use serde_json::json;
///
/// let settings = FriendlySettings::default();
/// let schema = Schema::new().with_field(FieldDescriptor::new("email", FieldType::EmailField));
/// let data = json!({"email": "not-an-email"});
/// let serializer = FriendlySerializer::new(&schema, &settings, &data);
///
/// let run = serializer.begin_run();
/// let tree = ErrorTree::new().with_messages("email", ["Enter a valid email address."]);
/// let errors = serializer.errors(&tree, &run);
///
/// assert_eq!(errors.to_value()["errors"][0]["code"], json!(2033));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FriendlySerializer<'a> {
	schema: &'a Schema,
	settings: &'a FriendlySettings,
	initial_data: &'a Value,
}

impl<'a> FriendlySerializer<'a> {
	pub fn new(schema: &'a Schema, settings: &'a FriendlySettings, initial_data: &'a Value) -> Self {
		Self {
			schema,
			settings,
			initial_data,
		}
	}

	pub fn schema(&self) -> &'a Schema {
		self.schema
	}

	pub fn settings(&self) -> &'a FriendlySettings {
		self.settings
	}

	pub fn initial_data(&self) -> &'a Value {
		self.initial_data
	}

	/// Fresh context for one validation run
	pub fn begin_run(&self) -> ValidationRun {
		ValidationRun::new()
	}

	/// Register an error with a known code; see [`ValidationRun::register_error`]
	pub fn register_error(
		&self,
		run: &mut ValidationRun,
		field_name: Option<&str>,
		message: Option<&str>,
		code: Option<RegisteredCode>,
	) -> Result<ErrorDetail, RegisterError> {
		run.register_error(self.settings, self.schema, field_name, message, code)
	}

	/// Flatten the engine's raw errors into the friendly envelope
	pub fn errors(&self, tree: &ErrorTree, run: &ValidationRun) -> FriendlyErrors {
		let classifier = Classifier::new(self.settings, run, self.schema, self.initial_data);
		build_pretty_errors(tree, &classifier)
	}

	/// Error tree for an object-level validation error
	pub fn as_serializer_error(&self, error: ValidationError) -> ErrorTree {
		error.into_tree(&self.settings.non_field_errors_key)
	}

	/// Exception to raise for a failed validation
	pub fn validation_exception(&self, tree: &ErrorTree, run: &ValidationRun) -> ApiException {
		ApiException::Validation(self.errors(tree, run).to_value())
	}
}
