//! Field descriptors
//!
//! A [`FieldDescriptor`] describes one serializer field the way the
//! validation engine declared it: its type, constraints, validators and
//! message templates. A [`Schema`] is the ordered set of fields of one
//! serializer plus its `validate_<field>` hooks and code overrides.

use crate::field_map::FieldKind;
use crate::messages;
use crate::tree::ErrorDetail;
use crate::validators::{FieldValidator, FnValidator};
use indexmap::IndexMap;
use reinhardt_friendly_conf::{CodeTable, ErrorCode};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Built-in serializer field types
///
/// Each type knows its parent, so the code mapper can walk the ancestry from
/// the most specific type to the plain `Field` base.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
	Field,
	BooleanField,
	NullBooleanField,
	CharField,
	EmailField,
	RegexField,
	SlugField,
	URLField,
	UUIDField,
	FilePathField,
	IPAddressField,
	IntegerField,
	FloatField,
	DecimalField,
	DateTimeField,
	DateField,
	TimeField,
	DurationField,
	ChoiceField,
	MultipleChoiceField,
	FileField,
	ImageField,
	ListField,
	DictField,
	JSONField,
	RelatedField,
	StringRelatedField,
	PrimaryKeyRelatedField,
	HyperlinkedRelatedField,
	SlugRelatedField,
	HyperlinkedIdentityField,
	ManyRelatedField,
	ReadOnlyField,
	HiddenField,
	ModelField,
	SerializerMethodField,
	Serializer,
	ListSerializer,
}

impl FieldType {
	/// Every built-in field type
	pub const ALL: &'static [FieldType] = &[
		FieldType::Field,
		FieldType::BooleanField,
		FieldType::NullBooleanField,
		FieldType::CharField,
		FieldType::EmailField,
		FieldType::RegexField,
		FieldType::SlugField,
		FieldType::URLField,
		FieldType::UUIDField,
		FieldType::FilePathField,
		FieldType::IPAddressField,
		FieldType::IntegerField,
		FieldType::FloatField,
		FieldType::DecimalField,
		FieldType::DateTimeField,
		FieldType::DateField,
		FieldType::TimeField,
		FieldType::DurationField,
		FieldType::ChoiceField,
		FieldType::MultipleChoiceField,
		FieldType::FileField,
		FieldType::ImageField,
		FieldType::ListField,
		FieldType::DictField,
		FieldType::JSONField,
		FieldType::RelatedField,
		FieldType::StringRelatedField,
		FieldType::PrimaryKeyRelatedField,
		FieldType::HyperlinkedRelatedField,
		FieldType::SlugRelatedField,
		FieldType::HyperlinkedIdentityField,
		FieldType::ManyRelatedField,
		FieldType::ReadOnlyField,
		FieldType::HiddenField,
		FieldType::ModelField,
		FieldType::SerializerMethodField,
		FieldType::Serializer,
		FieldType::ListSerializer,
	];

	/// Type name as used in the code catalog
	pub fn name(self) -> &'static str {
		match self {
			FieldType::Field => "Field",
			FieldType::BooleanField => "BooleanField",
			FieldType::NullBooleanField => "NullBooleanField",
			FieldType::CharField => "CharField",
			FieldType::EmailField => "EmailField",
			FieldType::RegexField => "RegexField",
			FieldType::SlugField => "SlugField",
			FieldType::URLField => "URLField",
			FieldType::UUIDField => "UUIDField",
			FieldType::FilePathField => "FilePathField",
			FieldType::IPAddressField => "IPAddressField",
			FieldType::IntegerField => "IntegerField",
			FieldType::FloatField => "FloatField",
			FieldType::DecimalField => "DecimalField",
			FieldType::DateTimeField => "DateTimeField",
			FieldType::DateField => "DateField",
			FieldType::TimeField => "TimeField",
			FieldType::DurationField => "DurationField",
			FieldType::ChoiceField => "ChoiceField",
			FieldType::MultipleChoiceField => "MultipleChoiceField",
			FieldType::FileField => "FileField",
			FieldType::ImageField => "ImageField",
			FieldType::ListField => "ListField",
			FieldType::DictField => "DictField",
			FieldType::JSONField => "JSONField",
			FieldType::RelatedField => "RelatedField",
			FieldType::StringRelatedField => "StringRelatedField",
			FieldType::PrimaryKeyRelatedField => "PrimaryKeyRelatedField",
			FieldType::HyperlinkedRelatedField => "HyperlinkedRelatedField",
			FieldType::SlugRelatedField => "SlugRelatedField",
			FieldType::HyperlinkedIdentityField => "HyperlinkedIdentityField",
			FieldType::ManyRelatedField => "ManyRelatedField",
			FieldType::ReadOnlyField => "ReadOnlyField",
			FieldType::HiddenField => "HiddenField",
			FieldType::ModelField => "ModelField",
			FieldType::SerializerMethodField => "SerializerMethodField",
			FieldType::Serializer => "Serializer",
			FieldType::ListSerializer => "ListSerializer",
		}
	}

	/// Direct parent type, `None` for the `Field` base
	pub fn parent(self) -> Option<FieldType> {
		match self {
			FieldType::Field => None,
			FieldType::EmailField
			| FieldType::RegexField
			| FieldType::SlugField
			| FieldType::URLField
			| FieldType::IPAddressField => Some(FieldType::CharField),
			FieldType::FilePathField | FieldType::MultipleChoiceField => {
				Some(FieldType::ChoiceField)
			}
			FieldType::ImageField => Some(FieldType::FileField),
			FieldType::StringRelatedField
			| FieldType::PrimaryKeyRelatedField
			| FieldType::HyperlinkedRelatedField
			| FieldType::SlugRelatedField => Some(FieldType::RelatedField),
			FieldType::HyperlinkedIdentityField => Some(FieldType::HyperlinkedRelatedField),
			_ => Some(FieldType::Field),
		}
	}

	/// This type followed by its ancestors, most specific first
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_friendly_core::FieldType;
	///
	/// assert_eq!(
	///     FieldType::EmailField.ancestry(),
	///     vec![FieldType::EmailField, FieldType::CharField, FieldType::Field]
	/// );
	/// ```
	pub fn ancestry(self) -> Vec<FieldType> {
		let mut chain = vec![self];
		let mut current = self;
		while let Some(parent) = current.parent() {
			chain.push(parent);
			current = parent;
		}
		chain
	}

	/// Semantic kind of this type
	pub fn kind(self) -> FieldKind {
		crate::field_map::kind_of(self)
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Declared shape of one serializer field
#[derive(Clone)]
pub struct FieldDescriptor {
	pub name: String,
	pub field_type: FieldType,
	/// Developer subclass names, most specific first
	pub subclass_names: Vec<String>,
	pub max_length: Option<usize>,
	pub min_length: Option<usize>,
	pub max_value: Option<Value>,
	pub min_value: Option<Value>,
	pub max_digits: Option<u32>,
	pub decimal_places: Option<u32>,
	pub slug_field: Option<String>,
	/// Accepted input format, overriding the type default for date kinds
	pub format: Option<String>,
	/// Message templates keyed by rule, in declaration order
	pub error_messages: IndexMap<String, String>,
	pub validators: Vec<Arc<dyn FieldValidator>>,
	/// Child field of a many-relation wrapper
	pub child_relation: Option<Box<FieldDescriptor>>,
	/// Fields of a nested serializer
	pub nested: Option<Schema>,
}

impl FieldDescriptor {
	/// Create a descriptor with the built-in templates of `field_type`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_friendly_core::{FieldDescriptor, FieldType};
	///
	/// let field = FieldDescriptor::new("username", FieldType::CharField).with_max_length(30);
	/// assert_eq!(field.max_length, Some(30));
	/// assert_eq!(
	///     field.error_messages["max_length"],
	///     "Ensure this field has no more than {max_length} characters."
	/// );
	/// ```
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			subclass_names: Vec::new(),
			max_length: None,
			min_length: None,
			max_value: None,
			min_value: None,
			max_digits: None,
			decimal_places: None,
			slug_field: None,
			format: None,
			error_messages: messages::default_messages(field_type),
			validators: Vec::new(),
			child_relation: None,
			nested: None,
		}
	}

	/// Create a many-relation field wrapping `child`
	///
	/// The child keeps its own name so that its templates render against the
	/// wrapper's submitted value.
	pub fn many_related(name: impl Into<String>, child: FieldDescriptor) -> Self {
		Self::new(name, FieldType::ManyRelatedField).with_child_relation(child)
	}

	/// Create a nested serializer field
	pub fn nested(name: impl Into<String>, schema: Schema) -> Self {
		Self::new(name, FieldType::Serializer).with_nested(schema)
	}

	/// Declare a developer subclass of the built-in type
	///
	/// Call from the least to the most specific subclass; the code mapper
	/// checks the last declared name first.
	pub fn with_subclass(mut self, name: impl Into<String>) -> Self {
		self.subclass_names.insert(0, name.into());
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn with_max_value(mut self, max_value: impl Into<Value>) -> Self {
		self.max_value = Some(max_value.into());
		self
	}

	pub fn with_min_value(mut self, min_value: impl Into<Value>) -> Self {
		self.min_value = Some(min_value.into());
		self
	}

	pub fn with_max_digits(mut self, max_digits: u32) -> Self {
		self.max_digits = Some(max_digits);
		self
	}

	pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
		self.decimal_places = Some(decimal_places);
		self
	}

	pub fn with_slug_field(mut self, slug_field: impl Into<String>) -> Self {
		self.slug_field = Some(slug_field.into());
		self
	}

	pub fn with_format(mut self, format: impl Into<String>) -> Self {
		self.format = Some(format.into());
		self
	}

	/// Override or add the template for one rule
	pub fn with_error_message(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
		self.error_messages.insert(rule.into(), template.into());
		self
	}

	pub fn with_validator(mut self, validator: impl FieldValidator + 'static) -> Self {
		self.validators.push(Arc::new(validator));
		self
	}

	pub fn with_child_relation(mut self, child: FieldDescriptor) -> Self {
		self.child_relation = Some(Box::new(child));
		self
	}

	pub fn with_nested(mut self, schema: Schema) -> Self {
		self.nested = Some(schema);
		self
	}

	/// Semantic kind of the declared type
	pub fn kind(&self) -> FieldKind {
		self.field_type.kind()
	}

	/// Type names from the most specific subclass to `Field`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_friendly_core::{FieldDescriptor, FieldType};
	///
	/// let field = FieldDescriptor::new("email", FieldType::EmailField)
	///     .with_subclass("CorporateEmailField");
	/// assert_eq!(
	///     field.type_chain(),
	///     vec!["CorporateEmailField", "EmailField", "CharField", "Field"]
	/// );
	/// ```
	pub fn type_chain(&self) -> Vec<&str> {
		self.subclass_names
			.iter()
			.map(String::as_str)
			.chain(self.field_type.ancestry().into_iter().map(|t| -> &str { t.name() }))
			.collect()
	}
}

impl fmt::Debug for FieldDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldDescriptor")
			.field("name", &self.name)
			.field("field_type", &self.field_type)
			.field("subclass_names", &self.subclass_names)
			.field(
				"validators",
				&self.validators.iter().map(|v| v.name()).collect::<Vec<_>>(),
			)
			.field("child_relation", &self.child_relation)
			.field("nested", &self.nested)
			.finish_non_exhaustive()
	}
}

/// Fields of one serializer, with its hooks and code overrides
#[derive(Clone, Default)]
pub struct Schema {
	fields: IndexMap<String, FieldDescriptor>,
	hooks: IndexMap<String, Arc<dyn FieldValidator>>,
	validator_codes: CodeTable,
	non_field_codes: CodeTable,
}

impl Schema {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a field, replacing any field with the same name
	pub fn with_field(mut self, field: FieldDescriptor) -> Self {
		self.fields.insert(field.name.clone(), field);
		self
	}

	/// Register the `validate_<field>` hook of a field
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_friendly_core::{ErrorDetail, FieldDescriptor, FieldType, Schema};
	///
	/// let schema = Schema::new()
	///     .with_field(FieldDescriptor::new("age", FieldType::IntegerField))
	///     .with_field_hook("age", |value| match value.as_i64() {
	///         Some(age) if age < 18 => Err(ErrorDetail::new("Too young.")),
	///         _ => Ok(()),
	///     });
	///
	/// assert_eq!(schema.field_hook("age").unwrap().name(), "validate_age");
	/// ```
	pub fn with_field_hook<F>(mut self, field_name: impl Into<String>, hook: F) -> Self
	where
		F: Fn(&Value) -> Result<(), ErrorDetail> + Send + Sync + 'static,
	{
		let field_name = field_name.into();
		let validator = FnValidator::new(format!("validate_{}", field_name), hook);
		self.hooks.insert(field_name, Arc::new(validator));
		self
	}

	/// Serializer-level code for a validator or hook name
	pub fn with_validator_code(mut self, name: impl Into<String>, code: impl Into<ErrorCode>) -> Self {
		self.validator_codes.insert(name.into(), code.into());
		self
	}

	/// Serializer-level code for an object-level rule
	pub fn with_non_field_code(mut self, rule: impl Into<String>, code: impl Into<ErrorCode>) -> Self {
		self.non_field_codes.insert(rule.into(), code.into());
		self
	}

	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.get(name)
	}

	pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
		self.fields.values()
	}

	pub fn field_hook(&self, field_name: &str) -> Option<&Arc<dyn FieldValidator>> {
		self.hooks.get(field_name)
	}

	pub fn validator_code(&self, name: &str) -> Option<&ErrorCode> {
		self.validator_codes.get(name)
	}

	pub fn non_field_code(&self, rule: &str) -> Option<&ErrorCode> {
		self.non_field_codes.get(rule)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl fmt::Debug for Schema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Schema")
			.field("fields", &self.fields.keys().collect::<Vec<_>>())
			.field("hooks", &self.hooks.keys().collect::<Vec<_>>())
			.field("validator_codes", &self.validator_codes)
			.field("non_field_codes", &self.non_field_codes)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(FieldType::CharField, &["CharField", "Field"])]
	#[case(FieldType::ImageField, &["ImageField", "FileField", "Field"])]
	#[case(FieldType::FilePathField, &["FilePathField", "ChoiceField", "Field"])]
	#[case(
		FieldType::HyperlinkedIdentityField,
		&["HyperlinkedIdentityField", "HyperlinkedRelatedField", "RelatedField", "Field"]
	)]
	#[case(FieldType::Field, &["Field"])]
	fn test_ancestry(#[case] field_type: FieldType, #[case] expected: &[&str]) {
		let names: Vec<_> = field_type.ancestry().into_iter().map(FieldType::name).collect();
		assert_eq!(names, expected);
	}

	#[rstest]
	fn test_every_type_reaches_field() {
		for field_type in FieldType::ALL {
			assert_eq!(field_type.ancestry().last(), Some(&FieldType::Field));
		}
	}

	#[rstest]
	fn test_subclass_order() {
		// Arrange
		let field = FieldDescriptor::new("code", FieldType::CharField)
			.with_subclass("TrimmedCharField")
			.with_subclass("PromoCodeField");

		// Act
		let chain = field.type_chain();

		// Assert
		assert_eq!(
			chain,
			vec!["PromoCodeField", "TrimmedCharField", "CharField", "Field"]
		);
	}

	#[rstest]
	fn test_error_message_override_keeps_position() {
		// Arrange
		let field = FieldDescriptor::new("title", FieldType::CharField)
			.with_error_message("blank", "Title cannot be empty.");

		// Act
		let keys: Vec<_> = field.error_messages.keys().map(String::as_str).collect();

		// Assert
		assert_eq!(field.error_messages["blank"], "Title cannot be empty.");
		assert_eq!(
			keys,
			vec!["required", "null", "invalid", "blank", "max_length", "min_length"]
		);
	}

	#[rstest]
	fn test_schema_lookup() {
		let schema = Schema::new()
			.with_field(FieldDescriptor::new("name", FieldType::CharField))
			.with_validator_code("validate_name", 5001)
			.with_non_field_code("unique", "E_UNIQUE");

		assert!(schema.field("name").is_some());
		assert!(schema.field("missing").is_none());
		assert_eq!(schema.len(), 1);
		assert_eq!(
			schema.validator_code("validate_name"),
			Some(&ErrorCode::Numeric(5001))
		);
		assert_eq!(
			schema.non_field_code("unique"),
			Some(&ErrorCode::from("E_UNIQUE"))
		);
	}
}
