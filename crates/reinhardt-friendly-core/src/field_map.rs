//! Field-kind map
//!
//! Message templates differ by *kind* of field rather than by concrete type:
//! every string-like field formats its templates with the same placeholders,
//! every numeric field with another set, and so on.

use crate::field::FieldType;

/// Accepted input format of time fields
pub const TIME_FORMAT: &str = "hh:mm[:ss[.uuuuuu]]";
/// Accepted input format of date fields
pub const DATE_FORMAT: &str = "YYYY[-MM[-DD]]";
/// Accepted input format of datetime fields
pub const DATETIME_FORMAT: &str = "YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z]";
/// Accepted input format of duration fields
pub const DURATION_FORMAT: &str = "[DD] [HH:[MM:]]ss[.uuuuuu]";

/// Semantic group of field types sharing a template signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	Boolean,
	String,
	Numeric,
	Date,
	Choice,
	File,
	Composite,
	Relation,
	Miscellaneous,
}

/// Kind of a field type; types not listed elsewhere are miscellaneous
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::{FieldKind, FieldType, field_map::kind_of};
///
/// assert_eq!(kind_of(FieldType::SlugField), FieldKind::String);
/// assert_eq!(kind_of(FieldType::ManyRelatedField), FieldKind::Relation);
/// assert_eq!(kind_of(FieldType::Field), FieldKind::Miscellaneous);
/// ```
pub fn kind_of(field_type: FieldType) -> FieldKind {
	match field_type {
		FieldType::BooleanField | FieldType::NullBooleanField => FieldKind::Boolean,
		FieldType::CharField
		| FieldType::EmailField
		| FieldType::RegexField
		| FieldType::SlugField
		| FieldType::URLField
		| FieldType::UUIDField
		| FieldType::FilePathField
		| FieldType::IPAddressField => FieldKind::String,
		FieldType::IntegerField | FieldType::FloatField | FieldType::DecimalField => {
			FieldKind::Numeric
		}
		FieldType::DateTimeField
		| FieldType::DateField
		| FieldType::TimeField
		| FieldType::DurationField => FieldKind::Date,
		FieldType::ChoiceField | FieldType::MultipleChoiceField => FieldKind::Choice,
		FieldType::FileField | FieldType::ImageField => FieldKind::File,
		// Nested serializers report container errors like list/dict fields
		FieldType::ListField
		| FieldType::DictField
		| FieldType::JSONField
		| FieldType::Serializer
		| FieldType::ListSerializer => FieldKind::Composite,
		FieldType::RelatedField
		| FieldType::StringRelatedField
		| FieldType::PrimaryKeyRelatedField
		| FieldType::HyperlinkedRelatedField
		| FieldType::SlugRelatedField
		| FieldType::HyperlinkedIdentityField
		| FieldType::ManyRelatedField => FieldKind::Relation,
		FieldType::Field
		| FieldType::ReadOnlyField
		| FieldType::HiddenField
		| FieldType::ModelField
		| FieldType::SerializerMethodField => FieldKind::Miscellaneous,
	}
}

/// Default accepted input format of a date-kind type
pub fn date_format(field_type: FieldType) -> Option<&'static str> {
	match field_type {
		FieldType::DateField => Some(DATE_FORMAT),
		FieldType::TimeField => Some(TIME_FORMAT),
		FieldType::DateTimeField => Some(DATETIME_FORMAT),
		FieldType::DurationField => Some(DURATION_FORMAT),
		_ => None,
	}
}
