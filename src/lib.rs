//! # Reinhardt Friendly Errors
//!
//! Friendly, machine-parsable validation errors for REST serializers.
//!
//! Serializer validation reports failures as a nested tree of strings keyed
//! by field name. This crate reshapes that tree into one envelope with
//! stable codes, so clients can branch on a number instead of parsing
//! English:
//!
//! ```json
//! {
//!     "code": 1000,
//!     "message": "Validation Failed",
//!     "errors": [
//!         {"code": 2033, "field": "email", "message": "Enter a valid email address.", "errors": []}
//!     ]
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use friendly_errors::prelude::*;
//! use serde_json::json;
//!
//! let settings = FriendlySettings::default();
//! let schema = Schema::new()
//!     .with_field(FieldDescriptor::new("email", FieldType::EmailField))
//!     .with_field(FieldDescriptor::new("age", FieldType::IntegerField).with_min_value(18));
//! let data = json!({"email": "nope", "age": 12});
//!
//! let serializer = FriendlySerializer::new(&schema, &settings, &data);
//! let run = serializer.begin_run();
//! let tree = ErrorTree::new()
//!     .with_messages("email", ["Enter a valid email address."])
//!     .with_messages("age", ["Ensure this value is greater than or equal to 18."]);
//!
//! let envelope = serializer.errors(&tree, &run).into_pretty().unwrap();
//! assert_eq!(envelope.errors[0].code, Some(ErrorCode::Numeric(2033)));
//! assert_eq!(envelope.errors[1].code, Some(ErrorCode::Numeric(2105)));
//! ```
//!
//! ## Crates
//!
//! - `reinhardt-friendly-conf`: Error codes, the built-in catalog and [`FriendlySettings`]
//! - `reinhardt-friendly-core`: Classification, flattening and the exception handler

pub use reinhardt_friendly_conf::{ErrorCode, FriendlySettings, SettingsError};
pub use reinhardt_friendly_core::{
	ApiException, Classifier, ErrorDetail, ErrorEntry, ErrorNode, ErrorResponse, ErrorTree,
	FieldDescriptor, FieldKind, FieldType, FieldValidator, FnValidator, FriendlyErrors,
	FriendlySerializer, RegisterError, RegisteredCode, Schema, ValidationError, ValidationRun,
	build_pretty_errors, friendly_exception_handler, restore_value_types,
};

pub mod prelude {
	pub use crate::{
		ApiException, ErrorCode, ErrorDetail, ErrorEntry, ErrorTree, FieldDescriptor, FieldType,
		FnValidator, FriendlyErrors, FriendlySerializer, FriendlySettings, RegisteredCode, Schema,
		ValidationError, ValidationRun, friendly_exception_handler,
	};

	// External
	pub use serde::{Deserialize, Serialize};
}
