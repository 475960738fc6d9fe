//! # Reinhardt Friendly Errors Core
//!
//! Reshapes the nested error tree produced by serializer validation into a
//! flat envelope with stable codes:
//!
//! ```json
//! {"code": 1000, "message": "Validation Failed", "errors": [
//!     {"code": 2021, "field": "name", "message": "This field is required.", "errors": []}
//! ]}
//! ```
//!
//! For every leaf message the [`classify`] module works out which rule
//! produced it, by re-rendering the field's message templates or re-running
//! its validators, and maps the rule to a code through the field's type
//! ancestry.
//!
//! ## Module Organization
//!
//! - [`field`]: Field types, descriptors and schemas
//! - [`field_map`]: Field kinds and their template signatures
//! - [`messages`]: Built-in templates and rendering
//! - [`params`]: Template parameters built from a field and submitted value
//! - [`validators`]: Validator seam used for attribution
//! - [`tree`]: Raw error tree
//! - [`entry`]: Friendly entries and the envelope
//! - [`registry`]: Errors registered during a validation run
//! - [`classify`]: Leaf classification and code lookup
//! - [`flatten`]: Tree flattening
//! - [`restore`]: Response value-type restoration
//! - [`handler`]: Exception handler
//! - [`serializer`]: Serializer glue

pub mod classify;
pub mod entry;
pub mod field;
pub mod field_map;
pub mod flatten;
pub mod handler;
pub mod messages;
pub mod params;
pub mod registry;
pub mod restore;
pub mod serializer;
pub mod tree;
pub mod validators;

pub use classify::Classifier;
pub use entry::{ErrorEntry, FriendlyErrors};
pub use field::{FieldDescriptor, FieldType, Schema};
pub use field_map::FieldKind;
pub use flatten::build_pretty_errors;
pub use handler::{ApiException, ErrorResponse, friendly_exception_handler};
pub use registry::{RegisterError, RegisteredCode, RegisteredErrors, ValidationRun};
pub use restore::{restore_envelope, restore_value_types, transform_response_data};
pub use serializer::FriendlySerializer;
pub use tree::{ErrorDetail, ErrorNode, ErrorTree, ValidationError};
pub use validators::{FieldValidator, FnValidator};
