//! Friendly error entries and the response envelope

use crate::tree::{ErrorNode, ErrorTree};
use reinhardt_friendly_conf::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One classified error
///
/// The top-level entry of a response is the *envelope*: it has no `field`
/// and carries the field entries in `errors`. A nested-object failure is a
/// field entry whose `errors` hold the nested entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
	pub code: Option<ErrorCode>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub field: Option<String>,
	pub message: String,
	#[serde(default)]
	pub errors: Vec<ErrorEntry>,
}

impl ErrorEntry {
	/// Leaf entry for one field message
	pub fn field(code: Option<ErrorCode>, field: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			code,
			field: Some(field.into()),
			message: message.into(),
			errors: Vec::new(),
		}
	}

	/// Entry for an object-level message
	pub fn non_field(code: Option<ErrorCode>, message: impl Into<String>) -> Self {
		Self {
			code,
			field: None,
			message: message.into(),
			errors: Vec::new(),
		}
	}

	/// Top-level envelope
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_friendly_core::ErrorEntry;
	/// use reinhardt_friendly_conf::ErrorCode;
	///
	/// let envelope = ErrorEntry::envelope(
	///     Some(ErrorCode::Numeric(1000)),
	///     "Validation Failed",
	///     vec![ErrorEntry::field(Some(2021.into()), "name", "This field is required.")],
	/// );
	///
	/// assert_eq!(
	///     serde_json::to_value(&envelope).unwrap(),
	///     serde_json::json!({
	///         "code": 1000,
	///         "message": "Validation Failed",
	///         "errors": [{
	///             "code": 2021,
	///             "field": "name",
	///             "message": "This field is required.",
	///             "errors": []
	///         }]
	///     })
	/// );
	/// ```
	pub fn envelope(code: Option<ErrorCode>, message: impl Into<String>, errors: Vec<ErrorEntry>) -> Self {
		Self {
			code,
			field: None,
			message: message.into(),
			errors,
		}
	}

	/// Same entry reported under another field name
	pub fn with_field(mut self, field: Option<String>) -> Self {
		self.field = field;
		self
	}

	/// JSON form of this entry
	pub fn to_value(&self) -> Value {
		let mut map = Map::new();
		map.insert("code".to_string(), code_value(self.code.as_ref()));
		if let Some(field) = &self.field {
			map.insert("field".to_string(), Value::String(field.clone()));
		}
		map.insert("message".to_string(), Value::String(self.message.clone()));
		map.insert(
			"errors".to_string(),
			Value::Array(self.errors.iter().map(ErrorEntry::to_value).collect()),
		);
		Value::Object(map)
	}
}

/// JSON form of an optional code
pub fn code_value(code: Option<&ErrorCode>) -> Value {
	match code {
		Some(ErrorCode::Numeric(n)) => Value::from(*n),
		Some(ErrorCode::Symbolic(s)) => Value::String(s.clone()),
		None => Value::Null,
	}
}

/// JSON form of a raw error tree
pub fn tree_value(tree: &ErrorTree) -> Value {
	let map = tree
		.iter()
		.map(|(key, node)| {
			let value = match node {
				ErrorNode::Messages(details) => Value::Array(
					details
						.iter()
						.map(|d| Value::String(d.message.clone()))
						.collect(),
				),
				ErrorNode::Nested(inner) => tree_value(inner),
				ErrorNode::Detail(detail) => Value::String(detail.message.clone()),
			};
			(key.clone(), value)
		})
		.collect();
	Value::Object(map)
}

/// Result of flattening a raw error tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FriendlyErrors {
	/// Classified envelope
	Pretty(ErrorEntry),
	/// Input returned unchanged because it named no known field
	Raw(ErrorTree),
}

impl FriendlyErrors {
	pub fn is_pretty(&self) -> bool {
		matches!(self, FriendlyErrors::Pretty(_))
	}

	pub fn as_pretty(&self) -> Option<&ErrorEntry> {
		match self {
			FriendlyErrors::Pretty(entry) => Some(entry),
			FriendlyErrors::Raw(_) => None,
		}
	}

	pub fn into_pretty(self) -> Option<ErrorEntry> {
		match self {
			FriendlyErrors::Pretty(entry) => Some(entry),
			FriendlyErrors::Raw(_) => None,
		}
	}

	pub fn to_value(&self) -> Value {
		match self {
			FriendlyErrors::Pretty(entry) => entry.to_value(),
			FriendlyErrors::Raw(tree) => tree_value(tree),
		}
	}
}

/// Whether a response body already has the envelope shape
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::entry::is_pretty_body;
/// use serde_json::json;
///
/// assert!(is_pretty_body(&json!({"code": 1000, "message": "m", "errors": []})));
/// assert!(!is_pretty_body(&json!({"code": 1000, "message": "m"})));
/// assert!(!is_pretty_body(&json!({"code": 1000, "message": "m", "errors": "x"})));
/// ```
pub fn is_pretty_body(body: &Value) -> bool {
	match body {
		Value::Object(map) => {
			map.contains_key("code")
				&& map.contains_key("message")
				&& map.get("errors").is_some_and(Value::is_array)
		}
		_ => false,
	}
}
