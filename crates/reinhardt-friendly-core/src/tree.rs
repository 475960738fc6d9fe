//! Raw error tree produced by the validation engine

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One formatted validation message
///
/// Serializes as the bare message string. The optional `code` is the
/// machine-readable rule name the engine attached to the message, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
	pub message: String,
	pub code: Option<String>,
}

impl ErrorDetail {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			code: None,
		}
	}

	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());
		self
	}
}

impl From<&str> for ErrorDetail {
	fn from(message: &str) -> Self {
		Self::new(message)
	}
}

impl From<String> for ErrorDetail {
	fn from(message: String) -> Self {
		Self::new(message)
	}
}

impl Serialize for ErrorDetail {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.message)
	}
}

/// Scalars are accepted and stringified, matching how the engine coerces
/// every error value to text.
impl<'de> Deserialize<'de> for ErrorDetail {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		match Value::deserialize(deserializer)? {
			Value::String(s) => Ok(Self::new(s)),
			Value::Number(n) => Ok(Self::new(n.to_string())),
			Value::Bool(b) => Ok(Self::new(b.to_string())),
			Value::Null => Ok(Self::new("None")),
			other => Err(de::Error::custom(format!(
				"expected an error message, found {}",
				other
			))),
		}
	}
}

/// Errors recorded under one key of an [`ErrorTree`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorNode {
	/// Leaf messages of a field, or object-level messages
	Messages(Vec<ErrorDetail>),
	/// Errors of a nested object
	Nested(ErrorTree),
	/// A single bare value from a developer-built payload
	Detail(ErrorDetail),
}

impl ErrorNode {
	/// Leaf details of this node; empty for nested trees
	pub fn details(&self) -> &[ErrorDetail] {
		match self {
			ErrorNode::Messages(details) => details,
			ErrorNode::Detail(detail) => std::slice::from_ref(detail),
			ErrorNode::Nested(_) => &[],
		}
	}
}

/// Ordered mapping of field name to recorded errors
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::ErrorTree;
///
/// let tree: ErrorTree = serde_json::from_value(serde_json::json!({
///     "email": ["Enter a valid email address."],
///     "address": {"city": ["This field is required."]},
/// }))
/// .unwrap();
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["email", "address"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorTree(IndexMap<String, ErrorNode>);

impl ErrorTree {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, key: impl Into<String>, node: ErrorNode) {
		self.0.insert(key.into(), node);
	}

	/// Record leaf messages under `key`
	pub fn with_messages<I, D>(mut self, key: impl Into<String>, messages: I) -> Self
	where
		I: IntoIterator<Item = D>,
		D: Into<ErrorDetail>,
	{
		let details = messages.into_iter().map(Into::into).collect();
		self.insert(key, ErrorNode::Messages(details));
		self
	}

	/// Record a nested tree under `key`
	pub fn with_nested(mut self, key: impl Into<String>, tree: ErrorTree) -> Self {
		self.insert(key, ErrorNode::Nested(tree));
		self
	}

	/// Record a single bare detail under `key`
	pub fn with_detail(mut self, key: impl Into<String>, detail: impl Into<ErrorDetail>) -> Self {
		self.insert(key, ErrorNode::Detail(detail.into()));
		self
	}

	pub fn get(&self, key: &str) -> Option<&ErrorNode> {
		self.0.get(key)
	}

	pub fn iter(&self) -> Iter<'_, String, ErrorNode> {
		self.0.iter()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<'a> IntoIterator for &'a ErrorTree {
	type Item = (&'a String, &'a ErrorNode);
	type IntoIter = Iter<'a, String, ErrorNode>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// Error raised by object-level validation
///
/// A bare message or a list is an object-level error; a mapping is kept
/// as-is, so developer payloads such as `{"code": ..., "message": ...}`
/// survive without their values being wrapped in lists.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
	#[error("{}", .0.message)]
	Detail(ErrorDetail),
	#[error("{} validation errors", .0.len())]
	List(Vec<ErrorDetail>),
	#[error("validation failed for {} keys", .0.len())]
	Tree(ErrorTree),
}

impl ValidationError {
	/// Convert into the error tree reported for the serializer
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_friendly_core::{ErrorDetail, ErrorNode, ValidationError};
	///
	/// let tree = ValidationError::Detail(ErrorDetail::new("Dates overlap."))
	///     .into_tree("non_field_errors");
	///
	/// assert_eq!(
	///     tree.get("non_field_errors"),
	///     Some(&ErrorNode::Messages(vec![ErrorDetail::new("Dates overlap.")]))
	/// );
	/// ```
	pub fn into_tree(self, non_field_key: &str) -> ErrorTree {
		match self {
			ValidationError::Detail(detail) => {
				ErrorTree::new().with_messages(non_field_key, [detail])
			}
			ValidationError::List(details) => ErrorTree::new().with_messages(non_field_key, details),
			ValidationError::Tree(tree) => tree,
		}
	}
}
