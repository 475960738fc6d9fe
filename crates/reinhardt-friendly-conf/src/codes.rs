//! Client-facing error codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable error code attached to a friendly error entry.
///
/// Codes are usually numeric, but catalogs may also use symbolic codes such
/// as `"E_REQUIRED"`. Both forms serialize untagged, so a numeric code is a
/// JSON number on the wire and a symbolic code is a JSON string.
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_conf::ErrorCode;
///
/// let code = ErrorCode::from(2021);
/// assert_eq!(serde_json::to_string(&code).unwrap(), "2021");
///
/// let code = ErrorCode::from("E_REQUIRED");
/// assert_eq!(serde_json::to_string(&code).unwrap(), "\"E_REQUIRED\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
	/// Numeric code, e.g. `2021`
	Numeric(i64),
	/// Symbolic code, e.g. `"E_REQUIRED"`
	Symbolic(String),
}

impl ErrorCode {
	/// Parse a code from text, preferring the numeric form.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_friendly_conf::ErrorCode;
	///
	/// assert_eq!(ErrorCode::parse("1000"), ErrorCode::Numeric(1000));
	/// assert_eq!(ErrorCode::parse("E1000"), ErrorCode::Symbolic("E1000".to_string()));
	/// ```
	pub fn parse(text: &str) -> Self {
		let trimmed = text.trim();
		match trimmed.parse::<i64>() {
			Ok(n) => ErrorCode::Numeric(n),
			Err(_) => ErrorCode::Symbolic(trimmed.to_string()),
		}
	}

	/// Returns the numeric value, if this is a numeric code
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			ErrorCode::Numeric(n) => Some(*n),
			ErrorCode::Symbolic(_) => None,
		}
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ErrorCode::Numeric(n) => write!(f, "{}", n),
			ErrorCode::Symbolic(s) => write!(f, "{}", s),
		}
	}
}

impl From<i64> for ErrorCode {
	fn from(value: i64) -> Self {
		ErrorCode::Numeric(value)
	}
}

impl From<i32> for ErrorCode {
	fn from(value: i32) -> Self {
		ErrorCode::Numeric(i64::from(value))
	}
}

impl From<&str> for ErrorCode {
	fn from(value: &str) -> Self {
		ErrorCode::Symbolic(value.to_string())
	}
}

impl From<String> for ErrorCode {
	fn from(value: String) -> Self {
		ErrorCode::Symbolic(value)
	}
}
