//! Exception handler producing friendly error responses

use crate::entry::{code_value, is_pretty_body};
use crate::restore::{restore_envelope, transform_response_data};
use http::StatusCode;
use reinhardt_friendly_conf::FriendlySettings;
use serde_json::{Map, Value};
use std::error::Error;

/// Exceptions that have a native API error response
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiException {
	#[error("{0}")]
	Generic(String),
	#[error("{0}")]
	Parse(String),
	#[error("{0}")]
	AuthenticationFailed(String),
	#[error("{0}")]
	NotAuthenticated(String),
	#[error("{0}")]
	PermissionDenied(String),
	#[error("{0}")]
	NotFound(String),
	#[error("Method \"{0}\" not allowed.")]
	MethodNotAllowed(String),
	#[error("{0}")]
	NotAcceptable(String),
	#[error("Unsupported media type \"{0}\" in request.")]
	UnsupportedMediaType(String),
	#[error("Request was throttled.{}", throttle_suffix(.wait))]
	Throttled { wait: Option<u64> },
	/// Validation failure carrying the serializer's error body
	#[error("Invalid input.")]
	Validation(Value),
}

impl ApiException {
	/// Name used to look up the exception's code
	pub fn name(&self) -> &'static str {
		match self {
			ApiException::Generic(_) => "APIException",
			ApiException::Parse(_) => "ParseError",
			ApiException::AuthenticationFailed(_) => "AuthenticationFailed",
			ApiException::NotAuthenticated(_) => "NotAuthenticated",
			ApiException::PermissionDenied(_) => "PermissionDenied",
			ApiException::NotFound(_) => "NotFound",
			ApiException::MethodNotAllowed(_) => "MethodNotAllowed",
			ApiException::NotAcceptable(_) => "NotAcceptable",
			ApiException::UnsupportedMediaType(_) => "UnsupportedMediaType",
			ApiException::Throttled { .. } => "Throttled",
			ApiException::Validation(_) => "ValidationError",
		}
	}

	pub fn status(&self) -> StatusCode {
		match self {
			ApiException::Generic(_) => StatusCode::INTERNAL_SERVER_ERROR,
			ApiException::Parse(_) | ApiException::Validation(_) => StatusCode::BAD_REQUEST,
			ApiException::AuthenticationFailed(_) | ApiException::NotAuthenticated(_) => {
				StatusCode::UNAUTHORIZED
			}
			ApiException::PermissionDenied(_) => StatusCode::FORBIDDEN,
			ApiException::NotFound(_) => StatusCode::NOT_FOUND,
			ApiException::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
			ApiException::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
			ApiException::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
			ApiException::Throttled { .. } => StatusCode::TOO_MANY_REQUESTS,
		}
	}

	/// Native response body before friendly post-processing
	pub fn response_data(&self) -> Value {
		match self {
			ApiException::Validation(body) => body.clone(),
			other => {
				let mut map = Map::new();
				map.insert("detail".to_string(), Value::String(other.to_string()));
				Value::Object(map)
			}
		}
	}
}

fn throttle_suffix(wait: &Option<u64>) -> String {
	match wait {
		Some(seconds) => format!(" Expected available in {} seconds.", seconds),
		None => String::new(),
	}
}

/// HTTP error response produced by [`friendly_exception_handler`]
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
	pub status: StatusCode,
	pub body: Map<String, Value>,
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(items) => !items.is_empty(),
		Value::Object(map) => !map.is_empty(),
	}
}

/// Turn an error into a friendly response, if it has one
///
/// Errors other than [`ApiException`] yield `None` unless
/// `catch_all_exceptions` is set, in which case they are reported as a
/// generic server error.
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::{ApiException, friendly_exception_handler};
/// use reinhardt_friendly_conf::FriendlySettings;
/// use serde_json::json;
///
/// let settings = FriendlySettings::default();
/// let error = ApiException::NotFound("Not found.".to_string());
///
/// let response = friendly_exception_handler(&error, &settings).unwrap();
///
/// assert_eq!(response.status, http::StatusCode::NOT_FOUND);
/// assert_eq!(
///     serde_json::Value::Object(response.body),
///     json!({"code": 1006, "message": "Not found.", "errors": []})
/// );
/// ```
pub fn friendly_exception_handler(
	error: &(dyn Error + 'static),
	settings: &FriendlySettings,
) -> Option<ErrorResponse> {
	let coerced;
	let exception = match error.downcast_ref::<ApiException>() {
		Some(exception) => exception,
		None if settings.catch_all_exceptions => {
			tracing::debug!(error = %error, "coercing unhandled error into APIException");
			coerced = ApiException::Generic(error.to_string());
			&coerced
		}
		None => return None,
	};
	let status = exception.status();
	let data = exception.response_data();

	let pretty = is_pretty_body(&data);
	let mut body = match data {
		Value::Object(body) if pretty => {
			return Some(ErrorResponse {
				status,
				body: restore_envelope(body),
			});
		}
		other => transform_response_data(other),
	};
	let code = code_value(settings.exception_code(exception.name()));

	if let Some(detail) = body.shift_remove("detail")
		&& is_truthy(&detail)
	{
		body.insert("code".to_string(), code.clone());
		body.insert("message".to_string(), detail);
		body.insert("errors".to_string(), Value::Array(Vec::new()));
	}
	body.entry("errors").or_insert_with(|| Value::Array(Vec::new()));
	body.entry("code").or_insert(code);
	body.entry("message")
		.or_insert_with(|| Value::String("Error".to_string()));

	Some(ErrorResponse { status, body })
}
