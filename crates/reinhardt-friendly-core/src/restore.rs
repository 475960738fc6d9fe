//! Response value-type restoration
//!
//! The validation engine stringifies every value it stores in an error, so a
//! developer raising `{"code": 228, "detail": None}` ends up with `"228"` and
//! `"None"`. This pass undoes that on the outbound payload.

use serde_json::{Map, Value};

/// Restore integer and null values in an outbound error payload
///
/// One-element arrays collapse to their element, `"None"` becomes `null`
/// and all-digit strings become integers unless they overflow.
///
/// # Examples
///
/// ```
/// use reinhardt_friendly_core::restore::restore_value_types;
/// use serde_json::json;
///
/// assert_eq!(restore_value_types(json!("2")), json!(2));
/// assert_eq!(restore_value_types(json!("None")), json!(null));
/// assert_eq!(restore_value_types(json!(["5"])), json!(5));
/// assert_eq!(restore_value_types(json!(["a", "7"])), json!(["a", 7]));
/// ```
pub fn restore_value_types(value: Value) -> Value {
	match value {
		Value::Array(mut items) if items.len() == 1 => restore_value_types(items.remove(0)),
		Value::Array(items) => Value::Array(items.into_iter().map(restore_value_types).collect()),
		Value::Object(map) => Value::Object(
			map.into_iter()
				.map(|(key, value)| (key, restore_value_types(value)))
				.collect(),
		),
		Value::String(s) if s == "None" => Value::Null,
		Value::String(s) if is_ascii_digits(&s) => match s.parse::<u64>() {
			Ok(n) => Value::from(n),
			Err(_) => Value::String(s),
		},
		other => other,
	}
}

fn is_ascii_digits(s: &str) -> bool {
	!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Normalize a response body before it is checked and coded
///
/// Bodies that are not objects are wrapped as `{"detail": body}`; every
/// top-level value is then restored.
pub fn transform_response_data(body: Value) -> Map<String, Value> {
	let map = match body {
		Value::Object(map) => map,
		other => {
			let mut map = Map::new();
			map.insert("detail".to_string(), other);
			map
		}
	};
	map.into_iter()
		.map(|(key, value)| (key, restore_value_types(value)))
		.collect()
}

/// Restore an envelope-shaped body, keeping its `errors` lists as lists
///
/// Entries inside `errors` are restored the same way at every depth. Field
/// names are left as strings.
pub fn restore_envelope(body: Map<String, Value>) -> Map<String, Value> {
	body.into_iter()
		.map(|(key, value)| {
			let value = match value {
				Value::Array(entries) if key == "errors" => Value::Array(
					entries
						.into_iter()
						.map(|entry| match entry {
							Value::Object(map) => Value::Object(restore_envelope(map)),
							other => restore_value_types(other),
						})
						.collect(),
				),
				value if key == "field" => value,
				other => restore_value_types(other),
			};
			(key, value)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!("2"), json!(2))]
	#[case(json!("None"), json!(null))]
	#[case(json!(["5"]), json!(5))]
	#[case(json!([["9"]]), json!(9))]
	#[case(json!(""), json!(""))]
	#[case(json!("12a"), json!("12a"))]
	#[case(json!("-3"), json!("-3"))]
	#[case(json!("99999999999999999999999"), json!("99999999999999999999999"))]
	#[case(json!({"code": "228", "message": ["kek"]}), json!({"code": 228, "message": "kek"}))]
	#[case(json!([]), json!([]))]
	#[case(json!(true), json!(true))]
	fn test_restore(#[case] input: Value, #[case] expected: Value) {
		assert_eq!(restore_value_types(input), expected);
	}

	#[rstest]
	fn test_transform_wraps_non_object() {
		// Arrange
		let body = json!(["Not found."]);

		// Act
		let data = transform_response_data(body);

		// Assert
		assert_eq!(Value::Object(data), json!({"detail": "Not found."}));
	}

	#[rstest]
	fn test_transform_keeps_key_order() {
		let data = transform_response_data(json!({"z": "1", "a": "None"}));
		let keys: Vec<_> = data.keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["z", "a"]);
		assert_eq!(data["a"], Value::Null);
	}

	#[rstest]
	fn test_envelope_keeps_single_entry_lists() {
		// Arrange
		let body = json!({
			"code": "228",
			"message": ["kek"],
			"errors": [{
				"code": "7",
				"field": "42",
				"message": "None",
				"errors": [{"code": "8", "message": "inner", "errors": []}]
			}]
		});
		let Value::Object(body) = body else {
			unreachable!()
		};

		// Act
		let restored = restore_envelope(body);

		// Assert
		assert_eq!(
			Value::Object(restored),
			json!({
				"code": 228,
				"message": "kek",
				"errors": [{
					"code": 7,
					"field": "42",
					"message": null,
					"errors": [{"code": 8, "message": "inner", "errors": []}]
				}]
			})
		);
	}

	proptest! {
		#[test]
		fn test_digit_strings_become_integers(n in any::<u64>()) {
			prop_assert_eq!(restore_value_types(json!(n.to_string())), json!(n));
		}

		#[test]
		fn test_non_digit_strings_pass_through(s in "[a-zA-Z ]{1,20}") {
			prop_assume!(s != "None");
			prop_assert_eq!(restore_value_types(json!(s.clone())), json!(s));
		}
	}
}
