//! Validation and coercion of JSON values against schema nodes
//!
//! Validation walks the node and the value together, collecting every issue
//! instead of stopping at the first. The output is a cleaned copy of the
//! input: numbers coerced, unknown object keys dropped, absent optional
//! properties left out.

use crate::errors::{Issue, ValidationErrors};
use crate::node::{EnumSchema, NumberSchema, ObjectSchema, SchemaNode, StringSchema};
use serde_json::{Map, Value};

impl SchemaNode {
	/// Validate `value`, returning the cleaned value or every issue found
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_schema::{SchemaNode, coerce_number};
	/// use serde_json::json;
	///
	/// let age = SchemaNode::from(coerce_number().min(0.0));
	/// assert_eq!(age.validate(&json!("42")).unwrap(), json!(42));
	/// assert!(age.validate(&json!(-1)).is_err());
	/// ```
	pub fn validate(&self, value: &Value) -> Result<Value, ValidationErrors> {
		let mut issues = Vec::new();
		let output = validate_node(self, Some(value), &mut Vec::new(), &mut issues);
		match output {
			Some(output) if issues.is_empty() => Ok(output),
			_ => Err(ValidationErrors::new(issues)),
		}
	}
}

impl ObjectSchema {
	/// Validate a JSON value expected to be an object
	pub fn validate(&self, value: &Value) -> Result<Value, ValidationErrors> {
		let mut issues = Vec::new();
		let output = validate_object(self, Some(value), &mut Vec::new(), &mut issues);
		match output {
			Some(output) if issues.is_empty() => Ok(Value::Object(output)),
			_ => Err(ValidationErrors::new(issues)),
		}
	}

	/// Validate a collected value mapping
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_schema::{object, string};
	/// use serde_json::{Map, json};
	///
	/// let schema = object().field("name", string().min(1));
	/// let mut values = Map::new();
	/// values.insert("name".into(), json!(""));
	/// values.insert("extra".into(), json!(1));
	///
	/// let errors = schema.safe_parse(&values).unwrap_err();
	/// assert_eq!(
	/// 	errors.field_errors()["name"],
	/// 	"String must contain at least 1 character(s)"
	/// );
	///
	/// values.insert("name".into(), json!("Ann"));
	/// let parsed = schema.safe_parse(&values).unwrap();
	/// assert!(parsed.get("extra").is_none());
	/// ```
	pub fn safe_parse(
		&self,
		values: &Map<String, Value>,
	) -> Result<Map<String, Value>, ValidationErrors> {
		let mut issues = Vec::new();
		let output = validate_shape(self, values, &mut Vec::new(), &mut issues);
		if issues.is_empty() {
			Ok(output)
		} else {
			tracing::debug!(issues = issues.len(), "object failed validation");
			Err(ValidationErrors::new(issues))
		}
	}
}

/// Name of the JSON type of `value` as used in type mismatch messages
fn type_name(value: Option<&Value>) -> &'static str {
	match value {
		None => "undefined",
		Some(Value::Null) => "null",
		Some(Value::Bool(_)) => "boolean",
		Some(Value::Number(_)) => "number",
		Some(Value::String(_)) => "string",
		Some(Value::Array(_)) => "array",
		Some(Value::Object(_)) => "object",
	}
}

fn push_issue(issues: &mut Vec<Issue>, path: &[String], message: impl Into<String>) {
	issues.push(Issue::new(path.to_vec(), message));
}

fn invalid_type(issues: &mut Vec<Issue>, path: &[String], expected: &str, value: Option<&Value>) {
	let message = match value {
		None => "Required".to_string(),
		Some(value) => format!("Expected {expected}, received {}", type_name(Some(value))),
	};
	push_issue(issues, path, message);
}

fn validate_node(
	node: &SchemaNode,
	value: Option<&Value>,
	path: &mut Vec<String>,
	issues: &mut Vec<Issue>,
) -> Option<Value> {
	match node {
		SchemaNode::String(schema) => validate_string(schema, value, path, issues),
		SchemaNode::Number(schema) => validate_number(schema, value, path, issues),
		SchemaNode::Boolean(_) => match value {
			Some(Value::Bool(b)) => Some(Value::Bool(*b)),
			other => {
				invalid_type(issues, path, "boolean", other);
				None
			}
		},
		SchemaNode::Enum(schema) => validate_enum(schema, value, path, issues),
		SchemaNode::Object(schema) => {
			validate_object(schema, value, path, issues).map(Value::Object)
		}
		SchemaNode::Optional(inner) => match value {
			// An absent optional validates to nothing and is left out of the output.
			None => None,
			Some(_) => validate_node(inner, value, path, issues),
		},
		SchemaNode::Array(inner) => match value {
			Some(Value::Array(items)) => {
				let mut output = Vec::with_capacity(items.len());
				for (index, item) in items.iter().enumerate() {
					path.push(index.to_string());
					if let Some(item) = validate_node(inner, Some(item), path, issues) {
						output.push(item);
					}
					path.pop();
				}
				Some(Value::Array(output))
			}
			other => {
				invalid_type(issues, path, "array", other);
				None
			}
		},
	}
}

fn validate_string(
	schema: &StringSchema,
	value: Option<&Value>,
	path: &[String],
	issues: &mut Vec<Issue>,
) -> Option<Value> {
	let Some(Value::String(text)) = value else {
		invalid_type(issues, path, "string", value);
		return None;
	};
	for check in &schema.checks {
		if let Some(message) = check.evaluate(text) {
			push_issue(issues, path, message);
		}
	}
	Some(Value::String(text.clone()))
}

fn validate_number(
	schema: &NumberSchema,
	value: Option<&Value>,
	path: &[String],
	issues: &mut Vec<Issue>,
) -> Option<Value> {
	let number = if schema.coerce {
		coerce_to_number(value)
	} else {
		match value {
			Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
			other => {
				invalid_type(issues, path, "number", other);
				return None;
			}
		}
	};

	if number.is_nan() {
		push_issue(issues, path, "Expected number, received nan");
		return None;
	}
	if number.is_infinite() {
		push_issue(issues, path, "Number must be finite");
		return None;
	}
	for check in &schema.checks {
		if let Some(message) = check.evaluate(number) {
			push_issue(issues, path, message);
		}
	}
	Some(number_to_value(number))
}

fn validate_enum(
	schema: &EnumSchema,
	value: Option<&Value>,
	path: &[String],
	issues: &mut Vec<Issue>,
) -> Option<Value> {
	let expected = schema
		.values()
		.iter()
		.map(|v| format!("'{v}'"))
		.collect::<Vec<_>>()
		.join(" | ");
	match value {
		Some(Value::String(text)) if schema.contains(text) => Some(Value::String(text.clone())),
		Some(Value::String(text)) => {
			push_issue(
				issues,
				path,
				format!("Invalid enum value. Expected {expected}, received '{text}'"),
			);
			None
		}
		None => {
			push_issue(issues, path, "Required");
			None
		}
		Some(other) => {
			push_issue(
				issues,
				path,
				format!("Expected {expected}, received {}", type_name(Some(other))),
			);
			None
		}
	}
}

fn validate_object(
	schema: &ObjectSchema,
	value: Option<&Value>,
	path: &mut Vec<String>,
	issues: &mut Vec<Issue>,
) -> Option<Map<String, Value>> {
	let Some(Value::Object(map)) = value else {
		invalid_type(issues, path, "object", value);
		return None;
	};
	Some(validate_shape(schema, map, path, issues))
}

fn validate_shape(
	schema: &ObjectSchema,
	map: &Map<String, Value>,
	path: &mut Vec<String>,
	issues: &mut Vec<Issue>,
) -> Map<String, Value> {
	let issues_before = issues.len();
	let mut output = Map::new();

	for (key, node) in schema.shape() {
		path.push(key.clone());
		if let Some(value) = validate_node(node, map.get(key), path, issues) {
			output.insert(key.clone(), value);
		}
		path.pop();
	}

	// Refinements only see objects whose properties all validated.
	if issues.len() == issues_before {
		for refinement in schema.refinements() {
			if !refinement.holds(&output) {
				push_issue(issues, path, refinement.message.clone());
			}
		}
	}
	output
}

/// Convert a JSON value to a number the way `Number(value)` does
///
/// # Examples
///
/// ```
/// use formsmith_schema::validate::coerce_to_number;
/// use serde_json::json;
///
/// assert_eq!(coerce_to_number(Some(&json!(" 12.5 "))), 12.5);
/// assert_eq!(coerce_to_number(Some(&json!(""))), 0.0);
/// assert_eq!(coerce_to_number(Some(&json!(true))), 1.0);
/// assert_eq!(coerce_to_number(Some(&json!(null))), 0.0);
/// assert!(coerce_to_number(Some(&json!("12px"))).is_nan());
/// assert!(coerce_to_number(None).is_nan());
/// ```
pub fn coerce_to_number(value: Option<&Value>) -> f64 {
	match value {
		None => f64::NAN,
		Some(Value::Null) => 0.0,
		Some(Value::Bool(b)) => f64::from(u8::from(*b)),
		Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
		Some(Value::String(text)) => parse_number(text),
		Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
	}
}

fn parse_number(text: &str) -> f64 {
	let trimmed = text.trim();
	if trimmed.is_empty() {
		return 0.0;
	}

	let radix = match trimmed.get(..2) {
		Some("0x") | Some("0X") => Some(16),
		Some("0o") | Some("0O") => Some(8),
		Some("0b") | Some("0B") => Some(2),
		_ => None,
	};
	if let Some(radix) = radix {
		return parse_radix_digits(&trimmed[2..], radix);
	}

	let (negative, unsigned) = match trimmed.as_bytes()[0] {
		b'-' => (true, &trimmed[1..]),
		b'+' => (false, &trimmed[1..]),
		_ => (false, trimmed),
	};
	if unsigned == "Infinity" {
		return if negative {
			f64::NEG_INFINITY
		} else {
			f64::INFINITY
		};
	}
	// Rust also accepts spellings like "inf" and "NaN" that are not numbers here.
	if !unsigned
		.chars()
		.all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
	{
		return f64::NAN;
	}
	trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Unsigned digits after a `0x`/`0o`/`0b` prefix, accumulated in `f64` so
/// values past `u64::MAX` still convert
fn parse_radix_digits(digits: &str, radix: u32) -> f64 {
	if digits.is_empty() {
		return f64::NAN;
	}
	digits
		.chars()
		.try_fold(0.0_f64, |acc, c| {
			c.to_digit(radix)
				.map(|digit| acc * f64::from(radix) + f64::from(digit))
		})
		.unwrap_or(f64::NAN)
}

/// JSON form of a validated number, integral values as integers
fn number_to_value(number: f64) -> Value {
	if number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 {
		Value::from(number as i64)
	} else {
		serde_json::Number::from_f64(number)
			.map(Value::Number)
			.unwrap_or(Value::Null)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node::{SchemaNodeExt, boolean, coerce_number, enumeration, number, object, string};
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!(5), "Expected string, received number")]
	#[case(json!(null), "Expected string, received null")]
	#[case(json!(["a"]), "Expected string, received array")]
	fn test_string_type_mismatch(#[case] input: Value, #[case] message: &str) {
		let schema = SchemaNode::from(string());

		let errors = schema.validate(&input).unwrap_err();

		assert_eq!(errors.issues()[0].message, message);
	}

	#[rstest]
	fn test_missing_property_is_required() {
		// Arrange
		let schema = object().field("name", string()).field("tos", boolean());

		// Act
		let errors = schema.safe_parse(&Map::new()).unwrap_err();

		// Assert
		let map = errors.field_errors();
		assert_eq!(map["name"], "Required");
		assert_eq!(map["tos"], "Required");
	}

	#[rstest]
	fn test_optional_property_may_be_absent() {
		let schema = object().field("nickname", string().optional());

		let parsed = schema.safe_parse(&Map::new()).unwrap();

		assert!(parsed.is_empty());
	}

	#[rstest]
	#[case(json!("30"), json!(30))]
	#[case(json!(""), json!(0))]
	#[case(json!(false), json!(0))]
	#[case(json!("0x10"), json!(16))]
	#[case(json!("0b101"), json!(5))]
	#[case(json!("0x10000000000000000"), json!(18446744073709551616.0))]
	#[case(json!("1e3"), json!(1000))]
	#[case(json!(" 2.5 "), json!(2.5))]
	fn test_coercion(#[case] input: Value, #[case] expected: Value) {
		let schema = SchemaNode::from(coerce_number());

		assert_eq!(schema.validate(&input).unwrap(), expected);
	}

	#[rstest]
	fn test_large_bound_message_is_exact() {
		let schema = SchemaNode::from(number().min(1e20));

		let errors = schema.validate(&json!(1.0)).unwrap_err();

		assert_eq!(
			errors.issues()[0].message,
			"Number must be greater than or equal to 100000000000000000000"
		);
	}

	#[rstest]
	#[case(json!("abc"))]
	#[case(json!("inf"))]
	#[case(json!("NaN"))]
	#[case(json!("0x+10"))]
	#[case(json!("0x-10"))]
	#[case(json!("0b"))]
	#[case(json!("0o19"))]
	#[case(json!({}))]
	fn test_unconvertible_input_is_nan(#[case] input: Value) {
		let schema = SchemaNode::from(coerce_number());

		let errors = schema.validate(&input).unwrap_err();

		assert_eq!(errors.issues()[0].message, "Expected number, received nan");
	}

	#[rstest]
	fn test_infinite_input_is_rejected() {
		let schema = SchemaNode::from(coerce_number());

		let errors = schema.validate(&json!("-Infinity")).unwrap_err();

		assert_eq!(errors.issues()[0].message, "Number must be finite");
	}

	#[rstest]
	fn test_plain_number_does_not_coerce() {
		let schema = SchemaNode::from(number());

		let errors = schema.validate(&json!("5")).unwrap_err();

		assert_eq!(errors.issues()[0].message, "Expected number, received string");
	}

	#[rstest]
	fn test_enum_messages() {
		// Arrange
		let schema = SchemaNode::from(enumeration(["male", "female"]));

		// Act
		let wrong_value = schema.validate(&json!("x")).unwrap_err();
		let wrong_type = schema.validate(&json!(1)).unwrap_err();

		// Assert
		assert_eq!(
			wrong_value.issues()[0].message,
			"Invalid enum value. Expected 'male' | 'female', received 'x'"
		);
		assert_eq!(
			wrong_type.issues()[0].message,
			"Expected 'male' | 'female', received number"
		);
	}

	#[rstest]
	fn test_nested_issue_path() {
		// Arrange
		let schema = object().field("country", object().field("options", enumeration(["USA"])));

		// Act
		let errors = schema
			.safe_parse(&Map::from_iter([("country".to_string(), json!({}))]))
			.unwrap_err();

		// Assert
		assert_eq!(errors.issues()[0].path, ["country", "options"]);
		assert_eq!(errors.field_errors()["country"], "Required");
	}

	#[rstest]
	fn test_refinement_runs_after_shape_validates() {
		// Arrange
		let schema = object()
			.field("password", string())
			.field("confirm", string())
			.refine(|v| v.get("password") == v.get("confirm"), "Passwords must match");

		// Act
		let mismatch = schema.validate(&json!({"password": "a", "confirm": "b"})).unwrap_err();
		let incomplete = schema.validate(&json!({"password": "a"})).unwrap_err();

		// Assert
		assert_eq!(mismatch.issues()[0].message, "Passwords must match");
		assert!(mismatch.issues()[0].path.is_empty());
		assert_eq!(incomplete.len(), 1);
		assert_eq!(incomplete.issues()[0].message, "Required");
	}

	#[rstest]
	fn test_array_reports_element_paths() {
		let schema = SchemaNode::from(object().field("tags", string().min(2).array()));

		let errors = schema.validate(&json!({"tags": ["ok", "x"]})).unwrap_err();

		assert_eq!(errors.issues()[0].path, ["tags", "1"]);
	}

	#[rstest]
	fn test_checks_collect_every_failure() {
		let schema = SchemaNode::from(string().min(10).email());

		let errors = schema.validate(&json!("bad")).unwrap_err();

		assert_eq!(errors.len(), 2);
	}
}
