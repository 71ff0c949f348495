//! Per-kind editors for a single field definition
//!
//! [`render_editor`] describes the widgets that edit one field; the host
//! reports each change back as an [`EditorEvent`] and [`apply_edit`] folds it
//! into a full replacement of the field. Only `text` and `number` fields have
//! editors; every other kind renders [`View::Empty`].

use crate::field::{Field, NumberField, TextField};
use crate::widget::{InputValue, View, Widget, WidgetNode, number_value};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const KEY_NAME: &str = "name";
pub const KEY_LABEL: &str = "label";
pub const KEY_REQUIRED: &str = "required";
pub const KEY_IS_EMAIL: &str = "isEmail";
pub const KEY_IS_URL: &str = "isURL";
pub const KEY_MIN: &str = "min";
pub const KEY_MAX: &str = "max";

/// One user edit: the attribute key that changed and its new raw value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorEvent {
	pub key: String,
	pub input: InputValue,
}

impl EditorEvent {
	pub fn new(key: impl Into<String>, input: InputValue) -> Self {
		Self {
			key: key.into(),
			input,
		}
	}

	pub fn text(key: impl Into<String>, text: impl Into<String>) -> Self {
		Self::new(key, InputValue::Text(text.into()))
	}

	pub fn checked(key: impl Into<String>, checked: bool) -> Self {
		Self::new(key, InputValue::Checked(checked))
	}
}

/// Editor widgets for `field` with bare attribute keys as widget names
///
/// # Examples
///
/// ```
/// use formsmith_forms::{Field, FieldKind, editor::render_editor};
///
/// assert!(render_editor(&Field::blank(FieldKind::Boolean, "f1")).is_empty());
///
/// let view = render_editor(&Field::blank(FieldKind::Number, "f2"));
/// assert!(view.find("min").is_some());
/// assert!(view.find("isEmail").is_none());
/// ```
pub fn render_editor(field: &Field) -> View {
	render_editor_with_prefix(field, "")
}

/// Editor widgets for `field`, naming each widget `{prefix}-{key}`
///
/// An empty prefix yields bare keys. The assembly state uses the field id as
/// prefix so that several editors can share one page.
pub fn render_editor_with_prefix(field: &Field, prefix: &str) -> View {
	let name = |key: &str| {
		if prefix.is_empty() {
			key.to_string()
		} else {
			format!("{prefix}-{key}")
		}
	};

	match field {
		Field::Text(text) => render_text_editor(text, name),
		Field::Number(number) => render_number_editor(number, name),
		other => {
			tracing::debug!(kind = %other.kind(), id = other.id(), "no editor for field kind");
			View::Empty
		}
	}
}

fn render_text_editor(field: &TextField, name: impl Fn(&str) -> String) -> View {
	let base = &field.base;
	View::container(
		"field-editor text-editor",
		vec![
			WidgetNode::new(Widget::TextInput, name(KEY_NAME))
				.with_label(base.label.clone())
				.with_placeholder("Input placeholder")
				.with_value(base.name.clone())
				.into(),
			WidgetNode::new(Widget::TextInput, name(KEY_LABEL))
				.with_label("Label")
				.with_value(base.label.clone())
				.into(),
			View::container(
				"field-editor-flags",
				vec![
					WidgetNode::new(Widget::Switch, name(KEY_REQUIRED))
						.with_label("Required")
						.with_value(base.required)
						.into(),
					WidgetNode::new(Widget::Switch, name(KEY_IS_EMAIL))
						.with_label("Email")
						.with_value(field.is_email.unwrap_or(false))
						.into(),
					WidgetNode::new(Widget::Switch, name(KEY_IS_URL))
						.with_label("URL")
						.with_value(field.is_url.unwrap_or(false))
						.into(),
				],
			),
		],
	)
}

fn render_number_editor(field: &NumberField, name: impl Fn(&str) -> String) -> View {
	let base = &field.base;
	// The name input is a plain text input even though the field is numeric.
	View::container(
		"field-editor number-editor",
		vec![
			View::Text(base.label.clone()),
			WidgetNode::new(Widget::TextInput, name(KEY_NAME))
				.with_value(base.name.clone())
				.into(),
			WidgetNode::new(Widget::Checkbox, name(KEY_REQUIRED))
				.with_label("Required")
				.with_value(base.required)
				.into(),
			WidgetNode::new(Widget::NumberInput, name(KEY_MIN))
				.with_placeholder("Min")
				.with_value(number_value(field.min))
				.into(),
			WidgetNode::new(Widget::NumberInput, name(KEY_MAX))
				.with_placeholder("Max")
				.with_value(number_value(field.max))
				.into(),
		],
	)
}

/// Fold one edit into a copy of `field`
///
/// The changed key is shallow-merged; every other attribute, including the
/// kind tag, is carried over. Keys the field's editor does not expose, and
/// inputs of the wrong shape for a key, return an unchanged copy.
///
/// # Examples
///
/// ```
/// use formsmith_forms::{Field, FieldKind, editor::{EditorEvent, apply_edit}};
///
/// let field = Field::blank(FieldKind::Text, "f1");
/// let edited = apply_edit(&field, &EditorEvent::text("name", "email"));
/// let edited = apply_edit(&edited, &EditorEvent::checked("isEmail", true));
///
/// assert_eq!(edited.name(), "email");
/// assert_eq!(edited.id(), "f1");
/// ```
pub fn apply_edit(field: &Field, event: &EditorEvent) -> Field {
	let mut updated = field.clone();
	let applied = match &mut updated {
		Field::Text(text) => apply_text_edit(text, event),
		Field::Number(number) => apply_number_edit(number, event),
		_ => false,
	};
	if !applied {
		tracing::debug!(
			kind = %field.kind(),
			key = %event.key,
			"ignoring edit the field's editor does not expose"
		);
	}
	updated
}

fn apply_text_edit(field: &mut TextField, event: &EditorEvent) -> bool {
	match (event.key.as_str(), &event.input) {
		(KEY_NAME, InputValue::Text(value)) => field.base.name = value.clone(),
		(KEY_LABEL, InputValue::Text(value)) => field.base.label = value.clone(),
		(KEY_REQUIRED, InputValue::Checked(checked)) => field.base.required = *checked,
		(KEY_IS_EMAIL, InputValue::Checked(checked)) => field.is_email = Some(*checked),
		(KEY_IS_URL, InputValue::Checked(checked)) => field.is_url = Some(*checked),
		_ => return false,
	}
	true
}

fn apply_number_edit(field: &mut NumberField, event: &EditorEvent) -> bool {
	match (event.key.as_str(), &event.input) {
		(KEY_NAME, InputValue::Text(value)) => field.base.name = value.clone(),
		(KEY_REQUIRED, InputValue::Checked(checked)) => field.base.required = *checked,
		(KEY_MIN, input) => match bound_input(input) {
			Some(min) => field.min = Some(min),
			None => return false,
		},
		(KEY_MAX, input) => match bound_input(input) {
			Some(max) => field.max = Some(max),
			None => return false,
		},
		_ => return false,
	}
	true
}

fn bound_input(input: &InputValue) -> Option<f64> {
	match input {
		InputValue::Text(text) => Some(parse_int(text)),
		InputValue::Number(Value::String(text)) => Some(parse_int(text)),
		InputValue::Number(Value::Null) => Some(f64::NAN),
		InputValue::Number(value) => Some(parse_int(&value.to_string())),
		InputValue::Checked(_) | InputValue::Choice(_) => None,
	}
}

/// Parse the leading integer of `input`, yielding `NaN` when there is none
///
/// Leading whitespace is skipped, an optional sign is honoured, and a `0x`
/// prefix switches to hexadecimal. Parsing stops at the first character that
/// is not a digit, so fractions are truncated.
///
/// # Examples
///
/// ```
/// use formsmith_forms::editor::parse_int;
///
/// assert_eq!(parse_int("42"), 42.0);
/// assert_eq!(parse_int("  -7"), -7.0);
/// assert_eq!(parse_int("12px"), 12.0);
/// assert_eq!(parse_int("3.9"), 3.0);
/// assert_eq!(parse_int("0x1f"), 31.0);
/// assert!(parse_int("abc").is_nan());
/// assert!(parse_int("").is_nan());
/// ```
pub fn parse_int(input: &str) -> f64 {
	let trimmed = input.trim_start();
	let (negative, unsigned) = match trimmed.as_bytes().first() {
		Some(b'-') => (true, &trimmed[1..]),
		Some(b'+') => (false, &trimmed[1..]),
		_ => (false, trimmed),
	};

	let (radix, digits) = match unsigned.get(..2) {
		Some("0x") | Some("0X") => (16, &unsigned[2..]),
		_ => (10, unsigned),
	};

	let mut seen_digit = false;
	let mut magnitude = 0.0_f64;
	for c in digits.chars() {
		let Some(digit) = c.to_digit(radix) else {
			break;
		};
		seen_digit = true;
		magnitude = magnitude * f64::from(radix) + f64::from(digit);
	}

	if !seen_digit {
		return f64::NAN;
	}
	if negative { -magnitude } else { magnitude }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::{FieldBase, FieldKind};
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_text_editor_widget_set() {
		// Arrange
		let field: Field = TextField::new(FieldBase::new("f1", "email", "Email Address")).into();

		// Act
		let view = render_editor(&field);

		// Assert
		let names: Vec<_> = view.widgets().iter().map(|w| w.name.as_str()).collect();
		assert_eq!(names, ["name", "label", "required", "isEmail", "isURL"]);
		let name = view.find("name").unwrap();
		assert_eq!(name.label.as_deref(), Some("Email Address"));
		assert_eq!(name.placeholder.as_deref(), Some("Input placeholder"));
		assert_eq!(name.value, json!("email"));
	}

	#[rstest]
	fn test_number_editor_widget_set() {
		// Arrange
		let field: Field = NumberField::new(FieldBase::new("f2", "age", "Age"))
			.with_min(0.0)
			.into();

		// Act
		let view = render_editor(&field);

		// Assert
		assert_eq!(view.find("name").unwrap().widget, Widget::TextInput);
		assert_eq!(view.find("required").unwrap().widget, Widget::Checkbox);
		assert_eq!(view.find("min").unwrap().value, json!(0));
		assert_eq!(view.find("max").unwrap().value, Value::Null);
		assert_eq!(view.find("max").unwrap().placeholder.as_deref(), Some("Max"));
	}

	#[rstest]
	#[case(FieldKind::RichText)]
	#[case(FieldKind::Boolean)]
	#[case(FieldKind::DateTime)]
	#[case(FieldKind::Select)]
	#[case(FieldKind::File)]
	#[case(FieldKind::Json)]
	fn test_kinds_without_editor_render_empty(#[case] kind: FieldKind) {
		let field = Field::blank(kind, "f");

		assert_eq!(render_editor(&field), View::Empty);
		assert_eq!(apply_edit(&field, &EditorEvent::text("name", "x")), field);
	}

	#[rstest]
	fn test_prefixed_widget_names() {
		let field = Field::blank(FieldKind::Text, "field_1");

		let view = render_editor_with_prefix(&field, "field_1");

		assert!(view.find("field_1-isURL").is_some());
	}

	#[rstest]
	fn test_apply_edit_merges_only_changed_key() {
		// Arrange
		let field: Field = TextField::new(FieldBase::new("f1", "site", "Site").required())
			.url()
			.into();

		// Act
		let edited = apply_edit(&field, &EditorEvent::text("label", "Homepage"));

		// Assert
		match edited {
			Field::Text(text) => {
				assert_eq!(text.base.label, "Homepage");
				assert_eq!(text.base.name, "site");
				assert!(text.base.required);
				assert_eq!(text.is_url, Some(true));
			}
			other => panic!("kind changed to {}", other.kind()),
		}
	}

	#[rstest]
	fn test_number_field_has_no_label_editor() {
		let field = Field::blank(FieldKind::Number, "f2");

		let edited = apply_edit(&field, &EditorEvent::text("label", "Age"));

		assert_eq!(edited, field);
	}

	#[rstest]
	#[case(InputValue::Text("abc".into()))]
	#[case(InputValue::Text("".into()))]
	#[case(InputValue::Number(Value::Null))]
	fn test_non_numeric_min_is_stored_as_nan(#[case] input: InputValue) {
		// Arrange
		let field = Field::blank(FieldKind::Number, "f2");

		// Act
		let edited = apply_edit(&field, &EditorEvent::new("min", input));

		// Assert
		match edited {
			Field::Number(number) => assert!(number.min.is_some_and(f64::is_nan)),
			other => panic!("kind changed to {}", other.kind()),
		}
	}

	#[rstest]
	#[case(json!(12), 12.0)]
	#[case(json!(3.9), 3.0)]
	#[case(json!("-5"), -5.0)]
	fn test_numeric_input_is_parsed_as_integer(#[case] raw: Value, #[case] expected: f64) {
		let field = Field::blank(FieldKind::Number, "f2");

		let edited = apply_edit(&field, &EditorEvent::new("max", InputValue::Number(raw)));

		match edited {
			Field::Number(number) => assert_eq!(number.max, Some(expected)),
			other => panic!("kind changed to {}", other.kind()),
		}
	}

	#[rstest]
	#[case("   15", 15.0)]
	#[case("+8", 8.0)]
	#[case("-0x10", -16.0)]
	#[case("007", 7.0)]
	#[case("1e3", 1.0)]
	fn test_parse_int_prefixes(#[case] input: &str, #[case] expected: f64) {
		assert_eq!(parse_int(input), expected);
	}

	#[rstest]
	#[case("-")]
	#[case("0x")]
	#[case(".5")]
	#[case("  ")]
	fn test_parse_int_without_digits_is_nan(#[case] input: &str) {
		assert!(parse_int(input).is_nan());
	}
}
