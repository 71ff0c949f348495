//! Field definitions for manually assembled forms
//!
//! A [`Field`] is a tagged union over the supported field kinds. Every variant
//! carries the common [`FieldBase`] attributes plus its kind-specific ones.
//! The serialized shape uses an internal `type` tag, so a text field looks like:
//!
//! ```json
//! { "type": "text", "id": "email", "name": "email", "label": "Email", "required": true, "isEmail": true }
//! ```

use crate::widget::number_value;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Attributes shared by every field kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBase {
	/// Identifier, unique within a form by caller convention
	pub id: String,
	/// Bound name, used as the data key
	pub name: String,
	/// Human readable label
	pub label: String,
	pub required: bool,
}

impl FieldBase {
	/// Create field attributes with `required = false`
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FieldBase;
	///
	/// let base = FieldBase::new("name", "name", "Full Name").required();
	/// assert_eq!(base.label, "Full Name");
	/// assert!(base.required);
	/// ```
	pub fn new(id: impl Into<String>, name: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			label: label.into(),
			required: false,
		}
	}

	/// Mark the field as required
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Empty attributes carrying only an identifier
	pub fn with_id(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			..Self::default()
		}
	}
}

/// Kind tag of a [`Field`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
	#[serde(rename = "text")]
	Text,
	#[serde(rename = "richText")]
	RichText,
	#[serde(rename = "number")]
	Number,
	#[serde(rename = "boolean")]
	Boolean,
	#[serde(rename = "dateTime")]
	DateTime,
	#[serde(rename = "select")]
	Select,
	#[serde(rename = "file")]
	File,
	#[serde(rename = "json")]
	Json,
}

impl FieldKind {
	/// Every kind, once, in declaration order
	pub const ALL: [FieldKind; 8] = [
		FieldKind::Text,
		FieldKind::RichText,
		FieldKind::Number,
		FieldKind::Boolean,
		FieldKind::DateTime,
		FieldKind::Select,
		FieldKind::File,
		FieldKind::Json,
	];

	/// The serialized tag string
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldKind::Text => "text",
			FieldKind::RichText => "richText",
			FieldKind::Number => "number",
			FieldKind::Boolean => "boolean",
			FieldKind::DateTime => "dateTime",
			FieldKind::Select => "select",
			FieldKind::File => "file",
			FieldKind::Json => "json",
		}
	}

	/// Label shown in the kind selector
	pub fn display_name(&self) -> &'static str {
		match self {
			FieldKind::Text => "Text",
			FieldKind::RichText => "Rich Text",
			FieldKind::Number => "Number",
			FieldKind::Boolean => "Boolean",
			FieldKind::DateTime => "Date & Time",
			FieldKind::Select => "Select",
			FieldKind::File => "File",
			FieldKind::Json => "JSON",
		}
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a string is not one of the known kind tags
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field kind: {0}")]
pub struct FieldKindParseError(pub String);

impl FromStr for FieldKind {
	type Err = FieldKindParseError;

	/// Parse a serialized tag string
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FieldKind;
	///
	/// assert_eq!("richText".parse::<FieldKind>(), Ok(FieldKind::RichText));
	/// assert!("textarea".parse::<FieldKind>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		FieldKind::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| FieldKindParseError(s.to_string()))
	}
}

/// Single-line text input, optionally constrained to an email address or URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
	#[serde(flatten)]
	pub base: FieldBase,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_email: Option<bool>,
	#[serde(rename = "isURL", default, skip_serializing_if = "Option::is_none")]
	pub is_url: Option<bool>,
}

impl TextField {
	pub fn new(base: FieldBase) -> Self {
		Self {
			base,
			..Self::default()
		}
	}

	pub fn email(mut self) -> Self {
		self.is_email = Some(true);
		self
	}

	pub fn url(mut self) -> Self {
		self.is_url = Some(true);
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextField {
	#[serde(flatten)]
	pub base: FieldBase,
}

impl RichTextField {
	pub fn new(base: FieldBase) -> Self {
		Self { base }
	}
}

/// Numeric input with optional bounds
///
/// Bounds are `f64` because the manual editor stores unparsable input as
/// `NaN` rather than rejecting it. `NaN` serializes as JSON `null` and whole
/// numbers serialize without a fraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberField {
	#[serde(flatten)]
	pub base: FieldBase,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		serialize_with = "serialize_bound"
	)]
	pub min: Option<f64>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		serialize_with = "serialize_bound"
	)]
	pub max: Option<f64>,
}

fn serialize_bound<S>(bound: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	number_value(*bound).serialize(serializer)
}

impl NumberField {
	pub fn new(base: FieldBase) -> Self {
		Self {
			base,
			..Self::default()
		}
	}

	pub fn with_min(mut self, min: f64) -> Self {
		self.min = Some(min);
		self
	}

	pub fn with_max(mut self, max: f64) -> Self {
		self.max = Some(max);
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BooleanField {
	#[serde(flatten)]
	pub base: FieldBase,
}

impl BooleanField {
	pub fn new(base: FieldBase) -> Self {
		Self { base }
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateTimeField {
	#[serde(flatten)]
	pub base: FieldBase,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub format: Option<String>,
}

impl DateTimeField {
	pub fn new(base: FieldBase) -> Self {
		Self { base, format: None }
	}

	pub fn with_format(mut self, format: impl Into<String>) -> Self {
		self.format = Some(format.into());
		self
	}
}

/// One selectable `{label, value}` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
	pub label: String,
	pub value: String,
}

impl SelectOption {
	pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
		}
	}

	/// Option whose label and value are the same string
	pub fn same(value: impl Into<String>) -> Self {
		let value = value.into();
		Self {
			label: value.clone(),
			value,
		}
	}
}

/// Choice among a fixed, ordered list of options
///
/// An empty option list is accepted; nothing validates it at build time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectField {
	#[serde(flatten)]
	pub base: FieldBase,
	#[serde(default)]
	pub options: Vec<SelectOption>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub multiple: Option<bool>,
}

impl SelectField {
	pub fn new(base: FieldBase, options: impl IntoIterator<Item = SelectOption>) -> Self {
		Self {
			base,
			options: options.into_iter().collect(),
			multiple: None,
		}
	}

	pub fn multiple(mut self) -> Self {
		self.multiple = Some(true);
		self
	}
}

/// File upload with optional type and size restrictions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileField {
	#[serde(flatten)]
	pub base: FieldBase,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub accepted_types: Option<Vec<String>>,
	/// Maximum size in bytes
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_size: Option<u64>,
}

impl FileField {
	pub fn new(base: FieldBase) -> Self {
		Self {
			base,
			..Self::default()
		}
	}

	pub fn with_accepted_types<I, S>(mut self, types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.accepted_types = Some(types.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_max_size(mut self, bytes: u64) -> Self {
		self.max_size = Some(bytes);
		self
	}
}

/// Raw structured value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonField {
	#[serde(flatten)]
	pub base: FieldBase,
}

impl JsonField {
	pub fn new(base: FieldBase) -> Self {
		Self { base }
	}
}

/// A typed, labelled unit of data collection within a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Field {
	#[serde(rename = "text")]
	Text(TextField),
	#[serde(rename = "richText")]
	RichText(RichTextField),
	#[serde(rename = "number")]
	Number(NumberField),
	#[serde(rename = "boolean")]
	Boolean(BooleanField),
	#[serde(rename = "dateTime")]
	DateTime(DateTimeField),
	#[serde(rename = "select")]
	Select(SelectField),
	#[serde(rename = "file")]
	File(FileField),
	#[serde(rename = "json")]
	Json(JsonField),
}

impl Field {
	/// Create an empty field of the given kind
	///
	/// Name and label are empty, `required` is false and every optional
	/// attribute is unset.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{Field, FieldKind};
	///
	/// let field = Field::blank(FieldKind::Number, "field_1");
	/// assert_eq!(field.kind(), FieldKind::Number);
	/// assert_eq!(field.id(), "field_1");
	/// assert!(field.name().is_empty());
	/// assert!(!field.required());
	/// ```
	pub fn blank(kind: FieldKind, id: impl Into<String>) -> Self {
		Self::from_base(kind, FieldBase::with_id(id))
	}

	/// Create a field of the given kind from common attributes only
	pub fn from_base(kind: FieldKind, base: FieldBase) -> Self {
		match kind {
			FieldKind::Text => Field::Text(TextField::new(base)),
			FieldKind::RichText => Field::RichText(RichTextField::new(base)),
			FieldKind::Number => Field::Number(NumberField::new(base)),
			FieldKind::Boolean => Field::Boolean(BooleanField::new(base)),
			FieldKind::DateTime => Field::DateTime(DateTimeField::new(base)),
			FieldKind::Select => Field::Select(SelectField::new(base, [])),
			FieldKind::File => Field::File(FileField::new(base)),
			FieldKind::Json => Field::Json(JsonField::new(base)),
		}
	}

	pub fn kind(&self) -> FieldKind {
		match self {
			Field::Text(_) => FieldKind::Text,
			Field::RichText(_) => FieldKind::RichText,
			Field::Number(_) => FieldKind::Number,
			Field::Boolean(_) => FieldKind::Boolean,
			Field::DateTime(_) => FieldKind::DateTime,
			Field::Select(_) => FieldKind::Select,
			Field::File(_) => FieldKind::File,
			Field::Json(_) => FieldKind::Json,
		}
	}

	pub fn base(&self) -> &FieldBase {
		match self {
			Field::Text(f) => &f.base,
			Field::RichText(f) => &f.base,
			Field::Number(f) => &f.base,
			Field::Boolean(f) => &f.base,
			Field::DateTime(f) => &f.base,
			Field::Select(f) => &f.base,
			Field::File(f) => &f.base,
			Field::Json(f) => &f.base,
		}
	}

	/// Mutable access to the common attributes
	///
	/// The kind tag is not reachable from here: a field never changes kind.
	pub fn base_mut(&mut self) -> &mut FieldBase {
		match self {
			Field::Text(f) => &mut f.base,
			Field::RichText(f) => &mut f.base,
			Field::Number(f) => &mut f.base,
			Field::Boolean(f) => &mut f.base,
			Field::DateTime(f) => &mut f.base,
			Field::Select(f) => &mut f.base,
			Field::File(f) => &mut f.base,
			Field::Json(f) => &mut f.base,
		}
	}

	pub fn id(&self) -> &str {
		&self.base().id
	}

	pub fn name(&self) -> &str {
		&self.base().name
	}

	pub fn label(&self) -> &str {
		&self.base().label
	}

	pub fn required(&self) -> bool {
		self.base().required
	}
}

impl From<TextField> for Field {
	fn from(field: TextField) -> Self {
		Field::Text(field)
	}
}

impl From<RichTextField> for Field {
	fn from(field: RichTextField) -> Self {
		Field::RichText(field)
	}
}

impl From<NumberField> for Field {
	fn from(field: NumberField) -> Self {
		Field::Number(field)
	}
}

impl From<BooleanField> for Field {
	fn from(field: BooleanField) -> Self {
		Field::Boolean(field)
	}
}

impl From<DateTimeField> for Field {
	fn from(field: DateTimeField) -> Self {
		Field::DateTime(field)
	}
}

impl From<SelectField> for Field {
	fn from(field: SelectField) -> Self {
		Field::Select(field)
	}
}

impl From<FileField> for Field {
	fn from(field: FileField) -> Self {
		Field::File(field)
	}
}

impl From<JsonField> for Field {
	fn from(field: JsonField) -> Self {
		Field::Json(field)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(FieldKind::Text, "text")]
	#[case(FieldKind::RichText, "richText")]
	#[case(FieldKind::Number, "number")]
	#[case(FieldKind::Boolean, "boolean")]
	#[case(FieldKind::DateTime, "dateTime")]
	#[case(FieldKind::Select, "select")]
	#[case(FieldKind::File, "file")]
	#[case(FieldKind::Json, "json")]
	fn test_blank_field_serializes_with_kind_tag(#[case] kind: FieldKind, #[case] tag: &str) {
		// Arrange
		let field = Field::blank(kind, "field_1");

		// Act
		let value = serde_json::to_value(&field).unwrap();

		// Assert
		assert_eq!(value["type"], json!(tag));
		assert_eq!(value["id"], json!("field_1"));
		assert_eq!(value["required"], json!(false));
		assert_eq!(tag.parse::<FieldKind>().unwrap(), kind);
	}

	#[rstest]
	fn test_text_field_uses_original_attribute_names() {
		// Arrange
		let field: Field = TextField::new(FieldBase::new("site", "site", "Website"))
			.url()
			.into();

		// Act
		let value = serde_json::to_value(&field).unwrap();

		// Assert
		assert_eq!(value["isURL"], json!(true));
		assert!(value.get("isEmail").is_none());
	}

	#[rstest]
	fn test_file_field_deserializes_camel_case() {
		// Arrange
		let value = json!({
			"type": "file",
			"id": "avatar",
			"name": "avatar",
			"label": "Avatar",
			"required": false,
			"acceptedTypes": ["image/png"],
			"maxSize": 1024
		});

		// Act
		let field: Field = serde_json::from_value(value).unwrap();

		// Assert
		match field {
			Field::File(file) => {
				assert_eq!(file.accepted_types, Some(vec!["image/png".to_string()]));
				assert_eq!(file.max_size, Some(1024));
			}
			other => panic!("expected file field, got {:?}", other.kind()),
		}
	}

	#[rstest]
	fn test_nan_bound_serializes_as_null() {
		// Arrange
		let field: Field = NumberField::new(FieldBase::with_id("age"))
			.with_min(f64::NAN)
			.into();

		// Act
		let value = serde_json::to_value(&field).unwrap();

		// Assert
		assert_eq!(value["min"], serde_json::Value::Null);
	}

	#[rstest]
	#[case(12.0, json!(12))]
	#[case(-3.0, json!(-3))]
	#[case(2.5, json!(2.5))]
	fn test_bound_serializes_like_json_number(
		#[case] bound: f64,
		#[case] expected: serde_json::Value,
	) {
		// Arrange
		let field: Field = NumberField::new(FieldBase::with_id("age"))
			.with_min(bound)
			.with_max(bound)
			.into();

		// Act
		let value = serde_json::to_value(&field).unwrap();

		// Assert
		assert_eq!(value["min"], expected);
		assert_eq!(value["max"], expected);
	}

	#[rstest]
	fn test_base_mut_keeps_kind() {
		// Arrange
		let mut field = Field::blank(FieldKind::Select, "country");

		// Act
		field.base_mut().name = "country".to_string();
		field.base_mut().required = true;

		// Assert
		assert_eq!(field.kind(), FieldKind::Select);
		assert_eq!(field.name(), "country");
		assert!(field.required());
	}

	#[rstest]
	fn test_unknown_kind_error_message() {
		let err = "markdown".parse::<FieldKind>().unwrap_err();
		assert_eq!(err.to_string(), "Unknown field kind: markdown");
	}
}
