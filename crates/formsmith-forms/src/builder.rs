//! Fluent construction of form definitions
//!
//! The builder only appends. It performs no validation: duplicate ids, empty
//! names or a select field without options are all accepted as given.

use crate::field::{
	BooleanField, DateTimeField, Field, FieldBase, FieldKind, FileField, JsonField, NumberField,
	RichTextField, SelectField, TextField,
};
use crate::form::FormDefinition;

/// Appends typed fields to a [`FormDefinition`]
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FieldBase, FieldKind, FormBuilder, NumberField, TextField};
///
/// let form = FormBuilder::new("form1", "My Form")
/// 	.add_text_field(TextField::new(FieldBase::new("name", "name", "Full Name").required()))
/// 	.add_text_field(TextField::new(FieldBase::new("email", "email", "Email")).email())
/// 	.add_number_field(NumberField::new(FieldBase::new("age", "age", "Age")).with_min(0.0))
/// 	.build();
///
/// assert_eq!(form.kinds(), vec![FieldKind::Text, FieldKind::Text, FieldKind::Number]);
/// ```
#[derive(Debug, Clone)]
pub struct FormBuilder {
	form: FormDefinition,
}

impl FormBuilder {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			form: FormDefinition::new(id, name),
		}
	}

	/// Append any kind-specific field; its type decides the kind tag
	pub fn add_field(mut self, field: impl Into<Field>) -> Self {
		let field = field.into();
		tracing::debug!(kind = %field.kind(), id = field.id(), "appending field");
		self.form.push(field);
		self
	}

	/// Append a field of a runtime-chosen kind from common attributes only
	pub fn add_blank(self, kind: FieldKind, base: FieldBase) -> Self {
		self.add_field(Field::from_base(kind, base))
	}

	pub fn add_text_field(self, field: TextField) -> Self {
		self.add_field(field)
	}

	pub fn add_rich_text_field(self, field: RichTextField) -> Self {
		self.add_field(field)
	}

	pub fn add_number_field(self, field: NumberField) -> Self {
		self.add_field(field)
	}

	pub fn add_boolean_field(self, field: BooleanField) -> Self {
		self.add_field(field)
	}

	pub fn add_date_time_field(self, field: DateTimeField) -> Self {
		self.add_field(field)
	}

	pub fn add_select_field(self, field: SelectField) -> Self {
		self.add_field(field)
	}

	pub fn add_file_field(self, field: FileField) -> Self {
		self.add_field(field)
	}

	pub fn add_json_field(self, field: JsonField) -> Self {
		self.add_field(field)
	}

	/// The form accumulated so far
	pub fn form(&self) -> &FormDefinition {
		&self.form
	}

	pub fn build(self) -> FormDefinition {
		self.form
	}
}
