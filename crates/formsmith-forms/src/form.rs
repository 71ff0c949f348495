use crate::field::{Field, FieldKind};
use serde::{Deserialize, Serialize};

/// An ordered, named collection of fields
///
/// Field order is display and submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
	pub id: String,
	pub name: String,
	#[serde(default)]
	fields: Vec<Field>,
}

impl FormDefinition {
	/// Create an empty form
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FormDefinition;
	///
	/// let form = FormDefinition::new("form1", "My Form");
	/// assert_eq!(form.name, "My Form");
	/// assert!(form.is_empty());
	/// ```
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			fields: Vec::new(),
		}
	}

	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	pub fn field(&self, index: usize) -> Option<&Field> {
		self.fields.get(index)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Kind tags in field order
	pub fn kinds(&self) -> Vec<FieldKind> {
		self.fields.iter().map(Field::kind).collect()
	}

	/// Pretty-printed JSON, as shown in the builder's preview pane
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FormDefinition;
	///
	/// let form = FormDefinition::new("form1", "My Form");
	/// let json = form.to_json_pretty().unwrap();
	/// assert!(json.contains("\"fields\": []"));
	/// ```
	pub fn to_json_pretty(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(self)
	}

	pub(crate) fn push(&mut self, field: Field) {
		self.fields.push(field);
	}

	pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Field> {
		self.fields.get_mut(index)
	}

	pub(crate) fn remove(&mut self, index: usize) -> Option<Field> {
		(index < self.fields.len()).then(|| self.fields.remove(index))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::{FieldBase, TextField};
	use rstest::rstest;

	#[rstest]
	fn test_form_round_trips_through_json() {
		// Arrange
		let mut form = FormDefinition::new("form1", "Signup");
		form.push(TextField::new(FieldBase::new("email", "email", "Email")).email().into());

		// Act
		let json = form.to_json_pretty().unwrap();
		let parsed: FormDefinition = serde_json::from_str(&json).unwrap();

		// Assert
		assert_eq!(parsed, form);
	}

	#[rstest]
	fn test_remove_out_of_range_is_none() {
		// Arrange
		let mut form = FormDefinition::new("form1", "Signup");
		form.push(Field::blank(FieldKind::Json, "payload"));

		// Act
		let removed = form.remove(3);

		// Assert
		assert!(removed.is_none());
		assert_eq!(form.len(), 1);
	}
}
