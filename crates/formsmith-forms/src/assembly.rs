//! Interactive form assembly state
//!
//! [`FormAssembly`] holds the form being assembled together with the kind
//! selected for the next added field. Hosts drive it either through its
//! methods or by folding [`BuilderEvent`]s into it with
//! [`FormAssembly::dispatch`], and display [`FormAssembly::render`].

use crate::editor::{EditorEvent, apply_edit, render_editor_with_prefix};
use crate::field::{Field, FieldKind, SelectOption};
use crate::form::FormDefinition;
use crate::settings::BuilderSettings;
use crate::widget::{ButtonKind, View, Widget, WidgetNode};
use serde::{Deserialize, Serialize};

pub const FORM_NAME_INPUT: &str = "form-name";
pub const FIELD_KIND_SELECT: &str = "field-type";
pub const ADD_FIELD_BUTTON: &str = "add-field";

/// Issues timestamp-derived field ids, strictly increasing per generator
#[derive(Debug, Clone)]
pub struct FieldIdGenerator {
	prefix: String,
	last: Option<i64>,
}

impl FieldIdGenerator {
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			last: None,
		}
	}

	/// Next id from the current Unix time in milliseconds
	pub fn generate(&mut self) -> String {
		self.generate_at(chrono::Utc::now().timestamp_millis())
	}

	/// Next id for a given Unix millisecond timestamp
	///
	/// A timestamp not past the previous one is bumped to `previous + 1`.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FieldIdGenerator;
	///
	/// let mut ids = FieldIdGenerator::new("field_");
	/// assert_eq!(ids.generate_at(1_700_000_000_000), "field_1700000000000");
	/// assert_eq!(ids.generate_at(1_700_000_000_000), "field_1700000000001");
	/// assert_eq!(ids.generate_at(1_600_000_000_000), "field_1700000000002");
	/// ```
	pub fn generate_at(&mut self, millis: i64) -> String {
		let stamp = match self.last {
			Some(last) if millis <= last => last + 1,
			_ => millis,
		};
		self.last = Some(stamp);
		format!("{}{}", self.prefix, stamp)
	}
}

/// One entry of the kind selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindOption {
	pub kind: FieldKind,
	pub label: &'static str,
}

/// User interaction reported by a host rendering [`FormAssembly::render`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum BuilderEvent {
	SetName(String),
	SelectKind(FieldKind),
	AddField,
	EditField { index: usize, event: EditorEvent },
	RemoveField(usize),
}

/// The in-progress form plus the kind chosen for the next added field
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FieldKind, FormAssembly, editor::EditorEvent};
///
/// let mut assembly = FormAssembly::default();
/// assembly.set_name("Signup");
/// assembly.select_kind(FieldKind::Number);
/// assembly.add_field();
/// assert!(assembly.edit_field(0, &EditorEvent::text("min", "18")));
///
/// assert_eq!(assembly.form().name, "Signup");
/// assert_eq!(assembly.form().kinds(), vec![FieldKind::Number]);
/// ```
#[derive(Debug, Clone)]
pub struct FormAssembly {
	form: FormDefinition,
	selected_kind: FieldKind,
	ids: FieldIdGenerator,
	settings: BuilderSettings,
}

impl Default for FormAssembly {
	fn default() -> Self {
		Self::new(BuilderSettings::default())
	}
}

impl FormAssembly {
	/// Empty form with blank id and name
	pub fn new(settings: BuilderSettings) -> Self {
		Self {
			form: FormDefinition::new("", ""),
			selected_kind: settings.default_kind,
			ids: FieldIdGenerator::new(settings.id_prefix.clone()),
			settings,
		}
	}

	pub fn form(&self) -> &FormDefinition {
		&self.form
	}

	pub fn into_form(self) -> FormDefinition {
		self.form
	}

	pub fn settings(&self) -> &BuilderSettings {
		&self.settings
	}

	pub fn selected_kind(&self) -> FieldKind {
		self.selected_kind
	}

	pub fn select_kind(&mut self, kind: FieldKind) {
		self.selected_kind = kind;
	}

	/// Entries of the kind selector, one per field kind
	pub fn kind_options(&self) -> Vec<KindOption> {
		FieldKind::ALL
			.into_iter()
			.map(|kind| KindOption {
				kind,
				label: kind.display_name(),
			})
			.collect()
	}

	pub fn set_name(&mut self, name: impl Into<String>) {
		self.form.name = name.into();
	}

	/// Append a blank field of the selected kind and return it
	pub fn add_field(&mut self) -> &Field {
		let id = self.ids.generate();
		tracing::debug!(kind = %self.selected_kind, id = %id, "adding field");
		self.form.push(Field::blank(self.selected_kind, id));
		let index = self.form.len() - 1;
		&self.form.fields()[index]
	}

	/// Replace the field at `index`
	///
	/// Returns `false` and leaves the form untouched when `index` is out of
	/// range or `field` is of a different kind than the field it replaces.
	pub fn update_field(&mut self, index: usize, field: Field) -> bool {
		let len = self.form.len();
		let Some(slot) = self.form.slot_mut(index) else {
			tracing::warn!(index, len, "ignoring update of field out of range");
			return false;
		};
		if slot.kind() != field.kind() {
			tracing::warn!(
				index,
				from = %slot.kind(),
				to = %field.kind(),
				"ignoring update that changes field kind"
			);
			return false;
		}
		*slot = field;
		true
	}

	/// Apply one editor event to the field at `index`
	pub fn edit_field(&mut self, index: usize, event: &EditorEvent) -> bool {
		let Some(current) = self.form.field(index) else {
			tracing::warn!(index, key = %event.key, "ignoring edit of field out of range");
			return false;
		};
		let updated = apply_edit(current, event);
		self.update_field(index, updated)
	}

	/// Remove and return the field at `index`, `None` when out of range
	pub fn remove_field(&mut self, index: usize) -> Option<Field> {
		let removed = self.form.remove(index);
		match &removed {
			Some(field) => tracing::debug!(index, id = field.id(), "removed field"),
			None => tracing::warn!(index, "ignoring removal of field out of range"),
		}
		removed
	}

	/// Fold a host event into the state
	///
	/// Returns whether the state changed.
	pub fn dispatch(&mut self, event: BuilderEvent) -> bool {
		match event {
			BuilderEvent::SetName(name) => {
				self.set_name(name);
				true
			}
			BuilderEvent::SelectKind(kind) => {
				self.select_kind(kind);
				true
			}
			BuilderEvent::AddField => {
				self.add_field();
				true
			}
			BuilderEvent::EditField { index, event } => self.edit_field(index, &event),
			BuilderEvent::RemoveField(index) => self.remove_field(index).is_some(),
		}
	}

	/// The builder page: controls, one editor per field, and a JSON preview
	pub fn render(&self) -> View {
		let kind_options = self
			.kind_options()
			.into_iter()
			.map(|option| SelectOption::new(option.label, option.kind.as_str()))
			.collect();

		let controls = View::container(
			"form-builder-controls",
			vec![
				WidgetNode::new(Widget::TextInput, FORM_NAME_INPUT)
					.with_placeholder(self.settings.name_placeholder.clone())
					.with_value(self.form.name.clone())
					.into(),
				WidgetNode::new(
					Widget::Select {
						options: kind_options,
						multiple: false,
					},
					FIELD_KIND_SELECT,
				)
				.with_value(self.selected_kind.as_str())
				.into(),
				WidgetNode::new(
					Widget::Button {
						kind: ButtonKind::Button,
					},
					ADD_FIELD_BUTTON,
				)
				.with_label("Add Field")
				.into(),
			],
		);

		let editors = self
			.form
			.fields()
			.iter()
			.map(|field| render_editor_with_prefix(field, field.id()))
			.collect();

		let preview = match self.form.to_json_pretty() {
			Ok(json) => View::Text(json),
			Err(error) => {
				tracing::warn!(%error, "failed to serialize form preview");
				View::Empty
			}
		};

		View::container(
			"form-builder",
			vec![
				View::container(
					"form-builder-fields",
					vec![controls, View::container("fields", editors)],
				),
				View::container("form-builder-preview", vec![preview]),
			],
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::{FieldBase, TextField};
	use rstest::{fixture, rstest};

	#[fixture]
	fn assembly() -> FormAssembly {
		let mut assembly = FormAssembly::default();
		assembly.add_field();
		assembly.select_kind(FieldKind::Number);
		assembly.add_field();
		assembly
	}

	#[rstest]
	fn test_new_assembly_is_empty() {
		let assembly = FormAssembly::default();

		assert_eq!(assembly.form().id, "");
		assert_eq!(assembly.form().name, "");
		assert!(assembly.form().is_empty());
		assert_eq!(assembly.selected_kind(), FieldKind::Text);
	}

	#[rstest]
	fn test_added_field_is_blank(assembly: FormAssembly) {
		let field = assembly.form().field(1).unwrap();

		assert_eq!(field.kind(), FieldKind::Number);
		assert!(field.id().starts_with("field_"));
		assert!(field.name().is_empty());
		assert!(field.label().is_empty());
		assert!(!field.required());
	}

	#[rstest]
	fn test_added_ids_are_unique(assembly: FormAssembly) {
		let ids: Vec<_> = assembly.form().fields().iter().map(Field::id).collect();

		assert_ne!(ids[0], ids[1]);
	}

	#[rstest]
	fn test_update_out_of_range_is_noop(mut assembly: FormAssembly) {
		// Arrange
		let before = assembly.form().clone();

		// Act
		let updated = assembly.update_field(5, Field::blank(FieldKind::Text, "x"));

		// Assert
		assert!(!updated);
		assert_eq!(assembly.form(), &before);
	}

	#[rstest]
	fn test_update_refuses_kind_change(mut assembly: FormAssembly) {
		let before = assembly.form().clone();

		let updated = assembly.update_field(1, Field::blank(FieldKind::Text, "x"));

		assert!(!updated);
		assert_eq!(assembly.form(), &before);
	}

	#[rstest]
	fn test_update_replaces_in_place(mut assembly: FormAssembly) {
		// Arrange
		let replacement: Field = TextField::new(FieldBase::new("x", "email", "Email"))
			.email()
			.into();

		// Act
		let updated = assembly.update_field(0, replacement.clone());

		// Assert
		assert!(updated);
		assert_eq!(assembly.form().field(0), Some(&replacement));
		assert_eq!(assembly.form().len(), 2);
	}

	#[rstest]
	fn test_kind_options_are_unique_and_complete() {
		let options = FormAssembly::default().kind_options();

		let kinds: Vec<_> = options.iter().map(|o| o.kind).collect();
		assert_eq!(kinds, FieldKind::ALL.to_vec());
		assert_eq!(options[2].label, "Number");
	}

	#[rstest]
	fn test_dispatch_folds_events(mut assembly: FormAssembly) {
		// Act
		assembly.dispatch(BuilderEvent::SetName("Survey".into()));
		assembly.dispatch(BuilderEvent::EditField {
			index: 0,
			event: EditorEvent::checked("required", true),
		});
		let removed = assembly.dispatch(BuilderEvent::RemoveField(1));

		// Assert
		assert!(removed);
		assert_eq!(assembly.form().name, "Survey");
		assert_eq!(assembly.form().len(), 1);
		assert!(assembly.form().field(0).unwrap().required());
	}

	#[rstest]
	fn test_remove_out_of_range(mut assembly: FormAssembly) {
		assert!(assembly.remove_field(2).is_none());
		assert_eq!(assembly.form().len(), 2);
	}

	#[rstest]
	fn test_render_contains_controls_editors_and_preview(assembly: FormAssembly) {
		// Act
		let view = assembly.render();

		// Assert
		let name = view.find(FORM_NAME_INPUT).unwrap();
		assert_eq!(name.placeholder.as_deref(), Some("Form Name"));
		let add = view.find(ADD_FIELD_BUTTON).unwrap();
		assert_eq!(add.label.as_deref(), Some("Add Field"));
		let first_id = assembly.form().field(0).unwrap().id().to_string();
		assert!(view.find(&format!("{first_id}-isEmail")).is_some());
		assert!(view.render_to_string().contains("&quot;fields&quot;"));
	}

	#[rstest]
	fn test_settings_drive_prefix_and_initial_kind() {
		// Arrange
		let settings = BuilderSettings {
			id_prefix: "f-".to_string(),
			default_kind: FieldKind::Json,
			..BuilderSettings::default()
		};
		let mut assembly = FormAssembly::new(settings);

		// Act
		let field = assembly.add_field().clone();

		// Assert
		assert_eq!(field.kind(), FieldKind::Json);
		assert!(field.id().starts_with("f-"));
	}
}
