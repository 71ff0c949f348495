//! Schema-driven form generator
//!
//! [`FormGenerator`] turns an [`ObjectSchema`] into one bound widget per
//! renderable property and validates the collected values on submit.
//!
//! Widget choice by property schema:
//!
//! | Schema | Widget |
//! |---|---|
//! | string (with or without an email check) | text input |
//! | number | numeric input, value passed through |
//! | boolean | checkbox |
//! | enum | radio group, one option per value |
//! | object with an `options` property | single-choice select |
//! | anything else | skipped |

use crate::binding::FormValues;
use crate::settings::GeneratorSettings;
use formsmith_forms::{ButtonKind, InputValue, SelectOption, View, Widget, WidgetNode};
use formsmith_schema::{ObjectSchema, SchemaNode};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Property of a nested object schema that populates a select
pub const OPTIONS_KEY: &str = "options";

/// Name of the generated submit button
pub const SUBMIT_BUTTON: &str = "submit";

/// The widget chosen for one schema property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetPlan {
	/// Email strings render exactly like plain strings
	TextInput { email: bool },
	NumberInput,
	Checkbox,
	RadioGroup { options: Vec<String> },
	Select { options: Vec<String> },
}

/// Choose the widget for a property schema, `None` when it is not renderable
///
/// # Examples
///
/// ```
/// use formsmith_pages::generator::{WidgetPlan, plan_widget};
/// use formsmith_schema::{SchemaNode, enumeration, object, string};
///
/// let email = SchemaNode::from(string().email());
/// assert_eq!(plan_widget(&email), Some(WidgetPlan::TextInput { email: true }));
///
/// let country = SchemaNode::from(object().field("options", enumeration(["USA", "Canada"])));
/// assert_eq!(
/// 	plan_widget(&country),
/// 	Some(WidgetPlan::Select { options: vec!["USA".into(), "Canada".into()] })
/// );
///
/// assert_eq!(plan_widget(&SchemaNode::from(object())), None);
/// ```
pub fn plan_widget(node: &SchemaNode) -> Option<WidgetPlan> {
	match node {
		SchemaNode::String(string) => Some(WidgetPlan::TextInput {
			email: string.has_email_check(),
		}),
		SchemaNode::Number(_) => Some(WidgetPlan::NumberInput),
		SchemaNode::Boolean(_) => Some(WidgetPlan::Checkbox),
		SchemaNode::Enum(values) => Some(WidgetPlan::RadioGroup {
			options: values.values().to_vec(),
		}),
		SchemaNode::Object(object) => object.get(OPTIONS_KEY).map(|options| WidgetPlan::Select {
			options: options
				.as_enum()
				.map(|values| values.values().to_vec())
				.unwrap_or_default(),
		}),
		SchemaNode::Optional(_) | SchemaNode::Array(_) => None,
	}
}

/// Where the generator is within one submit attempt
///
/// A submit runs to completion inside [`FormGenerator::submit`], so callers
/// holding the generator only ever observe `Idle`. `Validating` marks the span
/// in which values are parsed and the submit handler runs, and shows up in the
/// `trace` level transition logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
	/// Waiting for input or the next submit
	Idle,
	/// Internal to `submit`; never returned from [`FormGenerator::state`]
	Validating,
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// Values were valid and handed to the submit handler
	Submitted(Map<String, Value>),
	/// One message per offending field; the handler was not called
	Invalid(HashMap<String, String>),
}

impl SubmitOutcome {
	pub fn is_submitted(&self) -> bool {
		matches!(self, SubmitOutcome::Submitted(_))
	}
}

type SubmitHandler = Box<dyn FnMut(&Map<String, Value>)>;

/// Widgets bound to the properties of an object schema
///
/// # Examples
///
/// ```
/// use formsmith_forms::InputValue;
/// use formsmith_pages::{FormGenerator, SubmitOutcome};
/// use formsmith_schema::{object, string};
///
/// let mut generator = FormGenerator::new(object().field("name", string().min(1)), |values| {
/// 	println!("VALUES: {values:?}");
/// });
///
/// assert!(matches!(generator.submit(), SubmitOutcome::Invalid(_)));
/// generator.handle_input("name", InputValue::Text("Ann".into()));
/// assert!(generator.submit().is_submitted());
/// ```
pub struct FormGenerator {
	schema: ObjectSchema,
	plans: Vec<(String, WidgetPlan)>,
	values: FormValues,
	state: GeneratorState,
	on_submit: SubmitHandler,
	settings: GeneratorSettings,
}

impl std::fmt::Debug for FormGenerator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormGenerator")
			.field("plans", &self.plans)
			.field("values", &self.values)
			.field("state", &self.state)
			.field("settings", &self.settings)
			.finish_non_exhaustive()
	}
}

impl FormGenerator {
	pub fn new(schema: ObjectSchema, on_submit: impl FnMut(&Map<String, Value>) + 'static) -> Self {
		let plans = schema
			.shape()
			.iter()
			.filter_map(|(name, node)| match plan_widget(node) {
				Some(plan) => Some((name.clone(), plan)),
				None => {
					tracing::debug!(
						field = %name,
						kind = ?node.kind(),
						"skipping unrenderable property"
					);
					None
				}
			})
			.collect();

		Self {
			schema,
			plans,
			values: FormValues::new(),
			state: GeneratorState::Idle,
			on_submit: Box::new(on_submit),
			settings: GeneratorSettings::default(),
		}
	}

	pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
		self.settings = settings;
		self
	}

	pub fn schema(&self) -> &ObjectSchema {
		&self.schema
	}

	/// Renderable properties and their widgets, in declaration order
	pub fn fields(&self) -> &[(String, WidgetPlan)] {
		&self.plans
	}

	pub fn plan(&self, name: &str) -> Option<&WidgetPlan> {
		self.plans
			.iter()
			.find(|(field, _)| field == name)
			.map(|(_, plan)| plan)
	}

	/// Current submit state, `Idle` whenever the generator is reachable
	pub fn state(&self) -> GeneratorState {
		self.state
	}

	/// The bound value state backing every widget
	pub fn values(&self) -> &FormValues {
		&self.values
	}

	pub fn errors(&self) -> HashMap<String, String> {
		self.values.errors()
	}

	pub fn error_for(&self, name: &str) -> Option<String> {
		self.values.error_for(name)
	}

	/// One widget per renderable property, then the submit button
	pub fn render(&self) -> View {
		let mut children: Vec<View> = self
			.plans
			.iter()
			.map(|(name, plan)| View::Widget(self.render_field(name, plan)))
			.collect();

		children.push(View::container(
			"form-actions",
			vec![
				WidgetNode::new(
					Widget::Button {
						kind: ButtonKind::Submit,
					},
					SUBMIT_BUTTON,
				)
				.with_label(self.settings.submit_label.clone())
				.into(),
			],
		));

		View::container("generated-form", children)
	}

	fn render_field(&self, name: &str, plan: &WidgetPlan) -> WidgetNode {
		let current = self.values.get(name).unwrap_or(Value::Null);
		let (widget, value, placeholder) = match plan {
			WidgetPlan::TextInput { .. } => (Widget::TextInput, current, true),
			WidgetPlan::NumberInput => (Widget::NumberInput, current, true),
			WidgetPlan::Checkbox => (
				Widget::Checkbox,
				Value::Bool(current.as_bool().unwrap_or(false)),
				false,
			),
			WidgetPlan::RadioGroup { options } => (
				Widget::RadioGroup {
					options: options.iter().map(SelectOption::same).collect(),
				},
				current,
				false,
			),
			WidgetPlan::Select { options } => (
				Widget::Select {
					options: options.iter().map(SelectOption::same).collect(),
					multiple: false,
				},
				current.get(OPTIONS_KEY).cloned().unwrap_or(Value::Null),
				true,
			),
		};

		let mut node = WidgetNode::new(widget, name)
			.with_label(name)
			.with_value(value)
			.with_error(self.values.error_for(name));
		if placeholder && self.settings.show_placeholders {
			node = node.with_placeholder(name);
		}
		node
	}

	/// Store a widget edit reported by the host
	///
	/// Returns `false`, storing nothing, for names without a widget and for
	/// inputs the widget cannot produce.
	pub fn handle_input(&self, name: &str, input: InputValue) -> bool {
		let Some(plan) = self.plan(name) else {
			tracing::debug!(field = name, "ignoring input for unbound field");
			return false;
		};

		let value = match (plan, input) {
			(WidgetPlan::TextInput { .. }, InputValue::Text(text)) => Value::String(text),
			(WidgetPlan::NumberInput, InputValue::Number(value)) => value,
			(WidgetPlan::NumberInput, InputValue::Text(text)) => Value::String(text),
			(WidgetPlan::Checkbox, InputValue::Checked(checked)) => Value::Bool(checked),
			(WidgetPlan::RadioGroup { .. }, InputValue::Choice(choice)) => Value::String(choice),
			(WidgetPlan::Select { .. }, InputValue::Choice(choice)) => {
				let mut selected = Map::new();
				selected.insert(OPTIONS_KEY.to_string(), Value::String(choice));
				Value::Object(selected)
			}
			(plan, input) => {
				tracing::debug!(
					field = name,
					?plan,
					?input,
					"ignoring input the widget cannot produce"
				);
				return false;
			}
		};
		self.values.set(name, value);
		true
	}

	/// Set a bound value directly, bypassing widget conversion
	pub fn set_value(&self, name: &str, value: Value) {
		self.values.set(name, value);
	}

	/// Validate the collected values and hand them to the submit handler
	pub fn submit(&mut self) -> SubmitOutcome {
		self.state = GeneratorState::Validating;
		tracing::trace!(state = ?self.state, "submit started");
		let collected = self.values.snapshot();

		let outcome = match self.schema.safe_parse(&collected) {
			Ok(parsed) => {
				self.values.clear_errors();
				tracing::debug!(fields = parsed.len(), "submitting validated values");
				(self.on_submit)(&parsed);
				SubmitOutcome::Submitted(parsed)
			}
			Err(errors) => {
				let field_errors = errors.field_errors();
				tracing::debug!(invalid = field_errors.len(), "submit rejected");
				self.values.replace_errors(field_errors.clone());
				SubmitOutcome::Invalid(field_errors)
			}
		};

		self.state = GeneratorState::Idle;
		tracing::trace!(
			state = ?self.state,
			submitted = outcome.is_submitted(),
			"submit finished"
		);
		outcome
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use formsmith_schema::{SchemaNodeExt, boolean, coerce_number, enumeration, object, string};
	use rstest::rstest;
	use serde_json::json;

	fn noop(_: &Map<String, Value>) {}

	#[rstest]
	fn test_email_and_plain_strings_render_identically() {
		// Arrange
		let generator = FormGenerator::new(
			object().field("a", string().email()).field("b", string()),
			noop,
		);

		// Act
		let view = generator.render();

		// Assert
		let a = view.find("a").unwrap();
		let b = view.find("b").unwrap();
		assert_eq!(a.widget, b.widget);
		assert_eq!(a.placeholder.as_deref(), Some("a"));
	}

	#[rstest]
	fn test_unrenderable_properties_are_skipped() {
		let generator = FormGenerator::new(
			object()
				.field("meta", object().field("x", string()))
				.field("tags", string().array())
				.field("nick", string().optional())
				.field("ok", boolean()),
			noop,
		);

		let names: Vec<_> = generator.fields().iter().map(|(n, _)| n.as_str()).collect();

		assert_eq!(names, ["ok"]);
	}

	#[rstest]
	fn test_select_binding_wraps_choice() {
		// Arrange
		let generator = FormGenerator::new(
			object().field("country", object().field("options", enumeration(["USA", "Canada"]))),
			noop,
		);

		// Act
		let stored = generator.handle_input("country", InputValue::Choice("Canada".into()));

		// Assert
		assert!(stored);
		assert_eq!(generator.values().get("country"), Some(json!({"options": "Canada"})));
		assert_eq!(generator.render().find("country").unwrap().value, json!("Canada"));
	}

	#[rstest]
	fn test_number_input_passes_value_through() {
		let generator = FormGenerator::new(object().field("age", coerce_number()), noop);

		generator.handle_input("age", InputValue::Number(json!(30)));

		assert_eq!(generator.values().get("age"), Some(json!(30)));
	}

	#[rstest]
	fn test_mismatched_input_is_ignored() {
		let generator = FormGenerator::new(object().field("tos", boolean()), noop);

		assert!(!generator.handle_input("tos", InputValue::Text("yes".into())));
		assert!(!generator.handle_input("missing", InputValue::Checked(true)));
		assert!(generator.values().snapshot().is_empty());
	}

	#[rstest]
	fn test_checkbox_and_radio_have_no_placeholder() {
		let generator = FormGenerator::new(
			object()
				.field("tos", boolean())
				.field("gender", enumeration(["male", "female"])),
			noop,
		);

		let view = generator.render();

		assert_eq!(view.find("tos").unwrap().placeholder, None);
		assert_eq!(view.find("tos").unwrap().value, json!(false));
		assert_eq!(view.find("gender").unwrap().placeholder, None);
	}

	#[rstest]
	fn test_settings_change_submit_label_and_placeholders() {
		// Arrange
		let generator = FormGenerator::new(object().field("name", string()), noop).with_settings(
			GeneratorSettings {
				submit_label: "Send".to_string(),
				show_placeholders: false,
			},
		);

		// Act
		let view = generator.render();

		// Assert
		assert_eq!(view.find(SUBMIT_BUTTON).unwrap().label.as_deref(), Some("Send"));
		assert_eq!(view.find("name").unwrap().placeholder, None);
	}

	#[rstest]
	fn test_state_returns_to_idle_after_submit() {
		let mut generator = FormGenerator::new(object().field("name", string()), noop);

		let outcome = generator.submit();

		assert!(!outcome.is_submitted());
		assert_eq!(generator.state(), GeneratorState::Idle);
		assert_eq!(generator.error_for("name").as_deref(), Some("Required"));
	}
}
