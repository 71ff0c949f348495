//! Host-neutral widget tree
//!
//! Editors and generators describe their output as a [`View`]. A rendering
//! host walks the tree and displays the primitive widgets it contains; user
//! edits flow back as [`InputValue`]s keyed by widget name. [`View::render_to_string`]
//! provides a plain HTML rendition for server-side output.

use crate::field::SelectOption;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive interactive elements a host must be able to display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
	TextInput,
	NumberInput,
	Checkbox,
	/// Checkbox styled as a toggle
	Switch,
	Select {
		options: Vec<SelectOption>,
		multiple: bool,
	},
	/// Mutually exclusive choice group
	RadioGroup {
		options: Vec<SelectOption>,
	},
	Button {
		kind: ButtonKind,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
	Button,
	Submit,
}

impl ButtonKind {
	fn as_str(&self) -> &'static str {
		match self {
			ButtonKind::Button => "button",
			ButtonKind::Submit => "submit",
		}
	}
}

/// A widget together with its name, display attributes and current value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetNode {
	pub widget: Widget,
	pub name: String,
	pub label: Option<String>,
	pub placeholder: Option<String>,
	/// Displayed value: a string for text and choice widgets, a number for
	/// numeric inputs, a bool for checkboxes, `Null` when unset
	pub value: Value,
	pub error: Option<String>,
}

impl WidgetNode {
	pub fn new(widget: Widget, name: impl Into<String>) -> Self {
		Self {
			widget,
			name: name.into(),
			label: None,
			placeholder: None,
			value: Value::Null,
			error: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn with_value(mut self, value: impl Into<Value>) -> Self {
		self.value = value.into();
		self
	}

	pub fn with_error(mut self, error: Option<String>) -> Self {
		self.error = error;
		self
	}

	/// Whether a checkbox or switch is currently on
	pub fn is_checked(&self) -> bool {
		self.value.as_bool().unwrap_or(false)
	}

	/// `id` attribute paired with the widget's `<label for=...>`
	pub fn id_for_label(&self) -> String {
		format!("id_{}", self.name)
	}

	fn render_into(&self, html: &mut String) {
		html.push_str("<div class=\"form-field\">");

		match &self.widget {
			Widget::RadioGroup { options } => self.render_radio_group(html, options),
			Widget::Button { kind } => {
				html.push_str(&format!(
					"<button type=\"{}\" name=\"{}\">{}</button>",
					kind.as_str(),
					html_escape(&self.name),
					html_escape(self.label.as_deref().unwrap_or_default())
				));
			}
			widget => {
				if let Some(label) = &self.label {
					html.push_str(&format!(
						"<label for=\"{}\">{}</label>",
						html_escape(&self.id_for_label()),
						html_escape(label)
					));
				}
				match widget {
					Widget::Select { options, multiple } => {
						self.render_select(html, options, *multiple)
					}
					_ => self.render_input(html),
				}
			}
		}

		if let Some(error) = &self.error {
			html.push_str(&format!(
				"<div class=\"field-errors\">{}</div>",
				html_escape(error)
			));
		}
		html.push_str("</div>");
	}

	fn render_input(&self, html: &mut String) {
		let input_type = match self.widget {
			Widget::NumberInput => "number",
			Widget::Checkbox | Widget::Switch => "checkbox",
			_ => "text",
		};
		html.push_str(&format!(
			"<input type=\"{}\" id=\"{}\" name=\"{}\"",
			input_type,
			html_escape(&self.id_for_label()),
			html_escape(&self.name)
		));
		if matches!(self.widget, Widget::Switch) {
			html.push_str(" role=\"switch\"");
		}
		if matches!(self.widget, Widget::Checkbox | Widget::Switch) {
			if self.is_checked() {
				html.push_str(" checked");
			}
		} else if let Some(value) = display_value(&self.value) {
			html.push_str(&format!(" value=\"{}\"", html_escape(&value)));
		}
		if let Some(placeholder) = &self.placeholder {
			html.push_str(&format!(" placeholder=\"{}\"", html_escape(placeholder)));
		}
		html.push_str(" />");
	}

	fn render_select(&self, html: &mut String, options: &[SelectOption], multiple: bool) {
		html.push_str(&format!(
			"<select id=\"{}\" name=\"{}\"",
			html_escape(&self.id_for_label()),
			html_escape(&self.name)
		));
		if multiple {
			html.push_str(" multiple");
		}
		html.push('>');
		if let Some(placeholder) = &self.placeholder {
			html.push_str(&format!(
				"<option value=\"\" disabled>{}</option>",
				html_escape(placeholder)
			));
		}
		let selected = display_value(&self.value);
		for option in options {
			let is_selected = selected.as_deref() == Some(option.value.as_str());
			html.push_str(&format!(
				"<option value=\"{}\"{}>{}</option>",
				html_escape(&option.value),
				if is_selected { " selected" } else { "" },
				html_escape(&option.label)
			));
		}
		html.push_str("</select>");
	}

	fn render_radio_group(&self, html: &mut String, options: &[SelectOption]) {
		html.push_str("<fieldset>");
		if let Some(label) = &self.label {
			html.push_str(&format!("<legend>{}</legend>", html_escape(label)));
		}
		let selected = display_value(&self.value);
		for option in options {
			let is_selected = selected.as_deref() == Some(option.value.as_str());
			html.push_str(&format!(
				"<label><input type=\"radio\" name=\"{}\" value=\"{}\"{} /> {}</label>",
				html_escape(&self.name),
				html_escape(&option.value),
				if is_selected { " checked" } else { "" },
				html_escape(&option.label)
			));
		}
		html.push_str("</fieldset>");
	}
}

/// A tree of widgets, containers and text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum View {
	/// Renders nothing
	Empty,
	Widget(WidgetNode),
	Container { class: String, children: Vec<View> },
	Text(String),
}

impl View {
	pub fn container(class: impl Into<String>, children: Vec<View>) -> Self {
		View::Container {
			class: class.into(),
			children,
		}
	}

	/// True for [`View::Empty`] and for containers holding only empty views
	pub fn is_empty(&self) -> bool {
		match self {
			View::Empty => true,
			View::Container { children, .. } => children.iter().all(View::is_empty),
			View::Widget(_) | View::Text(_) => false,
		}
	}

	/// All widget nodes, depth first
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{View, Widget, WidgetNode};
	///
	/// let view = View::container("row", vec![
	/// 	View::Widget(WidgetNode::new(Widget::TextInput, "name")),
	/// 	View::Empty,
	/// 	View::Widget(WidgetNode::new(Widget::Checkbox, "required")),
	/// ]);
	/// let names: Vec<_> = view.widgets().iter().map(|w| w.name.as_str()).collect();
	/// assert_eq!(names, ["name", "required"]);
	/// ```
	pub fn widgets(&self) -> Vec<&WidgetNode> {
		let mut out = Vec::new();
		self.collect_widgets(&mut out);
		out
	}

	fn collect_widgets<'a>(&'a self, out: &mut Vec<&'a WidgetNode>) {
		match self {
			View::Widget(node) => out.push(node),
			View::Container { children, .. } => {
				for child in children {
					child.collect_widgets(out);
				}
			}
			View::Empty | View::Text(_) => {}
		}
	}

	/// First widget with the given name
	pub fn find(&self, name: &str) -> Option<&WidgetNode> {
		self.widgets().into_iter().find(|node| node.name == name)
	}

	/// Render as escaped HTML
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{View, Widget, WidgetNode};
	///
	/// let view = View::Widget(WidgetNode::new(Widget::TextInput, "q").with_value("<b>"));
	/// assert!(view.render_to_string().contains("value=\"&lt;b&gt;\""));
	/// assert_eq!(View::Empty.render_to_string(), "");
	/// ```
	pub fn render_to_string(&self) -> String {
		let mut html = String::new();
		self.render_into(&mut html);
		html
	}

	fn render_into(&self, html: &mut String) {
		match self {
			View::Empty => {}
			View::Widget(node) => node.render_into(html),
			View::Container { class, children } => {
				html.push_str(&format!("<div class=\"{}\">", html_escape(class)));
				for child in children {
					child.render_into(html);
				}
				html.push_str("</div>");
			}
			View::Text(text) => html.push_str(&html_escape(text)),
		}
	}
}

impl From<WidgetNode> for View {
	fn from(node: WidgetNode) -> Self {
		View::Widget(node)
	}
}

/// Value reported by a host when the user edits a widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InputValue {
	/// Raw text of a text or numeric input
	Text(String),
	/// Value of a numeric input as the host produced it
	Number(Value),
	/// Checked state of a checkbox or switch
	Checked(bool),
	/// Selected option value of a select or choice group
	Choice(String),
}

/// Convert an optional float to a JSON value, integral floats as integers
///
/// `NaN` and infinities have no JSON representation and become `Null`.
pub fn number_value(number: Option<f64>) -> Value {
	match number {
		Some(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
			Value::from(n as i64)
		}
		Some(n) => serde_json::Number::from_f64(n)
			.map(Value::Number)
			.unwrap_or(Value::Null),
		None => Value::Null,
	}
}

fn display_value(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		other => Some(other.to_string()),
	}
}

/// Escape text for use in HTML content and attribute values
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}
