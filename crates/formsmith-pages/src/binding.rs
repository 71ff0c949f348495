//! Bound value state
//!
//! [`FormValues`] pairs the current value of every bound field with the
//! current error message of every field that failed validation. Both live in
//! [`Signal`]s so a host can subscribe to either and redraw on change.

use crate::reactive::Signal;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct FormValues {
	values: Signal<Map<String, Value>>,
	errors: Signal<HashMap<String, String>>,
}

impl Default for FormValues {
	fn default() -> Self {
		Self::new()
	}
}

impl FormValues {
	pub fn new() -> Self {
		Self {
			values: Signal::new(Map::new()),
			errors: Signal::new(HashMap::new()),
		}
	}

	pub fn get(&self, name: &str) -> Option<Value> {
		self.values.with(|values| values.get(name).cloned())
	}

	pub fn set(&self, name: &str, value: Value) {
		tracing::debug!(field = name, "bound value changed");
		self.values.update(|values| {
			values.insert(name.to_string(), value);
		});
	}

	/// Current value of every field that has been edited
	pub fn snapshot(&self) -> Map<String, Value> {
		self.values.get()
	}

	pub fn values_signal(&self) -> &Signal<Map<String, Value>> {
		&self.values
	}

	pub fn errors(&self) -> HashMap<String, String> {
		self.errors.get()
	}

	pub fn error_for(&self, name: &str) -> Option<String> {
		self.errors.with(|errors| errors.get(name).cloned())
	}

	pub fn errors_signal(&self) -> &Signal<HashMap<String, String>> {
		&self.errors
	}

	/// Swap in the outcome of a validation pass
	pub fn replace_errors(&self, errors: HashMap<String, String>) {
		self.errors.set(errors);
	}

	pub fn clear_errors(&self) {
		self.errors.set(HashMap::new());
	}
}
