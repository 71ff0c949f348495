use std::collections::HashMap;

/// Key under which issues at the root of a value are reported
pub const ALL_FIELDS_KEY: &str = "_all";

/// One failed expectation, located by the path of keys leading to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
	pub path: Vec<String>,
	pub message: String,
}

impl Issue {
	pub fn new(path: Vec<String>, message: impl Into<String>) -> Self {
		Self {
			path,
			message: message.into(),
		}
	}

	/// Top-level field the issue belongs to, [`ALL_FIELDS_KEY`] for the root
	pub fn field(&self) -> &str {
		self.path.first().map(String::as_str).unwrap_or(ALL_FIELDS_KEY)
	}
}

/// Every issue found while validating one value, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("validation failed with {} issue(s)", .issues.len())]
pub struct ValidationErrors {
	issues: Vec<Issue>,
}

impl ValidationErrors {
	pub fn new(issues: Vec<Issue>) -> Self {
		Self { issues }
	}

	pub fn issues(&self) -> &[Issue] {
		&self.issues
	}

	pub fn len(&self) -> usize {
		self.issues.len()
	}

	pub fn is_empty(&self) -> bool {
		self.issues.is_empty()
	}

	/// One message per offending top-level field, the first one reported
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_schema::{Issue, ValidationErrors};
	///
	/// let errors = ValidationErrors::new(vec![
	/// 	Issue::new(vec!["name".into()], "Required"),
	/// 	Issue::new(vec!["name".into()], "Too short"),
	/// 	Issue::new(vec!["country".into(), "options".into()], "Required"),
	/// ]);
	/// let map = errors.field_errors();
	/// assert_eq!(map["name"], "Required");
	/// assert_eq!(map["country"], "Required");
	/// ```
	pub fn field_errors(&self) -> HashMap<String, String> {
		let mut errors = HashMap::new();
		for issue in &self.issues {
			errors
				.entry(issue.field().to_string())
				.or_insert_with(|| issue.message.clone());
		}
		errors
	}

	/// All messages reported under one top-level field
	pub fn messages_for(&self, field: &str) -> Vec<&str> {
		self.issues
			.iter()
			.filter(|issue| issue.field() == field)
			.map(|issue| issue.message.as_str())
			.collect()
	}
}
