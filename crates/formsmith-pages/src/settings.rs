//! Generator settings

use serde::{Deserialize, Serialize};

/// Settings for [`FormGenerator`](crate::FormGenerator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
	/// Text of the submit button
	#[serde(default = "default_submit_label")]
	pub submit_label: String,

	/// Use each property name as its widget placeholder
	#[serde(default = "default_show_placeholders")]
	pub show_placeholders: bool,
}

impl Default for GeneratorSettings {
	fn default() -> Self {
		Self {
			submit_label: default_submit_label(),
			show_placeholders: default_show_placeholders(),
		}
	}
}

fn default_submit_label() -> String {
	"Submit".to_string()
}

fn default_show_placeholders() -> bool {
	true
}
