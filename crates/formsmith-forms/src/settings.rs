//! Builder settings

use crate::field::FieldKind;
use serde::{Deserialize, Serialize};

/// Settings for [`FormAssembly`](crate::FormAssembly)
///
/// Every key may be omitted when deserializing; missing keys take their
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderSettings {
	/// Prefix of generated field ids
	#[serde(default = "default_id_prefix")]
	pub id_prefix: String,

	/// Kind selected for the next added field when the builder opens
	#[serde(default = "default_kind")]
	pub default_kind: FieldKind,

	/// Placeholder of the form name input
	#[serde(default = "default_name_placeholder")]
	pub name_placeholder: String,
}

impl Default for BuilderSettings {
	fn default() -> Self {
		Self {
			id_prefix: default_id_prefix(),
			default_kind: default_kind(),
			name_placeholder: default_name_placeholder(),
		}
	}
}

fn default_id_prefix() -> String {
	"field_".to_string()
}

fn default_kind() -> FieldKind {
	FieldKind::Text
}

fn default_name_placeholder() -> String {
	"Form Name".to_string()
}
