//! Settings loaded from TOML
//!
//! ```toml
//! [builder]
//! id_prefix = "field_"
//! default_kind = "text"
//! name_placeholder = "Form Name"
//!
//! [generator]
//! submit_label = "Submit"
//! show_placeholders = true
//! ```
//!
//! Every section and key is optional.

use formsmith_forms::BuilderSettings;
use formsmith_pages::GeneratorSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the form builder and the schema-driven generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
	#[serde(default)]
	pub builder: BuilderSettings,

	#[serde(default)]
	pub generator: GeneratorSettings,
}

impl Settings {
	/// Parse settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use formsmith::conf::Settings;
	/// use formsmith::forms::FieldKind;
	///
	/// let settings = Settings::from_toml_str("[builder]\ndefault_kind = \"number\"\n").unwrap();
	/// assert_eq!(settings.builder.default_kind, FieldKind::Number);
	/// assert_eq!(settings.generator.submit_label, "Submit");
	/// ```
	pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
		toml::from_str(contents)
			.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))
	}

	/// Read and parse a TOML settings file
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;
		Self::from_toml_str(&contents)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use formsmith_forms::FieldKind;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	fn test_empty_document_yields_defaults() {
		let settings = Settings::from_toml_str("").unwrap();

		assert_eq!(settings, Settings::default());
		assert_eq!(settings.builder.id_prefix, "field_");
		assert!(settings.generator.show_placeholders);
	}

	#[rstest]
	fn test_from_file_reads_every_section() {
		// Arrange
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			"[builder]\nid_prefix = \"f-\"\ndefault_kind = \"dateTime\"\n\n[generator]\nsubmit_label = \"Send\"\nshow_placeholders = false"
		)
		.unwrap();

		// Act
		let settings = Settings::from_file(file.path()).unwrap();

		// Assert
		assert_eq!(settings.builder.id_prefix, "f-");
		assert_eq!(settings.builder.default_kind, FieldKind::DateTime);
		assert_eq!(settings.builder.name_placeholder, "Form Name");
		assert_eq!(settings.generator.submit_label, "Send");
		assert!(!settings.generator.show_placeholders);
	}

	#[rstest]
	fn test_unknown_kind_is_a_parse_error() {
		let err = Settings::from_toml_str("[builder]\ndefault_kind = \"markdown\"").unwrap_err();

		assert!(matches!(err, SettingsError::ParseError(_)));
	}

	#[rstest]
	fn test_missing_file_is_a_file_error() {
		let dir = tempfile::tempdir().unwrap();

		let err = Settings::from_file(dir.path().join("missing.toml")).unwrap_err();

		assert!(matches!(err, SettingsError::FileError(_)));
		assert!(err.to_string().starts_with("File error: Failed to read"));
	}
}
