//! Form definitions and interactive form assembly for Formsmith
//!
//! This crate provides:
//! - A tagged field model covering text, rich text, number, boolean, date/time,
//!   select, file and JSON fields
//! - A chaining builder for form definitions
//! - A host-neutral widget tree with an HTML renderer
//! - Per-kind field editors and the assembly state that owns the form being built

pub mod assembly;
pub mod builder;
pub mod editor;
pub mod field;
pub mod form;
pub mod settings;
pub mod widget;

pub use assembly::{BuilderEvent, FieldIdGenerator, FormAssembly, KindOption};
pub use builder::FormBuilder;
pub use editor::{EditorEvent, apply_edit, render_editor};
pub use field::{
	BooleanField, DateTimeField, Field, FieldBase, FieldKind, FieldKindParseError, FileField,
	JsonField, NumberField, RichTextField, SelectField, SelectOption, TextField,
};
pub use form::FormDefinition;
pub use settings::BuilderSettings;
pub use widget::{ButtonKind, InputValue, View, Widget, WidgetNode, html_escape, number_value};
