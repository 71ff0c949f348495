//! # Formsmith
//!
//! Headless, schema-driven form building and rendering.
//!
//! Formsmith has two halves that share one widget vocabulary:
//!
//! - **Manual builder**: assemble a list of typed field definitions
//!   interactively, editing each field through a per-kind editor
//!   ([`forms::FormAssembly`]).
//! - **Schema-driven generator**: render one bound widget per property of an
//!   object schema and validate on submit ([`pages::FormGenerator`]).
//!
//! Both produce a host-neutral [`forms::View`] tree. A rendering host
//! displays it (or calls `render_to_string` for HTML) and reports user edits
//! back as events.
//!
//! ## Feature Flags
//!
//! - `forms` - Field model, builder, editors and assembly state
//! - `schema` - Schema nodes and validation
//! - `pages` - Signals, bound value state and the generator
//! - `conf` - TOML settings loader
//! - `full` (default) - All features enabled
//!
//! ## Quick Example
//!
//! ```rust
//! use formsmith::forms::{FieldKind, FormAssembly, EditorEvent};
//!
//! let mut assembly = FormAssembly::default();
//! assembly.set_name("Contact");
//! assembly.add_field();
//! assembly.edit_field(0, &EditorEvent::text("name", "email"));
//!
//! assert_eq!(assembly.form().kinds(), vec![FieldKind::Text]);
//! println!("{}", assembly.form().to_json_pretty().unwrap());
//! ```

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "pages")]
pub mod pages;
#[cfg(feature = "schema")]
pub mod schema;

#[cfg(feature = "conf")]
pub use conf::{Settings, SettingsError};
#[cfg(feature = "forms")]
pub use formsmith_forms::{Field, FieldKind, FormAssembly, FormBuilder, FormDefinition, View};
#[cfg(feature = "pages")]
pub use formsmith_pages::{FormGenerator, SubmitOutcome};
#[cfg(feature = "schema")]
pub use formsmith_schema::{ObjectSchema, SchemaNode, ValidationErrors};
