//! Declarative value schemas for Formsmith
//!
//! A schema is a tree of [`SchemaNode`]s built with small constructor
//! functions:
//!
//! ```
//! use formsmith_schema::{SchemaNodeExt, boolean, coerce_number, enumeration, object, string};
//! use serde_json::json;
//!
//! let schema = object()
//! 	.field("name", string().min(1).message("Name is required"))
//! 	.field("age", coerce_number().min(0.0))
//! 	.field("email", string().email())
//! 	.field("gender", enumeration(["male", "female"]))
//! 	.field("newsletter", boolean().optional());
//!
//! let errors = schema
//! 	.validate(&json!({"name": "", "age": "-1", "email": "a@b.com", "gender": "male"}))
//! 	.unwrap_err()
//! 	.field_errors();
//! assert_eq!(errors["name"], "Name is required");
//! assert_eq!(errors["age"], "Number must be greater than or equal to 0");
//! assert_eq!(errors.len(), 2);
//! ```
//!
//! Validation never mutates a schema and reports every issue it finds, each
//! located by the path of keys leading to it.

pub mod check;
pub mod errors;
pub mod node;
pub mod validate;

pub use check::{NumberCheck, StringCheck};
pub use errors::{ALL_FIELDS_KEY, Issue, ValidationErrors};
pub use node::{
	BooleanSchema, EnumSchema, NumberSchema, ObjectSchema, Refinement, SchemaKind, SchemaNode,
	SchemaNodeExt, StringSchema, boolean, coerce_number, enumeration, number, object, string,
};
