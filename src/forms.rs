//! Field model, form builder and interactive form assembly
//!
//! This module provides access to formsmith-forms.
//!
//! ## Example
//!
//! ```rust
//! use formsmith::forms::{FieldBase, FormBuilder, TextField};
//!
//! let form = FormBuilder::new("form1", "My Form")
//!     .add_text_field(TextField::new(FieldBase::new("email", "email", "Email")).email())
//!     .build();
//! assert_eq!(form.len(), 1);
//! ```

// Re-export all formsmith-forms functionality
pub use formsmith_forms::*;
