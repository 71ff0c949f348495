//! Signals, bound value state and the schema-driven form generator
//!
//! This module provides access to formsmith-pages.
//!
//! ## Example
//!
//! ```rust
//! use formsmith::forms::InputValue;
//! use formsmith::pages::FormGenerator;
//! use formsmith::schema::{boolean, object};
//!
//! let mut generator = FormGenerator::new(object().field("agree", boolean()), |values| {
//!     println!("VALUES: {values:?}");
//! });
//! generator.handle_input("agree", InputValue::Checked(true));
//! assert!(generator.submit().is_submitted());
//! ```

// Re-export all formsmith-pages functionality
pub use formsmith_pages::*;
