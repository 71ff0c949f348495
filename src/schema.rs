//! Declarative value schemas and validation
//!
//! This module provides access to formsmith-schema.

// Re-export all formsmith-schema functionality
pub use formsmith_schema::*;
