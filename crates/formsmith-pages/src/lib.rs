//! Reactive value binding and schema-driven forms for Formsmith
//!
//! This crate provides:
//! - [`Signal`](reactive::Signal), a single-threaded observable value cell
//! - [`FormValues`], the bound values and error messages of one form
//! - [`FormGenerator`], which renders a widget per schema property and
//!   validates on submit

pub mod binding;
pub mod generator;
pub mod reactive;
pub mod settings;

pub use binding::FormValues;
pub use generator::{FormGenerator, GeneratorState, SubmitOutcome, WidgetPlan, plan_widget};
pub use reactive::{Signal, SubscriptionId};
pub use settings::GeneratorSettings;
