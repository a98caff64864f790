//! # Sustainly Core
//!
//! Domain types, collaborator traits, and error definitions shared by the
//! estimator, template and prompt crates. This crate has no storage or
//! runtime dependencies; it defines the model every other crate builds on.
//!
//! ## Collaborators
//!
//! Prompt templates, refinement phrases and the trigger log live outside the
//! core. They are reached through the [`TemplateStore`] and [`TriggerLog`]
//! traits so hosts can plug in their own persistence:
//! - SQLite and in-memory implementations live in `sustainly-store`
//! - tests use the in-memory backend or hand-written stubs

pub mod category;
pub mod error;
pub mod store;
pub mod trigger;

// Re-export key types at crate root for ergonomics
pub use category::{Category, RefinementTopic, TemplateCategory};
pub use error::{EstimatorError, PromptError, StoreError, TemplateError};
pub use store::{TemplateStore, TriggerLog};
pub use trigger::{Dimension, Polarity, TriggerEvent, TriggerKind, TriggerTotal};
