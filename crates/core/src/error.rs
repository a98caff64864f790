//! Error types for the Sustainly domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; [`PromptError`] wraps the
//! others for callers of the prompt layer.

use crate::category::Category;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimatorError {
    /// The attribute name was already appended to this estimator instance.
    #[error("Attribute already present: {0}")]
    DuplicateAttribute(String),

    /// A denominator or the posterior sum was zero.
    #[error("Division by zero while computing {context}")]
    DivisionByZero { context: String },

    /// A count sum does not fit in `u64`.
    #[error("Observation counts overflow while summing {context}")]
    CountOverflow { context: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Field already present in bag: {0}")]
    DuplicateField(String),
}

#[derive(Debug, Error)]
pub enum PromptError {
    /// The request, trigger kind or topic does not map to any category.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The store has no template or refinement phrase for the category.
    #[error("No template stored for category {category}")]
    MissingTemplate { category: Category },

    /// A tracked dimension had no observations in the report window.
    #[error("No observations recorded for dimension '{dimension}'")]
    InsufficientObservations { dimension: String },

    #[error(transparent)]
    Estimator(#[from] EstimatorError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Invalid seed data: {0}")]
    Seed(String),
}
