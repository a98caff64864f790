//! Naive-Bayes sustainability estimator.
//!
//! Accumulates per-attribute sustainable/unsustainable observation counts
//! and turns them into a proportional probability pair, together with a
//! textual derivation that mirrors the arithmetic term by term.
//!
//! # Algorithm
//!
//! For class `c` over `K` attributes:
//!
//! ```text
//! posterior(c) = Π_i  count_i(c) / total_i   ×   total(c) / grand_total
//! P(c)         = 100 × posterior(c) / Σ posterior
//! ```
//!
//! If any attribute was appended with a zero count on either side, additive
//! smoothing with `α = 0.1` applies to every factor of the computation:
//! `(count + α) / (total + α·K)`. Smoothing is decided per instance, never
//! per attribute.

mod estimator;
mod trace;

pub use estimator::{
    AttributeObservation, Class, FrequencyRow, Likelihood, SustainabilityEstimator,
};
pub use trace::DerivationTrace;

/// Additive smoothing constant.
pub const ALPHA: f64 = 0.1;
