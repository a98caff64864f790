//! Frequency table and posterior computation.

use crate::ALPHA;
use crate::trace::{self, DerivationTrace};
use serde::{Deserialize, Serialize};
use sustainly_core::EstimatorError;
use tracing::debug;

/// One named feature with its observation counts. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeObservation {
    name: String,
    positive: u64,
    negative: u64,
}

impl AttributeObservation {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positive(&self) -> u64 {
        self.positive
    }

    pub fn negative(&self) -> u64 {
        self.negative
    }

    /// Sum of both counts; bounded by `u64::MAX` on append.
    pub fn total(&self) -> u64 {
        self.positive.saturating_add(self.negative)
    }

    pub(crate) fn count(&self, class: Class) -> u64 {
        match class {
            Class::Positive => self.positive,
            Class::Negative => self.negative,
        }
    }
}

/// The two outcome classes. `Positive` is sustainable behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Class {
    Positive,
    Negative,
}

impl Class {
    pub const BOTH: [Class; 2] = [Class::Positive, Class::Negative];
}

/// Proportional posterior probabilities, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Likelihood {
    pub positive: f64,
    pub negative: f64,
}

impl Likelihood {
    pub fn get(&self, class: Class) -> f64 {
        match class {
            Class::Positive => self.positive,
            Class::Negative => self.negative,
        }
    }

    /// The class with the larger probability; ties go to `Positive`.
    pub fn dominant(&self) -> Class {
        if self.negative > self.positive {
            Class::Negative
        } else {
            Class::Positive
        }
    }
}

/// A row of the read-only frequency snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub name: String,
    pub positive: u64,
    pub negative: u64,
}

/// One multiplicative factor of a class posterior, before evaluation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Factor {
    pub count: u64,
    pub total: u64,
}

/// Naive-Bayes estimator over a small, insertion-ordered frequency table.
///
/// Build a fresh instance for every computation; instances are not meant to
/// be shared or reused across reporting periods.
#[derive(Debug, Clone, Default)]
pub struct SustainabilityEstimator {
    observations: Vec<AttributeObservation>,
    needs_smoothing: bool,
}

impl SustainabilityEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an estimator from `(name, positive, negative)` triples, stopping
    /// at the first failing append.
    pub fn from_observations<I, S>(observations: I) -> Result<Self, EstimatorError>
    where
        I: IntoIterator<Item = (S, u64, u64)>,
        S: Into<String>,
    {
        let mut estimator = Self::new();
        for (name, positive, negative) in observations {
            estimator.append_observation(name, positive, negative)?;
        }
        Ok(estimator)
    }

    /// Append one attribute.
    ///
    /// Fails with [`EstimatorError::DuplicateAttribute`] if the name is
    /// already present, or [`EstimatorError::CountOverflow`] if the two
    /// counts do not sum within `u64`; the estimator is left untouched in
    /// either case.
    pub fn append_observation(
        &mut self,
        name: impl Into<String>,
        positive: u64,
        negative: u64,
    ) -> Result<(), EstimatorError> {
        let name = name.into();
        if self.observations.iter().any(|o| o.name == name) {
            return Err(EstimatorError::DuplicateAttribute(name));
        }
        if positive.checked_add(negative).is_none() {
            return Err(EstimatorError::CountOverflow {
                context: format!("total of attribute '{name}'"),
            });
        }

        if !self.needs_smoothing && (positive == 0 || negative == 0) {
            debug!(attribute = %name, "zero count observed, smoothing enabled");
            self.needs_smoothing = true;
        }

        debug!(attribute = %name, positive, negative, "observation appended");
        self.observations.push(AttributeObservation {
            name,
            positive,
            negative,
        });
        Ok(())
    }

    /// Whether additive smoothing applies to this instance.
    pub fn needs_smoothing(&self) -> bool {
        self.needs_smoothing
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[AttributeObservation] {
        &self.observations
    }

    /// Proportional posterior probabilities for both classes.
    pub fn compute(&self) -> Result<Likelihood, EstimatorError> {
        let k = self.observations.len() as f64;
        let positive = self.posterior(Class::Positive, k)?;
        let negative = self.posterior(Class::Negative, k)?;

        let sum = positive + negative;
        if sum == 0.0 || !sum.is_finite() {
            return Err(EstimatorError::DivisionByZero {
                context: "posterior normalisation".into(),
            });
        }

        let likelihood = Likelihood {
            positive: 100.0 * positive / sum,
            negative: 100.0 * negative / sum,
        };
        debug!(
            attributes = self.observations.len(),
            smoothed = self.needs_smoothing,
            positive = likelihood.positive,
            negative = likelihood.negative,
            "computed likelihood"
        );
        Ok(likelihood)
    }

    /// Textual mirror of [`compute`](Self::compute): one expression per class,
    /// built from the same factors in the same order.
    pub fn compute_derivation_trace(&self) -> Result<DerivationTrace, EstimatorError> {
        let positive = self.factors(Class::Positive)?;
        let negative = self.factors(Class::Negative)?;
        let k = self.observations.len();
        Ok(DerivationTrace {
            positive: trace::expression(&positive, self.needs_smoothing, k),
            negative: trace::expression(&negative, self.needs_smoothing, k),
        })
    }

    /// Read-only view of the frequency table, in insertion order.
    pub fn frequency_snapshot(&self) -> Vec<FrequencyRow> {
        self.observations
            .iter()
            .map(|o| FrequencyRow {
                name: o.name.clone(),
                positive: o.positive,
                negative: o.negative,
            })
            .collect()
    }

    /// Attribute factors followed by the prior factor for `class`.
    ///
    /// Zero totals are rejected here so the numeric and textual paths fail
    /// identically; smoothing only covers zero per-class counts.
    pub(crate) fn factors(&self, class: Class) -> Result<Vec<Factor>, EstimatorError> {
        if self.observations.is_empty() {
            return Err(EstimatorError::DivisionByZero {
                context: "prior of an estimator with no attributes".into(),
            });
        }

        let mut factors = Vec::with_capacity(self.observations.len() + 1);
        let mut class_total = 0u64;
        let mut grand_total = 0u64;
        for obs in &self.observations {
            if obs.total() == 0 {
                return Err(EstimatorError::DivisionByZero {
                    context: format!("likelihood of attribute '{}'", obs.name),
                });
            }
            factors.push(Factor {
                count: obs.count(class),
                total: obs.total(),
            });
            class_total = class_total.checked_add(obs.count(class)).ok_or_else(|| {
                EstimatorError::CountOverflow {
                    context: "class prior".into(),
                }
            })?;
            grand_total = grand_total.checked_add(obs.total()).ok_or_else(|| {
                EstimatorError::CountOverflow {
                    context: "grand total".into(),
                }
            })?;
        }

        factors.push(Factor {
            count: class_total,
            total: grand_total,
        });
        Ok(factors)
    }

    fn posterior(&self, class: Class, k: f64) -> Result<f64, EstimatorError> {
        let smoothed = self.needs_smoothing;
        Ok(self
            .factors(class)?
            .iter()
            .map(|f| {
                if smoothed {
                    (f.count as f64 + ALPHA) / (f.total as f64 + ALPHA * k)
                } else {
                    f.count as f64 / f.total as f64
                }
            })
            .product())
    }
}
