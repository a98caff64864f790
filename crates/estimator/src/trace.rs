//! Human-readable derivation of each class posterior.

use crate::ALPHA;
use crate::estimator::{Class, Factor};
use serde::{Deserialize, Serialize};

/// Separator between multiplicative terms.
pub const TERM_SEPARATOR: &str = " * ";

/// The literal arithmetic behind each unnormalised posterior.
///
/// Unsmoothed terms read `(count/total)`; smoothed terms read
/// `((count+0.1)/(total+0.1*K))`. The last term of each expression is the
/// class prior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationTrace {
    pub positive: String,
    pub negative: String,
}

impl DerivationTrace {
    pub fn get(&self, class: Class) -> &str {
        match class {
            Class::Positive => &self.positive,
            Class::Negative => &self.negative,
        }
    }

    /// Individual terms of one class expression, in evaluation order.
    pub fn terms(&self, class: Class) -> Vec<&str> {
        self.get(class).split(TERM_SEPARATOR).collect()
    }
}

pub(crate) fn expression(factors: &[Factor], smoothed: bool, k: usize) -> String {
    factors
        .iter()
        .map(|f| {
            if smoothed {
                format!("(({}+{ALPHA})/({}+{ALPHA}*{k}))", f.count, f.total)
            } else {
                format!("({}/{})", f.count, f.total)
            }
        })
        .collect::<Vec<_>>()
        .join(TERM_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use crate::{Class, SustainabilityEstimator};

    #[test]
    fn unsmoothed_trace_lists_counts_then_prior() {
        let est = SustainabilityEstimator::from_observations([
            ("Charging", 2, 7),
            ("Usage", 8, 12),
            ("Network", 6, 10),
        ])
        .unwrap();
        let trace = est.compute_derivation_trace().unwrap();
        assert_eq!(trace.positive, "(2/9) * (8/20) * (6/16) * (16/45)");
        assert_eq!(trace.negative, "(7/9) * (12/20) * (10/16) * (29/45)");
    }

    #[test]
    fn smoothed_trace_applies_alpha_to_every_term() {
        let est = SustainabilityEstimator::from_observations([
            ("Charging", 2, 0),
            ("Usage", 8, 0),
        ])
        .unwrap();
        let trace = est.compute_derivation_trace().unwrap();
        assert_eq!(
            trace.positive,
            "((2+0.1)/(2+0.1*2)) * ((8+0.1)/(8+0.1*2)) * ((10+0.1)/(10+0.1*2))"
        );
        assert_eq!(
            trace.negative,
            "((0+0.1)/(2+0.1*2)) * ((0+0.1)/(8+0.1*2)) * ((0+0.1)/(10+0.1*2))"
        );
    }

    #[test]
    fn trace_has_one_term_per_attribute_plus_prior() {
        let est = SustainabilityEstimator::from_observations([
            ("A", 1, 2),
            ("B", 3, 0),
            ("C", 5, 6),
            ("D", 7, 8),
            ("E", 9, 1),
        ])
        .unwrap();
        let trace = est.compute_derivation_trace().unwrap();
        for class in Class::BOTH {
            assert_eq!(trace.terms(class).len(), est.len() + 1);
        }
    }

    #[test]
    fn trace_terms_follow_insertion_order() {
        let est = SustainabilityEstimator::from_observations([("Z", 1, 2), ("A", 3, 4)]).unwrap();
        let trace = est.compute_derivation_trace().unwrap();
        assert_eq!(trace.terms(Class::Positive), vec!["(1/3)", "(3/7)", "(4/10)"]);
    }
}
