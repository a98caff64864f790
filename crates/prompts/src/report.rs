//! Weekly likelihood report: trigger log → estimator → prompt.

use crate::assembler::{Prompt, PromptAssembler};
use crate::request::PromptRequest;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use sustainly_core::{
    Dimension, EstimatorError, Polarity, PromptError, TriggerLog, TriggerTotal,
};
use sustainly_estimator::{
    DerivationTrace, FrequencyRow, Likelihood, SustainabilityEstimator,
};
use tracing::{debug, info};

/// Estimator outputs for one reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub likelihood: Likelihood,
    pub trace: DerivationTrace,
    pub frequencies: Vec<FrequencyRow>,
}

impl PeriodReport {
    pub fn from_estimator(estimator: &SustainabilityEstimator) -> Result<Self, EstimatorError> {
        Ok(Self {
            likelihood: estimator.compute()?,
            trace: estimator.compute_derivation_trace()?,
            frequencies: estimator.frequency_snapshot(),
        })
    }
}

/// Build a fresh estimator from aggregated trigger totals.
///
/// Each tracked dimension becomes one attribute; summed magnitudes are
/// rounded to whole observations. A dimension with no observations at all
/// is rejected up front because the estimator cannot divide by its total.
pub fn estimator_from_totals(
    totals: &[TriggerTotal],
) -> Result<SustainabilityEstimator, PromptError> {
    let sum = |dimension: Dimension, polarity: Polarity| -> u64 {
        let raw: f64 = totals
            .iter()
            .filter(|t| t.kind == dimension.trigger_kind() && t.polarity == polarity)
            .map(|t| t.total)
            .sum();
        raw.max(0.0).round() as u64
    };

    let mut estimator = SustainabilityEstimator::new();
    for dimension in Dimension::TRACKED {
        let positive = sum(dimension, Polarity::Sustainable);
        let negative = sum(dimension, Polarity::Unsustainable);
        if positive == 0 && negative == 0 {
            return Err(PromptError::InsufficientObservations {
                dimension: dimension.attribute_name().to_string(),
            });
        }
        estimator.append_observation(dimension.attribute_name(), positive, negative)?;
    }
    Ok(estimator)
}

/// A finished likelihood report.
#[derive(Debug, Clone)]
pub struct LikelihoodReport {
    pub current: PeriodReport,
    pub previous: Option<PeriodReport>,
    pub prompt: Prompt,
}

/// Periodic job that turns the trigger log into a likelihood prompt.
///
/// Every run builds new estimator instances. Nothing is retried: the
/// computation is deterministic for a given log and window.
pub struct ReportJob {
    log: Arc<dyn TriggerLog>,
    assembler: PromptAssembler,
    lookback: Duration,
    compare_previous: bool,
}

impl ReportJob {
    pub fn new(log: Arc<dyn TriggerLog>, assembler: PromptAssembler) -> Self {
        Self {
            log,
            assembler,
            lookback: Duration::days(7),
            compare_previous: true,
        }
    }

    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback = Duration::days(i64::from(days));
        self
    }

    pub fn with_previous_period(mut self, enabled: bool) -> Self {
        self.compare_previous = enabled;
        self
    }

    /// Run the job for the period ending at `now`.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<LikelihoodReport, PromptError> {
        let current_start = now - self.lookback;
        let current = self.period(current_start, now).await?;

        let previous = if self.compare_previous {
            match self.period(current_start - self.lookback, current_start).await {
                Ok(report) => Some(report),
                Err(PromptError::InsufficientObservations { dimension }) => {
                    info!(%dimension, "previous period has no observations, reporting without comparison");
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let request = PromptRequest::Likelihood {
            current: current.clone(),
            previous: previous.clone(),
        };
        let prompt = self.assembler.build(&request).await?;
        Ok(LikelihoodReport {
            current,
            previous,
            prompt,
        })
    }

    async fn period(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<PeriodReport, PromptError> {
        let totals = self.log.totals(since, until).await?;
        debug!(%since, %until, groups = totals.len(), "aggregated trigger totals");
        let estimator = estimator_from_totals(&totals)?;
        Ok(PeriodReport::from_estimator(&estimator)?)
    }
}
