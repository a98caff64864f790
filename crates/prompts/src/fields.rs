//! Per-category field structs.

use crate::report::PeriodReport;
use serde::{Deserialize, Serialize};
use sustainly_core::{RefinementTopic, TemplateError, TriggerKind};
use sustainly_estimator::FrequencyRow;
use sustainly_template::{FieldBag, FieldValue, ToFields};

pub(crate) struct UserSearchFields<'a> {
    pub topic: &'a str,
}

impl ToFields for UserSearchFields<'_> {
    fn to_fields(&self) -> Result<FieldBag, TemplateError> {
        FieldBag::new().with("Topic", self.topic)
    }
}

pub(crate) struct CategorySearchFields<'a> {
    pub topic: RefinementTopic,
    pub refinement: &'a str,
}

impl ToFields for CategorySearchFields<'_> {
    fn to_fields(&self) -> Result<FieldBag, TemplateError> {
        FieldBag::new()
            .with("Category", self.topic.label())?
            .with("Refinement", self.refinement)
    }
}

pub(crate) struct NotificationFields<'a> {
    pub trigger: TriggerKind,
    pub value: f64,
    pub refinement: &'a str,
}

impl ToFields for NotificationFields<'_> {
    fn to_fields(&self) -> Result<FieldBag, TemplateError> {
        FieldBag::new()
            .with("Trigger", self.trigger.topic().label())?
            .with("Value", self.value)?
            .with("Refinement", self.refinement)
    }
}

/// Fields describing one reporting period.
///
/// The current period uses bare names (`SustainableProbability`); the
/// previous period prefixes every name with `Previous`.
pub struct PeriodFields<'a> {
    prefix: &'static str,
    report: &'a PeriodReport,
}

impl<'a> PeriodFields<'a> {
    pub fn current(report: &'a PeriodReport) -> Self {
        Self { prefix: "", report }
    }

    pub fn previous(report: &'a PeriodReport) -> Self {
        Self {
            prefix: "Previous",
            report,
        }
    }

    fn name(&self, field: &str) -> String {
        format!("{}{field}", self.prefix)
    }
}

impl ToFields for PeriodFields<'_> {
    fn to_fields(&self) -> Result<FieldBag, TemplateError> {
        let r = self.report;
        FieldBag::new()
            .with(
                self.name("SustainableProbability"),
                FieldValue::Percent(r.likelihood.positive),
            )?
            .with(
                self.name("UnsustainableProbability"),
                FieldValue::Percent(r.likelihood.negative),
            )?
            .with(self.name("SustainableDerivation"), &r.trace.positive)?
            .with(self.name("UnsustainableDerivation"), &r.trace.negative)?
            .with(self.name("FrequencyTable"), frequency_table(&r.frequencies))
    }
}

/// One line per attribute: `Name | Positive | Negative`.
pub(crate) fn frequency_table(rows: &[FrequencyRow]) -> String {
    rows.iter()
        .map(|r| format!("{} | {} | {}", r.name, r.positive, r.negative))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Direction of the sustainable probability between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Compare the values as the prompt renders them, with two decimals.
    pub fn between(current: f64, previous: f64) -> Self {
        match displayed(current).total_cmp(&displayed(previous)) {
            std::cmp::Ordering::Greater => Self::Up,
            std::cmp::Ordering::Less => Self::Down,
            std::cmp::Ordering::Equal => Self::Flat,
        }
    }
}

/// The value a `{:.2}` rendering shows, read back as a number.
fn displayed(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Visual encoding of a [`Trend`], owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendMarkers {
    pub up: String,
    pub down: String,
    pub flat: String,
}

impl TrendMarkers {
    pub fn marker(&self, trend: Trend) -> &str {
        match trend {
            Trend::Up => &self.up,
            Trend::Down => &self.down,
            Trend::Flat => &self.flat,
        }
    }
}

impl Default for TrendMarkers {
    fn default() -> Self {
        Self {
            up: "↑".into(),
            down: "↓".into(),
            flat: "→".into(),
        }
    }
}
