//! Device-interaction triggers as reported by the host's state observers.

use crate::category::RefinementTopic;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of device interaction that fired a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerKind {
    Charging,
    DeviceUsage,
    NetworkUsage,
    LocationServices,
    Browsing,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 5] = [
        TriggerKind::Charging,
        TriggerKind::DeviceUsage,
        TriggerKind::NetworkUsage,
        TriggerKind::LocationServices,
        TriggerKind::Browsing,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Charging => "charging",
            Self::DeviceUsage => "device-usage",
            Self::NetworkUsage => "network-usage",
            Self::LocationServices => "location-services",
            Self::Browsing => "browsing",
        }
    }

    /// The refinement topic whose phrases accompany a notification for
    /// this trigger.
    pub fn topic(self) -> RefinementTopic {
        match self {
            Self::Charging => RefinementTopic::Charging,
            Self::DeviceUsage => RefinementTopic::DeviceUsage,
            Self::NetworkUsage => RefinementTopic::NetworkUsage,
            Self::LocationServices => RefinementTopic::LocationServices,
            Self::Browsing => RefinementTopic::Browsing,
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TriggerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.slug() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Whether a trigger counts for or against sustainable behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Sustainable,
    Unsustainable,
}

impl Polarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sustainable => "sustainable",
            Self::Unsustainable => "unsustainable",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sustainable" => Ok(Self::Sustainable),
            "unsustainable" => Ok(Self::Unsustainable),
            other => Err(other.to_string()),
        }
    }
}

/// A dimension tracked by the weekly likelihood report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Charging,
    Usage,
    Network,
}

impl Dimension {
    /// Dimensions in the order they are appended to the estimator.
    pub const TRACKED: [Dimension; 3] = [Dimension::Charging, Dimension::Usage, Dimension::Network];

    /// Attribute name used in the frequency table and derivation.
    pub fn attribute_name(self) -> &'static str {
        match self {
            Self::Charging => "Charging",
            Self::Usage => "Usage",
            Self::Network => "Network",
        }
    }

    pub fn trigger_kind(self) -> TriggerKind {
        match self {
            Self::Charging => TriggerKind::Charging,
            Self::Usage => TriggerKind::DeviceUsage,
            Self::Network => TriggerKind::NetworkUsage,
        }
    }
}

/// One logged trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub kind: TriggerKind,
    pub polarity: Polarity,
    /// Raw magnitude reported by the observer (counts, minutes, megabytes...).
    pub value: f64,
    pub occurred_at: DateTime<Utc>,
}

impl TriggerEvent {
    pub fn new(kind: TriggerKind, polarity: Polarity, value: f64) -> Self {
        Self {
            kind,
            polarity,
            value,
            occurred_at: Utc::now(),
        }
    }

    pub fn at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}

/// Summed trigger magnitude for one kind and polarity over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerTotal {
    pub kind: TriggerKind,
    pub polarity: Polarity,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_kind_round_trips_through_slug() {
        for kind in TriggerKind::ALL {
            assert_eq!(kind.slug().parse::<TriggerKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_trigger_kind_is_rejected() {
        assert_eq!("screen-brightness".parse::<TriggerKind>(), Err("screen-brightness".into()));
    }

    #[test]
    fn tracked_dimensions_map_to_distinct_triggers() {
        let kinds: Vec<TriggerKind> = Dimension::TRACKED.iter().map(|d| d.trigger_kind()).collect();
        assert_eq!(
            kinds,
            vec![TriggerKind::Charging, TriggerKind::DeviceUsage, TriggerKind::NetworkUsage]
        );
    }

    #[test]
    fn every_trigger_has_a_matching_topic() {
        for kind in TriggerKind::ALL {
            assert_eq!(kind.topic().slug(), kind.slug());
        }
    }
}
