//! Template and refinement categories.
//!
//! The category set is fixed. Every key the storage collaborator knows about
//! is one of the five template categories or one of the nine refinement
//! topics; parsing anything else is an error rather than a fallback.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories that own exactly one template body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateCategory {
    SearchUserBased,
    SearchCategoryBased,
    TriggerNotification,
    LikelihoodWithPriorPeriod,
    LikelihoodNoPriorPeriod,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 5] = [
        TemplateCategory::SearchUserBased,
        TemplateCategory::SearchCategoryBased,
        TemplateCategory::TriggerNotification,
        TemplateCategory::LikelihoodWithPriorPeriod,
        TemplateCategory::LikelihoodNoPriorPeriod,
    ];

    /// Storage key for this category.
    pub fn key(self) -> &'static str {
        match self {
            Self::SearchUserBased => "SearchUserBasedTemplate",
            Self::SearchCategoryBased => "SearchCategoryBasedTemplate",
            Self::TriggerNotification => "TriggerNotificationTemplate",
            Self::LikelihoodWithPriorPeriod => "LikelihoodWithPriorPeriodTemplate",
            Self::LikelihoodNoPriorPeriod => "LikelihoodNoPriorPeriodTemplate",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TemplateCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Topic domains that own a pool of refinement phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefinementTopic {
    Energy,
    Waste,
    Fashion,
    Transport,
    Charging,
    DeviceUsage,
    NetworkUsage,
    LocationServices,
    Browsing,
}

impl RefinementTopic {
    pub const ALL: [RefinementTopic; 9] = [
        RefinementTopic::Energy,
        RefinementTopic::Waste,
        RefinementTopic::Fashion,
        RefinementTopic::Transport,
        RefinementTopic::Charging,
        RefinementTopic::DeviceUsage,
        RefinementTopic::NetworkUsage,
        RefinementTopic::LocationServices,
        RefinementTopic::Browsing,
    ];

    /// Short kebab-case slug used on the command line and in seed files.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Waste => "waste",
            Self::Fashion => "fashion",
            Self::Transport => "transport",
            Self::Charging => "charging",
            Self::DeviceUsage => "device-usage",
            Self::NetworkUsage => "network-usage",
            Self::LocationServices => "location-services",
            Self::Browsing => "browsing",
        }
    }

    /// Storage key of this topic's refinement category.
    pub fn key(self) -> &'static str {
        match self {
            Self::Energy => "EnergyRefinement",
            Self::Waste => "WasteRefinement",
            Self::Fashion => "FashionRefinement",
            Self::Transport => "TransportRefinement",
            Self::Charging => "ChargingRefinement",
            Self::DeviceUsage => "DeviceUsageRefinement",
            Self::NetworkUsage => "NetworkUsageRefinement",
            Self::LocationServices => "LocationServicesRefinement",
            Self::Browsing => "BrowsingRefinement",
        }
    }

    /// Human-readable label used when the topic is substituted into a prompt.
    pub fn label(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Waste => "waste",
            Self::Fashion => "fashion",
            Self::Transport => "transport",
            Self::Charging => "device charging",
            Self::DeviceUsage => "device usage",
            Self::NetworkUsage => "network usage",
            Self::LocationServices => "location services",
            Self::Browsing => "web browsing",
        }
    }
}

impl fmt::Display for RefinementTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for RefinementTopic {
    type Err = String;

    /// Accepts either the slug (`device-usage`) or the storage key
    /// (`DeviceUsageRefinement`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.slug() == s || t.key() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Any key the storage collaborator can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Template(TemplateCategory),
    Refinement(RefinementTopic),
}

impl Category {
    pub fn key(self) -> &'static str {
        match self {
            Self::Template(c) => c.key(),
            Self::Refinement(t) => t.key(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<TemplateCategory>()
            .map(Category::Template)
            .or_else(|_| s.parse::<RefinementTopic>().map(Category::Refinement))
    }
}

impl From<TemplateCategory> for Category {
    fn from(c: TemplateCategory) -> Self {
        Self::Template(c)
    }
}

impl From<RefinementTopic> for Category {
    fn from(t: RefinementTopic) -> Self {
        Self::Refinement(t)
    }
}
