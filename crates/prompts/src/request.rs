//! Prompt requests and their template categories.

use crate::report::PeriodReport;
use sustainly_core::{PromptError, RefinementTopic, TemplateCategory, TriggerKind};

/// What the host wants a prompt for.
#[derive(Debug, Clone)]
pub enum PromptRequest {
    /// Web search on a topic the user typed.
    UserTopicSearch { topic: String },

    /// Web search on a fixed topic, narrowed by a random refinement phrase.
    CategorySearch { topic: RefinementTopic },

    /// Push notification for an unsustainable device interaction.
    TriggerNotification { trigger: TriggerKind, value: f64 },

    /// Likelihood report, optionally compared with the previous period.
    Likelihood {
        current: PeriodReport,
        previous: Option<PeriodReport>,
    },
}

impl PromptRequest {
    /// Notification request from a raw trigger name reported by the host.
    pub fn trigger_notification(trigger: &str, value: f64) -> Result<Self, PromptError> {
        Ok(Self::TriggerNotification {
            trigger: resolve_trigger(trigger)?,
            value,
        })
    }

    /// Category search request from a raw topic name.
    pub fn category_search(topic: &str) -> Result<Self, PromptError> {
        Ok(Self::CategorySearch {
            topic: resolve_topic(topic)?,
        })
    }

    /// The template category this request is rendered with.
    pub fn category(&self) -> TemplateCategory {
        match self {
            Self::UserTopicSearch { .. } => TemplateCategory::SearchUserBased,
            Self::CategorySearch { .. } => TemplateCategory::SearchCategoryBased,
            Self::TriggerNotification { .. } => TemplateCategory::TriggerNotification,
            Self::Likelihood { previous: None, .. } => TemplateCategory::LikelihoodNoPriorPeriod,
            Self::Likelihood {
                previous: Some(_), ..
            } => TemplateCategory::LikelihoodWithPriorPeriod,
        }
    }

    /// The refinement pool this request draws from, if any.
    pub fn refinement_topic(&self) -> Option<RefinementTopic> {
        match self {
            Self::CategorySearch { topic } => Some(*topic),
            Self::TriggerNotification { trigger, .. } => Some(trigger.topic()),
            Self::UserTopicSearch { .. } | Self::Likelihood { .. } => None,
        }
    }
}

/// Map a raw trigger name onto a known trigger kind.
pub fn resolve_trigger(raw: &str) -> Result<TriggerKind, PromptError> {
    raw.parse::<TriggerKind>()
        .map_err(|k| PromptError::UnknownCategory(format!("trigger '{k}'")))
}

/// Map a raw topic name (slug or refinement key) onto a refinement topic.
pub fn resolve_topic(raw: &str) -> Result<RefinementTopic, PromptError> {
    raw.parse::<RefinementTopic>()
        .map_err(|t| PromptError::UnknownCategory(format!("topic '{t}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_trigger_is_unknown_category() {
        let err = PromptRequest::trigger_notification("screen-brightness", 1.0).unwrap_err();
        match err {
            PromptError::UnknownCategory(msg) => assert!(msg.contains("screen-brightness")),
            other => panic!("expected UnknownCategory, got {other:?}"),
        }
    }

    #[test]
    fn unknown_topic_is_unknown_category() {
        assert!(matches!(
            PromptRequest::category_search("gardening"),
            Err(PromptError::UnknownCategory(_))
        ));
    }

    #[test]
    fn triggers_resolve_to_notification_template_and_matching_topic() {
        let req = PromptRequest::trigger_notification("network-usage", 3.0).unwrap();
        assert_eq!(req.category(), TemplateCategory::TriggerNotification);
        assert_eq!(req.refinement_topic(), Some(RefinementTopic::NetworkUsage));
    }

    #[test]
    fn search_requests_resolve_categories() {
        let user = PromptRequest::UserTopicSearch {
            topic: "solar panels".into(),
        };
        assert_eq!(user.category(), TemplateCategory::SearchUserBased);
        assert_eq!(user.refinement_topic(), None);

        let cat = PromptRequest::category_search("EnergyRefinement").unwrap();
        assert_eq!(cat.category(), TemplateCategory::SearchCategoryBased);
        assert_eq!(cat.refinement_topic(), Some(RefinementTopic::Energy));
    }
}
