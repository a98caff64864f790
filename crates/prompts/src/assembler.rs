//! Template lookup and field substitution for prompt requests.

use crate::fields::{
    CategorySearchFields, NotificationFields, PeriodFields, Trend, TrendMarkers, UserSearchFields,
};
use crate::request::PromptRequest;
use serde::Serialize;
use std::sync::Arc;
use sustainly_core::{Category, PromptError, RefinementTopic, TemplateCategory, TemplateStore};
use sustainly_template::{FieldBag, ToFields, format_fields, format_string, placeholders};
use tracing::{debug, warn};

/// A finished prompt, ready for the LLM collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub category: TemplateCategory,
    pub text: String,
}

/// Builds prompts from a [`TemplateStore`].
///
/// Stateless apart from the store handle and trend markers; clone or share
/// freely.
#[derive(Clone)]
pub struct PromptAssembler {
    store: Arc<dyn TemplateStore>,
    markers: TrendMarkers,
}

impl PromptAssembler {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self {
            store,
            markers: TrendMarkers::default(),
        }
    }

    pub fn with_trend_markers(mut self, markers: TrendMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Render the prompt for `request`.
    ///
    /// Fails with [`PromptError::MissingTemplate`] when the store has no
    /// template, or no refinement phrase, for the category involved.
    pub async fn build(&self, request: &PromptRequest) -> Result<Prompt, PromptError> {
        let category = request.category();
        let template = self.template(category).await?;

        let text = match request {
            PromptRequest::UserTopicSearch { topic } => {
                format_fields(&template, &UserSearchFields { topic: topic.as_str() })?
            }
            PromptRequest::CategorySearch { topic } => {
                let refinement = self.refinement(*topic).await?;
                format_fields(
                    &template,
                    &CategorySearchFields {
                        topic: *topic,
                        refinement: &refinement,
                    },
                )?
            }
            PromptRequest::TriggerNotification { trigger, value } => {
                let refinement = self.refinement(trigger.topic()).await?;
                format_fields(
                    &template,
                    &NotificationFields {
                        trigger: *trigger,
                        value: *value,
                        refinement: &refinement,
                    },
                )?
            }
            PromptRequest::Likelihood { current, previous } => {
                let filled = format_fields(&template, &PeriodFields::current(current))?;
                match previous {
                    None => filled,
                    Some(previous) => {
                        let trend = Trend::between(
                            current.likelihood.positive,
                            previous.likelihood.positive,
                        );
                        let mut fields = PeriodFields::previous(previous).to_fields()?;
                        fields.insert("Trend", self.markers.marker(trend))?;
                        format_string(&filled, &fields)
                    }
                }
            }
        };

        let unfilled = placeholders(&text);
        if !unfilled.is_empty() {
            warn!(%category, ?unfilled, "prompt still contains placeholders");
        }
        debug!(%category, chars = text.len(), "prompt assembled");
        Ok(Prompt { category, text })
    }

    /// Fill an arbitrary stored template with caller-supplied fields.
    pub async fn render(
        &self,
        category: TemplateCategory,
        fields: &FieldBag,
    ) -> Result<String, PromptError> {
        let template = self.template(category).await?;
        Ok(format_string(&template, fields))
    }

    async fn template(&self, category: TemplateCategory) -> Result<String, PromptError> {
        self.store
            .fetch_template(category)
            .await?
            .ok_or(PromptError::MissingTemplate {
                category: Category::Template(category),
            })
    }

    async fn refinement(&self, topic: RefinementTopic) -> Result<String, PromptError> {
        self.store
            .fetch_random_refinement(topic)
            .await?
            .ok_or(PromptError::MissingTemplate {
                category: Category::Refinement(topic),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::PeriodReport;
    use async_trait::async_trait;
    use sustainly_core::{StoreError, TriggerKind};
    use sustainly_estimator::SustainabilityEstimator;
    use sustainly_store::InMemoryStore;

    async fn store_with(templates: &[(TemplateCategory, &str)]) -> InMemoryStore {
        let store = InMemoryStore::new();
        for (category, body) in templates {
            store.put_template(*category, body).await.unwrap();
        }
        store
    }

    fn period(obs: [(&str, u64, u64); 3]) -> PeriodReport {
        let est = SustainabilityEstimator::from_observations(obs).unwrap();
        PeriodReport::from_estimator(&est).unwrap()
    }

    #[tokio::test]
    async fn user_search_fills_topic() {
        let store = store_with(&[(TemplateCategory::SearchUserBased, "Find {Topic} tips")]).await;
        let assembler = PromptAssembler::new(Arc::new(store));
        let prompt = assembler
            .build(&PromptRequest::UserTopicSearch {
                topic: "solar {panels}".into(),
            })
            .await
            .unwrap();
        assert_eq!(prompt.text, "Find solar {panels} tips");
        assert_eq!(prompt.category, TemplateCategory::SearchUserBased);
    }

    #[tokio::test]
    async fn category_search_uses_refinement() {
        let store = store_with(&[(
            TemplateCategory::SearchCategoryBased,
            "Advice on {Category}: {Refinement}",
        )])
        .await;
        store
            .add_refinement(RefinementTopic::Transport, "car sharing")
            .await
            .unwrap();
        let assembler = PromptAssembler::new(Arc::new(store));

        let prompt = assembler
            .build(&PromptRequest::CategorySearch {
                topic: RefinementTopic::Transport,
            })
            .await
            .unwrap();
        assert_eq!(prompt.text, "Advice on transport: car sharing");
    }

    #[tokio::test]
    async fn notification_fills_trigger_value_and_refinement() {
        let store = store_with(&[(
            TemplateCategory::TriggerNotification,
            "{Trigger} x{Value}: try {Refinement}",
        )])
        .await;
        store
            .add_refinement(RefinementTopic::Charging, "unplugging at 100%")
            .await
            .unwrap();
        let assembler = PromptAssembler::new(Arc::new(store));

        let request = PromptRequest::trigger_notification("charging", 2.5).unwrap();
        let prompt = assembler.build(&request).await.unwrap();
        assert_eq!(prompt.text, "device charging x2.5: try unplugging at 100%");
    }

    #[tokio::test]
    async fn missing_template_is_an_error() {
        let assembler = PromptAssembler::new(Arc::new(InMemoryStore::new()));
        let err = assembler
            .build(&PromptRequest::UserTopicSearch {
                topic: "energy".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PromptError::MissingTemplate {
                category: Category::Template(TemplateCategory::SearchUserBased)
            }
        ));
    }

    #[tokio::test]
    async fn missing_refinement_is_an_error() {
        let store = store_with(&[(TemplateCategory::TriggerNotification, "{Refinement}")]).await;
        let assembler = PromptAssembler::new(Arc::new(store));
        let err = assembler
            .build(&PromptRequest::TriggerNotification {
                trigger: TriggerKind::Browsing,
                value: 1.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PromptError::MissingTemplate {
                category: Category::Refinement(RefinementTopic::Browsing)
            }
        ));
    }

    #[tokio::test]
    async fn likelihood_without_history() {
        let store = store_with(&[(
            TemplateCategory::LikelihoodNoPriorPeriod,
            "{SustainableProbability}|{UnsustainableProbability}\n{FrequencyTable}\n{SustainableDerivation}",
        )])
        .await;
        let assembler = PromptAssembler::new(Arc::new(store));
        let current = period([("Charging", 2, 7), ("Usage", 8, 12), ("Network", 6, 10)]);

        let prompt = assembler
            .build(&PromptRequest::Likelihood {
                current: current.clone(),
                previous: None,
            })
            .await
            .unwrap();

        let expected = format!(
            "{:.2}%|{:.2}%\nCharging | 2 | 7\nUsage | 8 | 12\nNetwork | 6 | 10\n(2/9) * (8/20) * (6/16) * (16/45)",
            current.likelihood.positive, current.likelihood.negative
        );
        assert_eq!(prompt.text, expected);
    }

    #[tokio::test]
    async fn likelihood_with_history_fills_both_periods_and_trend() {
        let store = store_with(&[(
            TemplateCategory::LikelihoodWithPriorPeriod,
            "{SustainableProbability} vs {PreviousSustainableProbability} {Trend} {PreviousFrequencyTable}",
        )])
        .await;
        let assembler = PromptAssembler::new(Arc::new(store)).with_trend_markers(TrendMarkers {
            up: "UP".into(),
            down: "DOWN".into(),
            flat: "FLAT".into(),
        });
        let current = period([("Charging", 2, 7), ("Usage", 8, 12), ("Network", 6, 10)]);
        let previous = period([("Charging", 7, 2), ("Usage", 12, 8), ("Network", 10, 6)]);

        let prompt = assembler
            .build(&PromptRequest::Likelihood {
                current,
                previous: Some(previous),
            })
            .await
            .unwrap();
        assert!(prompt.text.contains(" DOWN Charging | 7 | 2\nUsage | 12 | 8"));
        assert!(!prompt.text.contains('{'));
    }

    #[tokio::test]
    async fn render_fills_custom_fields() {
        let store = store_with(&[(TemplateCategory::SearchUserBased, "{A}{B}")]).await;
        let assembler = PromptAssembler::new(Arc::new(store));
        let fields = FieldBag::new().with("A", "x").unwrap();
        let text = assembler
            .render(TemplateCategory::SearchUserBased, &fields)
            .await
            .unwrap();
        assert_eq!(text, "x{B}");
    }

    struct FailingStore;

    #[async_trait]
    impl TemplateStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_template(&self, _: TemplateCategory) -> Result<Option<String>, StoreError> {
            Err(StoreError::Storage("disk unavailable".into()))
        }

        async fn fetch_random_refinement(
            &self,
            _: RefinementTopic,
        ) -> Result<Option<String>, StoreError> {
            Err(StoreError::Storage("disk unavailable".into()))
        }

        async fn put_template(&self, _: TemplateCategory, _: &str) -> Result<(), StoreError> {
            Ok(())
        }

        async fn add_refinement(&self, _: RefinementTopic, _: &str) -> Result<(), StoreError> {
            Ok(())
        }

        async fn refinement_count(&self, _: RefinementTopic) -> Result<usize, StoreError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let assembler = PromptAssembler::new(Arc::new(FailingStore));
        let err = assembler
            .build(&PromptRequest::UserTopicSearch {
                topic: "energy".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PromptError::Store(StoreError::Storage(_))));
    }
}
