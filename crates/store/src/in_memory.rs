//! In-memory backend, useful for testing and ephemeral sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use std::collections::HashMap;
use std::sync::Arc;
use sustainly_core::error::StoreError;
use sustainly_core::{
    Polarity, RefinementTopic, TemplateCategory, TemplateStore, TriggerEvent, TriggerKind,
    TriggerLog, TriggerTotal,
};
use tokio::sync::RwLock;

/// An in-memory store that keeps templates, refinement pools and trigger
/// events in process memory. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    templates: Arc<RwLock<HashMap<TemplateCategory, String>>>,
    refinements: Arc<RwLock<HashMap<RefinementTopic, Vec<String>>>>,
    events: Arc<RwLock<Vec<TriggerEvent>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn fetch_template(
        &self,
        category: TemplateCategory,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.templates.read().await.get(&category).cloned())
    }

    async fn fetch_random_refinement(
        &self,
        topic: RefinementTopic,
    ) -> Result<Option<String>, StoreError> {
        let pools = self.refinements.read().await;
        Ok(pools
            .get(&topic)
            .and_then(|phrases| phrases.choose(&mut rand::rng()).cloned()))
    }

    async fn put_template(&self, category: TemplateCategory, body: &str) -> Result<(), StoreError> {
        self.templates.write().await.insert(category, body.to_string());
        Ok(())
    }

    async fn add_refinement(&self, topic: RefinementTopic, phrase: &str) -> Result<(), StoreError> {
        let mut pools = self.refinements.write().await;
        let pool = pools.entry(topic).or_default();
        if !pool.iter().any(|p| p == phrase) {
            pool.push(phrase.to_string());
        }
        Ok(())
    }

    async fn refinement_count(&self, topic: RefinementTopic) -> Result<usize, StoreError> {
        Ok(self.refinements.read().await.get(&topic).map_or(0, Vec::len))
    }
}

#[async_trait]
impl TriggerLog for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn record(&self, event: TriggerEvent) -> Result<(), StoreError> {
        self.events.write().await.push(event);
        Ok(())
    }

    async fn totals(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<TriggerTotal>, StoreError> {
        let (since, until) = (since.timestamp_millis(), until.timestamp_millis());
        let events = self.events.read().await;
        let mut sums: HashMap<(TriggerKind, Polarity), f64> = HashMap::new();
        for e in events.iter().filter(|e| {
            let at = e.occurred_at.timestamp_millis();
            at >= since && at < until
        }) {
            *sums.entry((e.kind, e.polarity)).or_default() += e.value;
        }

        let mut totals = Vec::with_capacity(sums.len());
        for kind in TriggerKind::ALL {
            for polarity in [Polarity::Sustainable, Polarity::Unsustainable] {
                if let Some(total) = sums.get(&(kind, polarity)) {
                    totals.push(TriggerTotal {
                        kind,
                        polarity,
                        total: *total,
                    });
                }
            }
        }
        Ok(totals)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.events.read().await.len())
    }
}
