//! Collaborator traits: template storage and the trigger log.
//!
//! The core never owns persistence. It asks a [`TemplateStore`] for template
//! bodies and refinement phrases, and a [`TriggerLog`] for aggregated trigger
//! totals. Random refinement selection is the store's responsibility: every
//! implementation must pick uniformly over the phrases stored for a topic.

use crate::category::{RefinementTopic, TemplateCategory};
use crate::error::StoreError;
use crate::trigger::{TriggerEvent, TriggerTotal};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Key/value storage for prompt templates and refinement phrases.
///
/// Implementations: SQLite, in-memory.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// The backend name (e.g., "sqlite", "in_memory").
    fn name(&self) -> &str;

    /// Fetch the template body for a category, if one is stored.
    async fn fetch_template(
        &self,
        category: TemplateCategory,
    ) -> std::result::Result<Option<String>, StoreError>;

    /// Fetch one refinement phrase for a topic, chosen uniformly at random.
    async fn fetch_random_refinement(
        &self,
        topic: RefinementTopic,
    ) -> std::result::Result<Option<String>, StoreError>;

    /// Insert or replace the template body for a category.
    async fn put_template(
        &self,
        category: TemplateCategory,
        body: &str,
    ) -> std::result::Result<(), StoreError>;

    /// Add one refinement phrase to a topic's pool.
    async fn add_refinement(
        &self,
        topic: RefinementTopic,
        phrase: &str,
    ) -> std::result::Result<(), StoreError>;

    /// Number of refinement phrases stored for a topic.
    async fn refinement_count(&self, topic: RefinementTopic)
    -> std::result::Result<usize, StoreError>;
}

/// Append-only log of device triggers.
#[async_trait]
pub trait TriggerLog: Send + Sync {
    /// The backend name (e.g., "sqlite", "in_memory").
    fn name(&self) -> &str;

    /// Record one trigger.
    async fn record(&self, event: TriggerEvent) -> std::result::Result<(), StoreError>;

    /// Summed values per kind and polarity for events in `[since, until)`.
    ///
    /// Kinds with no events in the window are absent from the result.
    async fn totals(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> std::result::Result<Vec<TriggerTotal>, StoreError>;

    /// Total number of logged events.
    async fn count(&self) -> std::result::Result<usize, StoreError>;
}
