//! TOML seed files for populating a [`TemplateStore`].
//!
//! ```toml
//! [templates]
//! SearchUserBasedTemplate = "Find advice about {Topic}"
//!
//! [[refinements]]
//! topic = "energy"
//! phrases = ["reducing standby power"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use sustainly_core::error::StoreError;
use sustainly_core::{RefinementTopic, TemplateCategory, TemplateStore};
use tracing::info;

const BUILTIN: &str = include_str!("../assets/default_templates.toml");

/// Refinement phrases for one topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementSeed {
    pub topic: RefinementTopic,
    #[serde(default)]
    pub phrases: Vec<String>,
}

/// Parsed contents of a seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedFile {
    /// Category key → template body.
    #[serde(default)]
    pub templates: BTreeMap<String, String>,

    #[serde(default)]
    pub refinements: Vec<RefinementSeed>,
}

/// Counts of what [`SeedFile::apply`] wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub templates: usize,
    pub phrases: usize,
}

impl SeedFile {
    /// Parse seed TOML.
    pub fn parse(content: &str) -> Result<Self, StoreError> {
        let seed: Self =
            toml::from_str(content).map_err(|e| StoreError::Seed(format!("TOML parse: {e}")))?;
        seed.validate()?;
        Ok(seed)
    }

    /// Read and parse a seed file from disk.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Seed(format!("read {}: {e}", path.display())))?;
        Self::parse(&content)
    }

    /// The template set bundled with the crate.
    pub fn builtin() -> Result<Self, StoreError> {
        Self::parse(BUILTIN)
    }

    /// Parsed template categories, rejecting unknown keys.
    pub fn template_categories(&self) -> Result<Vec<(TemplateCategory, &str)>, StoreError> {
        self.templates
            .iter()
            .map(|(key, body)| {
                key.parse::<TemplateCategory>()
                    .map(|c| (c, body.as_str()))
                    .map_err(|k| StoreError::Seed(format!("unknown template category '{k}'")))
            })
            .collect()
    }

    fn validate(&self) -> Result<(), StoreError> {
        self.template_categories()?;
        for seed in &self.refinements {
            if seed.phrases.iter().any(|p| p.trim().is_empty()) {
                return Err(StoreError::Seed(format!(
                    "empty refinement phrase for topic '{}'",
                    seed.topic
                )));
            }
        }
        Ok(())
    }

    /// Write every template and phrase into `store`.
    pub async fn apply(&self, store: &dyn TemplateStore) -> Result<SeedSummary, StoreError> {
        let mut summary = SeedSummary::default();
        for (category, body) in self.template_categories()? {
            store.put_template(category, body).await?;
            summary.templates += 1;
        }
        for seed in &self.refinements {
            for phrase in &seed.phrases {
                store.add_refinement(seed.topic, phrase).await?;
                summary.phrases += 1;
            }
        }
        info!(
            store = store.name(),
            templates = summary.templates,
            phrases = summary.phrases,
            "seeded template store"
        );
        Ok(summary)
    }
}
