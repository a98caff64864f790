//! Opens the configured store and hands out its two collaborator roles.

use std::sync::Arc;
use sustainly_config::AppConfig;
use sustainly_core::{StoreError, TemplateCategory, TemplateStore, TriggerLog};
use sustainly_prompts::{PromptAssembler, TrendMarkers};
use sustainly_store::{InMemoryStore, SeedFile, SqliteStore};
use tracing::debug;

pub struct Backend {
    pub templates: Arc<dyn TemplateStore>,
    pub log: Arc<dyn TriggerLog>,
}

impl Backend {
    pub async fn open(config: &AppConfig) -> Result<Self, StoreError> {
        let backend = match config.store.backend.as_str() {
            "in_memory" => {
                let store = InMemoryStore::new();
                Self {
                    templates: Arc::new(store.clone()),
                    log: Arc::new(store),
                }
            }
            _ => {
                if let Some(parent) = sqlite_parent_dir(config) {
                    std::fs::create_dir_all(&parent).map_err(|e| {
                        StoreError::Storage(format!("create {}: {e}", parent.display()))
                    })?;
                }
                let store = SqliteStore::new(&config.store_url()).await?;
                Self {
                    templates: Arc::new(store.clone()),
                    log: Arc::new(store),
                }
            }
        };

        if config.store.seed_builtin {
            backend.seed_if_incomplete().await?;
        }
        Ok(backend)
    }

    pub fn assembler(&self, config: &AppConfig) -> PromptAssembler {
        PromptAssembler::new(self.templates.clone()).with_trend_markers(TrendMarkers {
            up: config.prompts.trend_up.clone(),
            down: config.prompts.trend_down.clone(),
            flat: config.prompts.trend_flat.clone(),
        })
    }

    /// Load the bundled templates when any template category is missing.
    async fn seed_if_incomplete(&self) -> Result<(), StoreError> {
        for category in TemplateCategory::ALL {
            if self.templates.fetch_template(category).await?.is_none() {
                debug!(%category, "template missing, seeding bundled set");
                SeedFile::builtin()?.apply(self.templates.as_ref()).await?;
                break;
            }
        }
        Ok(())
    }
}

fn sqlite_parent_dir(config: &AppConfig) -> Option<std::path::PathBuf> {
    let url = config.store_url();
    let path = url.strip_prefix("sqlite://")?;
    std::path::Path::new(path).parent().map(|p| p.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_backend_is_seeded() {
        let mut config = AppConfig::default();
        config.store.backend = "in_memory".into();
        let backend = Backend::open(&config).await.unwrap();
        for category in TemplateCategory::ALL {
            assert!(
                backend
                    .templates
                    .fetch_template(category)
                    .await
                    .unwrap()
                    .is_some()
            );
        }
    }

    #[tokio::test]
    async fn seeding_can_be_disabled() {
        let mut config = AppConfig::default();
        config.store.backend = "in_memory".into();
        config.store.seed_builtin = false;
        let backend = Backend::open(&config).await.unwrap();
        assert!(
            backend
                .templates
                .fetch_template(TemplateCategory::SearchUserBased)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn memory_path_has_no_parent_dir() {
        let mut config = AppConfig::default();
        config.store.path = ":memory:".into();
        assert!(sqlite_parent_dir(&config).is_none());
    }
}
