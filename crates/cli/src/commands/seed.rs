//! `sustainly seed`: Load templates and refinement phrases into the store.

use std::path::PathBuf;
use sustainly_config::AppConfig;
use sustainly_store::SeedFile;

use super::backend::Backend;

pub async fn run(file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let backend = Backend::open(&config).await?;

    let seed = match &file {
        Some(path) => SeedFile::load(path)?,
        None => SeedFile::builtin()?,
    };
    let summary = seed.apply(backend.templates.as_ref()).await?;

    let source = file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "bundled templates".into());
    println!("🌱 Seeded {} from {source}", backend.templates.name());
    println!("   Templates: {}", summary.templates);
    println!("   Phrases:   {}", summary.phrases);
    Ok(())
}
