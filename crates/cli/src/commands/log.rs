//! `sustainly log`: Record a trigger event.

use sustainly_config::AppConfig;
use sustainly_core::{Polarity, TriggerEvent};
use sustainly_prompts::resolve_trigger;

use super::backend::Backend;

pub async fn run(
    trigger: &str,
    polarity: &str,
    value: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = resolve_trigger(trigger)?;
    let polarity: Polarity = polarity
        .parse()
        .map_err(|p| format!("unknown polarity '{p}' (expected sustainable or unsustainable)"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("value must be a non-negative number, got {value}").into());
    }

    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let backend = Backend::open(&config).await?;
    backend
        .log
        .record(TriggerEvent::new(kind, polarity, value))
        .await?;

    println!(
        "📝 Logged {} {} ({value}), {} events in {}",
        polarity.as_str(),
        kind.slug(),
        backend.log.count().await?,
        backend.log.name()
    );
    Ok(())
}
