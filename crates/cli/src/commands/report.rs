//! `sustainly report`: Build the likelihood prompt for the period ending now.

use chrono::Utc;
use sustainly_config::AppConfig;
use sustainly_prompts::ReportJob;

use super::backend::Backend;

pub async fn run(days: Option<u32>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let backend = Backend::open(&config).await?;

    let job = ReportJob::new(backend.log.clone(), backend.assembler(&config))
        .with_lookback_days(days.unwrap_or(config.report.lookback_days))
        .with_previous_period(config.report.compare_previous);
    let report = job.run(Utc::now()).await?;

    if json {
        let out = serde_json::json!({
            "current": report.current,
            "previous": report.previous,
            "prompt": report.prompt,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", report.prompt.text);
    }
    Ok(())
}
