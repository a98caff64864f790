//! `sustainly prompt`: Build search and notification prompts.

use sustainly_config::AppConfig;
use sustainly_prompts::PromptRequest;

use super::backend::Backend;

async fn build(request: PromptRequest) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let backend = Backend::open(&config).await?;
    let prompt = backend.assembler(&config).build(&request).await?;
    println!("{}", prompt.text);
    Ok(())
}

pub async fn search(topic: String) -> Result<(), Box<dyn std::error::Error>> {
    build(PromptRequest::UserTopicSearch { topic }).await
}

pub async fn category(topic: &str) -> Result<(), Box<dyn std::error::Error>> {
    build(PromptRequest::category_search(topic)?).await
}

pub async fn notify(trigger: &str, value: f64) -> Result<(), Box<dyn std::error::Error>> {
    build(PromptRequest::trigger_notification(trigger, value)?).await
}
