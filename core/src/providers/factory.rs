use crate::config::Config;
use crate::providers::OpenAIProvider;
use crate::providers::openai::OPENAI_BASE_URL;
use crate::traits::Provider;
use anyhow::{Result, anyhow};
use std::sync::Arc;
use std::time::Duration;

pub const GEMINI_OPENAI_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai";

pub fn create_provider(config: &Config) -> Result<Arc<dyn Provider>> {
    let default_base_url = match config.provider.to_lowercase().as_str() {
        "gemini" => GEMINI_OPENAI_BASE_URL,
        "openai" => OPENAI_BASE_URL,
        other => {
            return Err(anyhow!(
                "Unknown provider: {}. Available: gemini, openai",
                other
            ));
        }
    };

    if config.api_key.trim().is_empty() {
        return Err(anyhow!(
            "No API key found for provider '{}'. Set it in the config file or environment.",
            config.provider
        ));
    }

    let base_url = config.base_url.as_deref().unwrap_or(default_base_url);
    let provider = OpenAIProvider::new(config.api_key.clone())
        .with_model(config.model.clone())
        .with_base_url(base_url)
        .with_temperature(config.temperature)
        .with_timeout(Duration::from_secs(config.request_timeout_secs));

    Ok(Arc::new(provider))
}
