//! # LLM Providers
//!
//! All supported providers expose an OpenAI-compatible `chat/completions` endpoint;
//! they differ only in base URL and default model.

mod openai;

use crate::domain::config::SummarizerConfig;
use crate::infrastructure::llm::{Context, Error, Provider, Response};

/// Configuration for a provider
#[derive(Clone)]
pub struct ProviderConfig {
    /// API key
    pub api_key: String,
    /// Base URL (for non-default endpoints)
    pub base_url: Option<String>,
    /// Default model
    pub default_model: String,
    /// Timeout in seconds
    pub timeout: Option<u64>,
}

impl ProviderConfig {
    pub fn from_summarizer_config(
        provider: Provider,
        config: &SummarizerConfig,
    ) -> Result<Self, Error> {
        let api_key = if let Some(key) = &config.api_key {
            key.clone()
        } else if let Some(env_var) = &config.api_key_env {
            std::env::var(env_var).map_err(|e| {
                Error::new(
                    provider.as_str(),
                    format!("API key env var {} not set: {}", env_var, e),
                )
            })?
        } else {
            return Err(Error::new(
                provider.as_str(),
                "No API key provided - set api_key or api_key_env",
            ));
        };

        Ok(Self {
            api_key,
            base_url: config.endpoint.clone(),
            default_model: config
                .model
                .clone()
                .unwrap_or_else(|| provider.default_model().to_string()),
            timeout: config.timeout,
        })
    }
}

/// Execute a chat request with the specified provider
pub async fn chat(
    provider: Provider,
    config: ProviderConfig,
    context: Context,
) -> Result<Response, Error> {
    let config = ProviderConfig {
        base_url: Some(
            config
                .base_url
                .clone()
                .unwrap_or_else(|| provider.default_base_url().to_string()),
        ),
        ..config
    };
    openai::chat(provider.as_str(), config, context).await
}
