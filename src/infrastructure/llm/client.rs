//! # LLM Client
//!
//! Provides the `Client` struct, which acts as the main entry point for LLM interactions.
//! It resolves the configured provider and sends the summarizer's prompts to it.

use crate::domain::config::SummarizerConfig;
use crate::domain::traits::LlmProvider;
use crate::infrastructure::llm::providers::{self, ProviderConfig};
use crate::infrastructure::llm::{Context, Error, Provider, Response};
use async_trait::async_trait;

/// Simple LLM client
pub struct Client {
    config: SummarizerConfig,
}

impl Client {
    /// Create a new client from the summarizer configuration
    pub fn new(config: SummarizerConfig) -> Self {
        Self { config }
    }

    /// Checks that the provider is known and an API key is available,
    /// without contacting the service.
    pub fn validate(&self) -> Result<(), Error> {
        self.resolve().map(|_| ())
    }

    fn resolve(&self) -> Result<(Provider, ProviderConfig), Error> {
        let provider = Provider::from_str(&self.config.provider)
            .ok_or_else(|| Error::new(&self.config.provider, "Unknown provider"))?;
        let provider_config = ProviderConfig::from_summarizer_config(provider, &self.config)?;
        Ok((provider, provider_config))
    }

    fn context(&self, prompt: &str) -> Context {
        let context = Context::prompt(prompt)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);
        match &self.config.system_prompt {
            Some(system) => context.add_system_message(system.clone()),
            None => context,
        }
    }

    /// Send a single prompt to the configured provider
    ///
    /// # Example
    /// ```rust,ignore
    /// let response = client.prompt("Summarize: ...").await?;
    /// println!("Response: {}", response.content);
    /// ```
    pub async fn prompt(&self, prompt: &str) -> Result<Response, Error> {
        let (provider, provider_config) = self.resolve()?;
        let response = providers::chat(provider, provider_config, self.context(prompt)).await?;
        tracing::debug!(
            "LLM answered with model {} ({} tokens)",
            response.model,
            response.usage.total_tokens
        );
        Ok(response)
    }
}

#[async_trait]
impl LlmProvider for Client {
    async fn completion(&self, prompt: &str) -> Result<String, String> {
        self.prompt(prompt)
            .await
            .map(|r| r.content)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summarizer_config(provider: &str, endpoint: Option<String>) -> SummarizerConfig {
        SummarizerConfig {
            provider: provider.to_string(),
            model: None,
            endpoint,
            api_key: Some("key".to_string()),
            api_key_env: None,
            max_tokens: 300,
            temperature: 0.2,
            timeout: Some(5),
            system_prompt: Some("You write project digests.".to_string()),
        }
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!(Provider::from_str("openai"), Some(Provider::OpenAI));
        assert_eq!(Provider::from_str("Perplexity"), Some(Provider::Perplexity));
        assert_eq!(Provider::from_str("pplx"), Some(Provider::Perplexity));
        assert_eq!(Provider::from_str("groq"), Some(Provider::Groq));
        assert_eq!(Provider::from_str("xai"), Some(Provider::XAI));
        assert_eq!(Provider::from_str("unknown"), None);
    }

    #[test]
    fn test_provider_as_str() {
        assert_eq!(Provider::OpenAI.as_str(), "openai");
        assert_eq!(Provider::Perplexity.as_str(), "perplexity");
        assert_eq!(Provider::Groq.as_str(), "groq");
        assert_eq!(Provider::XAI.as_str(), "xai");
    }

    #[test]
    fn test_validate() {
        assert!(Client::new(summarizer_config("perplexity", None)).validate().is_ok());
        let err = Client::new(summarizer_config("mystery", None))
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "[mystery] Unknown provider");
    }

    #[test]
    fn test_context_puts_system_message_first() {
        let client = Client::new(summarizer_config("perplexity", None));
        let context = client.context("Summarize this");
        assert_eq!(context.messages.len(), 2);
        assert_eq!(context.messages[0].role.as_str(), "system");
        assert_eq!(context.messages[1].content, "Summarize this");
        assert_eq!(context.max_tokens, Some(300));
    }

    #[tokio::test]
    async fn test_completion_against_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "model": "sonar",
                "max_tokens": 300
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "sonar",
                "choices": [{"message": {"role": "assistant", "content": "Digest."}}]
            })))
            .mount(&server)
            .await;

        let client = Client::new(summarizer_config("perplexity", Some(server.uri())));
        assert_eq!(client.completion("Summarize").await.unwrap(), "Digest.");
    }
}
