//! Completion provider abstraction for recipe generation.
//!
//! The generation workflow only needs "prompt + JSON schema in, JSON value out".
//! Providers are injected through `AppState` so tests can swap in [`FakeProvider`].

mod fake;
mod openai;

pub use fake::FakeProvider;
pub use openai::OpenAiProvider;

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::LlmConfig;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Model refused the request: {0}")]
    Refused(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Named JSON schema the completion must conform to.
#[derive(Debug, Clone)]
pub struct OutputSchema {
    pub name: &'static str,
    pub schema: Value,
}

impl OutputSchema {
    pub fn new(name: &'static str, schema: Value) -> Self {
        Self { name, schema }
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and return the structured output as JSON.
    async fn complete(&self, prompt: &str, schema: &OutputSchema) -> Result<Value, LlmError>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// Build the provider selected by `LLM_PROVIDER`.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    match config.provider.as_str() {
        "openai" => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY not set".to_string()))?;
            Ok(Arc::new(OpenAiProvider::new(
                api_key,
                config.model.clone(),
                config.base_url.clone(),
                config.timeout_secs,
            )?))
        }
        "fake" => Ok(Arc::new(FakeProvider::with_recipe_responses())),
        other => Err(LlmError::NotConfigured(format!("Unknown provider: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: &str, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            provider: provider.to_string(),
            api_key: api_key.map(str::to_string),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn openai_requires_api_key() {
        let err = create_provider(&config("openai", None)).unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured(_)));
    }

    #[test]
    fn selects_provider_by_name() {
        let openai = create_provider(&config("openai", Some("sk-test"))).unwrap();
        assert_eq!(openai.provider_name(), "openai");
        assert_eq!(openai.model_name(), "gpt-4o-mini");

        let fake = create_provider(&config("fake", None)).unwrap();
        assert_eq!(fake.provider_name(), "fake");
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(create_provider(&config("llama", None)).is_err());
    }
}
