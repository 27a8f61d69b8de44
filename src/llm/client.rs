use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::{GeminiClient, OpenAiClient};
use crate::{CallnotesError, Result};

/// A single system/user completion request.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Run one completion.
    ///
    /// Returns an empty string when the backend produced no content; only
    /// transport, status and decoding failures are errors.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String>;
}

/// Build a model provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn ModelProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_settings(settings)?)),
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings)?)),
        other => Err(CallnotesError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: openai, gemini",
            other
        ))),
    }
}
