//! OpenAI-style chat completions backend
//!
//! Works against api.openai.com or any compatible endpoint set in
//! `llm.endpoint`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::{CompletionRequest, ModelProvider};
use crate::{CallnotesError, Result};

const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4-1106-preview";

pub struct OpenAiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.llm.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(CallnotesError::Config(
                "OpenAI API key is missing. Set llm.api_key in config or CALLNOTES_LLM_API_KEY."
                    .to_string(),
            ));
        }

        let model = match settings.llm.model.trim() {
            "" => DEFAULT_OPENAI_MODEL.to_string(),
            m => m.to_string(),
        };

        let endpoint = match settings.llm.endpoint.trim().trim_end_matches('/') {
            "" => DEFAULT_OPENAI_ENDPOINT.to_string(),
            e => e.to_string(),
        };

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(settings.llm.timeout_secs))
                .build()
                .map_err(|e| {
                    CallnotesError::Config(format!("Failed to build OpenAI HTTP client: {}", e))
                })?,
            api_key,
            model,
            endpoint,
        })
    }
}

#[async_trait]
impl ModelProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        };

        tracing::debug!(
            "Calling chat completion with model: {} (max_tokens={})",
            self.model,
            request.max_tokens
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CallnotesError::Provider(format!("Chat completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CallnotesError::Provider(format!(
                "Chat completion failed ({}): {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            CallnotesError::Provider(format!("Failed to parse completion response: {}", e))
        })?;

        let content = completion.into_content();
        tracing::debug!("Chat completion returned {} characters", content.len());
        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// Content of the first choice; absent choices or null content map to "".
    fn into_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
