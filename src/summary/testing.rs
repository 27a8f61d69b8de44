//! In-memory model provider for pipeline tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::llm::{CompletionRequest, ModelProvider};
use crate::{CallnotesError, Result};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

enum Mode {
    Echo,
    Replies(Mutex<VecDeque<Result<String>>>),
}

pub struct ScriptedProvider {
    mode: Mode,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    /// Answers every call with `echo: <user prompt>`.
    pub fn echo() -> Self {
        Self {
            mode: Mode::Echo,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers calls with the given results, in order.
    pub fn replies(replies: Vec<Result<String>>) -> Self {
        Self {
            mode: Mode::Replies(Mutex::new(replies.into())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: request.system_prompt.to_string(),
            user_prompt: request.user_prompt.to_string(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        });

        match &self.mode {
            Mode::Echo => Ok(format!("echo: {}", request.user_prompt)),
            Mode::Replies(replies) => replies.lock().unwrap().pop_front().unwrap_or_else(|| {
                Err(CallnotesError::Provider("no scripted reply left".to_string()))
            }),
        }
    }
}
