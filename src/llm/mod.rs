//! LLM module for callnotes
//!
//! A single narrow completion interface with one implementation per backend.

mod client;
mod gemini;
mod openai;
pub mod prompts;

pub use client::{build_provider, CompletionRequest, ModelProvider};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
