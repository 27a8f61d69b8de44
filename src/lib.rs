//! callnotes - Structured summaries of investor/founder due-diligence calls
//!
//! Raw speaker-attributed transcripts are merged into turns, packed into
//! word-budgeted chunks, summarized per chunk by a language model, and
//! consolidated into one markdown block covering a fixed set of sections.

pub mod cli;
pub mod config;
pub mod document;
pub mod llm;
pub mod summary;
pub mod transcript;

use thiserror::Error;

/// Main error type for callnotes
#[derive(Error, Debug)]
pub enum CallnotesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transcript source error: {0}")]
    SourceFetch(String),

    #[error("Meeting not found: {0}")]
    MeetingNotFound(String),

    #[error("Model provider error: {0}")]
    Provider(String),

    #[error("Pipeline cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CallnotesError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "callnotes";
