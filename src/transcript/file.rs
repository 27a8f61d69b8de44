//! Local JSON transcripts
//!
//! The file holds an array of `{"speaker": ..., "text": ...}` objects. The
//! meeting name passed to [`TranscriptSource::fetch_transcript`] is the path.

use async_trait::async_trait;
use std::path::Path;

use crate::transcript::{TranscriptSource, Utterance};
use crate::{CallnotesError, Result};

#[derive(Debug, Default)]
pub struct FileSource;

impl FileSource {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a transcript file.
    pub fn load(path: &Path) -> Result<Vec<Utterance>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CallnotesError::SourceFetch(format!(
                "Failed to read transcript {}: {}",
                path.display(),
                e
            ))
        })?;

        let utterances: Vec<Utterance> = serde_json::from_str(&content).map_err(|e| {
            CallnotesError::SourceFetch(format!(
                "Failed to parse transcript {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(
            "Loaded {} utterances from {}",
            utterances.len(),
            path.display()
        );
        Ok(utterances)
    }
}

#[async_trait]
impl TranscriptSource for FileSource {
    async fn fetch_transcript(&self, meeting: &str) -> Result<Vec<Utterance>> {
        Self::load(Path::new(meeting))
    }
}
