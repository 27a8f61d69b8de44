use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::transcript::{FileSource, FirefliesSource};
use crate::{CallnotesError, Result};

/// One attributed piece of speech, in call order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    #[serde(alias = "speaker_name")]
    pub speaker: String,
    pub text: String,
}

impl Utterance {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the utterances of `meeting` in chronological order.
    async fn fetch_transcript(&self, meeting: &str) -> Result<Vec<Utterance>>;
}

/// Build a transcript source from runtime settings.
pub fn build_source(settings: &Settings) -> Result<Box<dyn TranscriptSource>> {
    match settings.source.provider.to_lowercase().as_str() {
        "fireflies" => Ok(Box::new(FirefliesSource::from_settings(settings)?)),
        "file" => Ok(Box::new(FileSource::new())),
        other => Err(CallnotesError::Config(format!(
            "Unsupported source.provider '{}'. Supported sources: fireflies, file",
            other
        ))),
    }
}
