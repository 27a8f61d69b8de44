use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::transcript::{TranscriptSource, Utterance};
use crate::{CallnotesError, Result};

const LIST_TRANSCRIPTS_QUERY: &str = "query { transcripts { id title date } }";
const TRANSCRIPT_QUERY: &str = "query Transcript($id: String!) { \
     transcript(id: $id) { title date sentences { text speaker_name } } }";
const UNKNOWN_SPEAKER: &str = "Unknown";

pub struct FirefliesSource {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl FirefliesSource {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.source.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(CallnotesError::Config(
                "Fireflies API key is missing. Set source.api_key in config or CALLNOTES_FIREFLIES_API_KEY."
                    .to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(settings.source.timeout_secs))
            .build()
            .map_err(|e| CallnotesError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            endpoint: settings.source.endpoint.trim().to_string(),
        })
    }

    async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let body = GraphQlRequest { query, variables };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CallnotesError::SourceFetch(format!("Fireflies request failed: {}", e)))?;

        let payload: GraphQlResponse<T> = response.json().await.map_err(|e| {
            CallnotesError::SourceFetch(format!("Failed to parse Fireflies response: {}", e))
        })?;

        if let Some(error) = payload.errors.first() {
            return Err(CallnotesError::SourceFetch(format!(
                "Fireflies returned an error: {}",
                error.message
            )));
        }

        payload.data.ok_or_else(|| {
            CallnotesError::SourceFetch("Fireflies response contained no data".to_string())
        })
    }

    /// Resolve a meeting title to its transcript id.
    async fn meeting_id(&self, meeting: &str) -> Result<String> {
        let data: TranscriptList = self
            .query(LIST_TRANSCRIPTS_QUERY, serde_json::Value::Null)
            .await?;

        select_meeting(data.transcripts, meeting)
    }
}

#[async_trait]
impl TranscriptSource for FirefliesSource {
    async fn fetch_transcript(&self, meeting: &str) -> Result<Vec<Utterance>> {
        let id = self.meeting_id(meeting).await?;

        let data: TranscriptData = self
            .query(TRANSCRIPT_QUERY, serde_json::json!({ "id": id }))
            .await?;

        into_utterances(data.transcript, meeting)
    }
}

/// First transcript whose title equals `meeting` exactly.
fn select_meeting(transcripts: Vec<TranscriptSummary>, meeting: &str) -> Result<String> {
    transcripts
        .into_iter()
        .find(|t| t.title.as_deref() == Some(meeting))
        .map(|t| {
            tracing::debug!(
                "Matched meeting '{}' to transcript {} ({})",
                meeting,
                t.id,
                format_date(t.date)
            );
            t.id
        })
        .ok_or_else(|| CallnotesError::MeetingNotFound(meeting.to_string()))
}

/// Flatten transcript sentences into utterances, in order.
fn into_utterances(
    transcript: Option<TranscriptDetail>,
    meeting: &str,
) -> Result<Vec<Utterance>> {
    let transcript =
        transcript.ok_or_else(|| CallnotesError::MeetingNotFound(meeting.to_string()))?;

    tracing::info!(
        "Fetched {} sentences for '{}' ({})",
        transcript.sentences.len(),
        meeting,
        format_date(transcript.date)
    );

    Ok(transcript
        .sentences
        .into_iter()
        .map(|s| Utterance {
            speaker: s.speaker_name.unwrap_or_else(|| UNKNOWN_SPEAKER.to_string()),
            text: s.text.unwrap_or_default(),
        })
        .collect())
}

fn format_date(epoch_ms: Option<f64>) -> String {
    epoch_ms
        .and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms as i64))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown date".to_string())
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptList {
    #[serde(default)]
    transcripts: Vec<TranscriptSummary>,
}

#[derive(Debug, Deserialize)]
struct TranscriptSummary {
    id: String,
    title: Option<String>,
    date: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TranscriptData {
    transcript: Option<TranscriptDetail>,
}

#[derive(Debug, Deserialize)]
struct TranscriptDetail {
    date: Option<f64>,
    #[serde(default)]
    sentences: Vec<Sentence>,
}

#[derive(Debug, Deserialize)]
struct Sentence {
    text: Option<String>,
    speaker_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transcript_payload() {
        let payload: GraphQlResponse<TranscriptData> = serde_json::from_str(
            r#"{"data": {"transcript": {"title": "Acme", "date": 1700000000000,
                "sentences": [{"text": "Hello", "speaker_name": "Alice"},
                              {"text": "Hi", "speaker_name": null}]}}}"#,
        )
        .unwrap();

        let transcript = payload.data.unwrap().transcript.unwrap();
        assert_eq!(transcript.sentences.len(), 2);
        assert!(transcript.sentences[1].speaker_name.is_none());
        assert_eq!(format_date(transcript.date), "2023-11-14 22:13");
    }

    fn listing(entries: &[(&str, Option<&str>)]) -> Vec<TranscriptSummary> {
        entries
            .iter()
            .map(|(id, title)| TranscriptSummary {
                id: id.to_string(),
                title: title.map(str::to_string),
                date: None,
            })
            .collect()
    }

    #[test]
    fn first_exact_title_match_wins() {
        let transcripts = listing(&[
            ("t1", Some("Acme follow-up")),
            ("t2", None),
            ("t3", Some("Acme")),
            ("t4", Some("Acme")),
        ]);

        assert_eq!(select_meeting(transcripts, "Acme").unwrap(), "t3");
    }

    #[test]
    fn unmatched_title_is_meeting_not_found() {
        let transcripts = listing(&[("t1", Some("acme")), ("t2", Some("Acme "))]);

        let err = select_meeting(transcripts, "Acme").unwrap_err();
        assert!(matches!(err, CallnotesError::MeetingNotFound(ref m) if m == "Acme"));
    }

    #[test]
    fn null_transcript_is_meeting_not_found() {
        let err = into_utterances(None, "Acme").unwrap_err();
        assert!(matches!(err, CallnotesError::MeetingNotFound(_)));
    }

    #[test]
    fn sentences_become_utterances_with_unknown_speaker_fallback() {
        let payload: TranscriptData = serde_json::from_str(
            r#"{"transcript": {"date": null, "sentences": [
                {"text": "Hello", "speaker_name": "Alice"},
                {"text": "Hi", "speaker_name": null},
                {"text": null, "speaker_name": "Bob"}]}}"#,
        )
        .unwrap();

        let utterances = into_utterances(payload.transcript, "Acme").unwrap();
        assert_eq!(
            utterances,
            vec![
                Utterance::new("Alice", "Hello"),
                Utterance::new(UNKNOWN_SPEAKER, "Hi"),
                Utterance::new("Bob", ""),
            ]
        );
    }

    #[test]
    fn graphql_errors_are_collected() {
        let payload: GraphQlResponse<TranscriptList> =
            serde_json::from_str(r#"{"data": null, "errors": [{"message": "bad token"}]}"#)
                .unwrap();
        assert_eq!(payload.errors[0].message, "bad token");
    }
}
