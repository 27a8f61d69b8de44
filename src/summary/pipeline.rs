//! Call summary pipeline orchestration

use tokio_util::sync::CancellationToken;

use crate::llm::ModelProvider;
use crate::summary::{
    aggregate, build_chunks, filter_relevant, format_summary, merge_turns, summarize_chunks, Chunk,
    InvestorSet, Turn,
};
use crate::transcript::Utterance;
use crate::Result;

/// Read-only configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub investors: InvestorSet,
    pub word_budget: usize,
    pub min_turn_words: usize,
    pub chunk_max_tokens: u32,
    pub reduce_max_tokens: u32,
    pub temperature: f32,
    pub review_tag: String,
    pub map_concurrency: usize,
    pub reduce_fan_in: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            investors: InvestorSet::default(),
            word_budget: 2500,
            min_turn_words: 12,
            chunk_max_tokens: 1024,
            reduce_max_tokens: 2048,
            temperature: 0.0,
            review_tag: "#review_startup".to_string(),
            map_concurrency: 1,
            reduce_fan_in: 8,
        }
    }
}

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Normalizing,
    Summarizing { done: usize, total: usize },
    Aggregating,
    Formatting,
}

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(PipelineStage) + Send + Sync>;

pub struct SummaryPipeline {
    provider: Box<dyn ModelProvider>,
    config: PipelineConfig,
    progress: Option<ProgressCallback>,
}

impl SummaryPipeline {
    pub fn new(provider: Box<dyn ModelProvider>, config: PipelineConfig) -> Self {
        Self {
            provider,
            config,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    fn report(&self, stage: PipelineStage) {
        if let Some(progress) = &self.progress {
            progress(stage);
        }
    }

    /// Merged, role-labelled turns that pass the relevance filter.
    pub fn turns(&self, utterances: &[Utterance]) -> Vec<Turn> {
        let turns = merge_turns(utterances, &self.config.investors);
        filter_relevant(turns, self.config.min_turn_words)
    }

    /// Turns packed into budgeted chunks.
    pub fn chunks(&self, utterances: &[Utterance]) -> Vec<Chunk> {
        build_chunks(&self.turns(utterances), self.config.word_budget)
    }

    /// Summarize a transcript into the formatted markdown block.
    ///
    /// Any provider failure aborts the whole run; nothing partial is
    /// returned.
    pub async fn run(
        &self,
        utterances: &[Utterance],
        title: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        self.report(PipelineStage::Normalizing);
        let turns = self.turns(utterances);
        let chunks = build_chunks(&turns, self.config.word_budget);
        tracing::info!(
            "Transcript of {} utterances -> {} turns -> {} chunks",
            utterances.len(),
            turns.len(),
            chunks.len()
        );

        let total = chunks.len();
        self.report(PipelineStage::Summarizing { done: 0, total });
        let summaries = summarize_chunks(
            self.provider.as_ref(),
            &chunks,
            &self.config,
            cancel,
            &|done| self.report(PipelineStage::Summarizing { done, total }),
        )
        .await?;

        self.report(PipelineStage::Aggregating);
        let final_summary =
            aggregate(self.provider.as_ref(), &summaries, &self.config, cancel).await?;

        self.report(PipelineStage::Formatting);
        Ok(format_summary(&final_summary, title, &self.config.review_tag))
    }
}
