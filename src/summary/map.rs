//! Per-chunk structured extraction

use futures::stream::{self, StreamExt, TryStreamExt};
use tokio_util::sync::CancellationToken;

use crate::llm::prompts::chunk_system_prompt;
use crate::llm::{CompletionRequest, ModelProvider};
use crate::summary::{Chunk, PipelineConfig};
use crate::{CallnotesError, Result};

/// Extract the seven sections from one chunk.
///
/// An empty model response yields an empty summary; transport failures
/// propagate unchanged.
pub async fn summarize_chunk(
    provider: &dyn ModelProvider,
    chunk: &Chunk,
    config: &PipelineConfig,
) -> Result<String> {
    let system_prompt = chunk_system_prompt();
    let summary = provider
        .complete(CompletionRequest {
            system_prompt: &system_prompt,
            user_prompt: &chunk.text,
            max_tokens: config.chunk_max_tokens,
            temperature: config.temperature,
        })
        .await?;

    if summary.trim().is_empty() {
        tracing::warn!(
            "Model returned no content for a chunk of {} words",
            chunk.word_count
        );
    }

    Ok(summary)
}

/// Run the map stage over every chunk.
///
/// At most `config.map_concurrency` calls are in flight; results always come
/// back in chunk order. `on_done` is told how many chunks have finished.
pub async fn summarize_chunks(
    provider: &dyn ModelProvider,
    chunks: &[Chunk],
    config: &PipelineConfig,
    cancel: &CancellationToken,
    on_done: &(dyn Fn(usize) + Send + Sync),
) -> Result<Vec<String>> {
    let total = chunks.len();

    stream::iter(chunks.iter().enumerate())
        .map(|(i, chunk)| async move {
            if cancel.is_cancelled() {
                return Err(CallnotesError::Cancelled);
            }
            tracing::info!(
                "Summarizing chunk {}/{} ({} words)",
                i + 1,
                total,
                chunk.word_count
            );
            summarize_chunk(provider, chunk, config).await
        })
        .buffered(config.map_concurrency.max(1))
        .enumerate()
        .map(|(done, result)| {
            if result.is_ok() {
                on_done(done + 1);
            }
            result
        })
        .try_collect()
        .await
}
