//! Consolidation of chunk summaries into the final summary

use tokio_util::sync::CancellationToken;

use crate::llm::prompts::{build_reduce_prompt, reduce_system_prompt};
use crate::llm::{CompletionRequest, ModelProvider};
use crate::summary::PipelineConfig;
use crate::{CallnotesError, Result};

/// Consolidate `summaries` (in chunk order) into one summary.
///
/// No summaries means no call and an empty result. Up to
/// `config.reduce_fan_in` summaries are merged by a single call; beyond that
/// consecutive groups are merged first and the group results merged again,
/// keeping chunk order at every level.
pub async fn aggregate(
    provider: &dyn ModelProvider,
    summaries: &[String],
    config: &PipelineConfig,
    cancel: &CancellationToken,
) -> Result<String> {
    if summaries.is_empty() {
        tracing::info!("No chunk summaries to aggregate");
        return Ok(String::new());
    }

    let fan_in = config.reduce_fan_in.max(2);
    let mut level: Vec<String> = summaries.to_vec();
    let mut depth = 0;

    while level.len() > fan_in {
        depth += 1;
        tracing::info!(
            "Reducing {} summaries in groups of {} (level {})",
            level.len(),
            fan_in,
            depth
        );

        let mut next = Vec::with_capacity(level.len().div_ceil(fan_in));
        for group in level.chunks(fan_in) {
            if group.len() == 1 {
                next.push(group[0].clone());
            } else {
                next.push(reduce_once(provider, group, config, cancel).await?);
            }
        }
        level = next;
    }

    tracing::info!("Aggregating {} summaries", level.len());
    reduce_once(provider, &level, config, cancel).await
}

async fn reduce_once(
    provider: &dyn ModelProvider,
    summaries: &[String],
    config: &PipelineConfig,
    cancel: &CancellationToken,
) -> Result<String> {
    if cancel.is_cancelled() {
        return Err(CallnotesError::Cancelled);
    }

    let system_prompt = reduce_system_prompt();
    let user_prompt = build_reduce_prompt(summaries);

    provider
        .complete(CompletionRequest {
            system_prompt: &system_prompt,
            user_prompt: &user_prompt,
            max_tokens: config.reduce_max_tokens,
            temperature: config.temperature,
        })
        .await
}
