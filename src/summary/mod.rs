//! Summary module for callnotes
//!
//! Turns a raw transcript into a formatted call summary:
//! normalize -> chunk -> map (per-chunk extraction) -> reduce -> format.

mod chunk;
mod format;
mod map;
mod normalize;
mod pipeline;
mod reduce;

#[cfg(test)]
pub(crate) mod testing;

pub use chunk::{build_chunks, Chunk};
pub use format::{format_summary, normalize_headings, title_block, HEADING_PREFIX};
pub use map::{summarize_chunk, summarize_chunks};
pub use normalize::{count_words, filter_relevant, merge_turns, InvestorSet, Role, Turn};
pub use pipeline::{PipelineConfig, PipelineStage, ProgressCallback, SummaryPipeline};
pub use reduce::aggregate;
