//! CLI command implementations

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::document::{insert_into_note, InsertPosition};
use crate::llm::build_provider;
use crate::summary::{
    build_chunks, filter_relevant, format_summary, merge_turns, PipelineStage, SummaryPipeline,
    Turn,
};
use crate::transcript::{build_source, FileSource, Utterance};

/// Fetch, summarize and deliver one call.
pub async fn summarize_call(
    settings: &Settings,
    meeting: &str,
    title: Option<String>,
    transcript: Option<PathBuf>,
    investors: Vec<String>,
    note: Option<PathBuf>,
    line: Option<usize>,
) -> Result<()> {
    let provider = build_provider(settings)?;
    let config = settings.pipeline_config(&investors);
    let title = title.unwrap_or_else(|| meeting.to_string());

    tracing::info!(
        "Reading the transcript of {} ({} known investors)",
        meeting,
        config.investors.len()
    );

    let fetched = match &transcript {
        Some(path) => FileSource::load(path),
        None => build_source(settings)?.fetch_transcript(meeting).await,
    };
    let utterances = match fetched {
        Ok(utterances) => utterances,
        Err(e) => {
            tracing::error!("Transcript fetch failed for {}: {:?}", meeting, e);
            anyhow::bail!("Could not read the transcript of {}: {}", meeting, e);
        }
    };

    let cancel = CancellationToken::new();
    let watcher = spawn_ctrl_c_watcher(cancel.clone());

    let pipeline = SummaryPipeline::new(provider, config).with_progress(Box::new(log_stage));
    let result = pipeline.run(&utterances, &title, &cancel).await;
    watcher.abort();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Error during call summary of {}: {:?}", meeting, e);
            anyhow::bail!("Error during call summary of {}", meeting);
        }
    };

    match note {
        Some(path) => {
            insert_into_note(&path, &summary, InsertPosition::from_line(line))?;
            println!("Summary of {} written to {}", meeting, path.display());
        }
        None => print!("{}", summary),
    }

    Ok(())
}

fn spawn_ctrl_c_watcher(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current model call");
            cancel.cancel();
        }
    })
}

fn log_stage(stage: PipelineStage) {
    match stage {
        PipelineStage::Normalizing => tracing::debug!("Merging speaker turns"),
        PipelineStage::Summarizing { done, total } if done == 0 => {
            tracing::info!("Summarizing {} sections of the transcript", total)
        }
        PipelineStage::Summarizing { done, total } => {
            tracing::debug!("Finished section {}/{}", done, total)
        }
        PipelineStage::Aggregating => tracing::info!("Summarizing the full transcript"),
        PipelineStage::Formatting => tracing::debug!("Formatting summary"),
    }
}

/// Print the turns that survive merging and filtering.
pub fn show_turns(
    settings: &Settings,
    file: &Path,
    investors: Vec<String>,
    json: bool,
) -> Result<()> {
    let turns = load_turns(settings, file, &investors)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&turns)?);
        return Ok(());
    }

    if turns.is_empty() {
        println!("No relevant turns found");
        return Ok(());
    }

    println!("{:<6} {:<7} {}", "Turn", "Words", "Speaker");
    println!("{}", "-".repeat(40));
    for (i, turn) in turns.iter().enumerate() {
        println!("{:<6} {:<7} {}", i + 1, turn.word_count(), turn.speaker_label);
    }

    Ok(())
}

/// Print how the turns are packed into chunks.
pub fn show_chunks(
    settings: &Settings,
    file: &Path,
    investors: Vec<String>,
    json: bool,
) -> Result<()> {
    let turns = load_turns(settings, file, &investors)?;
    let chunks = build_chunks(&turns, settings.summary.word_budget);

    if json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
        return Ok(());
    }

    if chunks.is_empty() {
        println!("No chunks (transcript has no relevant turns)");
        return Ok(());
    }

    println!(
        "{:<7} {:<7} {:<7} (budget {} words)",
        "Chunk", "Words", "Turns", settings.summary.word_budget
    );
    println!("{}", "-".repeat(40));
    for (i, chunk) in chunks.iter().enumerate() {
        let marker = if chunk.word_count > settings.summary.word_budget {
            " oversized"
        } else {
            ""
        };
        println!(
            "{:<7} {:<7} {:<7}{}",
            i + 1,
            chunk.word_count,
            chunk.turn_count,
            marker
        );
    }

    Ok(())
}

fn load_turns(settings: &Settings, file: &Path, investors: &[String]) -> Result<Vec<Turn>> {
    let utterances: Vec<Utterance> = FileSource::load(file)?;
    let config = settings.pipeline_config(investors);
    let turns = merge_turns(&utterances, &config.investors);
    Ok(filter_relevant(turns, config.min_turn_words))
}

/// Normalize an existing summary file and print it.
pub fn format_file(settings: &Settings, file: &Path, title: &str) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read summary: {}", file.display()))?;
    print!("{}", format_summary(&text, title, &settings.summary.review_tag));
    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = "<set>".to_string();
            }
            if !shown.source.api_key.is_empty() {
                shown.source.api_key = "<set>".to_string();
            }
            println!("{}", toml::to_string_pretty(&shown)?);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
