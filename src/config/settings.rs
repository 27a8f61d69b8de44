//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::summary::{InvestorSet, PipelineConfig};

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Language model settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Transcript source settings
    #[serde(default)]
    pub source: SourceSettings,

    /// Investor team settings
    #[serde(default)]
    pub team: TeamSettings,

    /// Summarization pipeline settings
    #[serde(default)]
    pub summary: SummarySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (openai, gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Transcript source (fireflies, file)
    #[serde(default = "default_source_provider")]
    pub provider: String,

    /// API key for the recording service
    #[serde(default)]
    pub api_key: String,

    /// GraphQL endpoint of the recording service
    #[serde(default = "default_source_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_source_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamSettings {
    /// Names of the investors on our side of the call, matched exactly
    #[serde(default)]
    pub investor_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySettings {
    /// Maximum words per transcript chunk
    #[serde(default = "default_word_budget")]
    pub word_budget: usize,

    /// Turns shorter than this are dropped as filler
    #[serde(default = "default_min_turn_words")]
    pub min_turn_words: usize,

    /// Token limit for each per-chunk extraction
    #[serde(default = "default_chunk_max_tokens")]
    pub chunk_max_tokens: u32,

    /// Token limit for the consolidation call
    #[serde(default = "default_reduce_max_tokens")]
    pub reduce_max_tokens: u32,

    /// Sampling temperature for every model call
    #[serde(default)]
    pub temperature: f32,

    /// Tag placed under the title line
    #[serde(default = "default_review_tag")]
    pub review_tag: String,

    /// Number of chunk extractions in flight (1 = sequential)
    #[serde(default = "default_map_concurrency")]
    pub map_concurrency: usize,

    /// Maximum summaries consolidated by a single call
    #[serde(default = "default_reduce_fan_in")]
    pub reduce_fan_in: usize,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_llm_model() -> String {
    "gpt-4-1106-preview".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_source_provider() -> String {
    "fireflies".to_string()
}

fn default_source_endpoint() -> String {
    "https://api.fireflies.ai/graphql".to_string()
}

fn default_source_timeout_secs() -> u64 {
    30
}

fn default_word_budget() -> usize {
    2500
}

fn default_min_turn_words() -> usize {
    12
}

fn default_chunk_max_tokens() -> u32 {
    1024
}

fn default_reduce_max_tokens() -> u32 {
    2048
}

fn default_review_tag() -> String {
    "#review_startup".to_string()
}

fn default_map_concurrency() -> usize {
    1
}

fn default_reduce_fan_in() -> usize {
    8
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            provider: default_source_provider(),
            api_key: String::new(),
            endpoint: default_source_endpoint(),
            timeout_secs: default_source_timeout_secs(),
        }
    }
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            word_budget: default_word_budget(),
            min_turn_words: default_min_turn_words(),
            chunk_max_tokens: default_chunk_max_tokens(),
            reduce_max_tokens: default_reduce_max_tokens(),
            temperature: 0.0,
            review_tag: default_review_tag(),
            map_concurrency: default_map_concurrency(),
            reduce_fan_in: default_reduce_fan_in(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            if let Some(key) = non_empty_env("CALLNOTES_LLM_API_KEY") {
                self.llm.api_key = key;
            }
        }

        if self.source.api_key.trim().is_empty() {
            if let Some(key) = non_empty_env("CALLNOTES_FIREFLIES_API_KEY") {
                self.source.api_key = key;
            }
        }

        if self.team.investor_names.is_empty() {
            if let Some(names) = non_empty_env("CALLNOTES_TEAM_NAMES") {
                self.team.investor_names = parse_team_names(&names);
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "callnotes", "callnotes")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the read-only configuration for one pipeline run.
    ///
    /// `extra_investors` come from the command line and are added to the
    /// configured team.
    pub fn pipeline_config(&self, extra_investors: &[String]) -> PipelineConfig {
        let investors = self
            .team
            .investor_names
            .iter()
            .chain(extra_investors)
            .collect::<InvestorSet>();

        PipelineConfig {
            investors,
            word_budget: self.summary.word_budget,
            min_turn_words: self.summary.min_turn_words,
            chunk_max_tokens: self.summary.chunk_max_tokens,
            reduce_max_tokens: self.summary.reduce_max_tokens,
            temperature: self.summary.temperature,
            review_tag: self.summary.review_tag.clone(),
            map_concurrency: self.summary.map_concurrency.max(1),
            reduce_fan_in: self.summary.reduce_fan_in.max(2),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated list of names, trimming each and dropping empties.
pub fn parse_team_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
