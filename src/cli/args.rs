//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// callnotes - Structured summaries of investor/founder calls
#[derive(Parser, Debug)]
#[command(name = "callnotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a call transcript into a structured note
    Summarize {
        /// Meeting name as it appears in the recording service
        meeting: String,

        /// Title for the summary heading (defaults to the meeting name)
        #[arg(short, long)]
        title: Option<String>,

        /// Read the transcript from a local JSON file instead of the source
        #[arg(long, value_name = "FILE")]
        transcript: Option<PathBuf>,

        /// Additional investor name (repeatable)
        #[arg(short, long = "investor", value_name = "NAME")]
        investors: Vec<String>,

        /// Insert the summary into this markdown note instead of printing it
        #[arg(short, long, value_name = "PATH")]
        note: Option<PathBuf>,

        /// Insert before this 1-based line of the note (default: append)
        #[arg(short, long, requires = "note")]
        line: Option<usize>,
    },

    /// Show the merged, filtered turns of a local transcript
    Turns {
        /// Transcript JSON file
        file: PathBuf,

        /// Additional investor name (repeatable)
        #[arg(short, long = "investor", value_name = "NAME")]
        investors: Vec<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a local transcript is packed into chunks
    Chunks {
        /// Transcript JSON file
        file: PathBuf,

        /// Additional investor name (repeatable)
        #[arg(short, long = "investor", value_name = "NAME")]
        investors: Vec<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize the headings of an existing summary
    Format {
        /// Summary text file
        file: PathBuf,

        /// Title for the summary heading
        #[arg(short, long)]
        title: String,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
