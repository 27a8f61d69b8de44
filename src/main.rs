//! callnotes - Structured summaries of investor/founder calls
//!
//! Entry point for the callnotes CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use callnotes::cli::{commands, completions, Cli, Commands};
use callnotes::config::Settings;

fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        completions::print(shell);
        return Ok(());
    }

    // Load configuration only for runtime commands.
    let settings = Settings::load()?;
    init_logging(if cli.verbose {
        "debug"
    } else {
        settings.general.log_level.as_str()
    });

    match cli.command {
        Commands::Summarize {
            meeting,
            title,
            transcript,
            investors,
            note,
            line,
        } => {
            commands::summarize_call(&settings, &meeting, title, transcript, investors, note, line)
                .await?;
        }
        Commands::Turns {
            file,
            investors,
            json,
        } => {
            commands::show_turns(&settings, &file, investors, json)?;
        }
        Commands::Chunks {
            file,
            investors,
            json,
        } => {
            commands::show_chunks(&settings, &file, investors, json)?;
        }
        Commands::Format { file, title } => {
            commands::format_file(&settings, &file, &title)?;
        }
        Commands::Config(config_cmd) => {
            commands::config_command(&settings, config_cmd)?;
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
