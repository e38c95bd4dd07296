use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transcript_excerpt::cli::{Cli, Commands, OutputArgs};
use transcript_excerpt::config::Config;
use transcript_excerpt::extract::{self, Extraction};
use transcript_excerpt::transcript::{JsonTranscriptFile, Transcript, TranscriptSource};
use transcript_excerpt::{output, utils, ExtractError};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for the report
    let default_filter = if cli.verbose {
        "transcript_excerpt=debug"
    } else {
        "transcript_excerpt=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Timestamp {
            transcript,
            start,
            end,
            output,
        } => {
            let transcript = load_transcript(&transcript, cli.quiet).await?;
            let padding = output.padding.unwrap_or(config.extract.default_padding);

            tracing::info!("Extracting {} - {} with {}s padding", start, end, padding);

            let extraction = extract::by_timestamp_str(&transcript, &start, &end, padding);
            emit(extraction, &output, &config).await?;
        }
        Commands::Context {
            transcript,
            query,
            output,
        } => {
            let transcript = load_transcript(&transcript, cli.quiet).await?;
            let padding = output.padding.unwrap_or(config.extract.default_padding);

            tracing::info!("Searching for {:?} with {}s padding", query, padding);

            let extraction = extract::by_context(&transcript, &query, padding);
            emit(extraction, &output, &config).await?;
        }
        Commands::Config { show, init } => {
            if init {
                let path = Config::default().save().await?;
                println!("Default configuration written to: {}", path.display());
            } else if show {
                config.display();
            } else {
                println!("Configuration file: {}", Config::config_path()?.display());
                println!("Use --show to print it or --init to write the defaults");
            }
        }
    }

    Ok(())
}

async fn load_transcript(path: &Path, quiet: bool) -> Result<Transcript> {
    let source = JsonTranscriptFile::new(path);

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")?,
    );
    progress.set_message(format!("Loading transcript {}...", source.describe()));
    progress.enable_steady_tick(Duration::from_millis(100));

    let result = source.load().await;
    progress.finish_and_clear();

    let transcript = result?;
    if let Some(last) = transcript.segments.last() {
        tracing::debug!("Transcript ends at {}", utils::format_clock(last.end));
    }

    Ok(transcript)
}

/// Print or save an extraction; search misses are reported as the result
async fn emit(
    extraction: std::result::Result<Extraction<'_>, ExtractError>,
    args: &OutputArgs,
    config: &Config,
) -> Result<()> {
    let extraction = match extraction {
        Ok(extraction) => extraction,
        Err(err @ (ExtractError::NotFound(_) | ExtractError::LocationAmbiguous)) => {
            tracing::warn!("{}", err);
            println!("{}", err);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        "Selected {} segments ({} - {})",
        extraction.rows.len(),
        utils::format_clock(extraction.window.start),
        utils::format_clock(extraction.window.end)
    );

    let content = output::format_extraction(&extraction, &args.format, &config.render_options())?;

    match &args.output {
        Some(path) => {
            output::save_to_file(&content, path).await?;
            eprintln!("{} {}", style("Extract saved to:").green(), path.display());
        }
        None => output::print_to_console(&content),
    }

    if args.save {
        let path = output::save_with_generated_name(&content, &config.save_dir()?, &args.format).await?;
        eprintln!("{} {}", style("Saved to:").green(), path.display());
    }

    Ok(())
}
