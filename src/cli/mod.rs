use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "excerpt",
    about = "Transcript Excerpt - Pull padded, highlighted excerpts out of time-coded transcripts",
    version,
    long_about = "A CLI tool for extracting readable sections of a podcast transcript, either by an explicit time range or by searching for a quote or topic. Works on Whisper-style JSON transcripts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to ./config.yaml, then the user config directory)
    #[arg(long, global = true, value_name = "FILE", env = "EXCERPT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the section between two timestamps
    Timestamp {
        /// Transcript JSON file
        #[arg(value_name = "TRANSCRIPT")]
        transcript: PathBuf,

        /// Start time (MM:SS or HH:MM:SS)
        #[arg(short, long, value_name = "TIME")]
        start: String,

        /// End time (MM:SS or HH:MM:SS)
        #[arg(short, long, value_name = "TIME")]
        end: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Extract the section around the first occurrence of a quote or topic
    Context {
        /// Transcript JSON file
        #[arg(value_name = "TRANSCRIPT")]
        transcript: PathBuf,

        /// Text to search for (case-insensitive)
        #[arg(value_name = "QUERY")]
        query: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show or initialize the configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,

        /// Write the default configuration to the user config directory
        #[arg(long)]
        init: bool,
    },
}

/// Options shared by the extraction commands
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Seconds of context before and after (defaults to the configured padding, 30)
    #[arg(short, long, value_name = "SECONDS")]
    pub padding: Option<u32>,

    /// Output file path (prints to console if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also save the excerpt under a generated, timestamped filename
    #[arg(long)]
    pub save: bool,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    /// Fixed-width text report
    Text,
    /// JSON with the selected segments
    Json,
}

impl OutputFormat {
    /// File extension used for generated filenames
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
