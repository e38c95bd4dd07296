//! Transcript Excerpt - A Rust CLI tool for pulling readable excerpts out of podcast transcripts
//!
//! This library takes an already-transcribed, time-coded transcript and extracts a padded
//! window of segments either by explicit time range or by free-text search, then renders
//! the result as a fixed-width report with target markers or match highlighting.

pub mod cli;
pub mod config;
pub mod extract;
pub mod output;
pub mod transcript;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use extract::{Extraction, ExtractMode, ExtractRow, TimeWindow, DEFAULT_PADDING};
pub use output::report::{render, RenderOptions};
pub use transcript::{JsonTranscriptFile, Segment, Transcript, TranscriptSource};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types produced by the extraction core
///
/// Every variant is an expected outcome of user input, so callers decide whether to
/// re-prompt, log or abort. Extraction is deterministic; retrying the same input
/// yields the same error.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("Invalid timestamp format: {0}")]
    InvalidFormat(String),

    #[error("Invalid time range: end {end:.1}s is before start {start:.1}s")]
    InvalidRange { start: f64, end: f64 },

    #[error("Context not found in transcript: {0}")]
    NotFound(String),

    #[error("Could not locate context in segments")]
    LocationAmbiguous,
}
