use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils;

/// Individual transcript segment with timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    #[serde(alias = "start_time")]
    pub start: f64,

    /// End time in seconds
    #[serde(alias = "end_time")]
    pub end: f64,

    /// Segment text, as produced by the transcriber (may carry leading whitespace)
    #[serde(default)]
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Length of the segment text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A time-coded transcript supplied by an external transcriber
///
/// `full_text` is expected to be the concatenation of segment texts, but nothing
/// enforces that; context search works against `full_text` and degrades to an
/// error when it cannot be mapped back onto `segments`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Segments ordered by start time
    #[serde(default)]
    pub segments: Vec<Segment>,

    /// The full transcribed text
    #[serde(rename = "text", alias = "transcript", default)]
    pub full_text: String,
}

impl Transcript {
    pub fn new(segments: Vec<Segment>, full_text: impl Into<String>) -> Self {
        Self {
            segments,
            full_text: full_text.into(),
        }
    }

    /// Build a transcript whose full text is the plain concatenation of segment texts
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let full_text = segments.iter().map(|s| s.text.as_str()).collect();
        Self { segments, full_text }
    }

    /// End time of the last segment, or zero for an empty transcript
    pub fn duration(&self) -> f64 {
        self.segments.iter().map(|s| s.end).fold(0.0, f64::max)
    }

    /// Log segments that break the ordering assumptions
    ///
    /// The extractor tolerates gaps and minor overlaps, so this only warns.
    pub fn check_segments(&self) -> usize {
        let mut issues = 0;

        for (idx, segment) in self.segments.iter().enumerate() {
            if segment.end < segment.start {
                tracing::warn!(
                    "Segment {} ends before it starts ({:.1}s < {:.1}s)",
                    idx, segment.end, segment.start
                );
                issues += 1;
            }
        }

        for (idx, pair) in self.segments.windows(2).enumerate() {
            if pair[1].start < pair[0].start {
                tracing::warn!(
                    "Segment {} starts before segment {} ({:.1}s < {:.1}s)",
                    idx + 1, idx, pair[1].start, pair[0].start
                );
                issues += 1;
            }
        }

        issues
    }
}

/// Anything that can hand the extractor a finished transcript
///
/// Transcription itself (model loading, audio download) lives behind this seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Load the transcript
    async fn load(&self) -> Result<Transcript>;

    /// Human-readable description of where the transcript comes from
    fn describe(&self) -> String;
}

/// Transcript stored as JSON on disk
///
/// Accepts Whisper output (`text` + `segments[].start/end/text`) as well as
/// `transcript` + `segments[].start_time/end_time/text`. Unknown fields are ignored.
pub struct JsonTranscriptFile {
    path: PathBuf,
}

impl JsonTranscriptFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TranscriptSource for JsonTranscriptFile {
    async fn load(&self) -> Result<Transcript> {
        utils::check_file_accessible(&self.path)?;

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read transcript file {}", self.path.display()))?;

        let transcript = parse_json(&content)
            .with_context(|| format!("Failed to parse transcript file {}", self.path.display()))?;

        tracing::info!(
            "Loaded transcript: {} segments, {}",
            transcript.segments.len(),
            utils::format_duration(transcript.duration())
        );

        Ok(transcript)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse a transcript from JSON, rebuilding the full text if it is missing
pub fn parse_json(content: &str) -> Result<Transcript> {
    let mut transcript: Transcript = serde_json::from_str(content)?;

    if transcript.full_text.is_empty() && !transcript.segments.is_empty() {
        tracing::debug!("Transcript has no full text, joining segment texts");
        transcript.full_text = transcript.segments.iter().map(|s| s.text.as_str()).collect();
    }

    let issues = transcript.check_segments();
    if issues > 0 {
        tracing::warn!("Transcript has {} segment ordering issue(s)", issues);
    }

    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const WHISPER_JSON: &str = r#"{
        "text": " Hello world today",
        "segments": [
            {"id": 0, "seek": 0, "start": 0.0, "end": 2.5, "text": " Hello", "tokens": [1, 2]},
            {"id": 1, "seek": 0, "start": 2.5, "end": 4.0, "text": " world", "avg_logprob": -0.2},
            {"id": 2, "seek": 0, "start": 4.0, "end": 6.0, "text": " today"}
        ],
        "language": "en"
    }"#;

    #[test]
    fn test_parse_whisper_json() {
        let transcript = parse_json(WHISPER_JSON).unwrap();
        assert_eq!(transcript.segments.len(), 3);
        assert_eq!(transcript.full_text, " Hello world today");
        assert_eq!(transcript.segments[1], Segment::new(2.5, 4.0, " world"));
        assert_eq!(transcript.duration(), 6.0);
    }

    #[test]
    fn test_parse_aliased_fields() {
        let json = r#"{
            "transcript": "one two",
            "segments": [
                {"start_time": 0.0, "end_time": 1.0, "text": "one ", "confidence": 0.9},
                {"start_time": 1.0, "end_time": 2.0, "text": "two", "speaker_id": null}
            ]
        }"#;
        let transcript = parse_json(json).unwrap();
        assert_eq!(transcript.full_text, "one two");
        assert_eq!(transcript.segments[1].start, 1.0);
    }

    #[test]
    fn test_parse_rebuilds_missing_text() {
        let json = r#"{"segments": [{"start": 0, "end": 1, "text": "a "}, {"start": 1, "end": 2, "text": "b"}]}"#;
        let transcript = parse_json(json).unwrap();
        assert_eq!(transcript.full_text, "a b");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_json("not json").is_err());
        assert!(parse_json(r#"{"segments": [{"text": "no times"}]}"#).is_err());
    }

    #[test]
    fn test_check_segments_counts_issues() {
        let ordered = Transcript::from_segments(vec![
            Segment::new(0.0, 1.0, "a"),
            Segment::new(1.0, 2.0, "b"),
        ]);
        assert_eq!(ordered.check_segments(), 0);

        let broken = Transcript::from_segments(vec![
            Segment::new(5.0, 4.0, "inverted"),
            Segment::new(1.0, 2.0, "early"),
        ]);
        assert_eq!(broken.check_segments(), 2);
    }

    #[test]
    fn test_empty_transcript_duration() {
        assert_eq!(Transcript::default().duration(), 0.0);
    }

    #[tokio::test]
    async fn test_json_file_source_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(WHISPER_JSON.as_bytes()).unwrap();

        let source = JsonTranscriptFile::new(file.path());
        let transcript = source.load().await.unwrap();
        assert_eq!(transcript.segments.len(), 3);
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let source = JsonTranscriptFile::new("/definitely/not/here.json");
        let result = tokio_test::block_on(source.load());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_source() {
        let mut source = MockTranscriptSource::new();
        source
            .expect_load()
            .times(1)
            .returning(|| Ok(Transcript::from_segments(vec![Segment::new(0.0, 1.0, "hi")])));

        let transcript = source.load().await.unwrap();
        assert_eq!(transcript.full_text, "hi");
    }
}
