use serde::Serialize;

use crate::transcript::{Segment, Transcript};
use crate::ExtractError;

pub mod locator;
pub mod timestamp;
pub mod window;

pub use locator::locate;
pub use timestamp::parse_timestamp;
pub use window::select;

/// Default seconds of context added around a target window or resolved match
pub const DEFAULT_PADDING: u32 = 30;

/// A contiguous time interval in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Widen the window by `padding` seconds on each side, never starting before zero
    pub fn padded(self, padding: f64) -> Self {
        Self {
            start: (self.start - padding).max(0.0),
            end: self.end + padding,
        }
    }

    /// Inclusive interval overlap with a segment
    pub fn overlaps(&self, segment: &Segment) -> bool {
        segment.end >= self.start && segment.start <= self.end
    }

    /// Whether the segment lies entirely inside the window
    pub fn contains(&self, segment: &Segment) -> bool {
        segment.start >= self.start && segment.end <= self.end
    }

    /// Whether the segment shares time with the window beyond merely touching its edges
    pub fn intersects(&self, segment: &Segment) -> bool {
        self.contains(segment) || (segment.start < self.end && segment.end > self.start)
    }
}

/// How an extraction was produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ExtractMode {
    /// Explicit time range; `target` is the window before padding
    Timestamp { target: TimeWindow },
    /// Free-text search for `query`
    Context { query: String },
}

/// One selected segment and whether it is the focus of the extraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractRow<'a> {
    pub segment: &'a Segment,
    pub highlighted: bool,
}

/// The segments selected for display, plus what is needed to describe them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction<'a> {
    #[serde(flatten)]
    pub mode: ExtractMode,

    /// Padding in seconds applied on each side
    pub padding: u32,

    /// The effective window after padding
    pub window: TimeWindow,

    pub rows: Vec<ExtractRow<'a>>,
}

/// Extract the segments around an explicit time range
///
/// Rows are highlighted when the segment lies within or runs across the unpadded
/// `[start, end]`; segments that only touch its edges are context.
pub fn by_timestamp(
    transcript: &Transcript,
    start: f64,
    end: f64,
    padding: u32,
) -> Result<Extraction<'_>, ExtractError> {
    if end < start {
        return Err(ExtractError::InvalidRange { start, end });
    }

    let target = TimeWindow::new(start, end);
    let window = target.padded(padding as f64);

    let rows = select(&transcript.segments, window)
        .into_iter()
        .map(|segment| ExtractRow {
            segment,
            highlighted: target.intersects(segment),
        })
        .collect();

    Ok(Extraction {
        mode: ExtractMode::Timestamp { target },
        padding,
        window,
        rows,
    })
}

/// Parse `start`/`end` time strings and extract the range between them
pub fn by_timestamp_str<'a>(
    transcript: &'a Transcript,
    start: &str,
    end: &str,
    padding: u32,
) -> Result<Extraction<'a>, ExtractError> {
    by_timestamp(transcript, parse_timestamp(start)?, parse_timestamp(end)?, padding)
}

/// Extract the segments around the first occurrence of `query`
///
/// Rows are highlighted when the segment's own trimmed text contains the query, which
/// is the text the report highlights in.
pub fn by_context<'a>(
    transcript: &'a Transcript,
    query: &str,
    padding: u32,
) -> Result<Extraction<'a>, ExtractError> {
    let window = locate(transcript, query, padding as f64)?;

    let rows = select(&transcript.segments, window)
        .into_iter()
        .map(|segment| ExtractRow {
            segment,
            highlighted: locator::find_first(segment.text.trim(), query).is_some(),
        })
        .collect();

    Ok(Extraction {
        mode: ExtractMode::Context {
            query: query.to_string(),
        },
        padding,
        window,
        rows,
    })
}

impl Extraction<'_> {
    /// Selected segments in transcript order
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.rows.iter().map(|row| row.segment)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
