//! Map a free-text query onto a time window of the transcript.
//!
//! Offsets are counted in `char`s. The match position is taken in the transcript's
//! full text while the running count sums the lengths of segment texts, so a full
//! text with extra separators can drift the boundaries by a segment. Only the first
//! occurrence of the query is ever located.

use std::ops::Range;

use super::TimeWindow;
use crate::transcript::{Segment, Transcript};
use crate::ExtractError;

/// Resolve `query` to a padded time window around its first occurrence
pub fn locate(transcript: &Transcript, query: &str, padding: f64) -> Result<TimeWindow, ExtractError> {
    let matched = find_first(&transcript.full_text, query)
        .ok_or_else(|| ExtractError::NotFound(query.to_string()))?;

    let (first, last) = boundary_segments(&transcript.segments, matched.start, matched.end)
        .ok_or(ExtractError::LocationAmbiguous)?;

    tracing::debug!(
        "Query {:?} at char {} maps to segments {}..={}",
        query, matched.start, first, last
    );

    let window = TimeWindow::new(transcript.segments[first].start, transcript.segments[last].end);
    Ok(window.padded(padding))
}

/// Find the segment indices bracketing the char range `[match_start, match_end]`
///
/// Each boundary is widened by one segment for natural context.
fn boundary_segments(segments: &[Segment], match_start: usize, match_end: usize) -> Option<(usize, usize)> {
    let mut char_count = 0;
    let mut first = None;

    for (idx, segment) in segments.iter().enumerate() {
        char_count += segment.char_len();

        if first.is_none() && char_count >= match_start {
            first = Some(idx.saturating_sub(1));
        }

        if char_count >= match_end {
            let last = (idx + 1).min(segments.len() - 1);
            return first.map(|first| (first, last));
        }
    }

    None
}

/// Case-insensitive search for the leftmost occurrence of `needle`
///
/// Returns the matched range in chars of `haystack`. An empty or blank needle never matches.
pub fn find_first(haystack: &str, needle: &str) -> Option<Range<usize>> {
    find_all(haystack, needle).into_iter().next()
}

/// Case-insensitive search for every non-overlapping occurrence of `needle`
///
/// Ranges are in chars of `haystack`, left to right. A match must cover whole source
/// chars, so a needle never matches half of a char that lowercases to several.
pub fn find_all(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.iter().all(|c| c.is_whitespace()) {
        return Vec::new();
    }

    // Lowercasing can expand a char, so keep the source index of every folded char
    let folded: Vec<(usize, char)> = haystack
        .chars()
        .enumerate()
        .flat_map(|(idx, c)| c.to_lowercase().map(move |lower| (idx, lower)))
        .collect();

    let starts_char = |pos: usize| pos == 0 || folded[pos - 1].0 != folded[pos].0;
    let ends_char = |end: usize| end == folded.len() || folded[end].0 != folded[end - 1].0;

    let mut matches: Vec<Range<usize>> = Vec::new();
    let mut pos = 0;

    while pos + needle.len() <= folded.len() {
        let end = pos + needle.len();
        let window = &folded[pos..end];
        let source = window[0].0..window[needle.len() - 1].0 + 1;
        let after_previous = matches.last().map_or(true, |prev| source.start >= prev.end);

        if after_previous
            && starts_char(pos)
            && ends_char(end)
            && window.iter().map(|(_, c)| c).eq(needle.iter())
        {
            matches.push(source);
            pos = end;
        } else {
            pos += 1;
        }
    }

    matches
}
