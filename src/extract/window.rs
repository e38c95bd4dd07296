use super::TimeWindow;
use crate::transcript::Segment;

/// Select every segment that overlaps `window`, in transcript order
///
/// Overlap is inclusive at both ends, and a partially covered segment is returned whole.
pub fn select<'a>(segments: &'a [Segment], window: TimeWindow) -> Vec<&'a Segment> {
    let selected: Vec<&Segment> = segments
        .iter()
        .filter(|segment| window.overlaps(segment))
        .collect();

    tracing::debug!(
        "Selected {} of {} segments for window {:.1}s - {:.1}s",
        selected.len(),
        segments.len(),
        window.start,
        window.end
    );

    selected
}
