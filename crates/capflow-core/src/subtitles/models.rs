//! Subtitle Segment Model
//!
//! Defines the segment structure produced by the format parsers and consumed
//! by the caption engine.

use serde::{Deserialize, Serialize};

use crate::types::{TimeRange, TimeSec};

/// A timed block of subtitle text from the source transcript.
///
/// Segments are immutable inputs to the caption engine: `index` records the
/// original order and is used as the sort tie-break for generated caption
/// states; it never changes after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Start time in seconds on the source timeline
    pub start_sec: TimeSec,
    /// End time in seconds on the source timeline
    pub end_sec: TimeSec,
    /// Subtitle text (may contain line breaks)
    pub text: String,
    /// Original segment index, stable sort tie-break
    pub index: usize,
}

impl Segment {
    /// Creates a new segment
    pub fn new(start_sec: TimeSec, end_sec: TimeSec, text: &str, index: usize) -> Self {
        Self {
            start_sec,
            end_sec,
            text: text.to_string(),
            index,
        }
    }

    /// Returns the duration of this segment in seconds
    pub fn duration(&self) -> TimeSec {
        self.end_sec - self.start_sec
    }

    /// Returns the segment's time range
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_sec, self.end_sec)
    }

    /// Returns true if this segment overlaps another in time
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.range().overlaps(&other.range())
    }

    /// Splits the text into whitespace-separated words, punctuation attached
    pub fn words(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
