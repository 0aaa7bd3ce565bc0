//! Capflow Core Type Definitions
//!
//! Defines fundamental types shared across the caption engine.

use serde::{Deserialize, Serialize};
use tracing::warn;

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

/// Time range
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_sec: TimeSec,
    pub end_sec: TimeSec,
}

impl TimeRange {
    pub fn new(start_sec: TimeSec, end_sec: TimeSec) -> Self {
        if start_sec > end_sec {
            warn!(
                "TimeRange created with start > end ({} > {}), swapping",
                start_sec, end_sec
            );
            return Self {
                start_sec: end_sec,
                end_sec: start_sec,
            };
        }
        Self { start_sec, end_sec }
    }

    /// Returns duration in seconds
    pub fn duration(&self) -> TimeSec {
        self.end_sec - self.start_sec
    }

    /// Checks if a given time is within range
    pub fn contains(&self, time: TimeSec) -> bool {
        time >= self.start_sec && time <= self.end_sec
    }

    /// Checks if two ranges overlap
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start_sec < other.end_sec && self.end_sec > other.start_sec
    }
}

// =============================================================================
// Spatial Types
// =============================================================================

/// 2D size in pixels
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size2D {
    pub width: u32,
    pub height: u32,
}

impl Size2D {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_duration() {
        let range = TimeRange::new(1.5, 4.0);
        assert_eq!(range.duration(), 2.5);
    }

    #[test]
    fn test_time_range_swaps_inverted_bounds() {
        let range = TimeRange::new(5.0, 2.0);
        assert_eq!(range.start_sec, 2.0);
        assert_eq!(range.end_sec, 5.0);
    }

    #[test]
    fn test_time_range_contains() {
        let range = TimeRange::new(1.0, 3.0);
        assert!(range.contains(1.0));
        assert!(range.contains(2.0));
        assert!(range.contains(3.0));
        assert!(!range.contains(3.5));
    }

    #[test]
    fn test_time_range_overlaps() {
        let a = TimeRange::new(0.0, 2.0);
        let b = TimeRange::new(1.5, 3.0);
        let c = TimeRange::new(2.0, 4.0);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // Touching endpoints do not overlap
    }
}
