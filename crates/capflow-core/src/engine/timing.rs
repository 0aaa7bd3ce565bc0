//! Word Timing Synthesizer
//!
//! Real word-level timestamps are not assumed available from the subtitle
//! source, so word timing is synthesized: a segment's duration is divided
//! uniformly across its words, with a per-word floor guaranteeing every word
//! a displayable interval even for very short or single-word segments.

use serde::{Deserialize, Serialize};

use crate::types::TimeSec;

/// A synthesized time interval for one spoken word
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordInterval {
    pub start_sec: TimeSec,
    pub end_sec: TimeSec,
}

/// Synthesizes uniform word timings for a segment.
///
/// Each of the `word_count` words receives an equal slot of
/// `max(segment duration, word_count * per_word_floor_sec) / word_count`
/// seconds; interval bounds are clamped into the segment, so the tail of a
/// floor-stretched segment collapses against `seg_end`.
///
/// Intervals are contiguous with non-decreasing starts. The per-word floor is
/// mode-specific; see `CaptionConfig::word_floor_sec`.
pub fn synthesize_word_times(
    seg_start: TimeSec,
    seg_end: TimeSec,
    word_count: usize,
    per_word_floor_sec: TimeSec,
) -> Vec<WordInterval> {
    if word_count == 0 {
        return Vec::new();
    }

    let total = seg_end - seg_start;
    let min_total = word_count as TimeSec * per_word_floor_sec;
    let duration = total.max(min_total);
    let slot = duration / word_count as TimeSec;

    (0..word_count)
        .map(|i| {
            let raw_start = seg_start + i as TimeSec * slot;
            let raw_end = seg_start + (i + 1) as TimeSec * slot;

            WordInterval {
                start_sec: raw_start.clamp(seg_start, seg_end),
                end_sec: raw_end.clamp(seg_start, seg_end),
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produces_exactly_word_count_intervals() {
        let times = synthesize_word_times(0.0, 2.535, 9, 0.04);
        assert_eq!(times.len(), 9);
    }

    #[test]
    fn test_intervals_are_monotonic_and_contiguous() {
        let times = synthesize_word_times(1.0, 4.0, 6, 0.1);

        for pair in times.windows(2) {
            assert!(pair[0].start_sec <= pair[1].start_sec);
            assert!((pair[0].end_sec - pair[1].start_sec).abs() < 1e-9);
        }
    }

    #[test]
    fn test_intervals_clamped_to_segment() {
        // 10 words in 0.2s with a 0.12s floor: the stretched timeline runs
        // past the segment end and must be clamped back.
        let times = synthesize_word_times(0.0, 0.2, 10, 0.12);

        for interval in &times {
            assert!(interval.start_sec >= 0.0);
            assert!(interval.end_sec <= 0.2);
        }
        assert_eq!(times.last().unwrap().end_sec, 0.2);
    }

    #[test]
    fn test_single_word_spans_segment() {
        let times = synthesize_word_times(0.5, 2.0, 1, 0.12);
        assert_eq!(times.len(), 1);
        assert_eq!(times[0].start_sec, 0.5);
        assert_eq!(times[0].end_sec, 2.0);
    }

    #[test]
    fn test_zero_words_yields_empty() {
        assert!(synthesize_word_times(0.0, 1.0, 0, 0.12).is_empty());
    }

    #[test]
    fn test_equal_slot_division() {
        let times = synthesize_word_times(0.0, 3.0, 3, 0.1);
        assert!((times[0].end_sec - 1.0).abs() < 1e-9);
        assert!((times[1].start_sec - 1.0).abs() < 1e-9);
        assert!((times[2].end_sec - 3.0).abs() < 1e-9);
    }
}
