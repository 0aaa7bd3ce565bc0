//! Caption State Builder
//!
//! Turns segments and their synthesized word timings into caption display
//! states according to the configured display mode:
//!
//! - **Fixed-size cycling** groups words into sequential captions whose size
//!   follows a timing-sensitive rule (fast speech shrinks groups; normal
//!   speech cycles by word position).
//! - **Sliding window** emits one state per word showing the trailing window
//!   of recent words; neighboring states overlap by design and the overlap is
//!   resolved later by the level assigner, not suppressed here.
//!
//! All emitted times are relative to the configured clip start. Segments that
//! tokenize to zero words, or whose clip-clamped interval collapses to zero
//! or negative duration, are silently skipped.

use serde::{Deserialize, Serialize};

use crate::config::{CaptionConfig, CaptionMode};
use crate::subtitles::Segment;
use crate::types::TimeSec;

use super::timing::{synthesize_word_times, WordInterval};

// =============================================================================
// Caption State
// =============================================================================

/// One on-screen display event with fixed text, start, and end time.
///
/// Created by the state builder; only the level assigner mutates `level` and
/// `skip`. Skipped states are retained for statistics and must never be
/// rendered — downstream consumers filter on `skip`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionState {
    /// Display text (unwrapped; renderer adapters apply line wrapping)
    pub text: String,
    /// Appearance time, clip-relative seconds
    pub on_sec: TimeSec,
    /// Disappearance time, clip-relative seconds; always greater than `on_sec`
    pub off_sec: TimeSec,
    /// Index of the segment this state was built from
    pub source_index: usize,
    /// Vertical display level, `None` until level assignment runs
    pub level: Option<usize>,
    /// Whether this state lost level arbitration and must not be rendered
    pub skip: bool,
}

impl CaptionState {
    fn new(text: String, on_sec: TimeSec, off_sec: TimeSec, source_index: usize) -> Self {
        Self {
            text,
            on_sec,
            off_sec,
            source_index,
            level: None,
            skip: false,
        }
    }

    /// On-screen duration in seconds
    pub fn duration(&self) -> TimeSec {
        self.off_sec - self.on_sec
    }
}

// =============================================================================
// State Construction
// =============================================================================

/// Builds caption states for all segments and sorts them globally by
/// `(on, source_index)` ascending.
///
/// The ordering is an explicit precondition of the level assigner's greedy
/// scheduling and uses `f64::total_cmp`, so identical inputs always produce
/// an identical ordering.
pub fn build_states(segments: &[Segment], config: &CaptionConfig) -> Vec<CaptionState> {
    let clip_start = config.clip_start_sec;
    let clip_len = config
        .clip_end_sec
        .map_or(TimeSec::INFINITY, |end| end - clip_start);
    let word_floor = config.word_floor_sec();

    let mut states = Vec::new();

    for segment in segments {
        // Adjust to the clip-relative timeline.
        let adj_start = (segment.start_sec - clip_start).max(0.0);
        let adj_end = (segment.end_sec - clip_start).min(clip_len);
        if adj_end <= adj_start {
            continue;
        }

        let words = segment.words();
        if words.is_empty() {
            continue;
        }

        let word_times = synthesize_word_times(adj_start, adj_end, words.len(), word_floor);

        match &config.mode {
            CaptionMode::FixedCycle {
                min_words,
                max_words,
            } => build_fixed_cycle(
                &mut states,
                segment.index,
                &words,
                &word_times,
                adj_end - adj_start,
                config.min_visibility_sec(),
                *min_words,
                *max_words,
            ),
            CaptionMode::SlidingWindow {
                lead_in_ms,
                overlap_ms,
                max_words,
            } => build_sliding_window(
                &mut states,
                segment.index,
                &words,
                &word_times,
                adj_end,
                clip_len,
                config.min_visibility_sec(),
                *lead_in_ms as TimeSec / 1000.0,
                *overlap_ms as TimeSec / 1000.0,
                *max_words,
            ),
        }
    }

    states.sort_by(|a, b| {
        a.on_sec
            .total_cmp(&b.on_sec)
            .then(a.source_index.cmp(&b.source_index))
    });
    states
}

// -----------------------------------------------------------------------------
// Fixed-Size Cycling
// -----------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn build_fixed_cycle(
    states: &mut Vec<CaptionState>,
    source_index: usize,
    words: &[&str],
    word_times: &[WordInterval],
    seg_duration: TimeSec,
    min_visibility: TimeSec,
    min_words: usize,
    max_words: usize,
) {
    let avg_sec_per_word = seg_duration / words.len() as TimeSec;

    let mut i = 0;
    while i < words.len() {
        let remaining = words.len() - i;
        let count = cycle_group_size(
            i,
            remaining,
            avg_sec_per_word,
            min_visibility,
            min_words,
            max_words,
        );

        let text = words[i..i + count].join(" ");
        let on = word_times[i].start_sec;
        let mut off = word_times[i + count - 1].end_sec;
        if off - on < min_visibility {
            off = on + min_visibility;
        }

        states.push(CaptionState::new(text, on, off, source_index));
        i += count;
    }
}

/// Chooses the group size for the group starting at word index `word_index`.
///
/// Speed checks run first: fast speech forces 1- or 2-word groups so every
/// caption still meets the visibility floor. Both comparisons are strict, so
/// a segment sitting exactly on a threshold falls through to the next rule.
/// Normal speech cycles the size by word position (`min_words + index % 3`),
/// capped by `max_words` and by the words remaining in the segment.
fn cycle_group_size(
    word_index: usize,
    remaining: usize,
    avg_sec_per_word: TimeSec,
    min_visibility: TimeSec,
    min_words: usize,
    max_words: usize,
) -> usize {
    if avg_sec_per_word < min_visibility / 2.0 {
        return remaining.min(1);
    }
    if avg_sec_per_word < min_visibility {
        return remaining.min(2);
    }

    let mut count = min_words + word_index % 3;
    count = count.min(max_words).min(remaining);
    if count < min_words && remaining >= min_words {
        count = min_words;
    }
    count
}

// -----------------------------------------------------------------------------
// Sliding Window
// -----------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn build_sliding_window(
    states: &mut Vec<CaptionState>,
    source_index: usize,
    words: &[&str],
    word_times: &[WordInterval],
    adj_end: TimeSec,
    clip_len: TimeSec,
    min_visibility: TimeSec,
    lead_in: TimeSec,
    overlap: TimeSec,
    max_words: usize,
) {
    for i in 0..words.len() {
        let window_start = i.saturating_sub(max_words.saturating_sub(1));
        let text = words[window_start..=i].join(" ");

        let on = (word_times[i].start_sec - lead_in).max(0.0);

        let mut off = if i + 1 < words.len() {
            word_times[i + 1].start_sec - overlap
        } else {
            adj_end
        };
        off = off.min(clip_len);
        off = off.max(on + min_visibility);

        states.push(CaptionState::new(text, on, off, source_index));
    }
}

// =============================================================================
// Tests
// =============================================================================
