//! Caption Pipeline Configuration
//!
//! An immutable configuration value passed into every pipeline call.
//! There are no process-wide defaults: callers construct a `CaptionConfig`,
//! optionally adjust it, and hand it to `engine::generate`.
//!
//! Invalid configurations are programmer/config errors, not data errors, so
//! `validate` fails fast with a descriptive `CoreError::ValidationError`
//! instead of silently correcting values.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::TimeSec;

/// Default minimum visibility for fixed-cycle captions (milliseconds)
pub const DEFAULT_FIXED_MIN_VISIBILITY_MS: u32 = 200;

/// Default minimum visibility for sliding-window captions (milliseconds)
pub const DEFAULT_SLIDING_MIN_VISIBILITY_MS: u32 = 120;

/// Default sliding-window lead-in (milliseconds)
pub const DEFAULT_LEAD_IN_MS: u32 = 180;

/// Default sliding-window overlap allowance (milliseconds)
pub const DEFAULT_OVERLAP_MS: u32 = 50;

/// Default fixed-cycle word-count bounds
pub const DEFAULT_CYCLE_MIN_WORDS: usize = 1;
pub const DEFAULT_CYCLE_MAX_WORDS: usize = 3;

/// Default sliding-window width in words
pub const DEFAULT_WINDOW_WORDS: usize = 5;

// =============================================================================
// Display Mode
// =============================================================================

/// Caption display strategy
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum CaptionMode {
    /// Words are grouped into sequential captions of cycling size
    /// (1, 2, 3, 1, 2, 3, ... capped by `max_words`).
    #[serde(rename_all = "camelCase")]
    FixedCycle { min_words: usize, max_words: usize },

    /// The caption shows the trailing `max_words` words as of the current
    /// spoken word, refreshed once per word.
    #[serde(rename_all = "camelCase")]
    SlidingWindow {
        lead_in_ms: u32,
        overlap_ms: u32,
        max_words: usize,
    },
}

impl CaptionMode {
    /// Maximum number of words a single caption may display
    pub fn max_words(&self) -> usize {
        match self {
            Self::FixedCycle { max_words, .. } => *max_words,
            Self::SlidingWindow { max_words, .. } => *max_words,
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for one caption generation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionConfig {
    /// Minimum on-screen time for any caption state (milliseconds)
    pub min_visibility_ms: u32,

    /// Display strategy and its knobs
    pub mode: CaptionMode,

    /// Clip start on the source timeline (seconds); emitted state times are
    /// relative to this point
    pub clip_start_sec: TimeSec,

    /// Clip end on the source timeline (seconds); `None` means unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_end_sec: Option<TimeSec>,
}

impl CaptionConfig {
    /// Fixed-cycle configuration with the stock 1..3-word rhythm
    pub fn fixed_cycle() -> Self {
        Self {
            min_visibility_ms: DEFAULT_FIXED_MIN_VISIBILITY_MS,
            mode: CaptionMode::FixedCycle {
                min_words: DEFAULT_CYCLE_MIN_WORDS,
                max_words: DEFAULT_CYCLE_MAX_WORDS,
            },
            clip_start_sec: 0.0,
            clip_end_sec: None,
        }
    }

    /// Sliding-window configuration with the stock 5-word window
    pub fn sliding_window() -> Self {
        Self {
            min_visibility_ms: DEFAULT_SLIDING_MIN_VISIBILITY_MS,
            mode: CaptionMode::SlidingWindow {
                lead_in_ms: DEFAULT_LEAD_IN_MS,
                overlap_ms: DEFAULT_OVERLAP_MS,
                max_words: DEFAULT_WINDOW_WORDS,
            },
            clip_start_sec: 0.0,
            clip_end_sec: None,
        }
    }

    /// Sets the clip window on the source timeline
    pub fn with_clip_window(mut self, start_sec: TimeSec, end_sec: Option<TimeSec>) -> Self {
        self.clip_start_sec = start_sec;
        self.clip_end_sec = end_sec;
        self
    }

    /// Minimum visibility in seconds
    pub fn min_visibility_sec(&self) -> TimeSec {
        self.min_visibility_ms as TimeSec / 1000.0
    }

    /// Per-word floor for synthesized word timing, in seconds.
    ///
    /// The two strategies weight the visibility floor differently: fixed-cycle
    /// divides it by the maximum group size (a group of `max_words` words must
    /// stay visible for `min_visibility`), while sliding-window applies the
    /// full floor to every word. This asymmetry is intentional; unifying it
    /// would change the on-screen cadence of both modes.
    pub fn word_floor_sec(&self) -> TimeSec {
        match &self.mode {
            CaptionMode::FixedCycle { max_words, .. } => {
                self.min_visibility_sec() / (*max_words).max(1) as TimeSec
            }
            CaptionMode::SlidingWindow { .. } => self.min_visibility_sec(),
        }
    }

    /// Number of vertical display levels this mode schedules onto.
    ///
    /// Fixed-cycle captions are sequential and keep a single band; the
    /// sliding window overlaps its neighbors by design and spills onto a
    /// secondary band.
    pub fn level_count(&self) -> usize {
        match &self.mode {
            CaptionMode::FixedCycle { .. } => 1,
            CaptionMode::SlidingWindow { .. } => 2,
        }
    }

    /// Validates the configuration, failing fast on programmer/config errors
    pub fn validate(&self) -> CoreResult<()> {
        if self.min_visibility_ms == 0 {
            return Err(CoreError::ValidationError(
                "min_visibility_ms must be positive".to_string(),
            ));
        }

        match &self.mode {
            CaptionMode::FixedCycle {
                min_words,
                max_words,
            } => {
                if *min_words == 0 {
                    return Err(CoreError::ValidationError(
                        "min_words must be at least 1".to_string(),
                    ));
                }
                if max_words < min_words {
                    return Err(CoreError::ValidationError(format!(
                        "max_words ({}) must not be less than min_words ({})",
                        max_words, min_words
                    )));
                }
            }
            CaptionMode::SlidingWindow { max_words, .. } => {
                if *max_words == 0 {
                    return Err(CoreError::ValidationError(
                        "max_words must be at least 1".to_string(),
                    ));
                }
            }
        }

        if !self.clip_start_sec.is_finite() || self.clip_start_sec < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "clip_start_sec must be finite and non-negative, got {}",
                self.clip_start_sec
            )));
        }

        if let Some(end) = self.clip_end_sec {
            if !end.is_finite() || end <= self.clip_start_sec {
                return Err(CoreError::ValidationError(format!(
                    "clip_end_sec ({}) must be finite and greater than clip_start_sec ({})",
                    end, self.clip_start_sec
                )));
            }
        }

        Ok(())
    }
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self::sliding_window()
    }
}

// =============================================================================
// Tests
// =============================================================================
