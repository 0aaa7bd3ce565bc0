//! Caption Engine Module
//!
//! The core of the crate: turns timed subtitle segments into leveled caption
//! display states.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Caption Engine                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  timing.rs     - Synthesized per-word time intervals             │
//! │  states.rs     - Caption state construction (cycle / window)     │
//! │  levels.rs     - Greedy level assignment and statistics          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline is purely synchronous and side-effect-free: every call owns
//! its intermediate structures, so independent inputs may be processed
//! concurrently without coordination.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use capflow_core::config::CaptionConfig;
//! use capflow_core::engine::generate;
//! use capflow_core::subtitles::Segment;
//!
//! let segments = vec![Segment::new(0.0, 2.5, "Hello wonderful world", 0)];
//! let states = generate(&segments, &CaptionConfig::sliding_window())?;
//! for state in states.iter().filter(|s| !s.skip) {
//!     println!("{:.3}-{:.3} [{}] {}", state.on_sec, state.off_sec,
//!              state.level.unwrap_or_default(), state.text);
//! }
//! ```

mod levels;
mod states;
mod timing;

pub use levels::{assign_levels, LevelStats};
pub use states::{build_states, CaptionState};
pub use timing::{synthesize_word_times, WordInterval};

use tracing::debug;

use crate::config::CaptionConfig;
use crate::error::CoreResult;
use crate::subtitles::Segment;

/// Runs the full caption pipeline: validate → build states → assign levels.
///
/// The returned list is ordered by `(on, source_index)` ascending and
/// includes skipped states; renderer adapters filter on `skip`.
pub fn generate(segments: &[Segment], config: &CaptionConfig) -> CoreResult<Vec<CaptionState>> {
    config.validate()?;

    let mut states = build_states(segments, config);
    let level_count = config.level_count();
    assign_levels(&mut states, level_count);

    let stats = LevelStats::from_states(&states, level_count);
    debug!(
        "Generated {} caption states from {} segments ({} visible, {} skipped)",
        stats.total,
        segments.len(),
        stats.visible,
        stats.skipped
    );

    Ok(states)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaptionMode;
    use crate::error::CoreError;

    #[test]
    fn test_generate_rejects_invalid_config() {
        let mut config = CaptionConfig::fixed_cycle();
        config.mode = CaptionMode::FixedCycle {
            min_words: 3,
            max_words: 1,
        };

        let result = generate(&[], &config);
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_generate_empty_input() {
        let states = generate(&[], &CaptionConfig::sliding_window()).unwrap();
        assert!(states.is_empty());
    }

    #[test]
    fn test_generate_assigns_levels() {
        let segments = vec![
            Segment::new(0.0, 2.0, "first overlapping line", 0),
            Segment::new(1.5, 3.5, "second overlapping line", 1),
        ];
        let states = generate(&segments, &CaptionConfig::sliding_window()).unwrap();

        for state in states.iter().filter(|s| !s.skip) {
            assert!(state.level.is_some());
            assert!(state.level.unwrap() < 2);
        }
    }

    #[test]
    fn test_generate_is_byte_deterministic() {
        let segments = vec![
            Segment::new(0.0, 2.535, "This room is like a red carpet Hollywood hallway", 0),
            Segment::new(2.0, 4.0, "spoken over the previous line", 1),
        ];
        let config = CaptionConfig::sliding_window();

        let first = serde_json::to_vec(&generate(&segments, &config).unwrap()).unwrap();
        let second = serde_json::to_vec(&generate(&segments, &config).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
