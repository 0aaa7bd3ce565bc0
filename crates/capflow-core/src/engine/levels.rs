//! Caption Level Assigner
//!
//! Greedy interval scheduling of caption states onto a fixed small number of
//! vertical display levels. Captions on the same level must not overlap in
//! time; a state that fits no level is marked `skip` rather than rendered on
//! top of another.

use serde::{Deserialize, Serialize};

use crate::types::TimeSec;

use super::states::CaptionState;

/// Assigns display levels to pre-sorted caption states, in place.
///
/// `states` must be sorted by `(on, source_index)` ascending — the builder's
/// output order. Each level tracks only the `off` time of the last state it
/// accepted; because states arrive in ascending `on` order, acceptance order
/// equals temporal order within a level, so one scalar suffices.
///
/// Levels are tried in increasing order (first-fit), which deterministically
/// favors the primary display position and spills to secondary positions only
/// under genuine overlap. With `level_count == 1` this degenerates to "skip
/// anything that overlaps the previous accepted state", the correct behavior
/// for single-line caption styles.
///
/// Skipping is not an error: it is the designed response to more simultaneous
/// captions than available levels. Skipped states stay in the list for
/// statistics and must never be rendered.
pub fn assign_levels(states: &mut [CaptionState], level_count: usize) {
    let mut last_off: Vec<Option<TimeSec>> = vec![None; level_count];

    for state in states.iter_mut() {
        let slot = last_off
            .iter()
            .position(|off| off.map_or(true, |off| off <= state.on_sec));

        match slot {
            Some(level) => {
                state.level = Some(level);
                state.skip = false;
                last_off[level] = Some(state.off_sec);
            }
            None => {
                state.level = None;
                state.skip = true;
            }
        }
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Summary of a level-assignment pass, for logging and CLI output
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelStats {
    /// Total number of states, including skipped ones
    pub total: usize,
    /// States that received a level
    pub visible: usize,
    /// States that lost arbitration
    pub skipped: usize,
    /// Visible states per level, indexed by level
    pub per_level: Vec<usize>,
}

impl LevelStats {
    /// Computes statistics over an assigned state list
    pub fn from_states(states: &[CaptionState], level_count: usize) -> Self {
        let mut per_level = vec![0usize; level_count];
        let mut visible = 0;
        let mut skipped = 0;

        for state in states {
            if state.skip {
                skipped += 1;
            } else {
                visible += 1;
                if let Some(level) = state.level {
                    if level < level_count {
                        per_level[level] += 1;
                    }
                }
            }
        }

        Self {
            total: states.len(),
            visible,
            skipped,
            per_level,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
