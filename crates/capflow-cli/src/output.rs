//! Terminal output formatting for caption statistics

use anyhow::Result;
use serde::Serialize;

use capflow_core::engine::{CaptionState, LevelStats};

/// Aggregate timing statistics over the visible states
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingStats {
    /// Sum of visible caption durations, seconds
    pub total_sec: f64,
    /// Average visible caption duration, seconds
    pub avg_sec: f64,
    /// Shortest visible caption, seconds
    pub min_sec: f64,
    /// Longest visible caption, seconds
    pub max_sec: f64,
    /// Share of the captioned span covered by visible captions (0..=1);
    /// overlapping levels can push this above 1
    pub coverage: f64,
}

/// Computes timing statistics; `None` when no state is visible
pub fn timing_stats(states: &[CaptionState]) -> Option<TimingStats> {
    let visible: Vec<&CaptionState> = states.iter().filter(|s| !s.skip).collect();
    if visible.is_empty() {
        return None;
    }

    let total_sec: f64 = visible.iter().map(|s| s.duration()).sum();
    let min_sec = visible
        .iter()
        .map(|s| s.duration())
        .fold(f64::INFINITY, f64::min);
    let max_sec = visible
        .iter()
        .map(|s| s.duration())
        .fold(f64::NEG_INFINITY, f64::max);
    let span = visible
        .iter()
        .map(|s| s.off_sec)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(TimingStats {
        total_sec,
        avg_sec: total_sec / visible.len() as f64,
        min_sec,
        max_sec,
        coverage: if span > 0.0 { total_sec / span } else { 0.0 },
    })
}

/// Prints the first `limit` visible states, one line each
pub fn print_states(states: &[CaptionState], limit: usize) {
    let visible: Vec<&CaptionState> = states.iter().filter(|s| !s.skip).collect();

    for (i, state) in visible.iter().take(limit).enumerate() {
        println!(
            "  {:>3}. '{}' | {:.3}s - {:.3}s | level {}",
            i + 1,
            state.text,
            state.on_sec,
            state.off_sec,
            state.level.unwrap_or(0)
        );
    }
    if visible.len() > limit {
        println!("  ... and {} more", visible.len() - limit);
    }
}

/// Prints level and timing summaries
pub fn print_summary(states: &[CaptionState], level_count: usize) {
    let stats = LevelStats::from_states(states, level_count);

    println!(
        "\n{} states: {} visible, {} skipped",
        stats.total, stats.visible, stats.skipped
    );
    for (level, count) in stats.per_level.iter().enumerate() {
        println!("  level {}: {} states", level, count);
    }

    if let Some(timing) = timing_stats(states) {
        println!(
            "  caption time {:.3}s (avg {:.3}s, range {:.3}s - {:.3}s, coverage {:.1}%)",
            timing.total_sec,
            timing.avg_sec,
            timing.min_sec,
            timing.max_sec,
            timing.coverage * 100.0
        );
    }
}

/// Serializes level and timing statistics as one JSON object
pub fn stats_json(states: &[CaptionState], level_count: usize) -> Result<String> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Combined {
        levels: LevelStats,
        #[serde(skip_serializing_if = "Option::is_none")]
        timing: Option<TimingStats>,
    }

    let combined = Combined {
        levels: LevelStats::from_states(states, level_count),
        timing: timing_stats(states),
    };
    Ok(serde_json::to_string_pretty(&combined)?)
}

// =============================================================================
// Tests
// =============================================================================
