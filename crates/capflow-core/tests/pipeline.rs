//! End-to-end pipeline tests for Capflow Core
//!
//! Parses real subtitle content and checks the engine's layout guarantees on
//! the final, leveled state lists: non-overlap per level, minimum visibility,
//! skip accounting, and adapter output shape.

use capflow_core::config::{CaptionConfig, CaptionMode};
use capflow_core::engine::{assign_levels, build_states, generate, LevelStats};
use capflow_core::render::{build_filter_script, clip_specs, RenderOptions};
use capflow_core::subtitles::{parse_subtitles, Segment, SubtitleFormat};

const SRT: &str = "\
1
00:00:00,000 --> 00:00:02,535
This room is like a red carpet Hollywood hallway.

2
00:00:02,535 --> 00:00:05,100
And every wall is covered in gold frames.
";

fn assert_layout_invariants(states: &[capflow_core::engine::CaptionState], config: &CaptionConfig) {
    // Minimum visibility for every non-skipped state.
    for state in states.iter().filter(|s| !s.skip) {
        assert!(
            state.duration() >= config.min_visibility_sec() - 1e-9,
            "'{}' visible only {:.3}s",
            state.text,
            state.duration()
        );
    }

    // Non-overlap within each level.
    for level in 0..config.level_count() {
        let mut last_off = f64::NEG_INFINITY;
        for state in states.iter().filter(|s| s.level == Some(level) && !s.skip) {
            assert!(
                last_off <= state.on_sec + 1e-9,
                "level {} overlap at {:.3}",
                level,
                state.on_sec
            );
            last_off = state.off_sec;
        }
    }

    // Global ordering by (on, source_index).
    for pair in states.windows(2) {
        assert!(
            pair[0].on_sec < pair[1].on_sec
                || (pair[0].on_sec == pair[1].on_sec
                    && pair[0].source_index <= pair[1].source_index)
        );
    }
}

// =============================================================================
// Parse → Generate Round Trips
// =============================================================================

#[test]
fn test_srt_to_fixed_cycle_states() {
    let segments = parse_subtitles(SRT, SubtitleFormat::Srt).unwrap();
    assert_eq!(segments.len(), 2);

    let mut config = CaptionConfig::fixed_cycle();
    config.min_visibility_ms = 120;
    let states = generate(&segments, &config).unwrap();

    assert!(!states.is_empty());
    assert_layout_invariants(&states, &config);

    // Sequential groups from back-to-back segments need no second level.
    assert!(states.iter().all(|s| !s.skip));
    assert!(states.iter().all(|s| s.level == Some(0)));

    // Every source word survives grouping.
    let word_total: usize = states.iter().map(|s| s.text.split_whitespace().count()).sum();
    assert_eq!(word_total, 9 + 8);
}

#[test]
fn test_srt_to_sliding_window_states() {
    let segments = parse_subtitles(SRT, SubtitleFormat::Srt).unwrap();
    let config = CaptionConfig::sliding_window();
    let states = generate(&segments, &config).unwrap();

    // One state per word.
    assert_eq!(states.len(), 9 + 8);
    assert_layout_invariants(&states, &config);
}

#[test]
fn test_all_formats_agree_on_segment_timing() {
    let vtt = "\
WEBVTT

0:00:00.000 --> 0:00:02.535
This room is like a red carpet Hollywood hallway.
";
    let ass = "\
[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:00.00,0:00:02.535,Default,,0,0,0,,This room is like a red carpet Hollywood hallway.
";

    let from_vtt = parse_subtitles(vtt, SubtitleFormat::Vtt).unwrap();
    let from_ass = parse_subtitles(ass, SubtitleFormat::Ass).unwrap();

    assert_eq!(from_vtt[0].start_sec, from_ass[0].start_sec);
    assert_eq!(from_vtt[0].end_sec, from_ass[0].end_sec);
    assert_eq!(from_vtt[0].text, from_ass[0].text);

    let config = CaptionConfig::sliding_window();
    assert_eq!(
        generate(&from_vtt, &config).unwrap(),
        generate(&from_ass, &config).unwrap()
    );
}

// =============================================================================
// Level Capacity Scenarios
// =============================================================================

#[test]
fn test_two_overlapping_segments_fill_two_levels() {
    // Fixed-cycle states from one segment are sequential, so two segments
    // overlapping by 0.5s fit two levels without losing anything.
    let segments = vec![
        Segment::new(0.0, 2.0, "first speaker talking here", 0),
        Segment::new(1.5, 3.5, "second speaker talking over", 1),
    ];
    let config = CaptionConfig::fixed_cycle();

    let mut states = build_states(&segments, &config);
    assign_levels(&mut states, 2);

    assert!(states.iter().all(|s| !s.skip));
    assert!(states.iter().any(|s| s.level == Some(1)));
}

#[test]
fn test_three_way_overlap_skips_the_overflow() {
    let mut config = CaptionConfig::fixed_cycle();
    config.min_visibility_ms = 400;
    let segments = vec![
        Segment::new(0.0, 0.3, "one", 0),
        Segment::new(0.1, 0.3, "two", 1),
        Segment::new(0.2, 0.3, "three", 2),
    ];

    let mut states = build_states(&segments, &config);
    assign_levels(&mut states, 2);

    let stats = LevelStats::from_states(&states, 2);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.visible, 2);
    assert_eq!(stats.skipped, 1);

    let skipped = states.iter().find(|s| s.skip).unwrap();
    assert_eq!(skipped.source_index, 2);
}

// =============================================================================
// Adapter Output
// =============================================================================

#[test]
fn test_adapters_render_only_visible_states() {
    let segments = vec![
        Segment::new(0.0, 1.0, "a b c d e f g h", 0),
        Segment::new(0.2, 1.2, "overlapping words everywhere now", 1),
    ];
    let config = CaptionConfig::sliding_window();
    let states = generate(&segments, &config).unwrap();
    let visible = states.iter().filter(|s| !s.skip).count();
    let options = RenderOptions::default();

    let script = build_filter_script(&states, &options);
    assert_eq!(script.matches("drawtext=").count(), visible);

    let specs = clip_specs(&states, &options);
    assert_eq!(specs.len(), visible);
}

#[test]
fn test_full_run_is_byte_deterministic() {
    let segments = parse_subtitles(SRT, SubtitleFormat::Srt).unwrap();
    let config = CaptionConfig {
        min_visibility_ms: 120,
        mode: CaptionMode::SlidingWindow {
            lead_in_ms: 180,
            overlap_ms: 50,
            max_words: 5,
        },
        clip_start_sec: 0.0,
        clip_end_sec: Some(5.1),
    };
    let options = RenderOptions::default();

    let run = || {
        let states = generate(&segments, &config).unwrap();
        build_filter_script(&states, &options)
    };
    assert_eq!(run(), run());
}
