//! FFmpeg Filter Script Adapter
//!
//! Builds a single-line ffmpeg filtergraph that draws the caption states over
//! the input video: a `format` normalization, a background caption band, and
//! one time-gated `drawtext` per visible state. The script is meant for
//! `ffmpeg -filter_complex_script` (or `-filter_complex` with the content
//! inlined); this crate never invokes ffmpeg itself.

use crate::engine::CaptionState;
use crate::text::wrap_text;

use super::{level_y_offset, RenderOptions};

fn escape_filter_value(raw: &str) -> String {
    // FFmpeg filtergraphs treat `:` and `,` as separators and `\` as an
    // escape character; `[`, `]`, `;` and `=` delimit labels and options.
    raw.replace('\\', r"\\")
        .replace(':', r"\:")
        .replace(',', r"\,")
        .replace('[', r"\[")
        .replace(']', r"\]")
        .replace('=', r"\=")
        .replace('#', r"\#")
        .replace(';', r"\;")
        .replace('\'', r"\'")
}

fn escape_drawtext_value(raw: &str) -> String {
    // drawtext expands `%{...}` expressions; caption text must stay literal.
    escape_filter_value(raw).replace('%', r"\%").replace('\n', r"\n")
}

/// Builds the complete filtergraph for a list of leveled caption states.
///
/// Skipped states are omitted. Times are formatted with three decimal digits;
/// identical inputs produce byte-identical scripts.
pub fn build_filter_script(states: &[CaptionState], options: &RenderOptions) -> String {
    // No space between the input label and the first filter.
    let mut parts = vec!["[0:v]format=yuv420p".to_string()];

    // Background band behind both caption levels.
    parts.push("drawbox=x=0:y=h-340:w=iw:h=320:color=black@0.65:t=fill".to_string());

    for state in states {
        if state.skip {
            continue;
        }

        // drawtext renders a single line; wrap then collapse the breaks so
        // the band height stays predictable.
        let wrapped = wrap_text(&state.text, options.wrap_width).replace('\n', " ");
        let escaped = escape_drawtext_value(&wrapped);
        let y_offset = level_y_offset(state.level.unwrap_or(0));

        parts.push(format!(
            "drawtext=fontfile='{}':text='{}':enable='between(t,{:.3},{:.3})':\
             x=(w-tw)/2:y=h-{}:fontsize={}:fontcolor=white:\
             box=1:boxcolor=black@0.6:boxborderw=20",
            options.font_file, escaped, state.on_sec, state.off_sec, y_offset, options.font_size
        ));
    }

    // Output label is separated from the chain by a space.
    format!("{} [v]", parts.join(","))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaptionConfig;
    use crate::engine::generate;
    use crate::subtitles::Segment;

    fn sample_states() -> Vec<CaptionState> {
        let segments = vec![Segment::new(0.0, 2.535, "Hello wonderful world", 0)];
        generate(&segments, &CaptionConfig::sliding_window()).unwrap()
    }

    #[test]
    fn test_escape_filter_value() {
        assert_eq!(escape_filter_value("a:b"), r"a\:b");
        assert_eq!(escape_filter_value("a,b"), r"a\,b");
        assert_eq!(escape_filter_value(r"C:\path"), r"C\:\\path");
        assert_eq!(escape_filter_value("it's"), r"it\'s");
    }

    #[test]
    fn test_escape_drawtext_value() {
        assert_eq!(escape_drawtext_value("100% done"), r"100\% done");
        assert_eq!(escape_drawtext_value("a\nb"), r"a\nb");
        assert_eq!(escape_drawtext_value("x=[1;2]"), r"x\=\[1\;2\]");
    }

    #[test]
    fn test_script_structure() {
        let script = build_filter_script(&sample_states(), &RenderOptions::default());

        assert!(script.starts_with("[0:v]format=yuv420p,"));
        assert!(script.contains("drawbox=x=0:y=h-340"));
        assert!(script.ends_with(" [v]"));
        assert!(!script.contains('\n'));
    }

    #[test]
    fn test_one_drawtext_per_visible_state() {
        let states = sample_states();
        let visible = states.iter().filter(|s| !s.skip).count();

        let script = build_filter_script(&states, &RenderOptions::default());
        assert_eq!(script.matches("drawtext=").count(), visible);
    }

    #[test]
    fn test_skipped_states_are_omitted() {
        let mut states = sample_states();
        let visible_before = states.iter().filter(|s| !s.skip).count();
        states[0].skip = true;

        let script = build_filter_script(&states, &RenderOptions::default());
        assert_eq!(script.matches("drawtext=").count(), visible_before - 1);
    }

    #[test]
    fn test_enable_window_millisecond_precision() {
        let segments = vec![Segment::new(0.0, 1.0, "Hi", 0)];
        let states = generate(&segments, &CaptionConfig::fixed_cycle()).unwrap();

        let script = build_filter_script(&states, &RenderOptions::default());
        assert!(script.contains("enable='between(t,0.000,1.000)'"));
    }

    #[test]
    fn test_levels_map_to_offsets() {
        let segments = vec![
            Segment::new(0.0, 2.0, "primary level line", 0),
            Segment::new(1.0, 3.0, "secondary level line", 1),
        ];
        let states = generate(&segments, &CaptionConfig::sliding_window()).unwrap();

        let script = build_filter_script(&states, &RenderOptions::default());
        assert!(script.contains("y=h-260"));
        assert!(script.contains("y=h-320"));
    }

    #[test]
    fn test_script_is_deterministic() {
        let states = sample_states();
        let options = RenderOptions::default();
        assert_eq!(
            build_filter_script(&states, &options),
            build_filter_script(&states, &options)
        );
    }
}
