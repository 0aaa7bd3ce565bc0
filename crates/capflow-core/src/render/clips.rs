//! Compositor Text-Clip Adapter
//!
//! Produces positioned, timed text-clip descriptors for compositing tools
//! that build the caption layer themselves (MoviePy-style pipelines). Field
//! names are part of the descriptor contract consumed by downstream scripts,
//! so they stay in snake_case regardless of the crate's usual camelCase
//! serialization.

use serde::{Deserialize, Serialize};

use crate::engine::CaptionState;
use crate::error::CoreResult;
use crate::text::wrap_text;

use super::{level_y_offset, RenderOptions};

/// One text-clip descriptor: everything a compositor needs to place a box
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextClipSpec {
    /// Display text with wrap line breaks preserved
    pub text: String,
    /// Appearance time, clip-relative seconds
    pub start_time: f64,
    /// Disappearance time, clip-relative seconds
    pub end_time: f64,
    /// Horizontal anchor and vertical pixel position from the top edge
    pub position: (String, i64),
    pub font_size: u32,
    pub font_color: String,
    pub font_file: String,
    pub bg_color: String,
    pub bg_opacity: f64,
}

/// Builds text-clip descriptors for all visible states
pub fn clip_specs(states: &[CaptionState], options: &RenderOptions) -> Vec<TextClipSpec> {
    states
        .iter()
        .filter(|state| !state.skip)
        .map(|state| {
            let y_offset = level_y_offset(state.level.unwrap_or(0));

            TextClipSpec {
                text: wrap_text(&state.text, options.wrap_width),
                start_time: state.on_sec,
                end_time: state.off_sec,
                position: (
                    "center".to_string(),
                    options.video_size.height as i64 - y_offset as i64,
                ),
                font_size: options.font_size,
                font_color: "white".to_string(),
                font_file: options.font_file.clone(),
                bg_color: "black".to_string(),
                bg_opacity: 0.6,
            }
        })
        .collect()
}

/// Serializes the descriptors as pretty-printed JSON
pub fn clip_specs_json(states: &[CaptionState], options: &RenderOptions) -> CoreResult<String> {
    let specs = clip_specs(states, options);
    Ok(serde_json::to_string_pretty(&specs)?)
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
    fn test_specs_skip_filtered() {
        let mut states = sample_states();
        states[0].skip = true;

        let specs = clip_specs(&states, &RenderOptions::default());
        assert_eq!(specs.len(), states.len() - 1);
    }

    #[test]
    fn test_spec_position_from_level() {
        let states = sample_states();
        let specs = clip_specs(&states, &RenderOptions::default());

        // Level 0 in a 1920px-tall frame sits at 1920 - 260 from the top.
        assert_eq!(specs[0].position, ("center".to_string(), 1660));
    }

    #[test]
    fn test_spec_defaults() {
        let specs = clip_specs(&sample_states(), &RenderOptions::default());

        assert_eq!(specs[0].font_size, 54);
        assert_eq!(specs[0].font_color, "white");
        assert_eq!(specs[0].font_file, "Poppins-Black.ttf");
        assert_eq!(specs[0].bg_color, "black");
        assert_eq!(specs[0].bg_opacity, 0.6);
    }

    #[test]
    fn test_json_uses_descriptor_field_names() {
        let json = clip_specs_json(&sample_states(), &RenderOptions::default()).unwrap();

        assert!(json.contains("\"start_time\""));
        assert!(json.contains("\"end_time\""));
        assert!(json.contains("\"font_file\""));
        assert!(json.contains("\"bg_opacity\""));
        // Tuple position serializes as a two-element array.
        assert!(json.contains("\"center\""));
    }

    #[test]
    fn test_json_roundtrip() {
        let specs = clip_specs(&sample_states(), &RenderOptions::default());
        let json = serde_json::to_string(&specs).unwrap();
        let parsed: Vec<TextClipSpec> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, specs);
    }
}
