//! Renderer Adapters
//!
//! Translates finalized, leveled caption states into the two supported
//! renderer inputs:
//! - `filter.rs` — a single-line ffmpeg filtergraph of `drawtext` operations
//!   gated by `enable` time windows
//! - `clips.rs` — positioned, timed text-clip descriptors (JSON) for a
//!   compositing tool
//!
//! Both adapters skip any state with `skip = true` and emit times with
//! millisecond precision. Level indices map to vertical pixel offsets from
//! the bottom edge of the frame.

mod clips;
mod filter;

pub use clips::{clip_specs, clip_specs_json, TextClipSpec};
pub use filter::build_filter_script;

use serde::{Deserialize, Serialize};

use crate::text::DEFAULT_WRAP_WIDTH;
use crate::types::Size2D;

/// Pixel offset of the primary caption level from the bottom edge
const LEVEL_BASE_OFFSET: u32 = 260;

/// Vertical distance between adjacent caption levels, in pixels
const LEVEL_SPACING: u32 = 60;

/// Maps a display level to its pixel offset from the bottom edge.
///
/// Level 0 sits 260px from the bottom, level 1 at 320px, continuing upward in
/// 60px steps for renderers configured with more levels.
pub fn level_y_offset(level: usize) -> u32 {
    LEVEL_BASE_OFFSET + LEVEL_SPACING * level as u32
}

// =============================================================================
// Render Options
// =============================================================================

/// Rendering options shared by both adapters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Font file used by drawtext / the compositor
    pub font_file: String,
    /// Font size in points
    pub font_size: u32,
    /// Output video dimensions
    pub video_size: Size2D,
    /// Maximum caption line width in characters
    pub wrap_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_file: "Poppins-Black.ttf".to_string(),
            font_size: 54,
            // 9:16 vertical video
            video_size: Size2D::new(1080, 1920),
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl RenderOptions {
    /// Sets the font file
    pub fn with_font_file(mut self, font_file: impl Into<String>) -> Self {
        self.font_file = font_file.into();
        self
    }

    /// Sets the output video dimensions
    pub fn with_video_size(mut self, width: u32, height: u32) -> Self {
        self.video_size = Size2D::new(width, height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_y_offsets() {
        assert_eq!(level_y_offset(0), 260);
        assert_eq!(level_y_offset(1), 320);
        assert_eq!(level_y_offset(2), 380);
    }

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert_eq!(opts.video_size, Size2D::new(1080, 1920));
        assert_eq!(opts.font_size, 54);
    }
}
