//! Subtitle Input Module
//!
//! Supplies the ordered list of timed subtitle segments the caption engine
//! consumes:
//! - `models.rs` — the unified [`Segment`] structure
//! - `formats.rs` — ASS/SRT/VTT parsing and format detection
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use capflow_core::subtitles::{parse_subtitles, SubtitleFormat};
//!
//! let content = std::fs::read_to_string("clip_1.srt")?;
//! let segments = parse_subtitles(&content, SubtitleFormat::Srt)?;
//! assert!(segments.windows(2).all(|w| w[0].index < w[1].index));
//! ```

mod formats;
mod models;

pub use formats::{parse_ass, parse_srt, parse_subtitles, parse_vtt, ParseError, SubtitleFormat};
pub use models::Segment;
