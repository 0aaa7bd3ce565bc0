//! Subtitle Format Parsers
//!
//! Parses the three supported subtitle formats into unified [`Segment`]s:
//! - ASS (Advanced SubStation Alpha, `[Events]` dialogue lines)
//! - SRT (SubRip)
//! - VTT (WebVTT)
//!
//! Parsers consume string content; reading files is the caller's concern.
//!
//! # Example
//!
//! ```rust,ignore
//! use capflow_core::subtitles::{parse_subtitles, SubtitleFormat};
//!
//! let content = std::fs::read_to_string("subtitles.srt")?;
//! let segments = parse_subtitles(&content, SubtitleFormat::Srt)?;
//! ```

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::Segment;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during subtitle parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid timestamp format
    InvalidTimestamp(String),
    /// Invalid subtitle structure
    InvalidFormat(String),
    /// Missing required data
    MissingData(String),
    /// Unexpected end of input
    UnexpectedEnd,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimestamp(s) => write!(f, "Invalid timestamp: {}", s),
            Self::InvalidFormat(s) => write!(f, "Invalid format: {}", s),
            Self::MissingData(s) => write!(f, "Missing data: {}", s),
            Self::UnexpectedEnd => write!(f, "Unexpected end of input"),
        }
    }
}

impl std::error::Error for ParseError {}

// =============================================================================
// Format Detection
// =============================================================================

/// Supported subtitle file formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtitleFormat {
    Ass,
    Srt,
    Vtt,
}

impl SubtitleFormat {
    /// Detects the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ass" => Some(Self::Ass),
            "srt" => Some(Self::Srt),
            "vtt" => Some(Self::Vtt),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ass => write!(f, "ass"),
            Self::Srt => write!(f, "srt"),
            Self::Vtt => write!(f, "vtt"),
        }
    }
}

/// Parses subtitle content in the given format into segments
pub fn parse_subtitles(content: &str, format: SubtitleFormat) -> Result<Vec<Segment>, ParseError> {
    match format {
        SubtitleFormat::Ass => parse_ass(content),
        SubtitleFormat::Srt => parse_srt(content),
        SubtitleFormat::Vtt => parse_vtt(content),
    }
}

// =============================================================================
// Timing Line Patterns
// =============================================================================

fn srt_timing_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{2}:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2}[,.]\d{3})")
            .expect("SRT timing pattern is valid")
    })
}

fn vtt_timing_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"((?:\d{1,2}:)?\d{1,2}:\d{2}\.\d{3,6})\s*-->\s*((?:\d{1,2}:)?\d{1,2}:\d{2}\.\d{3,6})")
            .expect("VTT timing pattern is valid")
    })
}

// =============================================================================
// SRT Format
// =============================================================================

/// Parses SRT (SubRip) content into segments
///
/// # SRT Format
///
/// ```text
/// 1
/// 00:00:01,000 --> 00:00:04,000
/// First caption text
///
/// 2
/// 00:00:05,500 --> 00:00:08,000
/// Second caption text
/// with multiple lines
/// ```
pub fn parse_srt(content: &str) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();
    let mut lines = content.lines().peekable();
    let mut index = 0;

    while lines.peek().is_some() {
        // Skip empty lines
        while lines.peek().is_some_and(|l| l.trim().is_empty()) {
            lines.next();
        }

        if lines.peek().is_none() {
            break;
        }

        // Sequence number line (value unused)
        let _seq = lines.next().ok_or(ParseError::UnexpectedEnd)?;

        // Timing line
        let timing_line = lines.next().ok_or(ParseError::UnexpectedEnd)?;
        let (start_sec, end_sec) = parse_srt_timing_line(timing_line)?;

        // Text (may be multiple lines)
        let mut text_lines = Vec::new();
        while let Some(line) = lines.peek() {
            if line.trim().is_empty() {
                break;
            }
            text_lines.push(lines.next().unwrap_or_default().to_string());
        }

        if text_lines.is_empty() {
            return Err(ParseError::MissingData("Subtitle text".to_string()));
        }

        let text = text_lines.join("\n");
        segments.push(Segment::new(start_sec, end_sec, &text, index));
        index += 1;
    }

    Ok(segments)
}

/// Parses an SRT timing line (e.g., "00:00:01,000 --> 00:00:04,000")
fn parse_srt_timing_line(line: &str) -> Result<(f64, f64), ParseError> {
    let caps = srt_timing_regex()
        .captures(line)
        .ok_or_else(|| ParseError::InvalidFormat(format!("Expected 'start --> end': {}", line)))?;

    let start = parse_hms_timestamp(&caps[1])?;
    let end = parse_hms_timestamp(&caps[2])?;

    Ok((start, end))
}

// =============================================================================
// VTT Format
// =============================================================================

/// Parses WebVTT content into segments
///
/// Cue identifiers are optional; VTT markup tags are stripped from the text.
///
/// # VTT Format
///
/// ```text
/// WEBVTT
///
/// 00:00:01.000 --> 00:00:04.000
/// First caption text
/// ```
pub fn parse_vtt(content: &str) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();
    let mut lines = content.lines().peekable();
    let mut index = 0;

    // WEBVTT header is mandatory
    if let Some(first_line) = lines.next() {
        if !first_line.starts_with("WEBVTT") {
            return Err(ParseError::InvalidFormat(
                "VTT content must start with WEBVTT".to_string(),
            ));
        }
    }

    // Skip any header metadata (lines before the first blank line)
    while lines.peek().is_some_and(|l| !l.trim().is_empty()) {
        lines.next();
    }

    while lines.peek().is_some() {
        // Skip empty lines
        while lines.peek().is_some_and(|l| l.trim().is_empty()) {
            lines.next();
        }

        if lines.peek().is_none() {
            break;
        }

        // Cue identifiers are optional in VTT
        let first_line = lines.next().ok_or(ParseError::UnexpectedEnd)?;
        let timing_line = if first_line.contains("-->") {
            first_line
        } else {
            lines.next().ok_or(ParseError::UnexpectedEnd)?
        };

        let (start_sec, end_sec) = parse_vtt_timing_line(timing_line)?;

        // Text (may be multiple lines)
        let mut text_lines = Vec::new();
        while let Some(line) = lines.peek() {
            if line.trim().is_empty() {
                break;
            }
            text_lines.push(strip_vtt_tags(lines.next().unwrap_or_default()));
        }

        if text_lines.is_empty() {
            return Err(ParseError::MissingData("Subtitle text".to_string()));
        }

        let text = text_lines.join("\n");
        segments.push(Segment::new(start_sec, end_sec, &text, index));
        index += 1;
    }

    Ok(segments)
}

/// Parses a VTT timing line, tolerating cue settings after the end timestamp
fn parse_vtt_timing_line(line: &str) -> Result<(f64, f64), ParseError> {
    let caps = vtt_timing_regex()
        .captures(line)
        .ok_or_else(|| ParseError::InvalidFormat(format!("Expected 'start --> end': {}", line)))?;

    let start = parse_colon_timestamp(&caps[1])?;
    let end = parse_colon_timestamp(&caps[2])?;

    Ok((start, end))
}

/// Strips VTT formatting tags from text
fn strip_vtt_tags(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_tag = false;

    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

// =============================================================================
// ASS Format
// =============================================================================

/// Parses ASS (Advanced SubStation Alpha) content into segments
///
/// Only `Dialogue:` lines inside the `[Events]` section are considered.
/// A dialogue line has ten comma-separated fields; the text field is last and
/// may itself contain commas.
pub fn parse_ass(content: &str) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();
    let mut in_events = false;
    let mut index = 0;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') {
            in_events = trimmed.eq_ignore_ascii_case("[Events]");
            continue;
        }

        if !in_events {
            continue;
        }

        let Some(rest) = trimmed.strip_prefix("Dialogue:") else {
            continue;
        };

        let fields: Vec<&str> = rest.splitn(10, ',').collect();
        if fields.len() < 10 {
            continue;
        }

        let start_sec = parse_colon_timestamp(fields[1].trim())?;
        let end_sec = parse_colon_timestamp(fields[2].trim())?;
        let text = fields[9].trim();

        segments.push(Segment::new(start_sec, end_sec, text, index));
        index += 1;
    }

    Ok(segments)
}

// =============================================================================
// Timestamp Helpers
// =============================================================================

/// Parses an SRT timestamp ("00:01:23,456" or "00:01:23.456") into seconds
fn parse_hms_timestamp(ts: &str) -> Result<f64, ParseError> {
    let normalized = ts.replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();

    if parts.len() != 3 {
        return Err(ParseError::InvalidTimestamp(ts.to_string()));
    }

    let hours: f64 = parts[0]
        .parse()
        .map_err(|_| ParseError::InvalidTimestamp(ts.to_string()))?;
    let minutes: f64 = parts[1]
        .parse()
        .map_err(|_| ParseError::InvalidTimestamp(ts.to_string()))?;
    let seconds: f64 = parts[2]
        .parse()
        .map_err(|_| ParseError::InvalidTimestamp(ts.to_string()))?;

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Parses a colon-separated timestamp with optional hours
/// ("1:23.456", "0:01:23.456", "0:00:02.53") into seconds
fn parse_colon_timestamp(ts: &str) -> Result<f64, ParseError> {
    let parts: Vec<&str> = ts.split(':').collect();

    match parts.len() {
        // MM:SS.mmm
        2 => {
            let minutes: f64 = parts[0]
                .parse()
                .map_err(|_| ParseError::InvalidTimestamp(ts.to_string()))?;
            let seconds: f64 = parts[1]
                .parse()
                .map_err(|_| ParseError::InvalidTimestamp(ts.to_string()))?;
            Ok(minutes * 60.0 + seconds)
        }
        // H:MM:SS.mmm
        3 => {
            let hours: f64 = parts[0]
                .parse()
                .map_err(|_| ParseError::InvalidTimestamp(ts.to_string()))?;
            let minutes: f64 = parts[1]
                .parse()
                .map_err(|_| ParseError::InvalidTimestamp(ts.to_string()))?;
            let seconds: f64 = parts[2]
                .parse()
                .map_err(|_| ParseError::InvalidTimestamp(ts.to_string()))?;
            Ok(hours * 3600.0 + minutes * 60.0 + seconds)
        }
        _ => Err(ParseError::InvalidTimestamp(ts.to_string())),
    }
}

// =============================================================================
// Tests
// =============================================================================
