//! Caption Text Wrapping
//!
//! Soft-wraps caption text to a maximum line width for display. Renderers
//! center each line; the wrapper only decides where lines break.

/// Default maximum caption line width in characters
pub const DEFAULT_WRAP_WIDTH: usize = 28;

/// Soft-wraps text to at most `max_chars` characters per line.
///
/// Greedy line fill over whitespace-separated words: a word joins the current
/// line while the line stays within the width, otherwise it starts a new
/// line. A single word longer than the width gets a line of its own, so the
/// function is idempotent: `wrap_text(wrap_text(t, w), w) == wrap_text(t, w)`.
///
/// A zero width is defended as width 1.
pub fn wrap_text(text: &str, max_chars: usize) -> String {
    let max_chars = max_chars.max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        if current.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

// =============================================================================
// Tests
// =============================================================================
