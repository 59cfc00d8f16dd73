//! Alternating Bold/Italic Formatting
//!
//! The editor's format action wraps the current selection in Markdown
//! emphasis delimiters. The action alternates between bold and italic: every
//! successful application on a non-empty selection advances the mode, while
//! a call with an empty selection inserts a placeholder snippet instead and
//! leaves the mode alone.
//!
//! The mode is a plain value owned by the caller and threaded through each
//! call; nothing here keeps state between invocations.
//!
//! # Usage
//! ```ignore
//! use markpad::markdown::formatting::{apply_format, FormatMode};
//!
//! let outcome = apply_format("Hello world", (0, 5), FormatMode::Bold);
//! assert_eq!(outcome.text, "**Hello** world");
//! assert_eq!(outcome.next_mode, FormatMode::Italic);
//! ```

use crate::string_utils::normalize_selection;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Format Mode
// ─────────────────────────────────────────────────────────────────────────────

/// Which decoration the next format action applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    /// `**text**`
    #[default]
    Bold,
    /// `*text*`
    Italic,
}

impl FormatMode {
    /// The other mode.
    pub fn toggle(&self) -> Self {
        match self {
            FormatMode::Bold => FormatMode::Italic,
            FormatMode::Italic => FormatMode::Bold,
        }
    }

    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            FormatMode::Bold => "Bold",
            FormatMode::Italic => "Italic",
        }
    }

    /// Label with the Markdown syntax, for tooltips.
    pub fn description(&self) -> &'static str {
        match self {
            FormatMode::Bold => "Bold (**text**)",
            FormatMode::Italic => "Italic (*text*)",
        }
    }

    fn delimiter(&self) -> &'static str {
        match self {
            FormatMode::Bold => "**",
            FormatMode::Italic => "*",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            FormatMode::Bold => "bold text",
            FormatMode::Italic => "italic text",
        }
    }

    /// Whether `selected` already carries this mode's delimiters.
    ///
    /// Italic refuses text that starts with `**`, which is bold.
    fn is_wrapped(&self, selected: &str) -> bool {
        let delim = self.delimiter();
        let min_len = delim.len() * 2;
        let wrapped =
            selected.len() >= min_len && selected.starts_with(delim) && selected.ends_with(delim);
        match self {
            FormatMode::Bold => wrapped,
            FormatMode::Italic => wrapped && !selected.starts_with("**"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// Result of a format action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    /// The full text after the edit
    pub text: String,
    /// New cursor position (byte offset)
    pub cursor: usize,
    /// Range to select after the edit, if any
    pub selection: Option<(usize, usize)>,
    /// Mode for the next call
    pub next_mode: FormatMode,
    /// Whether a selection was formatted (false when a placeholder was inserted)
    pub applied: bool,
    /// Whether existing delimiters were removed rather than added
    pub removed: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Apply
// ─────────────────────────────────────────────────────────────────────────────

/// Apply `mode` to `selection` (byte offsets, any order) within `text`.
///
/// Offsets are clamped to the text and snapped to character boundaries.
pub fn apply_format(text: &str, selection: (usize, usize), mode: FormatMode) -> FormatOutcome {
    let (start, end) = normalize_selection(text, selection.0, selection.1);

    if start == end {
        return insert_placeholder(text, start, mode);
    }

    let selected = &text[start..end];
    let delim = mode.delimiter();
    let (replacement, removed) = if mode.is_wrapped(selected) {
        (
            selected[delim.len()..selected.len() - delim.len()].to_string(),
            true,
        )
    } else {
        (format!("{delim}{selected}{delim}"), false)
    };

    let new_text = format!("{}{}{}", &text[..start], replacement, &text[end..]);
    FormatOutcome {
        text: new_text,
        cursor: start + replacement.len(),
        selection: None,
        next_mode: mode.toggle(),
        applied: true,
        removed,
    }
}

/// Insert `**bold text**` or `*italic text*` at `at` and select the words.
fn insert_placeholder(text: &str, at: usize, mode: FormatMode) -> FormatOutcome {
    let delim = mode.delimiter();
    let words = mode.placeholder();
    let new_text = format!("{}{delim}{words}{delim}{}", &text[..at], &text[at..]);
    let select_start = at + delim.len();
    let select_end = select_start + words.len();
    FormatOutcome {
        text: new_text,
        cursor: select_end,
        selection: Some((select_start, select_end)),
        next_mode: mode,
        applied: false,
        removed: false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // Wrapping
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bold_wraps_selection() {
        let outcome = apply_format("Hello world", (0, 5), FormatMode::Bold);
        assert_eq!(outcome.text, "**Hello** world");
        assert_eq!(outcome.cursor, 9);
        assert_eq!(outcome.selection, None);
        assert_eq!(outcome.next_mode, FormatMode::Italic);
        assert!(outcome.applied);
        assert!(!outcome.removed);
    }

    #[test]
    fn test_italic_wraps_selection() {
        let outcome = apply_format("Hello world", (6, 11), FormatMode::Italic);
        assert_eq!(outcome.text, "Hello *world*");
        assert_eq!(outcome.next_mode, FormatMode::Bold);
    }

    #[test]
    fn test_reversed_selection() {
        let outcome = apply_format("Hello world", (5, 0), FormatMode::Bold);
        assert_eq!(outcome.text, "**Hello** world");
    }

    #[test]
    fn test_two_applications_alternate() {
        let first = apply_format("one two", (0, 3), FormatMode::default());
        assert_eq!(first.text, "**one** two");

        // Reselect "two" in the new text
        let second = apply_format(&first.text, (8, 11), first.next_mode);
        assert_eq!(second.text, "**one** *two*");
        assert_eq!(second.next_mode, FormatMode::Bold);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Unwrapping
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bold_unwraps() {
        let outcome = apply_format("**Hello** world", (0, 9), FormatMode::Bold);
        assert_eq!(outcome.text, "Hello world");
        assert!(outcome.removed);
        assert_eq!(outcome.next_mode, FormatMode::Italic);
    }

    #[test]
    fn test_italic_unwraps() {
        let outcome = apply_format("*Hello*", (0, 7), FormatMode::Italic);
        assert_eq!(outcome.text, "Hello");
        assert!(outcome.removed);
    }

    #[test]
    fn test_italic_does_not_unwrap_bold() {
        let outcome = apply_format("**Hello**", (0, 9), FormatMode::Italic);
        assert_eq!(outcome.text, "***Hello***");
        assert!(!outcome.removed);
    }

    #[test]
    fn test_bare_delimiters_are_wrapped() {
        let outcome = apply_format("**", (0, 2), FormatMode::Bold);
        assert_eq!(outcome.text, "******");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Empty selection
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_selection_inserts_bold_placeholder() {
        let outcome = apply_format("ab", (1, 1), FormatMode::Bold);
        assert_eq!(outcome.text, "a**bold text**b");
        assert_eq!(outcome.selection, Some((3, 12)));
        assert_eq!(&outcome.text[3..12], "bold text");
        assert_eq!(outcome.next_mode, FormatMode::Bold);
        assert!(!outcome.applied);
    }

    #[test]
    fn test_empty_selection_inserts_italic_placeholder() {
        let outcome = apply_format("", (0, 0), FormatMode::Italic);
        assert_eq!(outcome.text, "*italic text*");
        assert_eq!(outcome.selection, Some((1, 12)));
        assert_eq!(outcome.next_mode, FormatMode::Italic);
    }

    #[test]
    fn test_out_of_range_selection_clamps_to_end() {
        let outcome = apply_format("abc", (50, 99), FormatMode::Bold);
        assert_eq!(outcome.text, "abc**bold text**");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mode metadata
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_mode_toggle_and_labels() {
        assert_eq!(FormatMode::Bold.toggle(), FormatMode::Italic);
        assert_eq!(FormatMode::Italic.toggle(), FormatMode::Bold);
        assert_eq!(FormatMode::default(), FormatMode::Bold);
        assert!(FormatMode::Bold.description().contains("**text**"));
        assert_eq!(FormatMode::Italic.label(), "Italic");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UTF-8 Safe Formatting Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bold_norwegian_chars() {
        let outcome = apply_format("Hei på deg", (4, 6), FormatMode::Bold);
        assert!(outcome.text.contains("**på**"));
    }

    #[test]
    fn test_bold_mid_character_selection_grows() {
        // 你 spans bytes 6..9, 好 spans 9..12
        let outcome = apply_format("Hello 你好 World", (7, 11), FormatMode::Bold);
        assert_eq!(outcome.text, "Hello **你好** World");
    }

    #[test]
    fn test_no_panic_on_any_byte_index() {
        let text = "Hei på deg 你好 🎉";
        for i in 0..=text.len() + 3 {
            for j in 0..=text.len() + 3 {
                let _ = apply_format(text, (i, j), FormatMode::Bold);
                let _ = apply_format(text, (i, j), FormatMode::Italic);
            }
        }
    }
}
