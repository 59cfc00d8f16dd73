//! Markdown to HTML conversion
//!
//! A small, line-oriented converter built for live preview. The document goes
//! through a fixed sequence of passes:
//!
//! 1. code extraction: fenced blocks are highlighted, inline spans escaped,
//!    and both are swapped out for placeholders
//! 2. list grouping
//! 3. headings
//! 4. bold and italic emphasis
//! 5. paragraph wrapping
//! 6. placeholder restoration
//!
//! Code content never reaches passes 2 to 5, so nothing inside a code block
//! is ever reinterpreted as Markdown. Text outside code is not escaped: raw
//! HTML in the source passes through.
//!
//! # Example
//! ```ignore
//! use markpad::markdown::{convert, MarkdownConverter};
//!
//! let html = convert("# Hello\n\nThis is **bold** text.");
//! assert_eq!(html, "<h1>Hello</h1>\n\n<p>This is <strong>bold</strong> text.</p>");
//!
//! let converter = MarkdownConverter::from_settings(&settings);
//! let html = converter.convert(&source);
//! ```

pub mod code_blocks;
mod diagnostics;
pub mod emphasis;
pub mod escape;
pub mod formatting;
pub mod headings;
pub mod highlight;
pub mod lists;
pub mod paragraphs;

pub use diagnostics::Diagnostics;
pub use escape::escape_html;
pub use formatting::{apply_format, FormatMode, FormatOutcome};
pub use highlight::{highlight, Highlighter};

use crate::config::Settings;
use crate::string_utils::normalize_line_endings;
use code_blocks::{strip_placeholder_marks, CodeBlockExtractor};
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Converter
// ─────────────────────────────────────────────────────────────────────────────

/// Runs the conversion pipeline with a fixed highlighter configuration.
///
/// Conversion is a pure function of the input text and the configuration, so
/// a converter can be shared freely and reused for every keystroke.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    extractor: CodeBlockExtractor,
}

impl MarkdownConverter {
    /// Create a converter with an explicit highlighter and tab width.
    pub fn new(highlighter: Highlighter, tab_width: usize) -> Self {
        Self {
            extractor: CodeBlockExtractor::new(highlighter, tab_width),
        }
    }

    /// Create a converter from user settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Highlighter::with_keywords(settings.keywords.iter().cloned()),
            settings.tab_width,
        )
    }

    /// Convert a Markdown document to an HTML fragment.
    pub fn convert(&self, markdown: &str) -> String {
        let text = prepare_input(markdown);
        let extraction = self.extractor.extract(&text);

        let html = lists::group_lists(&extraction.text);
        let html = headings::convert_headings(&html);
        let html = emphasis::convert_emphasis(&html);
        let html = paragraphs::wrap_paragraphs(&html);
        let html = extraction.stash.restore(&html);

        debug!(
            "Converted {} bytes of Markdown to {} bytes of HTML",
            markdown.len(),
            html.len()
        );
        html
    }

    /// Collect diagnostics for a document without rendering it.
    ///
    /// Lists are counted after code extraction, so list-like lines inside a
    /// code block are not counted.
    pub fn analyze(&self, markdown: &str) -> Diagnostics {
        let text = prepare_input(markdown);
        let extraction = self.extractor.extract(&text);
        Diagnostics {
            lists: lists::analyze_lists(&extraction.text),
            code: extraction.stats,
        }
    }
}

/// Normalise line endings and drop characters reserved for placeholders.
fn prepare_input(markdown: &str) -> String {
    strip_placeholder_marks(&normalize_line_endings(markdown))
}

/// Convert `markdown` with the default configuration.
pub fn convert(markdown: &str) -> String {
    MarkdownConverter::default().convert(markdown)
}

/// Analyze `markdown` with the default configuration.
pub fn analyze(markdown: &str) -> Diagnostics {
    MarkdownConverter::default().analyze(markdown)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
