//! Code Block Extraction
//!
//! Fenced blocks and inline code spans are converted to HTML before any other
//! pass runs, then swapped out of the working text for opaque placeholders.
//! Later passes (lists, headings, emphasis, paragraphs) only ever see the
//! placeholder, so code content can never be reinterpreted as Markdown. The
//! pipeline puts the converted HTML back with [`CodeStash::restore`] as its
//! final step.
//!
//! Raw `<pre>…</pre>` and `<code>…</code>` markup already present in the input
//! (for instance when previously rendered output is fed back in) is protected
//! the same way, verbatim.

use super::escape::escape_html;
use super::highlight::Highlighter;
use crate::string_utils::expand_tabs;
use log::debug;
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Placeholders
// ─────────────────────────────────────────────────────────────────────────────

/// Opens a placeholder for block-level code (`<pre>`).
pub(crate) const BLOCK_MARK: char = '\u{FDD0}';
/// Closes any placeholder.
pub(crate) const END_MARK: char = '\u{FDD1}';
/// Opens a placeholder for inline code (`<code>`).
pub(crate) const INLINE_MARK: char = '\u{FDD2}';

/// Remove placeholder delimiters from untrusted input.
///
/// The delimiters are Unicode noncharacters, reserved for internal use and
/// never meaningful in interchanged text.
pub(crate) fn strip_placeholder_marks(text: &str) -> String {
    text.chars()
        .filter(|&c| c != BLOCK_MARK && c != END_MARK && c != INLINE_MARK)
        .collect()
}

/// Whether a line starts with a block-level code placeholder.
pub(crate) fn is_block_placeholder(line: &str) -> bool {
    line.trim_start().starts_with(BLOCK_MARK)
}

// ─────────────────────────────────────────────────────────────────────────────
// Patterns
// ─────────────────────────────────────────────────────────────────────────────

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(.*?)```").expect("fence pattern"))
}

fn inline_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`\n]+)`").expect("inline code pattern"))
}

fn raw_pre_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<pre\b[^>]*>.*?</pre>").expect("raw pre pattern"))
}

fn raw_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<code\b[^>]*>.*?</code>").expect("raw code pattern"))
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!("[{}{}]([0-9]+){}", BLOCK_MARK, INLINE_MARK, END_MARK);
        Regex::new(&pattern).expect("placeholder pattern")
    })
}

fn info_string_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_+#.-]+$").expect("info string pattern"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Stash
// ─────────────────────────────────────────────────────────────────────────────

/// Converted code fragments, addressed by the placeholders left in the text.
#[derive(Debug, Clone, Default)]
pub struct CodeStash {
    entries: Vec<String>,
}

impl CodeStash {
    /// Store block-level HTML and return its placeholder.
    fn push_block(&mut self, html: String) -> String {
        self.push(BLOCK_MARK, html)
    }

    /// Store inline HTML and return its placeholder.
    fn push_inline(&mut self, html: String) -> String {
        self.push(INLINE_MARK, html)
    }

    fn push(&mut self, mark: char, html: String) -> String {
        let index = self.entries.len();
        self.entries.push(html);
        format!("{}{}{}", mark, index, END_MARK)
    }

    /// Number of stored fragments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was stashed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every placeholder in `text` with its stored HTML.
    ///
    /// A protected raw `<pre>` may itself contain an earlier placeholder, so
    /// replacements are restored recursively. Indices only ever point
    /// backwards, which bounds the recursion.
    pub fn restore(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_string();
        }
        placeholder_regex()
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.entries.get(i))
                    .map(|html| self.restore(html))
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Statistics
// ─────────────────────────────────────────────────────────────────────────────

/// Counts of converted code elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CodeStats {
    /// Number of fenced code blocks
    pub code_blocks: usize,
    /// Number of inline code spans
    pub inline_spans: usize,
    /// Total lines of code across all fenced blocks
    pub code_lines: usize,
}

impl CodeStats {
    /// Total fenced blocks plus inline spans.
    pub fn total(&self) -> usize {
        self.code_blocks + self.inline_spans
    }

    /// Average lines per fenced block, rounded to the nearest integer.
    pub fn average_lines_per_block(&self) -> usize {
        if self.code_blocks == 0 {
            return 0;
        }
        (self.code_lines + self.code_blocks / 2) / self.code_blocks
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extractor
// ─────────────────────────────────────────────────────────────────────────────

/// Result of running the extractor over a document.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Document with every code region replaced by a placeholder
    pub text: String,
    /// Converted HTML for each placeholder
    pub stash: CodeStash,
    /// What was found
    pub stats: CodeStats,
}

/// Converts fenced and inline code and protects it from later passes.
#[derive(Debug, Clone)]
pub struct CodeBlockExtractor {
    highlighter: Highlighter,
    tab_width: usize,
}

impl Default for CodeBlockExtractor {
    fn default() -> Self {
        Self::new(Highlighter::default(), 4)
    }
}

impl CodeBlockExtractor {
    pub fn new(highlighter: Highlighter, tab_width: usize) -> Self {
        Self {
            highlighter,
            tab_width,
        }
    }

    /// Run the extraction over `text`.
    ///
    /// Order: fenced blocks, then raw `<pre>` regions, then inline spans, then
    /// raw `<code>` elements. Fences go first so their content is never seen
    /// by the other patterns.
    pub fn extract(&self, text: &str) -> Extraction {
        let mut stash = CodeStash::default();
        let mut stats = CodeStats::default();

        let text = fence_regex().replace_all(text, |caps: &Captures| {
            let (language, body) = split_info_string(&caps[1]);
            let body = expand_tabs(&trim_blank_lines(body), self.tab_width);

            stats.code_blocks += 1;
            stats.code_lines += if body.is_empty() { 0 } else { body.lines().count() };

            let class = language
                .map(|lang| format!(" class=\"language-{}\"", escape_html(lang)))
                .unwrap_or_default();
            stash.push_block(format!(
                "<pre><code{}>{}</code></pre>",
                class,
                self.highlighter.highlight(&body)
            ))
        });

        let text = raw_pre_regex().replace_all(&text, |caps: &Captures| {
            stash.push_block(caps[0].to_string())
        });

        let text = inline_code_regex().replace_all(&text, |caps: &Captures| {
            stats.inline_spans += 1;
            stash.push_inline(format!(
                "<code class=\"inline-code\">{}</code>",
                escape_html(&caps[1])
            ))
        });

        let text = raw_code_regex().replace_all(&text, |caps: &Captures| {
            stash.push_inline(caps[0].to_string())
        });

        debug!(
            "Extracted {} code blocks and {} inline spans",
            stats.code_blocks, stats.inline_spans
        );

        Extraction {
            text: text.into_owned(),
            stash,
            stats,
        }
    }
}

/// Split an optional language word off the opening fence line.
///
/// Only a single word directly after the fence, followed by a line break,
/// counts as an info string; anything else is code.
fn split_info_string(content: &str) -> (Option<&str>, &str) {
    match content.split_once('\n') {
        Some((first, rest)) => {
            let word = first.trim();
            if !word.is_empty() && info_string_regex().is_match(word) {
                (Some(word), rest)
            } else {
                (None, content)
            }
        }
        None => (None, content),
    }
}

/// Drop whitespace-only lines from both ends, keeping inner indentation.
fn trim_blank_lines(code: &str) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
