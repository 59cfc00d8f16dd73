//! User settings for Markpad
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use serde::{Deserialize, Serialize};

/// Keywords highlighted inside code blocks unless the user overrides them.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "function", "var", "let", "const", "if", "else", "for", "while", "return", "class", "import",
    "export", "from", "default", "async", "await", "try", "catch", "finally", "new", "this",
    "super", "extends",
];

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// All persisted preferences.
///
/// Missing fields fall back to their defaults, so a partial or older config
/// file still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Code Highlighting
    // ─────────────────────────────────────────────────────────────────────────
    /// Number of spaces a tab expands to inside fenced code blocks
    pub tab_width: usize,

    /// Words wrapped in keyword spans by the code highlighter
    pub keywords: Vec<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Preview
    // ─────────────────────────────────────────────────────────────────────────
    /// Mark rendered headings with the high-contrast class
    pub heading_contrast: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────
    /// Wrap output in a complete HTML document
    pub standalone: bool,

    /// Title used for standalone documents when none is given
    pub title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_width: 4,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            heading_contrast: false,
            standalone: false,
            title: String::from("Markdown Preview"),
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum allowed tab width.
    pub const MIN_TAB_WIDTH: usize = 1;
    /// Maximum allowed tab width.
    pub const MAX_TAB_WIDTH: usize = 16;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// Keywords are trimmed, entries that are not identifier-like words are
    /// dropped, and duplicates are removed keeping the first occurrence.
    pub fn sanitize(&mut self) {
        self.tab_width = self
            .tab_width
            .clamp(Self::MIN_TAB_WIDTH, Self::MAX_TAB_WIDTH);

        let mut seen = Vec::with_capacity(self.keywords.len());
        for keyword in self.keywords.drain(..) {
            let keyword = keyword.trim().to_string();
            if is_identifier(&keyword) && !seen.contains(&keyword) {
                seen.push(keyword);
            }
        }
        self.keywords = seen;

        if self.title.trim().is_empty() {
            self.title = Self::default().title;
        }
    }

    /// Deserialize settings from JSON and sanitize them.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

/// A keyword must look like a single word: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
