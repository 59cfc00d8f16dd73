//! Document diagnostics
//!
//! Read-only counts gathered alongside conversion: list items with an
//! advisory numbering check, and code block statistics. None of this affects
//! the rendered HTML.

use super::code_blocks::CodeStats;
use super::lists::ListReport;
use serde::Serialize;

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostics
// ─────────────────────────────────────────────────────────────────────────────

/// Diagnostics for one document.
///
/// # Example
///
/// ```ignore
/// let diagnostics = markpad::markdown::analyze("1. a\n3. b");
/// assert!(!diagnostics.lists.sequence.is_sequential);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// List item counts and ordered numbering check
    pub lists: ListReport,
    /// Code block and inline span counts
    pub code: CodeStats,
}

impl Diagnostics {
    /// Total list items of either kind.
    pub fn total_list_items(&self) -> usize {
        self.lists.ordered_items + self.lists.unordered_items
    }

    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        let numbering = if self.lists.sequence.is_sequential {
            "sequential"
        } else {
            "non-sequential"
        };
        format!(
            "{} list items ({} ordered, {} unordered, numbering {}), \
             {} code blocks ({} lines, avg {}), {} inline code spans",
            self.total_list_items(),
            self.lists.ordered_items,
            self.lists.unordered_items,
            numbering,
            self.code.code_blocks,
            self.code.code_lines,
            self.code.average_lines_per_block(),
            self.code.inline_spans,
        )
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
