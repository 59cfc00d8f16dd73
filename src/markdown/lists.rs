//! List grouping
//!
//! A single left-to-right scan over the lines of a document. Each line is
//! classified as an ordered item, an unordered item or something else, and
//! consecutive items of the same kind are collected into one run. A run is
//! closed by a line of the other kind, by a non-list line, or by the end of
//! the input, and is then emitted as a single `<ol>` or `<ul>` container.

use log::debug;
use serde::Serialize;

// ─────────────────────────────────────────────────────────────────────────────
// Line Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of list a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// `1. item`
    Ordered,
    /// `- item`, `* item`, `+ item`
    Unordered,
}

impl ListKind {
    /// Container tag name.
    pub fn tag(&self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// A line recognised as a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem<'a> {
    pub kind: ListKind,
    /// The number of an ordered item, `None` for bullets or if it overflows
    pub number: Option<u64>,
    /// Text after the marker, trimmed
    pub content: &'a str,
}

/// Bullet characters that start an unordered item.
const BULLET_MARKERS: &[char] = &['-', '*', '+'];

/// Classify a single line.
///
/// Leading whitespace is allowed before either marker. The marker must be
/// followed by at least one space or tab and then non-empty content.
pub fn classify_line(line: &str) -> Option<ListItem<'_>> {
    let trimmed = line.trim_start();

    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        let rest = trimmed[digits..].strip_prefix('.')?;
        let content = marker_content(rest)?;
        return Some(ListItem {
            kind: ListKind::Ordered,
            number: trimmed[..digits].parse().ok(),
            content,
        });
    }

    let rest = trimmed.strip_prefix(BULLET_MARKERS)?;
    let content = marker_content(rest)?;
    Some(ListItem {
        kind: ListKind::Unordered,
        number: None,
        content,
    })
}

/// Content after a marker: requires separating whitespace and some text.
fn marker_content(rest: &str) -> Option<&str> {
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let content = rest.trim();
    (!content.is_empty()).then_some(content)
}

// ─────────────────────────────────────────────────────────────────────────────
// Run State Machine
// ─────────────────────────────────────────────────────────────────────────────

/// A maximal sequence of same-kind items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRun<'a> {
    pub kind: ListKind,
    pub items: Vec<ListItem<'a>>,
}

impl ListRun<'_> {
    /// Render as a container with one tag per line.
    pub fn to_html(&self) -> String {
        let tag = self.kind.tag();
        let mut html = format!("<{}>\n", tag);
        for item in &self.items {
            html.push_str("<li>");
            html.push_str(item.content);
            html.push_str("</li>\n");
        }
        html.push_str(&format!("</{}>", tag));
        html
    }
}

/// Either an untouched line or a closed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBlock<'a> {
    Line(&'a str),
    Run(ListRun<'a>),
}

/// Split a document into passthrough lines and list runs.
pub fn segment_lists(text: &str) -> Vec<ListBlock<'_>> {
    let mut blocks = Vec::new();
    let mut open: Option<ListRun> = None;

    for line in text.split('\n') {
        match classify_line(line) {
            Some(item) => {
                if let Some(run) = open.as_mut().filter(|run| run.kind == item.kind) {
                    run.items.push(item);
                    continue;
                }
                // Opening a run of the other kind closes the current one first
                if let Some(run) = open.take() {
                    blocks.push(ListBlock::Run(run));
                }
                open = Some(ListRun {
                    kind: item.kind,
                    items: vec![item],
                });
            }
            None => {
                if let Some(run) = open.take() {
                    blocks.push(ListBlock::Run(run));
                }
                blocks.push(ListBlock::Line(line));
            }
        }
    }

    if let Some(run) = open.take() {
        blocks.push(ListBlock::Run(run));
    }
    blocks
}

/// Replace every list run in `text` with its HTML container.
pub fn group_lists(text: &str) -> String {
    let blocks = segment_lists(text);
    let mut runs = 0;
    let lines: Vec<String> = blocks
        .into_iter()
        .map(|block| match block {
            ListBlock::Line(line) => line.to_string(),
            ListBlock::Run(run) => {
                runs += 1;
                run.to_html()
            }
        })
        .collect();
    debug!("Grouped {} list runs", runs);
    lines.join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Reporting
// ─────────────────────────────────────────────────────────────────────────────

/// Advisory numbering check for ordered lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SequenceReport {
    /// Item numbers of each ordered run, in document order
    pub runs: Vec<Vec<u64>>,
    /// Whether every ordered run counts up by exactly one
    pub is_sequential: bool,
}

/// Item counts and numbering check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListReport {
    pub ordered_items: usize,
    pub unordered_items: usize,
    pub sequence: SequenceReport,
}

/// Count list items and validate ordered numbering without changing anything.
///
/// Numbering is checked per run: each run may start anywhere but must then
/// increase by one. A number too large to parse makes the run invalid.
pub fn analyze_lists(text: &str) -> ListReport {
    let mut report = ListReport {
        sequence: SequenceReport {
            runs: Vec::new(),
            is_sequential: true,
        },
        ..ListReport::default()
    };

    for block in segment_lists(text) {
        let ListBlock::Run(run) = block else {
            continue;
        };
        match run.kind {
            ListKind::Unordered => report.unordered_items += run.items.len(),
            ListKind::Ordered => {
                report.ordered_items += run.items.len();
                let numbers: Vec<Option<u64>> = run.items.iter().map(|i| i.number).collect();
                let sequential = numbers.iter().all(Option::is_some)
                    && numbers
                        .windows(2)
                        .all(|w| matches!((w[0], w[1]), (Some(a), Some(b)) if a.checked_add(1) == Some(b)));
                if !sequential {
                    report.sequence.is_sequential = false;
                }
                report
                    .sequence
                    .runs
                    .push(numbers.into_iter().flatten().collect());
            }
        }
    }
    report
}

/// Only the numbering check of [`analyze_lists`].
pub fn validate_sequence(text: &str) -> SequenceReport {
    analyze_lists(text).sequence
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // Classification
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_classify_ordered() {
        let item = classify_line("12. Twelfth").unwrap();
        assert_eq!(item.kind, ListKind::Ordered);
        assert_eq!(item.number, Some(12));
        assert_eq!(item.content, "Twelfth");
    }

    #[test]
    fn test_classify_unordered_markers() {
        for line in ["- a", "* a", "+ a", "   - a", "-\ta"] {
            let item = classify_line(line).unwrap();
            assert_eq!(item.kind, ListKind::Unordered, "{line:?}");
            assert_eq!(item.content, "a");
        }
    }

    #[test]
    fn test_classify_rejects_non_items() {
        for line in ["", "-", "- ", "-a", "1.", "1. ", "1.a", "1) a", "*emphasis*", "**bold**", "text"] {
            assert!(classify_line(line).is_none(), "{line:?}");
        }
    }

    #[test]
    fn test_classify_trims_trailing_whitespace() {
        assert_eq!(classify_line("2. Second  ").unwrap().content, "Second");
    }

    #[test]
    fn test_classify_huge_number() {
        let item = classify_line("99999999999999999999999. big").unwrap();
        assert_eq!(item.kind, ListKind::Ordered);
        assert_eq!(item.number, None);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Grouping
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_group_unordered_run() {
        let html = group_lists("- a\n- b\n- c\nafter");
        assert_eq!(html, "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li>\n</ul>\nafter");
    }

    #[test]
    fn test_group_run_at_end_of_input() {
        assert_eq!(group_lists("1. x\n2. y"), "<ol>\n<li>x</li>\n<li>y</li>\n</ol>");
    }

    #[test]
    fn test_mixed_kinds_make_two_containers() {
        let html = group_lists("1. first\n- second");
        assert_eq!(
            html,
            "<ol>\n<li>first</li>\n</ol>\n<ul>\n<li>second</li>\n</ul>"
        );
    }

    #[test]
    fn test_blank_line_splits_runs() {
        let html = group_lists("- a\n\n- b");
        assert_eq!(html, "<ul>\n<li>a</li>\n</ul>\n\n<ul>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn test_non_sequential_numbers_still_one_container() {
        let html = group_lists("1. a\n3. b\n4. c");
        assert_eq!(html.matches("<ol>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn test_item_content_is_untouched() {
        let html = group_lists("- **bold** <i>x</i>");
        assert!(html.contains("<li>**bold** <i>x</i></li>"));
    }

    #[test]
    fn test_non_list_lines_pass_through_unchanged() {
        let text = "  indented\n# heading\n\ntext";
        assert_eq!(group_lists(text), text);
    }

    #[test]
    fn test_segment_lists_shapes() {
        let blocks = segment_lists("intro\n- a\n- b\n1. c");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], ListBlock::Line("intro")));
        assert!(matches!(&blocks[1], ListBlock::Run(run) if run.items.len() == 2));
        assert!(matches!(&blocks[2], ListBlock::Run(run) if run.kind == ListKind::Ordered));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reporting
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_analyze_counts() {
        let report = analyze_lists("- a\n- b\n\n1. x\n2. y\n3. z");
        assert_eq!(report.unordered_items, 2);
        assert_eq!(report.ordered_items, 3);
        assert!(report.sequence.is_sequential);
        assert_eq!(report.sequence.runs, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_analyze_non_sequential() {
        let report = analyze_lists("1. a\n3. b\n4. c");
        assert!(!report.sequence.is_sequential);
        assert_eq!(report.sequence.runs, vec![vec![1, 3, 4]]);
    }

    #[test]
    fn test_analyze_each_run_may_restart() {
        let report = analyze_lists("1. a\n2. b\n\n5. c\n6. d");
        assert!(report.sequence.is_sequential);
        assert_eq!(report.sequence.runs.len(), 2);
    }

    #[test]
    fn test_validate_sequence() {
        assert!(validate_sequence("3. c\n4. d").is_sequential);
        assert!(!validate_sequence("1. a\n1. b").is_sequential);
    }

    #[test]
    fn test_analyze_no_lists() {
        let report = analyze_lists("just text");
        assert_eq!(report.ordered_items + report.unordered_items, 0);
        assert!(report.sequence.is_sequential);
    }
}
