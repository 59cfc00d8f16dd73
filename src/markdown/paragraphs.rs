//! Paragraph wrapping, the last pass of the pipeline.
//!
//! Every non-blank line that is not already block-level HTML becomes its own
//! `<p>` element. Consecutive text lines are not merged into one paragraph.

use super::code_blocks::is_block_placeholder;
use log::debug;

/// Tags whose opening or closing form marks a line as already block-level.
const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "ul", "ol", "li", "pre", "blockquote", "div", "hr",
    "table",
];

/// Whether `line` already starts with a block-level tag or code placeholder.
pub fn is_block_level(line: &str) -> bool {
    let trimmed = line.trim_start();
    if is_block_placeholder(trimmed) {
        return true;
    }

    let Some(tag) = trimmed.strip_prefix('<') else {
        return false;
    };
    let tag = tag.strip_prefix('/').unwrap_or(tag);
    let name_len = tag
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    let (name, after) = tag.split_at(name_len);

    let name_ends = after.is_empty() || after.starts_with(['>', '/', ' ', '\t']);
    name_ends && BLOCK_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name))
}

/// Wrap each remaining plain-text line in `<p>…</p>`.
pub fn wrap_paragraphs(text: &str) -> String {
    let mut count = 0;
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || is_block_level(trimmed) {
                line.to_string()
            } else {
                count += 1;
                format!("<p>{}</p>", trimmed)
            }
        })
        .collect();
    debug!("Wrapped {} paragraphs", count);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::code_blocks::{BLOCK_MARK, END_MARK, INLINE_MARK};

    #[test]
    fn test_plain_lines_each_wrapped() {
        assert_eq!(
            wrap_paragraphs("one\ntwo\n\nthree"),
            "<p>one</p>\n<p>two</p>\n\n<p>three</p>"
        );
    }

    #[test]
    fn test_blank_and_whitespace_lines_unchanged() {
        assert_eq!(wrap_paragraphs("\n   \n"), "\n   \n");
    }

    #[test]
    fn test_line_is_trimmed_inside_paragraph() {
        assert_eq!(wrap_paragraphs("  padded  "), "<p>padded</p>");
    }

    #[test]
    fn test_block_lines_untouched() {
        let text = "<h1>T</h1>\n<ul>\n<li>a</li>\n</ul>\n<p>done</p>\n<ol>\n</ol>";
        assert_eq!(wrap_paragraphs(text), text);
    }

    #[test]
    fn test_inline_tags_are_wrapped() {
        assert_eq!(
            wrap_paragraphs("<strong>b</strong> text"),
            "<p><strong>b</strong> text</p>"
        );
        assert_eq!(wrap_paragraphs("<em>i</em>"), "<p><em>i</em></p>");
    }

    #[test]
    fn test_tag_name_must_match_exactly() {
        assert!(!is_block_level("<pre-release> notes"));
        assert!(!is_block_level("<param>"));
        assert!(!is_block_level("<h7>"));
        assert!(is_block_level("<PRE>"));
        assert!(is_block_level("<hr/>"));
        assert!(is_block_level("<div class=\"x\">"));
        assert!(is_block_level("</blockquote>"));
    }

    #[test]
    fn test_placeholders() {
        let block = format!("{}0{}", BLOCK_MARK, END_MARK);
        let inline = format!("{}0{} tail", INLINE_MARK, END_MARK);
        assert_eq!(wrap_paragraphs(&block), block);
        assert_eq!(wrap_paragraphs(&inline), format!("<p>{}</p>", inline));
    }
}
