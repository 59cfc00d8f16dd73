//! Inline emphasis: `**bold**` and `*italic*`.
//!
//! Each line is scanned twice. The bold pass finds `**…**` spans first; the
//! italic pass then runs separately over every stretch of text between and
//! inside those spans. Because italic never crosses a `<strong>` boundary the
//! output is always properly nested.

use log::debug;

/// Convert bold and italic spans on every line of `text`.
pub fn convert_emphasis(text: &str) -> String {
    let lines: Vec<String> = text.split('\n').map(convert_line).collect();
    debug!("Applied emphasis to {} lines", lines.len());
    lines.join("\n")
}

/// Convert a single line. Bold runs before italic.
pub fn convert_line(line: &str) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len());
    let mut text_start = 0;
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'*' {
            if let Some(close) = find_bold_close(line, i + 2) {
                italicize(line, text_start, i, &mut out);
                out.push_str("<strong>");
                italicize(line, i + 2, close, &mut out);
                out.push_str("</strong>");
                i = close + 2;
                text_start = i;
                continue;
            }
        }
        i += 1;
    }

    italicize(line, text_start, line.len(), &mut out);
    out
}

/// Offset of the `**` closing a bold span whose content starts at `from`.
///
/// The content must be at least one character long, so the search skips the
/// first character.
fn find_bold_close(line: &str, from: usize) -> Option<usize> {
    let rest = &line[from..];
    rest.char_indices()
        .skip(1)
        .find(|&(p, _)| rest[p..].starts_with("**"))
        .map(|(p, _)| from + p)
}

/// Append `line[from..to]` to `out`, converting italic spans.
///
/// A `*` only opens or closes an italic span when it does not touch another
/// `*`. Adjacency is checked against the whole line, so the delimiters of a
/// neighbouring bold span count too. The content may not contain `*`.
fn italicize(line: &str, from: usize, to: usize, out: &mut String) {
    let bytes = line.as_bytes();
    let is_star = |i: usize| bytes.get(i) == Some(&b'*');
    let mut start = from;
    let mut i = from;

    while i < to {
        let opens = bytes[i] == b'*'
            && !(i > 0 && is_star(i - 1))
            && i + 1 < to
            && !is_star(i + 1);
        if opens {
            if let Some(p) = line[i + 1..to].find('*') {
                let close = i + 1 + p;
                if !is_star(close + 1) {
                    out.push_str(&line[start..i]);
                    out.push_str("<em>");
                    out.push_str(&line[i + 1..close]);
                    out.push_str("</em>");
                    i = close + 1;
                    start = i;
                    continue;
                }
            }
        }
        i += 1;
    }

    out.push_str(&line[start..to]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            convert_line("**bold** and *italic*"),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn test_bold_is_not_read_as_italic() {
        assert_eq!(convert_line("**x**"), "<strong>x</strong>");
    }

    #[test]
    fn test_italic_inside_bold() {
        assert_eq!(
            convert_line("**a *b* c**"),
            "<strong>a <em>b</em> c</strong>"
        );
    }

    #[test]
    fn test_unmatched_single_asterisk_stays_literal() {
        assert_eq!(convert_line("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(convert_line("trailing*"), "trailing*");
    }

    #[test]
    fn test_unmatched_double_asterisk_stays_literal() {
        assert_eq!(convert_line("**open only"), "**open only");
    }

    #[test]
    fn test_empty_delimiters_stay_literal() {
        assert_eq!(convert_line("****"), "****");
        assert_eq!(convert_line("**"), "**");
        assert_eq!(convert_line("*"), "*");
    }

    #[test]
    fn test_triple_asterisks() {
        // Bold takes the outer pair; the leftover stars touch other stars
        assert_eq!(convert_line("***both***"), "<strong>*both</strong>*");
    }

    #[test]
    fn test_italic_may_not_touch_bold_delimiter() {
        assert_eq!(convert_line("**a***b*"), "<strong>a</strong>*b*");
    }

    #[test]
    fn test_italic_around_bold_is_not_merged() {
        // Italic never crosses a <strong> boundary
        assert_eq!(convert_line("*a **b** c*"), "*a <strong>b</strong> c*");
    }

    #[test]
    fn test_intraword_italic() {
        assert_eq!(convert_line("a*b*c"), "a<em>b</em>c");
    }

    #[test]
    fn test_spans_do_not_cross_lines() {
        assert_eq!(convert_emphasis("*open\nclose*"), "*open\nclose*");
        assert_eq!(
            convert_emphasis("*a*\n**b**"),
            "<em>a</em>\n<strong>b</strong>"
        );
    }

    #[test]
    fn test_multibyte_content() {
        assert_eq!(convert_line("**ø** *你好*"), "<strong>ø</strong> <em>你好</em>");
    }
}
