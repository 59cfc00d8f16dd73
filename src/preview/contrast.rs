//! Heading contrast marker
//!
//! Adds or removes the `contrasted-header` class on rendered `<h1>`…`<h6>`
//! opening tags. This works on finished HTML and never touches the Markdown
//! source or the conversion pipeline. Headings inside code blocks are escaped
//! by then (`&lt;h1&gt;`) and are not matched.

use regex::{Captures, NoExpand, Regex};
use std::sync::OnceLock;

/// Class applied to headings in high-contrast mode.
pub const CONTRAST_CLASS: &str = "contrasted-header";

fn heading_open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<h([1-6])((?:\s[^>]*)?)>").expect("heading tag pattern"))
}

fn class_attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\s+class="([^"]*)""#).expect("class attribute pattern"))
}

fn has_contrast_class(classes: &str) -> bool {
    classes.split_whitespace().any(|c| c == CONTRAST_CLASS)
}

/// Rewrite the attributes of every heading opening tag with `rewrite`.
fn rewrite_heading_attrs(html: &str, rewrite: impl Fn(&str) -> String) -> String {
    heading_open_regex()
        .replace_all(html, |caps: &Captures| {
            format!("<h{}{}>", &caps[1], rewrite(&caps[2]))
        })
        .into_owned()
}

/// Add the contrast class to every heading.
///
/// An existing `class` attribute is extended; a heading that already carries
/// the class is left alone, so applying twice changes nothing.
pub fn apply_heading_contrast(html: &str) -> String {
    rewrite_heading_attrs(html, |attrs| match class_attr_regex().captures(attrs) {
        Some(class) if has_contrast_class(&class[1]) => attrs.to_string(),
        Some(class) => {
            let existing = class[1].trim();
            let joined = if existing.is_empty() {
                CONTRAST_CLASS.to_string()
            } else {
                format!("{} {}", existing, CONTRAST_CLASS)
            };
            let replacement = format!(" class=\"{}\"", joined);
            class_attr_regex()
                .replacen(attrs, 1, NoExpand(&replacement))
                .into_owned()
        }
        None => format!("{} class=\"{}\"", attrs, CONTRAST_CLASS),
    })
}

/// Remove the contrast class from every heading.
///
/// Other classes are kept. A `class` attribute left empty is dropped.
pub fn remove_heading_contrast(html: &str) -> String {
    rewrite_heading_attrs(html, |attrs| match class_attr_regex().captures(attrs) {
        Some(class) if has_contrast_class(&class[1]) => {
            let remaining: Vec<&str> = class[1]
                .split_whitespace()
                .filter(|c| *c != CONTRAST_CLASS)
                .collect();
            let replacement = if remaining.is_empty() {
                String::new()
            } else {
                format!(" class=\"{}\"", remaining.join(" "))
            };
            class_attr_regex()
                .replacen(attrs, 1, NoExpand(&replacement))
                .into_owned()
        }
        _ => attrs.to_string(),
    })
}

/// Number of headings currently carrying the contrast class.
pub fn count_contrasted_headings(html: &str) -> usize {
    heading_open_regex()
        .captures_iter(html)
        .filter(|caps| {
            class_attr_regex()
                .captures(&caps[2])
                .is_some_and(|class| has_contrast_class(&class[1]))
        })
        .count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
