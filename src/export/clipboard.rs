//! Clipboard Operations
//!
//! Copies rendered HTML to the system clipboard using the arboard crate.
//! Where the platform supports a rich HTML flavour, apps like email clients
//! and word processors paste the formatted content; everywhere else the
//! plain-text fallback is used.

use crate::error::{Error, Result};
use arboard::Clipboard;
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern"))
}

/// Copy an HTML fragment to the clipboard.
///
/// The plain-text flavour is the fragment with its tags stripped and the
/// common entities decoded.
///
/// # Example
///
/// ```ignore
/// use markpad::export::copy_html_to_clipboard;
///
/// copy_html_to_clipboard(&markpad::convert("# Hello\n\n**Bold** text"))?;
/// ```
pub fn copy_html_to_clipboard(html: &str) -> Result<()> {
    copy_html_with_fallback(html, &html_to_plain_text(html))
}

/// Copy plain text to the clipboard.
pub fn copy_text_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    debug!("Copied {} bytes of text to clipboard", text.len());
    Ok(())
}

/// Copy HTML together with an explicit plain-text alternative.
pub fn copy_html_with_fallback(html: &str, plain_text: &str) -> Result<()> {
    let mut clipboard =
        Clipboard::new().map_err(|e| Error::Clipboard(format!("cannot open clipboard: {e}")))?;
    clipboard.set_html(html, Some(plain_text))?;
    debug!("Copied {} bytes of HTML to clipboard", html.len());
    Ok(())
}

/// Strip tags and decode the entities [`escape_html`](crate::markdown::escape_html) produces.
pub fn html_to_plain_text(html: &str) -> String {
    tag_regex()
        .replace_all(html, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
