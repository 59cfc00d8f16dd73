//! HTML entity escaping for code content.

/// Escape the five HTML-sensitive characters.
///
/// `&` is replaced first so the entities produced for the other characters
/// are not escaped a second time.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
