//! UTF-8 Safe String Utilities
//!
//! Selection offsets handed in by an editor surface are byte offsets that may
//! land inside a multi-byte character (`ø`, `中`, `🎉`). Slicing at such an
//! offset panics, so every offset is snapped to a character boundary first.
//!
//! The module also carries the small line-level normalisations the conversion
//! pipeline performs at its boundary.

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundary Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the largest index `<= index` that lies on a character boundary.
///
/// Indices past the end clamp to `s.len()`.
#[inline]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Returns the smallest index `>= index` that lies on a character boundary.
///
/// Indices past the end clamp to `s.len()`.
#[inline]
pub fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Order and snap a selection so that `text[start..end]` is always valid.
///
/// The start is floored and the end is ceiled, so a selection that cuts a
/// character in half grows to include the whole character.
pub fn normalize_selection(text: &str, start: usize, end: usize) -> (usize, usize) {
    let (start, end) = if start > end { (end, start) } else { (start, end) };
    (
        floor_char_boundary(text, start),
        ceil_char_boundary(text, end),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Line Normalisation
// ─────────────────────────────────────────────────────────────────────────────

/// Convert `\r\n` and lone `\r` line breaks to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Replace every tab with `width` spaces.
pub fn expand_tabs(text: &str, width: usize) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    text.replace('\t', &" ".repeat(width))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
