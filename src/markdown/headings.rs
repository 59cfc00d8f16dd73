//! Heading conversion (`#` through `######`).

use log::debug;

/// Deepest heading level.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Heading level of `line`, if it is a heading.
///
/// Marker lengths are tried longest first, so `### x` is level 3 and never a
/// level-1 heading whose text starts with `##`. The marker must start the
/// line and be followed by at least one space or tab; seven or more `#` is
/// not a heading.
pub fn heading_level(line: &str) -> Option<(usize, &str)> {
    (1..=MAX_HEADING_LEVEL).rev().find_map(|level| {
        let marker = "#".repeat(level);
        let rest = line.strip_prefix(marker.as_str())?;
        if !rest.starts_with([' ', '\t']) {
            return None;
        }
        Some((level, rest.trim()))
    })
}

/// Rewrite every heading line in `text` as `<hN>…</hN>`.
pub fn convert_headings(text: &str) -> String {
    let mut count = 0;
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| match heading_level(line) {
            Some((level, content)) => {
                count += 1;
                format!("<h{level}>{content}</h{level}>")
            }
            None => line.to_string(),
        })
        .collect();
    debug!("Converted {} headings", count);
    lines.join("\n")
}
