//! Standalone HTML Documents
//!
//! Wraps a rendered HTML fragment in a complete HTML5 document with the
//! preview stylesheet inlined, so the output can be opened directly in a
//! browser.

use crate::error::{Error, Result};
use crate::markdown::{escape_html, MarkdownConverter};
use crate::preview::apply_heading_contrast;
use log::info;
use std::fs;
use std::path::Path;

/// Title used when none is given.
pub const DEFAULT_TITLE: &str = "Markdown Preview";

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Wrap `body_html` in a complete HTML document.
///
/// The body is inserted as is; the title is escaped.
pub fn generate_html_document(body_html: &str, title: Option<&str>) -> String {
    let title = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TITLE);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="markpad">
    <title>{title}</title>
    <style>
{base_css}
{highlight_css}
{contrast_css}
    </style>
</head>
<body>
    <article class="markdown-body">
{body}
    </article>
</body>
</html>
"#,
        title = escape_html(title),
        base_css = BASE_CSS,
        highlight_css = HIGHLIGHT_CSS,
        contrast_css = CONTRAST_CSS,
        body = body_html,
    )
}

/// Convert a Markdown file and write it as a standalone HTML file.
///
/// The title defaults to the source file name without extension.
pub fn export_to_html_file(
    converter: &MarkdownConverter,
    source_path: &Path,
    output_path: &Path,
    contrast: bool,
) -> Result<()> {
    let markdown = fs::read_to_string(source_path)
        .map_err(|e| Error::from_read(Some(source_path.to_path_buf()), e))?;

    let title = source_path.file_stem().and_then(|s| s.to_str());

    let mut body = converter.convert(&markdown);
    if contrast {
        body = apply_heading_contrast(&body);
    }
    let html = generate_html_document(&body, title);

    fs::write(output_path, html).map_err(|e| Error::FileWrite {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    info!(
        "Exported {} to {}",
        source_path.display(),
        output_path.display()
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS
// ─────────────────────────────────────────────────────────────────────────────

/// Layout and typography for the elements the converter emits.
const BASE_CSS: &str = r#"
*, *::before, *::after {
    box-sizing: border-box;
}

body {
    margin: 0;
    padding: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
    color: #24292f;
    background: #ffffff;
}

.markdown-body {
    max-width: 900px;
    margin: 0 auto;
    padding: 32px 24px;
}

.markdown-body h1,
.markdown-body h2,
.markdown-body h3,
.markdown-body h4,
.markdown-body h5,
.markdown-body h6 {
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 600;
    line-height: 1.25;
}

.markdown-body h1 { font-size: 2em; border-bottom: 1px solid #d0d7de; padding-bottom: 0.3em; }
.markdown-body h2 { font-size: 1.5em; border-bottom: 1px solid #d0d7de; padding-bottom: 0.3em; }
.markdown-body h3 { font-size: 1.25em; }
.markdown-body h4 { font-size: 1em; }
.markdown-body h5 { font-size: 0.875em; }
.markdown-body h6 { font-size: 0.85em; }

.markdown-body p {
    margin-top: 0;
    margin-bottom: 16px;
}

.markdown-body ul,
.markdown-body ol {
    margin-top: 0;
    margin-bottom: 16px;
    padding-left: 2em;
}

.markdown-body li + li {
    margin-top: 4px;
}

.markdown-body code {
    font-family: 'JetBrains Mono', 'Fira Code', 'Consolas', 'Monaco', monospace;
    font-size: 0.9em;
}

.markdown-body code.inline-code {
    padding: 0.2em 0.4em;
    border-radius: 4px;
    background: rgba(175, 184, 193, 0.2);
}

.markdown-body pre {
    margin-top: 0;
    margin-bottom: 16px;
    padding: 16px;
    overflow: auto;
    border-radius: 6px;
    line-height: 1.45;
    background: #f6f8fa;
}

.markdown-body pre code {
    padding: 0;
    background: transparent;
    font-size: 0.875em;
}
"#;

/// Colours for the highlighter's token classes.
const HIGHLIGHT_CSS: &str = r#"
.highlight-keyword { color: #cf222e; font-weight: 600; }
.highlight-string { color: #0a3069; }
.highlight-comment { color: #6e7781; font-style: italic; }
.highlight-number { color: #0550ae; }
.highlight-function { color: #8250df; }
"#;

/// High-contrast heading style.
const CONTRAST_CSS: &str = r#"
.markdown-body .contrasted-header {
    color: #ffffff;
    background: #1f2328;
    padding: 0.2em 0.4em;
    border-radius: 4px;
    border-bottom: none;
}
"#;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
