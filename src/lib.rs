//! Markpad
//!
//! Converts a small, line-oriented subset of Markdown to HTML for live
//! preview: headings, bullet and numbered lists, bold and italic, fenced code
//! blocks with keyword highlighting, inline code, and one paragraph per line.
//!
//! ```ignore
//! let html = markpad::convert("# Hello\n\n- one\n- two");
//! assert_eq!(html, "<h1>Hello</h1>\n\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>");
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod markdown;
pub mod preview;
pub mod string_utils;

pub use error::{Error, Result};
pub use markdown::{analyze, convert, highlight, MarkdownConverter};
