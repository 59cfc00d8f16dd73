//! Document export
//!
//! - `html.rs` - standalone HTML documents with the preview stylesheet
//! - `clipboard.rs` - copying rendered HTML to the system clipboard

pub mod clipboard;
pub mod html;

pub use clipboard::copy_html_to_clipboard;
pub use html::{export_to_html_file, generate_html_document};
