//! Live preview support
//!
//! The heading contrast marker applied to rendered HTML, and the state the
//! preview shell keeps between renders.

mod contrast;
mod state;

pub use contrast::{
    apply_heading_contrast, count_contrasted_headings, remove_heading_contrast, CONTRAST_CLASS,
};
pub use state::{PendingRender, PreviewState, SAMPLE_DOCUMENT};
