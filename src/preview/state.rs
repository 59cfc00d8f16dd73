//! Preview state
//!
//! Everything the live-preview shell needs to remember between user actions:
//! the Markdown source, the current selection, the alternating format mode,
//! whether heading contrast is on, and the most recently displayed HTML.
//!
//! Display updates may be deferred by the shell (for a fade animation, say).
//! A render is therefore split into [`PreviewState::begin_render`], which
//! converts the source and hands out a numbered [`PendingRender`], and
//! [`PreviewState::complete_render`], which displays it. Only the newest
//! pending render is ever displayed; an older one that completes late is
//! discarded.

use super::contrast::{apply_heading_contrast, remove_heading_contrast};
use crate::config::Settings;
use crate::markdown::{apply_format, Diagnostics, FormatMode, FormatOutcome, MarkdownConverter};
use crate::string_utils::normalize_selection;
use log::debug;

/// Document loaded into a fresh editor.
pub const SAMPLE_DOCUMENT: &str = "# Main Title
## Secondary Subtitle
### Level 3 Title

This is a demonstration of the Markdown editor.

- First list item
- Second list item
- Third list item

#### Numbered List:
1. First element
2. Second element
3. Third element

##### More example titles
###### Smallest title

- Another list
- With more elements
- To try out the editor";

// ─────────────────────────────────────────────────────────────────────────────
// Pending Render
// ─────────────────────────────────────────────────────────────────────────────

/// A converted document waiting to be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRender {
    generation: u64,
    html: String,
}

impl PendingRender {
    /// Render number, increasing with every `begin_render`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Converted HTML, without the contrast marker.
    pub fn html(&self) -> &str {
        &self.html
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview State
// ─────────────────────────────────────────────────────────────────────────────

/// Editor shell state without any UI attached.
#[derive(Debug, Clone)]
pub struct PreviewState {
    converter: MarkdownConverter,
    /// Markdown source
    source: String,
    /// Selection as byte offsets, start <= end
    selection: (usize, usize),
    /// Mode for the next format action
    format_mode: FormatMode,
    /// Whether headings carry the contrast class
    contrast: bool,
    /// HTML currently on display
    html: String,
    /// Number of the latest render started
    generation: u64,
    /// Number of the render on display (0 before the first)
    displayed_generation: u64,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self::new(MarkdownConverter::default())
    }
}

impl PreviewState {
    /// Create an empty state that renders with `converter`.
    pub fn new(converter: MarkdownConverter) -> Self {
        Self {
            converter,
            source: String::new(),
            selection: (0, 0),
            format_mode: FormatMode::default(),
            contrast: false,
            html: String::new(),
            generation: 0,
            displayed_generation: 0,
        }
    }

    /// Create a state configured from user settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut state = Self::new(MarkdownConverter::from_settings(settings));
        state.contrast = settings.heading_contrast;
        state
    }

    /// Builder-style source replacement.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.set_source(source);
        self
    }

    /// Load [`SAMPLE_DOCUMENT`].
    pub fn with_sample(self) -> Self {
        self.with_source(SAMPLE_DOCUMENT)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Replace the source. The selection is clamped into the new text.
    ///
    /// The display is not updated until the next render.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.selection = normalize_selection(&self.source, self.selection.0, self.selection.1);
    }

    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    /// Set the selection; offsets are ordered, clamped and snapped to
    /// character boundaries.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = normalize_selection(&self.source, start, end);
    }

    /// The text currently selected.
    pub fn selected_text(&self) -> &str {
        &self.source[self.selection.0..self.selection.1]
    }

    pub fn format_mode(&self) -> FormatMode {
        self.format_mode
    }

    pub fn contrast_enabled(&self) -> bool {
        self.contrast
    }

    /// HTML on display.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Number of the latest render started.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a render has started that is not yet on display.
    pub fn is_processing(&self) -> bool {
        self.displayed_generation < self.generation
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Convert the current source. The result is not displayed yet.
    pub fn begin_render(&mut self) -> PendingRender {
        self.generation = self.generation.wrapping_add(1);
        PendingRender {
            generation: self.generation,
            html: self.converter.convert(&self.source),
        }
    }

    /// Display `pending` if it is the newest render started.
    ///
    /// Returns `false` and discards it when a newer render has begun since.
    /// The contrast marker is applied according to the flag at display time.
    pub fn complete_render(&mut self, pending: PendingRender) -> bool {
        if pending.generation != self.generation {
            debug!(
                "Discarding stale render {} (latest is {})",
                pending.generation, self.generation
            );
            return false;
        }
        self.html = if self.contrast {
            apply_heading_contrast(&pending.html)
        } else {
            pending.html
        };
        self.displayed_generation = pending.generation;
        true
    }

    /// Convert and display immediately.
    pub fn render(&mut self) -> &str {
        let pending = self.begin_render();
        self.complete_render(pending);
        &self.html
    }

    /// Flip heading contrast and update the displayed HTML in place.
    ///
    /// Returns the new state of the flag.
    pub fn toggle_contrast(&mut self) -> bool {
        self.contrast = !self.contrast;
        self.html = if self.contrast {
            apply_heading_contrast(&self.html)
        } else {
            remove_heading_contrast(&self.html)
        };
        debug!("Heading contrast {}", if self.contrast { "on" } else { "off" });
        self.contrast
    }

    /// Apply the current format mode to the selection and re-render.
    pub fn apply_format(&mut self) -> FormatOutcome {
        let outcome = apply_format(&self.source, self.selection, self.format_mode);
        self.source = outcome.text.clone();
        self.selection = outcome.selection.unwrap_or((outcome.cursor, outcome.cursor));
        self.format_mode = outcome.next_mode;
        self.render();
        outcome
    }

    /// Diagnostics for the current source.
    pub fn diagnostics(&self) -> Diagnostics {
        self.converter.analyze(&self.source)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
