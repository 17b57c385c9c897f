//! Embedded objects.
//!
//! An inset occupies exactly one position of a paragraph. The paragraph only
//! stores a sentinel unit at that position; the object itself lives in the
//! paragraph's [`InsetTable`]. Row breaking and row metrics talk to insets
//! through the [`Inset`] trait and never look at concrete types.

mod basic;
mod table;
mod text;

pub use basic::{BoxInset, HfillInset, NewlineInset, SpaceInset, SpaceKind};
pub use table::InsetTable;
pub use text::TextInset;

use std::fmt;

use crate::font::Font;
use crate::metrics::GlyphMetrics;
use crate::paragraph::Change;
use crate::unicode::Direction;

/// Measured size of an inset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimension {
    pub width: i32,
    pub ascent: i32,
    pub descent: i32,
}

impl Dimension {
    #[must_use]
    pub const fn new(width: i32, ascent: i32, descent: i32) -> Self {
        Self {
            width,
            ascent,
            descent,
        }
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.ascent + self.descent
    }
}

/// How an inset sits in the flow of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// Flows with the surrounding text.
    #[default]
    Inline,
    /// On a row of its own, flush left.
    AlignLeft,
    /// On a row of its own, centered.
    AlignCenter,
    /// On a row of its own, flush right.
    AlignRight,
}

/// Everything an inset needs to measure itself.
#[derive(Clone, Copy)]
pub struct MetricsRequest<'a> {
    pub metrics: &'a dyn GlyphMetrics,
    /// Realized font at the inset's position.
    pub font: Font,
    /// Width available to the enclosing paragraph.
    pub max_width: i32,
}

impl fmt::Debug for MetricsRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricsRequest")
            .field("font", &self.font)
            .field("max_width", &self.max_width)
            .finish_non_exhaustive()
    }
}

/// Capability set of an embedded object.
pub trait Inset: fmt::Debug {
    /// Short type name for diagnostics.
    fn name(&self) -> &'static str;

    /// Measure the inset.
    fn dimension(&self, request: &MetricsRequest<'_>) -> Dimension;

    /// Width of the inset.
    fn width(&self, request: &MetricsRequest<'_>) -> i32 {
        self.dimension(request).width
    }

    /// A row may break after this inset.
    fn is_line_separator(&self) -> bool {
        false
    }

    /// Absorbs leftover row width.
    fn is_hfill(&self) -> bool {
        false
    }

    /// Forces a row break after itself.
    fn is_newline(&self) -> bool {
        false
    }

    /// Placement relative to the text flow.
    fn display(&self) -> DisplayMode {
        DisplayMode::Inline
    }

    /// Sits on a row of its own.
    fn is_display(&self) -> bool {
        self.display() != DisplayMode::Inline
    }

    /// Behaves like a character for row breaking.
    fn is_char(&self) -> bool {
        false
    }

    /// Strong direction the inset contributes to bidi resolution.
    fn direction(&self) -> Option<Direction> {
        None
    }

    /// Deep copy.
    fn clone_inset(&self) -> Box<dyn Inset>;

    /// Accept every tracked change inside the inset.
    fn accept_changes(&mut self) {}

    /// Reject every tracked change inside the inset.
    fn reject_changes(&mut self) {}

    /// Mark the whole content of the inset with `change`.
    fn set_change(&mut self, _change: Change) {}
}

impl Clone for Box<dyn Inset> {
    fn clone(&self) -> Self {
        self.clone_inset()
    }
}
