//! Leaf insets: forced breaks, fills, spaces, and opaque boxes.

use super::{Dimension, DisplayMode, Inset, MetricsRequest};
use crate::unicode::Direction;

/// Width of a horizontal fill before expansion.
const HFILL_WIDTH: i32 = 3;

/// Forced row break.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NewlineInset;

impl Inset for NewlineInset {
    fn name(&self) -> &'static str {
        "Newline"
    }

    fn dimension(&self, request: &MetricsRequest<'_>) -> Dimension {
        Dimension::new(
            request.metrics.width('n', &request.font),
            request.metrics.max_ascent(&request.font),
            request.metrics.max_descent(&request.font),
        )
    }

    fn is_newline(&self) -> bool {
        true
    }

    fn clone_inset(&self) -> Box<dyn Inset> {
        Box::new(*self)
    }
}

/// Horizontal fill absorbing leftover row width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HfillInset;

impl Inset for HfillInset {
    fn name(&self) -> &'static str {
        "Hfill"
    }

    fn dimension(&self, _request: &MetricsRequest<'_>) -> Dimension {
        Dimension::new(HFILL_WIDTH, 0, 0)
    }

    fn is_hfill(&self) -> bool {
        true
    }

    fn clone_inset(&self) -> Box<dyn Inset> {
        Box::new(*self)
    }
}

/// Kind of [`SpaceInset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpaceKind {
    /// Interword space that allows a break.
    #[default]
    Normal,
    /// Non-breaking space.
    Protected,
    /// Thin space, a third of an interword space.
    Thin,
    /// Space the width of an `M`.
    Quad,
}

/// Explicit space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpaceInset {
    pub kind: SpaceKind,
}

impl SpaceInset {
    #[must_use]
    pub const fn new(kind: SpaceKind) -> Self {
        Self { kind }
    }
}

impl Inset for SpaceInset {
    fn name(&self) -> &'static str {
        "Space"
    }

    fn dimension(&self, request: &MetricsRequest<'_>) -> Dimension {
        let metrics = request.metrics;
        let font = &request.font;
        let width = match self.kind {
            SpaceKind::Normal | SpaceKind::Protected => metrics.width(' ', font),
            SpaceKind::Thin => (metrics.width(' ', font) / 3).max(1),
            SpaceKind::Quad => metrics.width('M', font),
        };
        Dimension::new(width, metrics.max_ascent(font), metrics.max_descent(font))
    }

    fn is_line_separator(&self) -> bool {
        matches!(self.kind, SpaceKind::Normal | SpaceKind::Quad)
    }

    fn is_char(&self) -> bool {
        true
    }

    fn clone_inset(&self) -> Box<dyn Inset> {
        Box::new(*self)
    }
}

/// Opaque object of fixed size, such as an image or a formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoxInset {
    pub dimension: Dimension,
    pub display: DisplayMode,
    pub direction: Option<Direction>,
}

impl BoxInset {
    /// Inline box of the given size.
    #[must_use]
    pub const fn new(width: i32, ascent: i32, descent: i32) -> Self {
        Self {
            dimension: Dimension::new(width, ascent, descent),
            display: DisplayMode::Inline,
            direction: None,
        }
    }

    /// Put the box on a row of its own.
    #[must_use]
    pub const fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    /// Give the box a strong direction for bidi resolution.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
}

impl Inset for BoxInset {
    fn name(&self) -> &'static str {
        "Box"
    }

    fn dimension(&self, _request: &MetricsRequest<'_>) -> Dimension {
        self.dimension
    }

    fn display(&self) -> DisplayMode {
        self.display
    }

    fn direction(&self) -> Option<Direction> {
        self.direction
    }

    fn clone_inset(&self) -> Box<dyn Inset> {
        Box::new(*self)
    }
}
