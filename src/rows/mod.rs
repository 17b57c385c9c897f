//! Row breaking and row metrics.
//!
//! A paragraph is laid out as a sequence of [`Row`]s. [`RowBreaker`] picks
//! the break points greedily, [`compute_row_metrics`] distributes leftover
//! width for alignment, and [`set_row_height`] stacks the vertical space of
//! each row. [`build_rows`] runs the three passes for a whole paragraph.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use paracore::{BreakContext, Layout, MonospaceMetrics, Paragraph, RowBreaker};
//!
//! let par = Paragraph::with_text(Arc::new(Layout::standard()), "The quick brown fox");
//! let metrics = MonospaceMetrics::terminal();
//! let ctx = BreakContext::new(&metrics, 12);
//! let rows = RowBreaker::new(&par, &ctx).break_rows();
//! let spans: Vec<_> = rows.iter().map(|row| (row.start, row.end)).collect();
//! assert_eq!(spans, vec![(0, 10), (10, 19)]);
//! ```

// Pixel arithmetic mixes i32 widths with f32 spacing coefficients
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]

mod breaker;
mod cursor;
mod horizontal;
mod margins;
mod vertical;

pub use breaker::RowBreaker;
pub use cursor::{CursorHit, column_near_x, cursor_x, row_index};
pub use horizontal::{
    RowMetrics, compute_row_metrics, label_fill, number_of_hfills, number_of_label_hfills,
    number_of_separators,
};
pub use margins::{LayoutMargins, Margins};
pub use vertical::{Neighbor, VerticalContext, set_row_height};

use std::fmt;

use crate::font::Font;
use crate::inset::MetricsRequest;
use crate::layout::{DocumentSettings, MarginType, ParagraphSeparation};
use crate::metrics::GlyphMetrics;
use crate::paragraph::{Paragraph, Unit};

/// One laid-out row covering `[start, end)`.
///
/// Vertical fields are zero until [`set_row_height`] ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Row {
    pub start: usize,
    pub end: usize,
    /// Natural width including both margins.
    pub width: i32,
    pub height: i32,
    /// Ascent of the text itself, without paragraph spacing.
    pub ascent: i32,
    /// Distance from the top of the row to the baseline.
    pub baseline: i32,
    /// Distance from the top of the row to the top of the text.
    pub top_of_text: i32,
    /// Offset of the row's top from the paragraph's top.
    pub y_offset: i32,
}

impl Row {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            width: 0,
            height: 0,
            ascent: 0,
            baseline: 0,
            top_of_text: 0,
            y_offset: 0,
        }
    }

    /// Number of positions in the row.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub const fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }
}

static DEFAULT_DOCUMENT: DocumentSettings = DocumentSettings {
    paragraph_separation: ParagraphSeparation::Indent,
    default_skip: 0,
    spacing: 1.0,
    numbering: true,
    left_margin: String::new(),
    right_margin: String::new(),
};

/// Inputs shared by every row computation of a paragraph.
#[derive(Clone, Copy)]
pub struct BreakContext<'a> {
    pub metrics: &'a dyn GlyphMetrics,
    pub margins: &'a dyn Margins,
    pub document: &'a DocumentSettings,
    /// Text width in pixels, margins included.
    pub max_width: i32,
}

impl fmt::Debug for BreakContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakContext")
            .field("document", self.document)
            .field("max_width", &self.max_width)
            .finish_non_exhaustive()
    }
}

impl<'a> BreakContext<'a> {
    /// Context with layout-driven margins and default document settings.
    #[must_use]
    pub fn new(metrics: &'a dyn GlyphMetrics, max_width: i32) -> Self {
        Self {
            metrics,
            margins: &LayoutMargins,
            document: &DEFAULT_DOCUMENT,
            max_width,
        }
    }

    /// Use another margin provider.
    #[must_use]
    pub fn with_margins(mut self, margins: &'a dyn Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Use other document settings.
    #[must_use]
    pub fn with_document(mut self, document: &'a DocumentSettings) -> Self {
        self.document = document;
        self
    }

    /// Use another text width.
    #[must_use]
    pub const fn with_max_width(mut self, max_width: i32) -> Self {
        self.max_width = max_width;
        self
    }

    pub(crate) fn inset_request(&self, font: Font) -> MetricsRequest<'a> {
        MetricsRequest {
            metrics: self.metrics,
            font,
            max_width: self.max_width,
        }
    }
}

/// Width of the unit at `pos`.
///
/// Compose characters are drawn over their base and take no width.
pub(crate) fn single_width(par: &Paragraph, pos: usize, ctx: &BreakContext<'_>) -> i32 {
    if par.is_compose(pos) {
        return 0;
    }
    match par.unit_at(pos) {
        Unit::Char(c) => ctx.metrics.width(c, &par.font(pos)),
        Unit::Inset => par
            .inset(pos)
            .map_or(0, |inset| inset.width(&ctx.inset_request(par.font(pos)))),
    }
}

/// Width of the layout's label separator in the label font.
pub(crate) fn label_sep_width(par: &Paragraph, ctx: &BreakContext<'_>) -> i32 {
    ctx.metrics
        .string_width(&par.layout().label_sep, &par.label_font())
}

/// Minimum x at which the body of a manual-margin paragraph starts.
pub(crate) fn label_end(par: &Paragraph, ctx: &BreakContext<'_>) -> i32 {
    if par.layout().margin_type == MarginType::Manual {
        ctx.margins.left_margin(par, par.size(), ctx)
    } else {
        0
    }
}

/// Break, measure, and stack the rows of `par`.
///
/// Emits nothing and caches nothing; see [`Paragraph::layout_rows`] for the
/// cached entry point.
#[must_use]
pub fn build_rows(par: &Paragraph, ctx: &BreakContext<'_>, vctx: &VerticalContext<'_>) -> Vec<Row> {
    let mut rows = RowBreaker::new(par, ctx).break_rows();
    let mut y = 0;
    for row in &mut rows {
        set_row_height(par, row, ctx, vctx);
        row.y_offset = y;
        y += row.height;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::metrics::MonospaceMetrics;
    use std::sync::Arc;

    #[test]
    fn test_row_accessors() {
        let row = Row::new(3, 7);
        assert_eq!(row.len(), 4);
        assert!(row.contains(3));
        assert!(!row.contains(7));
        assert!(Row::new(5, 5).is_empty());
    }

    #[test]
    fn test_single_width_skips_compose() {
        let par = Paragraph::with_text(Arc::new(Layout::standard()), "e\u{0301}x");
        let metrics = MonospaceMetrics::new(7, 8, 2);
        let ctx = BreakContext::new(&metrics, 100);
        assert_eq!(single_width(&par, 0, &ctx), 7);
        assert_eq!(single_width(&par, 1, &ctx), 0);
        assert_eq!(single_width(&par, 2, &ctx), 7);
    }

    #[test]
    fn test_build_rows_stacks_offsets() {
        let par = Paragraph::with_text(Arc::new(Layout::standard()), "aaa bbb ccc");
        let metrics = MonospaceMetrics::terminal();
        let ctx = BreakContext::new(&metrics, 5);
        let rows = build_rows(&par, &ctx, &VerticalContext::default());
        assert_eq!(rows.len(), 3);
        let mut y = 0;
        for row in &rows {
            assert_eq!(row.y_offset, y);
            assert!(row.height > 0);
            y += row.height;
        }
    }
}
