//! Insets holding paragraphs of their own.

use super::{Dimension, Inset, MetricsRequest};
use crate::paragraph::{Change, Paragraph};
use crate::rows::{BreakContext, VerticalContext, build_rows};

/// Box of nested paragraphs, such as a footnote or a table cell.
///
/// The nested text is laid out at the width available to the enclosing
/// paragraph, or at a fixed width. The first row's baseline is the inset's
/// baseline.
#[derive(Clone, Debug, Default)]
pub struct TextInset {
    pub paragraphs: Vec<Paragraph>,
    /// Layout width; `None` uses the enclosing paragraph's width.
    pub fixed_width: Option<i32>,
}

impl TextInset {
    #[must_use]
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            fixed_width: None,
        }
    }

    /// Lay the nested text out at `width`.
    #[must_use]
    pub fn with_fixed_width(mut self, width: i32) -> Self {
        self.fixed_width = Some(width);
        self
    }
}

impl Inset for TextInset {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn dimension(&self, request: &MetricsRequest<'_>) -> Dimension {
        let width = self.fixed_width.unwrap_or(request.max_width);
        let ctx = BreakContext::new(request.metrics, width);

        let mut widest = 0;
        let mut height = 0;
        let mut ascent = None;
        for idx in 0..self.paragraphs.len() {
            let vctx = VerticalContext::for_index(&self.paragraphs, idx);
            for row in build_rows(&self.paragraphs[idx], &ctx, &vctx) {
                widest = widest.max(row.width);
                if ascent.is_none() {
                    ascent = Some(height + row.baseline);
                }
                height += row.height;
            }
        }

        let ascent = ascent.unwrap_or(0);
        let width = self.fixed_width.unwrap_or(widest);
        Dimension::new(width, ascent, height - ascent)
    }

    fn clone_inset(&self) -> Box<dyn Inset> {
        Box::new(self.clone())
    }

    fn accept_changes(&mut self) {
        for par in &mut self.paragraphs {
            par.accept_changes(0, par.size() + 1);
        }
    }

    fn reject_changes(&mut self) {
        for par in &mut self.paragraphs {
            par.reject_changes(0, par.size() + 1);
        }
    }

    fn set_change(&mut self, change: Change) {
        for par in &mut self.paragraphs {
            par.set_change_all(change);
        }
    }
}
