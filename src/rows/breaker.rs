//! Greedy row breaking.

use super::{BreakContext, Row, label_end, label_sep_width, single_width};
use crate::event::{LogLevel, emit_log_with};
use crate::layout::MarginType;
use crate::paragraph::Paragraph;

/// Splits a paragraph into rows that fit the text width.
///
/// Rows break after the last line separator that fits, after forced
/// newlines, and around display insets. A word wider than the whole row is
/// split where it overflows.
#[derive(Clone, Copy, Debug)]
pub struct RowBreaker<'p, 'c> {
    par: &'p Paragraph,
    ctx: &'c BreakContext<'c>,
}

impl<'p, 'c> RowBreaker<'p, 'c> {
    #[must_use]
    pub const fn new(par: &'p Paragraph, ctx: &'c BreakContext<'c>) -> Self {
        Self { par, ctx }
    }

    fn width_at(&self, pos: usize) -> i32 {
        single_width(self.par, pos, self.ctx)
    }

    /// End position (exclusive) of the row starting at `pos`.
    #[must_use]
    pub fn break_point(&self, pos: usize) -> usize {
        let par = self.par;
        let ctx = self.ctx;
        let end = par.size();
        if pos >= end {
            return end;
        }

        let width = ctx.max_width - ctx.margins.right_margin(par, ctx);
        if width <= 0 {
            emit_log_with(LogLevel::Debug, || {
                format!(
                    "no room for text at width {}: row from {pos} takes the rest of the paragraph",
                    ctx.max_width
                )
            });
            return end;
        }

        if par.layout().margin_type == MarginType::RightAddressBox {
            return (pos..end)
                .find(|&i| par.is_newline(i))
                .map_or(end, |i| i + 1);
        }

        let body_pos = par.begin_of_body();
        let left = ctx.margins.left_margin(par, pos, ctx);
        let mut x = left;
        let mut chunk_width = 0;
        let mut point = end;

        let mut i = pos;
        while i < end {
            let mut this_width = self.width_at(i);
            if body_pos > 0 && i == body_pos {
                let mut add = label_sep_width(par, ctx);
                if par.is_line_separator(i - 1) {
                    add -= self.width_at(i - 1);
                }
                add = add.max(label_end(par, ctx) - x);
                this_width += add;
            }

            x += this_width;
            chunk_width += this_width;

            if x >= width {
                if point == end || chunk_width >= width - left {
                    point = if i > pos { i } else { i + 1 };
                    emit_log_with(LogLevel::Debug, || {
                        format!("forced break at {point}: no separator fits in {width}")
                    });
                }
                break;
            }

            if par.is_newline(i) {
                point = i + 1;
                break;
            }

            if i + 1 < end {
                let next_display = par.inset(i + 1).is_some_and(|inset| inset.is_display());
                let this_display = par.inset(i).is_some_and(|inset| inset.is_display());
                if next_display || this_display {
                    point = i + 1;
                    break;
                }
            }

            if par.inset(i).is_none_or(|inset| inset.is_char()) && par.is_line_separator(i) {
                point = i + 1;
                chunk_width = 0;
            }

            i += 1;
        }

        if i == end && x < width {
            point = end;
        }

        // A row never starts with a character that composes onto the
        // previous one.
        while point > pos && point < end && par.is_compose(point) {
            point += 1;
        }

        if body_pos > 0 && point < body_pos {
            point = body_pos;
        }

        point
    }

    /// Natural width of the row `[start, end)`, margins included.
    #[must_use]
    pub fn row_width(&self, start: usize, end: usize) -> i32 {
        let par = self.par;
        let ctx = self.ctx;
        let body_pos = par.begin_of_body();
        let label_end = label_end(par, ctx);

        let mut w = ctx.margins.left_margin(par, start, ctx);
        for i in start..end {
            if body_pos > 0 && i == body_pos {
                w += label_sep_width(par, ctx);
                if par.is_line_separator(i - 1) {
                    w -= self.width_at(i - 1);
                }
                w = w.max(label_end);
            }
            w += self.width_at(i);
        }
        if body_pos > 0 && body_pos >= end {
            w += label_sep_width(par, ctx);
            if end > 0 && par.is_line_separator(end - 1) {
                w -= self.width_at(end - 1);
            }
            w = w.max(label_end);
        }
        w + ctx.margins.right_margin(par, ctx)
    }

    /// Break the whole paragraph into rows with their natural widths.
    ///
    /// An empty paragraph yields one empty row. A paragraph ending in a
    /// newline gets an extra empty row holding the newline position, so the
    /// cursor after it has a row of its own.
    #[must_use]
    pub fn break_rows(&self) -> Vec<Row> {
        let size = self.par.size();
        let mut rows = Vec::new();
        let mut pos = 0;
        loop {
            let end = self.break_point(pos);
            let mut row = Row::new(pos, end);
            row.width = self.row_width(pos, end);
            rows.push(row);
            pos = end;
            if pos >= size {
                break;
            }
        }
        if pos > 0 && self.par.is_newline(pos - 1) {
            let mut row = Row::new(pos - 1, pos - 1);
            row.width = self.row_width(pos - 1, pos - 1);
            rows.push(row);
        }
        rows
    }
}
