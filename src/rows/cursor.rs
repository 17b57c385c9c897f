//! Mapping between paragraph positions and x coordinates within a row.

use super::horizontal::hfill_expansion;
use super::{BreakContext, Row, compute_row_metrics, label_sep_width, single_width};
use crate::paragraph::Paragraph;

/// Result of a hit test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorHit {
    /// Logical position of the cursor.
    pub pos: usize,
    /// X coordinate of the cursor.
    pub x: i32,
    /// The cursor sits at a direction switch, on the side of the previous
    /// character.
    pub boundary: bool,
}

/// Index of the row holding `pos`.
///
/// With `boundary` set, a position at the start of a row belongs to the
/// previous row (the cursor is drawn after the last character there).
#[must_use]
pub fn row_index(rows: &[Row], pos: usize, boundary: bool) -> usize {
    let mut idx = rows.len().saturating_sub(1);
    while idx > 0 && rows[idx].start > pos {
        idx -= 1;
    }
    if idx > 0 && boundary && rows[idx].start == pos {
        idx -= 1;
    }
    idx
}

/// Body position for cursor purposes: 0 when the label does not end with a
/// separator inside this row.
fn cursor_body_pos(par: &Paragraph, row: &Row) -> usize {
    let body_pos = par.begin_of_body();
    if body_pos > 0 && (body_pos > row.end || !par.is_line_separator(body_pos - 1)) {
        0
    } else {
        body_pos
    }
}

/// X coordinate of the cursor at `pos` in `row`.
///
/// With `boundary` set the cursor is drawn next to the character before
/// `pos` instead of the one at `pos`.
#[must_use]
pub fn cursor_x(par: &Paragraph, row: &Row, pos: usize, boundary: bool, ctx: &BreakContext<'_>) -> i32 {
    let boundary_correction = pos != 0 && boundary;
    let ppos = if boundary_correction { pos - 1 } else { pos };

    let bidi = par.bidi_table(row.start..row.end);
    let metrics = compute_row_metrics(par, row, ctx);
    let mut x = metrics.x;

    let cursor_vpos = if row.end <= row.start {
        row.start
    } else if ppos >= row.end {
        if par.is_rtl() { row.start } else { row.end }
    } else if bidi.is_rtl_at(ppos) {
        bidi.log2vis(ppos) + 1
    } else {
        bidi.log2vis(ppos)
    };

    let body_pos = cursor_body_pos(par, row);
    for vpos in row.start..cursor_vpos {
        let p = bidi.vis2log(vpos);
        if body_pos > 0 && p == body_pos - 1 {
            x += metrics.label_hfill + label_sep_width(par, ctx) as f32;
            if par.is_line_separator(body_pos - 1) {
                x -= single_width(par, body_pos - 1, ctx) as f32;
            }
        }
        x += single_width(par, p, ctx) as f32;
        if hfill_expansion(par, row, p) {
            x += if p >= body_pos { metrics.hfill } else { metrics.label_hfill };
        } else if par.is_separator(p) && p >= body_pos {
            x += metrics.separator;
        }
    }

    if boundary_correction && ppos < par.size() {
        let w = single_width(par, ppos, ctx) as f32;
        if bidi.is_rtl_at(ppos) { x -= w } else { x += w }
    }

    x as i32
}

/// Position in `row` nearest to the x coordinate `x`.
#[must_use]
pub fn column_near_x(par: &Paragraph, row: &Row, x: i32, ctx: &BreakContext<'_>) -> CursorHit {
    let metrics = compute_row_metrics(par, row, ctx);
    let mut tmpx = metrics.x;
    if row.is_empty() {
        return CursorHit {
            pos: row.start,
            x: tmpx as i32,
            boundary: false,
        };
    }

    let bidi = par.bidi_table(row.start..row.end);
    let end = row.end;
    let target = x as f32;
    let body_pos = cursor_body_pos(par, row);

    let mut vc = row.start;
    let mut last_tmpx = tmpx;
    while vc < end && tmpx <= target {
        let c = bidi.vis2log(vc);
        last_tmpx = tmpx;
        if body_pos > 0 && c == body_pos - 1 {
            tmpx += metrics.label_hfill + label_sep_width(par, ctx) as f32;
            if par.is_line_separator(body_pos - 1) {
                tmpx -= single_width(par, body_pos - 1, ctx) as f32;
            }
        }
        tmpx += single_width(par, c, ctx) as f32;
        if hfill_expansion(par, row, c) {
            tmpx += if c >= body_pos { metrics.hfill } else { metrics.label_hfill };
        } else if par.is_separator(c) && c >= body_pos {
            tmpx += metrics.separator;
        }
        vc += 1;
    }

    let mut left_side = false;
    if (tmpx + last_tmpx) / 2.0 > target {
        tmpx = last_tmpx;
        left_side = true;
    }

    let last_row = end == par.size();
    let rtl = last_row && par.is_rtl();
    let mut boundary = false;
    let mut c;
    if last_row
        && ((rtl && left_side && vc == row.start && target < tmpx - 5.0)
            || (!rtl && !left_side && vc == end && target > tmpx + 5.0))
    {
        c = end;
    } else if vc == row.start {
        c = bidi.vis2log(vc);
        if bidi.is_rtl_at(c) {
            c += 1;
        }
    } else {
        c = bidi.vis2log(vc - 1);
        if left_side == bidi.is_rtl_at(c) {
            c += 1;
            boundary = bidi.is_boundary(c, par.is_rtl());
        }
    }

    // The cursor never sits after a newline that ends its row.
    if c >= end && par.is_newline(end - 1) {
        let w = single_width(par, end - 1, ctx) as f32;
        if bidi.is_rtl_at(end - 1) { tmpx += w } else { tmpx -= w }
        c = end - 1;
    }

    CursorHit {
        pos: c,
        x: tmpx as i32,
        boundary,
    }
}
