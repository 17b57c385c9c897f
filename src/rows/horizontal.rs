//! Horizontal row metrics: start offset and stretch amounts.

use super::{BreakContext, Row, label_sep_width, single_width};
use crate::inset::DisplayMode;
use crate::layout::{Alignment, LabelType, MarginType};
use crate::paragraph::Paragraph;

/// How a row is positioned and stretched horizontally.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RowMetrics {
    /// X of the first visual position.
    pub x: f32,
    /// Extra width added to each interword space.
    pub separator: f32,
    /// Width of each expanded hfill in the body.
    pub hfill: f32,
    /// Width of each expanded hfill in the label.
    pub label_hfill: f32,
}

/// First position of `row` after any leading hfills, which never expand.
fn first_counted(par: &Paragraph, row: &Row) -> usize {
    let mut first = row.start;
    if first > 0 {
        while first < row.end && par.is_hfill(first) {
            first += 1;
        }
    }
    first
}

/// Number of hfills in the body part of `row`.
///
/// Hfills at the start of a continuation row and the last position of the
/// row are not counted.
#[must_use]
pub fn number_of_hfills(par: &Paragraph, row: &Row) -> usize {
    if row.is_empty() {
        return 0;
    }
    let last = row.end - 1;
    let first = first_counted(par, row).max(par.begin_of_body());
    (first..last).filter(|&p| par.is_hfill(p)).count()
}

/// Number of hfills in the label part of `row`.
#[must_use]
pub fn number_of_label_hfills(par: &Paragraph, row: &Row) -> usize {
    if row.is_empty() {
        return 0;
    }
    let last = (row.end - 1).min(par.begin_of_body());
    let first = first_counted(par, row);
    (first..last).filter(|&p| par.is_hfill(p)).count()
}

/// Number of stretchable interword spaces in the body part of `row`.
#[must_use]
pub fn number_of_separators(par: &Paragraph, row: &Row) -> usize {
    if row.is_empty() {
        return 0;
    }
    let first = row.start.max(par.begin_of_body());
    let last = row.end - 1;
    (first..last).filter(|&p| par.is_separator(p)).count()
}

/// Width missing from the label to reach the label width string.
#[must_use]
pub fn label_fill(par: &Paragraph, row: &Row, ctx: &BreakContext<'_>) -> i32 {
    let label_width = &par.params().label_width_string;
    if label_width.is_empty() {
        return 0;
    }
    let body = par.begin_of_body();
    let mut last = body.checked_sub(1);
    if let Some(pos) = last {
        if par.is_line_separator(pos) {
            last = pos.checked_sub(1);
        }
    }
    let used: i32 = match last {
        Some(last) if last >= row.start => (row.start..=last).map(|p| single_width(par, p, ctx)).sum(),
        _ => 0,
    };
    let wanted = ctx.metrics.string_width(label_width, &par.label_font());
    (wanted - used).max(0)
}

/// Compute the start offset and stretch amounts of `row`.
#[must_use]
pub fn compute_row_metrics(par: &Paragraph, row: &Row, ctx: &BreakContext<'_>) -> RowMetrics {
    let layout = par.layout();
    let rtl = par.is_rtl();
    let leftover = ctx.max_width - row.width;
    let mut result = RowMetrics {
        x: if rtl {
            ctx.margins.right_margin(par, ctx) as f32
        } else {
            ctx.margins.left_margin(par, row.start, ctx) as f32
        },
        ..RowMetrics::default()
    };

    if layout.margin_type == MarginType::Manual && layout.label_type == LabelType::Manual {
        let label_hfills = number_of_label_hfills(par, row) + usize::from(!par.is_empty());
        if label_hfills > 0 && !par.params().label_width_string.is_empty() {
            result.label_hfill = label_fill(par, row, ctx) as f32 / label_hfills as f32;
        }
    }

    let hfills = number_of_hfills(par, row);
    if hfills > 0 && leftover > 0 {
        result.hfill = leftover as f32 / hfills as f32;
    } else if row.width < ctx.max_width {
        let mut align = par.alignment();
        if let Some(inset) = par.inset(row.start) {
            match inset.display() {
                DisplayMode::AlignLeft => align = Alignment::Left,
                DisplayMode::AlignCenter => align = Alignment::Center,
                DisplayMode::AlignRight => align = Alignment::Right,
                DisplayMode::Inline => {}
            }
        }
        if rtl {
            align = match align {
                Alignment::Left => Alignment::Right,
                Alignment::Right => Alignment::Left,
                other => other,
            };
        }

        let w = leftover as f32;
        match align {
            Alignment::Block => {
                let separators = number_of_separators(par, row);
                let display_at_end = par.inset(row.end).is_some_and(|inset| inset.is_display());
                if separators > 0
                    && row.end < par.size()
                    && !par.is_newline(row.end - 1)
                    && !display_at_end
                {
                    result.separator = w / separators as f32;
                } else if rtl {
                    result.x += w;
                }
            }
            Alignment::Right => result.x += w,
            Alignment::Center => result.x += w / 2.0,
            Alignment::Left => {}
        }
    }

    let body_pos = par.begin_of_body();
    if rtl && body_pos > 0 && (body_pos > row.end || !par.is_line_separator(body_pos - 1)) {
        result.x += label_sep_width(par, ctx) as f32;
        if body_pos <= row.end {
            result.x += result.label_hfill;
        }
    }

    result
}

/// Check whether the hfill at `pos` expands in `row`.
///
/// Hfills only expand inside the row: a leading hfill of a continuation row
/// and the row's last position stay at their natural width. In the body of
/// a manual-label paragraph, hfills directly after the label do not expand.
#[must_use]
pub(crate) fn hfill_expansion(par: &Paragraph, row: &Row, pos: usize) -> bool {
    if !par.is_hfill(pos) || !row.contains(pos) || pos + 1 == row.end {
        return false;
    }
    if row.start > 0 && (row.start..=pos).all(|p| par.is_hfill(p)) {
        return false;
    }
    let body = par.begin_of_body();
    if body == 0 || pos < body {
        return true;
    }
    (body..pos).any(|p| !par.is_hfill(p))
}
