//! Vertical row metrics: ascent, descent, and paragraph spacing.

use super::{BreakContext, Row};
use crate::font::Font;
use crate::layout::{Layout, ParagraphSeparation};
use crate::paragraph::Paragraph;

/// What row height computation needs to know about another paragraph.
#[derive(Clone, Copy, Debug)]
pub struct Neighbor<'a> {
    pub layout: &'a Layout,
    pub depth: u8,
    pub label_width_string: &'a str,
}

impl<'a> Neighbor<'a> {
    /// Describe `par`.
    #[must_use]
    pub fn of(par: &'a Paragraph) -> Self {
        Self {
            layout: par.layout(),
            depth: par.params().depth,
            label_width_string: &par.params().label_width_string,
        }
    }

    fn same_environment(&self, other: &Self) -> bool {
        self.layout == other.layout && self.label_width_string == other.label_width_string
    }
}

/// Position of a paragraph among its siblings.
///
/// The caller owning the paragraph list fills this in; a standalone
/// paragraph uses [`VerticalContext::default`].
#[derive(Clone, Copy, Debug)]
pub struct VerticalContext<'a> {
    /// The paragraph is the first of its text.
    pub is_first_paragraph: bool,
    /// The paragraph starts a run of paragraphs with the same layout.
    pub is_first_in_sequence: bool,
    /// The paragraph directly before.
    pub previous: Option<Neighbor<'a>>,
    /// The closest previous paragraph at the same depth.
    pub previous_same_depth: Option<Neighbor<'a>>,
    /// The paragraph this one is nested in.
    pub outer: Option<Neighbor<'a>>,
    /// The paragraph directly after.
    pub next: Option<Neighbor<'a>>,
    /// The closest previous paragraph at the depth of `next`.
    pub next_depth_hook: Option<Neighbor<'a>>,
}

impl Default for VerticalContext<'_> {
    fn default() -> Self {
        Self {
            is_first_paragraph: true,
            is_first_in_sequence: true,
            previous: None,
            previous_same_depth: None,
            outer: None,
            next: None,
            next_depth_hook: None,
        }
    }
}

impl<'a> VerticalContext<'a> {
    /// Context for paragraph `idx` of `pars`.
    #[must_use]
    pub fn for_index(pars: &'a [Paragraph], idx: usize) -> Self {
        let par = &pars[idx];
        let depth = par.params().depth;

        let previous = idx.checked_sub(1).map(|i| &pars[i]);
        let previous_same_depth = pars[..idx]
            .iter()
            .rev()
            .take_while(|p| p.params().depth >= depth)
            .find(|p| p.params().depth == depth)
            .map(Neighbor::of);
        let outer = pars[..idx]
            .iter()
            .rev()
            .find(|p| p.params().depth < depth)
            .map(Neighbor::of);
        let next = pars.get(idx + 1);
        let next_depth_hook = next.and_then(|next| {
            let target = next.params().depth;
            pars[..=idx]
                .iter()
                .rev()
                .take_while(|p| p.params().depth >= target)
                .find(|p| p.params().depth == target)
                .map(Neighbor::of)
        });
        let is_first_in_sequence = previous.is_none_or(|prev| {
            prev.layout() != par.layout() || prev.params().depth != depth
        });

        Self {
            is_first_paragraph: idx == 0,
            is_first_in_sequence,
            previous: previous.map(Neighbor::of),
            previous_same_depth,
            outer,
            next: next.map(Neighbor::of),
            next_depth_hook,
        }
    }
}

/// Fill in the vertical fields of `row`.
///
/// The row's own text sets the ascent and descent: the layout font at the
/// size of the row's first position, scaled by line spacing, widened by any
/// inset or larger font inside the row. The first row of a paragraph adds
/// the space above it (paragraph skip, label rows, environment separation),
/// the last row the space below it.
pub fn set_row_height(par: &Paragraph, row: &mut Row, ctx: &BreakContext<'_>, vctx: &VerticalContext<'_>) {
    let layout = par.layout();
    let params = par.params();
    let metrics = ctx.metrics;
    let doc = ctx.document;
    let me = Neighbor::of(par);

    let dh = (metrics.max_height(&Font::NORMAL) as f32 * 1.2).trunc();
    let spacing = params.spacing.unwrap_or(doc.spacing);
    let line_spacing = layout.spacing * spacing;

    let default_size = layout.font.size;
    let mut font = layout.font.with_size(par.font(row.start).size);
    let mut max_ascent = (metrics.max_ascent(&font) as f32 * line_spacing) as i32;
    let mut max_descent = (metrics.max_descent(&font) as f32 * line_spacing) as i32;

    for (pos, inset) in par.insets().iter_range(row.start, row.end) {
        let dim = inset.dimension(&ctx.inset_request(par.font(pos)));
        max_ascent = max_ascent.max(dim.ascent);
        max_descent = max_descent.max(dim.descent);
    }

    let max_size = par.highest_font_in_range(row.start..row.end, default_size);
    if max_size > font.size {
        font.size = max_size;
        max_ascent = max_ascent.max(metrics.max_ascent(&font));
        max_descent = max_descent.max(metrics.max_descent(&font));
    }

    max_ascent += 1;
    max_descent += 1;
    row.ascent = max_ascent;

    let mut label_addon = 0;
    let mut layout_ascent = 0.0_f32;
    let mut layout_descent = 0.0_f32;

    if row.start == 0 {
        let previous_is_plain = vctx
            .previous
            .is_some_and(|prev| prev.layout.is_paragraph() && prev.depth == 0);
        if doc.paragraph_separation == ParagraphSeparation::Skip
            && !vctx.is_first_paragraph
            && ((layout.is_paragraph() && params.depth == 0) || previous_is_plain)
        {
            max_ascent += doc.default_skip;
        }

        if params.start_of_appendix {
            max_ascent += (3.0 * dh) as i32;
        }

        let label_height = metrics.max_height(&par.label_font()) as f32;
        if layout.label_above && doc.numbering {
            label_addon = (label_height * line_spacing) as i32;
        }
        if layout.label_type.is_top_environment()
            && vctx.is_first_in_sequence
            && !params.label_string.is_empty()
        {
            label_addon =
                (label_height * line_spacing + (layout.topsep + layout.labelbottomsep) * dh) as i32;
        }

        let same_item = vctx
            .previous_same_depth
            .is_some_and(|prev| prev.same_environment(&me) && prev.depth == params.depth);
        if same_item {
            layout_ascent = layout.itemsep * dh;
        } else if !vctx.is_first_paragraph && layout.topsep > 0.0 {
            layout_ascent = layout.topsep * dh;
        }

        if let Some(outer) = vctx.outer {
            max_ascent += (outer.layout.parsep * dh) as i32;
        } else if let Some(prev) = vctx.previous {
            if prev.depth != 0 || prev.layout == layout {
                max_ascent += (layout.parsep * dh) as i32;
            }
        }
    }

    if row.end >= par.size() {
        if let Some(next) = vctx.next {
            if params.depth > next.depth {
                let usual = layout.bottomsep * dh;
                let hook = vctx.next_depth_hook.unwrap_or(me);
                let unusual = if hook.same_environment(&next) {
                    0.0
                } else {
                    hook.layout.bottomsep * dh
                };
                layout_descent = usual.max(unusual);
            } else if params.depth == next.depth && !me.same_environment(&next) {
                layout_descent = (layout.bottomsep * dh).trunc();
            }
        }
    }

    let depth_scale = 2.0 / (2.0 + f32::from(params.depth));
    max_ascent += (layout_ascent * depth_scale) as i32;
    max_descent += (layout_descent * depth_scale) as i32;

    row.height = max_ascent + max_descent + label_addon;
    row.baseline = max_ascent + label_addon;
    row.top_of_text = row.baseline - metrics.max_ascent(&font);
}
