//! Left and right margins of rows.

use super::{BreakContext, single_width};
use crate::layout::{Alignment, LabelType, MarginType, ParagraphSeparation};
use crate::paragraph::Paragraph;

/// Sample text measured per nesting level.
const DEPTH_INDENT: &str = "MM";

/// Margin provider consulted by row breaking and row metrics.
pub trait Margins {
    /// Left margin of the row starting at `pos`.
    fn left_margin(&self, par: &Paragraph, pos: usize, ctx: &BreakContext<'_>) -> i32;

    /// Right margin of every row of `par`.
    fn right_margin(&self, par: &Paragraph, ctx: &BreakContext<'_>) -> i32;
}

/// Margins derived from the paragraph's layout and the document settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutMargins;

impl LayoutMargins {
    /// Width of the widest newline-delimited line of `par`.
    fn widest_line(par: &Paragraph, ctx: &BreakContext<'_>) -> i32 {
        let mut widest = 0;
        let mut current = 0;
        for pos in 0..par.size() {
            if par.is_newline(pos) {
                widest = widest.max(current);
                current = 0;
            } else {
                current += single_width(par, pos, ctx);
            }
        }
        widest.max(current)
    }
}

impl Margins for LayoutMargins {
    fn left_margin(&self, par: &Paragraph, pos: usize, ctx: &BreakContext<'_>) -> i32 {
        let layout = par.layout();
        let params = par.params();
        let metrics = ctx.metrics;
        let text_font = &layout.font;
        let label_font = par.label_font();
        let depth = i32::from(params.depth);

        let mut left = metrics.signed_width(&ctx.document.left_margin, text_font);
        left += depth * metrics.signed_width(DEPTH_INDENT, text_font);

        match layout.margin_type {
            MarginType::Dynamic => {
                left += metrics.signed_width(&layout.left_margin, text_font);
                if !params.label_string.is_empty() {
                    left += metrics.signed_width(&layout.label_indent, &label_font);
                    left += metrics.string_width(&params.label_string, &label_font);
                    left += metrics.string_width(&layout.label_sep, &label_font);
                }
            }
            MarginType::Manual => {
                left += metrics.signed_width(&layout.label_indent, &label_font);
                if !par.is_empty()
                    && pos >= par.begin_of_body()
                    && !params.label_width_string.is_empty()
                {
                    left += metrics.string_width(&params.label_width_string, &label_font);
                    left += metrics.string_width(&layout.label_sep, &label_font);
                }
            }
            MarginType::Static => {
                left += metrics.signed_width(&layout.left_margin, text_font) * 4 / (depth + 4);
            }
            MarginType::FirstDynamic => {
                if layout.has_manual_label() {
                    if pos >= par.begin_of_body() {
                        left += metrics.signed_width(&layout.left_margin, &label_font);
                    } else {
                        left += metrics.signed_width(&layout.label_indent, &label_font);
                    }
                } else if pos != 0 {
                    left += metrics.signed_width(&layout.left_margin, &label_font);
                } else if !layout.label_type.is_top_environment() {
                    left += metrics.signed_width(&layout.label_indent, &label_font);
                    left += metrics.string_width(&layout.label_sep, &label_font);
                    left += metrics.string_width(&params.label_string, &label_font);
                }
            }
            MarginType::RightAddressBox => {
                left += metrics.signed_width(&layout.left_margin, text_font);
                let fill = ctx.max_width - self.right_margin(par, ctx) - left - Self::widest_line(par, ctx);
                left += fill.max(0);
            }
        }

        if let Some(indent) = params.left_indent {
            left += indent;
        }

        let display_first = par.inset(0).is_some_and(|inset| inset.is_display());
        if pos == 0
            && matches!(
                layout.label_type,
                LabelType::NoLabel | LabelType::TopEnvironment | LabelType::CenteredTopEnvironment
            )
            && par.alignment() == Alignment::Block
            && !params.noindent
            && !display_first
            && ctx.document.paragraph_separation == ParagraphSeparation::Indent
        {
            left += metrics.signed_width(&layout.par_indent, text_font);
        }

        left
    }

    fn right_margin(&self, par: &Paragraph, ctx: &BreakContext<'_>) -> i32 {
        let layout = par.layout();
        let depth = i32::from(par.params().depth);
        ctx.metrics.signed_width(&ctx.document.right_margin, &layout.font)
            + ctx.metrics.signed_width(&layout.right_margin, &layout.font) * 4 / (depth + 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DocumentSettings, Layout};
    use crate::metrics::MonospaceMetrics;
    use std::sync::Arc;

    fn layout_par(layout: Layout, text: &str) -> Paragraph {
        Paragraph::with_text(Arc::new(layout), text)
    }

    #[test]
    fn test_static_margin_scales_with_depth() {
        let metrics = MonospaceMetrics::terminal();
        let ctx = BreakContext::new(&metrics, 80);
        let layout = Layout::builder("Quote").left_margin("MMMM").right_margin("MM").build();
        let mut par = layout_par(layout, "text");
        assert_eq!(LayoutMargins.left_margin(&par, 0, &ctx), 4);
        assert_eq!(LayoutMargins.right_margin(&par, &ctx), 2);
        par.params_mut().depth = 4;
        // Nesting indent of 4 * 2 plus 4 * 4 / 8.
        assert_eq!(LayoutMargins.left_margin(&par, 0, &ctx), 10);
        assert_eq!(LayoutMargins.right_margin(&par, &ctx), 1);
    }

    #[test]
    fn test_par_indent_on_first_row_only() {
        let metrics = MonospaceMetrics::terminal();
        let ctx = BreakContext::new(&metrics, 80);
        let layout = Layout::builder("Standard").par_indent("MMM").build();
        let mut par = layout_par(layout, "some text");
        assert_eq!(LayoutMargins.left_margin(&par, 0, &ctx), 3);
        assert_eq!(LayoutMargins.left_margin(&par, 5, &ctx), 0);
        par.params_mut().noindent = true;
        assert_eq!(LayoutMargins.left_margin(&par, 0, &ctx), 0);

        let skip = DocumentSettings {
            paragraph_separation: ParagraphSeparation::Skip,
            ..DocumentSettings::default()
        };
        par.params_mut().noindent = false;
        let ctx = ctx.with_document(&skip);
        assert_eq!(LayoutMargins.left_margin(&par, 0, &ctx), 0);
    }

    #[test]
    fn test_manual_margin_uses_label_width_string() {
        let metrics = MonospaceMetrics::terminal();
        let ctx = BreakContext::new(&metrics, 80);
        let mut par = layout_par(Layout::description(), "Term body");
        assert_eq!(LayoutMargins.left_margin(&par, 0, &ctx), 0);
        par.params_mut().label_width_string = "WWWWWW".to_string();
        // Label width 6 plus the two-column label separator.
        assert_eq!(LayoutMargins.left_margin(&par, 5, &ctx), 8);
        assert_eq!(LayoutMargins.left_margin(&par, 0, &ctx), 0);
    }

    #[test]
    fn test_dynamic_margin_grows_with_label() {
        let metrics = MonospaceMetrics::terminal();
        let ctx = BreakContext::new(&metrics, 80);
        let layout = Layout::builder("Enumerate")
            .margin_type(MarginType::Dynamic)
            .label_type(LabelType::Counter)
            .left_margin("MM")
            .build();
        let mut par = layout_par(layout, "item");
        assert_eq!(LayoutMargins.left_margin(&par, 0, &ctx), 2);
        par.params_mut().label_string = "10.".to_string();
        assert_eq!(LayoutMargins.left_margin(&par, 0, &ctx), 6);
    }

    #[test]
    fn test_address_box_is_flush_right() {
        let metrics = MonospaceMetrics::terminal();
        let ctx = BreakContext::new(&metrics, 20);
        let layout = Layout::builder("Address")
            .margin_type(MarginType::RightAddressBox)
            .build();
        let par = layout_par(layout, "Main St 1\nTown");
        assert_eq!(LayoutMargins.left_margin(&par, 0, &ctx), 11);
    }
}
