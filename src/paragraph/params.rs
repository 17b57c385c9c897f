//! Per-paragraph layout parameters.

use crate::layout::Alignment;

/// Settings a paragraph carries on top of its layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphParams {
    /// Alignment override; `None` uses the layout's alignment.
    pub align: Option<Alignment>,
    /// Nesting depth.
    pub depth: u8,
    /// Line spacing override; `None` uses the document spacing.
    pub spacing: Option<f32>,
    /// Suppress the first-row paragraph indentation.
    pub noindent: bool,
    /// Extra left indentation in pixels.
    pub left_indent: Option<i32>,
    /// Sample text giving the width of the widest manual label in a list.
    pub label_width_string: String,
    /// Rendered label text (counters, static labels).
    pub label_string: String,
    /// The paragraph belongs to the appendix. Stored for the host, which
    /// numbers appendix labels; row layout only reads `start_of_appendix`.
    pub appendix: bool,
    /// The appendix starts at this paragraph.
    pub start_of_appendix: bool,
}

impl ParagraphParams {
    /// Set the alignment override.
    #[must_use]
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    /// Set the nesting depth.
    #[must_use]
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Set the label width sample string.
    #[must_use]
    pub fn with_label_width_string(mut self, sample: &str) -> Self {
        self.label_width_string = sample.to_string();
        self
    }

    /// Set the rendered label.
    #[must_use]
    pub fn with_label_string(mut self, label: &str) -> Self {
        self.label_string = label.to_string();
        self
    }
}
