//! Layout descriptors and document-wide settings.
//!
//! A [`Layout`] is the read-only description of a paragraph style as loaded
//! from a document class: alignment, margin and label kinds, fonts, and the
//! vertical spacing coefficients. Loading layouts from files is the host's
//! job; this module only models the values.
//!
//! # Examples
//!
//! ```
//! use paracore::{Alignment, LabelType, Layout, MarginType};
//!
//! let description = Layout::builder("Description")
//!     .align(Alignment::Block)
//!     .margin_type(MarginType::Manual)
//!     .label_type(LabelType::Manual)
//!     .label_sep("xx")
//!     .itemsep(0.4)
//!     .build();
//! assert_eq!(description.name, "Description");
//! assert_eq!(description.label_type, LabelType::Manual);
//! ```

use crate::font::{Font, FontSeries};

/// Horizontal alignment of a paragraph's rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Justified: leftover space is spread over the row's separators.
    #[default]
    Block,
    Left,
    Right,
    Center,
}

/// How the left margin of a paragraph is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MarginType {
    /// Margin grows with the width of the paragraph's label.
    Dynamic,
    /// Manual label whose width comes from the label width string.
    Manual,
    /// Fixed margin scaled by depth.
    #[default]
    Static,
    /// Dynamic on the first row only.
    FirstDynamic,
    /// Address box flushed to the right margin.
    RightAddressBox,
}

/// Kind of label a layout carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LabelType {
    #[default]
    NoLabel,
    /// The first word of the paragraph is the label.
    Manual,
    /// Fixed label text.
    Static,
    /// Label produced by a counter.
    Counter,
    /// Label printed above the environment.
    TopEnvironment,
    /// Centered label printed above the environment.
    CenteredTopEnvironment,
    /// Bibliography item label.
    Bibliography,
}

impl LabelType {
    /// Check whether the label sits on a row of its own above the text.
    #[must_use]
    pub const fn is_top_environment(self) -> bool {
        matches!(
            self,
            Self::TopEnvironment | Self::CenteredTopEnvironment | Self::Bibliography
        )
    }
}

/// Structural role of a layout in the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Plain body paragraph.
    #[default]
    Paragraph,
    /// Heading-like command.
    Command,
    /// Nestable environment.
    Environment,
    /// Environment whose paragraphs are items.
    ItemEnvironment,
}

/// Paragraph style descriptor.
///
/// Margin strings (`left_margin`, `label_indent`, ...) are measured with the
/// glyph metrics provider, the same way a document class expresses margins
/// as sample text such as `"MMMM"`. Spacing coefficients are multiples of the
/// default row height.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub name: String,
    pub kind: LayoutKind,
    pub align: Alignment,
    pub margin_type: MarginType,
    pub label_type: LabelType,
    /// Text font. Expected to be fully resolved.
    pub font: Font,
    /// Font of the label region. Expected to be fully resolved.
    pub label_font: Font,
    pub left_margin: String,
    pub right_margin: String,
    pub label_indent: String,
    pub label_sep: String,
    pub par_indent: String,
    /// Line spacing multiplier.
    pub spacing: f32,
    pub parsep: f32,
    pub topsep: f32,
    pub bottomsep: f32,
    pub itemsep: f32,
    pub labelbottomsep: f32,
    /// The label occupies an extra row above the text (chapter headings).
    pub label_above: bool,
    /// Whitespace is kept verbatim.
    pub free_spacing: bool,
    /// Empty paragraphs are kept instead of being removed; see
    /// [`Paragraph::allow_empty`](crate::Paragraph::allow_empty).
    pub keep_empty: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            name: "Standard".to_string(),
            kind: LayoutKind::Paragraph,
            align: Alignment::Block,
            margin_type: MarginType::Static,
            label_type: LabelType::NoLabel,
            font: Font::NORMAL,
            label_font: Font::NORMAL,
            left_margin: String::new(),
            right_margin: String::new(),
            label_indent: String::new(),
            label_sep: " ".to_string(),
            par_indent: String::new(),
            spacing: 1.0,
            parsep: 0.0,
            topsep: 0.0,
            bottomsep: 0.0,
            itemsep: 0.0,
            labelbottomsep: 0.0,
            label_above: false,
            free_spacing: false,
            keep_empty: false,
        }
    }
}

impl Layout {
    /// Start building a layout with the given name.
    #[must_use]
    pub fn builder(name: &str) -> LayoutBuilder {
        LayoutBuilder {
            layout: Self {
                name: name.to_string(),
                ..Self::default()
            },
        }
    }

    /// The plain body-text layout.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// A manual-label list layout in the style of a description list.
    #[must_use]
    pub fn description() -> Self {
        Self::builder("Description")
            .kind(LayoutKind::ItemEnvironment)
            .margin_type(MarginType::Manual)
            .label_type(LabelType::Manual)
            .label_font(Font::NORMAL.with_series(FontSeries::Bold))
            .label_sep("xx")
            .left_margin("MM")
            .itemsep(0.4)
            .topsep(0.7)
            .bottomsep(0.7)
            .build()
    }

    /// Check whether the layout lays out its label manually.
    #[must_use]
    pub fn has_manual_label(&self) -> bool {
        self.label_type == LabelType::Manual
    }

    /// Check whether this is a plain body paragraph layout.
    #[must_use]
    pub fn is_paragraph(&self) -> bool {
        self.kind == LayoutKind::Paragraph
    }
}

/// Fluent builder for [`Layout`].
#[derive(Clone, Debug)]
pub struct LayoutBuilder {
    layout: Layout,
}

impl LayoutBuilder {
    #[must_use]
    pub fn kind(mut self, kind: LayoutKind) -> Self {
        self.layout.kind = kind;
        self
    }

    #[must_use]
    pub fn align(mut self, align: Alignment) -> Self {
        self.layout.align = align;
        self
    }

    #[must_use]
    pub fn margin_type(mut self, margin_type: MarginType) -> Self {
        self.layout.margin_type = margin_type;
        self
    }

    #[must_use]
    pub fn label_type(mut self, label_type: LabelType) -> Self {
        self.layout.label_type = label_type;
        self
    }

    #[must_use]
    pub fn font(mut self, font: Font) -> Self {
        self.layout.font = font;
        self
    }

    #[must_use]
    pub fn label_font(mut self, font: Font) -> Self {
        self.layout.label_font = font;
        self
    }

    #[must_use]
    pub fn left_margin(mut self, margin: &str) -> Self {
        self.layout.left_margin = margin.to_string();
        self
    }

    #[must_use]
    pub fn right_margin(mut self, margin: &str) -> Self {
        self.layout.right_margin = margin.to_string();
        self
    }

    #[must_use]
    pub fn label_indent(mut self, indent: &str) -> Self {
        self.layout.label_indent = indent.to_string();
        self
    }

    #[must_use]
    pub fn label_sep(mut self, sep: &str) -> Self {
        self.layout.label_sep = sep.to_string();
        self
    }

    #[must_use]
    pub fn par_indent(mut self, indent: &str) -> Self {
        self.layout.par_indent = indent.to_string();
        self
    }

    #[must_use]
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.layout.spacing = spacing;
        self
    }

    #[must_use]
    pub fn parsep(mut self, value: f32) -> Self {
        self.layout.parsep = value;
        self
    }

    #[must_use]
    pub fn topsep(mut self, value: f32) -> Self {
        self.layout.topsep = value;
        self
    }

    #[must_use]
    pub fn bottomsep(mut self, value: f32) -> Self {
        self.layout.bottomsep = value;
        self
    }

    #[must_use]
    pub fn itemsep(mut self, value: f32) -> Self {
        self.layout.itemsep = value;
        self
    }

    #[must_use]
    pub fn labelbottomsep(mut self, value: f32) -> Self {
        self.layout.labelbottomsep = value;
        self
    }

    #[must_use]
    pub fn label_above(mut self, enabled: bool) -> Self {
        self.layout.label_above = enabled;
        self
    }

    #[must_use]
    pub fn free_spacing(mut self, enabled: bool) -> Self {
        self.layout.free_spacing = enabled;
        self
    }

    #[must_use]
    pub fn keep_empty(mut self, enabled: bool) -> Self {
        self.layout.keep_empty = enabled;
        self
    }

    /// Finish the layout.
    #[must_use]
    pub fn build(self) -> Layout {
        self.layout
    }
}

/// How consecutive paragraphs are separated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParagraphSeparation {
    /// First rows are indented.
    #[default]
    Indent,
    /// A vertical skip is inserted between paragraphs.
    Skip,
}

/// Document-wide settings that influence row metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentSettings {
    pub paragraph_separation: ParagraphSeparation,
    /// Skip in pixels used with [`ParagraphSeparation::Skip`].
    pub default_skip: i32,
    /// Document line spacing, used when a paragraph has no own spacing.
    pub spacing: f32,
    /// Section numbering is enabled (label rows above chapter headings).
    pub numbering: bool,
    /// Page margin sample text on the left.
    pub left_margin: String,
    /// Page margin sample text on the right.
    pub right_margin: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            paragraph_separation: ParagraphSeparation::Indent,
            default_skip: 0,
            spacing: 1.0,
            numbering: true,
            left_margin: String::new(),
            right_margin: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let layout = Layout::builder("Itemize")
            .margin_type(MarginType::Dynamic)
            .label_type(LabelType::Counter)
            .itemsep(0.3)
            .build();
        assert_eq!(layout.name, "Itemize");
        assert_eq!(layout.margin_type, MarginType::Dynamic);
        assert!((layout.itemsep - 0.3).abs() < f32::EPSILON);
        assert_eq!(layout.label_sep, " ");
        assert!(!layout.has_manual_label());
    }

    #[test]
    fn test_description_is_manual() {
        let layout = Layout::description();
        assert!(layout.has_manual_label());
        assert_eq!(layout.margin_type, MarginType::Manual);
        assert!(!layout.is_paragraph());
        assert!(Layout::standard().is_paragraph());
    }

    #[test]
    fn test_top_environment_labels() {
        assert!(LabelType::TopEnvironment.is_top_environment());
        assert!(LabelType::Bibliography.is_top_environment());
        assert!(!LabelType::Counter.is_top_environment());
    }
}
