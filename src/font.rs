//! Font settings stored in a paragraph's font run table.
//!
//! A [`Font`] stored in a paragraph is an *override*: any field left at its
//! `Inherit` value takes the layout's value when the font is realized.
//!
//! # Examples
//!
//! ```
//! use paracore::{Font, FontSeries, FontSize};
//!
//! let bold = Font::INHERIT.with_series(FontSeries::Bold);
//! let base = Font::NORMAL;
//! let realized = bold.realize(&base);
//! assert_eq!(realized.series, FontSeries::Bold);
//! assert_eq!(realized.size, FontSize::Normal);
//! ```

use bitflags::bitflags;

bitflags! {
    /// Character decorations that are toggled independently of the face.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct FontAttributes: u8 {
        /// Emphasis.
        const EMPH      = 0x01;
        /// Underline.
        const UNDERLINE = 0x02;
        /// Noun style (small caps in most layouts).
        const NOUN      = 0x04;
        /// Strike-through, used to display tracked deletions.
        const STRIKEOUT = 0x08;
    }
}

/// Font family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    #[default]
    Inherit,
    Roman,
    Sans,
    Typewriter,
}

/// Font series (weight).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontSeries {
    #[default]
    Inherit,
    Medium,
    Bold,
}

/// Font shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontShape {
    #[default]
    Inherit,
    Upright,
    Italic,
    Slanted,
    SmallCaps,
}

/// Relative font size.
///
/// Variants are ordered from smallest to largest so sizes can be compared
/// with `max`. `Inherit` sorts below every concrete size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontSize {
    #[default]
    Inherit,
    Tiny,
    Script,
    Footnote,
    Small,
    Normal,
    Large,
    Larger,
    Largest,
    Huge,
    Huger,
}

impl FontSize {
    /// Nominal size in points.
    ///
    /// `Inherit` reports the normal size.
    #[must_use]
    pub const fn points(self) -> i32 {
        match self {
            Self::Tiny => 5,
            Self::Script => 7,
            Self::Footnote => 8,
            Self::Small => 9,
            Self::Inherit | Self::Normal => 10,
            Self::Large => 12,
            Self::Larger => 14,
            Self::Largest => 17,
            Self::Huge => 20,
            Self::Huger => 25,
        }
    }
}

/// Complete font setting.
///
/// Fonts are small `Copy` values compared field by field; two runs with equal
/// fonts are merged by the font run table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Font {
    pub family: FontFamily,
    pub series: FontSeries,
    pub shape: FontShape,
    pub size: FontSize,
    pub attributes: FontAttributes,
}

impl Font {
    /// Every field inherits from the layout.
    pub const INHERIT: Self = Self {
        family: FontFamily::Inherit,
        series: FontSeries::Inherit,
        shape: FontShape::Inherit,
        size: FontSize::Inherit,
        attributes: FontAttributes::empty(),
    };

    /// Fully specified default text font.
    pub const NORMAL: Self = Self {
        family: FontFamily::Roman,
        series: FontSeries::Medium,
        shape: FontShape::Upright,
        size: FontSize::Normal,
        attributes: FontAttributes::empty(),
    };

    /// Return a copy with another family.
    #[must_use]
    pub const fn with_family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }

    /// Return a copy with another series.
    #[must_use]
    pub const fn with_series(mut self, series: FontSeries) -> Self {
        self.series = series;
        self
    }

    /// Return a copy with another shape.
    #[must_use]
    pub const fn with_shape(mut self, shape: FontShape) -> Self {
        self.shape = shape;
        self
    }

    /// Return a copy with another size.
    #[must_use]
    pub const fn with_size(mut self, size: FontSize) -> Self {
        self.size = size;
        self
    }

    /// Return a copy with extra attributes set.
    #[must_use]
    pub const fn with_attributes(mut self, attributes: FontAttributes) -> Self {
        self.attributes = FontAttributes::from_bits_retain(
            self.attributes.bits() | attributes.bits(),
        );
        self
    }

    /// Check whether every face field is concrete.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.family != FontFamily::Inherit
            && self.series != FontSeries::Inherit
            && self.shape != FontShape::Inherit
            && self.size != FontSize::Inherit
    }

    /// Fill `Inherit` fields from `base`; attributes are OR-ed.
    #[must_use]
    pub fn realize(&self, base: &Self) -> Self {
        Self {
            family: if self.family == FontFamily::Inherit {
                base.family
            } else {
                self.family
            },
            series: if self.series == FontSeries::Inherit {
                base.series
            } else {
                self.series
            },
            shape: if self.shape == FontShape::Inherit {
                base.shape
            } else {
                self.shape
            },
            size: if self.size == FontSize::Inherit {
                base.size
            } else {
                self.size
            },
            attributes: self.attributes | base.attributes,
        }
    }
}
