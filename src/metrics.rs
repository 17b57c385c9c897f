//! Glyph measurement capability.
//!
//! Row breaking and row metrics never measure text themselves; they ask a
//! [`GlyphMetrics`] implementation. Hosts plug in their font backend.
//! [`MonospaceMetrics`] is a cell-grid implementation suitable for terminals
//! and tests.

use crate::font::Font;
use crate::unicode::{WidthMethod, char_columns, str_columns};

/// Glyph measurement provider.
///
/// All values are in device pixels.
pub trait GlyphMetrics {
    /// Advance width of `c` in `font`.
    fn width(&self, c: char, font: &Font) -> i32;

    /// Maximum ascent of `font`.
    fn max_ascent(&self, font: &Font) -> i32;

    /// Maximum descent of `font`.
    fn max_descent(&self, font: &Font) -> i32;

    /// Maximum height of `font`.
    fn max_height(&self, font: &Font) -> i32 {
        self.max_ascent(font) + self.max_descent(font)
    }

    /// Width of a string.
    fn string_width(&self, s: &str, font: &Font) -> i32 {
        s.chars().map(|c| self.width(c, font)).sum()
    }

    /// Width of a margin sample string; a leading `-` negates the width.
    fn signed_width(&self, s: &str, font: &Font) -> i32 {
        s.strip_prefix('-')
            .map_or_else(|| self.string_width(s, font), |rest| -self.string_width(rest, font))
    }
}

/// Fixed-cell glyph metrics.
///
/// Every column is `column_width` pixels wide at normal size; wide
/// characters take two columns and zero-width characters none. Values scale
/// with the font's point size relative to the normal size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonospaceMetrics {
    pub column_width: i32,
    pub ascent: i32,
    pub descent: i32,
    pub width_method: WidthMethod,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::terminal()
    }
}

impl MonospaceMetrics {
    /// Create metrics with the given cell geometry.
    #[must_use]
    pub const fn new(column_width: i32, ascent: i32, descent: i32) -> Self {
        Self {
            column_width,
            ascent,
            descent,
            width_method: WidthMethod::WcWidth,
        }
    }

    /// One pixel per column, one pixel of ascent, no descent.
    #[must_use]
    pub const fn terminal() -> Self {
        Self::new(1, 1, 0)
    }

    /// Use another ambiguous-width policy.
    #[must_use]
    pub const fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    fn scaled(value: i32, font: &Font) -> i32 {
        let points = font.size.points();
        if points == 10 {
            value
        } else {
            (value * points + 5) / 10
        }
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn width(&self, c: char, font: &Font) -> i32 {
        let columns = char_columns(c, self.width_method) as i32;
        columns * Self::scaled(self.column_width, font)
    }

    fn max_ascent(&self, font: &Font) -> i32 {
        Self::scaled(self.ascent, font)
    }

    fn max_descent(&self, font: &Font) -> i32 {
        Self::scaled(self.descent, font)
    }

    fn string_width(&self, s: &str, font: &Font) -> i32 {
        str_columns(s, self.width_method) as i32 * Self::scaled(self.column_width, font)
    }
}
