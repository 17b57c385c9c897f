//! Detection of characters that compose onto a preceding base character.
//!
//! Combining marks (Hebrew points, Arabic harakat, Latin accents written in
//! decomposed form) are drawn together with the character before them. Row
//! breaking charges them no width and never starts a row with one.

use unicode_normalization::char::is_combining_mark;

/// Check whether `c` composes onto the preceding character.
#[must_use]
pub fn is_compose_char(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    is_combining_mark(c) || matches!(c, '\u{200C}' | '\u{200D}')
}
