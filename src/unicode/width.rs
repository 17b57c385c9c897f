//! Column widths of characters and strings.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Get the column width of a character.
///
/// Includes a fast path for printable ASCII, which is always one column.
/// Control characters and combining marks are zero columns wide.
#[inline]
#[must_use]
pub fn char_columns(c: char, method: WidthMethod) -> usize {
    if c.is_ascii() && (' '..='~').contains(&c) {
        return 1;
    }
    if c < ' ' {
        return 0;
    }
    match method {
        WidthMethod::WcWidth => UnicodeWidthChar::width(c).unwrap_or(0),
        WidthMethod::Unicode => UnicodeWidthChar::width_cjk(c).unwrap_or(0),
    }
}

/// Get the column width of a string, measured per grapheme cluster.
///
/// Measuring clusters instead of scalar values keeps emoji sequences and
/// base-plus-mark clusters at the width of their visible glyph.
#[must_use]
pub fn str_columns(s: &str, method: WidthMethod) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|b| (b' '..=b'~').contains(b)).count();
    }
    s.graphemes(true)
        .map(|g| match method {
            WidthMethod::WcWidth => UnicodeWidthStr::width(g),
            WidthMethod::Unicode => UnicodeWidthStr::width_cjk(g),
        })
        .sum()
}

/// Check if a character is wide (takes 2 columns).
#[must_use]
pub fn is_wide(c: char, method: WidthMethod) -> bool {
    char_columns(c, method) == 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(str_columns("hello", WidthMethod::WcWidth), 5);
        assert_eq!(char_columns('a', WidthMethod::WcWidth), 1);
        assert_eq!(char_columns('\t', WidthMethod::WcWidth), 0);
    }

    #[test]
    fn test_cjk_width() {
        assert_eq!(str_columns("漢字", WidthMethod::WcWidth), 4);
        assert!(is_wide('漢', WidthMethod::WcWidth));
    }

    #[test]
    fn test_combining_cluster_width() {
        assert_eq!(str_columns("e\u{0301}", WidthMethod::WcWidth), 1);
        assert_eq!(char_columns('\u{0301}', WidthMethod::WcWidth), 0);
    }

    #[test]
    fn test_width_methods() {
        // Circled digit one is ambiguous width.
        let ch = '①';
        assert_eq!(char_columns(ch, WidthMethod::WcWidth), 1);
        assert_eq!(char_columns(ch, WidthMethod::Unicode), 2);
    }
}
