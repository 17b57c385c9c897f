//! Bidirectional (BiDi) reordering for a single row.
//!
//! A [`BidiTable`] is derived from the logical content of one row. It holds
//! the embedding level of every position and the logical/visual
//! permutations, resolved with the Unicode Bidirectional Algorithm (UAX #9)
//! including the line-level rule L1 and reordering rule L2.
//!
//! Rows with a left-to-right base and no right-to-left material take a fast
//! path: the table is the identity and every level is zero.

use std::ops::Range;
use unicode_bidi::{BidiClass, BidiInfo, Level};

/// Base paragraph direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
    /// No strong direction could be determined.
    Neutral,
}

/// Detect the direction of the first strong character.
pub fn detect_base_direction(chars: impl IntoIterator<Item = char>) -> Direction {
    for ch in chars {
        match unicode_bidi::bidi_class(ch) {
            BidiClass::L => return Direction::Ltr,
            BidiClass::R | BidiClass::AL => return Direction::Rtl,
            _ => {}
        }
    }
    Direction::Neutral
}

/// Placeholder character standing for an inset in the bidi input.
///
/// The placeholder carries the inset's declared direction into the
/// algorithm: a strong mark for insets with a direction, an object
/// replacement character (a neutral) otherwise.
#[must_use]
pub const fn inset_placeholder(direction: Option<Direction>) -> char {
    match direction {
        Some(Direction::Ltr) => '\u{200E}',
        Some(Direction::Rtl) => '\u{200F}',
        Some(Direction::Neutral) | None => '\u{FFFC}',
    }
}

fn needs_reordering(c: char) -> bool {
    matches!(
        unicode_bidi::bidi_class(c),
        BidiClass::R
            | BidiClass::AL
            | BidiClass::AN
            | BidiClass::RLE
            | BidiClass::RLO
            | BidiClass::RLI
            | BidiClass::LRE
            | BidiClass::LRO
            | BidiClass::LRI
            | BidiClass::FSI
    )
}

/// Per-row logical/visual position mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidiTable {
    start: usize,
    end: usize,
    same_direction: bool,
    /// Embedding level per logical position, relative to `start`.
    levels: Vec<u8>,
    /// Visual position for each logical position, relative to `start`.
    log2vis: Vec<usize>,
    /// Logical position for each visual position, relative to `start`.
    vis2log: Vec<usize>,
}

impl BidiTable {
    /// Identity table for `range`: every position is LTR at level 0.
    #[must_use]
    pub fn identity(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
            same_direction: true,
            levels: Vec::new(),
            log2vis: Vec::new(),
            vis2log: Vec::new(),
        }
    }

    /// Resolve the table for a row whose first position is `start`.
    ///
    /// `chars` holds one character per logical position (insets replaced by
    /// [`inset_placeholder`]). `base` is the paragraph direction.
    #[must_use]
    pub fn from_chars(start: usize, chars: &[char], base: Direction) -> Self {
        let end = start + chars.len();
        let rtl_base = base == Direction::Rtl;
        if chars.is_empty() || (!rtl_base && !chars.iter().copied().any(needs_reordering)) {
            return Self::identity(start..end);
        }

        let text: String = chars.iter().collect();
        let base_level = if rtl_base { Level::rtl() } else { Level::ltr() };
        let info = BidiInfo::new(&text, Some(base_level));

        let mut levels: Vec<Level> = Vec::with_capacity(chars.len());
        for para in &info.paragraphs {
            levels.extend(info.reordered_levels_per_char(para, para.range.clone()));
        }
        levels.resize(chars.len(), base_level);

        let vis2log = BidiInfo::reorder_visual(&levels);
        let mut log2vis = vec![0; vis2log.len()];
        for (vpos, &lpos) in vis2log.iter().enumerate() {
            log2vis[lpos] = vpos;
        }

        let levels: Vec<u8> = levels.iter().map(|l| l.number()).collect();
        let same_direction = !rtl_base && levels.iter().all(|&l| l == 0);

        Self {
            start,
            end,
            same_direction,
            levels,
            log2vis,
            vis2log,
        }
    }

    /// First logical position covered.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last logical position covered.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Check whether `pos` is covered by this table.
    #[must_use]
    pub fn in_range(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Check whether the row needs no reordering at all.
    #[must_use]
    pub fn is_same_direction(&self) -> bool {
        self.same_direction
    }

    /// Embedding level of logical position `pos`.
    ///
    /// Positions outside the row report level 0.
    #[must_use]
    pub fn level(&self, pos: usize) -> u8 {
        if self.same_direction || !self.in_range(pos) {
            return 0;
        }
        self.levels[pos - self.start]
    }

    /// Check whether `pos` is laid out right-to-left.
    #[must_use]
    pub fn is_rtl_at(&self, pos: usize) -> bool {
        self.level(pos) % 2 == 1
    }

    /// Visual position of logical position `pos`.
    #[must_use]
    pub fn log2vis(&self, pos: usize) -> usize {
        if self.same_direction || !self.in_range(pos) {
            return pos;
        }
        self.start + self.log2vis[pos - self.start]
    }

    /// Logical position displayed at visual position `vpos`.
    #[must_use]
    pub fn vis2log(&self, vpos: usize) -> usize {
        if self.same_direction || !self.in_range(vpos) {
            return vpos;
        }
        self.start + self.vis2log[vpos - self.start]
    }

    /// Check whether `pos` sits on a direction switch.
    ///
    /// The direction of `pos - 1` is compared with the direction of `pos`;
    /// past the end of the row the paragraph direction stands in for `pos`.
    /// A cursor at a boundary has two visual locations.
    #[must_use]
    pub fn is_boundary(&self, pos: usize, paragraph_rtl: bool) -> bool {
        if pos == 0 || !self.in_range(pos - 1) {
            return false;
        }
        let before = self.is_rtl_at(pos - 1);
        let after = if self.in_range(pos) {
            self.is_rtl_at(pos)
        } else {
            paragraph_rtl
        };
        before != after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_detect_base_direction() {
        assert_eq!(detect_base_direction("Hello".chars()), Direction::Ltr);
        assert_eq!(detect_base_direction("12 שלום".chars()), Direction::Rtl);
        assert_eq!(detect_base_direction("123".chars()), Direction::Neutral);
    }

    #[test]
    fn test_pure_ltr_is_identity() {
        let table = BidiTable::from_chars(4, &chars("hello"), Direction::Ltr);
        assert!(table.is_same_direction());
        assert_eq!(table.log2vis(6), 6);
        assert_eq!(table.vis2log(8), 8);
        assert_eq!(table.level(5), 0);
        assert!(!table.is_boundary(6, false));
    }

    #[test]
    fn test_pure_rtl_is_reversed() {
        let table = BidiTable::from_chars(0, &chars("שלום"), Direction::Rtl);
        assert!(!table.is_same_direction());
        assert_eq!(table.vis2log(0), 3);
        assert_eq!(table.vis2log(3), 0);
        assert_eq!(table.log2vis(1), 2);
        assert!((0..4).all(|p| table.level(p) == 1));
    }

    #[test]
    fn test_mixed_row_mapping_is_permutation() {
        let text = chars("ab שלום cd");
        let table = BidiTable::from_chars(10, &text, Direction::Ltr);
        let mut seen: Vec<usize> = (10..10 + text.len()).map(|v| table.vis2log(v)).collect();
        seen.sort_unstable();
        assert_eq!(seen, (10..10 + text.len()).collect::<Vec<_>>());
        for pos in 10..10 + text.len() {
            assert_eq!(table.vis2log(table.log2vis(pos)), pos);
        }
        // Hebrew letters sit at odd levels, latin at even ones.
        assert!(table.is_rtl_at(13));
        assert!(!table.is_rtl_at(10));
    }

    #[test]
    fn test_boundary_at_direction_switch() {
        let text = chars("abשל");
        let table = BidiTable::from_chars(0, &text, Direction::Ltr);
        assert!(!table.is_boundary(1, false));
        assert!(table.is_boundary(2, false));
        assert!(!table.is_boundary(3, false));
        // Past the row end the paragraph direction decides.
        assert!(table.is_boundary(4, false));
        assert!(!table.is_boundary(4, true));
    }

    #[test]
    fn test_inset_placeholder_direction() {
        let text = vec!['a', inset_placeholder(Some(Direction::Rtl)), 'b'];
        let table = BidiTable::from_chars(0, &text, Direction::Ltr);
        assert_eq!(table.level(1), 1);
        assert_eq!(table.level(0), 0);
    }
}
