//! Font run table.
//!
//! Font settings are stored as runs of identical [`Font`] values covering
//! `[0, size)`. Adjacent runs always differ, so the table stays minimal under
//! every edit. An empty paragraph has an empty table.

use std::ops::Range;

use super::ranges::{Run, RunList};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log_with};
use crate::font::{Font, FontSize};

/// Minimal run-length table of font settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontRunTable {
    runs: RunList<Font>,
}

impl FontRunTable {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            runs: RunList::new(),
        }
    }

    /// Build a table from externally supplied `(inclusive end, font)` runs.
    ///
    /// The input is normalized for a paragraph of `size` positions: runs are
    /// sorted, duplicated ends collapse to the last entry, runs past the end
    /// are clipped, a short tail is extended, and equal neighbours merge.
    /// Normalization is reported at [`LogLevel::Warn`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFontRuns`] when `size > 0` and no runs are
    /// given.
    pub fn from_runs(mut runs: Vec<(usize, Font)>, size: usize) -> Result<Self> {
        if size == 0 {
            if !runs.is_empty() {
                emit_log_with(LogLevel::Warn, || {
                    format!("dropping {} font runs for empty paragraph", runs.len())
                });
            }
            return Ok(Self::new());
        }
        if runs.is_empty() {
            return Err(Error::InvalidFontRuns(format!(
                "no runs for paragraph of size {size}"
            )));
        }

        let original = runs.clone();
        runs.sort_by_key(|&(end, _)| end);
        let mut list: Vec<Run<Font>> = Vec::with_capacity(runs.len());
        for (end, font) in runs {
            let end = end.min(size - 1);
            match list.last_mut() {
                Some(prev) if prev.end == end => prev.value = font,
                _ => list.push(Run { end, value: font }),
            }
        }
        if let Some(last) = list.last_mut() {
            last.end = size - 1;
        }

        let mut table = Self {
            runs: RunList::new(),
        };
        *table.runs.runs_mut() = list;
        table.runs.merge();

        let normalized: Vec<(usize, Font)> =
            table.runs().iter().map(|run| (run.end, run.value)).collect();
        if normalized != original {
            emit_log_with(LogLevel::Warn, || {
                format!(
                    "normalized font runs for size {size}: {} runs in, {} out",
                    original.len(),
                    normalized.len()
                )
            });
        }
        table.validate(size)?;
        Ok(table)
    }

    /// Number of positions covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Get the runs in order.
    #[must_use]
    pub fn runs(&self) -> &[Run<Font>] {
        self.runs.runs()
    }

    /// Font stored for `pos`, if covered.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<Font> {
        self.runs.get(pos).copied()
    }

    /// Font settings at `pos` for a paragraph of `size` positions.
    ///
    /// The end slot reports the font of the last position; an empty table
    /// reports [`Font::INHERIT`].
    #[must_use]
    pub fn settings(&self, pos: usize, size: usize) -> Font {
        let pos = if pos >= size { size.saturating_sub(1) } else { pos };
        self.get(pos).unwrap_or(Font::INHERIT)
    }

    /// Position range of the run covering `pos`.
    #[must_use]
    pub fn span(&self, pos: usize) -> Option<Range<usize>> {
        self.runs.span(pos)
    }

    /// Largest font size among the runs touching `range`.
    ///
    /// `Inherit` sizes count as `default`. An empty table yields `default`.
    #[must_use]
    pub fn highest_size(&self, range: Range<usize>, default: FontSize) -> FontSize {
        if self.runs.is_empty() {
            return default;
        }
        let mut max = FontSize::Tiny;
        for (span, font) in self.runs.spans() {
            if span.end <= range.start {
                continue;
            }
            if span.start >= range.end && span.start > range.start {
                break;
            }
            let size = if font.size == FontSize::Inherit {
                default
            } else {
                font.size
            };
            max = max.max(size);
        }
        max
    }

    /// Open a new position at `pos` and give it `font`.
    pub fn insert_at(&mut self, pos: usize, font: Font) {
        assert!(
            pos <= self.len(),
            "font insert at {pos} beyond table length {}",
            self.len()
        );
        self.runs.shift_up(pos);
        self.set_font(pos, font);
    }

    /// Remove position `pos`.
    pub fn remove_at(&mut self, pos: usize) {
        self.runs.remove_at(pos);
    }

    /// Set the font of the single position `pos`.
    ///
    /// `pos` may equal the table length, which appends. The run containing
    /// `pos` is split, shrunk, or merged so that no two adjacent runs hold
    /// equal fonts afterwards.
    pub fn set_font(&mut self, pos: usize, font: Font) {
        assert!(
            pos <= self.len(),
            "font set at {pos} beyond table length {}",
            self.len()
        );
        let runs = self.runs.runs_mut();
        let i = runs.partition_point(|run| run.end < pos);
        let not_found = i == runs.len();
        if !not_found && runs[i].value == font {
            return;
        }

        let begin = pos == 0 || not_found || (i > 0 && runs[i - 1].end == pos - 1);
        let end = !not_found && runs[i].end == pos;
        let next_matches = i + 1 < runs.len() && runs[i + 1].value == font;
        let prev_matches = i > 0 && runs[i - 1].value == font;

        match (begin, end) {
            // `pos` is the whole run.
            (true, true) => {
                if next_matches {
                    runs.remove(i);
                    if prev_matches {
                        runs.remove(i - 1);
                    }
                } else if prev_matches {
                    runs[i - 1].end = pos;
                    runs.remove(i);
                } else {
                    runs[i].value = font;
                }
            }
            // First position of its run, or an append.
            (true, false) => {
                if prev_matches {
                    runs[i - 1].end = pos;
                } else {
                    runs.insert(i, Run { end: pos, value: font });
                }
            }
            // Last position of its run.
            (false, true) => {
                runs[i].end = pos - 1;
                if !next_matches {
                    runs.insert(i + 1, Run { end: pos, value: font });
                }
            }
            (false, false) => {
                let old = runs[i].value;
                runs.insert(i, Run { end: pos - 1, value: old });
                runs.insert(i + 1, Run { end: pos, value: font });
            }
        }
    }

    /// Verify that the runs partition `[0, size)` minimally.
    pub fn validate(&self, size: usize) -> Result<()> {
        match self.runs.audit(size) {
            Some(problem) => Err(Error::InvalidFontRuns(problem)),
            None => Ok(()),
        }
    }
}
