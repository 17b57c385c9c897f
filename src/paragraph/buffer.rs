//! The paragraph content model.
//!
//! A [`Paragraph`] owns its content units, font runs, change ranges, and
//! insets, and keeps the four structures aligned under every edit. Row
//! layout is cached per revision and text width.

use std::ops::Range;
use std::sync::Arc;

use super::changes::{AuthorId, Change, ChangeKind, ChangeTracker};
use super::fonts::FontRunTable;
use super::params::ParagraphParams;
use crate::error::{Error, Result};
use crate::event::emit_event;
use crate::font::{Font, FontSize};
use crate::inset::{Inset, InsetTable, NewlineInset};
use crate::layout::{Alignment, DocumentSettings, LabelType, Layout};
use crate::rows::{self, BreakContext, Row, VerticalContext};
use crate::unicode::{BidiTable, Direction, detect_base_direction, inset_placeholder, is_compose_char};

/// Replacement character reported by [`Paragraph::text`] for insets.
pub const INSET_CHAR: char = '\u{FFFC}';

/// One content position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Char(char),
    /// Sentinel for the inset stored in the paragraph's inset table.
    Inset,
}

/// Inputs the cached rows were built from. Metrics, margins, and
/// neighbouring paragraphs are not part of it; see [`Paragraph::invalidate_rows`].
#[derive(Clone, Debug, PartialEq)]
struct RowCacheKey {
    revision: u64,
    max_width: i32,
    document: DocumentSettings,
}

/// A paragraph of rich text.
#[derive(Clone, Debug)]
pub struct Paragraph {
    units: Vec<Unit>,
    fonts: FontRunTable,
    changes: ChangeTracker,
    insets: InsetTable,
    params: ParagraphParams,
    layout: Arc<Layout>,
    revision: u64,
    rows: Vec<Row>,
    rows_key: Option<RowCacheKey>,
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new(Arc::new(Layout::standard()))
    }
}

impl Paragraph {
    /// Create an empty paragraph with the given layout.
    #[must_use]
    pub fn new(layout: Arc<Layout>) -> Self {
        Self {
            units: Vec::new(),
            fonts: FontRunTable::new(),
            changes: ChangeTracker::new(),
            insets: InsetTable::new(),
            params: ParagraphParams::default(),
            layout,
            revision: 0,
            rows: Vec::new(),
            rows_key: None,
        }
    }

    /// Create a paragraph holding `text` in the inherited font.
    ///
    /// Each `'\n'` becomes a [`NewlineInset`].
    #[must_use]
    pub fn with_text(layout: Arc<Layout>, text: &str) -> Self {
        let mut par = Self::new(layout);
        par.insert_str(0, text, Font::INHERIT, Change::unchanged());
        par
    }

    /// Number of content positions.
    #[must_use]
    pub fn size(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Revision counter, bumped by every mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Shared handle to the layout.
    #[must_use]
    pub fn layout_arc(&self) -> &Arc<Layout> {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: Arc<Layout>) {
        self.layout = layout;
        self.bump_revision();
    }

    #[must_use]
    pub fn params(&self) -> &ParagraphParams {
        &self.params
    }

    /// Get the parameters for modification.
    pub fn params_mut(&mut self) -> &mut ParagraphParams {
        self.bump_revision();
        &mut self.params
    }

    /// Effective alignment: the paragraph's override or the layout's.
    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.params.align.unwrap_or(self.layout.align)
    }

    // ----- content queries -----

    /// Content unit at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= size()`.
    #[must_use]
    pub fn unit_at(&self, pos: usize) -> Unit {
        self.units[pos]
    }

    /// Character at `pos`; `None` for inset positions.
    #[must_use]
    pub fn char_at(&self, pos: usize) -> Option<char> {
        match self.units[pos] {
            Unit::Char(c) => Some(c),
            Unit::Inset => None,
        }
    }

    /// Bounds-checked variant of [`Paragraph::char_at`].
    pub fn try_char_at(&self, pos: usize) -> Result<Option<char>> {
        if pos >= self.size() {
            return Err(Error::PositionOutOfBounds {
                pos,
                size: self.size(),
            });
        }
        Ok(self.char_at(pos))
    }

    #[must_use]
    pub fn is_inset(&self, pos: usize) -> bool {
        pos < self.size() && self.units[pos] == Unit::Inset
    }

    /// Inset at `pos`.
    #[must_use]
    pub fn inset(&self, pos: usize) -> Option<&dyn Inset> {
        if self.is_inset(pos) { self.insets.get(pos) } else { None }
    }

    /// Inset at `pos` for modification.
    pub fn inset_mut(&mut self, pos: usize) -> Option<&mut (dyn Inset + 'static)> {
        if !self.is_inset(pos) {
            return None;
        }
        self.bump_revision();
        self.insets.get_mut(pos)
    }

    #[must_use]
    pub fn insets(&self) -> &InsetTable {
        &self.insets
    }

    #[must_use]
    pub fn is_newline(&self, pos: usize) -> bool {
        self.inset(pos).is_some_and(|inset| inset.is_newline())
    }

    #[must_use]
    pub fn is_hfill(&self, pos: usize) -> bool {
        self.inset(pos).is_some_and(|inset| inset.is_hfill())
    }

    /// A row may break after `pos`.
    #[must_use]
    pub fn is_line_separator(&self, pos: usize) -> bool {
        match self.units.get(pos) {
            Some(Unit::Char(c)) => *c == ' ',
            Some(Unit::Inset) => self.insets.get(pos).is_some_and(|inset| inset.is_line_separator()),
            None => false,
        }
    }

    /// `pos` holds an interword space that justification may stretch.
    #[must_use]
    pub fn is_separator(&self, pos: usize) -> bool {
        matches!(self.units.get(pos), Some(Unit::Char(' ')))
    }

    /// `pos` holds a character drawn together with its predecessor.
    #[must_use]
    pub fn is_compose(&self, pos: usize) -> bool {
        matches!(self.units.get(pos), Some(Unit::Char(c)) if is_compose_char(*c))
    }

    /// Plain text with insets shown as U+FFFC.
    #[must_use]
    pub fn text(&self) -> String {
        self.text_range(0..self.size())
    }

    /// Plain text of `range` with insets shown as U+FFFC.
    #[must_use]
    pub fn text_range(&self, range: Range<usize>) -> String {
        self.units[range]
            .iter()
            .map(|unit| match unit {
                Unit::Char(c) => *c,
                Unit::Inset => INSET_CHAR,
            })
            .collect()
    }

    /// First position of the body after a manual label.
    ///
    /// Always 0 unless the layout has a manual label. The label is the
    /// first word: it ends after the first space, or at a newline.
    #[must_use]
    pub fn begin_of_body(&self) -> usize {
        if self.layout.label_type != LabelType::Manual {
            return 0;
        }
        let end = self.size();
        let mut i = 0;
        if i < end && !self.is_newline(i) {
            i += 1;
            if i < end && !self.is_newline(i) {
                i += 1;
                while i < end && self.units[i - 1] != Unit::Char(' ') && !self.is_newline(i) {
                    i += 1;
                }
            }
        }
        i
    }

    /// Base direction of the paragraph from its first strong character.
    #[must_use]
    pub fn is_rtl(&self) -> bool {
        self.base_direction() == Direction::Rtl
    }

    fn base_direction(&self) -> Direction {
        detect_base_direction(self.bidi_chars(0..self.size()))
    }

    fn bidi_chars(&self, range: Range<usize>) -> impl Iterator<Item = char> + '_ {
        range.map(move |pos| match self.units[pos] {
            Unit::Char(c) => c,
            Unit::Inset => inset_placeholder(self.insets.get(pos).and_then(|inset| inset.direction())),
        })
    }

    /// Resolve the bidi table for the row covering `range`.
    #[must_use]
    pub fn bidi_table(&self, range: Range<usize>) -> BidiTable {
        let base = if self.is_rtl() { Direction::Rtl } else { Direction::Ltr };
        let chars: Vec<char> = self.bidi_chars(range.clone()).collect();
        BidiTable::from_chars(range.start, &chars, base)
    }

    // ----- insertion and deletion -----

    /// Insert the character `c` at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > size()`.
    pub fn insert_char(&mut self, pos: usize, c: char, font: Font, change: Change) {
        self.check_insert_pos(pos);
        self.changes.insert(pos, change);
        self.units.insert(pos, Unit::Char(c));
        self.fonts.insert_at(pos, font);
        self.insets.shift_up_from(pos);
        self.bump_revision();
    }

    /// Insert `inset` at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > size()`.
    pub fn insert_inset(&mut self, pos: usize, inset: Box<dyn Inset>, font: Font, change: Change) {
        self.check_insert_pos(pos);
        self.changes.insert(pos, change);
        self.units.insert(pos, Unit::Inset);
        self.fonts.insert_at(pos, font);
        self.insets.shift_up_from(pos);
        self.insets.insert(pos, inset);
        self.bump_revision();
    }

    /// Insert `text` at `pos`; returns the number of positions inserted.
    ///
    /// Each `'\n'` becomes a [`NewlineInset`].
    pub fn insert_str(&mut self, pos: usize, text: &str, font: Font, change: Change) -> usize {
        let mut at = pos;
        for c in text.chars() {
            if c == '\n' {
                self.insert_inset(at, Box::new(NewlineInset), font, change);
            } else {
                self.insert_char(at, c, font, change);
            }
            at += 1;
        }
        at - pos
    }

    fn check_insert_pos(&self, pos: usize) {
        assert!(
            pos <= self.size(),
            "insert position {pos} out of range for paragraph of size {}",
            self.size()
        );
    }

    /// Erase the position `pos`.
    ///
    /// With change tracking, unchanged positions and insertions by other
    /// authors are only marked deleted, and positions already marked deleted
    /// are left alone. Returns whether the position was physically removed;
    /// the end slot at `size()` is never removed.
    ///
    /// # Panics
    ///
    /// Panics if `pos > size()`.
    pub fn erase_char(&mut self, pos: usize, track_changes: bool) -> bool {
        assert!(
            pos <= self.size(),
            "erase position {pos} out of range for paragraph of size {}",
            self.size()
        );
        if track_changes {
            let change = self.changes.lookup(pos);
            if !change.is_changed() || (change.is_inserted() && !change.is_local()) {
                self.set_change(pos, Change::deleted());
                return false;
            }
            if change.is_deleted() {
                return false;
            }
        }
        if pos == self.size() {
            return false;
        }

        self.units.remove(pos);
        self.fonts.remove_at(pos);
        self.insets.erase(pos);
        self.changes.erase(pos);
        self.bump_revision();
        true
    }

    /// Erase the positions in `[start, end)`; returns how many were
    /// physically removed.
    ///
    /// Positions that are only marked deleted stay in place, so the
    /// remaining range moves forward past them.
    pub fn erase_range(&mut self, start: usize, end: usize, track_changes: bool) -> usize {
        assert!(
            start <= end && end <= self.size() + 1,
            "erase range {start}..{end} out of range for paragraph of size {}",
            self.size()
        );
        let mut i = start;
        for _ in start..end {
            if !self.erase_char(i, track_changes) {
                i += 1;
            }
        }
        end - i
    }

    /// The layout keeps this paragraph when it becomes empty.
    #[must_use]
    pub fn allow_empty(&self) -> bool {
        self.layout.keep_empty
    }

    /// Remove leading spaces and newlines; returns whether anything was
    /// removed or marked.
    pub fn strip_leading_spaces(&mut self, track_changes: bool) -> bool {
        if self.layout.free_spacing {
            return false;
        }
        let mut pos = 0;
        let mut count = 0;
        while pos < self.size() && (self.is_newline(pos) || self.is_line_separator(pos)) {
            if self.erase_char(pos, track_changes) {
                count += 1;
            } else {
                pos += 1;
            }
        }
        count > 0 || pos > 0
    }

    // ----- fonts -----

    /// Raw font settings at `pos`; the end slot reports the last font.
    #[must_use]
    pub fn font_settings(&self, pos: usize) -> Font {
        self.fonts.settings(pos, self.size())
    }

    /// Set the font settings of `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= size()`.
    pub fn set_font(&mut self, pos: usize, font: Font) {
        assert!(
            pos < self.size(),
            "font position {pos} out of range for paragraph of size {}",
            self.size()
        );
        self.fonts.set_font(pos, font);
        self.bump_revision();
    }

    /// Font settings at `pos` resolved against the layout.
    ///
    /// The label region of a manual-label paragraph resolves against the
    /// layout's label font, everything else against its text font.
    #[must_use]
    pub fn font(&self, pos: usize) -> Font {
        let base = if self.layout.has_manual_label() && pos < self.begin_of_body() {
            &self.layout.label_font
        } else {
            &self.layout.font
        };
        self.font_settings(pos).realize(base)
    }

    /// Font used to measure label strings.
    #[must_use]
    pub fn label_font(&self) -> Font {
        self.layout.label_font
    }

    /// Range of positions sharing the font run of `pos`.
    #[must_use]
    pub fn font_span(&self, pos: usize) -> Option<Range<usize>> {
        self.fonts.span(pos)
    }

    /// Largest font size used in `range`, with `Inherit` counting as
    /// `default`.
    #[must_use]
    pub fn highest_font_in_range(&self, range: Range<usize>, default: FontSize) -> FontSize {
        self.fonts.highest_size(range, default)
    }

    #[must_use]
    pub fn font_runs(&self) -> &FontRunTable {
        &self.fonts
    }

    /// Replace the font runs with an externally supplied table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFontRuns`] if the table does not cover the
    /// paragraph.
    pub fn set_font_runs(&mut self, table: FontRunTable) -> Result<()> {
        table.validate(self.size())?;
        self.fonts = table;
        self.bump_revision();
        Ok(())
    }

    // ----- change tracking -----

    #[must_use]
    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    /// Change at `pos`, where `pos <= size()`.
    #[must_use]
    pub fn lookup_change(&self, pos: usize) -> Change {
        self.changes.lookup(pos)
    }

    /// Check whether any position in `range` is inserted or deleted.
    #[must_use]
    pub fn is_changed(&self, range: Range<usize>) -> bool {
        self.changes.is_changed(range)
    }

    /// Set the change of `pos`.
    ///
    /// Unless the change is a deletion, an inset at `pos` is marked as a
    /// whole as well.
    pub fn set_change(&mut self, pos: usize, change: Change) {
        self.changes.set_at(pos, change);
        if change.kind != ChangeKind::Deleted {
            if let Some(inset) = self.insets.get_mut(pos) {
                inset.set_change(change);
            }
        }
        self.bump_revision();
    }

    /// Set the change of every position, the end slot included.
    pub fn set_change_all(&mut self, change: Change) {
        self.changes.set(0..self.size() + 1, change);
        if change.kind != ChangeKind::Deleted {
            let positions: Vec<usize> = self.insets.positions().collect();
            for pos in positions {
                if let Some(inset) = self.insets.get_mut(pos) {
                    inset.set_change(change);
                }
            }
        }
        self.bump_revision();
    }

    /// Accept the changes in `[start, end)`.
    ///
    /// Insertions become unchanged, deletions are carried out. A deletion
    /// marked on the end slot is left for the caller, which merges the next
    /// paragraph.
    pub fn accept_changes(&mut self, start: usize, end: usize) {
        self.check_change_range(start, end);
        let mut end = end;
        let mut pos = start;
        while pos < end {
            match self.changes.lookup(pos).kind {
                ChangeKind::Unchanged => {
                    if let Some(inset) = self.insets.get_mut(pos) {
                        inset.accept_changes();
                    }
                    pos += 1;
                }
                ChangeKind::Inserted => {
                    self.changes.set_at(pos, Change::unchanged());
                    if let Some(inset) = self.insets.get_mut(pos) {
                        inset.accept_changes();
                    }
                    pos += 1;
                }
                ChangeKind::Deleted => {
                    if pos < self.size() {
                        self.erase_char(pos, false);
                        end -= 1;
                    } else {
                        pos += 1;
                    }
                }
            }
        }
        self.bump_revision();
    }

    /// Reject the changes in `[start, end)`.
    ///
    /// Insertions are removed, deletions become unchanged. An insertion
    /// marked on the end slot is left for the caller.
    pub fn reject_changes(&mut self, start: usize, end: usize) {
        self.check_change_range(start, end);
        let mut end = end;
        let mut pos = start;
        while pos < end {
            match self.changes.lookup(pos).kind {
                ChangeKind::Unchanged => {
                    if let Some(inset) = self.insets.get_mut(pos) {
                        inset.reject_changes();
                    }
                    pos += 1;
                }
                ChangeKind::Inserted => {
                    if pos < self.size() {
                        self.erase_char(pos, false);
                        end -= 1;
                    } else {
                        pos += 1;
                    }
                }
                ChangeKind::Deleted => {
                    self.changes.set_at(pos, Change::unchanged());
                    pos += 1;
                }
            }
        }
        self.bump_revision();
    }

    fn check_change_range(&self, start: usize, end: usize) {
        assert!(
            start <= end && end <= self.size() + 1,
            "change range {start}..{end} out of range for paragraph of size {}",
            self.size()
        );
    }

    /// Check whether deleting the paragraph end merges with the next
    /// paragraph right away instead of being tracked.
    #[must_use]
    pub fn is_merged_on_end_of_par_deletion(&self, track_changes: bool) -> bool {
        if !track_changes {
            return true;
        }
        let change = self.changes.lookup(self.size());
        change.is_inserted() && change.author == AuthorId::LOCAL
    }

    // ----- rows -----

    /// Rows from the last layout pass; empty if the paragraph changed since.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Lay out the paragraph's rows, reusing the cached rows when the
    /// content, the text width, and the document settings are unchanged.
    ///
    /// Swapping glyph metrics or margins, or moving the paragraph among
    /// other paragraphs, is not detected; call [`Paragraph::invalidate_rows`]
    /// first.
    pub fn layout_rows(&mut self, ctx: &BreakContext<'_>, vctx: &VerticalContext<'_>) -> &[Row] {
        let fresh = self.rows_key.as_ref().is_some_and(|key| {
            key.revision == self.revision
                && key.max_width == ctx.max_width
                && key.document == *ctx.document
        });
        if !fresh {
            let rows = rows::build_rows(self, ctx, vctx);
            emit_event(
                "rows_rebuilt",
                &format!(
                    "{{\"rows\":{},\"width\":{},\"size\":{}}}",
                    rows.len(),
                    ctx.max_width,
                    self.size()
                ),
            );
            self.rows = rows;
            self.rows_key = Some(RowCacheKey {
                revision: self.revision,
                max_width: ctx.max_width,
                document: ctx.document.clone(),
            });
        }
        &self.rows
    }

    /// Drop the cached rows so the next [`Paragraph::layout_rows`] rebuilds them.
    pub fn invalidate_rows(&mut self) {
        self.rows_key = None;
        self.rows.clear();
    }

    /// Total height of the cached rows.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.rows.iter().map(|row| row.height).sum()
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        if self.rows_key.take().is_some() {
            self.rows.clear();
        }
    }

    // ----- invariants -----

    /// Verify that content, font runs, change ranges, and insets agree.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn check_invariants(&self) -> Result<()> {
        self.fonts.validate(self.size())?;
        self.changes.validate(self.size())?;

        let mut last = None;
        for pos in self.insets.positions() {
            if pos >= self.size() || self.units[pos] != Unit::Inset || last.is_some_and(|prev| prev >= pos) {
                return Err(Error::InsetMismatch { pos });
            }
            last = Some(pos);
        }
        if let Some(pos) = self
            .units
            .iter()
            .enumerate()
            .find(|&(pos, unit)| *unit == Unit::Inset && self.insets.get(pos).is_none())
            .map(|(pos, _)| pos)
        {
            return Err(Error::InsetMismatch { pos });
        }
        Ok(())
    }
}
