//! Position-keyed storage of a paragraph's insets.

use super::Inset;
use crate::paragraph::ranges::{shift_down_from, shift_up_from};

#[derive(Clone, Debug)]
struct Entry {
    pos: usize,
    inset: Box<dyn Inset>,
}

/// Insets of one paragraph, sorted by position.
///
/// The table follows content edits through [`InsetTable::shift_up_from`]
/// and [`InsetTable::erase`]; the paragraph keeps it in sync with its
/// sentinel units.
#[derive(Clone, Debug, Default)]
pub struct InsetTable {
    entries: Vec<Entry>,
}

impl InsetTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, pos: usize) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&pos, |entry| entry.pos)
    }

    /// Get the inset at `pos`.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<&dyn Inset> {
        self.find(pos).ok().map(|idx| self.entries[idx].inset.as_ref())
    }

    /// Get the inset at `pos` mutably.
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut (dyn Inset + 'static)> {
        match self.find(pos) {
            Ok(idx) => Some(self.entries[idx].inset.as_mut()),
            Err(_) => None,
        }
    }

    /// Store `inset` at `pos`, replacing any inset already there.
    ///
    /// Positions are not shifted; call [`InsetTable::shift_up_from`] first
    /// when the inset is new content.
    pub fn insert(&mut self, pos: usize, inset: Box<dyn Inset>) -> Option<Box<dyn Inset>> {
        match self.find(pos) {
            Ok(idx) => Some(std::mem::replace(&mut self.entries[idx].inset, inset)),
            Err(idx) => {
                self.entries.insert(idx, Entry { pos, inset });
                None
            }
        }
    }

    /// Move every inset at or after `pos` one position up.
    pub fn shift_up_from(&mut self, pos: usize) {
        shift_up_from(&mut self.entries, pos, |entry| &mut entry.pos);
    }

    /// Drop the inset at `pos` if any and move later insets down.
    pub fn erase(&mut self, pos: usize) -> Option<Box<dyn Inset>> {
        let removed = self.find(pos).ok().map(|idx| self.entries.remove(idx).inset);
        shift_down_from(&mut self.entries, pos, |entry| &mut entry.pos);
        removed
    }

    /// Iterate over `(position, inset)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &dyn Inset)> {
        self.entries.iter().map(|entry| (entry.pos, entry.inset.as_ref()))
    }

    /// Iterate over insets whose position lies in `[start, end)`.
    pub fn iter_range(&self, start: usize, end: usize) -> impl Iterator<Item = (usize, &dyn Inset)> {
        let first = self.entries.partition_point(|entry| entry.pos < start);
        self.entries[first..]
            .iter()
            .take_while(move |entry| entry.pos < end)
            .map(|entry| (entry.pos, entry.inset.as_ref()))
    }

    /// Iterate over the positions in order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|entry| entry.pos)
    }
}
