//! Change tracking state.
//!
//! Every position of a paragraph, including the end-of-paragraph slot at
//! `size`, carries a [`Change`]. The [`ChangeTracker`] stores them as ranges
//! and keeps them aligned with content edits.

use std::ops::Range;
use std::time::{SystemTime, UNIX_EPOCH};

use super::ranges::{Run, RunList};
use crate::error::{Error, Result};

/// Identifier of the author of a change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AuthorId(pub u32);

impl AuthorId {
    /// The author editing locally.
    pub const LOCAL: Self = Self(0);
}

/// Tracked state of a position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    #[default]
    Unchanged,
    Inserted,
    Deleted,
}

/// Change record of one position.
///
/// Two unchanged records are always equal; inserted and deleted records
/// compare author and timestamp as well.
#[derive(Clone, Copy, Debug, Default)]
pub struct Change {
    pub kind: ChangeKind,
    pub author: AuthorId,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

impl PartialEq for Change {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        self.kind == ChangeKind::Unchanged
            || (self.author == other.author && self.timestamp == other.timestamp)
    }
}

impl Eq for Change {}

fn now_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

impl Change {
    /// Create a change record.
    #[must_use]
    pub const fn new(kind: ChangeKind, author: AuthorId, timestamp: u64) -> Self {
        Self {
            kind,
            author,
            timestamp,
        }
    }

    /// An unchanged record.
    #[must_use]
    pub const fn unchanged() -> Self {
        Self::new(ChangeKind::Unchanged, AuthorId::LOCAL, 0)
    }

    /// A local insertion stamped with the current time.
    #[must_use]
    pub fn inserted() -> Self {
        Self::new(ChangeKind::Inserted, AuthorId::LOCAL, now_seconds())
    }

    /// A local deletion stamped with the current time.
    #[must_use]
    pub fn deleted() -> Self {
        Self::new(ChangeKind::Deleted, AuthorId::LOCAL, now_seconds())
    }

    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.kind != ChangeKind::Unchanged
    }

    #[must_use]
    pub fn is_inserted(&self) -> bool {
        self.kind == ChangeKind::Inserted
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.kind == ChangeKind::Deleted
    }

    /// Check whether the local author made this change.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.author == AuthorId::LOCAL
    }
}

/// Change ranges of a paragraph, covering `[0, size]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeTracker {
    ranges: RunList<Change>,
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeTracker {
    /// Tracker for an empty paragraph: only the end slot, unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ranges: RunList::filled(1, Change::unchanged()),
        }
    }

    /// Number of tracked positions, `size + 1`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always false: the end slot is tracked even for empty paragraphs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Change at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is past the end slot.
    #[must_use]
    pub fn lookup(&self, pos: usize) -> Change {
        match self.ranges.get(pos) {
            Some(change) => *change,
            None => panic!("change lookup at {pos} past end slot {}", self.len() - 1),
        }
    }

    /// Check whether any position in `range` is inserted or deleted.
    #[must_use]
    pub fn is_changed(&self, range: Range<usize>) -> bool {
        self.ranges
            .spans()
            .any(|(span, change)| change.is_changed() && span.start < range.end && range.start < span.end)
    }

    /// Set the change of every position in `range`.
    pub fn set(&mut self, range: Range<usize>, change: Change) {
        assert!(
            range.end <= self.len(),
            "change range {range:?} past end slot {}",
            self.len() - 1
        );
        self.ranges.set_range(range, change);
    }

    /// Set the change of a single position.
    pub fn set_at(&mut self, pos: usize, change: Change) {
        self.set(pos..pos + 1, change);
    }

    /// Track a new position at `pos`.
    pub fn insert(&mut self, pos: usize, change: Change) {
        self.ranges.insert_at(pos, change);
    }

    /// Forget position `pos`.
    pub fn erase(&mut self, pos: usize) {
        self.ranges.remove_at(pos);
    }

    /// Iterate over `(range, change)` pairs in order.
    pub fn ranges(&self) -> impl Iterator<Item = (Range<usize>, &Change)> {
        self.ranges.spans()
    }

    /// Get the raw ranges.
    #[must_use]
    pub fn runs(&self) -> &[Run<Change>] {
        self.ranges.runs()
    }

    /// Verify that the ranges partition `[0, size]`.
    pub fn validate(&self, size: usize) -> Result<()> {
        match self.ranges.audit(size + 1) {
            Some(problem) => Err(Error::InvalidChanges(problem)),
            None => Ok(()),
        }
    }
}
