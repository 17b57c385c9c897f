//! Run-length position tables.
//!
//! Font runs, change ranges, and inset positions are all keyed by absolute
//! paragraph positions and must follow every insertion and deletion. The
//! shifting helpers here are shared by all three tables; [`RunList`] adds
//! the range bookkeeping used by font runs and change ranges.
//!
//! A `RunList` stores runs as inclusive end positions. Run `i` covers
//! `(runs[i - 1].end, runs[i].end]`, run 0 starts at position 0, and the list
//! covers `[0, runs.last().end]` without gaps.

use std::ops::Range;

/// One run: the inclusive end position and the value covering it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run<T> {
    pub end: usize,
    pub value: T,
}

/// Add one to every position `>= from`.
pub(crate) fn shift_up_from<E>(entries: &mut [E], from: usize, mut pos: impl FnMut(&mut E) -> &mut usize) {
    for entry in entries {
        let p = pos(entry);
        if *p >= from {
            *p += 1;
        }
    }
}

/// Subtract one from every position `>= from`.
///
/// Callers remove the entry at the erased position first, so `from` is the
/// erased position itself.
pub(crate) fn shift_down_from<E>(entries: &mut [E], from: usize, mut pos: impl FnMut(&mut E) -> &mut usize) {
    for entry in entries {
        let p = pos(entry);
        if *p >= from {
            *p -= 1;
        }
    }
}

/// Ordered, gap-free list of value runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunList<T> {
    runs: Vec<Run<T>>,
}

impl<T> Default for RunList<T> {
    fn default() -> Self {
        Self { runs: Vec::new() }
    }
}

impl<T: Clone + PartialEq> RunList<T> {
    /// Create an empty list covering no positions.
    #[must_use]
    pub const fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Create a list covering `[0, len)` with a single value.
    #[must_use]
    pub fn filled(len: usize, value: T) -> Self {
        if len == 0 {
            return Self::new();
        }
        Self {
            runs: vec![Run {
                end: len - 1,
                value,
            }],
        }
    }

    /// Number of positions covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.last().map_or(0, |run| run.end + 1)
    }

    /// Check if no position is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Get the runs in order.
    #[must_use]
    pub fn runs(&self) -> &[Run<T>] {
        &self.runs
    }

    pub(crate) fn runs_mut(&mut self) -> &mut Vec<Run<T>> {
        &mut self.runs
    }

    /// Index of the run covering `pos`, if any.
    #[must_use]
    pub fn index_of(&self, pos: usize) -> Option<usize> {
        let idx = self.runs.partition_point(|run| run.end < pos);
        (idx < self.runs.len()).then_some(idx)
    }

    /// First position of run `idx`.
    #[must_use]
    pub fn run_start(&self, idx: usize) -> usize {
        if idx == 0 { 0 } else { self.runs[idx - 1].end + 1 }
    }

    /// Value covering `pos`.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<&T> {
        self.index_of(pos).map(|idx| &self.runs[idx].value)
    }

    /// Position range of the run covering `pos`.
    #[must_use]
    pub fn span(&self, pos: usize) -> Option<Range<usize>> {
        self.index_of(pos)
            .map(|idx| self.run_start(idx)..self.runs[idx].end + 1)
    }

    /// Iterate over `(range, value)` pairs.
    pub fn spans(&self) -> impl Iterator<Item = (Range<usize>, &T)> {
        self.runs.iter().enumerate().map(|(idx, run)| {
            let start = if idx == 0 { 0 } else { self.runs[idx - 1].end + 1 };
            (start..run.end + 1, &run.value)
        })
    }

    /// Open room for a new position at `pos`.
    ///
    /// The run covering `pos` grows by one and every later run moves up.
    /// The new position carries the value of the run that covered `pos`;
    /// appending at `len()` changes nothing.
    pub fn shift_up(&mut self, pos: usize) {
        shift_up_from(&mut self.runs, pos, |run| &mut run.end);
    }

    /// Insert a position at `pos` holding `value`.
    pub fn insert_at(&mut self, pos: usize, value: T) {
        assert!(
            pos <= self.len(),
            "run insert at {pos} beyond covered length {}",
            self.len()
        );
        self.shift_up(pos);
        self.set_range(pos..pos + 1, value);
    }

    /// Remove position `pos`, shrinking or dropping its run.
    ///
    /// A run that becomes empty is dropped and its neighbours are merged
    /// when they hold equal values.
    pub fn remove_at(&mut self, pos: usize) {
        let Some(idx) = self.index_of(pos) else {
            panic!("run remove at {pos} beyond covered length {}", self.len());
        };
        if self.run_start(idx) == pos && self.runs[idx].end == pos {
            self.runs.remove(idx);
            if idx > 0 && idx < self.runs.len() && self.runs[idx - 1].value == self.runs[idx].value {
                self.runs.remove(idx - 1);
            }
        }
        shift_down_from(&mut self.runs, pos, |run| &mut run.end);
    }

    /// Overwrite `range` with `value`.
    ///
    /// `range.start` may equal `len()`, which extends the list.
    pub fn set_range(&mut self, range: Range<usize>, value: T) {
        let Range { start, end } = range;
        if start >= end {
            return;
        }
        assert!(
            start <= self.len(),
            "run range {start}..{end} leaves a gap after {}",
            self.len()
        );

        let mut out = Vec::with_capacity(self.runs.len() + 2);
        let mut run_start = 0;
        let mut placed = false;
        for run in self.runs.drain(..) {
            let run_end = run.end + 1;
            if run_end <= start {
                out.push(run);
            } else {
                if run_start < start {
                    out.push(Run {
                        end: start - 1,
                        value: run.value.clone(),
                    });
                }
                if !placed {
                    out.push(Run {
                        end: end - 1,
                        value: value.clone(),
                    });
                    placed = true;
                }
                if run_end > end {
                    out.push(run);
                }
            }
            run_start = run_end;
        }
        if !placed {
            out.push(Run {
                end: end - 1,
                value,
            });
        }
        self.runs = out;
        self.merge();
    }

    /// Merge adjacent runs with equal values and drop empty runs.
    pub fn merge(&mut self) {
        let mut out: Vec<Run<T>> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match out.last_mut() {
                Some(prev) if run.end <= prev.end => {}
                Some(prev) if prev.value == run.value => prev.end = run.end,
                _ => out.push(run),
            }
        }
        self.runs = out;
    }

    /// Check the partition invariants for a list expected to cover `len`
    /// positions. Returns a description of the first violation.
    pub fn audit(&self, len: usize) -> Option<String> {
        if len == 0 {
            return (!self.runs.is_empty()).then(|| "runs present for empty range".to_string());
        }
        let Some(last) = self.runs.last() else {
            return Some(format!("no runs for length {len}"));
        };
        if last.end != len - 1 {
            return Some(format!("last run ends at {} instead of {}", last.end, len - 1));
        }
        for pair in self.runs.windows(2) {
            if pair[1].end <= pair[0].end {
                return Some(format!("run end {} does not follow {}", pair[1].end, pair[0].end));
            }
            if pair[1].value == pair[0].value {
                return Some(format!("equal adjacent runs ending at {} and {}", pair[0].end, pair[1].end));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ends<T>(list: &RunList<T>) -> Vec<usize> {
        list.runs.iter().map(|run| run.end).collect()
    }

    #[test]
    fn test_set_range_interior_splits_in_three() {
        let mut list = RunList::filled(10, 'a');
        list.set_range(3..5, 'b');
        assert_eq!(ends(&list), vec![2, 4, 9]);
        assert_eq!(list.get(3), Some(&'b'));
        assert_eq!(list.get(5), Some(&'a'));
        assert_eq!(list.audit(10), None);
    }

    #[test]
    fn test_set_range_merges_back() {
        let mut list = RunList::filled(10, 'a');
        list.set_range(3..5, 'b');
        list.set_range(3..5, 'a');
        assert_eq!(ends(&list), vec![9]);
    }

    #[test]
    fn test_set_range_appends() {
        let mut list = RunList::filled(2, 'a');
        list.set_range(2..3, 'b');
        assert_eq!(list.len(), 3);
        assert_eq!(ends(&list), vec![1, 2]);
        list.set_range(3..4, 'b');
        assert_eq!(ends(&list), vec![1, 3]);
    }

    #[test]
    fn test_insert_then_remove_restores() {
        let mut list = RunList::filled(4, 'a');
        list.set_range(2..4, 'b');
        let before = list.clone();
        list.insert_at(2, 'c');
        assert_eq!(list.len(), 5);
        assert_eq!(list.get(2), Some(&'c'));
        assert_eq!(list.get(3), Some(&'b'));
        list.remove_at(2);
        assert_eq!(list, before);
    }

    #[test]
    fn test_remove_singleton_merges_neighbours() {
        let mut list = RunList::filled(5, 'a');
        list.set_range(2..3, 'b');
        assert_eq!(ends(&list), vec![1, 2, 4]);
        list.remove_at(2);
        assert_eq!(ends(&list), vec![3]);
        assert_eq!(list.audit(4), None);
    }

    #[test]
    fn test_span_and_spans() {
        let mut list = RunList::filled(6, 0u8);
        list.set_range(2..4, 1);
        assert_eq!(list.span(3), Some(2..4));
        assert_eq!(list.span(6), None);
        let spans: Vec<_> = list.spans().map(|(r, v)| (r, *v)).collect();
        assert_eq!(spans, vec![(0..2, 0), (2..4, 1), (4..6, 0)]);
    }

    #[test]
    fn test_shift_helpers() {
        let mut positions = vec![1usize, 4, 7];
        shift_up_from(&mut positions, 4, |p| p);
        assert_eq!(positions, vec![1, 5, 8]);
        shift_down_from(&mut positions, 5, |p| p);
        assert_eq!(positions, vec![1, 4, 7]);
    }

    #[test]
    fn test_audit_reports_problems() {
        let list = RunList::filled(3, 'a');
        assert!(list.audit(4).is_some());
        assert!(RunList::<char>::new().audit(2).is_some());
        assert_eq!(RunList::<char>::new().audit(0), None);
    }
}
