//! Property-based tests for paragraph editing and row breaking.
//!
//! Uses proptest to verify that font runs, change ranges, and inset
//! positions stay consistent under arbitrary edit sequences, and that
//! greedy row breaking behaves monotonically in the text width.

use std::sync::Arc;

use paracore::{
    AuthorId, BoxInset, BreakContext, Change, ChangeKind, Font, FontSeries, FontShape, HfillInset,
    Inset, Layout, MonospaceMetrics, NewlineInset, Paragraph, RowBreaker, SpaceInset, SpaceKind,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

#[derive(Clone, Debug)]
enum InsetChoice {
    Hfill,
    Newline,
    Space,
    Box,
}

impl InsetChoice {
    fn build(&self) -> Box<dyn Inset> {
        match self {
            Self::Hfill => Box::new(HfillInset),
            Self::Newline => Box::new(NewlineInset),
            Self::Space => Box::new(SpaceInset::new(SpaceKind::Protected)),
            Self::Box => Box::new(BoxInset::new(3, 2, 1)),
        }
    }
}

#[derive(Clone, Debug)]
enum Edit {
    InsertChar(usize, char, Font, Change),
    InsertInset(usize, InsetChoice, Font, Change),
    Erase(usize, bool),
    EraseRange(usize, usize, bool),
    SetFont(usize, Font),
    SetChange(usize, Change),
    Accept(usize, usize),
    Reject(usize, usize),
}

fn font_strategy() -> impl Strategy<Value = Font> {
    prop_oneof![
        Just(Font::INHERIT),
        Just(Font::INHERIT.with_series(FontSeries::Bold)),
        Just(Font::INHERIT.with_shape(FontShape::Italic)),
    ]
}

fn change_strategy() -> impl Strategy<Value = Change> {
    (
        prop_oneof![
            Just(ChangeKind::Unchanged),
            Just(ChangeKind::Inserted),
            Just(ChangeKind::Deleted)
        ],
        0u32..3,
    )
        .prop_map(|(kind, author)| Change::new(kind, AuthorId(author), 42))
}

fn inset_strategy() -> impl Strategy<Value = InsetChoice> {
    prop_oneof![
        Just(InsetChoice::Hfill),
        Just(InsetChoice::Newline),
        Just(InsetChoice::Space),
        Just(InsetChoice::Box),
    ]
}

/// Positions are drawn as raw numbers and folded into range when applied.
fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => (any::<usize>(), prop::char::range('a', 'e'), font_strategy(), change_strategy())
            .prop_map(|(pos, c, font, change)| Edit::InsertChar(pos, c, font, change)),
        1 => (any::<usize>(), Just(' '), font_strategy(), change_strategy())
            .prop_map(|(pos, c, font, change)| Edit::InsertChar(pos, c, font, change)),
        1 => (any::<usize>(), inset_strategy(), font_strategy(), change_strategy())
            .prop_map(|(pos, inset, font, change)| Edit::InsertInset(pos, inset, font, change)),
        2 => (any::<usize>(), any::<bool>()).prop_map(|(pos, track)| Edit::Erase(pos, track)),
        1 => (any::<usize>(), any::<usize>(), any::<bool>())
            .prop_map(|(a, b, track)| Edit::EraseRange(a, b, track)),
        2 => (any::<usize>(), font_strategy()).prop_map(|(pos, font)| Edit::SetFont(pos, font)),
        2 => (any::<usize>(), change_strategy()).prop_map(|(pos, change)| Edit::SetChange(pos, change)),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Edit::Accept(a, b)),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Edit::Reject(a, b)),
    ]
}

/// Fold `(a, b)` into an ordered range within `[0, limit]`.
fn range_in(a: usize, b: usize, limit: usize) -> (usize, usize) {
    let a = a % (limit + 1);
    let b = b % (limit + 1);
    (a.min(b), a.max(b))
}

fn apply(par: &mut Paragraph, edit: &Edit) {
    let size = par.size();
    match edit.clone() {
        Edit::InsertChar(pos, c, font, change) => par.insert_char(pos % (size + 1), c, font, change),
        Edit::InsertInset(pos, inset, font, change) => {
            par.insert_inset(pos % (size + 1), inset.build(), font, change);
        }
        Edit::Erase(pos, track) => {
            par.erase_char(pos % (size + 1), track);
        }
        Edit::EraseRange(a, b, track) => {
            let (start, end) = range_in(a, b, size);
            par.erase_range(start, end, track);
        }
        Edit::SetFont(pos, font) => {
            if size > 0 {
                par.set_font(pos % size, font);
            }
        }
        Edit::SetChange(pos, change) => par.set_change(pos % (size + 1), change),
        Edit::Accept(a, b) => {
            let (start, end) = range_in(a, b, size + 1);
            par.accept_changes(start, end);
        }
        Edit::Reject(a, b) => {
            let (start, end) = range_in(a, b, size + 1);
            par.reject_changes(start, end);
        }
    }
}

fn words_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,4}", 1..30).prop_map(|words| words.join(" "))
}

/// Words long enough to overflow narrow rows and force mid-word breaks.
fn long_words_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,12}", 1..20).prop_map(|words| words.join(" "))
}

fn standard(text: &str) -> Paragraph {
    Paragraph::with_text(Arc::new(Layout::standard()), text)
}

// ============================================================================
// Structural invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn invariants_hold_under_random_edits(
        text in "[a-c ]{0,12}",
        edits in prop::collection::vec(edit_strategy(), 0..40),
    ) {
        let mut par = standard(&text);
        for edit in &edits {
            apply(&mut par, edit);
            prop_assert!(
                par.check_invariants().is_ok(),
                "after {:?}: {:?}",
                edit,
                par.check_invariants()
            );
            prop_assert_eq!(par.changes().len(), par.size() + 1);
            prop_assert_eq!(par.font_runs().len(), par.size());
        }
    }

    #[test]
    fn font_runs_stay_minimal(
        text in "[a-z]{1,20}",
        edits in prop::collection::vec((any::<usize>(), font_strategy()), 0..30),
    ) {
        let mut par = standard(&text);
        for (pos, font) in edits {
            par.set_font(pos % par.size(), font);
        }
        let runs = par.font_runs().runs();
        for pair in runs.windows(2) {
            prop_assert_ne!(pair[0].value, pair[1].value);
            prop_assert!(pair[0].end < pair[1].end);
        }
        prop_assert_eq!(runs.last().map(|run| run.end), Some(par.size() - 1));
    }

    #[test]
    fn insert_then_erase_restores_paragraph(
        text in "[a-z ]{0,16}",
        pos in any::<usize>(),
        insert in "[a-z]{1,6}",
        font in font_strategy(),
    ) {
        let mut par = standard(&text);
        let pos = pos % (par.size() + 1);
        let before_text = par.text();
        let before_runs = par.font_runs().clone();
        let before_changes = par.changes().clone();

        let count = par.insert_str(pos, &insert, font, Change::unchanged());
        prop_assert_eq!(count, insert.chars().count());
        prop_assert_eq!(par.erase_range(pos, pos + count, false), count);

        prop_assert_eq!(par.text(), before_text);
        prop_assert_eq!(par.font_runs(), &before_runs);
        prop_assert_eq!(par.changes(), &before_changes);
        prop_assert!(par.check_invariants().is_ok());
    }

    #[test]
    fn accepting_twice_changes_nothing(
        text in "[a-c ]{0,12}",
        edits in prop::collection::vec(edit_strategy(), 0..25),
    ) {
        let mut par = standard(&text);
        for edit in &edits {
            apply(&mut par, edit);
        }
        par.accept_changes(0, par.size() + 1);
        let text_once = par.text();
        let runs_once = par.font_runs().clone();
        prop_assert!(!par.is_changed(0..par.size()));

        par.accept_changes(0, par.size() + 1);
        prop_assert_eq!(par.text(), text_once);
        prop_assert_eq!(par.font_runs(), &runs_once);
    }

    #[test]
    fn rejecting_tracked_typing_restores_text(
        text in "[a-z ]{0,16}",
        typed in prop::collection::vec((any::<usize>(), prop::char::range('a', 'z')), 0..10),
        erased in prop::collection::vec(any::<usize>(), 0..10),
    ) {
        let mut par = standard(&text);
        for (pos, c) in typed {
            let pos = pos % (par.size() + 1);
            par.insert_char(pos, c, Font::INHERIT, Change::inserted());
        }
        for pos in erased {
            let pos = pos % (par.size() + 1);
            par.erase_char(pos, true);
        }
        par.reject_changes(0, par.size() + 1);
        prop_assert_eq!(par.text(), text);
        prop_assert!(par.check_invariants().is_ok());
    }
}

// ============================================================================
// Row breaking properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn rows_partition_paragraph(text in words_strategy(), width in 1i32..60) {
        let par = standard(&text);
        let metrics = MonospaceMetrics::terminal();
        let ctx = BreakContext::new(&metrics, width);
        let rows = RowBreaker::new(&par, &ctx).break_rows();

        prop_assert_eq!(rows[0].start, 0);
        prop_assert_eq!(rows[rows.len() - 1].end, par.size());
        for pair in rows.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
            prop_assert!(pair[0].start < pair[0].end);
        }
    }

    #[test]
    fn wider_text_never_needs_more_rows(
        text in long_words_strategy(),
        narrow in 1i32..40,
        extra in 0i32..40,
    ) {
        let par = standard(&text);
        let metrics = MonospaceMetrics::terminal();
        let narrow_ctx = BreakContext::new(&metrics, narrow);
        let wide_ctx = BreakContext::new(&metrics, narrow + extra);

        let narrow_rows = RowBreaker::new(&par, &narrow_ctx).break_rows();
        let wide_rows = RowBreaker::new(&par, &wide_ctx).break_rows();
        prop_assert!(
            wide_rows.len() <= narrow_rows.len(),
            "{} rows at {} but {} rows at {}",
            narrow_rows.len(),
            narrow,
            wide_rows.len(),
            narrow + extra
        );
    }
}
