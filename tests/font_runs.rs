//! Integration tests for font runs on paragraphs.

use std::sync::{Arc, Mutex};

use paracore::{
    Change, Error, Font, FontAttributes, FontRunTable, FontSeries, FontShape, FontSize, Layout,
    LogLevel, Paragraph, clear_log_callback, set_log_callback,
};

fn standard(text: &str) -> Paragraph {
    Paragraph::with_text(Arc::new(Layout::standard()), text)
}

fn bold() -> Font {
    Font::INHERIT.with_series(FontSeries::Bold)
}

#[test]
fn single_position_split_and_merge() {
    let mut par = standard("abcdef");
    assert_eq!(par.font_runs().runs().len(), 1);

    par.set_font(3, bold());
    assert_eq!(par.font_runs().runs().len(), 3);
    assert_eq!(par.font_span(3), Some(3..4));
    assert_eq!(par.font_settings(3), bold());
    assert_eq!(par.font_settings(2), Font::INHERIT);

    par.set_font(3, Font::INHERIT);
    assert_eq!(par.font_runs().runs().len(), 1);
    assert_eq!(par.font_span(0), Some(0..6));
    assert!(par.check_invariants().is_ok());
}

#[test]
fn run_edges_extend_neighbours() {
    let mut par = standard("abcdef");
    par.set_font(2, bold());
    par.set_font(3, bold());
    assert_eq!(par.font_span(2), Some(2..4));
    assert_eq!(par.font_runs().runs().len(), 3);

    // Growing the bold run to the start absorbs the first run.
    par.set_font(1, bold());
    par.set_font(0, bold());
    assert_eq!(par.font_span(0), Some(0..4));
    assert_eq!(par.font_runs().runs().len(), 2);

    par.set_font(5, bold());
    par.set_font(4, bold());
    assert_eq!(par.font_runs().runs().len(), 1);
    assert!(par.check_invariants().is_ok());
}

#[test]
fn inserted_text_carries_its_font() {
    let mut par = standard("ab");
    par.insert_str(1, "XY", bold(), Change::unchanged());
    assert_eq!(par.text(), "aXYb");
    assert_eq!(par.font_span(1), Some(1..3));
    assert_eq!(par.font_settings(3), Font::INHERIT);

    par.erase_range(1, 3, false);
    assert_eq!(par.font_runs().runs().len(), 1);
    assert!(par.check_invariants().is_ok());
}

#[test]
fn end_slot_reports_last_font() {
    let mut par = standard("abc");
    par.set_font(2, bold());
    assert_eq!(par.font_settings(par.size()), bold());

    let empty = Paragraph::new(Arc::new(Layout::standard()));
    assert!(empty.font_runs().is_empty());
    assert_eq!(empty.font_settings(0), Font::INHERIT);
}

#[test]
fn resolved_font_fills_inherited_fields() {
    let mut par = standard("abc");
    par.set_font(1, Font::INHERIT.with_shape(FontShape::Italic));
    let font = par.font(1);
    assert!(font.is_resolved());
    assert_eq!(font.shape, FontShape::Italic);
    assert_eq!(font.size, FontSize::Normal);

    let label = Paragraph::with_text(Arc::new(Layout::description()), "Term body");
    assert_eq!(label.font(0).series, FontSeries::Bold);
    assert_eq!(label.font(6).series, FontSeries::Medium);
}

#[test]
fn highest_size_in_range() {
    let mut par = standard("abcdef");
    par.set_font(4, Font::INHERIT.with_size(FontSize::Large));
    assert_eq!(par.highest_font_in_range(0..3, FontSize::Normal), FontSize::Normal);
    assert_eq!(par.highest_font_in_range(2..6, FontSize::Normal), FontSize::Large);
}

#[test]
fn external_runs_are_normalized() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    set_log_callback(move |level, message| {
        if level == LogLevel::Warn {
            if let Ok(mut guard) = sink.lock() {
                guard.push(message.to_string());
            }
        }
    });

    let italic = Font::INHERIT.with_shape(FontShape::Italic);
    let table = FontRunTable::from_runs(vec![(9, Font::INHERIT), (2, bold()), (2, italic)], 6);
    clear_log_callback();

    let table = table.unwrap();
    let runs: Vec<(usize, Font)> = table.runs().iter().map(|run| (run.end, run.value)).collect();
    assert_eq!(runs, vec![(2, italic), (5, Font::INHERIT)]);
    assert!(
        messages
            .lock()
            .unwrap()
            .iter()
            .any(|message| message.contains("normalized font runs for size 6"))
    );

    let mut par = standard("abcdef");
    assert!(par.set_font_runs(table).is_ok());
    assert_eq!(par.font_settings(1), italic);
}

#[test]
fn malformed_tables_are_rejected() {
    assert!(matches!(
        FontRunTable::from_runs(Vec::new(), 4),
        Err(Error::InvalidFontRuns(_))
    ));

    let table = FontRunTable::from_runs(vec![(2, bold())], 3).unwrap();
    let mut par = standard("abcdef");
    assert!(matches!(par.set_font_runs(table), Err(Error::InvalidFontRuns(_))));
    assert_eq!(par.font_runs().runs().len(), 1);
}

#[test]
fn attributes_distinguish_runs() {
    let mut par = standard("abc");
    let underlined = Font::INHERIT.with_attributes(FontAttributes::UNDERLINE);
    par.set_font(1, underlined);
    assert_eq!(par.font_runs().runs().len(), 3);
    assert_eq!(par.font(1).attributes, FontAttributes::UNDERLINE);
}
