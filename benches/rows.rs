//! Row layout performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use paracore::{
    BreakContext, Layout, MonospaceMetrics, Paragraph, RowBreaker, VerticalContext, build_rows,
    column_near_x, compute_row_metrics, cursor_x,
};
use std::hint::black_box;
use std::sync::Arc;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. ";

fn paragraph_of(repeat: usize) -> Paragraph {
    Paragraph::with_text(Arc::new(Layout::standard()), &LOREM.repeat(repeat))
}

fn break_rows(c: &mut Criterion) {
    let metrics = MonospaceMetrics::new(7, 11, 3);
    let mut group = c.benchmark_group("break_rows");
    for repeat in [1, 10, 100] {
        let par = paragraph_of(repeat);
        let ctx = BreakContext::new(&metrics, 560);
        group.bench_with_input(BenchmarkId::from_parameter(par.size()), &par, |b, par| {
            b.iter(|| RowBreaker::new(black_box(par), &ctx).break_rows());
        });
    }
    group.finish();
}

fn full_layout(c: &mut Criterion) {
    let metrics = MonospaceMetrics::new(7, 11, 3);
    let par = paragraph_of(10);
    let ctx = BreakContext::new(&metrics, 560);
    let vctx = VerticalContext::default();

    c.bench_function("build_rows_2k", |b| {
        b.iter(|| build_rows(black_box(&par), &ctx, &vctx));
    });

    let mut cached = paragraph_of(10);
    cached.layout_rows(&ctx, &vctx);
    c.bench_function("layout_rows_cached", |b| {
        b.iter(|| cached.layout_rows(black_box(&ctx), &vctx).len());
    });
}

fn row_metrics(c: &mut Criterion) {
    let metrics = MonospaceMetrics::new(7, 11, 3);
    let par = paragraph_of(1);
    let ctx = BreakContext::new(&metrics, 560);
    let rows = RowBreaker::new(&par, &ctx).break_rows();
    let row = rows[0];

    c.bench_function("compute_row_metrics", |b| {
        b.iter(|| compute_row_metrics(black_box(&par), black_box(&row), &ctx));
    });

    c.bench_function("cursor_x_row_end", |b| {
        b.iter(|| cursor_x(black_box(&par), &row, black_box(row.end - 1), false, &ctx));
    });

    c.bench_function("column_near_x_mid", |b| {
        b.iter(|| column_near_x(black_box(&par), &row, black_box(280), &ctx));
    });
}

criterion_group!(benches, break_rows, full_layout, row_metrics);
criterion_main!(benches);
