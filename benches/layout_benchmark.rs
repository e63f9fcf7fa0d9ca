//! Layout pass benchmarks.
//!
//! A pass runs on every focus change and document display, so it has to stay
//! cheap even with many panes over a long document.
//!
//! Run with: cargo bench --bench layout_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use multipage::host::MemoryHost;
use multipage::layout::{ensure_columns, LayoutEngine};
use multipage::model::{DocumentId, GroupId, Overlap};

const TOTAL_LINES: usize = 200_000;
const PANE_HEIGHT: usize = 60;

fn desk(panes: usize) -> (MemoryHost, DocumentId, GroupId) {
    let mut host = MemoryHost::new();
    let doc = host.add_document(TOTAL_LINES);
    let group = host.add_group();
    for _ in 0..panes {
        host.open_viewport(group, doc, PANE_HEIGHT);
    }
    (host, doc, group)
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_apply");
    let engine = LayoutEngine::new(Overlap::DEFAULT);

    for panes in [2usize, 4, 8, 16] {
        let (mut host, doc, window_group) = desk(panes);
        group.bench_with_input(BenchmarkId::new("panes", panes), &panes, |b, _| {
            b.iter(|| {
                let outcome = engine
                    .apply(black_box(&mut host), doc, window_group)
                    .expect("layout succeeds");
                black_box(outcome);
            });
        });
    }

    group.finish();
}

fn bench_provision(c: &mut Criterion) {
    let mut group = c.benchmark_group("ensure_columns");

    for columns in [2usize, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("columns", columns),
            &columns,
            |b, &columns| {
                b.iter_batched(
                    || desk(1),
                    |(mut host, doc, window_group)| {
                        let panes = ensure_columns(&mut host, doc, window_group, columns)
                            .expect("provisioning succeeds");
                        black_box(panes);
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_apply, bench_provision);
criterion_main!(benches);
