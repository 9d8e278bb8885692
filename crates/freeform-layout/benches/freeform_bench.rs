//! Benchmarks for freeform pane operations.
//!
//! Run with: cargo bench -p freeform-layout

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use freeform_core::geometry::{Axis, Insets, Size};
use freeform_layout::headless::{HeadlessContent, HeadlessHost};
use freeform_layout::{Alignment, FreeformConfig, FreeformPanel, PaneId};

type Panel = FreeformPanel<HeadlessHost, HeadlessContent>;

fn fresh_panel() -> (Panel, HeadlessHost) {
    let host = HeadlessHost::new();
    let root = host.create_root(Size::new(1920.0, 1080.0));
    let panel = FreeformPanel::new(host.clone(), root, FreeformConfig::default());
    (panel, host)
}

/// Split the last visible pane `depth` times, alternating axes.
fn nested_panel(depth: usize) -> (Panel, HeadlessHost) {
    let (mut panel, host) = fresh_panel();
    let mut target = PaneId::ROOT;
    for level in 0..depth {
        let axis = if level % 2 == 0 {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        let children = panel.split_pane(target, axis, &[0.5, 0.5]);
        match children.last() {
            Some(last) => target = *last,
            None => break,
        }
    }
    (panel, host)
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("freeform/split");

    for parts in [2usize, 4, 8, 16] {
        let proportions = vec![1.0 / parts as f64; parts];
        group.bench_with_input(BenchmarkId::new("root", parts), &proportions, |b, props| {
            b.iter_batched(
                fresh_panel,
                |(mut panel, _host)| black_box(panel.split_pane(PaneId::ROOT, Axis::Horizontal, props)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_merge_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("freeform/merge_nested");

    for depth in [4usize, 16, 64, 256] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            b.iter_batched(
                || nested_panel(depth),
                |(mut panel, _host)| black_box(panel.merge_children(PaneId::ROOT)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_content_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("freeform/content");
    let (mut panel, host) = nested_panel(8);
    let leaves: Vec<(PaneId, HeadlessContent)> = panel
        .visible_panes()
        .iter()
        .map(|pane| (*pane, HeadlessContent::new(&host, Size::new(32.0, 32.0))))
        .collect();

    group.bench_function("add_align_remove", |b| {
        b.iter(|| {
            for (pane, content) in &leaves {
                let _ = panel.add_content(*pane, content.clone());
                let _ = panel.set_alignment(*pane, Alignment::BottomTrailing, Insets::all(4.0));
                black_box(panel.remove_content(*pane));
                let _ = panel.set_alignment(*pane, Alignment::Center, Insets::ZERO);
            }
        })
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("freeform/query");

    for depth in [16usize, 128] {
        let (panel, _host) = nested_panel(depth);
        let deepest = panel.visible_panes().last().copied().unwrap_or(PaneId::ROOT);
        let surface = panel
            .background_surface_for(deepest)
            .copied()
            .unwrap_or_else(|| *panel.background_surface_for(PaneId::ROOT).expect("root"));

        group.bench_with_input(BenchmarkId::new("find_pane_containing", depth), &surface, |b, s| {
            b.iter(|| black_box(panel.find_pane_containing(s)))
        });
        group.bench_with_input(BenchmarkId::new("validate", depth), &panel, |b, panel| {
            b.iter(|| black_box(panel.validate()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_split,
    bench_merge_nested,
    bench_content_cycle,
    bench_queries
);
criterion_main!(benches);
