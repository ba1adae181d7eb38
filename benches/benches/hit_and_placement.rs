// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};
use understory_reaction::hit::HitIndex;
use understory_reaction::placement::{AnchoredPositionProvider, resolve_placement};
use understory_reaction::reaction::{Icon, Label, Reaction};
use understory_reaction::state::PickerState;
use understory_reaction::types::LayoutDirection;

const ITEM: f64 = 40.0;
const GAP: f64 = 4.0;

fn strip(n: usize) -> HitIndex {
    let mut index = HitIndex::new(n, 2.0);
    index.set_strip_bounds(Rect::new(0.0, 0.0, n as f64 * (ITEM + GAP), 115.0));
    for i in 0..n {
        let x = i as f64 * (ITEM + GAP);
        let _ = index.update(i, Rect::new(x, 60.0, x + ITEM, 100.0));
    }
    index
}

/// Pointer positions sweeping the strip left to right, including gaps and misses.
fn sweep(n: usize, steps: usize) -> Vec<Point> {
    let width = n as f64 * (ITEM + GAP);
    (0..steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            Point::new(-10.0 + t * (width + 20.0), 20.0 + (i % 7) as f64 * 20.0)
        })
        .collect()
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_resolve");
    for &n in &[6usize, 12, 48] {
        let index = strip(n);
        let points = sweep(n, 256);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("sweep_n{}", n), |b| {
            b.iter(|| {
                let hits = points
                    .iter()
                    .filter(|p| index.resolve(**p).is_some())
                    .count();
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_relayout(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_relayout");
    let n = 6;
    let mut rng = Rng::new(0x5eed);
    // Hover resizes: one item grows, the others shrink, then every item reports again.
    let layouts: Vec<Vec<Rect>> = (0..64)
        .map(|_| {
            let hovered = (rng.next_f64() * n as f64) as usize;
            let mut x = 0.0;
            (0..n)
                .map(|i| {
                    let size = if i == hovered { 72.0 } else { 34.0 };
                    let r = Rect::new(x, 100.0 - size, x + size, 100.0);
                    x += size + GAP;
                    r
                })
                .collect()
        })
        .collect();
    group.throughput(Throughput::Elements((layouts.len() * n) as u64));
    group.bench_function("update_then_resolve", |b| {
        b.iter_batched(
            || strip(n),
            |mut index| {
                let mut hits = 0;
                for layout in &layouts {
                    for (i, r) in layout.iter().copied().enumerate() {
                        let _ = index.update(i, r);
                    }
                    hits += usize::from(index.resolve(Point::new(100.0, 50.0)).is_some());
                }
                black_box(hits);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    let window = Size::new(360.0, 640.0);
    let content = Size::new(276.0, 115.2);
    let provider = AnchoredPositionProvider::default();
    let mut rng = Rng::new(42);
    let anchors: Vec<(Rect, Vec2)> = (0..256)
        .map(|_| {
            let top = rng.next_f64() * 600.0;
            let tap = Vec2::new(rng.next_f64() * 360.0, 20.0);
            (Rect::new(0.0, top, 360.0, top + 40.0), tap)
        })
        .collect();
    group.throughput(Throughput::Elements(anchors.len() as u64));
    group.bench_function("resolve_placement", |b| {
        b.iter(|| {
            for &(anchor, tap) in &anchors {
                black_box(resolve_placement(
                    &provider,
                    anchor,
                    window,
                    LayoutDirection::Ltr,
                    content,
                    tap,
                ));
            }
        })
    });

    let reactions: Vec<Reaction> = (0..6)
        .map(|i| Reaction::new(Label::Resource(i), Icon::Image(i)))
        .collect();
    group.bench_function("state_place", |b| {
        b.iter_batched(
            || {
                PickerState::new(reactions.clone(), None, |_| {}).unwrap()
            },
            |mut state| {
                for &(anchor, tap) in &anchors {
                    state.set_anchor_bounds(anchor);
                    state.show(Some(tap.to_point()));
                    black_box(state.place(&provider, window, LayoutDirection::Ltr, content));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_relayout, bench_placement);
criterion_main!(benches);
