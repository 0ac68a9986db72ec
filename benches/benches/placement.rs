// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_anchor::bind::Positioner;
use understory_anchor::clamp::clamp_to_viewport;
use understory_anchor::headless::HeadlessHost;
use understory_anchor::place::{ARROW_GAP, SIMPLE_GAP, place_floating, place_measured};
use understory_anchor::space::{available_space, best_side_with_fit};
use understory_anchor::types::{LogicalPosition, Placement, Side};
use understory_anchor::update::Triggers;

const VIEWPORT: Size = Size::new(1280.0, 800.0);

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

/// Triggers scattered over (and slightly past) the viewport, the way a scrolled page looks.
fn gen_triggers(count: usize) -> Vec<Rect> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * (VIEWPORT.width + 200.0) - 100.0;
            let y0 = rng.next_f64() * (VIEWPORT.height + 200.0) - 100.0;
            let w = 16.0 + rng.next_f64() * 160.0;
            let h = 16.0 + rng.next_f64() * 32.0;
            Rect::new(x0, y0, x0 + w, y0 + h)
        })
        .collect()
}

fn gen_sizes(count: usize) -> Vec<Size> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    (0..count)
        .map(|_| Size::new(40.0 + rng.next_f64() * 360.0, 20.0 + rng.next_f64() * 300.0))
        .collect()
}

fn bench_geometry(c: &mut Criterion) {
    let triggers = gen_triggers(4096);
    let sizes = gen_sizes(4096);
    let mut group = c.benchmark_group("geometry");
    group.throughput(Throughput::Elements(triggers.len() as u64));

    group.bench_function("place_floating", |b| {
        b.iter(|| {
            for (i, t) in triggers.iter().enumerate() {
                let position = match i % 3 {
                    0 => LogicalPosition::InlineEnd,
                    1 => LogicalPosition::BlockEnd,
                    _ => LogicalPosition::BlockEndStartAligned,
                };
                black_box(place_floating(*t, VIEWPORT, position, SIMPLE_GAP));
            }
        });
    });

    group.bench_function("best_side_with_fit", |b| {
        b.iter(|| {
            for (i, (t, s)) in triggers.iter().zip(&sizes).enumerate() {
                let space = available_space(*t, VIEWPORT);
                black_box(best_side_with_fit(Side::ALL[i % 4], &space, *s, ARROW_GAP));
            }
        });
    });

    group.bench_function("place_measured", |b| {
        b.iter(|| {
            for (i, (t, s)) in triggers.iter().zip(&sizes).enumerate() {
                let desired = Placement::ALL[i % Placement::ALL.len()];
                black_box(place_measured(*t, *s, VIEWPORT, desired, ARROW_GAP));
            }
        });
    });

    group.bench_function("clamp_to_viewport", |b| {
        b.iter(|| {
            for (t, s) in triggers.iter().zip(&sizes) {
                let applied = Rect::from_origin_size(t.origin(), *s);
                black_box(clamp_to_viewport(applied, VIEWPORT));
            }
        });
    });
    group.finish();
}

fn bench_bound_passes(c: &mut Criterion) {
    let mut group = c.benchmark_group("bound_passes");
    for &n in &[1usize, 16, 128] {
        let host = HeadlessHost::new(VIEWPORT);
        let positioner = Positioner::new(host.clone());
        let triggers = gen_triggers(n);
        let sizes = gen_sizes(n);
        let disposers: Vec<_> = triggers
            .iter()
            .zip(&sizes)
            .enumerate()
            .map(|(i, (t, s))| {
                let trigger = host.add_element(*t);
                let pop = host.add_element(Rect::from_origin_size((0.0, 0.0), *s));
                if i % 2 == 0 {
                    positioner.bind(pop, trigger, LogicalPosition::BlockEnd)
                } else {
                    positioner.bind_measured(pop, trigger, Placement::ALL[i % 12])
                }
            })
            .collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("scroll_n{}", n), |b| {
            b.iter(|| host.dispatch(black_box(Triggers::SCROLL)));
        });
        drop(disposers);
    }
    group.finish();
}

criterion_group!(benches, bench_geometry, bench_bound_passes);
criterion_main!(benches);
