// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use kurbo::Point;
use marquee_geometry::{PathSink, Rectangle};
use marquee_tracking::{DrawingSurface, Marquee, RecordingSurface, TrackingSurface};

/// `n * n` cells, alternating filled squares and rounded-rectangle paths.
fn draw_grid(n: usize, cell: f64) -> TrackingSurface<RecordingSurface> {
    let mut s = TrackingSurface::new(RecordingSurface::new());
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let size = cell * 0.8;
            if (x + y) % 2 == 0 {
                s.fill_rect(Rectangle::new(x0, y0, size, size));
            } else {
                let r = size * 0.2;
                s.begin_path();
                s.move_to(Point::new(x0 + r, y0));
                s.arc_to(Point::new(x0 + size, y0), Point::new(x0 + size, y0 + size), r);
                s.arc_to(Point::new(x0 + size, y0 + size), Point::new(x0, y0 + size), r);
                s.arc_to(Point::new(x0, y0 + size), Point::new(x0, y0), r);
                s.arc_to(Point::new(x0, y0), Point::new(x0 + size, y0), r);
                s.close_path();
            }
        }
    }
    s.inner_mut().clear_events();
    s
}

/// A drag that grows diagonally across the grid, one pointer move per step.
fn drag_path(steps: usize, extent: f64) -> Vec<Point> {
    (1..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            Point::new(5.0 + t * extent, 5.0 + t * extent * 0.5)
        })
        .collect()
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_query_drag");
    for &n in &[8usize, 32] {
        let cell = 20.0;
        let pointers = drag_path(64, n as f64 * cell);
        group.throughput(Throughput::Elements(pointers.len() as u64));
        group.bench_function(BenchmarkId::new("grid", n), |b| {
            b.iter_batched(
                || draw_grid(n, cell),
                |mut s| {
                    s.begin_gesture();
                    let marquee = Marquee::new(Point::new(5.0, 5.0));
                    let mut total = 0usize;
                    for &p in &pointers {
                        total += marquee.select(&mut s, p, |inner, _| {
                            inner.stroke_rect(Rectangle::new(0.0, 0.0, 0.0, 0.0));
                        });
                        s.inner_mut().clear_events();
                    }
                    total
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_repeated_query(c: &mut Criterion) {
    let mut s = draw_grid(32, 20.0);
    let rect = Rectangle::new(5.0, 5.0, 300.0, 200.0);
    let anchor = Point::new(5.0, 5.0);
    c.bench_function("range_query_repeat/grid/32", |b| {
        b.iter(|| {
            let hits = s.range_query(&rect, anchor, |_, _| {});
            s.inner_mut().clear_events();
            hits
        });
    });
}

criterion_group!(benches, bench_drag, bench_repeated_query);
criterion_main!(benches);
