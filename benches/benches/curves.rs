// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use marquee_geometry::{Arc, CubicBezier, HitTest, QuadraticBezier, Rectangle};

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
    fn point(&mut self, extent: f64) -> Point {
        Point::new(self.next_f64() * extent, self.next_f64() * extent)
    }
}

fn gen_query_rects(n: usize, extent: f64, seed: u64) -> Vec<Rectangle> {
    let mut rng = Rng::new(seed);
    (0..n)
        .map(|_| {
            let origin = rng.point(extent);
            Rectangle::new(origin.x, origin.y, 1.0 + rng.next_f64() * 40.0, 1.0 + rng.next_f64() * 40.0)
        })
        .collect()
}

fn bench_construction(c: &mut Criterion) {
    let mut rng = Rng::new(0x5eed);
    let points: Vec<Point> = (0..4096).map(|_| rng.point(1000.0)).collect();

    let mut group = c.benchmark_group("construct");
    group.throughput(Throughput::Elements(1024));
    group.bench_function("QuadraticBezier", |b| {
        b.iter(|| {
            for p in points.chunks_exact(4) {
                black_box(QuadraticBezier::new(p[0], p[1], p[2]));
            }
        });
    });
    group.bench_function("CubicBezier", |b| {
        b.iter(|| {
            for p in points.chunks_exact(4) {
                black_box(CubicBezier::new(p[0], p[1], p[2], p[3]));
            }
        });
    });
    group.bench_function("Arc::from_tangents", |b| {
        b.iter(|| {
            for p in points.chunks_exact(4) {
                black_box(Arc::from_tangents(p[0], p[1], p[2], 10.0 + p[3].x * 0.01));
            }
        });
    });
    group.finish();
}

fn bench_intersects(c: &mut Criterion) {
    let mut rng = Rng::new(0xcafe);
    let quads: Vec<QuadraticBezier> = (0..256)
        .map(|_| QuadraticBezier::new(rng.point(1000.0), rng.point(1000.0), rng.point(1000.0)))
        .collect();
    let cubics: Vec<CubicBezier> = (0..256)
        .map(|_| {
            CubicBezier::new(
                rng.point(1000.0),
                rng.point(1000.0),
                rng.point(1000.0),
                rng.point(1000.0),
            )
        })
        .collect();

    let mut group = c.benchmark_group("intersects");
    for &n in &[16usize, 128] {
        let queries = gen_query_rects(n, 1000.0, 0xbeef);
        group.throughput(Throughput::Elements((n * quads.len()) as u64));
        group.bench_function(BenchmarkId::new("QuadraticBezier", n), |b| {
            b.iter(|| {
                let mut total = 0usize;
                for q in &queries {
                    total += quads.iter().filter(|c| c.intersects(q)).count();
                }
                total
            });
        });
        group.bench_function(BenchmarkId::new("CubicBezier", n), |b| {
            b.iter(|| {
                let mut total = 0usize;
                for q in &queries {
                    total += cubics.iter().filter(|c| c.intersects(q)).count();
                }
                total
            });
        });
    }
    group.finish();
}

fn bench_winding(c: &mut Criterion) {
    let mut rng = Rng::new(0xf00d);
    let cubics: Vec<CubicBezier> = (0..256)
        .map(|_| {
            CubicBezier::new(
                rng.point(1000.0),
                rng.point(1000.0),
                rng.point(1000.0),
                rng.point(1000.0),
            )
        })
        .collect();
    let probes: Vec<Point> = (0..64).map(|_| rng.point(1000.0)).collect();

    c.bench_function("winding/CubicBezier", |b| {
        b.iter(|| {
            let mut sum = 0i32;
            for p in &probes {
                for c in &cubics {
                    sum += c.winding(*p);
                }
            }
            sum
        });
    });
}

criterion_group!(benches, bench_construction, bench_intersects, bench_winding);
criterion_main!(benches);
