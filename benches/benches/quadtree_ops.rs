// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb2D, Point2D, QuadTree};

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

fn gen_grid_points(n: usize, cell: f64) -> Vec<Point2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point2D::new(x as f64 * cell, y as f64 * cell));
        }
    }
    out
}

fn gen_grid_points_i64(n: usize, cell: i64) -> Vec<Point2D<i64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point2D::new(x as i64 * cell, y as i64 * cell));
        }
    }
    out
}

fn gen_random_points(count: usize, extent: f64) -> Vec<Point2D<f64>> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point2D::new(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point2D<f64>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Point2D::new(cx + dx, cy + dy));
        }
    }
    out
}

fn gen_random_rects(count: usize, extent: f64, size: f64) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * (extent - size);
            let y0 = rng.next_f64() * (extent - size);
            Aabb2D::<f64>::from_xywh(x0, y0, size, size)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[64usize, 128, 256] {
        let pts = gen_grid_points(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_points_n{}", n), |b| {
            b.iter(|| black_box(QuadTree::new(&pts, 0).node_count()));
        });
    }
    let pts = gen_grid_points_i64(128, 10);
    group.bench_function("grid_points_i64_n128", |b| {
        b.iter(|| black_box(QuadTree::new(&pts, 0).node_count()));
    });
    let pts = gen_clustered_points(16, 1024, 80.0);
    group.bench_function("clustered_points", |b| {
        b.iter(|| black_box(QuadTree::new(&pts, 0).node_count()));
    });
    let rects = gen_random_rects(16_384, 2000.0, 12.0);
    group.bench_function("random_rects", |b| {
        b.iter(|| black_box(QuadTree::new(&rects, 0).node_count()));
    });
    group.finish();
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    let base = gen_random_points(4096, 1000.0);
    let extra = gen_random_points(4096, 1000.0);
    group.throughput(Throughput::Elements(extra.len() as u64));
    group.bench_function("reserved_inserts", |b| {
        b.iter_batched(
            || QuadTree::new(&base, extra.len()),
            |mut tree| {
                for p in &extra {
                    // Random points may fall outside the bulk-loaded bounds.
                    let _ = tree.try_add(p);
                }
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_region(c: &mut Criterion) {
    let mut group = c.benchmark_group("region");
    let pts = gen_random_points(65_536, 2000.0);
    let tree = QuadTree::new(&pts, 0);
    for &size in &[10.0, 100.0, 400.0] {
        let q = Aabb2D::<f64>::from_xywh(800.0, 800.0, size, size);
        group.bench_function(format!("points_rect_{}", size), |b| {
            b.iter(|| black_box(tree.query(q).count()));
        });
    }
    let rects = gen_random_rects(65_536, 2000.0, 12.0);
    let tree = QuadTree::new(&rects, 0);
    group.bench_function("rects_point", |b| {
        b.iter(|| black_box(tree.query(Point2D::new(1000.0, 1000.0)).count()));
    });
    group.finish();
}

fn bench_neighbours(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbours");
    let pts = gen_random_points(65_536, 2000.0);
    let tree = QuadTree::new(&pts, 0);
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let centers: Vec<_> = (0..256)
        .map(|_| Point2D::new(rng.next_f64() * 2000.0, rng.next_f64() * 2000.0))
        .collect();
    group.throughput(Throughput::Elements(centers.len() as u64));
    group.bench_function("nearest", |b| {
        b.iter(|| {
            for &c in &centers {
                black_box(tree.nearest(c));
            }
        });
    });
    for &k in &[8usize, 64] {
        group.bench_function(format!("first_{}_reused_iter", k), |b| {
            let mut it = tree.neighbours();
            b.iter(|| {
                for &c in &centers {
                    it.reset(c);
                    black_box(it.by_ref().take(k).count());
                }
            });
        });
    }
    group.bench_function("proximity_bound_then_region", |b| {
        b.iter(|| {
            for &c in &centers {
                let mut depth = 8;
                let bound = tree.sqr_proximity_upper_bound(c, &mut depth, None);
                if let Some(d) = bound {
                    let r = d.sqrt();
                    black_box(tree.query(Aabb2D::around(c, r, r)).count());
                }
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_add, bench_region, bench_neighbours);
criterion_main!(benches);
