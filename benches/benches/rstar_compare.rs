// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb2D, Point2D, QuadTree};

use rstar::{AABB, RTree};

fn gen_grid_points(n: usize, cell: f64) -> Vec<Point2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point2D::new(x as f64 * cell, y as f64 * cell));
        }
    }
    out
}

fn to_rstar_points(v: &[Point2D<f64>]) -> Vec<[f64; 2]> {
    v.iter().map(|p| [p.x, p.y]).collect()
}

fn bench_rstar_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_compare_f64");
    for &n in &[64usize, 128] {
        let pts = gen_grid_points(n, 10.0);
        let query = Aabb2D::<f64>::from_xywh(100.0, 100.0, 400.0, 400.0);
        let center = Point2D::new(n as f64 * 5.0 + 3.0, n as f64 * 5.0 + 1.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter(|| {
                let tree = QuadTree::new(&pts, 0);
                black_box(tree.query(query).count());
            });
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter(|| {
                let tree = RTree::bulk_load(to_rstar_points(&pts));
                let aabb = AABB::from_corners([query.min_x, query.min_y], [query.max_x, query.max_y]);
                black_box(tree.locate_in_envelope_intersecting(&aabb).count());
            });
        });

        let tree = QuadTree::new(&pts, 0);
        let rtree = RTree::bulk_load(to_rstar_points(&pts));
        group.bench_function(format!("understory_first_32_n{}", n), |b| {
            let mut it = tree.neighbours();
            b.iter(|| {
                it.reset(center);
                black_box(it.by_ref().take(32).count());
            });
        });
        group.bench_function(format!("rstar_first_32_n{}", n), |b| {
            b.iter(|| {
                black_box(rtree.nearest_neighbor_iter(&[center.x, center.y]).take(32).count());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_compare_f64);
criterion_main!(benches);
