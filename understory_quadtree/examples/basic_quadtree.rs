// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Quadtree: build, add, query a region, walk neighbours.

use understory_quadtree::{Aabb2D, Point2D, QuadTree};

fn main() {
    let pts = [
        Point2D::new(0_i64, 0),
        Point2D::new(10, 0),
        Point2D::new(0, 10),
        Point2D::new(10, 10),
        Point2D::new(5, 5),
    ];
    let late = Point2D::new(7, 2);
    let mut tree = QuadTree::new(&pts, 1);
    let slot = tree.add(&late);
    println!("added {late:?} at slot {slot}; {tree:?}");

    // Query a region
    let hits: Vec<_> = tree.query(Aabb2D::new(4, 0, 10, 6)).collect();
    println!("hits in [4,0]..[10,6]: {hits:?}");

    // Walk outward from a point
    let mut it = tree.neighbours();
    it.reset(Point2D::new(4, 4));
    for (slot, p, d) in it {
        println!("slot {slot}: {p:?} at squared distance {d}");
    }
}
