// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Find nearby shapes with a cheap radius guess and a region query.
//!
//! The proximity bound gives a radius that surely contains something; shrinking
//! the search with `refine` keeps only the candidates that can still win.

use kurbo::{BezPath, Line, Shape};
use understory_quadtree::{Aabb2D, Point2D, QuadTree};

fn main() {
    env_logger::init();

    let mut shapes = Vec::new();
    for i in 0..12 {
        for j in 0..12 {
            let x = f64::from(i) * 25.0;
            let y = f64::from(j) * 25.0;
            let mut path = BezPath::new();
            path.move_to((x, y));
            path.line_to((x + 8.0, y + 2.0));
            path.line_to((x + 3.0, y + 9.0));
            path.close_path();
            shapes.push(path);
        }
    }
    let tree: QuadTree<'_, f64, BezPath> = QuadTree::new(&shapes, 0);
    let probe = Point2D::new(141.0, 66.0);

    let mut depth = 16;
    while depth > 0 {
        let Some(bound) = tree.sqr_proximity_upper_bound(probe, &mut depth, None) else {
            println!("index is empty");
            return;
        };
        let r = bound.sqrt();
        println!("depth {depth}: nearest shape within {r:.2}");

        let mut it = tree.query(Aabb2D::around(probe, r, r));
        let mut best: Option<(usize, f64)> = None;
        while it.has_current() {
            let (slot, path) = it.current();
            let d = Aabb2D::from(path.bounding_box()).min_sqr_dist(probe);
            if best.is_none_or(|(_, b)| d < b) {
                best = Some((slot, d));
                let r = d.sqrt();
                let narrower = Aabb2D::around(probe, r, r).intersect(it.query());
                it.refine(narrower);
            }
            it.advance();
        }
        if let Some((slot, d)) = best {
            println!("closest shape is {slot} at box distance {:.2}", d.sqrt());
            return;
        }
        // Nothing inside the guess: widen by climbing one level.
        depth -= 1;
    }

    let line = Line::new((0.0, 0.0), (300.0, 300.0));
    let on_diagonal = tree.query(Aabb2D::from(line.bounding_box())).count();
    println!("{on_diagonal} shapes overlap the diagonal's box");
}
