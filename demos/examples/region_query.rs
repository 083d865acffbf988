// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region queries over Kurbo rectangles, including late additions.

use kurbo::{Point, Rect};
use understory_quadtree::{Aabb2D, Point2D, QuadTree};

fn main() {
    env_logger::init();

    let rects = vec![
        Rect::new(0.0, 0.0, 400.0, 300.0),
        Rect::new(20.0, 20.0, 120.0, 80.0),
        Rect::new(150.0, 40.0, 260.0, 140.0),
        Rect::new(60.0, 200.0, 180.0, 260.0),
        Rect::new(300.0, 10.0, 390.0, 60.0),
    ];
    let popups = vec![Rect::new(100.0, 50.0, 170.0, 120.0)];
    let mut tree: QuadTree<'_, f64, Rect> = QuadTree::new(&rects, popups.len());
    for popup in &popups {
        let slot = tree.add(popup);
        println!("popup {popup:?} stored at slot {slot}");
    }
    println!("{tree:?}");

    let cursor = Point::new(160.0, 60.0);
    let mut under: Vec<usize> = tree.query(Point2D::from(cursor)).map(|(slot, _)| slot).collect();
    under.sort_unstable();
    println!("under cursor {cursor:?}: {under:?}");

    let selection = Rect::new(50.0, 30.0, 200.0, 90.0);
    for (slot, r) in tree.query(Aabb2D::from(selection)) {
        println!("selection touches {slot}: {r:?}");
    }
}
