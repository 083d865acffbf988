// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assign every pin to its nearest depot, skipping depots that are closed.
//!
//! Run with `RUST_LOG=debug` to see the tree build summary.

use kurbo::Point;
use understory_quadtree::{Point2D, QuadTree};

fn main() {
    env_logger::init();

    let depots = vec![
        Point::new(10.0, 10.0),
        Point::new(90.0, 15.0),
        Point::new(50.0, 80.0),
        Point::new(15.0, 70.0),
        Point::new(85.0, 85.0),
    ];
    let closed = [false, true, false, false, false];
    let tree: QuadTree<'_, f64, Point> = QuadTree::new(&depots, 0);

    let pins = [
        Point::new(20.0, 20.0),
        Point::new(80.0, 20.0),
        Point::new(55.0, 60.0),
        Point::new(5.0, 95.0),
    ];
    for pin in pins {
        match tree.nearest_where(Point2D::from(pin), |slot, _| !closed[slot]) {
            Some((slot, depot, d)) => {
                log::info!("pin {pin:?} -> depot {slot} at {depot:?}");
                println!("{pin:?} -> depot {slot} ({:.2} away)", d.sqrt());
            }
            None => println!("{pin:?} has no open depot"),
        }
    }
}
