// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index `kurbo` geometry directly.
//!
//! ## Feature
//!
//! Enable with `kurbo_adapter`.
//!
//! ## Notes
//!
//! Points are indexed as points, so nearest-neighbour distances to them are
//! exact. Every other shape is indexed by its bounding box, which makes its
//! reported distance a lower bound.
//! Rectangles with negative width or height are normalized first.

use kurbo::{BezPath, Line, Point, Rect, Shape};

use crate::extents::SpatialObject;
use crate::types::{Aabb2D, Point2D};

impl From<Point> for Point2D<f64> {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point2D<f64>> for Point {
    fn from(p: Point2D<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Rect> for Aabb2D<f64> {
    fn from(r: Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

impl From<Aabb2D<f64>> for Rect {
    fn from(b: Aabb2D<f64>) -> Self {
        Self::new(b.min_x, b.min_y, b.max_x, b.max_y)
    }
}

impl SpatialObject<f64> for Point {
    type Extents = Point2D<f64>;

    fn extents(&self) -> Point2D<f64> {
        (*self).into()
    }
}

impl SpatialObject<f64> for Rect {
    type Extents = Aabb2D<f64>;

    fn extents(&self) -> Aabb2D<f64> {
        (*self).into()
    }
}

impl SpatialObject<f64> for Line {
    type Extents = Aabb2D<f64>;

    fn extents(&self) -> Aabb2D<f64> {
        self.bounding_box().into()
    }
}

/// An empty path has undefined extents and is never reported.
impl SpatialObject<f64> for BezPath {
    type Extents = Aabb2D<f64>;

    fn extents(&self) -> Aabb2D<f64> {
        if self.elements().is_empty() {
            return Aabb2D::undefined();
        }
        self.bounding_box().into()
    }
}
