// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extents of indexed objects, quadrant classification, and the object trait.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::{Aabb2D, Point2D, Scalar, le, sqr_dist};

/// Where an extent falls relative to the center of a node.
///
/// The first half of each name refers to `x`, the second to `y`: `MaxMin` is
/// the quadrant with `x ≥ center.x` and `y < center.y`.
/// A value exactly on a split line belongs to the high side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `x < cx`, `y < cy`.
    MinMin,
    /// `x < cx`, `y ≥ cy`.
    MinMax,
    /// `x ≥ cx`, `y < cy`.
    MaxMin,
    /// `x ≥ cx`, `y ≥ cy`.
    MaxMax,
    /// The extent reaches across the center on at least one axis.
    Straddling,
}

impl Quadrant {
    /// Classify by the two per-axis comparisons `x ≥ cx` and `y ≥ cy`.
    pub const fn from_sides(x_high: bool, y_high: bool) -> Self {
        match (x_high, y_high) {
            (false, false) => Self::MinMin,
            (false, true) => Self::MinMax,
            (true, false) => Self::MaxMin,
            (true, true) => Self::MaxMax,
        }
    }

    /// Position of the matching child among the four children of a split node.
    ///
    /// Returns `None` for [`Quadrant::Straddling`].
    pub const fn child_index(self) -> Option<usize> {
        match self {
            Self::MinMin => Some(0),
            Self::MinMax => Some(1),
            Self::MaxMin => Some(2),
            Self::MaxMax => Some(3),
            Self::Straddling => None,
        }
    }

    /// True unless the extent straddles the center.
    pub const fn is_single(self) -> bool {
        !matches!(self, Self::Straddling)
    }
}

/// The cached geometric footprint of an indexed object, also used as a query shape.
///
/// Implemented by [`Point2D`] (point leafs and point queries) and [`Aabb2D`]
/// (polygon bounding boxes and box queries).
pub trait Extents<T: Scalar>: Copy + PartialEq + Debug {
    /// The closed bounding box.
    fn bounds(&self) -> Aabb2D<T>;

    /// The lowest corner; region queries descend the tree along it.
    fn anchor(&self) -> Point2D<T>;

    /// Which quadrant around `center` holds this extent.
    fn quadrant(&self, center: Point2D<T>) -> Quadrant;

    /// False for empty extents or extents with undefined coordinates.
    fn is_defined(&self) -> bool;

    /// Admissible squared-distance lower bound from `center`.
    fn min_sqr_dist(&self, center: Point2D<T>) -> T::Acc;

    /// Whether the two extents share at least one point.
    fn intersects<E: Extents<T>>(&self, other: &E) -> bool {
        self.bounds().overlaps(&other.bounds())
    }

    /// Whether `other` lies entirely within this extent.
    fn includes<E: Extents<T>>(&self, other: &E) -> bool {
        self.bounds().contains(&other.bounds())
    }
}

impl<T: Scalar> Extents<T> for Point2D<T> {
    fn bounds(&self) -> Aabb2D<T> {
        Aabb2D::from_point(*self)
    }

    fn anchor(&self) -> Point2D<T> {
        *self
    }

    fn quadrant(&self, center: Point2D<T>) -> Quadrant {
        Quadrant::from_sides(le(center.x, self.x), le(center.y, self.y))
    }

    fn is_defined(&self) -> bool {
        T::is_defined(self.x) && T::is_defined(self.y)
    }

    fn min_sqr_dist(&self, center: Point2D<T>) -> T::Acc {
        sqr_dist(center, *self)
    }
}

impl<T: Scalar> Extents<T> for Aabb2D<T> {
    fn bounds(&self) -> Aabb2D<T> {
        *self
    }

    fn anchor(&self) -> Point2D<T> {
        self.min()
    }

    fn quadrant(&self, center: Point2D<T>) -> Quadrant {
        let (Some(x_high), Some(y_high)) = (
            interval_side(self.min_x, self.max_x, center.x),
            interval_side(self.min_y, self.max_y, center.y),
        ) else {
            return Quadrant::Straddling;
        };
        Quadrant::from_sides(x_high, y_high)
    }

    fn is_defined(&self) -> bool {
        Self::is_defined(self)
    }

    fn min_sqr_dist(&self, center: Point2D<T>) -> T::Acc {
        Self::min_sqr_dist(self, center)
    }
}

/// `Some(true)` if `[lo, hi]` starts at or beyond `mid`, `Some(false)` if it
/// ends before it, `None` if it reaches across.
fn interval_side<T: Scalar>(lo: T, hi: T, mid: T) -> Option<bool> {
    debug_assert!(le(lo, hi), "inverted interval classified");
    if le(mid, lo) {
        Some(true)
    } else if le(mid, hi) {
        None
    } else {
        Some(false)
    }
}

/// Geometry the index can refer to.
///
/// The index never copies, owns, or frees objects; it holds shared references
/// and caches [`SpatialObject::extents`] once per object.
pub trait SpatialObject<T: Scalar> {
    /// The cached footprint kind: [`Point2D`] for points, [`Aabb2D`] for everything else.
    type Extents: Extents<T>;

    /// Compute the extents of this object.
    fn extents(&self) -> Self::Extents;
}

impl<T: Scalar> SpatialObject<T> for Point2D<T> {
    type Extents = Self;

    fn extents(&self) -> Self {
        *self
    }
}

impl<T: Scalar> SpatialObject<T> for Aabb2D<T> {
    type Extents = Self;

    fn extents(&self) -> Self {
        *self
    }
}

/// A polygon or polyline given as its sequence of vertices.
///
/// An empty sequence has undefined extents.
impl<T: Scalar> SpatialObject<T> for [Point2D<T>] {
    type Extents = Aabb2D<T>;

    fn extents(&self) -> Aabb2D<T> {
        let mut it = self.iter().copied();
        let Some(first) = it.next() else {
            return Aabb2D::undefined();
        };
        it.fold(Aabb2D::from_point(first), |acc, p| {
            acc.union(&Aabb2D::from_point(p))
        })
    }
}

impl<T: Scalar> SpatialObject<T> for Vec<Point2D<T>> {
    type Extents = Aabb2D<T>;

    fn extents(&self) -> Aabb2D<T> {
        self.as_slice().extents()
    }
}
