// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types, scalar abstraction, and squared-distance bounds.

use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::{Add, Mul, Sub};

/// A point in 2D. `x` is the first axis, `y` the second.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point2D<T> {
    /// First coordinate.
    pub x: T,
    /// Second coordinate.
    pub y: T,
}

impl<T> Point2D<T> {
    /// Create a new point.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in 2D, closed on all sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy> Aabb2D<T> {
    /// A degenerate AABB covering exactly one point.
    pub const fn from_point(p: Point2D<T>) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// The minimum corner.
    pub const fn min(&self) -> Point2D<T> {
        Point2D::new(self.min_x, self.min_y)
    }

}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether this AABB contains the point (boundary included).
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// Whether `other` lies entirely inside this AABB (boundary included).
    pub fn contains(&self, other: &Self) -> bool {
        le(self.min_x, other.min_x)
            && le(self.min_y, other.min_y)
            && le(other.max_x, self.max_x)
            && le(other.max_y, self.max_y)
    }

    /// Whether the two AABBs share at least one point (boundary included).
    pub fn overlaps(&self, other: &Self) -> bool {
        le(other.min_x, self.max_x)
            && le(self.min_x, other.max_x)
            && le(other.min_y, self.max_y)
            && le(self.min_y, other.max_y)
    }

    /// The intersection of two AABBs.
    pub fn intersect(&self, other: &Self) -> Self {
        let min_x = max_t(self.min_x, other.min_x);
        let min_y = max_t(self.min_y, other.min_y);
        let max_x = min_t(self.max_x, other.max_x);
        let max_y = min_t(self.max_y, other.max_y);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The smallest AABB covering both.
    pub fn union(&self, other: &Self) -> Self {
        union_aabb(*self, *other)
    }

    /// True if the AABB is inverted on some axis.
    ///
    /// Comparisons against NaN are false, so a box with undefined coordinates
    /// is not reported as empty; check [`Aabb2D::is_defined`] for that.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// An AABB with every coordinate undefined; used for objects without extents.
    pub fn undefined() -> Self {
        Self::new(T::undefined(), T::undefined(), T::undefined(), T::undefined())
    }

    /// The AABB centered on `center` reaching `half_w` and `half_h` to either side.
    ///
    /// Callers use this to turn a proximity radius into a region query.
    pub fn around(center: Point2D<T>, half_w: T, half_h: T) -> Self {
        Self::new(
            T::sub(center.x, half_w),
            T::sub(center.y, half_h),
            T::add(center.x, half_w),
            T::add(center.y, half_h),
        )
    }

    /// True if all coordinates are defined and the box is not inverted.
    pub fn is_defined(&self) -> bool {
        T::is_defined(self.min_x)
            && T::is_defined(self.min_y)
            && T::is_defined(self.max_x)
            && T::is_defined(self.max_y)
            && !self.is_empty()
    }

    /// The split point used when bisecting this box on both axes.
    pub fn center(&self) -> Point2D<T> {
        Point2D::new(T::mid(self.min_x, self.max_x), T::mid(self.min_y, self.max_y))
    }

    /// The four quadrants obtained by bisecting at [`Aabb2D::center`].
    ///
    /// Order follows [`Quadrant::child_index`](crate::Quadrant::child_index):
    /// `(low x, low y)`, `(low x, high y)`, `(high x, low y)`, `(high x, high y)`.
    pub fn quadrants(&self) -> [Self; 4] {
        let mid = self.center();
        [
            Self::new(self.min_x, self.min_y, mid.x, mid.y),
            Self::new(self.min_x, mid.y, mid.x, self.max_y),
            Self::new(mid.x, self.min_y, self.max_x, mid.y),
            Self::new(mid.x, mid.y, self.max_x, self.max_y),
        ]
    }

    /// Whether bisecting at the center strictly shrinks the box on some axis.
    ///
    /// Integer and float precision eventually make the center coincide with a
    /// corner; such a box would reproduce itself as one of its quadrants.
    pub fn is_divisible(&self) -> bool {
        let mid = self.center();
        (lt(self.min_x, mid.x) && lt(mid.x, self.max_x))
            || (lt(self.min_y, mid.y) && lt(mid.y, self.max_y))
    }

    /// Squared distance from `p` to the nearest point of this box; zero inside.
    ///
    /// Never exceeds the squared distance from `p` to anything contained in the box.
    pub fn min_sqr_dist(&self, p: Point2D<T>) -> T::Acc {
        T::acc_add(
            axis_min_sqr_dist(p.x, self.min_x, self.max_x),
            axis_min_sqr_dist(p.y, self.min_y, self.max_y),
        )
    }

    /// Squared distance from `p` to the farthest corner of this box.
    pub fn max_sqr_dist(&self, p: Point2D<T>) -> T::Acc {
        T::acc_add(
            axis_max_sqr_dist(p.x, self.min_x, self.max_x),
            axis_max_sqr_dist(p.y, self.min_y, self.max_y),
        )
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from origin and size in f64.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

/// Numeric scalar abstraction for coordinates.
///
/// Provides the handful of operations the quadtree needs to bisect boxes and
/// compute distance bounds, and an associated widened accumulator type for
/// squared distances (e.g., f32→f64, i64→i128). Integer accumulators saturate
/// instead of overflowing, which keeps every distance bound admissible and
/// ordered even for coordinates spanning the whole `i64` range.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for squared distances.
    type Acc: Copy
        + PartialOrd
        + Add<Output = Self::Acc>
        + Sub<Output = Self::Acc>
        + Mul<Output = Self::Acc>
        + Debug;

    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// The value marking a missing coordinate.
    fn undefined() -> Self;

    /// Whether `v` is an actual coordinate rather than the undefined marker.
    fn is_defined(v: Self) -> bool;

    /// Midpoint between a and b (the split line of a quadrant).
    fn mid(a: Self, b: Self) -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;

    /// Square an accumulator value.
    fn acc_sqr(v: Self::Acc) -> Self::Acc;

    /// Add two accumulator values.
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn undefined() -> Self {
        Self::NAN
    }

    #[inline]
    fn is_defined(v: Self) -> bool {
        !v.is_nan()
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }

    #[inline]
    fn acc_sqr(v: Self::Acc) -> Self::Acc {
        v * v
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a + b
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn undefined() -> Self {
        Self::NAN
    }

    #[inline]
    fn is_defined(v: Self) -> bool {
        !v.is_nan()
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }

    #[inline]
    fn acc_sqr(v: Self::Acc) -> Self::Acc {
        v * v
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a + b
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    // `i64::MIN` has no positive counterpart, which makes it the natural sentinel.
    #[inline]
    fn undefined() -> Self {
        Self::MIN
    }

    #[inline]
    fn is_defined(v: Self) -> bool {
        v != Self::MIN
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow: (a & b) + ((a ^ b) >> 1)
        (a & b) + ((a ^ b) >> 1)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }

    // Differences of two i64 always fit; only squares and sums can exceed i128.
    #[inline]
    fn acc_sqr(v: Self::Acc) -> Self::Acc {
        v.saturating_mul(v)
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_add(b)
    }
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

/// Squared Euclidean distance between two points, clamped to the accumulator range.
#[inline]
pub fn sqr_dist<T: Scalar>(a: Point2D<T>, b: Point2D<T>) -> T::Acc {
    let dx = T::widen(a.x) - T::widen(b.x);
    let dy = T::widen(a.y) - T::widen(b.y);
    T::acc_add(T::acc_sqr(dx), T::acc_sqr(dy))
}

#[inline]
fn acc_zero<T: Scalar>() -> T::Acc {
    T::widen(T::zero())
}

#[inline]
fn axis_min_sqr_dist<T: Scalar>(c: T, lo: T, hi: T) -> T::Acc {
    debug_assert!(le(lo, hi), "inverted interval in distance bound");
    if lt(c, lo) {
        T::acc_sqr(T::widen(lo) - T::widen(c))
    } else if lt(hi, c) {
        T::acc_sqr(T::widen(c) - T::widen(hi))
    } else {
        acc_zero::<T>()
    }
}

#[inline]
fn axis_max_sqr_dist<T: Scalar>(c: T, lo: T, hi: T) -> T::Acc {
    debug_assert!(le(lo, hi), "inverted interval in distance bound");
    let below = if lt(lo, c) {
        T::acc_sqr(T::widen(c) - T::widen(lo))
    } else {
        acc_zero::<T>()
    };
    let above = if lt(c, hi) {
        T::acc_sqr(T::widen(hi) - T::widen(c))
    } else {
        acc_zero::<T>()
    };
    max_t(below, above)
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}
pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

pub(crate) fn union_aabb<T: PartialOrd + Copy>(a: Aabb2D<T>, b: Aabb2D<T>) -> Aabb2D<T> {
    Aabb2D {
        min_x: min_t(a.min_x, b.min_x),
        min_y: min_t(a.min_y, b.min_y),
        max_x: max_t(a.max_x, b.max_x),
        max_y: max_t(a.max_y, b.max_y),
    }
}
