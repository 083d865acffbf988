// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: an adaptive region quadtree over borrowed 2D geometry.
//!
//! The index holds shared references to external points and polygons and never
//! copies or frees them. It answers three kinds of question:
//!
//! - Which objects overlap a point or rectangle? See [`QuadTree::query`].
//! - Which objects are nearest to a point, in order? See [`QuadTree::neighbours`].
//! - How far away is the nearest object at most? See [`QuadTree::sqr_proximity_upper_bound`].
//!
//! Nodes split into four equal quadrants lazily, only once they hold more than
//! three objects of which at least two sit in distinct single quadrants.
//! Objects that straddle a split line stay with the node that straddles.
//!
//! The tree is generic over the scalar `T` (`f32`, `f64`, `i64`). Squared
//! distances use a widened accumulator (`f32`→`f64`, `f64`→`f64`, `i64`→`i128`);
//! the integer accumulator saturates rather than overflowing.
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{Aabb2D, Point2D, QuadTree};
//!
//! let pts = [
//!     Point2D::new(0_i64, 0),
//!     Point2D::new(10, 0),
//!     Point2D::new(0, 10),
//!     Point2D::new(10, 10),
//!     Point2D::new(5, 5),
//! ];
//! let tree = QuadTree::new(&pts, 0);
//!
//! // Region query: slots are insertion positions.
//! let mut hits: Vec<usize> = tree
//!     .query(Aabb2D::new(4, 4, 10, 10))
//!     .map(|(slot, _)| slot)
//!     .collect();
//! hits.sort_unstable();
//! assert_eq!(hits, [3, 4]);
//!
//! // Nearest neighbour, with its squared distance.
//! let (slot, p, d) = tree.nearest(Point2D::new(4, 4)).unwrap();
//! assert_eq!((slot, *p, d), (4, Point2D::new(5, 5), 2));
//! ```
//!
//! Growth after construction is bounded: the bounding box is frozen when the
//! tree is built and [`QuadTree::add`] accepts only as many in-bounds objects as
//! were reserved.
//!
//! ```rust
//! use understory_quadtree::{Aabb2D, InsertError, QuadTree};
//!
//! let boxes = [Aabb2D::new(0.0, 0.0, 100.0, 100.0)];
//! let extra = [Aabb2D::new(10.0, 10.0, 20.0, 20.0), Aabb2D::new(200.0, 0.0, 210.0, 5.0)];
//! let mut tree = QuadTree::new(&boxes, 1);
//! assert_eq!(tree.try_add(&extra[1]), Err(InsertError::OutOfBounds));
//! assert_eq!(tree.try_add(&extra[0]), Ok(1));
//! assert_eq!(tree.query(Aabb2D::new(15.0, 15.0, 15.0, 15.0)).count(), 2);
//! ```
//!
//! ## Features
//!
//! - `kurbo_adapter`: index `kurbo` points, rectangles, lines, and paths directly.
//! - `std` / `libm`: forwarded to `kurbo` when the adapter is enabled.
//!
//! ### Float semantics
//!
//! NaN coordinates mark an object as undefined; undefined objects are stored
//! but never indexed or reported. For `i64`, `i64::MIN` plays the same role.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod error;
pub mod extents;
pub mod neighbour;
pub mod region;
pub mod tree;
pub mod types;

#[cfg(test)]
mod test_util;

pub use error::InsertError;
pub use extents::{Extents, Quadrant, SpatialObject};
pub use neighbour::NeighbourIter;
pub use region::RegionIter;
pub use tree::QuadTree;
pub use types::{Aabb2D, Point2D, Scalar, ScalarAcc, sqr_dist};
