// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Best-first nearest-neighbour iteration.

use alloc::collections::BinaryHeap;
use core::cmp::Ordering;
use core::fmt::Debug;

use crate::extents::{Extents, SpatialObject};
use crate::tree::{LeafIdx, QuadTree};
use crate::types::{Point2D, Scalar, le};

/// A heap record keyed by a squared-distance lower bound.
///
/// Ordered so that [`BinaryHeap`] (a max-heap) pops the smallest bound first;
/// equal bounds pop the lower arena index first to keep output deterministic.
#[derive(Copy, Clone, Debug)]
struct Candidate<A, V> {
    sqr_dist: A,
    value: V,
}

impl<A: PartialOrd, V: Ord> PartialEq for Candidate<A, V> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<A: PartialOrd, V: Ord> Eq for Candidate<A, V> {}

impl<A: PartialOrd, V: Ord> PartialOrd for Candidate<A, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: PartialOrd, V: Ord> Ord for Candidate<A, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .sqr_dist
            .partial_cmp(&self.sqr_dist)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.value.cmp(&self.value))
    }
}

/// Lazy enumeration of all indexed objects in non-decreasing distance from a center.
///
/// Created by [`QuadTree::neighbours`]; starts out exhausted until
/// [`reset`](Self::reset) supplies a center. One iterator can be reset to
/// many centers in turn and keeps its heap allocations between them.
///
/// Two min-heaps drive the search: one of nodes and one of leafs, each keyed
/// by an admissible lower bound on the squared distance (exact for point
/// objects). A leaf is reported only once its key is no larger than that of
/// every unexplored node, so nothing closer can still be hiding in the tree.
///
/// ```
/// use understory_quadtree::{Point2D, QuadTree};
///
/// let pts = [Point2D::new(0_i64, 0), Point2D::new(10, 0), Point2D::new(3, 4)];
/// let tree = QuadTree::new(&pts, 0);
/// let mut it = tree.neighbours();
/// it.reset(Point2D::new(0, 1));
/// let order: Vec<_> = it.map(|(slot, _, d)| (slot, d)).collect();
/// assert_eq!(order, [(0, 1), (2, 18), (1, 101)]);
/// ```
pub struct NeighbourIter<'t, 'a, T: Scalar, O: SpatialObject<T> + ?Sized> {
    tree: &'t QuadTree<'a, T, O>,
    center: Point2D<T>,
    nodes: BinaryHeap<Candidate<T::Acc, usize>>,
    leaves: BinaryHeap<Candidate<T::Acc, LeafIdx>>,
}

impl<'t, 'a, T: Scalar, O: SpatialObject<T> + ?Sized> NeighbourIter<'t, 'a, T, O> {
    pub(crate) fn new(tree: &'t QuadTree<'a, T, O>) -> Self {
        Self {
            tree,
            center: Point2D::new(T::zero(), T::zero()),
            nodes: BinaryHeap::new(),
            leaves: BinaryHeap::new(),
        }
    }

    /// Restart the enumeration around `center`.
    pub fn reset(&mut self, center: Point2D<T>) {
        self.nodes.clear();
        self.leaves.clear();
        self.center = center;
        self.push_node(0);
        self.refit();
    }

    /// The center of the current enumeration.
    pub fn center(&self) -> Point2D<T> {
        self.center
    }

    /// True while there is a current object.
    pub fn has_current(&self) -> bool {
        !self.is_finished()
    }

    /// The slot and object nearest to the center among those not yet passed.
    ///
    /// # Panics
    ///
    /// Panics if the iterator is exhausted.
    pub fn current(&self) -> (usize, &'a O) {
        let top = self.top();
        (top.value.get(), self.tree.leaf(top.value).object)
    }

    /// The squared-distance bound of the current object: exact for points,
    /// the distance to the bounding box otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the iterator is exhausted.
    pub fn current_sqr_dist(&self) -> T::Acc {
        self.top().sqr_dist
    }

    /// Move past the current object.
    ///
    /// # Panics
    ///
    /// Panics if the iterator is exhausted.
    pub fn advance(&mut self) {
        debug_assert!(self.is_normal(), "leaf popped ahead of a closer node");
        let popped = self.leaves.pop();
        assert!(
            popped.is_some(),
            "NeighbourIter::advance called on an exhausted iterator"
        );
        self.refit();
    }

    fn top(&self) -> &Candidate<T::Acc, LeafIdx> {
        self.leaves
            .peek()
            .expect("NeighbourIter has no current object")
    }

    fn is_finished(&self) -> bool {
        self.nodes.is_empty() && self.leaves.is_empty()
    }

    /// The nearest known leaf is no farther than any unexplored node.
    fn is_normal(&self) -> bool {
        let Some(leaf) = self.leaves.peek() else {
            return false;
        };
        match self.nodes.peek() {
            Some(node) => le(leaf.sqr_dist, node.sqr_dist),
            None => true,
        }
    }

    fn refit(&mut self) {
        while !self.is_finished() && !self.is_normal() {
            self.pop_node();
        }
    }

    fn push_node(&mut self, idx: usize) {
        let node = self.tree.node(idx);
        if !node.is_non_empty() {
            return;
        }
        self.nodes.push(Candidate {
            sqr_dist: node.bbox.min_sqr_dist(self.center),
            value: idx,
        });
    }

    fn pop_node(&mut self) {
        let Some(Candidate { value: idx, .. }) = self.nodes.pop() else {
            return;
        };
        let tree = self.tree;
        let node = tree.node(idx);
        if node.is_split() {
            let first = idx + node.first_child_offset;
            for child in first..first + 4 {
                self.push_node(child);
            }
        }
        for leaf in tree.chain(node.first_leaf) {
            self.leaves.push(Candidate {
                sqr_dist: tree.leaf(leaf).extents.min_sqr_dist(self.center),
                value: leaf,
            });
        }
    }
}

impl<'a, T: Scalar, O: SpatialObject<T> + ?Sized> Iterator for NeighbourIter<'_, 'a, T, O> {
    /// Slot, object, and squared-distance bound.
    type Item = (usize, &'a O, T::Acc);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_current() {
            return None;
        }
        let (slot, object) = self.current();
        let sqr_dist = self.current_sqr_dist();
        self.advance();
        Some((slot, object, sqr_dist))
    }
}

impl<T: Scalar, O: SpatialObject<T> + ?Sized> Debug for NeighbourIter<'_, '_, T, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NeighbourIter")
            .field("center", &self.center)
            .field("pending_nodes", &self.nodes.len())
            .field("pending_leaves", &self.leaves.len())
            .finish_non_exhaustive()
    }
}
