// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-first region queries.

use core::fmt::Debug;

use crate::extents::{Extents, SpatialObject};
use crate::tree::{LeafIdx, QuadTree};
use crate::types::Scalar;

/// Lazy enumeration of the objects whose extents intersect a query point or box.
///
/// Created by [`QuadTree::query`]. Results come in depth-first node order,
/// not sorted by anything in particular. The walk starts at the deepest node
/// reached by following the query's lowest corner, scans that node's objects,
/// then moves to the next sibling touching the query (descending into it the
/// same way), and climbs to the parent once the fourth child is done.
///
/// Besides the [`Iterator`] interface, [`has_current`](Self::has_current),
/// [`current`](Self::current) and [`advance`](Self::advance) allow inspecting
/// a result before deciding to move on, and [`refine`](Self::refine) narrows
/// the query mid-walk.
pub struct RegionIter<'t, 'a, T: Scalar, O: SpatialObject<T> + ?Sized, Q: Extents<T>> {
    tree: &'t QuadTree<'a, T, O>,
    query: Q,
    node: Option<usize>,
    leaf: Option<LeafIdx>,
}

impl<'t, 'a, T: Scalar, O: SpatialObject<T> + ?Sized, Q: Extents<T>> RegionIter<'t, 'a, T, O, Q> {
    pub(crate) fn new(tree: &'t QuadTree<'a, T, O>, query: Q) -> Self {
        let node = tree.descend(0, query.anchor());
        let mut it = Self {
            tree,
            query,
            node: Some(node),
            leaf: tree.node(node).first_leaf,
        };
        it.refit();
        it
    }

    /// The query currently in effect.
    pub fn query(&self) -> &Q {
        &self.query
    }

    /// True while positioned on a matching object.
    pub fn has_current(&self) -> bool {
        self.leaf.is_some()
    }

    /// The slot and object at the current position.
    ///
    /// # Panics
    ///
    /// Panics if the iterator is exhausted.
    pub fn current(&self) -> (usize, &'a O) {
        let leaf = self.leaf.expect("RegionIter::current called on an exhausted iterator");
        (leaf.get(), self.tree.leaf(leaf).object)
    }

    /// Move to the next matching object.
    ///
    /// # Panics
    ///
    /// Panics if the iterator is exhausted.
    pub fn advance(&mut self) {
        let leaf = self.leaf.expect("RegionIter::advance called on an exhausted iterator");
        self.leaf = self.tree.leaf(leaf).next;
        self.refit();
    }

    /// Narrow the query without restarting the walk.
    ///
    /// Objects already passed are not revisited; the current position stays
    /// put even if it no longer matches.
    ///
    /// # Panics
    ///
    /// Panics unless `narrower` is contained in the current query.
    pub fn refine(&mut self, narrower: Q) {
        assert!(
            self.query.includes(&narrower),
            "refined query must lie within the current query"
        );
        self.query = narrower;
    }

    fn refit(&mut self) {
        while let Some(node) = self.node {
            match self.leaf {
                Some(idx) => {
                    let leaf = self.tree.leaf(idx);
                    if self.query.intersects(&leaf.extents) {
                        return;
                    }
                    self.leaf = leaf.next;
                }
                None => self.next_collection(node),
            }
        }
    }

    /// Move to the next node whose leaf list should be scanned.
    fn next_collection(&mut self, node: usize) {
        let bounds = self.query.bounds();
        let mut sibling = self.tree.next_sibling(node);
        while let Some(s) = sibling {
            if self.tree.node(s).bbox.overlaps(&bounds) {
                break;
            }
            sibling = self.tree.next_sibling(s);
        }
        let next = match sibling {
            Some(s) => Some(self.tree.descend(s, self.query.anchor())),
            None => self.tree.parent(node),
        };
        self.node = next;
        self.leaf = next.and_then(|n| self.tree.node(n).first_leaf);
    }
}

impl<'a, T: Scalar, O: SpatialObject<T> + ?Sized, Q: Extents<T>> Iterator
    for RegionIter<'_, 'a, T, O, Q>
{
    type Item = (usize, &'a O);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_current() {
            return None;
        }
        let item = self.current();
        self.advance();
        Some(item)
    }
}

impl<T: Scalar, O: SpatialObject<T> + ?Sized, Q: Extents<T>> Debug for RegionIter<'_, '_, T, O, Q> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegionIter")
            .field("query", &self.query)
            .field("node", &self.node)
            .field("leaf", &self.leaf.map(LeafIdx::get))
            .finish_non_exhaustive()
    }
}
