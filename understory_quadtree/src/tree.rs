// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The quadtree itself: arenas, bulk construction, bounded insertion, and splitting.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::successors;

use crate::error::InsertError;
use crate::extents::{Extents, SpatialObject};
use crate::neighbour::NeighbourIter;
use crate::region::RegionIter;
use crate::types::{Aabb2D, Point2D, Scalar, min_t};

/// A node splits only once it directly holds more than this many leafs.
const SPLIT_THRESHOLD: u32 = 3;

/// Index of a leaf in the leaf arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct LeafIdx(usize);

impl LeafIdx {
    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// One indexed object: a borrowed reference plus its cached extents.
pub(crate) struct Leaf<'a, T: Scalar, O: SpatialObject<T> + ?Sized> {
    pub(crate) object: &'a O,
    pub(crate) extents: O::Extents,
    /// Next leaf attached to the same node.
    pub(crate) next: Option<LeafIdx>,
}

/// One quadrant of the tree.
///
/// Children are allocated four at a time and stored contiguously, so a node
/// finds its parent and siblings by offset arithmetic alone.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) bbox: Aabb2D<T>,
    /// Distance back to the parent in the node arena; zero for the root.
    pub(crate) parent_offset: usize,
    /// Distance forward to the first child; zero while unsplit.
    pub(crate) first_child_offset: usize,
    pub(crate) first_leaf: Option<LeafIdx>,
    /// Leafs attached directly to this node.
    pub(crate) count: u32,
}

impl<T> Node<T> {
    const fn new(bbox: Aabb2D<T>, parent_offset: usize) -> Self {
        Self {
            bbox,
            parent_offset,
            first_child_offset: 0,
            first_leaf: None,
            count: 0,
        }
    }

    pub(crate) const fn is_split(&self) -> bool {
        self.first_child_offset != 0
    }

    pub(crate) const fn is_non_empty(&self) -> bool {
        self.is_split() || self.first_leaf.is_some()
    }
}

/// An adaptive region quadtree over borrowed geometry.
///
/// The index is bulk-loaded once from a sequence of object references, may
/// take a bounded number of further [`add`](Self::add)s, and then serves any
/// number of read-only queries. All query state lives in the iterators, so a
/// built tree can be shared across threads.
///
/// Objects are identified by their *slot*: the position in bulk-load order,
/// continued by `add` order.
///
/// Objects with undefined extents (empty polygons, NaN or sentinel
/// coordinates) occupy a slot but are never returned by any query.
pub struct QuadTree<'a, T: Scalar, O: SpatialObject<T> + ?Sized> {
    leaves: Vec<Leaf<'a, T, O>>,
    nodes: Vec<Node<T>>,
    capacity: usize,
    bounds: Option<Aabb2D<T>>,
}

impl<'a, T: Scalar, O: SpatialObject<T> + ?Sized> QuadTree<'a, T, O> {
    /// Bulk-load an index from `objects`, reserving room for `max_future_inserts`
    /// further [`add`](Self::add)s.
    ///
    /// The root box is the union of all defined extents and never changes afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `objects` is empty while `max_future_inserts > 0`: the frozen
    /// bounds cannot be established from zero elements.
    pub fn new<I>(objects: I, max_future_inserts: usize) -> Self
    where
        I: IntoIterator<Item = &'a O>,
    {
        let objects = objects.into_iter();
        let mut leaves = Vec::with_capacity(objects.size_hint().0 + max_future_inserts);
        let mut bounds: Option<Aabb2D<T>> = None;
        for object in objects {
            let extents = object.extents();
            if extents.is_defined() {
                let b = extents.bounds();
                bounds = Some(bounds.map_or(b, |acc| acc.union(&b)));
            }
            leaves.push(Leaf {
                object,
                extents,
                next: None,
            });
        }
        assert!(
            !leaves.is_empty() || max_future_inserts == 0,
            "future inserts must fall within bounds determined by at least one object"
        );
        let capacity = leaves.len() + max_future_inserts;
        leaves.reserve_exact(capacity - leaves.len());

        let root_box =
            bounds.unwrap_or_else(|| Aabb2D::new(T::zero(), T::zero(), T::zero(), T::zero()));
        let mut tree = Self {
            leaves,
            nodes: Vec::new(),
            capacity,
            bounds,
        };
        tree.nodes.push(Node::new(root_box, 0));

        let mut indexed = 0_usize;
        for i in 0..tree.leaves.len() {
            if tree.leaves[i].extents.is_defined() {
                tree.insert(LeafIdx(i));
                indexed += 1;
            }
        }
        log::debug!(
            "built quadtree: {} objects, {} indexed, {} nodes, bounds {:?}",
            tree.leaves.len(),
            indexed,
            tree.nodes.len(),
            tree.bounds
        );
        tree
    }

    /// Append one object after construction. Returns its slot.
    ///
    /// # Panics
    ///
    /// Panics if the reserved capacity is used up or if the object's extents
    /// are not contained in [`bounds`](Self::bounds). See [`try_add`](Self::try_add)
    /// for the checked variant.
    pub fn add(&mut self, object: &'a O) -> usize {
        match self.try_add(object) {
            Ok(slot) => slot,
            Err(err) => panic!("QuadTree::add: {err}"),
        }
    }

    /// Append one object after construction, reporting contract violations as errors.
    ///
    /// An object with undefined extents is stored but not indexed, exactly as
    /// during bulk loading.
    pub fn try_add(&mut self, object: &'a O) -> Result<usize, InsertError> {
        if self.leaves.len() >= self.capacity {
            return Err(InsertError::CapacityExhausted {
                capacity: self.capacity,
            });
        }
        let extents = object.extents();
        let defined = extents.is_defined();
        if defined
            && !self
                .bounds
                .is_some_and(|bounds| bounds.contains(&extents.bounds()))
        {
            return Err(InsertError::OutOfBounds);
        }
        let slot = self.leaves.len();
        self.leaves.push(Leaf {
            object,
            extents,
            next: None,
        });
        if defined {
            self.insert(LeafIdx(slot));
        }
        Ok(slot)
    }

    /// Number of stored objects, including undefined ones.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// True if no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// How many more objects [`add`](Self::add) accepts.
    pub fn remaining_capacity(&self) -> usize {
        self.capacity - self.leaves.len()
    }

    /// The frozen root box; `None` if no defined object was present at construction.
    pub fn bounds(&self) -> Option<Aabb2D<T>> {
        self.bounds
    }

    /// Number of nodes in the tree (1 + 4 per split).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The object stored at `slot`.
    pub fn object(&self, slot: usize) -> Option<&'a O> {
        self.leaves.get(slot).map(|leaf| leaf.object)
    }

    /// Iterate over objects whose extents intersect `query` (a point or a box).
    pub fn query<Q: Extents<T>>(&self, query: Q) -> RegionIter<'_, 'a, T, O, Q> {
        RegionIter::new(self, query)
    }

    /// Create a nearest-neighbour iterator; call
    /// [`reset`](NeighbourIter::reset) with a center before pulling results.
    pub fn neighbours(&self) -> NeighbourIter<'_, 'a, T, O> {
        NeighbourIter::new(self)
    }

    /// The object nearest to `center`, with its squared distance bound.
    pub fn nearest(&self, center: Point2D<T>) -> Option<(usize, &'a O, T::Acc)> {
        let mut it = self.neighbours();
        it.reset(center);
        it.next()
    }

    /// The object nearest to `center` among those accepted by `accept`.
    ///
    /// Objects are offered to `accept` in order of increasing distance.
    pub fn nearest_where<F>(&self, center: Point2D<T>, mut accept: F) -> Option<(usize, &'a O, T::Acc)>
    where
        F: FnMut(usize, &'a O) -> bool,
    {
        let mut it = self.neighbours();
        it.reset(center);
        it.find(|&(slot, object, _)| accept(slot, object))
    }

    /// Cheap upper bound on the squared distance from `p` to its nearest object.
    ///
    /// Follows the single chain of children containing `p`, at most
    /// `*max_depth` nodes deep, stopping early at an unsplit node or an empty
    /// child. On return `*max_depth` holds the depth actually reached (0 for the
    /// root). The result is the squared distance to the farthest corner of the
    /// reached node, clipped to `max_sqr_dist` when given.
    ///
    /// Callers that find nothing within the bound retry with the decremented
    /// depth, which widens the radius, until the depth reaches zero.
    ///
    /// Returns `None` if the index holds no defined object.
    ///
    /// # Panics
    ///
    /// Panics if `*max_depth` is zero.
    pub fn sqr_proximity_upper_bound(
        &self,
        p: Point2D<T>,
        max_depth: &mut u32,
        max_sqr_dist: Option<T::Acc>,
    ) -> Option<T::Acc> {
        assert!(*max_depth > 0, "proximity search needs a depth budget of at least one");
        self.bounds?;
        let mut node = 0_usize;
        let mut depth = 0_u32;
        loop {
            let n = &self.nodes[node];
            debug_assert!(n.is_non_empty(), "descended into an empty node");
            depth += 1;
            let next = if depth >= *max_depth || !n.is_split() {
                None
            } else {
                p.quadrant(n.bbox.center())
                    .child_index()
                    .map(|q| node + n.first_child_offset + q)
                    .filter(|&child| self.nodes[child].is_non_empty())
            };
            match next {
                Some(child) => node = child,
                None => {
                    *max_depth = depth - 1;
                    let far = n.bbox.max_sqr_dist(p);
                    return Some(match max_sqr_dist {
                        Some(bound) => min_t(far, bound),
                        None => far,
                    });
                }
            }
        }
    }

    pub(crate) fn node(&self, idx: usize) -> &Node<T> {
        &self.nodes[idx]
    }

    pub(crate) fn leaf(&self, idx: LeafIdx) -> &Leaf<'a, T, O> {
        &self.leaves[idx.get()]
    }

    /// Leafs attached directly to a node, following the intrusive list.
    pub(crate) fn chain(&self, first: Option<LeafIdx>) -> impl Iterator<Item = LeafIdx> + '_ {
        successors(first, |&idx| self.leaves[idx.get()].next)
    }

    /// The parent of `node`, or `None` for the root.
    pub(crate) fn parent(&self, node: usize) -> Option<usize> {
        let offset = self.nodes[node].parent_offset;
        (offset != 0).then(|| node - offset)
    }

    /// The next child of the same parent, or `None` for the root and the fourth child.
    pub(crate) fn next_sibling(&self, node: usize) -> Option<usize> {
        let parent = self.parent(node)?;
        let position = self.nodes[node].parent_offset - self.nodes[parent].first_child_offset;
        debug_assert!(position < 4, "child position out of range");
        (position < 3).then_some(node + 1)
    }

    /// Descend from `node` through the children containing `p` to an unsplit node.
    pub(crate) fn descend(&self, mut node: usize, p: Point2D<T>) -> usize {
        loop {
            let n = &self.nodes[node];
            if !n.is_split() {
                return node;
            }
            let Some(q) = p.quadrant(n.bbox.center()).child_index() else {
                return node;
            };
            node += n.first_child_offset + q;
        }
    }

    fn insert(&mut self, leaf: LeafIdx) {
        let extents = self.leaves[leaf.get()].extents;
        let mut node = 0_usize;
        loop {
            debug_assert!(
                self.nodes[node].bbox.overlaps(&extents.bounds()),
                "leaf routed into a node it does not touch"
            );
            if self.must_split(node) {
                self.split(node);
            }
            // Re-resolve by index: splitting may have grown the arena.
            let n = &self.nodes[node];
            if !n.is_split() {
                break;
            }
            match extents.quadrant(n.bbox.center()).child_index() {
                Some(q) => node += n.first_child_offset + q,
                None => break,
            }
        }
        self.link(node, leaf);
    }

    fn link(&mut self, node: usize, leaf: LeafIdx) {
        let n = &mut self.nodes[node];
        n.count += 1;
        self.leaves[leaf.get()].next = n.first_leaf.replace(leaf);
    }

    /// A node splits once it holds more than [`SPLIT_THRESHOLD`] leafs, and only
    /// if two of them fall in single quadrants with different extents.
    fn must_split(&self, node: usize) -> bool {
        let n = &self.nodes[node];
        if n.is_split() || n.count <= SPLIT_THRESHOLD || !n.bbox.is_divisible() {
            return false;
        }
        let center = n.bbox.center();
        let mut single = self
            .chain(n.first_leaf)
            .map(|idx| self.leaves[idx.get()].extents)
            .filter(|extents| extents.quadrant(center).is_single());
        let Some(first) = single.next() else {
            return false;
        };
        single.any(|extents| extents != first)
    }

    fn split(&mut self, node: usize) {
        debug_assert!(!self.nodes[node].is_split(), "node split twice");
        let bbox = self.nodes[node].bbox;
        let center = bbox.center();
        let first_child = self.nodes.len();
        let offset = first_child - node;
        self.nodes[node].first_child_offset = offset;
        for (i, quadrant) in bbox.quadrants().into_iter().enumerate() {
            self.nodes.push(Node::new(quadrant, offset + i));
        }

        let mut next = self.nodes[node].first_leaf.take();
        let moved = self.nodes[node].count;
        self.nodes[node].count = 0;
        while let Some(leaf) = next {
            next = self.leaves[leaf.get()].next;
            let target = match self.leaves[leaf.get()].extents.quadrant(center).child_index() {
                Some(q) => first_child + q,
                None => node,
            };
            self.link(target, leaf);
        }
        log::trace!(
            "split node {node} ({moved} leafs, {} kept) into {first_child}..{}",
            self.nodes[node].count,
            first_child + 4
        );
    }
}

impl<T: Scalar, O: SpatialObject<T> + ?Sized> Debug for QuadTree<'_, T, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let split = self.nodes.iter().filter(|n| n.is_split()).count();
        f.debug_struct("QuadTree")
            .field("objects", &self.leaves.len())
            .field("capacity", &self.capacity)
            .field("nodes", &self.nodes.len())
            .field("split_nodes", &split)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}
