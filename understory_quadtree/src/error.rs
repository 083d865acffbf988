// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checked insertion errors returned by [`QuadTree::try_add`](crate::QuadTree::try_add).

/// Why an object could not be appended to a built index.
///
/// [`QuadTree::add`](crate::QuadTree::add) treats both cases as contract
/// violations and panics with the same message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    /// Every slot reserved at construction time is already in use.
    #[error("insertion capacity of {capacity} objects is exhausted")]
    CapacityExhausted {
        /// Total number of objects the index was built to hold.
        capacity: usize,
    },
    /// The object's extents are not contained in the bounds frozen at construction.
    #[error("object extents lie outside the frozen index bounds")]
    OutOfBounds,
}
