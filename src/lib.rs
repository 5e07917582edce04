//! # Classic in-memory data structures
//!
//! Three independent generic containers, each encoding one textbook
//! algorithm with real invariants:
//!
//! 1. **AVL tree** ([`AvlTree`], [`AvlMap`]): ordered set/map, height-balanced
//!    after every insert and erase, O(log n) per operation
//! 2. **Segment tree** ([`SegmentTree`]): fixed power-of-two array with point
//!    updates and associative range folds in O(log N)
//! 3. **Disjoint set** ([`DisjointSet`]): union-by-depth with path
//!    compression over arbitrary ordered elements
//!
//! All state lives in process memory and every call runs to completion on
//! the caller's thread. Failed calls leave the structure unchanged.
//!
//! ## Usage Example
//!
//! ```
//! use arbor::{AvlTree, DisjointSet, Min, SegmentTree};
//!
//! let tree = AvlTree::try_from_values([5, 3, 8, 1, 4, 7, 9])?;
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
//!
//! let mins = SegmentTree::from_array([5, 3, 8, 1, 4, 7, 9, 2], Min)?;
//! assert_eq!(mins.range_fold(2, 5)?, 1);
//!
//! let mut classes = DisjointSet::new();
//! classes.add_many([1, 2, 3, 4])?;
//! classes.unite(&1, &2)?;
//! assert!(classes.same_class(&2, &1)?);
//! # Ok::<(), arbor::Error>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod avl;        // Height-balanced search tree
pub mod segment;    // Static range-fold tree
pub mod union_find; // Disjoint-set forest

// Re-exports for convenience
pub use avl::{AvlError, AvlMap, AvlTree};
pub use segment::{Combiner, Max, Min, SegmentTree, SegmentTreeError, Sum};
pub use union_find::{AddPolicy, DisjointSet, UnionFindError};

use thiserror::Error;

/// Any error raised by the structures in this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Search-tree failure
    #[error("avl tree: {0}")]
    Avl(#[from] AvlError),

    /// Segment-tree failure
    #[error("segment tree: {0}")]
    SegmentTree(#[from] SegmentTreeError),

    /// Disjoint-set failure
    #[error("disjoint set: {0}")]
    UnionFind(#[from] UnionFindError),
}

/// Convenience alias over the crate-wide [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;
