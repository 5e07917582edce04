//! Height-balanced binary search tree (AVL)
//!
//! Ordered set over a totally-ordered element type. Every insert and erase
//! restores the AVL condition on the way back up the search path:
//!
//!   |height(left) - height(right)| ≤ 1 for every node
//!
//! so membership queries, insertion and deletion stay O(log n).
//! [`AvlMap`] layers a key/value map on the same tree.

mod map;
mod node;
mod traversal;

use std::borrow::Borrow;

use thiserror::Error;
use tracing::{debug, trace};

pub use map::AvlMap;
pub use traversal::Iter;

use node::Link;

/// Errors surfaced by [`AvlTree`] and [`AvlMap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvlError {
    /// Insertion of a value that is already stored.
    #[error("value already exists in the tree")]
    DuplicateKey,

    /// Lookup or deletion of a value that is not stored.
    #[error("value not found in the tree")]
    NotFound,

    /// Rotation attempted without the child it promotes.
    #[error("invalid rotation: {0}")]
    InvalidRotation(&'static str),

    /// Structural operation on a subtree lacking the shape it needs.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// Order, height or balance invariant found broken by [`AvlTree::validate`].
    #[error("broken invariant: {0}")]
    BrokenInvariant(String),
}

/// Ordered set backed by an AVL tree
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> AvlTree<T> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree (0 when empty, 1 for a single node)
    pub fn height(&self) -> i32 {
        node::height(&self.root)
    }

    /// Drop every value
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Smallest stored value
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// Largest stored value
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Ascending iterator over the stored values
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.len)
    }

    /// Balance factor (`height(right) - height(left)`) of every node, in order
    pub fn balance_factors(&self) -> Vec<i32> {
        let mut factors = Vec::with_capacity(self.len);
        traversal::for_each_node(&self.root, &mut |node| {
            factors.push(node.balance_factor())
        });
        factors
    }
}

impl<T: Ord> AvlTree<T> {
    /// Build a tree from `values`, failing on the first duplicate.
    pub fn try_from_values<I>(values: I) -> Result<Self, AvlError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new();
        for value in values {
            tree.insert(value)?;
        }
        debug!(len = tree.len, height = tree.height(), "built avl tree");
        Ok(tree)
    }

    /// Reference to the stored value equal to `value`, if any.
    pub fn find<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::find(&self.root, value)
    }

    /// Membership test
    pub fn exists<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).is_some()
    }

    /// Insert `value`.
    ///
    /// Fails with [`AvlError::DuplicateKey`] if an equal value is already
    /// stored; the tree is left unchanged in that case.
    pub fn insert(&mut self, value: T) -> Result<(), AvlError> {
        node::insert(&mut self.root, value)?;
        self.len += 1;
        trace!(len = self.len, height = self.height(), "inserted");
        Ok(())
    }

    /// Remove the value equal to `value` and return it.
    ///
    /// Fails with [`AvlError::NotFound`] if no such value is stored.
    pub fn erase<Q>(&mut self, value: &Q) -> Result<T, AvlError>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = node::erase(&mut self.root, value)?;
        self.len -= 1;
        trace!(len = self.len, height = self.height(), "erased");
        Ok(removed)
    }

    /// Walk the whole tree and report the first broken invariant
    /// (strict ordering, cached heights, balance factor within `[-1, 1]`).
    pub fn validate(&self) -> Result<(), AvlError> {
        node::check(&self.root, None, None).map(|_| ())
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
