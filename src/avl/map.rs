//! Ordered key/value map on top of [`AvlTree`]
//!
//! Entries compare by key only, and `Entry<K, V>: Borrow<K>`, so every tree
//! lookup can be driven by a bare `&K`.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use super::traversal::{for_each_with_depth, write_indent};
use super::{AvlError, AvlTree};

/// Key/value pair stored in the tree
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub(crate) struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K: Ord, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Ord, V> Eq for Entry<K, V> {}

impl<K: Ord, V> PartialOrd for Entry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for Entry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K, V> Borrow<K> for Entry<K, V> {
    fn borrow(&self) -> &K {
        &self.key
    }
}

/// Ordered map with unique keys
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct AvlMap<K, V> {
    tree: AvlTree<Entry<K, V>>,
}

impl<K, V> AvlMap<K, V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            tree: AvlTree::new(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True when the map holds no entries
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.tree.iter().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Insert a new entry; [`AvlError::DuplicateKey`] if `key` is present.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), AvlError> {
        self.tree.insert(Entry { key, value })
    }

    /// Value stored under `key`
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.find(key).map(|entry| &entry.value)
    }

    /// True when `key` is present
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.exists(key)
    }

    /// Remove the entry under `key` and return its value.
    pub fn remove(&mut self, key: &K) -> Result<V, AvlError> {
        self.tree.erase(key).map(|entry| entry.value)
    }
}

impl<K, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for AvlMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for_each_with_depth(&self.tree.root, 0, &mut |node, depth| {
            write_indent(f, depth)?;
            writeln!(f, "{}: {}", node.value.key, node.value.value)
        })
    }
}
