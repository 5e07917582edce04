//! Disjoint-set forest (union-find) over arbitrary ordered elements
//!
//! Each tracked element maps to an optional parent; `None` marks the root
//! (class representative). Classes merge by depth and compressing lookups
//! rewrite visited elements to point straight at their root.
//!
//! The element -> parent map is ordered, so class listings and the
//! [`fmt::Display`] rendering are deterministic.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised by [`DisjointSet`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnionFindError {
    /// Element was never added.
    #[error("element not found")]
    NotFound,

    /// Element added twice under [`AddPolicy::Reject`].
    #[error("element already present")]
    AlreadyPresent,
}

/// What [`DisjointSet::add`] does with an element that is already tracked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum AddPolicy {
    /// Keep the element where it is (idempotent add)
    #[default]
    Ignore,

    /// Fail with [`UnionFindError::AlreadyPresent`]
    Reject,
}

/// Partition of tracked elements into equivalence classes
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct DisjointSet<T> {
    parents: BTreeMap<T, Option<T>>,
    policy: AddPolicy,
}

impl<T: Ord + Clone> DisjointSet<T> {
    /// Empty partition with the default [`AddPolicy::Ignore`]
    pub fn new() -> Self {
        Self::with_policy(AddPolicy::default())
    }

    /// Empty partition with an explicit re-add policy
    pub fn with_policy(policy: AddPolicy) -> Self {
        Self {
            parents: BTreeMap::new(),
            policy,
        }
    }

    /// Configured re-add policy
    pub fn policy(&self) -> AddPolicy {
        self.policy
    }

    /// Number of tracked elements
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// True when no element is tracked
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// True when `value` has been added
    pub fn contains(&self, value: &T) -> bool {
        self.parents.contains_key(value)
    }

    /// Register `value` as a singleton class.
    ///
    /// Re-adding a tracked element never detaches it from its class: it is
    /// either ignored or rejected, depending on the policy.
    pub fn add(&mut self, value: T) -> Result<(), UnionFindError> {
        if self.parents.contains_key(&value) {
            return match self.policy {
                AddPolicy::Ignore => Ok(()),
                AddPolicy::Reject => Err(UnionFindError::AlreadyPresent),
            };
        }
        self.parents.insert(value, None);
        Ok(())
    }

    /// Add every element of `values`, each as its own singleton class.
    pub fn add_many<I>(&mut self, values: I) -> Result<(), UnionFindError>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        self.check_batch(&values)?;
        for value in values {
            self.add(value)?;
        }
        Ok(())
    }

    /// Add every element of `values` and unite them all with the first one.
    ///
    /// An empty input does nothing.
    pub fn add_class<I>(&mut self, values: I) -> Result<(), UnionFindError>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        self.check_batch(&values)?;
        let Some((first, rest)) = values.split_first() else {
            return Ok(());
        };

        self.add(first.clone())?;
        for value in rest {
            self.add(value.clone())?;
            self.unite(first, value)?;
        }

        debug!(members = values.len(), classes = self.class_count(), "added class");
        Ok(())
    }

    /// Number of parent hops from `value` to its root.
    pub fn depth(&self, value: &T) -> Result<usize, UnionFindError> {
        let mut current = value;
        let mut hops = 0;
        while let Some(parent) = self.parent_of(current)? {
            current = parent;
            hops += 1;
        }
        Ok(hops)
    }

    /// Representative of `value`'s class, without touching the forest.
    pub fn root(&self, value: &T) -> Result<T, UnionFindError> {
        let mut current = value;
        while let Some(parent) = self.parent_of(current)? {
            current = parent;
        }
        Ok(current.clone())
    }

    /// Representative of `value`'s class, compressing the path.
    ///
    /// Afterwards every element visited on the way points directly at the
    /// root.
    pub fn find(&mut self, value: &T) -> Result<T, UnionFindError> {
        let root = self.root(value)?;

        let mut current = value.clone();
        let mut compressed = 0usize;
        while current != root {
            let Some(slot) = self.parents.get_mut(&current) else {
                return Err(UnionFindError::NotFound);
            };
            let Some(parent) = slot.replace(root.clone()) else {
                break;
            };
            if parent != root {
                compressed += 1;
            }
            current = parent;
        }

        if compressed > 0 {
            trace!(compressed, "compressed path");
        }
        Ok(root)
    }

    /// Merge the classes of `a` and `b`.
    ///
    /// The root reached by the shorter lookup path goes under the other
    /// root; on a tie `b`'s root goes under `a`'s. Returns `Ok(false)` when
    /// both were already in the same class.
    pub fn unite(&mut self, a: &T, b: &T) -> Result<bool, UnionFindError> {
        let depth_a = self.depth(a)?;
        let depth_b = self.depth(b)?;
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;

        if root_a == root_b {
            return Ok(false);
        }

        let (child, parent) = if depth_a < depth_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        trace!(depth_a, depth_b, "uniting classes");
        self.parents.insert(child, Some(parent));
        Ok(true)
    }

    /// True when `a` and `b` share a representative.
    pub fn same_class(&self, a: &T, b: &T) -> Result<bool, UnionFindError> {
        Ok(self.root(a)? == self.root(b)?)
    }

    /// Number of equivalence classes
    pub fn class_count(&self) -> usize {
        self.parents.values().filter(|parent| parent.is_none()).count()
    }

    /// Members of every class keyed by representative, both ascending.
    pub fn classes(&self) -> BTreeMap<T, Vec<T>> {
        let mut groups: BTreeMap<T, Vec<T>> = BTreeMap::new();
        for value in self.parents.keys() {
            // Every key is tracked, so the lookup cannot miss
            if let Ok(root) = self.root(value) {
                groups.entry(root).or_default().push(value.clone());
            }
        }
        groups
    }

    /// Under [`AddPolicy::Reject`], fail before adding anything if the batch
    /// repeats itself or an element is already tracked.
    fn check_batch(&self, values: &[T]) -> Result<(), UnionFindError> {
        if self.policy == AddPolicy::Ignore {
            return Ok(());
        }
        let mut seen = BTreeSet::new();
        for value in values {
            if self.parents.contains_key(value) || !seen.insert(value) {
                return Err(UnionFindError::AlreadyPresent);
            }
        }
        Ok(())
    }

    fn parent_of(&self, value: &T) -> Result<Option<&T>, UnionFindError> {
        self.parents
            .get(value)
            .map(Option::as_ref)
            .ok_or(UnionFindError::NotFound)
    }
}

impl<T: Ord + Clone> Default for DisjointSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone + fmt::Display> fmt::Display for DisjointSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for members in self.classes().values() {
            f.write_str("[")?;
            for (i, member) in members.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{member}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}
