//! Static segment tree over a power-of-two number of leaves
//!
//! Backing array of 2N-1 slots, heap layout:
//!   root at 0, children of i at 2i+1 and 2i+2,
//!   leaves at [N-1, 2N-2] for logical positions 0..N-1.
//!
//! Every internal slot caches the fold of its two children, so point
//! updates and inclusive range folds both visit O(log N) slots.

pub mod combiner;
mod span;

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

pub use combiner::{Combiner, Max, Min, Sum};
pub use span::Span;

/// Errors returned by segment-tree construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentTreeError {
    /// Leaf count is not a power of two (zero included).
    #[error("leaf count {0} is not a power of two")]
    InvalidSize(usize),

    /// Logical position outside `[0, len - 1]`.
    #[error("index {index} out of range for {len} leaves")]
    OutOfRange {
        /// Offending position.
        index: usize,
        /// Number of leaves in the tree.
        len: usize,
    },

    /// Range whose start lies after its end.
    #[error("empty range [{start}, {end}]")]
    EmptyRange {
        /// Requested first position.
        start: usize,
        /// Requested last position.
        end: usize,
    },
}

/// Fixed-capacity segment tree owning its combining function
#[derive(Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct SegmentTree<T, C> {
    data: Vec<T>,
    len: usize,
    #[cfg_attr(feature = "visualize", serde(skip))]
    combiner: C,
}

impl<T, C> SegmentTree<T, C>
where
    T: Clone,
    C: Combiner<T>,
{
    /// Build the tree bottom-up from `leaves`.
    ///
    /// The number of leaves must be a non-zero power of two.
    pub fn new(leaves: impl Into<Vec<T>>, combiner: C) -> Result<Self, SegmentTreeError> {
        let leaves = leaves.into();
        let len = leaves.len();
        if !len.is_power_of_two() {
            return Err(SegmentTreeError::InvalidSize(len));
        }

        // Internal slots are placeholders until the fold below overwrites them
        let mut data = Vec::with_capacity(2 * len - 1);
        data.extend(leaves[1..].iter().cloned());
        data.extend(leaves);

        for i in (0..len - 1).rev() {
            data[i] = combiner.combine(&data[2 * i + 1], &data[2 * i + 2]);
        }

        debug!(leaves = len, slots = data.len(), "built segment tree");
        Ok(Self {
            data,
            len,
            combiner,
        })
    }

    /// Build from a fixed-size array.
    pub fn from_array<const N: usize>(leaves: [T; N], combiner: C) -> Result<Self, SegmentTreeError> {
        Self::new(Vec::from(leaves), combiner)
    }

    /// Leaf at logical position `index`.
    pub fn get(&self, index: usize) -> Result<&T, SegmentTreeError> {
        self.check_index(index)?;
        Ok(&self.data[self.len - 1 + index])
    }

    /// Overwrite leaf `index` and refold every ancestor up to the root.
    pub fn update(&mut self, index: usize, value: T) -> Result<(), SegmentTreeError> {
        self.check_index(index)?;

        let mut slot = self.len - 1 + index;
        self.data[slot] = value;

        let mut refolded = 0usize;
        while slot > 0 {
            slot = (slot - 1) / 2;
            self.data[slot] = self
                .combiner
                .combine(&self.data[2 * slot + 1], &self.data[2 * slot + 2]);
            refolded += 1;
        }

        trace!(index, refolded, "updated leaf");
        Ok(())
    }

    /// Fold of leaves `start..=end`.
    ///
    /// Visits O(log N) slots: a node fully inside the range answers from its
    /// cache, a range inside one half descends into that half only.
    pub fn range_fold(&self, start: usize, end: usize) -> Result<T, SegmentTreeError> {
        self.check_index(start)?;
        self.check_index(end)?;
        if start > end {
            return Err(SegmentTreeError::EmptyRange { start, end });
        }

        Ok(self.fold_span(0, Span::root(self.len), start, end))
    }

    /// Fold over every leaf (the root slot)
    pub fn fold_all(&self) -> &T {
        &self.data[0]
    }

    fn fold_span(&self, slot: usize, span: Span, start: usize, end: usize) -> T {
        if span.is_covered_by(start, end) {
            return self.data[slot].clone();
        }

        let mid = span.midpoint();
        let (left, right) = span.children();

        if start > mid {
            return self.fold_span(2 * slot + 2, right, start, end);
        }
        if end <= mid {
            return self.fold_span(2 * slot + 1, left, start, end);
        }

        let left_value = self.fold_span(2 * slot + 1, left, start, end);
        let right_value = self.fold_span(2 * slot + 2, right, start, end);
        self.combiner.combine(&left_value, &right_value)
    }
}

impl<T, C> SegmentTree<T, C> {
    /// Number of leaves (fixed at construction)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: construction rejects zero leaves
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Leaf values in logical order
    pub fn leaves(&self) -> &[T] {
        &self.data[self.len - 1..]
    }

    /// Whole backing array: internal nodes, then leaves
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The combining function
    pub fn combiner(&self) -> &C {
        &self.combiner
    }

    fn check_index(&self, index: usize) -> Result<(), SegmentTreeError> {
        if index < self.len {
            Ok(())
        } else {
            Err(SegmentTreeError::OutOfRange {
                index,
                len: self.len,
            })
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SegmentTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("len", &self.len)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

impl<T: fmt::Display, C> fmt::Display for SegmentTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
