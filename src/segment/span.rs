//! Implicit segment-tree node ranges
//!
//! Node = interval [lo, hi] of logical leaf positions
//! Children computed via midpoint: m = ⌊(lo + hi) / 2⌋
//!   Left child: [lo, m]
//!   Right child: [m+1, hi]
//!
//! Paired with the heap index of the node (root 0, children 2i+1 and 2i+2),
//! this is all the recursive decomposition needs.

use std::fmt;

/// Leaf range covered by one tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// First leaf position (inclusive)
    pub lo: usize,

    /// Last leaf position (inclusive)
    pub hi: usize,
}

impl Span {
    /// Span of the root over `len` leaves: [0, len - 1]
    pub fn root(len: usize) -> Self {
        debug_assert!(len > 0, "root of an empty tree");
        Self { lo: 0, hi: len - 1 }
    }

    /// Check if leaf (unit interval)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.lo == self.hi
    }

    /// Number of leaves covered
    #[inline]
    pub fn len(&self) -> usize {
        self.hi - self.lo + 1
    }

    /// Last position of the left half
    #[inline]
    pub fn midpoint(&self) -> usize {
        (self.lo + self.hi) / 2
    }

    /// Split at the midpoint.
    ///
    /// Returns: ([lo, mid], [mid+1, hi])
    pub fn children(&self) -> (Span, Span) {
        debug_assert!(!self.is_leaf(), "Leaf has no children");

        let mid = self.midpoint();
        (
            Span {
                lo: self.lo,
                hi: mid,
            },
            Span {
                lo: mid + 1,
                hi: self.hi,
            },
        )
    }

    /// True when `[lo, hi]` lies inside `[start, end]`
    #[inline]
    pub fn is_covered_by(&self, start: usize, end: usize) -> bool {
        start <= self.lo && self.hi <= end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "[{}]", self.lo)
        } else {
            write!(f, "[{}, {}]", self.lo, self.hi)
        }
    }
}
