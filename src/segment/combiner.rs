//! Associative combining functions for segment-tree folds
//!
//! Any `Fn(&T, &T) -> T` is a combiner; [`Min`], [`Max`] and [`Sum`] cover
//! the common folds without a closure type in the tree's signature.

use std::ops::Add;

/// Associative binary operation used to fold adjacent ranges.
///
/// `combine(combine(a, b), c)` must equal `combine(a, combine(b, c))`;
/// commutativity is not required, the left operand always covers lower
/// positions.
pub trait Combiner<T> {
    /// Fold two adjacent range values (left range first).
    fn combine(&self, left: &T, right: &T) -> T;
}

impl<T, F> Combiner<T> for F
where
    F: Fn(&T, &T) -> T,
{
    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        self(left, right)
    }
}

/// Range minimum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Min;

impl<T: Ord + Clone> Combiner<T> for Min {
    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        // Ties keep the left value
        if right < left {
            right.clone()
        } else {
            left.clone()
        }
    }
}

/// Range maximum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Max;

impl<T: Ord + Clone> Combiner<T> for Max {
    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        if right > left {
            right.clone()
        } else {
            left.clone()
        }
    }
}

/// Range sum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum;

impl<T> Combiner<T> for Sum
where
    T: Add<Output = T> + Clone,
{
    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        left.clone() + right.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_combiners() {
        assert_eq!(Min.combine(&4, &2), 2);
        assert_eq!(Max.combine(&4, &2), 4);
        assert_eq!(Sum.combine(&4, &2), 6);
    }

    #[test]
    fn test_closure_is_a_combiner() {
        let concat = |a: &String, b: &String| format!("{a}{b}");
        assert_eq!(concat.combine(&"ab".to_string(), &"cd".to_string()), "abcd");
    }

    #[test]
    fn test_function_pointer_is_a_combiner() {
        fn gcd(a: &u64, b: &u64) -> u64 {
            let (mut a, mut b) = (*a, *b);
            while b != 0 {
                (a, b) = (b, a % b);
            }
            a
        }
        assert_eq!(gcd.combine(&12, &18), 6);
    }
}
