//! Boxed AVL nodes and the structural operations on them
//!
//! Every function here works on a link slot (`&mut Link<T>`) or on the box
//! held in one, so a rotation rewrites the slot in place and the parent never
//! relinks by hand.
//!
//! Height of an absent child = 0, leaf height = 1.

use std::borrow::Borrow;
use std::cmp::Ordering;

use tracing::trace;

use super::AvlError;

/// Owned, optional child pointer.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// Tree node: value, cached height, exclusively owned children
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) height: i32,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    /// Fresh leaf (height 1)
    pub(crate) fn leaf(value: T) -> Self {
        Self {
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Recompute the cached height from the children's cached heights.
    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// `height(right) - height(left)`
    #[inline]
    pub(crate) fn balance_factor(&self) -> i32 {
        height(&self.right) - height(&self.left)
    }
}

/// Cached height of a link (0 when empty).
#[inline]
pub(crate) fn height<T>(link: &Link<T>) -> i32 {
    link.as_ref().map_or(0, |node| node.height)
}

/// Plain BST descent.
pub(crate) fn find<'a, T, Q>(mut link: &'a Link<T>, value: &Q) -> Option<&'a T>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    while let Some(node) = link {
        match value.cmp(node.value.borrow()) {
            Ordering::Less => link = &node.left,
            Ordering::Greater => link = &node.right,
            Ordering::Equal => return Some(&node.value),
        }
    }
    None
}

/// Insert `value` below `link`, rebalancing every node on the way back up.
///
/// The duplicate check happens during the descent, before anything is
/// written, so a failed insert leaves the subtree untouched.
pub(crate) fn insert<T: Ord>(link: &mut Link<T>, value: T) -> Result<(), AvlError> {
    let Some(node) = link.as_mut() else {
        *link = Some(Box::new(Node::leaf(value)));
        return Ok(());
    };

    match value.cmp(&node.value) {
        Ordering::Less => insert(&mut node.left, value)?,
        Ordering::Greater => insert(&mut node.right, value)?,
        Ordering::Equal => return Err(AvlError::DuplicateKey),
    }

    rebalance(node)
}

/// Remove the value equal to `value` below `link` and return it.
pub(crate) fn erase<T, Q>(link: &mut Link<T>, value: &Q) -> Result<T, AvlError>
where
    T: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    let ordering = match link.as_ref() {
        Some(node) => value.cmp(node.value.borrow()),
        None => return Err(AvlError::NotFound),
    };

    if ordering == Ordering::Equal {
        return remove_node(link);
    }

    let Some(node) = link.as_mut() else {
        return Err(AvlError::NotFound);
    };
    let removed = match ordering {
        Ordering::Less => erase(&mut node.left, value)?,
        _ => erase(&mut node.right, value)?,
    };
    rebalance(node)?;
    Ok(removed)
}

/// Unlink the node held in `link`.
///
/// With two children the in-order successor's value moves into this node
/// and the successor (which has no left child) is removed instead.
fn remove_node<T>(link: &mut Link<T>) -> Result<T, AvlError> {
    let mut node = link
        .take()
        .ok_or(AvlError::InvalidOperation("remove from an empty link"))?;

    match (node.left.take(), node.right.take()) {
        (None, None) => Ok(node.value),
        (Some(child), None) | (None, Some(child)) => {
            *link = Some(child);
            Ok(node.value)
        }
        (Some(left), Some(right)) => {
            node.left = Some(left);
            node.right = Some(right);
            let successor = match take_min(&mut node.right) {
                Ok(successor) => successor,
                Err(err) => {
                    *link = Some(node);
                    return Err(err);
                }
            };
            let removed = std::mem::replace(&mut node.value, successor);
            let balanced = rebalance(&mut node);
            *link = Some(node);
            balanced.map(|()| removed)
        }
    }
}

/// Detach the minimum of the subtree in `link` and return its value.
fn take_min<T>(link: &mut Link<T>) -> Result<T, AvlError> {
    let has_left = match link.as_ref() {
        Some(node) => node.left.is_some(),
        None => return Err(AvlError::InvalidOperation("minimum of an empty subtree")),
    };

    if has_left {
        let Some(node) = link.as_mut() else {
            return Err(AvlError::InvalidOperation("minimum of an empty subtree"));
        };
        let min = take_min(&mut node.left)?;
        rebalance(node)?;
        return Ok(min);
    }

    let mut node = link
        .take()
        .ok_or(AvlError::InvalidOperation("minimum of an empty subtree"))?;
    *link = node.right.take();
    Ok(node.value)
}

/// Restore the cached height and the AVL condition at `node`.
///
/// Children must already be balanced; after a single insert or erase the
/// factor is within `[-2, 2]`.
pub(crate) fn rebalance<T>(node: &mut Box<Node<T>>) -> Result<(), AvlError> {
    node.update_height();
    let balance = node.balance_factor();

    if balance >= 2 {
        if let Some(right) = node.right.as_mut() {
            if right.balance_factor() < 0 {
                trace!(balance, "right-left double rotation");
                rotate_right(right)?;
            }
        }
        rotate_left(node)
    } else if balance <= -2 {
        if let Some(left) = node.left.as_mut() {
            if left.balance_factor() > 0 {
                trace!(balance, "left-right double rotation");
                rotate_left(left)?;
            }
        }
        rotate_right(node)
    } else {
        Ok(())
    }
}

/// Promote the right child into `node`'s slot.
///
/// ```text
///     n              r
///    / \            / \
///   a   r    =>    n   c
///      / \        / \
///     b   c      a   b
/// ```
pub(crate) fn rotate_left<T>(node: &mut Box<Node<T>>) -> Result<(), AvlError> {
    let Some(mut pivot) = node.right.take() else {
        return Err(AvlError::InvalidRotation("left rotation without a right child"));
    };
    node.right = pivot.left.take();
    node.update_height();
    std::mem::swap(node, &mut pivot);
    node.left = Some(pivot);
    node.update_height();
    trace!(height = node.height, "rotated left");
    Ok(())
}

/// Mirror image of [`rotate_left`].
pub(crate) fn rotate_right<T>(node: &mut Box<Node<T>>) -> Result<(), AvlError> {
    let Some(mut pivot) = node.left.take() else {
        return Err(AvlError::InvalidRotation("right rotation without a left child"));
    };
    node.left = pivot.right.take();
    node.update_height();
    std::mem::swap(node, &mut pivot);
    node.right = Some(pivot);
    node.update_height();
    trace!(height = node.height, "rotated right");
    Ok(())
}

/// Check order, cached heights and balance below `link`.
///
/// Returns the recomputed height of the subtree.
pub(crate) fn check<T: Ord>(
    link: &Link<T>,
    lower: Option<&T>,
    upper: Option<&T>,
) -> Result<i32, AvlError> {
    let Some(node) = link else {
        return Ok(0);
    };

    if lower.is_some_and(|lower| node.value <= *lower)
        || upper.is_some_and(|upper| node.value >= *upper)
    {
        return Err(AvlError::BrokenInvariant(
            "in-order values are not strictly ascending".to_string(),
        ));
    }

    let left = check(&node.left, lower, Some(&node.value))?;
    let right = check(&node.right, Some(&node.value), upper)?;
    let expected = 1 + left.max(right);

    if node.height != expected {
        return Err(AvlError::BrokenInvariant(format!(
            "cached height {} differs from computed height {}",
            node.height, expected
        )));
    }
    if (right - left).abs() > 1 {
        return Err(AvlError::BrokenInvariant(format!(
            "balance factor {} outside [-1, 1]",
            right - left
        )));
    }

    Ok(expected)
}
