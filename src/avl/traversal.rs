//! In-order traversal and the indented debug rendering
//!
//! Stack depth: O(height) = O(log n)

use std::fmt;
use std::iter::FusedIterator;

use super::node::{Link, Node};
use super::AvlTree;

/// Indentation added per recursion level in the [`fmt::Display`] rendering.
const INDENT: &str = "    ";

/// Ascending borrowing iterator over an [`AvlTree`]
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    /// Nodes whose left subtree is done but which are not yet yielded
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: &'a Link<T>) {
        while let Some(node) = link.as_deref() {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Visit every node in order.
pub(crate) fn for_each_node<T, F>(link: &Link<T>, visit: &mut F)
where
    F: FnMut(&Node<T>),
{
    if let Some(node) = link.as_deref() {
        for_each_node(&node.left, visit);
        visit(node);
        for_each_node(&node.right, visit);
    }
}

/// Visit every node in order together with its depth (root = 0).
pub(crate) fn for_each_with_depth<T, F>(link: &Link<T>, depth: usize, visit: &mut F) -> fmt::Result
where
    F: FnMut(&Node<T>, usize) -> fmt::Result,
{
    if let Some(node) = link.as_deref() {
        for_each_with_depth(&node.left, depth + 1, visit)?;
        visit(node, depth)?;
        for_each_with_depth(&node.right, depth + 1, visit)?;
    }
    Ok(())
}

/// Write `depth` indentation units.
pub(crate) fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

impl<T: fmt::Display> fmt::Display for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for_each_with_depth(&self.root, 0, &mut |node, depth| {
            write_indent(f, depth)?;
            writeln!(f, "{}", node.value)
        })
    }
}
