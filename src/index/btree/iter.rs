//! In-order iteration over a B-tree.

use std::iter::FusedIterator;

use super::node::Node;

/// Borrowing iterator over the keys of a [`BTree`](crate::BTree) in
/// ascending order.
///
/// Holds an explicit stack of `(node, next key index)` frames, so its
/// memory use is bounded by the tree height.
pub struct Iter<'a, K> {
    stack: Vec<(&'a Node<K>, usize)>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.descend_leftmost(root);
        }
        iter
    }

    fn descend_leftmost(&mut self, mut node: &'a Node<K>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        while let Some(top) = self.stack.last_mut() {
            let (node, idx) = *top;
            if idx == node.keys.len() {
                self.stack.pop();
                continue;
            }

            top.1 += 1;
            if let Some(child) = node.children.get(idx + 1) {
                self.descend_leftmost(child);
            }
            self.remaining = self.remaining.saturating_sub(1);
            return Some(&node.keys[idx]);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}
