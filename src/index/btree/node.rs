//! B-tree node and the node-local half of the rebalancing protocol.
//!
//! A node never repairs itself after returning from a child. Insert splits
//! a full child before entering it; remove fills an under-full child
//! (borrow or merge) before entering it. That keeps every operation a
//! single downward pass.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use super::stats::TreeStats;

/// A node holding `n` sorted keys and, if internal, `n + 1` children.
///
/// Children are owned through a `Box` per slot, so split and merge move
/// whole subtrees around without any shared ownership.
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<Box<Node<K>>>,
    leaf: bool,
}

impl<K> Node<K> {
    /// Create an empty leaf.
    pub(crate) fn new_leaf() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
            leaf: true,
        }
    }

    /// Create an empty internal node.
    pub(crate) fn new_internal() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
            leaf: false,
        }
    }

    fn new_like(&self) -> Self {
        if self.leaf {
            Self::new_leaf()
        } else {
            Self::new_internal()
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.leaf
    }

    #[inline]
    pub(crate) fn is_full(&self, t: usize) -> bool {
        self.keys.len() == 2 * t - 1
    }

    /// Number of levels from this node down to its leaves, inclusive.
    pub(crate) fn height(&self) -> usize {
        let mut node = self;
        let mut height = 1;
        while let Some(child) = node.children.first() {
            node = child;
            height += 1;
        }
        height
    }

    /// Smallest key in this subtree.
    pub(crate) fn first_key(&self) -> Option<&K> {
        let mut node = self;
        while let Some(child) = node.children.first() {
            node = child;
        }
        node.keys.first()
    }

    /// Largest key in this subtree.
    pub(crate) fn last_key(&self) -> Option<&K> {
        let mut node = self;
        while let Some(child) = node.children.last() {
            node = child;
        }
        node.keys.last()
    }

    // ========================================================================
    // Insert: split before descending
    // ========================================================================

    /// Split the full child at index `i` around its median.
    ///
    /// The child keeps its lower `t - 1` keys (and lower `t` children), a new
    /// sibling takes the upper `t - 1` keys (and upper `t` children), and the
    /// median moves up into this node at index `i`.
    pub(crate) fn split_child(&mut self, i: usize, t: usize, stats: &mut TreeStats) {
        let child = &mut self.children[i];
        debug_assert!(child.is_full(t), "split_child on a non-full child");

        let mut sibling = child.new_like();
        sibling.keys.extend(child.keys.drain(t..));
        if !child.leaf {
            sibling.children.extend(child.children.drain(t..));
        }
        let median = child.keys.remove(t - 1);

        self.keys.insert(i, median);
        self.children.insert(i + 1, Box::new(sibling));

        stats.splits += 1;
        tracing::trace!(index = i, "split full child");
    }

    // ========================================================================
    // Remove: fill before descending
    // ========================================================================

    /// Remove and return the smallest key of this subtree.
    pub(crate) fn pop_first(&mut self, t: usize, stats: &mut TreeStats) -> Option<K> {
        if self.leaf {
            if self.keys.is_empty() {
                return None;
            }
            return Some(self.keys.remove(0));
        }

        let idx = self.prepare_child(0, t, stats);
        self.children[idx].pop_first(t, stats)
    }

    /// Remove and return the largest key of this subtree.
    pub(crate) fn pop_last(&mut self, t: usize, stats: &mut TreeStats) -> Option<K> {
        if self.leaf {
            return self.keys.pop();
        }

        let idx = self.prepare_child(self.keys.len(), t, stats);
        self.children[idx].pop_last(t, stats)
    }

    /// Make sure `children[idx]` can lose a key, returning where it now lives.
    fn prepare_child(&mut self, idx: usize, t: usize, stats: &mut TreeStats) -> usize {
        if self.children[idx].keys.len() < t {
            self.fill(idx, t, stats)
        } else {
            idx
        }
    }

    /// Bring `children[idx]` up to at least `t` keys.
    ///
    /// Returns the index of the child after the repair. It only moves (to
    /// `idx - 1`) when `idx` was the last child and had to be merged into its
    /// left neighbour.
    fn fill(&mut self, idx: usize, t: usize, stats: &mut TreeStats) -> usize {
        let n = self.keys.len();

        if idx > 0 && self.children[idx - 1].keys.len() >= t {
            self.borrow_from_prev(idx, stats);
            idx
        } else if idx < n && self.children[idx + 1].keys.len() >= t {
            self.borrow_from_next(idx, stats);
            idx
        } else if idx < n {
            self.merge(idx, stats);
            idx
        } else {
            self.merge(idx - 1, stats);
            idx - 1
        }
    }

    /// Rotate one key from `children[idx - 1]` through the separator into
    /// `children[idx]`.
    fn borrow_from_prev(&mut self, idx: usize, stats: &mut TreeStats) {
        let (left, right) = self.children.split_at_mut(idx);
        let sibling = &mut left[idx - 1];
        let child = &mut right[0];

        let last = sibling.keys.len() - 1;
        let borrowed = sibling.keys.remove(last);
        let separator = mem::replace(&mut self.keys[idx - 1], borrowed);
        child.keys.insert(0, separator);

        if !sibling.leaf {
            let moved = sibling.children.remove(last + 1);
            child.children.insert(0, moved);
        }

        stats.borrows += 1;
        tracing::trace!(index = idx, "borrowed key from previous sibling");
    }

    /// Rotate one key from `children[idx + 1]` through the separator into
    /// `children[idx]`.
    fn borrow_from_next(&mut self, idx: usize, stats: &mut TreeStats) {
        let (left, right) = self.children.split_at_mut(idx + 1);
        let child = &mut left[idx];
        let sibling = &mut right[0];

        let borrowed = sibling.keys.remove(0);
        let separator = mem::replace(&mut self.keys[idx], borrowed);
        child.keys.push(separator);

        if !sibling.leaf {
            let moved = sibling.children.remove(0);
            child.children.push(moved);
        }

        stats.borrows += 1;
        tracing::trace!(index = idx, "borrowed key from next sibling");
    }

    /// Fold `keys[idx]` and `children[idx + 1]` into `children[idx]`.
    ///
    /// Both children are minimal, so the result holds exactly `2t - 1` keys.
    fn merge(&mut self, idx: usize, stats: &mut TreeStats) {
        let separator = self.keys.remove(idx);
        let sibling = self.children.remove(idx + 1);
        let child = &mut self.children[idx];

        child.keys.push(separator);
        let Node { keys, children, .. } = *sibling;
        child.keys.extend(keys);
        child.children.extend(children);

        stats.merges += 1;
        tracing::trace!(index = idx, "merged sibling into child");
    }
}

impl<K: Ord> Node<K> {
    /// Whether `key` is stored in this subtree.
    pub(crate) fn search(&self, key: &K) -> bool {
        let mut node = self;
        loop {
            match node.keys.binary_search(key) {
                Ok(_) => return true,
                Err(_) if node.leaf => return false,
                Err(idx) => node = &node.children[idx],
            }
        }
    }

    /// Insert `key` into the subtree rooted at this non-full node.
    ///
    /// Returns `false` if the key was already present.
    pub(crate) fn insert_non_full(&mut self, key: K, t: usize, stats: &mut TreeStats) -> bool {
        debug_assert!(!self.is_full(t), "insert_non_full on a full node");

        let mut idx = match self.keys.binary_search(&key) {
            Ok(_) => return false,
            Err(idx) => idx,
        };

        if self.leaf {
            self.keys.insert(idx, key);
            return true;
        }

        if self.children[idx].is_full(t) {
            self.split_child(idx, t, stats);
            match key.cmp(&self.keys[idx]) {
                Ordering::Less => {}
                Ordering::Equal => return false,
                Ordering::Greater => idx += 1,
            }
        }

        self.children[idx].insert_non_full(key, t, stats)
    }

    /// Remove `key` from this subtree, returning it if it was present.
    ///
    /// The caller guarantees this node holds at least `t` keys unless it is
    /// the root.
    pub(crate) fn remove(&mut self, key: &K, t: usize, stats: &mut TreeStats) -> Option<K> {
        match self.keys.binary_search(key) {
            Ok(idx) if self.leaf => Some(self.keys.remove(idx)),
            Ok(idx) => self.remove_from_internal(idx, key, t, stats),
            Err(_) if self.leaf => None,
            Err(idx) => {
                let idx = self.prepare_child(idx, t, stats);
                self.children[idx].remove(key, t, stats)
            }
        }
    }

    /// Remove `keys[idx]` from an internal node.
    ///
    /// Replaces it with its predecessor or successor when the adjacent child
    /// can spare a key, otherwise merges both children around it and removes
    /// it from the merged node.
    fn remove_from_internal(
        &mut self,
        idx: usize,
        key: &K,
        t: usize,
        stats: &mut TreeStats,
    ) -> Option<K> {
        if self.children[idx].keys.len() >= t {
            let predecessor = self.children[idx].pop_last(t, stats);
            predecessor.map(|pred| mem::replace(&mut self.keys[idx], pred))
        } else if self.children[idx + 1].keys.len() >= t {
            let successor = self.children[idx + 1].pop_first(t, stats);
            successor.map(|succ| mem::replace(&mut self.keys[idx], succ))
        } else {
            self.merge(idx, stats);
            self.children[idx].remove(key, t, stats)
        }
    }
}

impl<K: fmt::Debug> Node<K> {
    /// Write this subtree as an indented outline, one node per line.
    pub(crate) fn fmt_depth(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{}{:?}", "  ".repeat(depth), self.keys)?;
        for child in &self.children {
            child.fmt_depth(f, depth + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(keys: &[i32]) -> Box<Node<i32>> {
        Box::new(Node {
            keys: keys.to_vec(),
            children: Vec::new(),
            leaf: true,
        })
    }

    fn internal(keys: &[i32], children: Vec<Box<Node<i32>>>) -> Box<Node<i32>> {
        Box::new(Node {
            keys: keys.to_vec(),
            children,
            leaf: false,
        })
    }

    fn child_keys(node: &Node<i32>) -> Vec<Vec<i32>> {
        node.children.iter().map(|c| c.keys.clone()).collect()
    }

    #[test]
    fn test_search() {
        let node = internal(&[10, 20], vec![leaf(&[1, 5]), leaf(&[12, 15]), leaf(&[25])]);

        for k in [1, 5, 10, 12, 15, 20, 25] {
            assert!(node.search(&k), "expected {} to be found", k);
        }
        for k in [0, 6, 11, 21, 30] {
            assert!(!node.search(&k), "expected {} to be missing", k);
        }
    }

    #[test]
    fn test_height_and_bounds() {
        let node = internal(&[10], vec![leaf(&[1, 5]), leaf(&[12, 15])]);
        assert_eq!(node.height(), 2);
        assert_eq!(node.first_key(), Some(&1));
        assert_eq!(node.last_key(), Some(&15));

        let empty: Node<i32> = Node::new_leaf();
        assert_eq!(empty.height(), 1);
        assert_eq!(empty.first_key(), None);
    }

    #[test]
    fn test_split_leaf_child() {
        let mut stats = TreeStats::new();
        let mut node = internal(&[20], vec![leaf(&[1, 2, 3, 4, 5]), leaf(&[30, 40])]);

        node.split_child(0, 3, &mut stats);

        assert_eq!(node.keys, vec![3, 20]);
        assert_eq!(child_keys(&node), vec![vec![1, 2], vec![4, 5], vec![30, 40]]);
        assert!(node.children[1].is_leaf());
        assert_eq!(stats.splits, 1);
    }

    #[test]
    fn test_split_internal_child() {
        let mut stats = TreeStats::new();
        let full = internal(
            &[10, 20, 30],
            vec![leaf(&[1]), leaf(&[15]), leaf(&[25]), leaf(&[35])],
        );
        let mut root = internal(&[], vec![full]);

        root.split_child(0, 2, &mut stats);

        assert_eq!(root.keys, vec![20]);
        let (left, right) = (&root.children[0], &root.children[1]);
        assert!(!right.is_leaf());
        assert_eq!(left.keys, vec![10]);
        assert_eq!(child_keys(left), vec![vec![1], vec![15]]);
        assert_eq!(right.keys, vec![30]);
        assert_eq!(child_keys(right), vec![vec![25], vec![35]]);
    }

    #[test]
    fn test_insert_non_full_leaf() {
        let mut stats = TreeStats::new();
        let mut node = leaf(&[1, 3, 5]);

        assert!(node.insert_non_full(4, 3, &mut stats));
        assert_eq!(node.keys, vec![1, 3, 4, 5]);

        assert!(!node.insert_non_full(3, 3, &mut stats));
        assert_eq!(node.keys, vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_insert_splits_full_child_and_goes_right() {
        let mut stats = TreeStats::new();
        let mut node = internal(&[10], vec![leaf(&[1, 2, 3]), leaf(&[11])]);

        assert!(node.insert_non_full(5, 2, &mut stats));

        assert_eq!(node.keys, vec![2, 10]);
        assert_eq!(child_keys(&node), vec![vec![1], vec![3, 5], vec![11]]);
        assert_eq!(stats.splits, 1);
    }

    #[test]
    fn test_insert_duplicate_of_promoted_median() {
        let mut stats = TreeStats::new();
        let mut node = internal(&[10], vec![leaf(&[1, 2, 3]), leaf(&[11])]);

        assert!(!node.insert_non_full(2, 2, &mut stats));

        // The split still happened; only the insert was skipped.
        assert_eq!(node.keys, vec![2, 10]);
        assert_eq!(child_keys(&node), vec![vec![1], vec![3], vec![11]]);
    }

    #[test]
    fn test_remove_from_leaf() {
        let mut stats = TreeStats::new();
        let mut node = leaf(&[1, 2, 3]);

        assert_eq!(node.remove(&2, 2, &mut stats), Some(2));
        assert_eq!(node.keys, vec![1, 3]);
        assert_eq!(node.remove(&9, 2, &mut stats), None);
        assert_eq!(node.keys, vec![1, 3]);
    }

    #[test]
    fn test_remove_internal_uses_predecessor() {
        let mut stats = TreeStats::new();
        let mut node = internal(&[10], vec![leaf(&[5, 7]), leaf(&[12])]);

        assert_eq!(node.remove(&10, 2, &mut stats), Some(10));

        assert_eq!(node.keys, vec![7]);
        assert_eq!(child_keys(&node), vec![vec![5], vec![12]]);
        assert_eq!(stats.rebalances(), 0);
    }

    #[test]
    fn test_remove_internal_uses_successor() {
        let mut stats = TreeStats::new();
        let mut node = internal(&[10], vec![leaf(&[5]), leaf(&[12, 14])]);

        assert_eq!(node.remove(&10, 2, &mut stats), Some(10));

        assert_eq!(node.keys, vec![12]);
        assert_eq!(child_keys(&node), vec![vec![5], vec![14]]);
    }

    #[test]
    fn test_remove_internal_merges_minimal_children() {
        let mut stats = TreeStats::new();
        let mut node = internal(&[10, 20], vec![leaf(&[5]), leaf(&[12]), leaf(&[25])]);

        assert_eq!(node.remove(&10, 2, &mut stats), Some(10));

        assert_eq!(node.keys, vec![20]);
        assert_eq!(child_keys(&node), vec![vec![5, 12], vec![25]]);
        assert_eq!(stats.merges, 1);
    }

    #[test]
    fn test_fill_borrows_from_prev() {
        let mut stats = TreeStats::new();
        let mut node = internal(&[10], vec![leaf(&[3, 5]), leaf(&[12])]);

        assert_eq!(node.remove(&12, 2, &mut stats), Some(12));

        assert_eq!(node.keys, vec![5]);
        assert_eq!(child_keys(&node), vec![vec![3], vec![10]]);
        assert_eq!(stats.borrows, 1);
    }

    #[test]
    fn test_fill_borrows_from_next() {
        let mut stats = TreeStats::new();
        let mut node = internal(&[10], vec![leaf(&[5]), leaf(&[12, 15])]);

        assert_eq!(node.remove(&5, 2, &mut stats), Some(5));

        assert_eq!(node.keys, vec![12]);
        assert_eq!(child_keys(&node), vec![vec![10], vec![15]]);
        assert_eq!(stats.borrows, 1);
    }

    #[test]
    fn test_fill_last_child_merges_left() {
        let mut stats = TreeStats::new();
        let mut node = internal(&[10, 20], vec![leaf(&[5]), leaf(&[15]), leaf(&[25])]);

        assert_eq!(node.remove(&25, 2, &mut stats), Some(25));

        assert_eq!(node.keys, vec![10]);
        assert_eq!(child_keys(&node), vec![vec![5], vec![15, 20]]);
        assert_eq!(stats.merges, 1);
    }

    #[test]
    fn test_fill_absent_key_still_repairs() {
        let mut stats = TreeStats::new();
        let mut node = internal(&[10, 20], vec![leaf(&[5]), leaf(&[15]), leaf(&[25])]);

        assert_eq!(node.remove(&16, 2, &mut stats), None);

        // Descending toward 16 merged [15] with [25] around 20.
        assert_eq!(node.keys, vec![10]);
        assert_eq!(child_keys(&node), vec![vec![5], vec![15, 20, 25]]);
    }

    #[test]
    fn test_borrow_moves_grandchild() {
        let mut stats = TreeStats::new();
        let left = internal(&[10, 15], vec![leaf(&[5]), leaf(&[12]), leaf(&[17])]);
        let right = internal(&[30], vec![leaf(&[25]), leaf(&[35])]);
        let mut node = internal(&[20], vec![left, right]);

        assert_eq!(node.remove(&35, 2, &mut stats), Some(35));

        assert_eq!(node.keys, vec![15]);
        let (left, right) = (&node.children[0], &node.children[1]);
        assert_eq!(left.keys, vec![10]);
        assert_eq!(child_keys(left), vec![vec![5], vec![12]]);
        assert_eq!(right.keys, vec![20]);
        assert_eq!(child_keys(right), vec![vec![17], vec![25, 30]]);
        assert_eq!(stats.borrows, 1);
        assert_eq!(stats.merges, 1);
    }

    #[test]
    fn test_pop_first_and_last() {
        let mut stats = TreeStats::new();
        let mut node = internal(&[10], vec![leaf(&[5]), leaf(&[12, 15])]);

        assert_eq!(node.pop_first(2, &mut stats), Some(5));
        assert_eq!(node.keys, vec![12]);
        assert_eq!(child_keys(&node), vec![vec![10], vec![15]]);

        assert_eq!(node.pop_last(2, &mut stats), Some(15));
        assert!(node.keys.is_empty());
        assert_eq!(child_keys(&node), vec![vec![10, 12]]);

        let mut empty: Node<i32> = Node::new_leaf();
        assert_eq!(empty.pop_first(2, &mut stats), None);
        assert_eq!(empty.pop_last(2, &mut stats), None);
    }
}
