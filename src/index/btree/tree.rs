//! The public B-tree type.

use std::fmt;
use std::mem;

use super::iter::Iter;
use super::node::Node;
use super::stats::TreeStats;
use crate::common::config::DEFAULT_MIN_DEGREE;
use crate::common::{BTreeConfig, Result};

/// An ordered set of keys stored in a B-tree of minimum degree `t`.
///
/// Every node other than the root holds between `t - 1` and `2t - 1` keys,
/// internal nodes have one more child than they have keys, and all leaves
/// sit at the same depth. Search, insert and remove each make a single
/// pass down from the root.
///
/// # Example
/// ```
/// use multiway::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for k in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(k);
/// }
///
/// assert!(tree.search(&6));
/// assert!(tree.remove(&6));
/// assert!(!tree.search(&6));
/// assert_eq!(tree.traverse(), vec![5, 7, 10, 12, 17, 20, 30]);
/// ```
#[derive(Clone)]
pub struct BTree<K> {
    root: Option<Box<Node<K>>>,
    min_degree: usize,
    len: usize,
    stats: TreeStats,
}

impl<K> BTree<K> {
    /// Create an empty tree with minimum degree `min_degree`.
    ///
    /// # Errors
    /// - `Error::InvalidMinDegree` if `min_degree` is below 2 or above
    ///   [`MAX_DEGREE`](crate::MAX_DEGREE)
    pub fn new(min_degree: usize) -> Result<Self> {
        Self::with_config(BTreeConfig::new().with_min_degree(min_degree))
    }

    /// Create an empty tree from a [`BTreeConfig`].
    ///
    /// # Errors
    /// - `Error::InvalidMinDegree` if the configured degree is out of range
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            root: None,
            min_degree: config.min_degree,
            len: 0,
            stats: TreeStats::new(),
        })
    }

    /// The minimum degree `t` this tree was built with.
    #[inline]
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Number of keys in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels: 0 for an empty tree, 1 for a lone leaf root.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.height())
    }

    /// Smallest key, if any.
    pub fn first(&self) -> Option<&K> {
        self.root.as_ref().and_then(|root| root.first_key())
    }

    /// Largest key, if any.
    pub fn last(&self) -> Option<&K> {
        self.root.as_ref().and_then(|root| root.last_key())
    }

    /// Remove and return the smallest key.
    pub fn pop_first(&mut self) -> Option<K> {
        let t = self.min_degree;
        let popped = self.root.as_mut()?.pop_first(t, &mut self.stats);
        self.finish_removal(popped)
    }

    /// Remove and return the largest key.
    pub fn pop_last(&mut self) -> Option<K> {
        let t = self.min_degree;
        let popped = self.root.as_mut()?.pop_last(t, &mut self.stats);
        self.finish_removal(popped)
    }

    /// In-order iterator over the keys.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Drop every key. The minimum degree and stats are kept.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Rebalancing counters accumulated since creation or the last reset.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Zero the rebalancing counters.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub(crate) fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn root_mut(&mut self) -> Option<&mut Node<K>> {
        self.root.as_deref_mut()
    }

    fn finish_removal(&mut self, removed: Option<K>) -> Option<K> {
        if removed.is_some() {
            self.len -= 1;
        }
        self.collapse_root();
        removed
    }

    /// Replace an emptied root by its only child, or empty the tree if the
    /// root was a leaf.
    fn collapse_root(&mut self) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        if !root.keys.is_empty() {
            return;
        }

        let promoted = root.children.pop();
        let collapsed = promoted.is_some();
        self.root = promoted;
        if collapsed {
            self.stats.root_collapses += 1;
            tracing::debug!(height = self.height(), "collapsed empty root");
        }
    }
}

impl<K: Ord> BTree<K> {
    /// Insert `key`.
    ///
    /// Returns `false` and leaves the tree unchanged if the key is already
    /// present.
    pub fn insert(&mut self, key: K) -> bool {
        let t = self.min_degree;

        let Some(root) = self.root.as_mut() else {
            let mut root = Node::new_leaf();
            root.keys.push(key);
            self.root = Some(Box::new(root));
            self.len = 1;
            return true;
        };

        // A duplicate must not trigger the splits below.
        if root.search(&key) {
            return false;
        }

        if root.is_full(t) {
            let old_root = mem::replace(root, Box::new(Node::new_internal()));
            root.children.push(old_root);
            root.split_child(0, t, &mut self.stats);
            self.stats.root_splits += 1;
            tracing::debug!(height = root.height(), "split full root");
        }

        let inserted = root.insert_non_full(key, t, &mut self.stats);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Whether `key` is in the tree.
    pub fn search(&self, key: &K) -> bool {
        self.root.as_ref().is_some_and(|root| root.search(key))
    }

    /// Alias of [`search`](Self::search).
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.search(key)
    }

    /// Remove `key`.
    ///
    /// Returns `false` if the key was not present. Rebalancing on the way
    /// down may still reshape the tree in that case.
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Remove `key` and return the stored key.
    pub fn take(&mut self, key: &K) -> Option<K> {
        let t = self.min_degree;
        let removed = self.root.as_mut()?.remove(key, t, &mut self.stats);
        self.finish_removal(removed)
    }
}

impl<K: Clone> BTree<K> {
    /// All keys in ascending order.
    pub fn traverse(&self) -> Vec<K> {
        self.iter().cloned().collect()
    }
}

impl<K> Default for BTree<K> {
    fn default() -> Self {
        Self {
            root: None,
            min_degree: DEFAULT_MIN_DEGREE,
            len: 0,
            stats: TreeStats::new(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for BTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Level outline of the node structure, one node per line.
///
/// ```
/// use multiway::BTree;
///
/// let tree: BTree<i32> = (1..=6).collect();
/// assert_eq!(tree.to_string(), "[3]\n  [1, 2]\n  [4, 5, 6]\n");
/// ```
impl<K: fmt::Debug> fmt::Display for BTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            None => writeln!(f, "[]"),
            Some(root) => root.fmt_depth(f, 0),
        }
    }
}

impl<K: PartialEq> PartialEq for BTree<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for BTree<K> {}

impl<K: Ord> Extend<K> for BTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for BTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<'a, K> IntoIterator for &'a BTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
