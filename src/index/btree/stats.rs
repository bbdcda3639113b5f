//! Structural event counters for a B-tree.

use std::fmt;

/// Counts of the rebalancing steps a tree has performed.
///
/// The tree is single-threaded, so these are plain integers rather than
/// atomics. `BTree::stats` hands out a copy; the live counters are only
/// touched by the node operations that perform each step.
///
/// # Example
/// ```
/// use multiway::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// for k in 0..4 {
///     tree.insert(k);
/// }
/// // The fourth insert found a full root and split it.
/// assert_eq!(tree.stats().root_splits, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of full nodes split in two (root splits included).
    pub splits: u64,

    /// Number of splits that happened at the root, i.e. height increases.
    pub root_splits: u64,

    /// Number of keys rotated across a separator from a sibling.
    pub borrows: u64,

    /// Number of sibling pairs merged around their separator.
    pub merges: u64,

    /// Number of times an emptied root was replaced by its only child.
    pub root_collapses: u64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total number of node-level rebalancing steps.
    pub fn rebalances(&self) -> u64 {
        self.splits + self.borrows + self.merges
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {} (root: {}), borrows: {}, merges: {}, root_collapses: {} }}",
            self.splits, self.root_splits, self.borrows, self.merges, self.root_collapses
        )
    }
}
