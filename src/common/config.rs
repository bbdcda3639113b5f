//! Configuration for multiway trees.

use crate::common::{Error, Result};

/// Smallest legal minimum degree.
///
/// Every non-root node must hold at least `t - 1` keys, so `t = 2` (a 2-3-4
/// tree) is the first degree where that bound is non-zero.
pub const MIN_DEGREE: usize = 2;

/// Largest legal minimum degree.
///
/// A node may hold `2t - 1` keys and `2t` children, so `2t` must fit in a
/// `usize`.
pub const MAX_DEGREE: usize = usize::MAX / 2;

/// Minimum degree used by [`BTreeConfig::default`] and `BTree::default`.
///
/// With `t = 3` a node holds between 2 and 5 keys, which keeps trees small
/// enough to reason about by hand while still exercising every
/// rebalancing case.
pub const DEFAULT_MIN_DEGREE: usize = 3;

/// Shape parameters for a [`BTree`](crate::BTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BTreeConfig {
    /// Minimum degree `t`.
    pub min_degree: usize,
}

impl BTreeConfig {
    /// Creates a configuration with the default minimum degree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum degree.
    pub fn with_min_degree(mut self, min_degree: usize) -> Self {
        self.min_degree = min_degree;
        self
    }

    /// Checks that the configuration describes a valid node shape.
    ///
    /// # Errors
    /// - `Error::InvalidMinDegree` if `min_degree` is outside
    ///   `MIN_DEGREE..=MAX_DEGREE`
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&self.min_degree) {
            return Err(Error::InvalidMinDegree {
                min_degree: self.min_degree,
            });
        }
        Ok(())
    }

    /// Most keys any node may hold (`2t - 1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Fewest keys a non-root node may hold (`t - 1`).
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.min_degree - 1
    }
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self {
            min_degree: DEFAULT_MIN_DEGREE,
        }
    }
}
