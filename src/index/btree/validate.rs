//! Structural audit of a B-tree.
//!
//! Nothing on the insert/remove path calls into this module. It exists so
//! tests and debugging sessions can assert the shape after arbitrary
//! operation sequences.

use super::node::Node;
use super::tree::BTree;
use crate::common::{Error, Result};

impl<K: Ord> BTree<K> {
    /// Walk the whole tree and report the first broken invariant.
    ///
    /// Checked:
    /// - every non-root node holds `t - 1 ..= 2t - 1` keys, the root `1 ..= 2t - 1`
    /// - internal nodes have exactly one more child than keys, leaves none
    /// - keys are strictly increasing within a node and lie strictly between
    ///   the separators bounding their subtree
    /// - all leaves sit at the same depth
    /// - the cached length matches the number of stored keys
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first violation found
    pub fn check_invariants(&self) -> Result<()> {
        let Some(root) = self.root() else {
            if self.len() != 0 {
                return Err(violation(format!(
                    "empty tree reports length {}",
                    self.len()
                )));
            }
            return Ok(());
        };

        let mut checker = Checker {
            t: self.min_degree(),
            leaf_depth: None,
        };
        let count = checker.check(root, 0, None, None)?;

        if count != self.len() {
            return Err(violation(format!(
                "tree holds {} keys but reports length {}",
                count,
                self.len()
            )));
        }
        Ok(())
    }
}

fn violation(reason: String) -> Error {
    Error::InvariantViolation(reason)
}

struct Checker {
    t: usize,
    leaf_depth: Option<usize>,
}

impl Checker {
    /// Check the subtree at `node`, returning how many keys it holds.
    fn check<K: Ord>(
        &mut self,
        node: &Node<K>,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<usize> {
        let n = node.keys.len();
        let min = if depth == 0 { 1 } else { self.t - 1 };
        let max = 2 * self.t - 1;
        if n < min || n > max {
            return Err(violation(format!(
                "node at depth {} holds {} keys, expected {}..={}",
                depth, n, min, max
            )));
        }

        if node.keys.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(violation(format!(
                "keys of node at depth {} are not strictly increasing",
                depth
            )));
        }

        let below_lower = matches!((lower, node.keys.first()), (Some(lo), Some(k)) if k <= lo);
        let above_upper = matches!((upper, node.keys.last()), (Some(hi), Some(k)) if k >= hi);
        if below_lower || above_upper {
            return Err(violation(format!(
                "node at depth {} has keys outside its separator bounds",
                depth
            )));
        }

        if node.is_leaf() {
            if !node.children.is_empty() {
                return Err(violation(format!(
                    "leaf at depth {} has {} children",
                    depth,
                    node.children.len()
                )));
            }
            match self.leaf_depth {
                None => self.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(violation(format!(
                        "leaf at depth {} but earlier leaves are at depth {}",
                        depth, expected
                    )));
                }
                Some(_) => {}
            }
            return Ok(n);
        }

        if node.children.len() != n + 1 {
            return Err(violation(format!(
                "internal node at depth {} has {} keys but {} children",
                depth,
                n,
                node.children.len()
            )));
        }

        let mut count = n;
        for (i, child) in node.children.iter().enumerate() {
            let lo = if i == 0 { lower } else { node.keys.get(i - 1) };
            let hi = node.keys.get(i).or(upper);
            count += self.check(child, depth + 1, lo, hi)?;
        }
        Ok(count)
    }
}
