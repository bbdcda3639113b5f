//! B-tree index.
//!
//! An in-memory B-tree of configurable minimum degree `t`, rebalanced
//! top-down: insert splits full children before descending into them and
//! remove fills under-full children (borrow from a sibling or merge) before
//! descending into them, so no operation ever walks back up.
//!
//! # Components
//! - [`BTree`] - The public ordered-set API and root handling
//! - `node` - Node storage and the split / borrow / merge protocol
//! - [`Iter`] - Stack-based in-order iterator
//! - [`TreeStats`] - Counters of structural events

mod iter;
mod node;
mod stats;
mod tree;
mod validate;

pub use iter::Iter;
pub use stats::TreeStats;
pub use tree::BTree;
