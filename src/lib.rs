//! multiway - an in-memory B-tree index.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            BTree<K>                             │
//! │   insert / search / remove / traverse, root split + collapse    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                             Node<K>                             │
//! │   keys: Vec<K>          children: Vec<Box<Node<K>>>             │
//! │   split_child · insert_non_full · fill · borrow · merge         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (config, Error)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use multiway::BTree;
//!
//! let mut tree = BTree::new(3).unwrap();
//! for k in [10, 20, 5, 6, 12, 30, 7, 17, 8, 3, 2, 4] {
//!     tree.insert(k);
//! }
//! assert_eq!(tree.traverse(), vec![2, 3, 4, 5, 6, 7, 8, 10, 12, 17, 20, 30]);
//!
//! tree.remove(&6);
//! assert!(!tree.search(&6));
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_MIN_DEGREE, MAX_DEGREE, MIN_DEGREE};
pub use common::{BTreeConfig, Error, Result};

pub use index::btree::{BTree, Iter, TreeStats};
