//! Ordered maps backed by self-balancing binary search trees.
//!
//! Two interchangeable disciplines share one contract: `insert`, `remove`, `get`, `len` and
//! `is_empty` all run in `O(log n)` worst case.
//!
//! - `avl_tree::AvlMap` keeps the heights of sibling subtrees within one of each other.
//! - `red_black_tree::RedBlackMap` keeps red and black colors balanced along every path.
//!
//! Nodes live in an index-addressed arena with parent back-references, so rebalancing walks up
//! the tree without recursion. Keys are ordered by a comparator chosen at construction.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::avl_tree::AvlMap;
//! use balanced_trees::red_black_tree::RedBlackMap;
//! use balanced_trees::Error;
//!
//! let mut avl = AvlMap::new();
//! let mut red_black = RedBlackMap::new();
//! for key in 0..10 {
//!     avl.insert(key, key * key).unwrap();
//!     red_black.insert(key, key * key).unwrap();
//! }
//!
//! assert_eq!(avl.get(&3), red_black.get(&3));
//! assert_eq!(avl.insert(3, 0), Err(Error::KeyExists));
//! assert_eq!(red_black.remove(&11), Err(Error::KeyNotFound));
//! ```

mod arena;
mod bst;
mod entry;
mod error;

pub mod avl_tree;
pub mod compare;
pub mod red_black_tree;

pub use crate::error::{Error, Result};
