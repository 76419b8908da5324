//! Self-balancing binary search tree where every node is colored red or black, no red node has a
//! red child, and every path from a node to an absent child passes through the same number of
//! black nodes.

mod map;
mod node;
mod tree;

pub use self::map::{RedBlackMap, RedBlackMapIntoIter, RedBlackMapIter};
