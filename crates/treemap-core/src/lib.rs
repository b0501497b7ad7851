//! An in-memory B+Tree map with a linked leaf level.
//!
//! Keys live only in the leaves; internal nodes hold divider keys where each
//! divider is the largest key of the subtree to its left. Leaves are chained
//! left to right so full scans and range scans never re-descend the tree.

pub mod error;
pub mod bptree;

pub use error::{Error, Result};
pub use bptree::{BPTree, BPTreeIter, RangeIter, DEFAULT_ORDER};
