mod node;
mod leaf;
mod interior;
mod iter;
mod check;
mod display;

pub use node::{InsertResult, Node, NodePtr, NodeWeakPtr, Slot};
pub use leaf::LeafNode;
pub use interior::InteriorNode;
pub use iter::{BPTreeIter, RangeIter};

use crate::error::{Error, Result};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Fanout used when none is given: at most 5 children and 4 keys per node.
pub const DEFAULT_ORDER: usize = 5;

/// Ordered map over a B+Tree with `ORDER` as the maximum number of children
/// per internal node.
///
/// Keys are unique. Inserting a key that is already present is rejected and
/// leaves the stored value in place.
pub struct BPTree<K, V, const ORDER: usize = DEFAULT_ORDER> {
    root: NodePtr<K, V, ORDER>,
    first_leaf: NodeWeakPtr<K, V, ORDER>,
    len: usize,
    visited: Cell<usize>,
}

impl<K: Ord + Clone + fmt::Debug, V: Clone, const ORDER: usize> BPTree<K, V, ORDER> {
    pub fn new() -> Self {
        assert!(ORDER >= 3, "ORDER must be at least 3");
        let root = Node::new_leaf();
        let first_leaf = Rc::downgrade(&root);
        BPTree {
            root,
            first_leaf,
            len: 0,
            visited: Cell::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of stored pairs; same as [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels, counting the leaf level.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = Rc::clone(&self.root);
        while let Some(child) = current.as_interior().and_then(|interior| interior.first_child()) {
            current = child;
            height += 1;
        }
        height
    }

    /// Nodes touched by lookups since construction or the last reset.
    pub fn nodes_visited(&self) -> usize {
        self.visited.get()
    }

    pub fn reset_nodes_visited(&self) {
        self.visited.set(0);
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let mut current = Rc::clone(&self.root);
        loop {
            self.visited.set(self.visited.get() + 1);
            let child = match current.as_ref() {
                Node::Leaf(leaf) => return leaf.search(key),
                Node::Interior(interior) => interior.get_child(key),
            };
            current = child;
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Insert a new pair. A key that is already present yields
    /// [`Error::DuplicateKey`] and the tree is left exactly as it was.
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        let result = Self::insert_recursive(&self.root, key, value)?;
        if let InsertResult::Split { divider, sibling } = result {
            self.root = Node::new_root(divider, Rc::clone(&self.root), sibling);
            tracing::debug!(height = self.height(), "root split");
        }
        self.len += 1;

        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!("tree after insert:\n{}", self);
        }
        Ok(())
    }

    fn insert_recursive(
        node: &NodePtr<K, V, ORDER>,
        key: K,
        value: V,
    ) -> Result<InsertResult<K, V, ORDER>> {
        match node.as_ref() {
            Node::Leaf(leaf) => leaf.insert(key, value),
            Node::Interior(interior) => {
                let idx = interior.child_index(&key);
                let child = {
                    let children = interior.children.borrow();
                    Rc::clone(&children[idx])
                };

                match Self::insert_recursive(&child, key, value)? {
                    InsertResult::NoSplit => Ok(InsertResult::NoSplit),
                    InsertResult::Split { divider, sibling } => {
                        Ok(interior.insert_child(idx, divider, sibling))
                    }
                }
            }
        }
    }

    pub fn first_key(&self) -> Result<K> {
        self.first_leaf
            .upgrade()
            .and_then(|node| node.as_leaf()?.first_key())
            .ok_or(Error::EmptyTree)
    }

    pub fn last_key(&self) -> Result<K> {
        let mut current = Rc::clone(&self.root);
        while let Some(child) = current.as_interior().and_then(|interior| interior.last_child()) {
            current = child;
        }
        current.as_leaf().and_then(|leaf| leaf.last_key()).ok_or(Error::EmptyTree)
    }

    pub fn iter(&self) -> BPTreeIter<K, V, ORDER> {
        BPTreeIter::new(&self.first_leaf)
    }

    /// Every pair in ascending key order.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.iter().collect()
    }

    /// Lazily yields pairs with `start <= key < end`.
    pub fn range_iter(&self, start: &K, end: &K) -> RangeIter<K, V, ORDER> {
        RangeIter::new(&self.first_leaf, Some(start.clone()), Some(end.clone()))
    }

    /// Pairs with `start <= key < end`. Empty when `start >= end`.
    pub fn range(&self, start: &K, end: &K) -> Vec<(K, V)> {
        self.range_iter(start, end).collect()
    }

    /// Pairs with `key < end`.
    pub fn head_range(&self, end: &K) -> Vec<(K, V)> {
        RangeIter::new(&self.first_leaf, None, Some(end.clone())).collect()
    }

    /// Pairs with `key >= start`.
    pub fn tail_range(&self, start: &K) -> Vec<(K, V)> {
        RangeIter::new(&self.first_leaf, Some(start.clone()), None).collect()
    }

    /// A new tree holding the pairs with `start <= key < end`.
    pub fn sub_map(&self, start: &K, end: &K) -> Self {
        self.range_iter(start, end).collect()
    }

    pub fn head_map(&self, end: &K) -> Self {
        RangeIter::new(&self.first_leaf, None, Some(end.clone())).collect()
    }

    pub fn tail_map(&self, start: &K) -> Self {
        RangeIter::new(&self.first_leaf, Some(start.clone()), None).collect()
    }
}

impl<K: Ord + Clone + fmt::Debug, V: Clone, const ORDER: usize> Default for BPTree<K, V, ORDER> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, const ORDER: usize> Extend<(K, V)> for BPTree<K, V, ORDER>
where
    K: Ord + Clone + fmt::Debug,
    V: Clone,
{
    /// Duplicate keys are skipped; each one is logged by the insert path.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ = self.put(key, value);
        }
    }
}

impl<K, V, const ORDER: usize> FromIterator<(K, V)> for BPTree<K, V, ORDER>
where
    K: Ord + Clone + fmt::Debug,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V, const ORDER: usize> IntoIterator for &'a BPTree<K, V, ORDER>
where
    K: Ord + Clone + fmt::Debug,
    V: Clone,
{
    type Item = (K, V);
    type IntoIter = BPTreeIter<K, V, ORDER>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, const ORDER: usize> fmt::Debug for BPTree<K, V, ORDER>
where
    K: Ord + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
