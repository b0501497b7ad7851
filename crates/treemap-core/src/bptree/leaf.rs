use super::node::{locate, InsertResult, Node, NodePtr, NodeWeakPtr, Slot};
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::{Rc, Weak};

pub struct LeafNode<K, V, const ORDER: usize> {
    pub(super) keys: RefCell<Vec<K>>,
    pub(super) values: RefCell<Vec<V>>,
    pub(super) next: RefCell<NodeWeakPtr<K, V, ORDER>>,
}

impl<K: Ord + Clone, V: Clone, const ORDER: usize> LeafNode<K, V, ORDER> {
    pub fn new() -> Self {
        LeafNode {
            keys: RefCell::new(Vec::with_capacity(ORDER - 1)),
            values: RefCell::new(Vec::with_capacity(ORDER - 1)),
            next: RefCell::new(Weak::new()),
        }
    }

    pub fn search(&self, key: &K) -> Option<V> {
        match locate(self.keys.borrow().as_slice(), key) {
            Slot::Found(idx) => Some(self.values.borrow()[idx].clone()),
            Slot::Vacant(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= ORDER - 1
    }

    pub fn first_key(&self) -> Option<K> {
        self.keys.borrow().first().cloned()
    }

    pub fn last_key(&self) -> Option<K> {
        self.keys.borrow().last().cloned()
    }

    pub fn get_next(&self) -> NodeWeakPtr<K, V, ORDER> {
        self.next.borrow().clone()
    }

    /// The following leaf, if it is still alive.
    pub fn next_leaf(&self) -> Option<NodePtr<K, V, ORDER>> {
        self.next.borrow().upgrade()
    }

    /// Shift everything from `idx` right by one and place the pair there.
    fn wedge(&self, idx: usize, key: K, value: V) {
        let mut keys = self.keys.borrow_mut();
        let mut values = self.values.borrow_mut();
        debug_assert!(keys.len() < ORDER - 1, "wedge into a full leaf");

        keys.insert(idx, key);
        values.insert(idx, value);
    }

    /// Split a full leaf, keeping the lower `ORDER / 2` entries here, and
    /// place the new pair on whichever side it belongs. The new right leaf is
    /// spliced into the chain directly after this one.
    fn split(&self, idx: usize, key: K, value: V) -> InsertResult<K, V, ORDER> {
        let mid = ORDER / 2;

        let mut right_keys = Vec::with_capacity(ORDER - 1);
        let mut right_values = Vec::with_capacity(ORDER - 1);
        {
            let mut keys = self.keys.borrow_mut();
            let mut values = self.values.borrow_mut();
            right_keys.extend(keys.drain(mid..));
            right_values.extend(values.drain(mid..));
        }

        let right = LeafNode {
            keys: RefCell::new(right_keys),
            values: RefCell::new(right_values),
            next: RefCell::new(self.get_next()),
        };

        if idx < mid {
            self.wedge(idx, key, value);
        } else {
            right.wedge(idx - mid, key, value);
        }

        let divider = {
            let keys = self.keys.borrow();
            keys[keys.len() - 1].clone()
        };

        let sibling = Rc::new(Node::Leaf(right));
        *self.next.borrow_mut() = Rc::downgrade(&sibling);

        InsertResult::Split { divider, sibling }
    }
}

impl<K: Ord + Clone + Debug, V: Clone, const ORDER: usize> LeafNode<K, V, ORDER> {
    /// Insert a pair, splitting when the leaf is already full. An existing
    /// key is rejected before anything is touched.
    pub fn insert(&self, key: K, value: V) -> Result<InsertResult<K, V, ORDER>> {
        let idx = match locate(self.keys.borrow().as_slice(), &key) {
            Slot::Found(_) => {
                tracing::warn!(key = ?key, "attempt to insert duplicate key");
                return Err(Error::DuplicateKey);
            }
            Slot::Vacant(idx) => idx,
        };

        if !self.is_full() {
            self.wedge(idx, key, value);
            return Ok(InsertResult::NoSplit);
        }

        tracing::trace!(key = ?key, "leaf split");
        Ok(self.split(idx, key, value))
    }
}

impl<K: Ord + Clone, V: Clone, const ORDER: usize> Default for LeafNode<K, V, ORDER> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(node: &NodePtr<i32, i32, 5>) -> Vec<i32> {
        node.as_leaf().unwrap().keys.borrow().clone()
    }

    #[test]
    fn test_insert_keeps_order() {
        let leaf = LeafNode::<i32, i32, 5>::new();
        for k in [7, 1, 5, 3] {
            assert!(matches!(leaf.insert(k, k * k), Ok(InsertResult::NoSplit)));
        }
        assert_eq!(*leaf.keys.borrow(), vec![1, 3, 5, 7]);
        assert_eq!(*leaf.values.borrow(), vec![1, 9, 25, 49]);
        assert!(leaf.is_full());
    }

    #[test]
    fn test_duplicate_leaves_leaf_untouched() {
        let leaf = LeafNode::<i32, &str, 5>::new();
        leaf.insert(5, "five").unwrap();
        assert_eq!(leaf.insert(5, "FIVE").err(), Some(Error::DuplicateKey));
        assert_eq!(leaf.len(), 1);
        assert_eq!(leaf.search(&5), Some("five"));
    }

    #[test]
    fn test_duplicate_in_full_leaf_does_not_split() {
        let leaf = LeafNode::<i32, i32, 5>::new();
        for k in [1, 3, 5, 7] {
            leaf.insert(k, k).unwrap();
        }
        assert_eq!(leaf.insert(3, 0).err(), Some(Error::DuplicateKey));
        assert_eq!(leaf.len(), 4);
        assert!(leaf.next_leaf().is_none());
    }

    #[test]
    fn test_split_upper_insert() {
        let leaf = LeafNode::<i32, i32, 5>::new();
        for k in [1, 3, 5, 7] {
            leaf.insert(k, k * k).unwrap();
        }

        match leaf.insert(9, 81).unwrap() {
            InsertResult::Split { divider, sibling } => {
                assert_eq!(divider, 3);
                assert_eq!(*leaf.keys.borrow(), vec![1, 3]);
                assert_eq!(keys_of(&sibling), vec![5, 7, 9]);
                assert!(Rc::ptr_eq(&leaf.next_leaf().unwrap(), &sibling));
            }
            InsertResult::NoSplit => panic!("expected split"),
        }
    }

    #[test]
    fn test_split_lower_insert() {
        let leaf = LeafNode::<i32, i32, 5>::new();
        for k in [10, 20, 30, 40] {
            leaf.insert(k, k).unwrap();
        }

        match leaf.insert(5, 5).unwrap() {
            InsertResult::Split { divider, sibling } => {
                assert_eq!(divider, 20);
                assert_eq!(*leaf.keys.borrow(), vec![5, 10, 20]);
                assert_eq!(keys_of(&sibling), vec![30, 40]);
            }
            InsertResult::NoSplit => panic!("expected split"),
        }
    }

    #[test]
    fn test_split_at_midpoint_goes_right() {
        let leaf = LeafNode::<i32, i32, 5>::new();
        for k in [10, 20, 30, 40] {
            leaf.insert(k, k).unwrap();
        }

        match leaf.insert(25, 25).unwrap() {
            InsertResult::Split { divider, sibling } => {
                assert_eq!(divider, 20);
                assert_eq!(*leaf.keys.borrow(), vec![10, 20]);
                assert_eq!(keys_of(&sibling), vec![25, 30, 40]);
            }
            InsertResult::NoSplit => panic!("expected split"),
        }
    }

    #[test]
    fn test_split_preserves_chain() {
        let left = Node::<i32, i32, 5>::new_leaf();
        let leaf = left.as_leaf().unwrap();
        for k in [1, 2, 3, 4] {
            leaf.insert(k, k).unwrap();
        }
        let first = match leaf.insert(5, 5).unwrap() {
            InsertResult::Split { sibling, .. } => sibling,
            InsertResult::NoSplit => panic!("expected split"),
        };
        for k in [0, -1] {
            leaf.insert(k, k).unwrap();
        }
        let second = match leaf.insert(-2, -2).unwrap() {
            InsertResult::Split { sibling, .. } => sibling,
            InsertResult::NoSplit => panic!("expected split"),
        };

        // left -> second -> first
        assert!(Rc::ptr_eq(&leaf.next_leaf().unwrap(), &second));
        let after = second.as_leaf().unwrap().next_leaf().unwrap();
        assert!(Rc::ptr_eq(&after, &first));
        assert!(first.as_leaf().unwrap().next_leaf().is_none());
    }
}
