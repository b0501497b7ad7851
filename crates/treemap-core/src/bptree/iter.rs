use super::{NodePtr, NodeWeakPtr};
use std::rc::Rc;

/// Walks every leaf from the leftmost one, following `next` links.
pub struct BPTreeIter<K, V, const ORDER: usize> {
    current_leaf: Option<NodePtr<K, V, ORDER>>,
    current_idx: usize,
}

impl<K: Ord + Clone, V: Clone, const ORDER: usize> BPTreeIter<K, V, ORDER> {
    pub fn new(first_leaf: &NodeWeakPtr<K, V, ORDER>) -> Self {
        BPTreeIter {
            current_leaf: first_leaf.upgrade(),
            current_idx: 0,
        }
    }
}

impl<K: Ord + Clone, V: Clone, const ORDER: usize> Iterator for BPTreeIter<K, V, ORDER> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let leaf_node = Rc::clone(self.current_leaf.as_ref()?);
            let leaf = leaf_node.as_leaf()?;

            let keys = leaf.keys.borrow();
            if self.current_idx < keys.len() {
                let idx = self.current_idx;
                self.current_idx += 1;
                return Some((keys[idx].clone(), leaf.values.borrow()[idx].clone()));
            }
            drop(keys);

            self.current_leaf = leaf.next_leaf();
            self.current_idx = 0;
        }
    }
}

/// Single forward pass over the leaf chain yielding keys in `[start, end)`.
/// A missing bound is open on that side.
pub struct RangeIter<K, V, const ORDER: usize> {
    current_leaf: Option<NodePtr<K, V, ORDER>>,
    current_idx: usize,
    start: Option<K>,
    end: Option<K>,
}

impl<K: Ord + Clone, V: Clone, const ORDER: usize> RangeIter<K, V, ORDER> {
    pub fn new(first_leaf: &NodeWeakPtr<K, V, ORDER>, start: Option<K>, end: Option<K>) -> Self {
        RangeIter {
            current_leaf: first_leaf.upgrade(),
            current_idx: 0,
            start,
            end,
        }
    }
}

impl<K: Ord + Clone, V: Clone, const ORDER: usize> Iterator for RangeIter<K, V, ORDER> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let leaf_node = Rc::clone(self.current_leaf.as_ref()?);
            let leaf = leaf_node.as_leaf()?;

            let keys = leaf.keys.borrow();
            if self.current_idx < keys.len() {
                let idx = self.current_idx;
                self.current_idx += 1;

                let key = &keys[idx];
                if self.end.as_ref().is_some_and(|end| key >= end) {
                    self.current_leaf = None;
                    return None;
                }
                if self.start.as_ref().is_some_and(|start| key < start) {
                    continue;
                }
                return Some((key.clone(), leaf.values.borrow()[idx].clone()));
            }
            drop(keys);

            self.current_leaf = leaf.next_leaf();
            self.current_idx = 0;
        }
    }
}
