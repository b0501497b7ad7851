use super::{InteriorNode, LeafNode};
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

pub type NodePtr<K, V, const ORDER: usize> = Rc<Node<K, V, ORDER>>;
pub type NodeWeakPtr<K, V, const ORDER: usize> = Weak<Node<K, V, ORDER>>;

pub enum Node<K, V, const ORDER: usize> {
    Leaf(LeafNode<K, V, ORDER>),
    Interior(InteriorNode<K, V, ORDER>),
}

/// What an insertion into a subtree hands back to its parent.
pub enum InsertResult<K, V, const ORDER: usize> {
    NoSplit,
    /// The subtree root split in two. `sibling` is the new right half and
    /// `divider` is the largest key still reachable through the left half.
    Split {
        divider: K,
        sibling: NodePtr<K, V, ORDER>,
    },
}

/// Position of a key within a node's key array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Found(usize),
    /// Index of the first key greater than the probe.
    Vacant(usize),
}

/// Left-to-right scan for the first key `>= key`.
pub(super) fn locate<K: Ord>(keys: &[K], key: &K) -> Slot {
    for (i, k) in keys.iter().enumerate() {
        match key.cmp(k) {
            Ordering::Less => return Slot::Vacant(i),
            Ordering::Equal => return Slot::Found(i),
            Ordering::Greater => {}
        }
    }
    Slot::Vacant(keys.len())
}

impl<K: Ord + Clone, V: Clone, const ORDER: usize> Node<K, V, ORDER> {
    pub fn new_leaf() -> NodePtr<K, V, ORDER> {
        Rc::new(Node::Leaf(LeafNode::new()))
    }

    /// A fresh root sitting one level above `left` and `right`.
    pub fn new_root(
        divider: K,
        left: NodePtr<K, V, ORDER>,
        right: NodePtr<K, V, ORDER>,
    ) -> NodePtr<K, V, ORDER> {
        Rc::new(Node::Interior(InteriorNode::with_children(divider, left, right)))
    }

    #[cfg(test)]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&LeafNode<K, V, ORDER>> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_interior(&self) -> Option<&InteriorNode<K, V, ORDER>> {
        match self {
            Node::Interior(interior) => Some(interior),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn key_count(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.len(),
            Node::Interior(interior) => interior.len(),
        }
    }

    /// Largest key stored anywhere below this node.
    #[cfg(test)]
    pub fn max_key(&self) -> Option<K> {
        match self {
            Node::Leaf(leaf) => leaf.last_key(),
            Node::Interior(interior) => interior.last_child()?.max_key(),
        }
    }
}
