use super::node::{locate, InsertResult, Node, NodePtr, Slot};
use std::cell::RefCell;
use std::rc::Rc;

pub struct InteriorNode<K, V, const ORDER: usize> {
    pub(super) keys: RefCell<Vec<K>>,
    pub(super) children: RefCell<Vec<NodePtr<K, V, ORDER>>>,
}

impl<K: Ord + Clone, V: Clone, const ORDER: usize> InteriorNode<K, V, ORDER> {
    pub fn new() -> Self {
        InteriorNode {
            keys: RefCell::new(Vec::with_capacity(ORDER - 1)),
            children: RefCell::new(Vec::with_capacity(ORDER)),
        }
    }

    pub fn with_children(
        divider: K,
        left: NodePtr<K, V, ORDER>,
        right: NodePtr<K, V, ORDER>,
    ) -> Self {
        let node = Self::new();
        node.keys.borrow_mut().push(divider);
        node.children.borrow_mut().extend([left, right]);
        node
    }

    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= ORDER - 1
    }

    /// Index of the child whose range covers `key`: the first divider that is
    /// `>= key`, or the last child when every divider is smaller.
    pub fn child_index(&self, key: &K) -> usize {
        match locate(self.keys.borrow().as_slice(), key) {
            Slot::Found(i) | Slot::Vacant(i) => i,
        }
    }

    pub fn get_child(&self, key: &K) -> NodePtr<K, V, ORDER> {
        let idx = self.child_index(key);
        Rc::clone(&self.children.borrow()[idx])
    }

    pub fn first_child(&self) -> Option<NodePtr<K, V, ORDER>> {
        self.children.borrow().first().cloned()
    }

    pub fn last_child(&self) -> Option<NodePtr<K, V, ORDER>> {
        self.children.borrow().last().cloned()
    }

    /// Take in the right half of child `idx` after that child split.
    pub fn insert_child(
        &self,
        idx: usize,
        divider: K,
        sibling: NodePtr<K, V, ORDER>,
    ) -> InsertResult<K, V, ORDER> {
        if !self.is_full() {
            self.wedge(idx, divider, sibling);
            return InsertResult::NoSplit;
        }
        tracing::trace!(child = idx, "interior split");
        self.split(idx, divider, sibling)
    }

    /// `divider` becomes the bound of child `idx`; `sibling` lands at `idx + 1`
    /// and inherits the bound child `idx` used to have.
    fn wedge(&self, idx: usize, divider: K, sibling: NodePtr<K, V, ORDER>) {
        let mut keys = self.keys.borrow_mut();
        let mut children = self.children.borrow_mut();
        debug_assert!(keys.len() < ORDER - 1, "wedge into a full interior node");

        keys.insert(idx, divider);
        children.insert(idx + 1, sibling);
    }

    /// Split a full node around its median key. The median moves up to the
    /// parent and is kept by neither half.
    fn split(
        &self,
        idx: usize,
        divider: K,
        sibling: NodePtr<K, V, ORDER>,
    ) -> InsertResult<K, V, ORDER> {
        let mid = ORDER / 2;

        let right = InteriorNode::new();
        let median = {
            let mut keys = self.keys.borrow_mut();
            let mut children = self.children.borrow_mut();
            right.keys.borrow_mut().extend(keys.drain(mid + 1..));
            right.children.borrow_mut().extend(children.drain(mid + 1..));
            keys.remove(mid)
        };

        if idx <= mid {
            self.wedge(idx, divider, sibling);
        } else {
            right.wedge(idx - mid - 1, divider, sibling);
        }

        InsertResult::Split {
            divider: median,
            sibling: Rc::new(Node::Interior(right)),
        }
    }
}

impl<K: Ord + Clone, V: Clone, const ORDER: usize> Default for InteriorNode<K, V, ORDER> {
    fn default() -> Self {
        Self::new()
    }
}
