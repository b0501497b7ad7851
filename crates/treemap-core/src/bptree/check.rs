use super::{BPTree, Node, NodePtr};
use crate::error::{Error, Result};
use std::fmt::Debug;
use std::rc::Rc;

fn corruption(msg: impl Into<String>) -> Error {
    Error::Corruption(msg.into())
}

fn check_keys<K: Ord + Debug>(keys: &[K], capacity: usize) -> Result<()> {
    if keys.len() > capacity {
        return Err(corruption(format!("node holds {} keys, capacity is {}", keys.len(), capacity)));
    }
    if let Some(pair) = keys.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(corruption(format!("keys out of order: {:?} before {:?}", pair[0], pair[1])));
    }
    Ok(())
}

impl<K: Ord + Clone + Debug, V: Clone, const ORDER: usize> BPTree<K, V, ORDER> {
    /// Walk the whole tree and report the first broken structural rule:
    /// node capacity and key order, child counts, divider keys, leaf depth,
    /// the leaf chain and the stored length.
    pub fn check_invariants(&self) -> Result<()> {
        let mut leaves = Vec::new();
        let mut leaf_depth = None;
        Self::check_node(&self.root, 0, true, &mut leaf_depth, &mut leaves)?;
        self.check_leaf_chain(&leaves)
    }

    /// Returns the largest key under `node`.
    fn check_node(
        node: &NodePtr<K, V, ORDER>,
        depth: usize,
        is_root: bool,
        leaf_depth: &mut Option<usize>,
        leaves: &mut Vec<NodePtr<K, V, ORDER>>,
    ) -> Result<Option<K>> {
        match node.as_ref() {
            Node::Leaf(leaf) => {
                let keys = leaf.keys.borrow();
                check_keys(keys.as_slice(), ORDER - 1)?;
                if leaf.values.borrow().len() != keys.len() {
                    return Err(corruption("leaf keys and values differ in length"));
                }
                if keys.is_empty() && !is_root {
                    return Err(corruption("empty leaf below the root"));
                }
                match *leaf_depth {
                    None => *leaf_depth = Some(depth),
                    Some(expected) if expected != depth => {
                        return Err(corruption(format!(
                            "leaf at depth {}, expected {}",
                            depth, expected
                        )));
                    }
                    Some(_) => {}
                }
                leaves.push(Rc::clone(node));
                Ok(keys.last().cloned())
            }
            Node::Interior(interior) => {
                let keys = interior.keys.borrow();
                let children = interior.children.borrow();
                check_keys(keys.as_slice(), ORDER - 1)?;
                if children.len() != keys.len() + 1 {
                    return Err(corruption(format!(
                        "interior node has {} keys but {} children",
                        keys.len(),
                        children.len()
                    )));
                }

                let mut max = None;
                for (i, child) in children.iter().enumerate() {
                    let child_max = Self::check_node(child, depth + 1, false, leaf_depth, leaves)?;
                    if let Some(divider) = keys.get(i) {
                        if child_max.as_ref() != Some(divider) {
                            return Err(corruption(format!(
                                "divider {:?} at slot {} but child max is {:?}",
                                divider, i, child_max
                            )));
                        }
                    }
                    max = child_max;
                }
                Ok(max)
            }
        }
    }

    fn check_leaf_chain(&self, leaves: &[NodePtr<K, V, ORDER>]) -> Result<()> {
        let mut current = self.first_leaf.upgrade();
        let mut position = 0;
        let mut count = 0;
        let mut previous: Option<K> = None;

        while let Some(node) = current {
            let expected = leaves
                .get(position)
                .ok_or_else(|| corruption("leaf chain is longer than the leaf level"))?;
            if !Rc::ptr_eq(&node, expected) {
                return Err(corruption(format!(
                    "leaf chain diverges from the tree at leaf {}",
                    position
                )));
            }
            let leaf = node
                .as_leaf()
                .ok_or_else(|| corruption("leaf chain reaches an interior node"))?;

            for key in leaf.keys.borrow().iter() {
                if previous.as_ref().is_some_and(|prev| prev >= key) {
                    return Err(corruption(format!("leaf chain out of order at {:?}", key)));
                }
                previous = Some(key.clone());
                count += 1;
            }

            position += 1;
            current = leaf.next_leaf();
        }

        if position != leaves.len() {
            return Err(corruption(format!(
                "leaf chain visits {} of {} leaves",
                position,
                leaves.len()
            )));
        }
        if count != self.len {
            return Err(corruption(format!("leaf chain holds {} keys, len is {}", count, self.len)));
        }
        Ok(())
    }
}
