use super::{BPTree, Node, NodePtr};
use std::fmt;

const RULE: &str = "-------------------------------------------";

/// Pre-order dump, one node per line, indented by one tab per level.
impl<K: fmt::Debug, V, const ORDER: usize> fmt::Display for BPTree<K, V, ORDER> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TreeMap")?;
        writeln!(f, "{}", RULE)?;
        write_node(f, &self.root, 0)?;
        write!(f, "{}", RULE)
    }
}

fn write_node<K: fmt::Debug, V, const ORDER: usize>(
    f: &mut fmt::Formatter<'_>,
    node: &NodePtr<K, V, ORDER>,
    level: usize,
) -> fmt::Result {
    let (keys, children) = match node.as_ref() {
        Node::Leaf(leaf) => (leaf.keys.borrow(), None),
        Node::Interior(interior) => (interior.keys.borrow(), Some(interior.children.borrow())),
    };

    for _ in 0..level {
        f.write_str("\t")?;
    }
    f.write_str("[ . ")?;
    for key in keys.iter() {
        write!(f, "{:?} . ", key)?;
    }
    writeln!(f, "]")?;

    if let Some(children) = children {
        for child in children.iter() {
            write_node(f, child, level + 1)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree() {
        let tree: BPTree<i32, i32> = BPTree::new();
        assert_eq!(tree.to_string(), format!("TreeMap\n{RULE}\n[ . ]\n{RULE}"));
    }

    #[test]
    fn test_two_levels() {
        let tree: BPTree<i32, i32> = [1, 3, 5, 7, 9].into_iter().map(|k| (k, k * k)).collect();
        let expected = format!(
            "TreeMap\n{RULE}\n[ . 3 . ]\n\t[ . 1 . 3 . ]\n\t[ . 5 . 7 . 9 . ]\n{RULE}"
        );
        assert_eq!(tree.to_string(), expected);
    }

    #[test]
    fn test_indent_follows_depth() {
        let tree: BPTree<i32, (), 3> = (0..20).map(|k| (k, ())).collect();
        let rendered = tree.to_string();
        let deepest = rendered
            .lines()
            .map(|line| line.chars().take_while(|c| *c == '\t').count())
            .max()
            .unwrap();
        assert_eq!(deepest, tree.height() - 1);
    }
}
