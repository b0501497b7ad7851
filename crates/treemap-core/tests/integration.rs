use std::collections::BTreeMap;
use treemap_core::{BPTree, Error};

#[test]
fn test_sequential_odd_keys() {
    let mut tree: BPTree<i32, i32> = BPTree::new();
    for i in (1..=25).step_by(2) {
        tree.put(i, i * i).unwrap();
    }

    assert_eq!(tree.size(), 13);
    for i in 0..=25 {
        let expected = if i % 2 == 1 { Some(i * i) } else { None };
        assert_eq!(tree.get(&i), expected, "key {}", i);
    }
    assert_eq!(tree.first_key(), Ok(1));
    assert_eq!(tree.last_key(), Ok(25));
    tree.check_invariants().unwrap();
}

#[test]
fn test_repeated_key_keeps_first_value() {
    let mut tree: BPTree<i32, String> = BPTree::new();
    tree.put(5, "first".to_string()).unwrap();

    let err = tree.put(5, "second".to_string()).unwrap_err();
    assert_eq!(err, Error::DuplicateKey);
    assert_eq!(tree.size(), 1);
    assert_eq!(tree.get(&5).as_deref(), Some("first"));
}

#[test]
fn test_pseudo_random_workload_matches_btreemap() {
    let mut tree = BPTree::<u64, u64, 8>::new();
    let mut reference = BTreeMap::new();

    let mut state = 0x2545_f491_4f6c_dd1du64;
    for _ in 0..5000 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let key = state % 4096;

        let accepted = tree.put(key, state).is_ok();
        assert_eq!(accepted, !reference.contains_key(&key));
        reference.entry(key).or_insert(state);
    }

    assert_eq!(tree.len(), reference.len());
    assert_eq!(tree.entries(), reference.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>());
    assert_eq!(
        tree.range(&1000, &2000),
        reference.range(1000..2000).map(|(k, v)| (*k, *v)).collect::<Vec<_>>()
    );
    tree.check_invariants().unwrap();
}

#[test]
fn test_range_views_are_snapshots() {
    let mut tree: BPTree<i32, i32> = (0..100).map(|i| (i * 10, i)).collect();
    let head = tree.head_range(&50);
    let tail = tree.tail_map(&950);

    tree.put(5, -1).unwrap();
    tree.put(955, -1).unwrap();

    assert_eq!(head, vec![(0, 0), (10, 1), (20, 2), (30, 3), (40, 4)]);
    assert_eq!(tail.entries(), vec![(950, 95), (960, 96), (970, 97), (980, 98), (990, 99)]);
    assert_eq!(tree.range(&0, &11), vec![(0, 0), (5, -1), (10, 1)]);
}

#[test]
fn test_lookup_cost_is_logarithmic() {
    let tree: BPTree<u32, u32> = (0..10_000).map(|i| (i, i)).collect();
    tree.reset_nodes_visited();

    for i in 0..10_000 {
        assert_eq!(tree.get(&i), Some(i));
    }
    let average = tree.nodes_visited() as f64 / 10_000.0;
    assert_eq!(average, tree.height() as f64);
    assert!(tree.height() <= 14);
}

#[test]
fn test_wide_order() {
    let tree: BPTree<i64, i64, 64> = (-500..500).rev().map(|i| (i, i * 3)).collect();
    assert_eq!(tree.len(), 1000);
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.first_key(), Ok(-500));
    assert_eq!(tree.last_key(), Ok(499));
    tree.check_invariants().unwrap();
}
