use treemap_core::BPTree;

fn main() {
    println!("B+ Tree Demo\n");

    let mut tree = BPTree::<_, _, 4>::new();
    println!("Created B+ tree with ORDER=4");
    println!("Empty: {}, Len: {}\n", tree.is_empty(), tree.len());

    println!("Inserting elements...");
    for i in [5, 2, 8, 1, 9, 3, 7, 4, 6] {
        tree.put(i, format!("value_{}", i)).unwrap();
        println!("  Inserted {} => value_{}", i, i);
    }
    println!("Length: {}, Height: {}\n", tree.len(), tree.height());
    println!("{}\n", tree);

    println!("Get operations:");
    for i in [1, 5, 9, 10] {
        match tree.get(&i) {
            Some(v) => println!("  get({}) = {}", i, v),
            None => println!("  get({}) = None", i),
        }
    }

    println!("\nDuplicate insert:");
    if let Err(e) = tree.put(5, "UPDATED".to_string()) {
        println!("  put(5) rejected: {}", e);
    }
    println!("  get(5) = {:?}", tree.get(&5));
    println!("  Length: {}\n", tree.len());

    println!("Range query [3, 8):");
    println!("  Result: {:?}", tree.range(&3, &8));
    println!("Head [.., 3): {:?}", tree.head_range(&3));
    println!("Tail [7, ..): {:?}", tree.tail_range(&7));

    println!("\nFirst key: {:?}, last key: {:?}", tree.first_key(), tree.last_key());
    println!("Nodes visited by lookups: {}", tree.nodes_visited());
}
