use prefstore_core::{Error, NodeId, Partition, PreferenceStore, PreferenceTree};

fn sample_pairs() -> Vec<(String, String)> {
    let mut pairs = vec![
        (String::new(), String::new()),
        ("key".to_string(), "value".to_string()),
        ("with space".to_string(), "multi\nline".to_string()),
        ("ünïcødé".to_string(), "名前".to_string()),
        ("a/b".to_string(), "slashes are fine in keys".to_string()),
    ];
    for i in 0..50 {
        pairs.push((format!("k{}", i), "x".repeat(i)));
    }
    pairs
}

#[test]
fn get_returns_what_put_stored() {
    let mut tree = PreferenceTree::new(Partition::User);
    let node = tree.node(tree.root(), "a/b").unwrap();
    for (key, value) in sample_pairs() {
        tree.put(node, &key, &value);
        assert_eq!(tree.get(node, &key), Some(value.as_str()));
    }
}

#[test]
fn remove_then_get_is_absent() {
    let mut tree = PreferenceTree::new(Partition::User);
    let root = tree.root();
    for (i, (key, value)) in sample_pairs().into_iter().enumerate() {
        if i % 2 == 0 {
            tree.put(root, &key, &value);
        }
        tree.remove(root, &key);
        assert_eq!(tree.get(root, &key), None);
    }
    assert!(tree.list_keys(root).is_empty());
}

#[test]
fn list_keys_matches_distinct_puts() {
    let mut tree = PreferenceTree::new(Partition::System);
    let root = tree.root();
    let pairs = sample_pairs();
    for (key, value) in &pairs {
        tree.put(root, key, value);
    }
    let mut keys = tree.list_keys(root);
    keys.sort();
    let mut expected: Vec<String> = pairs.into_iter().map(|(k, _)| k).collect();
    expected.sort();
    assert_eq!(keys, expected);
}

#[test]
fn repeated_child_lookup_returns_same_node() {
    let mut tree = PreferenceTree::new(Partition::User);
    let root = tree.root();
    let names = ["a", "b", "c", "a", "b", "a"];
    let ids: Vec<NodeId> = names
        .iter()
        .map(|name| tree.get_or_create_child(root, name).unwrap())
        .collect();
    assert_eq!(ids[0], ids[3]);
    assert_eq!(ids[0], ids[5]);
    assert_eq!(ids[1], ids[4]);
    assert_eq!(tree.node_count(), 4);
}

#[test]
fn every_descendant_shares_root_partition() {
    for partition in [Partition::User, Partition::System] {
        let mut tree = PreferenceTree::new(partition);
        let mut current = tree.root();
        for depth in 0..64 {
            current = tree
                .get_or_create_child(current, &format!("level{}", depth))
                .unwrap();
            assert_eq!(tree.is_user_node(current), partition.is_user());
        }
        assert_eq!(tree.node_count(), 65);
    }
}

#[test]
fn separator_in_child_name_is_invalid() {
    let mut tree = PreferenceTree::new(Partition::User);
    let root = tree.root();
    for bad in ["a/b", "/", "a/", "/a"] {
        let err = tree.get_or_create_child(root, bad).unwrap_err();
        assert!(matches!(err, Error::InvalidName { .. }), "{}", bad);
    }
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn generic_callers_work_through_mut_ref() {
    fn seed<S: PreferenceStore>(mut store: S) {
        let root = store.root();
        let child = store.get_or_create_child(root, "seeded").unwrap();
        store.put(child, "k", "v");
    }

    let mut tree = PreferenceTree::new(Partition::User);
    seed(&mut tree);
    let child = tree.child(tree.root(), "seeded").unwrap();
    assert_eq!(tree.get(child, "k"), Some("v"));
}
