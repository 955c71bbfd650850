use oarray::{ContainerError, OrderedMap};

#[test]
fn test_empty_map() {
    let map: OrderedMap<u32, String> = OrderedMap::new();

    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.capacity(), 10);
    assert_eq!(map.get(&1), None);
    assert_eq!(map.position_of(&1), None);
}

#[test]
fn test_insert_then_lookup() {
    let mut map = OrderedMap::new();

    assert_eq!(map.insert("name", "Alice"), None);
    assert_eq!(map.insert("age", "30"), None);

    assert_eq!(map.get("name"), Some(&"Alice"));
    assert_eq!(map.get("age"), Some(&"30"));
    assert_eq!(map.get("country"), None);
    assert!(map.contains_key("name"));
    assert_eq!(map.len(), 2);
}

#[test]
fn test_update_keeps_position() {
    let mut map = OrderedMap::new();
    map.insert(1, "a");
    map.insert(2, "b");

    assert_eq!(map.insert(1, "c"), Some("a"));

    let pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(pairs, vec![(1, "c"), (2, "b")]);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_update_never_reorders() {
    let mut map = OrderedMap::new();
    for key in ["x", "y", "z"] {
        map.insert(key, 0);
    }
    for round in 1..5 {
        map.insert("y", round);
        map.insert("x", round * 10);
    }

    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![40, 4, 0]);
}

#[test]
fn test_string_keys_borrowed_lookup() {
    let mut map: OrderedMap<String, u32> = OrderedMap::new();
    map.insert(String::from("alpha"), 1);
    map.insert(String::from("beta"), 2);

    assert_eq!(map.get("beta"), Some(&2));
    assert_eq!(map["alpha"], 1);
    assert_eq!(map.position_of("beta"), Some(1));
}

#[test]
fn test_remove_by_key() {
    let mut map = OrderedMap::from([(1, "one"), (2, "two"), (3, "three")]);

    assert_eq!(map.remove(&2), Some("two"));
    assert_eq!(map.get(&2), None);
    assert_eq!(map.remove(&2), None);
    assert_eq!(map.len(), 2);

    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 3]);
}

#[test]
fn test_remove_at_shifts_later_positions() {
    let mut map = OrderedMap::from([('a', 1), ('b', 2), ('c', 3), ('d', 4)]);

    assert_eq!(map.remove_at(1), ('b', 2));

    assert_eq!(map.position_of(&'a'), Some(0));
    assert_eq!(map.position_of(&'c'), Some(1));
    assert_eq!(map.position_of(&'d'), Some(2));
    assert_eq!(map.get_index(2), Some((&'d', &4)));
}

#[test]
fn test_remove_first_and_last() {
    let mut map = OrderedMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);

    assert_eq!(map.remove_first(), (1, 'a'));
    assert_eq!(map.remove_last(), (3, 'c'));
    assert_eq!(map.get(&2), Some(&'b'));
    assert_eq!(map.position_of(&2), Some(0));

    assert_eq!(map.pop_first(), Some((2, 'b')));
    assert_eq!(map.pop_first(), None);
    assert_eq!(map.pop_last(), None);
}

#[test]
fn test_reinsert_after_removal_goes_to_end() {
    let mut map = OrderedMap::from([(1, 10), (2, 20), (3, 30)]);
    map.remove(&1);
    map.insert(1, 11);

    let pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(pairs, vec![(2, 20), (3, 30), (1, 11)]);
}

#[test]
fn test_set_index_overwrites_pair_in_place() {
    let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);

    assert_eq!(map.set_index(1, "x", 20), Some(("b", 2)));

    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", "x", "c"]);
    assert_eq!(map.get("x"), Some(&20));
    assert_eq!(map.position_of("x"), Some(1));
    assert_eq!(map.get("b"), None);
    assert!(!map.contains_key("b"));
    assert_eq!(map.len(), 3);
}

#[test]
fn test_set_index_same_key_replaces_value() {
    let mut map = OrderedMap::from([(1, 'a'), (2, 'b')]);

    assert_eq!(map.set_index(0, 1, 'z'), Some((1, 'a')));
    assert_eq!(map.get(&1), Some(&'z'));
    assert_eq!(map.position_of(&1), Some(0));
}

#[test]
fn test_set_index_at_len_appends() {
    let mut map = OrderedMap::from([(1, 'a')]);

    assert_eq!(map.set_index(1, 2, 'b'), None);
    assert_eq!(map.get_index(1), Some((&2, &'b')));
    assert_eq!(map.position_of(&2), Some(1));
}

#[test]
fn test_set_index_after_front_removal() {
    let mut map = OrderedMap::from([(1, 10), (2, 20), (3, 30)]);
    map.remove_first();

    map.set_index(1, 7, 70);
    assert_eq!(map.position_of(&7), Some(1));
    assert_eq!(map.get(&3), None);

    map.remove(&2);
    assert_eq!(map.position_of(&7), Some(0));
    assert_eq!(map[&7], 70);
}

#[test]
fn test_try_set_index_rejects_bad_writes() {
    let mut map = OrderedMap::from([(1, 'a'), (2, 'b')]);

    assert_eq!(
        map.try_set_index(3, 9, 'z'),
        Err(ContainerError::IndexOutOfRange { index: 3, count: 2 })
    );
    assert_eq!(
        map.try_set_index(0, 2, 'z'),
        Err(ContainerError::DuplicateKey { position: 1 })
    );
    assert_eq!(
        map.try_set_index(2, 1, 'z'),
        Err(ContainerError::DuplicateKey { position: 0 })
    );

    let pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(pairs, vec![(1, 'a'), (2, 'b')]);
    assert_eq!(map.position_of(&2), Some(1));
}

#[test]
#[should_panic(expected = "Duplicate key: key is already present at position 0")]
fn test_set_index_duplicate_key_panics() {
    let mut map = OrderedMap::from([(1, 'a'), (2, 'b')]);
    map.set_index(1, 1, 'c');
}

#[test]
fn test_set_none_deletes() {
    let mut map = OrderedMap::new();

    assert_eq!(map.set("k", Some(1)), None);
    assert_eq!(map.set("k", Some(2)), Some(1));
    assert_eq!(map.set("k", None), Some(2));
    assert_eq!(map.set("k", None), None);
    assert!(map.is_empty());
}

#[test]
fn test_get_mut() {
    let mut map = OrderedMap::from([("hits", 0)]);

    for _ in 0..3 {
        if let Some(hits) = map.get_mut("hits") {
            *hits += 1;
        }
    }

    assert_eq!(map["hits"], 3);
    assert!(map.get_mut("misses").is_none());
}

#[test]
fn test_literal_with_repeated_key() {
    let map = OrderedMap::from([(1, "a"), (2, "b"), (1, "c")]);

    assert_eq!(map.len(), 2);
    assert_eq!(map.get_index(0), Some((&1, &"c")));
    assert_eq!(map.capacity(), 3);
}

#[test]
fn test_growth_keeps_sequences_aligned() {
    let mut map = OrderedMap::with_capacity(2);
    for i in 0..500 {
        map.insert(i, i * 2);
    }

    assert_eq!(map.len(), 500);
    for i in 0..500 {
        assert_eq!(map.get(&i), Some(&(i * 2)));
        assert_eq!(map.position_of(&i), Some(i as usize));
    }
}

#[test]
fn test_many_removals_keep_lookup_consistent() {
    let mut map: OrderedMap<u32, u32> = (0..100).map(|i| (i, i)).collect();

    for i in (0..100).filter(|i| i % 3 == 0) {
        assert_eq!(map.remove(&i), Some(i));
    }
    map.remove_first();
    map.remove_last();

    let expected: Vec<u32> = (0..100).filter(|i| i % 3 != 0).skip(1).collect();
    let expected = &expected[..expected.len() - 1];
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), expected);
    for (position, key) in expected.iter().enumerate() {
        assert_eq!(map.position_of(key), Some(position));
    }
}

#[test]
fn test_remove_all() {
    let mut map = OrderedMap::with_capacity(4);
    for i in 0..40 {
        map.insert(i, i);
    }

    map.remove_all(false);
    assert!(map.is_empty());
    assert_eq!(map.capacity(), 4);
    assert_eq!(map.get(&1), None);

    map.insert(7, 7);
    assert_eq!(map.position_of(&7), Some(0));
}

#[test]
fn test_remove_all_keeping_capacity() {
    let mut map = OrderedMap::with_capacity(4);
    for i in 0..40 {
        map.insert(i, i);
    }
    let capacity = map.capacity();

    map.remove_all(true);
    assert!(map.is_empty());
    assert_eq!(map.capacity(), capacity);
}

#[test]
fn test_reserve_capacity() {
    let mut map: OrderedMap<u8, u8> = OrderedMap::with_capacity(1);
    map.reserve_capacity(32);

    assert_eq!(map.capacity(), 32);
}

#[test]
fn test_equality_is_order_sensitive() {
    let ab = OrderedMap::from([(1, 'a'), (2, 'b')]);
    let ba = OrderedMap::from([(2, 'b'), (1, 'a')]);
    let mut rebuilt = OrderedMap::new();
    rebuilt.insert(1, 'a');
    rebuilt.insert(2, 'b');

    assert_eq!(ab, rebuilt);
    assert_ne!(ab, ba);
}

#[test]
fn test_clone_is_independent() {
    let original = OrderedMap::from([(1, 1), (2, 2)]);
    let mut copy = original.clone();

    copy.insert(3, 3);
    copy.remove(&1);

    assert_eq!(original.len(), 2);
    assert_eq!(original.get(&1), Some(&1));
    assert_eq!(copy.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn test_display_rendering() {
    let map = OrderedMap::from([(1, "a"), (2, "b")]);
    assert_eq!(map.to_string(), "[1: a, 2: b]");

    let empty: OrderedMap<u8, u8> = OrderedMap::new();
    assert_eq!(empty.to_string(), "[]");
}

#[test]
fn test_debug_rendering() {
    let map = OrderedMap::from([(1, "a")]);
    assert_eq!(format!("{map:?}"), "{1: \"a\"}");
}

#[test]
#[should_panic(expected = "Missing key: key is not present in the map")]
fn test_index_missing_key() {
    let map: OrderedMap<u8, u8> = OrderedMap::new();
    let _ = map[&1];
}
