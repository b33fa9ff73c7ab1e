//! Integration tests for persistent collections
//!
//! Tests `OrderedMap` ordering, replacement, and structural sharing.

use webshape_foundation::{OrderedMap, TypeDecl};

#[test]
fn map_empty() {
    let map: OrderedMap<TypeDecl> = OrderedMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert!(map.get("AudioNode").is_none());
}

#[test]
fn map_keeps_authoring_order() {
    let map: OrderedMap<TypeDecl> = ["GainNode", "AudioNode", "EventTarget"]
        .into_iter()
        .map(|name| (name, TypeDecl::class(name)))
        .collect();

    let keys: Vec<_> = map.keys().collect();
    assert_eq!(keys, ["GainNode", "AudioNode", "EventTarget"]);
}

#[test]
fn map_replacement_keeps_position() {
    let mut map = OrderedMap::new();
    map.insert("AudioNode", TypeDecl::class("AudioNode"));
    map.insert("GainNode", TypeDecl::class("GainNode"));

    let previous = map.insert("AudioNode", TypeDecl::interface("AudioNode"));
    assert!(previous.is_some());

    let first = map.values().next().unwrap();
    assert_eq!(first.name, "AudioNode");
    assert_eq!(map.len(), 2);
}

#[test]
fn map_with_leaves_original_unchanged() {
    let base = OrderedMap::new().with("AudioNode", 1);
    let extended = base.with("GainNode", 2);

    assert_eq!(base.len(), 1);
    assert_eq!(extended.len(), 2);
    assert!(!base.contains_key("GainNode"));
}

#[test]
fn map_remove_drops_order_entry() {
    let mut map: OrderedMap<i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    assert_eq!(map.remove("b"), Some(2));
    assert_eq!(map.remove("b"), None);

    let pairs: Vec<_> = map.iter().collect();
    assert_eq!(pairs, [("a", &1), ("c", &3)]);
}

#[test]
fn map_structural_sharing() {
    let mut map = OrderedMap::new();
    for i in 0..1000 {
        map.insert(format!("Node{i}"), i);
    }

    let mut copy = map.clone();
    *copy.get_mut("Node500").unwrap() = -1;

    assert_eq!(map.get("Node500"), Some(&500));
    assert_eq!(copy.get("Node500"), Some(&-1));
    assert_ne!(map, copy);
}
