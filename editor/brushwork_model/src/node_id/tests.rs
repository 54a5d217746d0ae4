use super::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

#[test]
fn test_node_id_roundtrips_raw_value() {
    let id = NodeId::new(7);
    assert_eq!(id.raw(), 7);
    assert!(id.is_valid());
}

#[test]
fn test_default_is_invalid() {
    assert_eq!(NodeId::default(), NodeId::INVALID);
    assert!(!NodeId::INVALID.is_valid());
}

#[test]
fn test_node_id_formatting() {
    assert_eq!(format!("{:?}", NodeId::new(3)), "NodeId(3)");
    assert_eq!(format!("{:?}", NodeId::INVALID), "NodeId::INVALID");
    assert_eq!(NodeId::new(3).to_string(), "#3");
}

#[test]
fn test_node_id_ordering_follows_raw_value() {
    let mut ids = vec![NodeId::new(9), NodeId::new(1), NodeId::new(4)];
    ids.sort();
    assert_eq!(ids, vec![NodeId::new(1), NodeId::new(4), NodeId::new(9)]);
}

#[test]
fn test_node_id_hash() {
    let mut set = HashSet::new();
    set.insert(NodeId::new(1));
    set.insert(NodeId::new(1));
    set.insert(NodeId::new(2));
    assert_eq!(set.len(), 2);
}
