// crates/uanodeset-rs/tests/traversal.rs

mod common;

use common::*;
use std::collections::HashSet;
use uanodeset_rs::ids;
use uanodeset_rs::types::QualifiedName;
use uanodeset_rs::{AddressSpace, MemoryAddressSpace, MemoryNode, NoProgress, NodeId, traverse};

/// Objects → A → B → A
fn cyclic() -> (MemoryAddressSpace, NodeId, NodeId) {
    let mut space = MemoryAddressSpace::new();
    let ns = space.add_namespace("urn:cycle");
    let a = space.add_child(
        &standard(ids::OBJECTS_FOLDER),
        ids::ORGANIZES,
        MemoryNode::object(NodeId::string(ns, "A"), QualifiedName::new(ns, "A")),
    );
    let b = space.add_child(
        &a,
        ids::HAS_COMPONENT,
        MemoryNode::object(NodeId::string(ns, "B"), QualifiedName::new(ns, "B")),
    );
    space.add_reference(&b, &standard(ids::HAS_COMPONENT), &a);
    (space, a, b)
}

#[test]
fn test_cycle_terminates_with_each_node_once() {
    let (space, a, b) = cyclic();
    let traversal = traverse(&space, &space.root_node(), &mut NoProgress);

    let unique: HashSet<&NodeId> = traversal.nodes.iter().collect();
    assert_eq!(unique.len(), traversal.nodes.len());
    assert_eq!(traversal.nodes.iter().filter(|n| **n == a).count(), 1);
    assert_eq!(traversal.nodes.iter().filter(|n| **n == b).count(), 1);
    assert!(traversal.browse_failures.is_empty());
}

#[test]
fn test_traversal_from_inside_cycle() {
    let (space, a, b) = cyclic();
    let traversal = traverse(&space, &a, &mut NoProgress);
    assert_eq!(traversal.nodes, vec![a, b]);
}

#[test]
fn test_pre_order_depth_first() {
    let space = plant();
    let traversal = traverse(&space, &space.root_node(), &mut NoProgress);
    let position = |id: &NodeId| traversal.nodes.iter().position(|n| n == id).unwrap();

    assert_eq!(traversal.nodes[0], standard(ids::ROOT_FOLDER));
    assert_eq!(traversal.nodes[1], standard(ids::OBJECTS_FOLDER));
    // The whole Channel1 subtree precedes the Types folder.
    assert!(position(&channel()) < position(&device()));
    assert!(position(&device()) < position(&counter()));
    assert!(position(&setpoint()) < position(&standard(ids::TYPES_FOLDER)));
    // Children keep their browse order.
    assert!(position(&counter()) < position(&levels()));
    assert!(position(&server()) < position(&channel()));
}

#[test]
fn test_non_hierarchical_targets_not_followed() {
    let space = plant();
    let traversal = traverse(&space, &space.root_node(), &mut NoProgress);
    assert!(!traversal.nodes.contains(&channel_type()));
    assert!(!traversal.nodes.contains(&standard(ids::FOLDER_TYPE)));
}

#[test]
fn test_browse_failure_drops_only_the_subtree() {
    let space = FaultyAddressSpace::new(plant()).fail(device(), Fault::Children);
    let traversal = traverse(&space, &space.root_node(), &mut NoProgress);

    assert!(traversal.nodes.contains(&device()));
    assert!(!traversal.nodes.contains(&counter()));
    assert!(traversal.nodes.contains(&server()));
    assert!(traversal.nodes.contains(&setpoint_type()));
    assert_eq!(traversal.browse_failures.len(), 1);
    assert_eq!(traversal.browse_failures[0].0, device());
}

#[test]
fn test_failing_root_yields_only_root() {
    let space = FaultyAddressSpace::new(plant()).fail(standard(ids::ROOT_FOLDER), Fault::Children);
    let traversal = traverse(&space, &space.root_node(), &mut NoProgress);
    assert_eq!(traversal.nodes, vec![standard(ids::ROOT_FOLDER)]);
}

#[test]
fn test_progress_counts_every_node() {
    let space = plant();
    let mut last = 0usize;
    let traversal = traverse(&space, &space.root_node(), &mut |count: usize| last = count);
    assert_eq!(last, traversal.nodes.len());
}
