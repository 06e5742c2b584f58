// crates/uanodeset-rs/src/walker.rs

//! Cycle-safe depth-first traversal of the address space.

use crate::error::ReadError;
use crate::ids;
use crate::log::{NodeContext, node_info, node_trace, node_warn};
use crate::session::AddressSpace;
use crate::types::NodeId;
use std::collections::HashSet;

/// Receives a monotonically increasing count while a pass makes progress.
pub trait ProgressSink {
    fn update(&mut self, count: usize);
}

impl<F: FnMut(usize)> ProgressSink for F {
    fn update(&mut self, count: usize) {
        self(count)
    }
}

/// A sink that discards progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&mut self, _count: usize) {}
}

/// The outcome of a traversal.
#[derive(Debug, Default)]
pub struct Traversal {
    /// Every reachable node exactly once, in pre-order.
    pub nodes: Vec<NodeId>,
    /// Nodes whose children could not be enumerated; their subtrees are missing.
    pub browse_failures: Vec<(NodeId, ReadError)>,
}

/// Walks the hierarchy below `root` depth-first, pre-order.
///
/// Children are the targets of forward `HierarchicalReferences` (subtypes
/// included). A node is recorded the first time it is reached and never
/// expanded again, so reference cycles terminate. The explicit stack keeps the
/// traversal depth independent of the native call stack.
pub fn traverse<S: AddressSpace>(
    space: &S,
    root: &NodeId,
    progress: &mut dyn ProgressSink,
) -> Traversal {
    let mask = NodeId::numeric(0, ids::HIERARCHICAL_REFERENCES);
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut traversal = Traversal::default();
    let mut stack = vec![root.clone()];
    node_info!(NodeContext::new("browse", root), "Collecting hierarchy");

    while let Some(node) = stack.pop() {
        if !visited.insert(node.clone()) {
            continue;
        }
        traversal.nodes.push(node.clone());
        progress.update(traversal.nodes.len());

        let ctx = NodeContext::new("browse", &node);
        node_trace!(ctx, "Added to visitation order");

        match space.children(&node, &mask) {
            Ok(children) => {
                // Reverse so the first child is expanded first.
                stack.extend(
                    children
                        .into_iter()
                        .rev()
                        .filter(|child| !visited.contains(child)),
                );
            }
            Err(e) => {
                node_warn!(ctx, "Children could not be enumerated, subtree skipped: {}", e);
                traversal.browse_failures.push((node, e));
            }
        }
    }

    node_info!(
        NodeContext::new("browse", root),
        "Collected {} nodes ({} browse failures)",
        traversal.nodes.len(),
        traversal.browse_failures.len()
    );
    traversal
}
