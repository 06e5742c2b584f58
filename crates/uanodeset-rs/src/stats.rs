// crates/uanodeset-rs/src/stats.rs

//! Per-namespace, per-class node counts of a traversal result.
//!
//! Reading node classes is one round trip per node, so the tally is spread
//! over rayon's worker pool. Each worker folds into its own `Statistics` and
//! the partial results are merged at the end.

use crate::error::ReadError;
use crate::log::{NodeContext, node_warn};
use crate::namespace::NamespaceRegistry;
use crate::session::AddressSpace;
use crate::types::{NodeClass, NodeId};
use log::info;
use rayon::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub per_namespace: BTreeMap<u16, BTreeMap<NodeClass, usize>>,
    /// Nodes whose class was read successfully.
    pub total: usize,
    /// Nodes whose class could not be read, sorted by NodeId.
    pub failures: Vec<(NodeId, ReadError)>,
}

impl Statistics {
    fn record(&mut self, namespace: u16, class: NodeClass) {
        *self
            .per_namespace
            .entry(namespace)
            .or_default()
            .entry(class)
            .or_default() += 1;
        self.total += 1;
    }

    fn merge(mut self, other: Statistics) -> Statistics {
        for (namespace, classes) in other.per_namespace {
            let entry = self.per_namespace.entry(namespace).or_default();
            for (class, count) in classes {
                *entry.entry(class).or_default() += count;
            }
        }
        self.total += other.total;
        self.failures.extend(other.failures);
        self
    }

    pub fn count(&self, namespace: u16, class: NodeClass) -> usize {
        self.per_namespace
            .get(&namespace)
            .and_then(|classes| classes.get(&class))
            .copied()
            .unwrap_or(0)
    }

    pub fn namespace_total(&self, namespace: u16) -> usize {
        self.per_namespace
            .get(&namespace)
            .map(|classes| classes.values().sum())
            .unwrap_or(0)
    }

    /// Logs one line per namespace and class, then the total.
    pub fn log_summary(&self, registry: &NamespaceRegistry) {
        for (namespace, classes) in &self.per_namespace {
            let uri = registry.uri(*namespace).unwrap_or("<unknown>");
            for (class, count) in classes {
                info!("NS{} ({}) {}: {}", namespace, uri, class, count);
            }
        }
        info!(
            "{} nodes counted, {} without readable node class",
            self.total,
            self.failures.len()
        );
    }
}

/// Counts `nodes` by namespace and node class.
///
/// Failing reads are collected, not fatal. The result does not depend on how
/// the work was split across threads.
pub fn tally<S: AddressSpace + Sync>(space: &S, nodes: &[NodeId]) -> Statistics {
    let mut stats = nodes
        .par_iter()
        .fold(Statistics::default, |mut acc, node| {
            match space.read_node_class(node) {
                Ok(class) => acc.record(node.namespace, class),
                Err(e) => {
                    node_warn!(NodeContext::new("stats", node), "Node class unavailable: {}", e);
                    acc.failures.push((node.clone(), e));
                }
            }
            acc
        })
        .reduce(Statistics::default, Statistics::merge);

    stats.failures.sort_by(|a, b| a.0.cmp(&b.0));
    stats
}
