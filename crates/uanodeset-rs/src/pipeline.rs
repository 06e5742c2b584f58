// crates/uanodeset-rs/src/pipeline.rs

//! The export run: select, serialize, write, patch.

use crate::config::{ExportOptions, UriPatch};
use crate::error::{ExportError, SerializeError};
use crate::log::{NodeContext, node_warn};
use crate::model::{Model, NodeSet};
use crate::namespace::{NamespaceRegistry, referenced_indices};
use crate::serializer::{ExportState, serialize_node};
use crate::session::AddressSpace;
use crate::types::NodeId;
use crate::walker::ProgressSink;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// A node left out of the document and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedNode {
    pub node: NodeId,
    pub reason: SerializeError,
}

/// Outcome of an export run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    /// Nodes that passed the namespace filter.
    pub selected: usize,
    /// Nodes written to the document.
    pub exported: usize,
    pub skipped: Vec<SkippedNode>,
    /// Entries of the `<Aliases>` section.
    pub aliases: usize,
    /// URIs of the `<NamespaceUris>` section.
    pub namespace_uris: Vec<String>,
    /// Whether the URI patch found its placeholder.
    pub patched: bool,
}

pub struct ExportPipeline<'a, S: AddressSpace> {
    space: &'a S,
    registry: &'a NamespaceRegistry,
    options: ExportOptions,
}

impl<'a, S: AddressSpace> ExportPipeline<'a, S> {
    pub fn new(space: &'a S, registry: &'a NamespaceRegistry, options: ExportOptions) -> Self {
        Self {
            space,
            registry,
            options,
        }
    }

    /// Keeps the nodes whose own namespace passes the filter, in input order.
    pub fn select(&self, nodes: &[NodeId]) -> Vec<NodeId> {
        nodes
            .iter()
            .filter(|n| self.options.selects(n.namespace))
            .cloned()
            .collect()
    }

    /// Builds the document for `nodes` (already traversed, unfiltered).
    ///
    /// Failing nodes are skipped and listed in the report; the document is
    /// always produced.
    pub fn build_document(
        &self,
        nodes: &[NodeId],
        progress: &mut dyn ProgressSink,
    ) -> (NodeSet, ExportReport) {
        // 1. Namespace filter
        let selected = self.select(nodes);
        match &self.options.namespace_filter {
            Some(filter) => info!("Export only NS {:?}", filter),
            None => info!("Export all namespaces"),
        }
        info!("Export node values: {}", self.options.export_values);

        // 2. Namespace table of the selection
        let referenced = referenced_indices(self.space, &selected, self.options.export_values);
        let mut state = ExportState::new(self.registry.document_map(&referenced));

        // 3. Nodes, in traversal order
        let mut report = ExportReport {
            selected: selected.len(),
            ..ExportReport::default()
        };
        let mut elements = Vec::with_capacity(selected.len());
        for (done, node) in selected.iter().enumerate() {
            let ctx = NodeContext::new("export", node);
            match serialize_node(self.space, node, &mut state, &self.options) {
                Ok(element) => elements.push(element),
                Err(reason) => {
                    node_warn!(ctx, "Node skipped: {}", reason);
                    report.skipped.push(SkippedNode {
                        node: node.clone(),
                        reason,
                    });
                }
            }
            progress.update(done + 1);
        }
        report.exported = elements.len();
        debug!("Resolved {} structured types", state.types.len());

        // 4. Header sections and aliases
        let nodeset = NodeSet {
            namespace_uris: state.namespaces.uris().to_vec(),
            models: vec![Model {
                model_uri: self.options.model_uri.clone(),
                required_models: vec![self.options.required_model.clone()],
            }],
            nodes: elements,
            aliases: state.aliases.to_elements(),
        };
        report.aliases = nodeset.aliases.len();
        report.namespace_uris = nodeset.namespace_uris.clone();

        (nodeset, report)
    }

    /// Exports `nodes` to `output` and applies the configured URI patch.
    ///
    /// # Errors
    /// Only document-level failures (XML writing, file I/O) are returned.
    /// Per-node failures end up in `ExportReport::skipped`.
    pub fn run(
        &self,
        nodes: &[NodeId],
        output: &Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<ExportReport, ExportError> {
        let (nodeset, mut report) = self.build_document(nodes, progress);
        info!("Export nodes to {}", output.display());
        let text = crate::writer::write_nodeset(&nodeset)?;
        fs::write(output, text)?;

        if let Some(patch) = &self.options.uri_patch {
            report.patched = patch_file(output, patch)?;
        }
        info!("Export finished");
        Ok(report)
    }
}

/// Replaces every occurrence of the patch placeholder in `text`.
pub fn apply_uri_patch(text: &str, patch: &UriPatch) -> String {
    text.replace(&patch.placeholder(), &patch.replacement())
}

/// Rewrites the file at `path` in place. Returns whether anything changed.
pub fn patch_file(path: &Path, patch: &UriPatch) -> Result<bool, ExportError> {
    let text = fs::read_to_string(path)?;
    let patched = apply_uri_patch(&text, patch);
    if patched == text {
        debug!("URI patch placeholder {} not present", patch.placeholder());
        return Ok(false);
    }
    fs::write(path, patched)?;
    info!("Namespace URI {} rewritten to {}", patch.from, patch.to);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_replaces_every_occurrence() {
        let patch = UriPatch::default();
        let text = "<Uri>KEPServerEX</Uri><Uri>KEPServerEX</Uri><Uri>KEPServerEXtra</Uri>";
        assert_eq!(
            apply_uri_patch(text, &patch),
            "<Uri>KEPServerEnterprise</Uri><Uri>KEPServerEnterprise</Uri><Uri>KEPServerEXtra</Uri>"
        );
    }

    #[test]
    fn test_patch_without_placeholder_is_identity() {
        let patch = UriPatch::default();
        let text = "<Uri>urn:other</Uri>";
        assert_eq!(apply_uri_patch(text, &patch), text);
    }
}
