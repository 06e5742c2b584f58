// crates/uanodeset-rs/src/namespace.rs

//! Namespace bookkeeping for an export run.
//!
//! `NamespaceRegistry` holds the server's index → URI table. From the nodes
//! selected for export it derives the set of indices the document refers to
//! and a `NamespaceMap` that renumbers those indices densely (1, 2, ...) as
//! the NodeSet2 format expects.

use crate::error::{ReadError, SerializeError};
use crate::log::{NodeContext, node_debug};
use crate::session::AddressSpace;
use crate::types::{DataTypeDefinition, NodeClass, NodeId, QualifiedName};
use std::collections::{BTreeMap, BTreeSet};

/// The server's namespace table, loaded once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceRegistry {
    uris: BTreeMap<u16, String>,
}

impl NamespaceRegistry {
    /// Builds the index → URI map from the server's namespace array.
    pub fn load(namespace_array: Vec<String>) -> Self {
        let uris = namespace_array
            .into_iter()
            .enumerate()
            .filter_map(|(i, uri)| u16::try_from(i).ok().map(|i| (i, uri)))
            .collect();
        Self { uris }
    }

    /// Reads the namespace array from the session and loads it.
    pub fn from_session<S: AddressSpace>(space: &S) -> Result<Self, ReadError> {
        Ok(Self::load(space.namespace_array()?))
    }

    pub fn uri(&self, index: u16) -> Option<&str> {
        self.uris.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }

    /// Builds the document remapping for a set of referenced server indices.
    ///
    /// Indices unknown to the server are dropped and keep their server index
    /// when rendered. They are never below the server table's length, so they
    /// cannot collide with a document index.
    pub fn document_map(&self, referenced: &BTreeSet<u16>) -> NamespaceMap {
        let mut to_document = BTreeMap::new();
        let mut unknown = BTreeSet::new();
        let mut uris = Vec::new();
        for &index in referenced {
            if index == 0 {
                continue;
            }
            match self.uri(index) {
                Some(uri) => {
                    uris.push(uri.to_string());
                    // Position 0 of the document table is the implicit standard namespace.
                    let document_index = u16::try_from(uris.len()).unwrap_or(u16::MAX);
                    to_document.insert(index, document_index);
                }
                None => {
                    log::warn!(
                        "Namespace index {} is referenced but not in the server's namespace array",
                        index
                    );
                    unknown.insert(index);
                }
            }
        }
        NamespaceMap {
            to_document,
            unknown,
            uris,
        }
    }
}

/// Collects every namespace index a node subset refers to, except 0.
///
/// For each node: its own index, its browse name's index, the type and target
/// of every reference, the `DataType` of Variables and VariableTypes and the
/// field types of a DataType's definition. With `values`, the ids inside
/// Variable values count too; VariableType values always do. Read failures
/// only drop the failing part.
pub fn referenced_indices<S: AddressSpace>(
    space: &S,
    nodes: &[NodeId],
    values: bool,
) -> BTreeSet<u16> {
    let mut indices = BTreeSet::new();
    for node in nodes {
        indices.insert(node.namespace);

        let ctx = NodeContext::new("namespaces", node);
        match space.read_browse_name(node) {
            Ok(name) => {
                indices.insert(name.namespace);
            }
            Err(e) => node_debug!(ctx, "Browse name unavailable: {}", e),
        }
        match space.references(node) {
            Ok(refs) => {
                for reference in refs {
                    indices.insert(reference.reference_type.namespace);
                    indices.insert(reference.target.namespace);
                }
            }
            Err(e) => node_debug!(ctx, "References unavailable: {}", e),
        }
        match space.read_node_class(node) {
            Ok(class @ (NodeClass::Variable | NodeClass::VariableType)) => {
                match space.read_data_type(node) {
                    Ok(data_type) => {
                        indices.insert(data_type.namespace);
                    }
                    Err(e) => node_debug!(ctx, "DataType unavailable: {}", e),
                }
                if values || class == NodeClass::VariableType {
                    match space.read_value(node) {
                        Ok(value) => value.collect_namespaces(&mut indices),
                        Err(e) => node_debug!(ctx, "Value unavailable: {}", e),
                    }
                }
            }
            Ok(NodeClass::DataType) => match space.read_data_type_definition(node) {
                Ok(Some(DataTypeDefinition::Structure { fields })) => {
                    indices.extend(fields.iter().map(|f| f.data_type.namespace));
                }
                Ok(_) => {}
                Err(e) => node_debug!(ctx, "Definition unavailable: {}", e),
            },
            Ok(_) => {}
            Err(e) => node_debug!(ctx, "Node class unavailable: {}", e),
        }
    }
    indices.remove(&0);
    indices
}

/// Server index → document index remapping plus the URIs to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    to_document: BTreeMap<u16, u16>,
    unknown: BTreeSet<u16>,
    uris: Vec<String>,
}

impl NamespaceMap {
    /// URIs of the `NamespaceUris` section, in document index order (from 1).
    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    /// Document index of a server index.
    ///
    /// A server namespace that was not collected for the document has no
    /// document index. Rendering it would alias another namespace's URI.
    pub fn document_index(&self, server_index: u16) -> Result<u16, SerializeError> {
        if server_index == 0 || self.unknown.contains(&server_index) {
            return Ok(server_index);
        }
        self.to_document
            .get(&server_index)
            .copied()
            .ok_or(SerializeError::UndeclaredNamespace(server_index))
    }

    /// Renders a NodeId with its namespace rewritten to the document index.
    pub fn node_id(&self, id: &NodeId) -> Result<String, SerializeError> {
        Ok(id.with_namespace(self.document_index(id.namespace)?).to_string())
    }

    pub fn browse_name(&self, name: &QualifiedName) -> Result<String, SerializeError> {
        let index = self.document_index(name.namespace)?;
        Ok(QualifiedName::new(index, name.name.clone()).to_string())
    }
}
