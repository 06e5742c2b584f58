// crates/uanodeset-rs/src/memory.rs

//! An address space held entirely in memory.
//!
//! `MemoryAddressSpace` starts out with the skeleton of the standard namespace
//! (root folders plus the reference type and data type hierarchies) and is
//! extended either programmatically or from a JSON snapshot. It backs the
//! `file://` endpoints of the CLI and the test suites.

use crate::error::{ConnectionError, ReadError, SnapshotError};
use crate::ids;
use crate::session::{AddressSpace, Connector, Credentials};
use crate::types::{
    AttributeId, DataTypeDefinition, LocalizedText, NodeClass, NodeId, QualifiedName,
    ReferenceDescription,
};
use crate::value::Variant;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

pub const STANDARD_NAMESPACE_URI: &str = "http://opcfoundation.org/UA/";

/// One node with all its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryNode {
    pub node_id: NodeId,
    pub node_class: NodeClass,
    pub browse_name: QualifiedName,
    /// Defaults to the browse name's text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    /// Attributes overriding the node class defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<AttributeId, Variant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Variant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<DataTypeDefinition>,
}

impl MemoryNode {
    pub fn new(node_id: NodeId, node_class: NodeClass, browse_name: QualifiedName) -> Self {
        Self {
            node_id,
            node_class,
            browse_name,
            display_name: None,
            description: None,
            attributes: BTreeMap::new(),
            value: None,
            definition: None,
        }
    }

    pub fn object(node_id: NodeId, browse_name: QualifiedName) -> Self {
        Self::new(node_id, NodeClass::Object, browse_name)
    }

    /// A Variable of the given data type.
    pub fn variable(node_id: NodeId, browse_name: QualifiedName, data_type: NodeId) -> Self {
        Self::new(node_id, NodeClass::Variable, browse_name)
            .with_attribute(AttributeId::DataType, Variant::NodeId(data_type))
    }

    pub fn with_display_name(mut self, text: LocalizedText) -> Self {
        self.display_name = Some(text);
        self
    }

    pub fn with_description(mut self, text: LocalizedText) -> Self {
        self.description = Some(text);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeId, value: Variant) -> Self {
        self.attributes.insert(attribute, value);
        self
    }

    pub fn with_value(mut self, value: Variant) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_definition(mut self, definition: DataTypeDefinition) -> Self {
        self.definition = Some(definition);
        self
    }

    /// Value an attribute has when the node does not set it explicitly.
    fn default_attribute(&self, attribute: AttributeId) -> Option<Variant> {
        use AttributeId as A;
        use NodeClass as C;

        let value = match (self.node_class, attribute) {
            (C::Object | C::View, A::EventNotifier) => Variant::Byte(0),
            (C::View, A::ContainsNoLoops) => Variant::Boolean(false),
            (
                C::ObjectType | C::VariableType | C::ReferenceType | C::DataType,
                A::IsAbstract,
            ) => Variant::Boolean(false),
            (C::ReferenceType, A::Symmetric) => Variant::Boolean(false),
            (C::ReferenceType, A::InverseName) => Variant::Empty,
            (C::Variable | C::VariableType, A::DataType) => {
                Variant::NodeId(NodeId::numeric(0, ids::BASE_DATA_TYPE))
            }
            (C::Variable | C::VariableType, A::ValueRank) => Variant::Int32(-1),
            (C::Variable | C::VariableType, A::ArrayDimensions) => Variant::Empty,
            (C::Variable, A::AccessLevel | A::UserAccessLevel) => Variant::Byte(1),
            (C::Variable, A::MinimumSamplingInterval) => Variant::Double(0.0),
            (C::Variable, A::Historizing) => Variant::Boolean(false),
            (C::Method, A::Executable | A::UserExecutable) => Variant::Boolean(true),
            (C::Variable | C::VariableType, A::Value) => Variant::Empty,
            _ => return None,
        };
        Some(value)
    }
}

/// A forward reference between two snapshot nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotReference {
    pub source: NodeId,
    pub reference_type: NodeId,
    pub target: NodeId,
}

/// On-disk form of a `MemoryAddressSpace`.
///
/// `namespaces` lists the server namespace array from index 1; index 0 is
/// always the standard namespace. Nodes are added on top of the standard
/// skeleton and replace skeleton nodes with the same id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub namespaces: Vec<String>,
    #[serde(default)]
    pub nodes: Vec<MemoryNode>,
    #[serde(default)]
    pub references: Vec<SnapshotReference>,
}

#[derive(Debug, Clone)]
pub struct MemoryAddressSpace {
    namespaces: Vec<String>,
    nodes: HashMap<NodeId, MemoryNode>,
    /// Per node, references in insertion order (forward and inverse).
    references: HashMap<NodeId, Vec<ReferenceDescription>>,
}

impl Default for MemoryAddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard reference types as `(id, super type)`.
const STANDARD_REFERENCE_TYPES: &[(u32, Option<u32>)] = &[
    (ids::REFERENCES, None),
    (ids::HIERARCHICAL_REFERENCES, Some(ids::REFERENCES)),
    (ids::NON_HIERARCHICAL_REFERENCES, Some(ids::REFERENCES)),
    (ids::HAS_CHILD, Some(ids::HIERARCHICAL_REFERENCES)),
    (ids::ORGANIZES, Some(ids::HIERARCHICAL_REFERENCES)),
    (ids::HAS_EVENT_SOURCE, Some(ids::HIERARCHICAL_REFERENCES)),
    (ids::HAS_NOTIFIER, Some(ids::HAS_EVENT_SOURCE)),
    (ids::AGGREGATES, Some(ids::HAS_CHILD)),
    (ids::HAS_SUBTYPE, Some(ids::HAS_CHILD)),
    (ids::HAS_PROPERTY, Some(ids::AGGREGATES)),
    (ids::HAS_COMPONENT, Some(ids::AGGREGATES)),
    (ids::HAS_ORDERED_COMPONENT, Some(ids::HAS_COMPONENT)),
    (ids::HAS_TYPE_DEFINITION, Some(ids::NON_HIERARCHICAL_REFERENCES)),
    (ids::HAS_MODELLING_RULE, Some(ids::NON_HIERARCHICAL_REFERENCES)),
    (ids::HAS_ENCODING, Some(ids::NON_HIERARCHICAL_REFERENCES)),
    (ids::HAS_DESCRIPTION, Some(ids::NON_HIERARCHICAL_REFERENCES)),
    (ids::GENERATES_EVENT, Some(ids::NON_HIERARCHICAL_REFERENCES)),
];

const ABSTRACT_REFERENCE_TYPES: &[u32] = &[
    ids::REFERENCES,
    ids::HIERARCHICAL_REFERENCES,
    ids::NON_HIERARCHICAL_REFERENCES,
    ids::HAS_CHILD,
    ids::AGGREGATES,
];

/// Standard data types as `(id, super type)`.
const STANDARD_DATA_TYPES: &[(u32, Option<u32>)] = &[
    (ids::BASE_DATA_TYPE, None),
    (ids::BOOLEAN, Some(ids::BASE_DATA_TYPE)),
    (ids::NUMBER, Some(ids::BASE_DATA_TYPE)),
    (ids::INTEGER, Some(ids::NUMBER)),
    (ids::UINTEGER, Some(ids::NUMBER)),
    (ids::SBYTE, Some(ids::INTEGER)),
    (ids::INT16, Some(ids::INTEGER)),
    (ids::INT32, Some(ids::INTEGER)),
    (ids::INT64, Some(ids::INTEGER)),
    (ids::BYTE, Some(ids::UINTEGER)),
    (ids::UINT16, Some(ids::UINTEGER)),
    (ids::UINT32, Some(ids::UINTEGER)),
    (ids::UINT64, Some(ids::UINTEGER)),
    (ids::FLOAT, Some(ids::NUMBER)),
    (ids::DOUBLE, Some(ids::NUMBER)),
    (ids::DURATION, Some(ids::DOUBLE)),
    (ids::STRING, Some(ids::BASE_DATA_TYPE)),
    (ids::LOCALE_ID, Some(ids::STRING)),
    (ids::DATE_TIME, Some(ids::BASE_DATA_TYPE)),
    (ids::UTC_TIME, Some(ids::DATE_TIME)),
    (ids::GUID, Some(ids::BASE_DATA_TYPE)),
    (ids::BYTE_STRING, Some(ids::BASE_DATA_TYPE)),
    (ids::XML_ELEMENT, Some(ids::BASE_DATA_TYPE)),
    (ids::NODE_ID, Some(ids::BASE_DATA_TYPE)),
    (ids::EXPANDED_NODE_ID, Some(ids::BASE_DATA_TYPE)),
    (ids::STATUS_CODE, Some(ids::BASE_DATA_TYPE)),
    (ids::QUALIFIED_NAME, Some(ids::BASE_DATA_TYPE)),
    (ids::LOCALIZED_TEXT, Some(ids::BASE_DATA_TYPE)),
    (ids::STRUCTURE, Some(ids::BASE_DATA_TYPE)),
    (ids::DATA_VALUE, Some(ids::BASE_DATA_TYPE)),
    (ids::DIAGNOSTIC_INFO, Some(ids::BASE_DATA_TYPE)),
    (ids::ENUMERATION, Some(ids::BASE_DATA_TYPE)),
];

const ABSTRACT_DATA_TYPES: &[u32] = &[
    ids::BASE_DATA_TYPE,
    ids::NUMBER,
    ids::INTEGER,
    ids::UINTEGER,
    ids::STRUCTURE,
    ids::ENUMERATION,
];

fn standard(id: u32) -> NodeId {
    NodeId::numeric(0, id)
}

impl MemoryAddressSpace {
    /// Creates an address space containing the standard namespace skeleton.
    pub fn new() -> Self {
        let mut space = Self {
            namespaces: Vec::new(),
            nodes: HashMap::new(),
            references: HashMap::new(),
        };
        space.seed_standard_nodes();
        space
    }

    fn seed_standard_nodes(&mut self) {
        let folder_type = standard(ids::FOLDER_TYPE);
        let organizes = standard(ids::ORGANIZES);
        let has_subtype = standard(ids::HAS_SUBTYPE);

        self.add_node(MemoryNode::object(
            standard(ids::ROOT_FOLDER),
            QualifiedName::new(0, "Root"),
        ));
        self.add_node(MemoryNode::new(
            folder_type.clone(),
            NodeClass::ObjectType,
            QualifiedName::new(0, "FolderType"),
        ));
        let folders = [
            (ids::OBJECTS_FOLDER, "Objects", ids::ROOT_FOLDER),
            (ids::TYPES_FOLDER, "Types", ids::ROOT_FOLDER),
            (ids::VIEWS_FOLDER, "Views", ids::ROOT_FOLDER),
            (ids::REFERENCE_TYPES_FOLDER, "ReferenceTypes", ids::TYPES_FOLDER),
            (ids::DATA_TYPES_FOLDER, "DataTypes", ids::TYPES_FOLDER),
        ];
        for (id, name, parent) in folders {
            let node = standard(id);
            self.add_node(MemoryNode::object(node.clone(), QualifiedName::new(0, name)));
            self.add_reference(&standard(parent), &organizes, &node);
            self.add_reference(
                &node,
                &standard(ids::HAS_TYPE_DEFINITION),
                &folder_type,
            );
        }

        for &(id, super_type) in STANDARD_REFERENCE_TYPES {
            let name = ids::standard_name(id).unwrap_or_default();
            let mut node = MemoryNode::new(
                standard(id),
                NodeClass::ReferenceType,
                QualifiedName::new(0, name),
            );
            if ABSTRACT_REFERENCE_TYPES.contains(&id) {
                node = node.with_attribute(AttributeId::IsAbstract, Variant::Boolean(true));
            }
            if id == ids::REFERENCES {
                node = node.with_attribute(AttributeId::Symmetric, Variant::Boolean(true));
            }
            self.add_node(node);
            match super_type {
                Some(parent) => self.add_reference(&standard(parent), &has_subtype, &standard(id)),
                None => self.add_reference(
                    &standard(ids::REFERENCE_TYPES_FOLDER),
                    &organizes,
                    &standard(id),
                ),
            }
        }

        for &(id, super_type) in STANDARD_DATA_TYPES {
            let name = ids::standard_name(id).unwrap_or_default();
            let mut node =
                MemoryNode::new(standard(id), NodeClass::DataType, QualifiedName::new(0, name));
            if ABSTRACT_DATA_TYPES.contains(&id) {
                node = node.with_attribute(AttributeId::IsAbstract, Variant::Boolean(true));
            }
            self.add_node(node);
            match super_type {
                Some(parent) => self.add_reference(&standard(parent), &has_subtype, &standard(id)),
                None => self.add_reference(
                    &standard(ids::DATA_TYPES_FOLDER),
                    &organizes,
                    &standard(id),
                ),
            }
        }
    }

    /// Appends a namespace URI and returns its index.
    pub fn add_namespace(&mut self, uri: impl Into<String>) -> u16 {
        self.namespaces.push(uri.into());
        u16::try_from(self.namespaces.len()).unwrap_or(u16::MAX)
    }

    /// Inserts or replaces a node. Existing references are kept.
    pub fn add_node(&mut self, node: MemoryNode) -> NodeId {
        let id = node.node_id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Adds `source --reference_type--> target` and its inverse on `target`.
    pub fn add_reference(&mut self, source: &NodeId, reference_type: &NodeId, target: &NodeId) {
        self.references
            .entry(source.clone())
            .or_default()
            .push(ReferenceDescription {
                reference_type: reference_type.clone(),
                target: target.clone(),
                is_forward: true,
            });
        self.references
            .entry(target.clone())
            .or_default()
            .push(ReferenceDescription {
                reference_type: reference_type.clone(),
                target: source.clone(),
                is_forward: false,
            });
    }

    /// Adds a node below `parent` through `reference_type`.
    pub fn add_child(
        &mut self,
        parent: &NodeId,
        reference_type: u32,
        node: MemoryNode,
    ) -> NodeId {
        let id = self.add_node(node);
        self.add_reference(parent, &standard(reference_type), &id);
        id
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Builds an address space from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let mut space = Self::new();
        for uri in snapshot.namespaces {
            space.add_namespace(uri);
        }
        for node in snapshot.nodes {
            space.add_node(node);
        }
        for reference in &snapshot.references {
            if !space.contains(&reference.source) {
                return Err(SnapshotError::UnknownNode(reference.source.clone()));
            }
            space.add_reference(&reference.source, &reference.reference_type, &reference.target);
        }
        log::debug!(
            "Loaded snapshot with {} namespaces and {} nodes",
            space.namespaces.len(),
            space.nodes.len()
        );
        Ok(space)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    fn node(&self, id: &NodeId) -> Result<&MemoryNode, ReadError> {
        self.nodes
            .get(id)
            .ok_or_else(|| ReadError::NodeIdUnknown(id.clone()))
    }

    fn node_references(&self, id: &NodeId) -> &[ReferenceDescription] {
        self.references.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `reference_type` is `ancestor` or one of its subtypes.
    fn is_subtype_of(&self, reference_type: &NodeId, ancestor: &NodeId) -> bool {
        let has_subtype = standard(ids::HAS_SUBTYPE);
        let mut seen = HashSet::new();
        let mut current = reference_type.clone();
        loop {
            if &current == ancestor {
                return true;
            }
            if !seen.insert(current.clone()) {
                return false;
            }
            let parent = self
                .node_references(&current)
                .iter()
                .find(|r| !r.is_forward && r.reference_type == has_subtype)
                .map(|r| r.target.clone());
            match parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

impl AddressSpace for MemoryAddressSpace {
    fn namespace_array(&self) -> Result<Vec<String>, ReadError> {
        let mut array = vec![STANDARD_NAMESPACE_URI.to_string()];
        array.extend(self.namespaces.iter().cloned());
        Ok(array)
    }

    fn children(&self, node: &NodeId, reference_mask: &NodeId) -> Result<Vec<NodeId>, ReadError> {
        self.node(node)?;
        Ok(self
            .node_references(node)
            .iter()
            .filter(|r| r.is_forward && self.is_subtype_of(&r.reference_type, reference_mask))
            .map(|r| r.target.clone())
            .collect())
    }

    fn read_node_class(&self, node: &NodeId) -> Result<NodeClass, ReadError> {
        Ok(self.node(node)?.node_class)
    }

    fn read_browse_name(&self, node: &NodeId) -> Result<QualifiedName, ReadError> {
        Ok(self.node(node)?.browse_name.clone())
    }

    fn read_display_name(&self, node: &NodeId) -> Result<LocalizedText, ReadError> {
        let node = self.node(node)?;
        Ok(node
            .display_name
            .clone()
            .unwrap_or_else(|| LocalizedText::new(node.browse_name.name.clone())))
    }

    fn read_description(&self, node: &NodeId) -> Result<Option<LocalizedText>, ReadError> {
        Ok(self.node(node)?.description.clone())
    }

    fn parent(&self, node: &NodeId) -> Result<Option<NodeId>, ReadError> {
        self.node(node)?;
        let hierarchical = standard(ids::HIERARCHICAL_REFERENCES);
        Ok(self
            .node_references(node)
            .iter()
            .find(|r| !r.is_forward && self.is_subtype_of(&r.reference_type, &hierarchical))
            .map(|r| r.target.clone()))
    }

    fn references(&self, node: &NodeId) -> Result<Vec<ReferenceDescription>, ReadError> {
        self.node(node)?;
        Ok(self.node_references(node).to_vec())
    }

    fn read_attribute(&self, node: &NodeId, attribute: AttributeId) -> Result<Variant, ReadError> {
        let entry = self.node(node)?;
        if attribute == AttributeId::Value {
            return self.read_value(node);
        }
        entry
            .attributes
            .get(&attribute)
            .cloned()
            .or_else(|| entry.default_attribute(attribute))
            .ok_or_else(|| ReadError::attribute_invalid(node, attribute))
    }

    fn read_value(&self, node: &NodeId) -> Result<Variant, ReadError> {
        let entry = self.node(node)?;
        match entry.node_class {
            NodeClass::Variable | NodeClass::VariableType => {
                Ok(entry.value.clone().unwrap_or(Variant::Empty))
            }
            _ => Err(ReadError::attribute_invalid(node, AttributeId::Value)),
        }
    }

    fn read_data_type_definition(
        &self,
        node: &NodeId,
    ) -> Result<Option<DataTypeDefinition>, ReadError> {
        let entry = self.node(node)?;
        match entry.node_class {
            NodeClass::DataType => Ok(entry.definition.clone()),
            _ => Err(ReadError::attribute_invalid(
                node,
                AttributeId::DataTypeDefinition,
            )),
        }
    }
}

/// Opens `MemoryAddressSpace` sessions from snapshot files.
///
/// Accepts `file://<path>` URLs and bare paths ending in `.json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnapshotConnector;

impl SnapshotConnector {
    fn snapshot_path(url: &str) -> Option<&Path> {
        if let Some(path) = url.strip_prefix("file://") {
            return Some(Path::new(path));
        }
        url.ends_with(".json").then(|| Path::new(url))
    }
}

impl Connector for SnapshotConnector {
    type Session = MemoryAddressSpace;

    fn connect(
        &self,
        url: &str,
        credentials: &Credentials,
    ) -> Result<MemoryAddressSpace, ConnectionError> {
        let path = Self::snapshot_path(url)
            .ok_or_else(|| ConnectionError::UnsupportedScheme(url.to_string()))?;
        if !credentials.is_anonymous() {
            log::debug!(
                "Snapshot endpoints have no user management, ignoring user '{}'",
                credentials.username
            );
        }
        match MemoryAddressSpace::load(path) {
            Ok(space) => Ok(space),
            Err(SnapshotError::Io(e)) => Err(ConnectionError::Unreachable {
                url: url.to_string(),
                detail: e.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hierarchical() -> NodeId {
        standard(ids::HIERARCHICAL_REFERENCES)
    }

    #[test]
    fn test_standard_skeleton() {
        let space = MemoryAddressSpace::new();
        let root = space.root_node();
        let children = space.children(&root, &hierarchical()).unwrap();
        assert_eq!(
            children,
            vec![
                standard(ids::OBJECTS_FOLDER),
                standard(ids::TYPES_FOLDER),
                standard(ids::VIEWS_FOLDER)
            ]
        );
        assert_eq!(space.parent(&standard(ids::OBJECTS_FOLDER)).unwrap(), Some(root));
    }

    #[test]
    fn test_reference_subtypes_match_mask() {
        let space = MemoryAddressSpace::new();
        assert!(space.is_subtype_of(&standard(ids::HAS_PROPERTY), &hierarchical()));
        assert!(space.is_subtype_of(&standard(ids::HAS_SUBTYPE), &hierarchical()));
        assert!(!space.is_subtype_of(&standard(ids::HAS_TYPE_DEFINITION), &hierarchical()));
    }

    #[test]
    fn test_type_definition_is_not_a_child() {
        let space = MemoryAddressSpace::new();
        let objects = standard(ids::OBJECTS_FOLDER);
        assert!(space.children(&objects, &hierarchical()).unwrap().is_empty());
        assert_eq!(space.references(&objects).unwrap().len(), 2);
    }

    #[test]
    fn test_class_default_attributes() {
        let mut space = MemoryAddressSpace::new();
        let ns = space.add_namespace("urn:test");
        let var = space.add_child(
            &standard(ids::OBJECTS_FOLDER),
            ids::ORGANIZES,
            MemoryNode::variable(
                NodeId::string(ns, "Speed"),
                QualifiedName::new(ns, "Speed"),
                standard(ids::DOUBLE),
            ),
        );
        assert_eq!(
            space.read_attribute(&var, AttributeId::ValueRank).unwrap(),
            Variant::Int32(-1)
        );
        assert_eq!(space.read_data_type(&var).unwrap(), standard(ids::DOUBLE));
        assert_eq!(space.read_value(&var).unwrap(), Variant::Empty);
        assert!(matches!(
            space.read_attribute(&var, AttributeId::Executable),
            Err(ReadError::AttributeIdInvalid { .. })
        ));
    }

    #[test]
    fn test_super_type_walks_inverse_has_subtype() {
        let space = MemoryAddressSpace::new();
        assert_eq!(
            space.super_type(&standard(ids::DURATION)).unwrap(),
            Some(standard(ids::DOUBLE))
        );
        assert_eq!(space.super_type(&standard(ids::BASE_DATA_TYPE)).unwrap(), None);
    }

    #[test]
    fn test_snapshot_rejects_unknown_source() {
        let json = r#"{
            "namespaces": ["urn:test"],
            "references": [
                { "source": "ns=1;s=Missing", "reference_type": "i=35", "target": "i=85" }
            ]
        }"#;
        assert!(matches!(
            MemoryAddressSpace::from_json(json),
            Err(SnapshotError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_snapshot_nodes_and_namespaces() {
        let json = r#"{
            "namespaces": ["urn:a", "KEPServerEX"],
            "nodes": [
                {
                    "node_id": "ns=2;s=Channel1",
                    "node_class": "Object",
                    "browse_name": "2:Channel1"
                }
            ],
            "references": [
                { "source": "i=85", "reference_type": "i=35", "target": "ns=2;s=Channel1" }
            ]
        }"#;
        let space = MemoryAddressSpace::from_json(json).unwrap();
        assert_eq!(space.namespace_index("KEPServerEX").unwrap(), Some(2));
        let channel = NodeId::string(2, "Channel1");
        assert_eq!(
            space.read_display_name(&channel).unwrap().text,
            "Channel1"
        );
        assert_eq!(
            space.parent(&channel).unwrap(),
            Some(standard(ids::OBJECTS_FOLDER))
        );
    }

    #[test]
    fn test_connector_rejects_network_urls() {
        let err = SnapshotConnector
            .connect("opc.tcp://localhost:49320", &Credentials::default())
            .unwrap_err();
        assert!(matches!(err, ConnectionError::UnsupportedScheme(_)));

        let err = SnapshotConnector
            .connect("file:///nonexistent/space.json", &Credentials::default())
            .unwrap_err();
        assert!(matches!(err, ConnectionError::Unreachable { .. }));
    }
}
