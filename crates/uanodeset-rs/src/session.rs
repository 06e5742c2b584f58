// crates/uanodeset-rs/src/session.rs

//! The client capability consumed by the exporter.
//!
//! Establishing sessions, securing the channel and issuing the actual
//! Read/Browse service calls is the job of an external client stack. The
//! exporter only needs the operations declared here, which keeps the traversal
//! and serialization logic independent of any particular transport.

use crate::error::{ConnectionError, ReadError};
use crate::ids;
use crate::types::{
    AttributeId, DataTypeDefinition, LocalizedText, NodeClass, NodeId, QualifiedName,
    ReferenceDescription,
};
use crate::value::Variant;

/// User credentials handed to a `Connector`. Empty fields mean anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

/// Opens sessions against an endpoint URL.
pub trait Connector {
    type Session: AddressSpace;

    /// Connects and activates a session. Failure is fatal for an export run.
    fn connect(
        &self,
        url: &str,
        credentials: &Credentials,
    ) -> Result<Self::Session, ConnectionError>;
}

/// Read-only access to a server's address space.
///
/// Every method corresponds to one remote call; implementations must not
/// retry on failure.
pub trait AddressSpace {
    /// Returns the server's namespace array, ordered by index.
    fn namespace_array(&self) -> Result<Vec<String>, ReadError>;

    /// Returns the index of a namespace URI, if the server knows it.
    fn namespace_index(&self, uri: &str) -> Result<Option<u16>, ReadError> {
        Ok(self
            .namespace_array()?
            .iter()
            .position(|u| u == uri)
            .and_then(|i| u16::try_from(i).ok()))
    }

    /// The `Root` folder (`i=84`), entry point of every traversal.
    fn root_node(&self) -> NodeId {
        NodeId::numeric(0, ids::ROOT_FOLDER)
    }

    /// Browses forward references of `reference_mask` (subtypes included) and
    /// returns their targets.
    fn children(&self, node: &NodeId, reference_mask: &NodeId) -> Result<Vec<NodeId>, ReadError>;

    fn read_node_class(&self, node: &NodeId) -> Result<NodeClass, ReadError>;

    fn read_browse_name(&self, node: &NodeId) -> Result<QualifiedName, ReadError>;

    fn read_display_name(&self, node: &NodeId) -> Result<LocalizedText, ReadError>;

    fn read_description(&self, node: &NodeId) -> Result<Option<LocalizedText>, ReadError>;

    /// Returns the first inverse hierarchical reference target, if any.
    fn parent(&self, node: &NodeId) -> Result<Option<NodeId>, ReadError>;

    /// Returns all references of the node, forward and inverse.
    fn references(&self, node: &NodeId) -> Result<Vec<ReferenceDescription>, ReadError>;

    /// Reads a class-specific attribute. Absent optional values are returned
    /// as `Variant::Empty`.
    fn read_attribute(&self, node: &NodeId, attribute: AttributeId) -> Result<Variant, ReadError>;

    /// Reads the `Value` attribute of a Variable or VariableType.
    fn read_value(&self, node: &NodeId) -> Result<Variant, ReadError>;

    /// Reads the `DataTypeDefinition` attribute of a DataType node.
    fn read_data_type_definition(
        &self,
        node: &NodeId,
    ) -> Result<Option<DataTypeDefinition>, ReadError>;

    /// Returns the super type of a type node (inverse `HasSubtype`).
    fn super_type(&self, node: &NodeId) -> Result<Option<NodeId>, ReadError> {
        let has_subtype = NodeId::numeric(0, ids::HAS_SUBTYPE);
        Ok(self
            .references(node)?
            .into_iter()
            .find(|r| !r.is_forward && r.reference_type == has_subtype)
            .map(|r| r.target))
    }

    /// Reads the `DataType` attribute of a Variable or VariableType.
    fn read_data_type(&self, node: &NodeId) -> Result<NodeId, ReadError> {
        self.read_attribute(node, AttributeId::DataType)?
            .as_node_id()
            .cloned()
            .ok_or_else(|| ReadError::unexpected_value(node, AttributeId::DataType))
    }
}
