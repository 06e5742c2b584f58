// crates/uanodeset-rs/src/error.rs

use crate::types::{AttributeId, NodeId};
use core::fmt;
use std::io;

/// A failed remote read or browse call against the address space.
///
/// These are per-item errors: the exporter logs them and either defaults the
/// field or skips the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The node does not exist on the server.
    NodeIdUnknown(NodeId),

    /// The node exists but does not expose the requested attribute.
    AttributeIdInvalid { node: NodeId, attribute: AttributeId },

    /// The attribute was read but held a value of an unexpected type.
    UnexpectedValue { node: NodeId, attribute: AttributeId },

    /// The service call itself failed (timeout, bad status, closed channel).
    Service { node: NodeId, detail: String },
}

impl ReadError {
    pub fn attribute_invalid(node: &NodeId, attribute: AttributeId) -> Self {
        ReadError::AttributeIdInvalid {
            node: node.clone(),
            attribute,
        }
    }

    pub fn unexpected_value(node: &NodeId, attribute: AttributeId) -> Self {
        ReadError::UnexpectedValue {
            node: node.clone(),
            attribute,
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::NodeIdUnknown(node) => write!(f, "BadNodeIdUnknown: {}", node),
            ReadError::AttributeIdInvalid { node, attribute } => {
                write!(f, "BadAttributeIdInvalid: {} has no {}", node, attribute)
            }
            ReadError::UnexpectedValue { node, attribute } => {
                write!(f, "Unexpected value type for {} of {}", attribute, node)
            }
            ReadError::Service { node, detail } => {
                write!(f, "Service call failed for {}: {}", node, detail)
            }
        }
    }
}

impl std::error::Error for ReadError {}

/// Errors that end the serialization of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    /// An underlying read failed.
    Read(ReadError),

    /// A structured value's type has no structure definition.
    MissingDefinition(NodeId),

    /// A mandatory member of a structured value was absent.
    MissingMember { type_id: NodeId, member: String },

    /// The value does not fit the declared data type.
    TypeMismatch { data_type: NodeId, found: &'static str },

    /// The data type's super-type chain never reaches a standard base type.
    UnresolvedBaseType(NodeId),

    /// A server namespace index with no entry in the document's namespace table.
    UndeclaredNamespace(u16),
}

impl From<ReadError> for SerializeError {
    fn from(e: ReadError) -> Self {
        SerializeError::Read(e)
    }
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializeError::Read(e) => write!(f, "Read error: {}", e),
            SerializeError::MissingDefinition(id) => {
                write!(f, "No structure definition for data type {}", id)
            }
            SerializeError::MissingMember { type_id, member } => {
                write!(f, "Structure {} is missing mandatory member {}", type_id, member)
            }
            SerializeError::TypeMismatch { data_type, found } => {
                write!(f, "Value of kind {} does not match data type {}", found, data_type)
            }
            SerializeError::UndeclaredNamespace(index) => {
                write!(f, "Namespace index {} is not declared in the document", index)
            }
            SerializeError::UnresolvedBaseType(id) => {
                write!(f, "Cannot resolve a base data type for {}", id)
            }
        }
    }
}

impl std::error::Error for SerializeError {}

/// Failure to establish the initial session.
#[derive(Debug)]
pub enum ConnectionError {
    /// The URL scheme is not handled by the connector.
    UnsupportedScheme(String),

    /// The endpoint could not be reached or refused the session.
    Unreachable { url: String, detail: String },

    /// A snapshot endpoint could not be loaded.
    Snapshot(SnapshotError),
}

impl From<SnapshotError> for ConnectionError {
    fn from(e: SnapshotError) -> Self {
        ConnectionError::Snapshot(e)
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::UnsupportedScheme(url) => {
                write!(f, "No connector available for endpoint: {}", url)
            }
            ConnectionError::Unreachable { url, detail } => {
                write!(f, "Could not connect to {}: {}", url, detail)
            }
            ConnectionError::Snapshot(e) => write!(f, "Snapshot error: {}", e),
        }
    }
}

impl std::error::Error for ConnectionError {}

/// Errors while loading an address-space snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    Io(io::Error),
    Json(serde_json::Error),
    /// A reference starts at a node that the snapshot does not define.
    UnknownNode(NodeId),
}

impl From<io::Error> for SnapshotError {
    fn from(e: io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "I/O error: {}", e),
            SnapshotError::Json(e) => write!(f, "JSON error: {}", e),
            SnapshotError::UnknownNode(id) => {
                write!(f, "Reference starts at undefined node {}", id)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Fatal errors that abort an export run.
#[derive(Debug)]
pub enum ExportError {
    /// The session could not be established.
    Connection(ConnectionError),

    /// A session-level read (e.g., the namespace array) failed.
    Read(ReadError),

    /// Writing the document or patching the output file failed.
    Io(io::Error),

    /// The writer produced bytes that are not valid UTF-8.
    Encoding(std::string::FromUtf8Error),
}

impl From<ConnectionError> for ExportError {
    fn from(e: ConnectionError) -> Self {
        ExportError::Connection(e)
    }
}

impl From<ReadError> for ExportError {
    fn from(e: ReadError) -> Self {
        ExportError::Read(e)
    }
}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<std::string::FromUtf8Error> for ExportError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        ExportError::Encoding(e)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Connection(e) => write!(f, "No connection established: {}", e),
            ExportError::Read(e) => write!(f, "Session read failed: {}", e),
            ExportError::Io(e) => write!(f, "I/O error: {}", e),
            ExportError::Encoding(e) => write!(f, "Encoding error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_read_error() {
        let read = ReadError::NodeIdUnknown(NodeId::numeric(2, 1));
        let ser: SerializeError = read.clone().into();
        assert_eq!(ser, SerializeError::Read(read.clone()));

        let export: ExportError = read.into();
        assert!(matches!(export, ExportError::Read(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let export: ExportError = io_err.into();
        assert!(matches!(export, ExportError::Io(_)));

        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let snapshot: SnapshotError = io_err.into();
        assert!(matches!(snapshot, SnapshotError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let conn: ConnectionError = SnapshotError::from(json_err).into();
        assert!(matches!(conn, ConnectionError::Snapshot(SnapshotError::Json(_))));
    }

    #[test]
    fn test_attribute_error_display() {
        let err = ReadError::attribute_invalid(&NodeId::numeric(1, 5), AttributeId::ValueRank);
        assert_eq!(
            err.to_string(),
            "BadAttributeIdInvalid: ns=1;i=5 has no ValueRank"
        );
    }
}
