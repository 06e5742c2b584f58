// crates/uanodeset-rs/src/types.rs

//! Identity and naming types of the OPC UA address space.
//!
//! These types mirror the attributes every node carries (NodeId, BrowseName,
//! DisplayName, NodeClass) and the reference descriptions returned by browse
//! calls. Their `Display` impls produce the canonical string forms used in the
//! NodeSet2 document.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identifier part of a `NodeId`.
///
/// Variant order defines the sort order used for the `Aliases` section
/// (numeric < string < guid < opaque, as in the binary encoding).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    Numeric(u32),
    String(String),
    Guid(Uuid),
    Opaque(Vec<u8>),
}

/// A namespace index plus identifier value uniquely naming a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId {
    pub namespace: u16,
    pub identifier: Identifier,
}

impl NodeId {
    pub fn numeric(namespace: u16, value: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(value),
        }
    }

    pub fn string(namespace: u16, value: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(value.into()),
        }
    }

    pub fn guid(namespace: u16, value: Uuid) -> Self {
        Self {
            namespace,
            identifier: Identifier::Guid(value),
        }
    }

    pub fn opaque(namespace: u16, value: Vec<u8>) -> Self {
        Self {
            namespace,
            identifier: Identifier::Opaque(value),
        }
    }

    /// Returns the numeric identifier if this is a namespace 0 numeric id.
    pub fn standard_id(&self) -> Option<u32> {
        match (&self.identifier, self.namespace) {
            (Identifier::Numeric(v), 0) => Some(*v),
            _ => None,
        }
    }

    /// Returns a copy of this id living in a different namespace.
    pub fn with_namespace(&self, namespace: u16) -> Self {
        Self {
            namespace,
            identifier: self.identifier.clone(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "ns={};", self.namespace)?;
        }
        match &self.identifier {
            Identifier::Numeric(v) => write!(f, "i={}", v),
            Identifier::String(v) => write!(f, "s={}", v),
            Identifier::Guid(v) => write!(f, "g={}", v.hyphenated()),
            Identifier::Opaque(v) => write!(f, "b={}", BASE64.encode(v)),
        }
    }
}

/// Error returned when a `NodeId` or `QualifiedName` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError(pub String);

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid identifier string: {}", self.0)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for NodeId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseIdError(s.to_string());

        let (namespace, rest) = match s.strip_prefix("ns=") {
            Some(tail) => {
                let (ns, id) = tail.split_once(';').ok_or_else(invalid)?;
                (ns.parse::<u16>().map_err(|_| invalid())?, id)
            }
            None => (0, s),
        };

        let (kind, value) = rest.split_once('=').ok_or_else(invalid)?;
        let identifier = match kind {
            "i" => Identifier::Numeric(value.parse().map_err(|_| invalid())?),
            "s" => Identifier::String(value.to_string()),
            "g" => Identifier::Guid(Uuid::parse_str(value).map_err(|_| invalid())?),
            "b" => Identifier::Opaque(BASE64.decode(value).map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };

        Ok(NodeId {
            namespace,
            identifier,
        })
    }
}

impl TryFrom<String> for NodeId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeId> for String {
    fn from(value: NodeId) -> Self {
        value.to_string()
    }
}

/// A name qualified by a namespace index (`BrowseName`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName {
    pub namespace: u16,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace: u16, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "{}:", self.namespace)?;
        }
        f.write_str(&self.name)
    }
}

impl FromStr for QualifiedName {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "2:Name" carries an index; anything without a numeric prefix is ns 0.
        if let Some((ns, name)) = s.split_once(':') {
            if let Ok(namespace) = ns.parse::<u16>() {
                return Ok(QualifiedName::new(namespace, name));
            }
        }
        Ok(QualifiedName::new(0, s))
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QualifiedName> for String {
    fn from(value: QualifiedName) -> Self {
        value.to_string()
    }
}

/// Human readable text with an optional locale (`DisplayName`, `Description`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default)]
    pub text: String,
}

impl LocalizedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            locale: None,
            text: text.into(),
        }
    }

    pub fn with_locale(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            text: text.into(),
        }
    }
}

/// The eight node classes of the OPC UA information model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeClass {
    Object,
    Variable,
    Method,
    ObjectType,
    VariableType,
    ReferenceType,
    DataType,
    View,
}

impl NodeClass {
    /// The NodeSet2 element tag for nodes of this class.
    pub fn tag(self) -> &'static str {
        match self {
            NodeClass::Object => "UAObject",
            NodeClass::Variable => "UAVariable",
            NodeClass::Method => "UAMethod",
            NodeClass::ObjectType => "UAObjectType",
            NodeClass::VariableType => "UAVariableType",
            NodeClass::ReferenceType => "UAReferenceType",
            NodeClass::DataType => "UADataType",
            NodeClass::View => "UAView",
        }
    }

    /// Instance classes are the only ones that carry a `ParentNodeId`.
    pub fn has_parent_attribute(self) -> bool {
        matches!(
            self,
            NodeClass::Object | NodeClass::Variable | NodeClass::Method
        )
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeClass::Object => "Object",
            NodeClass::Variable => "Variable",
            NodeClass::Method => "Method",
            NodeClass::ObjectType => "ObjectType",
            NodeClass::VariableType => "VariableType",
            NodeClass::ReferenceType => "ReferenceType",
            NodeClass::DataType => "DataType",
            NodeClass::View => "View",
        };
        f.write_str(name)
    }
}

/// One reference of a node as returned by a browse call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDescription {
    pub reference_type: NodeId,
    pub target: NodeId,
    pub is_forward: bool,
}

/// Node attributes read through `AddressSpace::read_attribute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeId {
    EventNotifier,
    IsAbstract,
    Symmetric,
    InverseName,
    ContainsNoLoops,
    DataType,
    ValueRank,
    ArrayDimensions,
    AccessLevel,
    UserAccessLevel,
    MinimumSamplingInterval,
    Historizing,
    Executable,
    UserExecutable,
    Value,
    DataTypeDefinition,
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One member of a structured data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureField {
    pub name: String,
    pub data_type: NodeId,
    #[serde(default = "scalar_rank")]
    pub value_rank: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub array_dimensions: Vec<u32>,
    #[serde(default)]
    pub is_optional: bool,
}

fn scalar_rank() -> i32 {
    -1
}

/// One member of an enumerated data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumField {
    pub name: String,
    pub value: i64,
}

/// The `DataTypeDefinition` attribute of a DataType node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataTypeDefinition {
    Structure { fields: Vec<StructureField> },
    Enumeration { fields: Vec<EnumField> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display_omits_namespace_zero() {
        assert_eq!(NodeId::numeric(0, 84).to_string(), "i=84");
        assert_eq!(NodeId::numeric(3, 7).to_string(), "ns=3;i=7");
        assert_eq!(NodeId::string(2, "Line1.Speed").to_string(), "ns=2;s=Line1.Speed");
        assert_eq!(NodeId::opaque(1, vec![1, 2, 3]).to_string(), "ns=1;b=AQID");
    }

    #[test]
    fn test_node_id_guid_display() {
        let guid = Uuid::parse_str("72962b91-fa75-4ae6-8d28-b404dc7daf63").unwrap();
        assert_eq!(
            NodeId::guid(1, guid).to_string(),
            "ns=1;g=72962b91-fa75-4ae6-8d28-b404dc7daf63"
        );
    }

    #[test]
    fn test_node_id_parse() {
        assert_eq!("i=85".parse::<NodeId>().unwrap(), NodeId::numeric(0, 85));
        assert_eq!(
            "ns=4;s=a;b".parse::<NodeId>().unwrap(),
            NodeId::string(4, "a;b")
        );
        assert!("x=1".parse::<NodeId>().is_err());
        assert!("ns=abc;i=1".parse::<NodeId>().is_err());
        assert!("ns=1;i=notanumber".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_node_id_ordering_groups_by_namespace() {
        let mut ids = vec![
            NodeId::string(1, "a"),
            NodeId::numeric(1, 9),
            NodeId::numeric(0, 47),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                NodeId::numeric(0, 47),
                NodeId::numeric(1, 9),
                NodeId::string(1, "a"),
            ]
        );
    }

    #[test]
    fn test_qualified_name_round_trip() {
        assert_eq!(QualifiedName::new(0, "Objects").to_string(), "Objects");
        assert_eq!(QualifiedName::new(2, "Pump").to_string(), "2:Pump");
        assert_eq!(
            "2:Pump".parse::<QualifiedName>().unwrap(),
            QualifiedName::new(2, "Pump")
        );
        assert_eq!(
            "Tag:Value".parse::<QualifiedName>().unwrap(),
            QualifiedName::new(0, "Tag:Value")
        );
    }

    #[test]
    fn test_parent_attribute_classes() {
        assert!(NodeClass::Object.has_parent_attribute());
        assert!(NodeClass::Variable.has_parent_attribute());
        assert!(NodeClass::Method.has_parent_attribute());
        assert!(!NodeClass::ObjectType.has_parent_attribute());
        assert!(!NodeClass::DataType.has_parent_attribute());
        assert!(!NodeClass::View.has_parent_attribute());
    }
}
