// crates/uanodeset-rs/src/value.rs

use crate::ids;
use crate::types::{LocalizedText, NodeId, QualifiedName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// A structured value together with the id of its (concrete) DataType.
///
/// Members are keyed by name; their output order comes from the type's
/// declared member list, not from this map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionObject {
    pub type_id: NodeId,
    #[serde(default)]
    pub fields: BTreeMap<String, Variant>,
}

impl ExtensionObject {
    pub fn new(type_id: NodeId) -> Self {
        Self {
            type_id,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Variant) -> Self {
        self.fields.insert(name.into(), value);
        self
    }
}

/// Represents any value an attribute or a Variable's `Value` can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Variant {
    Empty,
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    DateTime(DateTime<Utc>),
    Guid(Uuid),
    ByteString(Vec<u8>),
    XmlElement(String),
    NodeId(NodeId),
    ExpandedNodeId(NodeId),
    StatusCode(u32),
    QualifiedName(QualifiedName),
    LocalizedText(LocalizedText),
    ExtensionObject(ExtensionObject),
    Array(Vec<Variant>),
}

impl Variant {
    /// The builtin data type id of the encoded value, if it is a scalar.
    pub fn builtin_type(&self) -> Option<u32> {
        let id = match self {
            Variant::Boolean(_) => ids::BOOLEAN,
            Variant::SByte(_) => ids::SBYTE,
            Variant::Byte(_) => ids::BYTE,
            Variant::Int16(_) => ids::INT16,
            Variant::UInt16(_) => ids::UINT16,
            Variant::Int32(_) => ids::INT32,
            Variant::UInt32(_) => ids::UINT32,
            Variant::Int64(_) => ids::INT64,
            Variant::UInt64(_) => ids::UINT64,
            Variant::Float(_) => ids::FLOAT,
            Variant::Double(_) => ids::DOUBLE,
            Variant::String(_) => ids::STRING,
            Variant::DateTime(_) => ids::DATE_TIME,
            Variant::Guid(_) => ids::GUID,
            Variant::ByteString(_) => ids::BYTE_STRING,
            Variant::XmlElement(_) => ids::XML_ELEMENT,
            Variant::NodeId(_) => ids::NODE_ID,
            Variant::ExpandedNodeId(_) => ids::EXPANDED_NODE_ID,
            Variant::StatusCode(_) => ids::STATUS_CODE,
            Variant::QualifiedName(_) => ids::QUALIFIED_NAME,
            Variant::LocalizedText(_) => ids::LOCALIZED_TEXT,
            Variant::ExtensionObject(_) => ids::STRUCTURE,
            Variant::Empty | Variant::Array(_) => return None,
        };
        Some(id)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    /// Adds the namespace index of every id and name the value carries.
    pub fn collect_namespaces(&self, out: &mut BTreeSet<u16>) {
        match self {
            Variant::NodeId(id) | Variant::ExpandedNodeId(id) => {
                out.insert(id.namespace);
            }
            Variant::QualifiedName(name) => {
                out.insert(name.namespace);
            }
            Variant::ExtensionObject(object) => {
                out.insert(object.type_id.namespace);
                for field in object.fields.values() {
                    field.collect_namespaces(out);
                }
            }
            Variant::Array(items) => {
                for item in items {
                    item.collect_namespaces(out);
                }
            }
            _ => {}
        }
    }

    /// Widens any integer variant to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Variant::SByte(v) => Some(v.into()),
            Variant::Byte(v) => Some(v.into()),
            Variant::Int16(v) => Some(v.into()),
            Variant::UInt16(v) => Some(v.into()),
            Variant::Int32(v) => Some(v.into()),
            Variant::UInt32(v) => Some(v.into()),
            Variant::Int64(v) => Some(v),
            Variant::UInt64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Variant::Float(v) => Some(v.into()),
            Variant::Double(v) => Some(v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Variant::Boolean(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_node_id(&self) -> Option<&NodeId> {
        match self {
            Variant::NodeId(v) | Variant::ExpandedNodeId(v) => Some(v),
            _ => None,
        }
    }

    /// Integer elements of an array value (`ArrayDimensions`).
    pub fn as_u32_list(&self) -> Option<Vec<u32>> {
        match self {
            Variant::Array(items) => items
                .iter()
                .map(|v| v.as_i64().and_then(|i| u32::try_from(i).ok()))
                .collect(),
            Variant::Empty => Some(Vec::new()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widening() {
        assert_eq!(Variant::Byte(3).as_i64(), Some(3));
        assert_eq!(Variant::Int32(-1).as_i64(), Some(-1));
        assert_eq!(Variant::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(Variant::String("1".into()).as_i64(), None);
    }

    #[test]
    fn test_array_dimensions_list() {
        let dims = Variant::Array(vec![Variant::UInt32(2), Variant::UInt32(3)]);
        assert_eq!(dims.as_u32_list(), Some(vec![2, 3]));
        assert_eq!(Variant::Empty.as_u32_list(), Some(vec![]));
        assert_eq!(Variant::Array(vec![Variant::Int32(-1)]).as_u32_list(), None);
    }

    #[test]
    fn test_builtin_type_of_scalars() {
        assert_eq!(Variant::Double(1.0).builtin_type(), Some(ids::DOUBLE));
        assert_eq!(
            Variant::ExtensionObject(ExtensionObject::new(NodeId::numeric(2, 1))).builtin_type(),
            Some(ids::STRUCTURE)
        );
        assert_eq!(Variant::Array(vec![]).builtin_type(), None);
    }

    #[test]
    fn test_collect_namespaces_recurses() {
        let value = Variant::Array(vec![
            Variant::NodeId(NodeId::numeric(3, 1)),
            Variant::ExtensionObject(
                ExtensionObject::new(NodeId::numeric(4, 2))
                    .with_field("Name", Variant::QualifiedName(QualifiedName::new(5, "N")))
                    .with_field("Count", Variant::Int32(1)),
            ),
        ]);
        let mut out = BTreeSet::new();
        value.collect_namespaces(&mut out);
        assert_eq!(out.into_iter().collect::<Vec<_>>(), vec![3, 4, 5]);
    }
}
