//! Data structures of the NodeSet2 document, close to the `UANodeSet.xsd` schema.
//!
//! Strings are already in their rendered form (remapped NodeIds, alias
//! tokens), so writing the document is a plain structural walk.

use crate::types::NodeClass;

pub const NODESET_XMLNS: &str = "http://opcfoundation.org/UA/2011/03/UANodeSet.xsd";
pub const XSI_XMLNS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const UAX_XMLNS: &str = "http://opcfoundation.org/UA/2008/02/Types.xsd";
pub const XSD_XMLNS: &str = "http://www.w3.org/2001/XMLSchema";

/// The root `<UANodeSet>` element.
///
/// Sections are written in field order: NamespaceUris, Models, nodes, Aliases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSet {
    pub namespace_uris: Vec<String>,
    pub models: Vec<Model>,
    pub nodes: Vec<UaNode>,
    pub aliases: Vec<Alias>,
}

/// `<Model ModelUri="...">` with its `<RequiredModel>` children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub model_uri: String,
    pub required_models: Vec<String>,
}

/// `<Alias Alias="HasComponent">i=47</Alias>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub alias: String,
    pub node_id: String,
}

/// `<DisplayName Locale="en">Text</DisplayName>` and friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedElement {
    pub locale: Option<String>,
    pub text: String,
}

/// One `<Reference>` inside `<References>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceElement {
    pub reference_type: String,
    pub is_forward: bool,
    pub target: String,
}

/// One `<Field>` of a `<Definition>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionField {
    pub name: String,
    /// `(attribute, value)` pairs after `Name`, in output order.
    pub attributes: Vec<(&'static str, String)>,
}

/// `<Definition Name="...">` of a UADataType.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub fields: Vec<DefinitionField>,
}

/// A generic element used for the `uax:` value encodings, whose tag names
/// depend on data (type names, member names).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }
}

/// One exported node (`<UAObject>`, `<UAVariable>`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct UaNode {
    pub node_class: NodeClass,
    pub node_id: String,
    pub browse_name: String,
    pub parent_node_id: Option<String>,
    /// Class-specific attributes (`DataType`, `ValueRank`, `IsAbstract`, ...).
    pub attributes: Vec<(&'static str, String)>,
    pub display_name: LocalizedElement,
    pub description: LocalizedElement,
    pub references: Vec<ReferenceElement>,
    /// `<InverseName>` of a UAReferenceType.
    pub inverse_name: Option<LocalizedElement>,
    /// Children of `<Value>`.
    pub value: Option<Element>,
    pub definition: Option<Definition>,
}

impl UaNode {
    pub fn tag(&self) -> &'static str {
        self.node_class.tag()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}
