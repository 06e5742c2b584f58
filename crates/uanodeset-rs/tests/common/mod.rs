// crates/uanodeset-rs/tests/common/mod.rs
#![allow(dead_code)]

use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashSet;
use uanodeset_rs::ids;
use uanodeset_rs::types::{
    AttributeId, DataTypeDefinition, LocalizedText, NodeClass, NodeId, QualifiedName,
    ReferenceDescription, StructureField,
};
use uanodeset_rs::{
    AddressSpace, ExtensionObject, MemoryAddressSpace, MemoryNode, ReadError, Variant,
};

pub const OTHER_NS: u16 = 1;
pub const KEP_NS: u16 = 2;

pub fn standard(id: u32) -> NodeId {
    NodeId::numeric(0, id)
}

pub fn channel() -> NodeId {
    NodeId::string(KEP_NS, "Channel1")
}
pub fn device() -> NodeId {
    NodeId::string(KEP_NS, "Channel1.Device1")
}
pub fn counter() -> NodeId {
    NodeId::string(KEP_NS, "Channel1.Device1.Counter")
}
pub fn levels() -> NodeId {
    NodeId::string(KEP_NS, "Channel1.Device1.Levels")
}
pub fn setpoint() -> NodeId {
    NodeId::string(KEP_NS, "Channel1.Device1.Setpoint")
}
pub fn setpoint_type() -> NodeId {
    NodeId::numeric(KEP_NS, 3001)
}
pub fn channel_type() -> NodeId {
    NodeId::numeric(OTHER_NS, 1001)
}
pub fn server() -> NodeId {
    NodeId::string(OTHER_NS, "Server")
}

fn field(name: &str, data_type: NodeId, is_optional: bool) -> StructureField {
    StructureField {
        name: name.to_string(),
        data_type,
        value_rank: -1,
        array_dimensions: Vec::new(),
        is_optional,
    }
}

/// A small KEPServerEX-like address space.
///
/// ```text
/// Objects
/// ├── ns=1;s=Server
/// └── ns=2;s=Channel1            (HasTypeDefinition → ns=1;i=1001)
///     └── Channel1.Device1
///         ├── Counter            Int32 = 42
///         ├── Levels             Double[3]
///         └── Setpoint           ns=2;i=3001 (structure)
/// Structure
/// └── ns=2;i=3001 Setpoint       { Encoding, Target, Unit, Limit? }
/// ```
pub fn plant() -> MemoryAddressSpace {
    let mut space = MemoryAddressSpace::new();
    assert_eq!(space.add_namespace("urn:vendor:other"), OTHER_NS);
    assert_eq!(space.add_namespace("KEPServerEX"), KEP_NS);

    let objects = standard(ids::OBJECTS_FOLDER);

    space.add_node(
        MemoryNode::new(
            channel_type(),
            NodeClass::ObjectType,
            QualifiedName::new(OTHER_NS, "ChannelType"),
        )
        .with_attribute(AttributeId::IsAbstract, Variant::Boolean(true)),
    );
    space.add_child(
        &objects,
        ids::ORGANIZES,
        MemoryNode::object(server(), QualifiedName::new(OTHER_NS, "Server")),
    );

    space.add_child(
        &objects,
        ids::ORGANIZES,
        MemoryNode::object(channel(), QualifiedName::new(KEP_NS, "Channel1"))
            .with_description(LocalizedText::with_locale("en-US", "First channel")),
    );
    space.add_reference(&channel(), &standard(ids::HAS_TYPE_DEFINITION), &channel_type());

    space.add_child(
        &channel(),
        ids::HAS_COMPONENT,
        MemoryNode::object(device(), QualifiedName::new(KEP_NS, "Device1"))
            .with_attribute(AttributeId::EventNotifier, Variant::Byte(1)),
    );

    space.add_child(
        &device(),
        ids::HAS_COMPONENT,
        MemoryNode::variable(counter(), QualifiedName::new(KEP_NS, "Counter"), standard(ids::INT32))
            .with_attribute(AttributeId::AccessLevel, Variant::Byte(3))
            .with_attribute(AttributeId::MinimumSamplingInterval, Variant::Double(100.0))
            .with_value(Variant::Int32(42)),
    );
    space.add_child(
        &device(),
        ids::HAS_COMPONENT,
        MemoryNode::variable(levels(), QualifiedName::new(KEP_NS, "Levels"), standard(ids::DOUBLE))
            .with_attribute(AttributeId::ValueRank, Variant::Int32(1))
            .with_attribute(
                AttributeId::ArrayDimensions,
                Variant::Array(vec![Variant::UInt32(3)]),
            )
            .with_value(Variant::Array(vec![
                Variant::Double(1.5),
                Variant::Double(2.0),
                Variant::Double(f64::INFINITY),
            ])),
    );

    space.add_child(
        &standard(ids::STRUCTURE),
        ids::HAS_SUBTYPE,
        MemoryNode::new(
            setpoint_type(),
            NodeClass::DataType,
            QualifiedName::new(KEP_NS, "Setpoint"),
        )
        .with_definition(DataTypeDefinition::Structure {
            fields: vec![
                field("Encoding", standard(ids::BYTE), false),
                field("Target", standard(ids::DOUBLE), false),
                field("Unit", standard(ids::STRING), false),
                field("Limit", standard(ids::DOUBLE), true),
            ],
        }),
    );
    space.add_child(
        &device(),
        ids::HAS_COMPONENT,
        MemoryNode::variable(setpoint(), QualifiedName::new(KEP_NS, "Setpoint"), setpoint_type())
            .with_value(setpoint_value()),
    );

    space
}

pub fn setpoint_value() -> Variant {
    Variant::ExtensionObject(
        ExtensionObject::new(setpoint_type())
            .with_field("Target", Variant::Double(21.5))
            .with_field("Unit", Variant::String("degC".to_string())),
    )
}

/// Read operations `FaultyAddressSpace` can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    Children,
    NodeClass,
    BrowseName,
    Description,
    Parent,
    References,
    Value,
}

/// Wraps an address space and fails selected reads with `BadNodeIdUnknown`
/// or a service error.
pub struct FaultyAddressSpace {
    pub inner: MemoryAddressSpace,
    faults: HashSet<(NodeId, Fault)>,
}

impl FaultyAddressSpace {
    pub fn new(inner: MemoryAddressSpace) -> Self {
        Self {
            inner,
            faults: HashSet::new(),
        }
    }

    pub fn fail(mut self, node: NodeId, fault: Fault) -> Self {
        self.faults.insert((node, fault));
        self
    }

    fn check(&self, node: &NodeId, fault: Fault) -> Result<(), ReadError> {
        if self.faults.contains(&(node.clone(), fault)) {
            return Err(ReadError::Service {
                node: node.clone(),
                detail: format!("injected {:?} failure", fault),
            });
        }
        Ok(())
    }
}

impl AddressSpace for FaultyAddressSpace {
    fn namespace_array(&self) -> Result<Vec<String>, ReadError> {
        self.inner.namespace_array()
    }

    fn children(&self, node: &NodeId, reference_mask: &NodeId) -> Result<Vec<NodeId>, ReadError> {
        self.check(node, Fault::Children)?;
        self.inner.children(node, reference_mask)
    }

    fn read_node_class(&self, node: &NodeId) -> Result<NodeClass, ReadError> {
        self.check(node, Fault::NodeClass)?;
        self.inner.read_node_class(node)
    }

    fn read_browse_name(&self, node: &NodeId) -> Result<QualifiedName, ReadError> {
        self.check(node, Fault::BrowseName)?;
        self.inner.read_browse_name(node)
    }

    fn read_display_name(&self, node: &NodeId) -> Result<LocalizedText, ReadError> {
        self.inner.read_display_name(node)
    }

    fn read_description(&self, node: &NodeId) -> Result<Option<LocalizedText>, ReadError> {
        self.check(node, Fault::Description)?;
        self.inner.read_description(node)
    }

    fn parent(&self, node: &NodeId) -> Result<Option<NodeId>, ReadError> {
        self.check(node, Fault::Parent)?;
        self.inner.parent(node)
    }

    fn references(&self, node: &NodeId) -> Result<Vec<ReferenceDescription>, ReadError> {
        self.check(node, Fault::References)?;
        self.inner.references(node)
    }

    fn read_attribute(&self, node: &NodeId, attribute: AttributeId) -> Result<Variant, ReadError> {
        self.inner.read_attribute(node, attribute)
    }

    fn read_value(&self, node: &NodeId) -> Result<Variant, ReadError> {
        self.check(node, Fault::Value)?;
        self.inner.read_value(node)
    }

    fn read_data_type_definition(
        &self,
        node: &NodeId,
    ) -> Result<Option<DataTypeDefinition>, ReadError> {
        self.inner.read_data_type_definition(node)
    }
}

/// A start or empty element of the written document.
#[derive(Debug, Clone)]
pub struct ScannedElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl ScannedElement {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Lists every element of `xml` in document order.
pub fn scan(xml: &str) -> Vec<ScannedElement> {
    let mut reader = Reader::from_str(xml);
    let mut elements = Vec::new();
    loop {
        match reader.read_event().expect("document should be well-formed") {
            Event::Start(e) | Event::Empty(e) => {
                let attributes = e
                    .attributes()
                    .map(|a| {
                        let a = a.expect("attribute should be well-formed");
                        (
                            String::from_utf8_lossy(a.key.as_ref()).into_owned(),
                            String::from_utf8_lossy(&a.value).into_owned(),
                        )
                    })
                    .collect();
                elements.push(ScannedElement {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    attributes,
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }
    elements
}

/// NodeIds of the node elements (`UAObject`, `UAVariable`, ...) in order.
pub fn exported_ids(xml: &str) -> Vec<String> {
    scan(xml)
        .into_iter()
        .filter(|e| e.name.starts_with("UA") && e.name != "UANodeSet")
        .filter_map(|e| e.attribute("NodeId").map(str::to_string))
        .collect()
}

pub fn node_element(xml: &str, node_id: &str) -> Option<ScannedElement> {
    scan(xml)
        .into_iter()
        .find(|e| e.name.starts_with("UA") && e.attribute("NodeId") == Some(node_id))
}
