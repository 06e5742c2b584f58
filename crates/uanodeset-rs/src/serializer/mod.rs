// crates/uanodeset-rs/src/serializer/mod.rs

//! Turns one address-space node into its NodeSet2 element.
//!
//! `serialize_node` performs every read a node needs, renders ids through the
//! run's `NamespaceMap` and collects the aliases the element uses. Nothing is
//! committed to the shared `ExportState` until the whole node has succeeded,
//! so a failing node leaves no trace in the document.

mod value;

use crate::config::ExportOptions;
use crate::error::{ReadError, SerializeError};
use crate::ids;
use crate::log::{NodeContext, node_debug};
use crate::model::{
    Alias, Definition, DefinitionField, LocalizedElement, ReferenceElement, UaNode,
};
use crate::namespace::NamespaceMap;
use crate::session::AddressSpace;
use crate::typedesc::TypeTable;
use crate::types::{AttributeId, DataTypeDefinition, LocalizedText, NodeClass, NodeId};
use crate::value::Variant;
use std::collections::BTreeMap;

use self::value::ValueEncoder;

/// NodeId → alias token, ordered by NodeId.
///
/// Each id maps to exactly one token. Tokens are either the standard
/// symbolic name (`HasComponent`) or the rendered id itself. Entries keep the
/// id as rendered by the node that registered it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<NodeId, Alias>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the token used for `id`. The first registration wins.
    pub fn register(&mut self, id: &NodeId, token: &str, rendered: &str) {
        self.entries.entry(id.clone()).or_insert_with(|| Alias {
            alias: token.to_string(),
            node_id: rendered.to_string(),
        });
    }

    pub fn token(&self, id: &NodeId) -> Option<&str> {
        self.entries.get(id).map(|a| a.alias.as_str())
    }

    pub fn merge(&mut self, other: AliasTable) {
        for (id, alias) in other.entries {
            self.entries.entry(id).or_insert(alias);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `<Aliases>` entries, sorted by NodeId.
    pub fn to_elements(&self) -> Vec<Alias> {
        self.entries.values().cloned().collect()
    }
}

/// State shared by all nodes of one export run.
#[derive(Debug, Default)]
pub struct ExportState {
    pub namespaces: NamespaceMap,
    pub aliases: AliasTable,
    pub types: TypeTable,
}

impl ExportState {
    pub fn new(namespaces: NamespaceMap) -> Self {
        Self {
            namespaces,
            aliases: AliasTable::new(),
            types: TypeTable::new(),
        }
    }
}

/// Builds the element for `node`.
///
/// A failing `Description` read falls back to empty text. Any other failed
/// read aborts the node, and the caller decides whether to skip it.
pub fn serialize_node<S: AddressSpace>(
    space: &S,
    node: &NodeId,
    state: &mut ExportState,
    options: &ExportOptions,
) -> Result<UaNode, SerializeError> {
    let mut builder = NodeBuilder {
        space,
        node,
        namespaces: &state.namespaces,
        types: &mut state.types,
        aliases: AliasTable::new(),
        options,
    };
    let element = builder.build()?;
    let aliases = builder.aliases;
    state.aliases.merge(aliases);
    Ok(element)
}

struct NodeBuilder<'a, S: AddressSpace> {
    space: &'a S,
    node: &'a NodeId,
    namespaces: &'a NamespaceMap,
    types: &'a mut TypeTable,
    aliases: AliasTable,
    options: &'a ExportOptions,
}

impl<S: AddressSpace> NodeBuilder<'_, S> {
    fn build(&mut self) -> Result<UaNode, SerializeError> {
        let ctx = NodeContext::new("serialize", self.node);
        let space = self.space;
        let node = self.node;

        // 1. Common attributes
        let node_class = space.read_node_class(node)?;
        let browse_name = space.read_browse_name(node)?;
        let display_name = space.read_display_name(node)?;
        let description = match space.read_description(node) {
            Ok(text) => text.unwrap_or_default(),
            Err(e) => {
                node_debug!(ctx, "Description unavailable, writing empty text: {}", e);
                LocalizedText::default()
            }
        };
        let parent = space.parent(node)?;

        let mut element = UaNode {
            node_class,
            node_id: self.namespaces.node_id(node)?,
            browse_name: self.namespaces.browse_name(&browse_name)?,
            parent_node_id: None,
            attributes: Vec::new(),
            display_name: self.localized(&display_name),
            description: self.localized(&description),
            references: Vec::new(),
            inverse_name: None,
            value: None,
            definition: None,
        };
        if node_class.has_parent_attribute() {
            element.parent_node_id = parent
                .as_ref()
                .map(|p| self.namespaces.node_id(p))
                .transpose()?;
        }

        // 2. Class-specific attributes
        match node_class {
            NodeClass::Object => {
                self.event_notifier(&mut element)?;
            }
            NodeClass::View => {
                self.event_notifier(&mut element)?;
                if self.read_flag(AttributeId::ContainsNoLoops)? {
                    element.attributes.push(("ContainsNoLoops", "true".to_string()));
                }
            }
            NodeClass::ObjectType => {
                self.is_abstract(&mut element)?;
            }
            NodeClass::Variable => {
                let export_value = self.options.export_values;
                self.variable_common(&mut element, export_value)?;
                self.access_level(&mut element, AttributeId::AccessLevel, "AccessLevel")?;
                self.access_level(&mut element, AttributeId::UserAccessLevel, "UserAccessLevel")?;
                if let Some(interval) = self.read_number(AttributeId::MinimumSamplingInterval)? {
                    if interval != 0.0 {
                        element
                            .attributes
                            .push(("MinimumSamplingInterval", value::double_text(interval)));
                    }
                }
                if self.read_flag(AttributeId::Historizing)? {
                    element.attributes.push(("Historizing", "true".to_string()));
                }
            }
            NodeClass::VariableType => {
                self.variable_common(&mut element, true)?;
                self.is_abstract(&mut element)?;
            }
            NodeClass::Method => {
                if !self.read_flag(AttributeId::Executable)? {
                    element.attributes.push(("Executable", "false".to_string()));
                }
                if !self.read_flag(AttributeId::UserExecutable)? {
                    element.attributes.push(("UserExecutable", "false".to_string()));
                }
            }
            NodeClass::ReferenceType => {
                self.is_abstract(&mut element)?;
                if self.read_flag(AttributeId::Symmetric)? {
                    element.attributes.push(("Symmetric", "true".to_string()));
                }
                match space.read_attribute(node, AttributeId::InverseName)? {
                    Variant::LocalizedText(text) if !text.text.is_empty() => {
                        element.inverse_name = Some(LocalizedElement {
                            locale: text.locale,
                            text: text.text,
                        });
                    }
                    Variant::LocalizedText(_) | Variant::Empty => {}
                    _ => {
                        return Err(
                            ReadError::unexpected_value(node, AttributeId::InverseName).into()
                        );
                    }
                }
            }
            NodeClass::DataType => {
                self.is_abstract(&mut element)?;
                element.definition = self.definition(&browse_name.name)?;
            }
        }

        // 3. References
        for reference in space.references(node)? {
            let token = self.reference_token(&reference.reference_type)?;
            element.references.push(ReferenceElement {
                reference_type: token,
                is_forward: reference.is_forward,
                target: self.namespaces.node_id(&reference.target)?,
            });
        }

        Ok(element)
    }

    fn localized(&self, text: &LocalizedText) -> LocalizedElement {
        LocalizedElement {
            locale: Some(self.options.locale.clone()),
            text: text.text.clone(),
        }
    }

    /// Alias token of a reference type, registered for the `<Aliases>` section.
    fn reference_token(&mut self, reference_type: &NodeId) -> Result<String, SerializeError> {
        let rendered = self.namespaces.node_id(reference_type)?;
        let token = reference_type
            .standard_id()
            .and_then(ids::standard_name)
            .map_or_else(|| rendered.clone(), str::to_string);
        self.aliases.register(reference_type, &token, &rendered);
        Ok(token)
    }

    /// `DataType` attribute text: the alias name for standard types, the
    /// rendered id otherwise.
    fn data_type_token(&mut self, data_type: &NodeId) -> Result<String, SerializeError> {
        let rendered = self.namespaces.node_id(data_type)?;
        match data_type.standard_id().and_then(ids::standard_name) {
            Some(name) => {
                self.aliases.register(data_type, name, &rendered);
                Ok(name.to_string())
            }
            None => Ok(rendered),
        }
    }

    fn variable_common(
        &mut self,
        element: &mut UaNode,
        export_value: bool,
    ) -> Result<(), SerializeError> {
        let node = self.node;
        let data_type = self.space.read_data_type(node)?;

        let rank = self.read_integer(AttributeId::ValueRank)?.unwrap_or(-1);
        if rank != -1 {
            element.attributes.push(("ValueRank", rank.to_string()));
        }
        let dims = self
            .space
            .read_attribute(node, AttributeId::ArrayDimensions)?
            .as_u32_list()
            .ok_or_else(|| ReadError::unexpected_value(node, AttributeId::ArrayDimensions))?;
        if !dims.is_empty() {
            element
                .attributes
                .push(("ArrayDimensions", join_dimensions(&dims)));
        }
        let token = self.data_type_token(&data_type)?;
        element.attributes.push(("DataType", token));

        if export_value {
            let value = self.space.read_value(node)?;
            if !value.is_empty() {
                let mut encoder = ValueEncoder::new(self.space, self.types, self.namespaces);
                let encoded = encoder.encode(&data_type, &value)?;
                element.value = Some(encoded);
            }
        }
        Ok(())
    }

    fn event_notifier(&self, element: &mut UaNode) -> Result<(), SerializeError> {
        if let Some(notifier) = self.read_integer(AttributeId::EventNotifier)? {
            if notifier != 0 {
                element
                    .attributes
                    .push(("EventNotifier", notifier.to_string()));
            }
        }
        Ok(())
    }

    fn is_abstract(&self, element: &mut UaNode) -> Result<(), SerializeError> {
        if self.read_flag(AttributeId::IsAbstract)? {
            element.attributes.push(("IsAbstract", "true".to_string()));
        }
        Ok(())
    }

    fn access_level(
        &self,
        element: &mut UaNode,
        attribute: AttributeId,
        name: &'static str,
    ) -> Result<(), SerializeError> {
        if let Some(level) = self.read_integer(attribute)? {
            // 0 and CurrentRead (1) are the schema default.
            if level != 0 && level != 1 {
                element.attributes.push((name, level.to_string()));
            }
        }
        Ok(())
    }

    fn definition(&mut self, name: &str) -> Result<Option<Definition>, SerializeError> {
        let definition = match self.space.read_data_type_definition(self.node)? {
            Some(definition) => definition,
            None => return Ok(None),
        };
        let fields: Vec<DefinitionField> = match definition {
            DataTypeDefinition::Structure { fields } => fields
                .into_iter()
                .map(|field| -> Result<DefinitionField, SerializeError> {
                    let data_type = self.data_type_token(&field.data_type)?;
                    let mut attributes = vec![("DataType", data_type)];
                    if field.value_rank != -1 {
                        attributes.push(("ValueRank", field.value_rank.to_string()));
                    }
                    if !field.array_dimensions.is_empty() {
                        let dims = join_dimensions(&field.array_dimensions);
                        attributes.push(("ArrayDimensions", dims));
                    }
                    if field.is_optional {
                        attributes.push(("IsOptional", "true".to_string()));
                    }
                    Ok(DefinitionField {
                        name: field.name,
                        attributes,
                    })
                })
                .collect::<Result<_, _>>()?,
            DataTypeDefinition::Enumeration { fields } => fields
                .into_iter()
                .map(|field| DefinitionField {
                    name: field.name,
                    attributes: vec![("Value", field.value.to_string())],
                })
                .collect(),
        };
        Ok(Some(Definition {
            name: name.to_string(),
            fields,
        }))
    }

    /// Boolean attribute; absent means `false`.
    fn read_flag(&self, attribute: AttributeId) -> Result<bool, SerializeError> {
        match self.space.read_attribute(self.node, attribute)? {
            Variant::Empty => Ok(false),
            value => value
                .as_bool()
                .ok_or_else(|| ReadError::unexpected_value(self.node, attribute).into()),
        }
    }

    fn read_integer(&self, attribute: AttributeId) -> Result<Option<i64>, SerializeError> {
        match self.space.read_attribute(self.node, attribute)? {
            Variant::Empty => Ok(None),
            value => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| ReadError::unexpected_value(self.node, attribute).into()),
        }
    }

    fn read_number(&self, attribute: AttributeId) -> Result<Option<f64>, SerializeError> {
        match self.space.read_attribute(self.node, attribute)? {
            Variant::Empty => Ok(None),
            value => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| ReadError::unexpected_value(self.node, attribute).into()),
        }
    }
}

fn join_dimensions(dims: &[u32]) -> String {
    dims.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
