// crates/uanodeset-rs/src/writer.rs

//! Renders a `NodeSet` document model into NodeSet2 XML text.
//!
//! The `uax:` value encodings use element names taken from data (type and
//! member names), so the document is emitted as a stream of `quick-xml`
//! events rather than through a serde model.

use crate::error::ExportError;
use crate::model::{
    Alias, Definition, Element, LocalizedElement, Model, NODESET_XMLNS, NodeSet, ReferenceElement,
    UAX_XMLNS, UaNode, XSD_XMLNS, XSI_XMLNS,
};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

type XmlWriter = Writer<Vec<u8>>;

/// Serializes a `NodeSet` into a UTF-8 NodeSet2 document.
///
/// # Arguments
/// * `nodeset` - The fully rendered document model.
///
/// # Returns
/// * `Result<String, ExportError>` - The indented XML text or a writing error.
pub fn write_nodeset(nodeset: &NodeSet) -> Result<String, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    // 1. Declaration and root element
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    let mut root = BytesStart::new("UANodeSet");
    root.push_attribute(("xmlns", NODESET_XMLNS));
    root.push_attribute(("xmlns:xsi", XSI_XMLNS));
    root.push_attribute(("xmlns:uax", UAX_XMLNS));
    root.push_attribute(("xmlns:xsd", XSD_XMLNS));
    writer.write_event(Event::Start(root))?;

    // 2. Header sections
    write_namespace_uris(&mut writer, &nodeset.namespace_uris)?;
    write_models(&mut writer, &nodeset.models)?;

    // 3. Nodes, in export order
    for node in &nodeset.nodes {
        write_node(&mut writer, node)?;
    }

    // 4. Aliases
    write_aliases(&mut writer, &nodeset.aliases)?;

    writer.write_event(Event::End(BytesEnd::new("UANodeSet")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_namespace_uris(writer: &mut XmlWriter, uris: &[String]) -> Result<(), ExportError> {
    if uris.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("NamespaceUris")))?;
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new("NamespaceUris")))?;
    for uri in uris {
        write_text_element(writer, BytesStart::new("Uri"), uri)?;
    }
    writer.write_event(Event::End(BytesEnd::new("NamespaceUris")))?;
    Ok(())
}

fn write_models(writer: &mut XmlWriter, models: &[Model]) -> Result<(), ExportError> {
    writer.write_event(Event::Start(BytesStart::new("Models")))?;
    for model in models {
        let mut start = BytesStart::new("Model");
        start.push_attribute(("ModelUri", model.model_uri.as_str()));
        if model.required_models.is_empty() {
            writer.write_event(Event::Empty(start))?;
            continue;
        }
        writer.write_event(Event::Start(start))?;
        for required in &model.required_models {
            let mut req = BytesStart::new("RequiredModel");
            req.push_attribute(("ModelUri", required.as_str()));
            writer.write_event(Event::Empty(req))?;
        }
        writer.write_event(Event::End(BytesEnd::new("Model")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("Models")))?;
    Ok(())
}

fn write_aliases(writer: &mut XmlWriter, aliases: &[Alias]) -> Result<(), ExportError> {
    if aliases.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("Aliases")))?;
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new("Aliases")))?;
    for alias in aliases {
        let mut start = BytesStart::new("Alias");
        start.push_attribute(("Alias", alias.alias.as_str()));
        write_text_element(writer, start, &alias.node_id)?;
    }
    writer.write_event(Event::End(BytesEnd::new("Aliases")))?;
    Ok(())
}

fn write_node(writer: &mut XmlWriter, node: &UaNode) -> Result<(), ExportError> {
    let tag = node.tag();
    let mut start = BytesStart::new(tag);
    start.push_attribute(("NodeId", node.node_id.as_str()));
    start.push_attribute(("BrowseName", node.browse_name.as_str()));
    if let Some(parent) = &node.parent_node_id {
        start.push_attribute(("ParentNodeId", parent.as_str()));
    }
    for (name, value) in &node.attributes {
        start.push_attribute((*name, value.as_str()));
    }
    writer.write_event(Event::Start(start))?;

    write_localized(writer, "DisplayName", &node.display_name)?;
    write_localized(writer, "Description", &node.description)?;
    write_references(writer, &node.references)?;
    if let Some(inverse) = &node.inverse_name {
        write_localized(writer, "InverseName", inverse)?;
    }
    if let Some(value) = &node.value {
        writer.write_event(Event::Start(BytesStart::new("Value")))?;
        write_element(writer, value)?;
        writer.write_event(Event::End(BytesEnd::new("Value")))?;
    }
    if let Some(definition) = &node.definition {
        write_definition(writer, definition)?;
    }

    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_localized(
    writer: &mut XmlWriter,
    name: &str,
    text: &LocalizedElement,
) -> Result<(), ExportError> {
    let mut start = BytesStart::new(name);
    if let Some(locale) = &text.locale {
        start.push_attribute(("Locale", locale.as_str()));
    }
    write_text_element(writer, start, &text.text)
}

fn write_references(
    writer: &mut XmlWriter,
    references: &[ReferenceElement],
) -> Result<(), ExportError> {
    if references.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("References")))?;
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new("References")))?;
    for reference in references {
        let mut start = BytesStart::new("Reference");
        start.push_attribute(("ReferenceType", reference.reference_type.as_str()));
        // Forward is the schema default and is left implicit.
        if !reference.is_forward {
            start.push_attribute(("IsForward", "false"));
        }
        write_text_element(writer, start, &reference.target)?;
    }
    writer.write_event(Event::End(BytesEnd::new("References")))?;
    Ok(())
}

fn write_definition(writer: &mut XmlWriter, definition: &Definition) -> Result<(), ExportError> {
    let mut start = BytesStart::new("Definition");
    start.push_attribute(("Name", definition.name.as_str()));
    if definition.fields.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(start))?;
    for field in &definition.fields {
        let mut el = BytesStart::new("Field");
        el.push_attribute(("Name", field.name.as_str()));
        for (name, value) in &field.attributes {
            el.push_attribute((*name, value.as_str()));
        }
        writer.write_event(Event::Empty(el))?;
    }
    writer.write_event(Event::End(BytesEnd::new("Definition")))?;
    Ok(())
}

/// Writes a `uax:` element tree depth-first.
fn write_element(writer: &mut XmlWriter, element: &Element) -> Result<(), ExportError> {
    if element.children.is_empty() {
        let text = element.text.as_deref().unwrap_or_default();
        return write_text_element(writer, BytesStart::new(element.name.as_str()), text);
    }
    writer.write_event(Event::Start(BytesStart::new(element.name.as_str())))?;
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

/// `<name attrs>text</name>`, collapsed to `<name attrs/>` for empty text.
fn write_text_element(
    writer: &mut XmlWriter,
    start: BytesStart<'_>,
    text: &str,
) -> Result<(), ExportError> {
    if text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(end))?;
    Ok(())
}
