// crates/uanodeset-rs/src/serializer/value.rs

//! `uax:` encodings of Variable values.

use crate::error::SerializeError;
use crate::ids;
use crate::model::Element;
use crate::namespace::NamespaceMap;
use crate::session::AddressSpace;
use crate::typedesc::{MemberDescriptor, StructDescriptor, TypeTable};
use crate::types::NodeId;
use crate::value::{ExtensionObject, Variant};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::SecondsFormat;

/// How a value of a declared data type is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    /// One of the scalar builtin types, by id.
    Builtin(u32),
    /// `uax:ExtensionObject` with a typed body.
    Structure,
    /// An abstract declared type with nothing to infer the encoding from.
    Abstract,
}

pub(super) struct ValueEncoder<'a, S: AddressSpace> {
    space: &'a S,
    types: &'a mut TypeTable,
    namespaces: &'a NamespaceMap,
}

impl<'a, S: AddressSpace> ValueEncoder<'a, S> {
    pub(super) fn new(
        space: &'a S,
        types: &'a mut TypeTable,
        namespaces: &'a NamespaceMap,
    ) -> Self {
        Self {
            space,
            types,
            namespaces,
        }
    }

    /// Encodes a non-empty value; the result is the single child of `<Value>`.
    pub(super) fn encode(
        &mut self,
        data_type: &NodeId,
        value: &Variant,
    ) -> Result<Element, SerializeError> {
        self.typed(data_type, value)
    }

    fn typed(&mut self, data_type: &NodeId, value: &Variant) -> Result<Element, SerializeError> {
        if let Variant::Array(items) = value {
            let encoding = self.encoding(data_type, items.first())?;
            let mut list = Element::new(format!("uax:ListOf{}", type_name(encoding)));
            for item in items {
                list.children.push(self.typed(data_type, item)?);
            }
            return Ok(list);
        }

        match self.encoding(data_type, Some(value))? {
            Encoding::Builtin(id) => {
                let mut element = Element::new(format!("uax:{}", type_name(Encoding::Builtin(id))));
                self.content(&mut element, id, data_type, value)?;
                Ok(element)
            }
            Encoding::Structure => self.extension_object(data_type, value),
            Encoding::Abstract => Err(mismatch(data_type, value)),
        }
    }

    /// Resolves the encoding of `data_type`, falling back to the value's own
    /// builtin type when the declared base type is abstract.
    fn encoding(
        &mut self,
        data_type: &NodeId,
        value: Option<&Variant>,
    ) -> Result<Encoding, SerializeError> {
        let base = self.types.base_type(self.space, data_type)?;
        match base.standard_id() {
            Some(id @ ids::BOOLEAN..=ids::LAST_SCALAR_BUILTIN) => return Ok(Encoding::Builtin(id)),
            Some(ids::ENUMERATION) => return Ok(Encoding::Builtin(ids::INT32)),
            Some(ids::STRUCTURE) => return Ok(Encoding::Structure),
            _ => {}
        }
        Ok(match value.and_then(Variant::builtin_type) {
            Some(ids::STRUCTURE) => Encoding::Structure,
            Some(id) => Encoding::Builtin(id),
            None => Encoding::Abstract,
        })
    }

    /// Writes a scalar of builtin type `builtin` into `element`.
    fn content(
        &self,
        element: &mut Element,
        builtin: u32,
        data_type: &NodeId,
        value: &Variant,
    ) -> Result<(), SerializeError> {
        if !compatible(builtin, value) {
            return Err(mismatch(data_type, value));
        }
        match value {
            Variant::Guid(guid) => element
                .children
                .push(Element::with_text("uax:String", guid.hyphenated().to_string())),
            Variant::NodeId(id) | Variant::ExpandedNodeId(id) => {
                let rendered = self.namespaces.node_id(id)?;
                element
                    .children
                    .push(Element::with_text("uax:Identifier", rendered));
            }
            Variant::StatusCode(code) => element
                .children
                .push(Element::with_text("uax:Code", code.to_string())),
            Variant::QualifiedName(name) => {
                let index = self.namespaces.document_index(name.namespace)?;
                element
                    .children
                    .push(Element::with_text("uax:NamespaceIndex", index.to_string()));
                element
                    .children
                    .push(Element::with_text("uax:Name", name.name.clone()));
            }
            Variant::LocalizedText(text) => {
                if let Some(locale) = &text.locale {
                    element
                        .children
                        .push(Element::with_text("uax:Locale", locale.clone()));
                }
                element
                    .children
                    .push(Element::with_text("uax:Text", text.text.clone()));
            }
            other => element.text = scalar_text(other),
        }
        Ok(())
    }

    fn extension_object(
        &mut self,
        data_type: &NodeId,
        value: &Variant,
    ) -> Result<Element, SerializeError> {
        let Variant::ExtensionObject(object) = value else {
            return Err(mismatch(data_type, value));
        };
        let desc = self.types.structure(self.space, &object.type_id)?;

        let mut type_id = Element::new("uax:TypeId");
        type_id.children.push(Element::with_text(
            "uax:Identifier",
            self.namespaces.node_id(&object.type_id)?,
        ));

        let mut content = Element::new(format!("uax:{}", desc.name));
        self.members(&mut content, object, &desc)?;
        let mut body = Element::new("uax:Body");
        body.children.push(content);

        let mut element = Element::new("uax:ExtensionObject");
        element.children = vec![type_id, body];
        Ok(element)
    }

    /// Appends one `uax:<Member>` element per declared member, in declaration order.
    fn members(
        &mut self,
        parent: &mut Element,
        object: &ExtensionObject,
        desc: &StructDescriptor,
    ) -> Result<(), SerializeError> {
        for member in &desc.members {
            match object.fields.get(&member.name) {
                Some(value) => parent.children.push(self.member(member, value)?),
                None if member.is_optional => {}
                None => {
                    return Err(SerializeError::MissingMember {
                        type_id: object.type_id.clone(),
                        member: member.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn member(
        &mut self,
        member: &MemberDescriptor,
        value: &Variant,
    ) -> Result<Element, SerializeError> {
        let mut element = Element::new(format!("uax:{}", member.name));
        match value {
            Variant::Empty => {}
            Variant::Array(items) => {
                for item in items {
                    element.children.push(self.typed(&member.data_type, item)?);
                }
            }
            _ => match self.encoding(&member.data_type, Some(value))? {
                Encoding::Builtin(id) => self.content(&mut element, id, &member.data_type, value)?,
                Encoding::Structure => {
                    // Nested structures are inlined without an ExtensionObject wrapper.
                    let Variant::ExtensionObject(inner) = value else {
                        return Err(mismatch(&member.data_type, value));
                    };
                    let desc = self.types.structure(self.space, &inner.type_id)?;
                    self.members(&mut element, inner, &desc)?;
                }
                Encoding::Abstract => return Err(mismatch(&member.data_type, value)),
            },
        }
        Ok(element)
    }
}

fn type_name(encoding: Encoding) -> &'static str {
    match encoding {
        Encoding::Builtin(id) => ids::standard_name(id).unwrap_or("Variant"),
        Encoding::Structure => "ExtensionObject",
        Encoding::Abstract => "Variant",
    }
}

fn is_numeric(id: u32) -> bool {
    (ids::SBYTE..=ids::DOUBLE).contains(&id)
}

fn compatible(builtin: u32, value: &Variant) -> bool {
    match value.builtin_type() {
        Some(found) if found == builtin => true,
        Some(found) => is_numeric(found) && is_numeric(builtin),
        None => false,
    }
}

fn mismatch(data_type: &NodeId, value: &Variant) -> SerializeError {
    SerializeError::TypeMismatch {
        data_type: data_type.clone(),
        found: variant_name(value),
    }
}

fn variant_name(value: &Variant) -> &'static str {
    match value {
        Variant::Empty => "Empty",
        Variant::Array(_) => "Array",
        other => other
            .builtin_type()
            .and_then(ids::standard_name)
            .map(|name| if name == "Structure" { "ExtensionObject" } else { name })
            .unwrap_or("Unknown"),
    }
}

/// Text of a scalar whose encoding is plain element content.
fn scalar_text(value: &Variant) -> Option<String> {
    let text = match value {
        Variant::Boolean(v) => v.to_string(),
        Variant::SByte(v) => v.to_string(),
        Variant::Byte(v) => v.to_string(),
        Variant::Int16(v) => v.to_string(),
        Variant::UInt16(v) => v.to_string(),
        Variant::Int32(v) => v.to_string(),
        Variant::UInt32(v) => v.to_string(),
        Variant::Int64(v) => v.to_string(),
        Variant::UInt64(v) => v.to_string(),
        Variant::Float(v) => float_text(*v),
        Variant::Double(v) => double_text(*v),
        Variant::String(v) | Variant::XmlElement(v) => v.clone(),
        Variant::DateTime(v) => v.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        Variant::ByteString(v) => BASE64.encode(v),
        _ => return None,
    };
    Some(text)
}

fn float_text(v: f32) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        String::from(if v > 0.0 { "INF" } else { "-INF" })
    } else {
        v.to_string()
    }
}

/// XML Schema `double` lexical form.
pub(super) fn double_text(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        String::from(if v > 0.0 { "INF" } else { "-INF" })
    } else {
        v.to_string()
    }
}
