// crates/uanodeset-rs/src/typedesc.rs

//! Per-run cache of data type facts needed to serialize values.
//!
//! Structured values are written member by member in the order their type
//! declares. Instead of inspecting values at runtime, the exporter resolves
//! each structured type once into a `StructDescriptor` and reuses it for every
//! value of that type. Base-type resolution (walking `HasSubtype` up to a
//! standard type) is cached the same way.

use crate::error::SerializeError;
use crate::ids;
use crate::session::AddressSpace;
use crate::types::{DataTypeDefinition, NodeId};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Member names that describe the wire encoding rather than data.
const ENCODING_MEMBERS: &[&str] = &["Encoding"];

/// One member of a structured type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    pub data_type: NodeId,
    pub is_optional: bool,
}

/// The ordered member list of a structured type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDescriptor {
    /// Browse name of the type, used as the body element name.
    pub name: String,
    pub members: Vec<MemberDescriptor>,
}

#[derive(Debug, Default)]
pub struct TypeTable {
    structs: HashMap<NodeId, Rc<StructDescriptor>>,
    base_types: HashMap<NodeId, NodeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the member list of a structured type, reading it on first use.
    pub fn structure<S: AddressSpace>(
        &mut self,
        space: &S,
        type_id: &NodeId,
    ) -> Result<Rc<StructDescriptor>, SerializeError> {
        if let Some(desc) = self.structs.get(type_id) {
            return Ok(Rc::clone(desc));
        }

        let fields = match space.read_data_type_definition(type_id)? {
            Some(DataTypeDefinition::Structure { fields }) => fields,
            _ => return Err(SerializeError::MissingDefinition(type_id.clone())),
        };
        let name = space.read_browse_name(type_id)?.name;

        let members = fields
            .into_iter()
            .filter(|f| !ENCODING_MEMBERS.contains(&f.name.as_str()))
            .map(|f| MemberDescriptor {
                name: f.name,
                data_type: f.data_type,
                is_optional: f.is_optional,
            })
            .collect();

        let desc = Rc::new(StructDescriptor { name, members });
        self.structs.insert(type_id.clone(), Rc::clone(&desc));
        Ok(desc)
    }

    /// Resolves a data type to the first standard base type on its
    /// super-type chain (a namespace 0 id up to `Enumeration`).
    pub fn base_type<S: AddressSpace>(
        &mut self,
        space: &S,
        data_type: &NodeId,
    ) -> Result<NodeId, SerializeError> {
        if let Some(base) = self.base_types.get(data_type) {
            return Ok(base.clone());
        }

        let mut seen = HashSet::new();
        let mut current = data_type.clone();
        let base = loop {
            if is_base_type(&current) {
                break current;
            }
            if !seen.insert(current.clone()) {
                return Err(SerializeError::UnresolvedBaseType(data_type.clone()));
            }
            match space.super_type(&current)? {
                Some(parent) => current = parent,
                None => return Err(SerializeError::UnresolvedBaseType(data_type.clone())),
            }
        };

        self.base_types.insert(data_type.clone(), base.clone());
        Ok(base)
    }

    /// Number of structured types resolved so far.
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}

fn is_base_type(id: &NodeId) -> bool {
    matches!(id.standard_id(), Some(i) if (1..=ids::LAST_BASE_TYPE).contains(&i))
}
