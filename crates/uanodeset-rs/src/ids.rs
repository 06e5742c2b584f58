// crates/uanodeset-rs/src/ids.rs
//! Well-known numeric identifiers of the standard namespace (index 0).
//!
//! Only the ids the exporter needs are listed: the root folders, the
//! reference type hierarchy, and the data types with a symbolic alias.

// --- Folders ---
pub const ROOT_FOLDER: u32 = 84;
pub const OBJECTS_FOLDER: u32 = 85;
pub const TYPES_FOLDER: u32 = 86;
pub const VIEWS_FOLDER: u32 = 87;
pub const DATA_TYPES_FOLDER: u32 = 90;
pub const REFERENCE_TYPES_FOLDER: u32 = 91;
pub const FOLDER_TYPE: u32 = 61;

// --- Reference types ---
pub const REFERENCES: u32 = 31;
pub const NON_HIERARCHICAL_REFERENCES: u32 = 32;
pub const HIERARCHICAL_REFERENCES: u32 = 33;
pub const HAS_CHILD: u32 = 34;
pub const ORGANIZES: u32 = 35;
pub const HAS_EVENT_SOURCE: u32 = 36;
pub const HAS_MODELLING_RULE: u32 = 37;
pub const HAS_ENCODING: u32 = 38;
pub const HAS_DESCRIPTION: u32 = 39;
pub const HAS_TYPE_DEFINITION: u32 = 40;
pub const GENERATES_EVENT: u32 = 41;
pub const AGGREGATES: u32 = 44;
pub const HAS_SUBTYPE: u32 = 45;
pub const HAS_PROPERTY: u32 = 46;
pub const HAS_COMPONENT: u32 = 47;
pub const HAS_NOTIFIER: u32 = 48;
pub const HAS_ORDERED_COMPONENT: u32 = 49;

// --- Data types (builtin ids 1..=25 plus the abstract ones) ---
pub const BOOLEAN: u32 = 1;
pub const SBYTE: u32 = 2;
pub const BYTE: u32 = 3;
pub const INT16: u32 = 4;
pub const UINT16: u32 = 5;
pub const INT32: u32 = 6;
pub const UINT32: u32 = 7;
pub const INT64: u32 = 8;
pub const UINT64: u32 = 9;
pub const FLOAT: u32 = 10;
pub const DOUBLE: u32 = 11;
pub const STRING: u32 = 12;
pub const DATE_TIME: u32 = 13;
pub const GUID: u32 = 14;
pub const BYTE_STRING: u32 = 15;
pub const XML_ELEMENT: u32 = 16;
pub const NODE_ID: u32 = 17;
pub const EXPANDED_NODE_ID: u32 = 18;
pub const STATUS_CODE: u32 = 19;
pub const QUALIFIED_NAME: u32 = 20;
pub const LOCALIZED_TEXT: u32 = 21;
pub const STRUCTURE: u32 = 22;
pub const DATA_VALUE: u32 = 23;
pub const BASE_DATA_TYPE: u32 = 24;
pub const DIAGNOSTIC_INFO: u32 = 25;
pub const NUMBER: u32 = 26;
pub const INTEGER: u32 = 27;
pub const UINTEGER: u32 = 28;
pub const ENUMERATION: u32 = 29;
pub const DURATION: u32 = 290;
pub const UTC_TIME: u32 = 294;
pub const LOCALE_ID: u32 = 295;

/// Highest id that is a scalar builtin encoding (`LocalizedText`).
pub const LAST_SCALAR_BUILTIN: u32 = LOCALIZED_TEXT;

/// Highest id, within namespace 0, at which base-type resolution stops.
pub const LAST_BASE_TYPE: u32 = ENUMERATION;

/// Returns the symbolic name of a standard reference type or data type.
pub fn standard_name(id: u32) -> Option<&'static str> {
    let name = match id {
        BOOLEAN => "Boolean",
        SBYTE => "SByte",
        BYTE => "Byte",
        INT16 => "Int16",
        UINT16 => "UInt16",
        INT32 => "Int32",
        UINT32 => "UInt32",
        INT64 => "Int64",
        UINT64 => "UInt64",
        FLOAT => "Float",
        DOUBLE => "Double",
        STRING => "String",
        DATE_TIME => "DateTime",
        GUID => "Guid",
        BYTE_STRING => "ByteString",
        XML_ELEMENT => "XmlElement",
        NODE_ID => "NodeId",
        EXPANDED_NODE_ID => "ExpandedNodeId",
        STATUS_CODE => "StatusCode",
        QUALIFIED_NAME => "QualifiedName",
        LOCALIZED_TEXT => "LocalizedText",
        STRUCTURE => "Structure",
        DATA_VALUE => "DataValue",
        BASE_DATA_TYPE => "BaseDataType",
        DIAGNOSTIC_INFO => "DiagnosticInfo",
        NUMBER => "Number",
        INTEGER => "Integer",
        UINTEGER => "UInteger",
        ENUMERATION => "Enumeration",
        DURATION => "Duration",
        UTC_TIME => "UtcTime",
        LOCALE_ID => "LocaleId",
        REFERENCES => "References",
        NON_HIERARCHICAL_REFERENCES => "NonHierarchicalReferences",
        HIERARCHICAL_REFERENCES => "HierarchicalReferences",
        HAS_CHILD => "HasChild",
        ORGANIZES => "Organizes",
        HAS_EVENT_SOURCE => "HasEventSource",
        HAS_MODELLING_RULE => "HasModellingRule",
        HAS_ENCODING => "HasEncoding",
        HAS_DESCRIPTION => "HasDescription",
        HAS_TYPE_DEFINITION => "HasTypeDefinition",
        GENERATES_EVENT => "GeneratesEvent",
        AGGREGATES => "Aggregates",
        HAS_SUBTYPE => "HasSubtype",
        HAS_PROPERTY => "HasProperty",
        HAS_COMPONENT => "HasComponent",
        HAS_NOTIFIER => "HasNotifier",
        HAS_ORDERED_COMPONENT => "HasOrderedComponent",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_names() {
        assert_eq!(standard_name(HAS_COMPONENT), Some("HasComponent"));
        assert_eq!(standard_name(INT32), Some("Int32"));
        assert_eq!(standard_name(ROOT_FOLDER), None);
    }
}
