// src/lib.rs

#![doc = "Crawls an OPC UA address space and exports nodes as NodeSet2 XML."]
#![doc = ""]
#![doc = "The library is transport agnostic: it consumes any `AddressSpace`"]
#![doc = "implementation and provides:"]
#![doc = "- `traverse`: cycle-safe depth-first collection of the hierarchy below Root."]
#![doc = "- `tally`: per-namespace, per-class node statistics."]
#![doc = "- `ExportPipeline`: namespace filtering, node serialization and file output."]
#![doc = ""]
#![doc = "`MemoryAddressSpace` is an in-memory implementation loadable from JSON snapshots."]

// --- Foundation Modules ---
pub mod error;
pub mod ids;
mod log;
pub mod types;
pub mod value;

// --- Client Capability ---
pub mod memory;
pub mod session;

// --- Export Stages ---
pub mod config;
pub mod model;
pub mod namespace;
pub mod pipeline;
pub mod serializer;
pub mod stats;
pub mod typedesc;
pub mod walker;
pub mod writer;

// --- Top-level Exports ---
pub use config::{ExportOptions, UriPatch};
pub use error::{ConnectionError, ExportError, ReadError, SerializeError, SnapshotError};
pub use memory::{MemoryAddressSpace, MemoryNode, Snapshot, SnapshotConnector};
pub use namespace::{NamespaceMap, NamespaceRegistry};
pub use pipeline::{ExportPipeline, ExportReport, SkippedNode, apply_uri_patch};
pub use session::{AddressSpace, Connector, Credentials};
pub use stats::{Statistics, tally};
pub use types::{LocalizedText, NodeClass, NodeId, QualifiedName};
pub use value::{ExtensionObject, Variant};
pub use walker::{NoProgress, ProgressSink, Traversal, traverse};
pub use writer::write_nodeset;
