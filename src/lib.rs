//! # rdf-mapping: Object Attributes ⇄ RDF Statements
//!
//! Declare, per type, how each attribute corresponds to an RDF property, then
//! turn objects into statements and statements back into attribute values.
//!
//! ## Design Principles
//!
//! 1. **Tables, not reflection**: a [`Mapping`] is an explicit registry built
//!    once per type hierarchy and shared read-only afterwards
//! 2. **Scoped lookup**: entries are universal or tied to a metaclass; the
//!    metaclass-specific entry always wins
//! 3. **Derived reverse table**: rebuilt in full on every update, never edited
//! 4. **Lazy output**: [`StatementStream`] yields statements on demand and
//!    expands nested objects in place
//! 5. **No failures on data**: converter errors are logged and contained
//!
//! ## Quick Start
//!
//! ```rust
//! use rdf_mapping::{Mapping, Object, PropertyMap, Scope, Value, Node};
//! use rdf_mapping::vocab::DCT;
//!
//! let mut mapping = Mapping::new();
//! mapping.update(Scope::Universal, [
//!     ("description", PropertyMap::new(DCT.term("description"))),
//!     ("subject", PropertyMap::new(DCT.term("subject")).with_functional(false)),
//! ]);
//!
//! let rec = Object::new("http://example.org/uri1")
//!     .with_attribute("description", "Hello")
//!     .with_attribute("subject", vec!["subject", "in", "list"]);
//!
//! let statements: Vec<_> = mapping.statement_stream(&rec).collect();
//! assert_eq!(statements.len(), 4);
//!
//! let back = mapping.metadata(&Scope::Universal, &statements[0]);
//! assert_eq!(back.attribute.as_deref(), Some("description"));
//! assert_eq!(back.value, Value::from("Hello"));
//! assert_eq!(back.subject, Node::reference("http://example.org/uri1"));
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod mapping;
pub mod store;
pub mod vocab;
pub mod convert;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Uri, Node, Literal, Statement, Value, ValueKind,
    Resource, Object, AttributeMap,
};

// ============================================================================
// Re-exports: Mapping
// ============================================================================

pub use mapping::{
    Mapping, MappingConfig, Scope, PropertyMap, Converter, ReverseEntry,
    Resolved, StatementStream, make_node, make_value,
};

// ============================================================================
// Re-exports: Store
// ============================================================================

pub use store::{Graph, MemoryGraph};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Conversion error in '{converter}': {message}")]
    Conversion { converter: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
