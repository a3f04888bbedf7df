//! # Mapping Model
//!
//! The data that crosses the mapping boundary: URIs, graph nodes,
//! statements, native attribute values and the objects that hold them.
//!
//! This module is pure data: no I/O, no state, no tables.

pub mod uri;
pub mod node;
pub mod statement;
pub mod value;
pub mod object;

pub use uri::Uri;
pub use node::{Node, Literal};
pub use statement::Statement;
pub use value::{Value, ValueKind};
pub use object::{Resource, Object, AttributeMap, Metaclasses};
