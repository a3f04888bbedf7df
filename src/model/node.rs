//! Graph nodes: the three kinds of term that can appear in a statement.

use std::fmt;

use serde::{Deserialize, Serialize};
use super::Uri;

/// A literal's lexical form plus its optional datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<Uri>,
}

impl Literal {
    pub fn new(value: impl Into<String>, datatype: Option<Uri>) -> Self {
        Self { value: value.into(), datatype }
    }
}

/// A node in an RDF graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Node {
    /// A resource named by a URI.
    Reference(Uri),
    /// A resource with a graph-local identifier (no `_:` prefix).
    Blank(String),
    Literal(Literal),
}

impl Node {
    pub fn reference(uri: impl Into<Uri>) -> Self {
        Node::Reference(uri.into())
    }

    pub fn blank(id: impl Into<String>) -> Self {
        Node::Blank(id.into())
    }

    pub fn literal(value: impl Into<String>, datatype: Option<Uri>) -> Self {
        Node::Literal(Literal::new(value, datatype))
    }

    pub fn is_reference(&self) -> bool { matches!(self, Node::Reference(_)) }
    pub fn is_blank(&self) -> bool { matches!(self, Node::Blank(_)) }
    pub fn is_literal(&self) -> bool { matches!(self, Node::Literal(_)) }

    /// Reference and blank nodes both denote resources and may be subjects.
    pub fn is_resource(&self) -> bool {
        !self.is_literal()
    }

    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            Node::Reference(uri) => Some(uri),
            _ => None,
        }
    }

    pub fn as_blank(&self) -> Option<&str> {
        match self {
            Node::Blank(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// The bare text of the node: URI, blank identifier or lexical form.
    pub fn lexical(&self) -> &str {
        match self {
            Node::Reference(uri) => uri.as_str(),
            Node::Blank(id) => id,
            Node::Literal(lit) => &lit.value,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Reference(uri) => write!(f, "<{uri}>"),
            Node::Blank(id) => write!(f, "_:{id}"),
            Node::Literal(Literal { value, datatype: None }) => write!(f, "{value:?}"),
            Node::Literal(Literal { value, datatype: Some(dt) }) => write!(f, "{value:?}^^<{dt}>"),
        }
    }
}

impl From<Uri> for Node {
    fn from(uri: Uri) -> Self {
        Node::Reference(uri)
    }
}
