//! Namespaces and the fixed tables the codec consults.

use crate::model::Uri;

/// URI schemes whose literal text is taken to be a reference.
pub const URI_SCHEMES: [&str; 2] = ["http", "file"];

/// A URI namespace: terms are formed by appending a local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace {
    base: &'static str,
}

impl Namespace {
    pub const fn new(base: &'static str) -> Self {
        Self { base }
    }

    pub const fn base(&self) -> &'static str {
        self.base
    }

    pub fn term(&self, local: &str) -> Uri {
        Uri::new(format!("{}{local}", self.base))
    }

    pub fn contains(&self, uri: &Uri) -> bool {
        uri.as_str().starts_with(self.base)
    }
}

pub const XSD: Namespace = Namespace::new("http://www.w3.org/2001/XMLSchema#");
pub const RDF: Namespace = Namespace::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#");
pub const RDFS: Namespace = Namespace::new("http://www.w3.org/2000/01/rdf-schema#");
pub const DCT: Namespace = Namespace::new("http://purl.org/dc/terms/");

// ============================================================================
// Datatype table
// ============================================================================

/// Native kind a typed literal is cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatatypeKind {
    Integer,
    Float,
}

/// Cast kind for an XSD numeric datatype. `None` means keep the text.
pub fn datatype_kind(datatype: &Uri) -> Option<DatatypeKind> {
    let local = datatype.strip_namespace(XSD.base())?;
    match local {
        "float" | "double" => Some(DatatypeKind::Float),
        "integer" | "long" | "int" | "short" | "byte"
        | "nonPositiveInteger" | "nonNegativeInteger"
        | "positiveInteger" | "negativeInteger"
        | "unsignedLong" | "unsignedInt" | "unsignedShort" | "unsignedByte" => {
            Some(DatatypeKind::Integer)
        }
        _ => None,
    }
}
