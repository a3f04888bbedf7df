//! PropertyMap: how one attribute is written as one predicate.

use std::fmt;
use std::sync::Arc;

use crate::model::{Uri, Value, ValueKind};
use crate::Result;

/// Signature of a user-supplied value converter.
pub type ConvertFn = dyn Fn(&Value) -> Result<Value> + Send + Sync;

/// A value converter applied on the way to or from the graph.
#[derive(Clone)]
pub enum Converter {
    /// The canonical reference extractor: a value's identity URI if it has
    /// one, otherwise its text taken as a URI.
    ///
    /// Using it as `to_wire` marks the attribute as holding references.
    ReferenceExtractor,
    Function {
        name: String,
        func: Arc<ConvertFn>,
    },
}

impl Converter {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Converter::Function { name: name.into(), func: Arc::new(func) }
    }

    pub fn reference_extractor() -> Self {
        Converter::ReferenceExtractor
    }

    pub fn is_reference_extractor(&self) -> bool {
        matches!(self, Converter::ReferenceExtractor)
    }

    pub fn name(&self) -> &str {
        match self {
            Converter::ReferenceExtractor => "reference_extractor",
            Converter::Function { name, .. } => name,
        }
    }

    pub fn apply(&self, value: &Value) -> Result<Value> {
        match self {
            Converter::ReferenceExtractor => Ok(extract_reference(value)),
            Converter::Function { func, .. } => func(value),
        }
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Converter({})", self.name())
    }
}

fn extract_reference(value: &Value) -> Value {
    let identity = match value.kind() {
        ValueKind::NestedResource(resource) => resource.uri(),
        ValueKind::ResourceReference(v) => v.as_uri().cloned(),
        ValueKind::Opaque(_) => None,
    };
    Value::Uri(identity.unwrap_or_else(|| Uri::new(value.lexical())))
}

/// Details of how to map an attribute's values to and from statements.
///
/// Immutable once built; the builder methods consume and return `self`.
#[derive(Debug, Clone)]
pub struct PropertyMap {
    property: Uri,
    datatype: Option<Uri>,
    to_wire: Option<Converter>,
    from_wire: Option<Converter>,
    subelement: bool,
    functional: bool,
}

impl PropertyMap {
    pub fn new(property: impl Into<Uri>) -> Self {
        Self {
            property: property.into(),
            datatype: None,
            to_wire: None,
            from_wire: None,
            subelement: false,
            functional: true,
        }
    }

    /// Datatype given to literal objects.
    pub fn with_datatype(mut self, datatype: impl Into<Uri>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    pub fn with_to_wire(mut self, converter: Converter) -> Self {
        self.to_wire = Some(converter);
        self
    }

    pub fn with_from_wire(mut self, converter: Converter) -> Self {
        self.from_wire = Some(converter);
        self
    }

    /// Shorthand for `with_to_wire(Converter::reference_extractor())`.
    pub fn reference(self) -> Self {
        self.with_to_wire(Converter::ReferenceExtractor)
    }

    /// When set, nested objects held by the attribute are written out in
    /// full after the statement that references them.
    pub fn with_subelement(mut self, subelement: bool) -> Self {
        self.subelement = subelement;
        self
    }

    /// Clear to allow the attribute to hold several values.
    pub fn with_functional(mut self, functional: bool) -> Self {
        self.functional = functional;
        self
    }

    pub fn property(&self) -> &Uri { &self.property }
    pub fn datatype(&self) -> Option<&Uri> { self.datatype.as_ref() }
    pub fn to_wire(&self) -> Option<&Converter> { self.to_wire.as_ref() }
    pub fn from_wire(&self) -> Option<&Converter> { self.from_wire.as_ref() }
    pub fn subelement(&self) -> bool { self.subelement }
    pub fn functional(&self) -> bool { self.functional }

    /// True when a nested object should be written as a reference: no
    /// custom `to_wire`, or the reference extractor.
    pub fn references_resources(&self) -> bool {
        self.to_wire.as_ref().is_none_or(Converter::is_reference_extractor)
    }
}
