//! Mapped objects: the `Resource` contract and a plain in-memory `Object`.

use std::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use super::{Node, Uri, Value};

/// Attribute name → value.
pub type AttributeMap = HashMap<String, Value>;

/// Metaclass chain, most-derived first. Most types sit one or two levels deep.
pub type Metaclasses = SmallVec<[Uri; 4]>;

/// What the mapping engine needs to know about an object.
///
/// The engine only reads through this trait; it never mutates a resource.
pub trait Resource: fmt::Debug + Send + Sync {
    /// The node used as subject of the object's statements, if the object
    /// has been given an identity.
    fn node(&self) -> Option<Node>;

    /// Identity URI. Defaults to the subject node when it is a reference.
    fn uri(&self) -> Option<Uri> {
        match self.node() {
            Some(Node::Reference(uri)) => Some(uri),
            _ => None,
        }
    }

    /// Declared metaclasses, most-derived first.
    fn metaclasses(&self) -> &[Uri];

    /// The most-derived metaclass.
    fn metaclass(&self) -> Option<&Uri> {
        self.metaclasses().first()
    }

    /// A directly declared attribute.
    fn attribute(&self, name: &str) -> Option<&Value>;

    /// A dynamically named value from the object's metadata extension map.
    fn extension(&self, name: &str) -> Option<&Value>;
}

/// A general-purpose mapped object.
///
/// Holds direct attributes and an open-ended metadata map side by side, the
/// same split the statement stream reads from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    pub subject: Option<Node>,
    pub metaclasses: Metaclasses,
    pub attributes: AttributeMap,
    pub metadata: AttributeMap,
}

impl Object {
    /// An object identified by `uri`.
    pub fn new(uri: impl Into<Uri>) -> Self {
        Self::with_subject(Node::Reference(uri.into()))
    }

    pub fn with_subject(subject: Node) -> Self {
        Self { subject: Some(subject), ..Self::default() }
    }

    /// An object with no identity yet. It produces no statements.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Append a metaclass. Call from most-derived to least-derived.
    pub fn with_metaclass(mut self, metaclass: impl Into<Uri>) -> Self {
        self.metaclasses.push(metaclass.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Add `value` to a multi-valued attribute, turning a single existing
    /// value into a list.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        push_value(&mut self.attributes, name.into(), value);
    }

    /// Same as [`Object::push`] for the metadata map.
    pub fn push_metadata(&mut self, name: impl Into<String>, value: Value) {
        push_value(&mut self.metadata, name.into(), value);
    }
}

fn push_value(map: &mut AttributeMap, name: String, value: Value) {
    match map.get_mut(&name) {
        Some(Value::List(items)) => items.push(value),
        Some(existing) if !existing.is_null() => {
            let first = std::mem::replace(existing, Value::Null);
            *existing = Value::List(vec![first, value]);
        }
        _ => {
            map.insert(name, Value::List(vec![value]));
        }
    }
}

impl Resource for Object {
    fn node(&self) -> Option<Node> {
        self.subject.clone()
    }

    fn metaclasses(&self) -> &[Uri] {
        &self.metaclasses
    }

    fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    fn extension(&self, name: &str) -> Option<&Value> {
        self.metadata.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let obj = Object::new("http://example.org/rec/1")
            .with_metaclass("http://example.org/onto#Recording")
            .with_attribute("label", "first")
            .with_metadata("note", "extra");

        assert_eq!(obj.uri(), Some(Uri::new("http://example.org/rec/1")));
        assert_eq!(obj.metaclass().map(Uri::as_str), Some("http://example.org/onto#Recording"));
        assert_eq!(obj.attribute("label"), Some(&Value::from("first")));
        assert_eq!(obj.extension("note"), Some(&Value::from("extra")));
        assert_eq!(obj.attribute("note"), None);
    }

    #[test]
    fn test_blank_subject_has_no_uri() {
        let obj = Object::with_subject(Node::blank("b7"));
        assert_eq!(obj.node(), Some(Node::blank("b7")));
        assert_eq!(obj.uri(), None);
        assert_eq!(Object::anonymous().node(), None);
    }

    #[test]
    fn test_push_builds_list() {
        let mut obj = Object::new("http://example.org/a");
        obj.push("tag", Value::from("x"));
        assert_eq!(obj.get("tag"), Some(&Value::from(vec!["x"])));
        obj.push("tag", Value::from("y"));
        assert_eq!(obj.get("tag"), Some(&Value::from(vec!["x", "y"])));

        obj.set("single", "a");
        obj.push("single", Value::from("b"));
        assert_eq!(obj.get("single"), Some(&Value::from(vec!["a", "b"])));
    }
}
