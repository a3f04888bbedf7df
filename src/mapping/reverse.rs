//! Reverse resolution: statements back to attribute values.

use tracing::debug;

use crate::model::{Node, Object, Resource, Statement, Uri, Value};
use crate::store::Graph;
use super::{codec, Mapping, ReverseEntry, Scope};

/// A statement translated through the reverse table.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The statement's subject.
    pub subject: Node,
    /// Attribute the predicate maps to; `None` when nothing maps it.
    pub attribute: Option<String>,
    /// The decoded object.
    pub value: Value,
    /// Whether the attribute holds a single value; `None` when unmapped.
    pub functional: Option<bool>,
}

impl Resolved {
    pub fn is_mapped(&self) -> bool {
        self.attribute.is_some()
    }
}

impl Mapping {
    /// Translate `statement` for an object in `scope`.
    ///
    /// An unmapped predicate is not an error: the object is decoded without
    /// datatype or converter and `attribute`/`functional` are `None`, leaving
    /// the caller to drop it or keep it as opaque metadata.
    pub fn metadata(&self, scope: &Scope, statement: &Statement) -> Resolved {
        resolve(self.reverse_entry(scope, &statement.predicate), statement)
    }

    /// Translate `statement` for an object declaring `metaclasses`
    /// (most-derived first), trying each metaclass before the universal
    /// entries. This agrees with what the statement stream writes for the
    /// same object.
    pub fn metadata_for(&self, metaclasses: &[Uri], statement: &Statement) -> Resolved {
        resolve(self.effective_reverse_entry(metaclasses, &statement.predicate), statement)
    }

    /// Look up the value of `attribute` for `resource` directly in `graph`.
    ///
    /// `None` when the attribute is not mapped for any of the resource's
    /// metaclasses (or universally), the resource has no subject node, or
    /// the graph has no matching statement.
    pub fn get_value_from_graph<G>(&self, resource: &dyn Resource, attribute: &str, graph: &G) -> Option<Value>
    where
        G: Graph + ?Sized,
    {
        let map = self.effective_property_map(resource.metaclasses(), attribute)?;
        let subject = resource.node()?;
        let object = graph.get_object(&subject, map.property())?;
        Some(codec::make_value(Some(&object), map.datatype(), map.from_wire()))
    }

    /// Build an object from statements about `subject`.
    ///
    /// Functional attributes are set, others collect into lists. Statements
    /// whose predicate is unmapped are kept in the object's metadata map
    /// under the predicate URI. Statements about other subjects are skipped.
    pub fn object_from_statements<I>(&self, subject: Node, metaclasses: &[Uri], statements: I) -> Object
    where
        I: IntoIterator<Item = Statement>,
    {
        let mut object = Object::with_subject(subject);
        object.metaclasses.extend(metaclasses.iter().cloned());

        for statement in statements {
            if Some(&statement.subject) != object.subject.as_ref() {
                continue;
            }
            let resolved = self.metadata_for(metaclasses, &statement);
            match (resolved.attribute, resolved.functional) {
                (Some(attribute), Some(true)) => object.set(attribute, resolved.value),
                (Some(attribute), _) => object.push(attribute, resolved.value),
                (None, _) => {
                    debug!(predicate = %statement.predicate, "no mapping for predicate, keeping as metadata");
                    object.push_metadata(statement.predicate.into_string(), resolved.value);
                }
            }
        }
        object
    }

    /// Build an object from everything `graph` says about `subject`.
    pub fn object_from_graph<G>(&self, subject: Node, metaclasses: &[Uri], graph: &G) -> Object
    where
        G: Graph + ?Sized,
    {
        let statements = graph.statements_about(&subject);
        self.object_from_statements(subject, metaclasses, statements)
    }
}

fn resolve(entry: Option<&ReverseEntry>, statement: &Statement) -> Resolved {
    let value = codec::make_value(
        Some(&statement.object),
        entry.and_then(|e| e.datatype.as_ref()),
        entry.and_then(|e| e.from_wire.as_ref()),
    );
    Resolved {
        subject: statement.subject.clone(),
        attribute: entry.map(|e| e.attribute.clone()),
        value,
        functional: entry.map(|e| e.functional),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::mapping::{Converter, PropertyMap};
    use crate::store::MemoryGraph;
    use crate::vocab::{DCT, XSD};
    use super::*;

    const REC: &str = "http://example.org/onto#Recording";

    fn mapping() -> Mapping {
        let mut m = Mapping::new();
        m.update(Scope::Universal, [
            ("description", PropertyMap::new(DCT.term("description"))),
            ("rate", PropertyMap::new("http://example.org/rate").with_datatype(XSD.term("double"))),
            ("tags", PropertyMap::new("http://example.org/tag").with_functional(false)),
        ]);
        m.update(Scope::metaclass(REC), [
            ("channels", PropertyMap::new("http://example.org/channels").with_datatype(XSD.term("integer"))),
        ]);
        m
    }

    fn st(predicate: &str, object: Node) -> Statement {
        Statement::new(Node::reference("http://example.org/r"), Uri::new(predicate), object)
    }

    #[test]
    fn test_metadata_decodes_with_datatype() {
        let r = mapping().metadata(&Scope::Universal, &st("http://example.org/rate", Node::literal("250.5", None)));
        assert_eq!(r.attribute.as_deref(), Some("rate"));
        assert_eq!(r.value, Value::Float(250.5));
        assert_eq!(r.functional, Some(true));
        assert_eq!(r.subject, Node::reference("http://example.org/r"));
    }

    #[test]
    fn test_metadata_falls_back_to_universal() {
        let r = mapping().metadata(&Scope::metaclass(REC), &st(DCT.term("description").as_str(), Node::literal("d", None)));
        assert_eq!(r.attribute.as_deref(), Some("description"));
    }

    #[test]
    fn test_metadata_scoped_only_for_its_metaclass() {
        let s = st("http://example.org/channels", Node::literal("4", None));
        assert_eq!(mapping().metadata(&Scope::metaclass(REC), &s).value, Value::Int(4));

        let other = mapping().metadata(&Scope::Universal, &s);
        assert!(!other.is_mapped());
        assert_eq!(other.value, Value::from("4"));
    }

    #[test]
    fn test_metadata_unmapped() {
        let r = mapping().metadata(&Scope::Universal, &st("http://example.org/unknown", Node::literal("x", None)));
        assert_eq!(r.attribute, None);
        assert_eq!(r.functional, None);
        assert_eq!(r.value, Value::from("x"));
    }

    #[test]
    fn test_metadata_from_wire() {
        let mut m = Mapping::new();
        let upper = Converter::new("upper", |v| Ok(Value::from(v.lexical().to_uppercase())));
        m.update(Scope::Universal, [("code", PropertyMap::new("http://example.org/code").with_from_wire(upper))]);
        let r = m.metadata(&Scope::Universal, &st("http://example.org/code", Node::literal("abc", None)));
        assert_eq!(r.value, Value::from("ABC"));
    }

    #[test]
    fn test_get_value_from_graph() {
        let graph = MemoryGraph::new();
        graph.insert(st("http://example.org/channels", Node::literal("8", None)));
        graph.insert(st(DCT.term("description").as_str(), Node::literal("EEG", None)));

        let rec = Object::new("http://example.org/r").with_metaclass(REC);
        let m = mapping();
        assert_eq!(m.get_value_from_graph(&rec, "channels", &graph), Some(Value::Int(8)));
        assert_eq!(m.get_value_from_graph(&rec, "description", &graph), Some(Value::from("EEG")));
        assert_eq!(m.get_value_from_graph(&rec, "rate", &graph), None);
        assert_eq!(m.get_value_from_graph(&rec, "unmapped", &graph), None);

        let plain = Object::new("http://example.org/r");
        assert_eq!(m.get_value_from_graph(&plain, "channels", &graph), None);
        assert_eq!(m.get_value_from_graph(&Object::anonymous(), "description", &graph), None);
    }

    #[test]
    fn test_object_from_statements() {
        let statements = vec![
            st(DCT.term("description").as_str(), Node::literal("first", None)),
            st("http://example.org/tag", Node::literal("a", None)),
            st("http://example.org/tag", Node::literal("b", None)),
            st("http://example.org/opaque", Node::reference("http://example.org/thing")),
            Statement::new(Node::reference("http://example.org/else"), DCT.term("description"), Node::literal("no", None)),
        ];
        let obj = mapping().object_from_statements(Node::reference("http://example.org/r"), &[], statements);

        assert_eq!(obj.get("description"), Some(&Value::from("first")));
        assert_eq!(obj.get("tags"), Some(&Value::from(vec!["a", "b"])));
        assert_eq!(
            obj.metadata.get("http://example.org/opaque"),
            Some(&Value::from(vec![Value::Uri(Uri::new("http://example.org/thing"))]))
        );
        assert_eq!(obj.attributes.len(), 2);
    }

    #[test]
    fn test_object_from_graph_round_trip() {
        let m = mapping();
        let original = Object::new("http://example.org/r")
            .with_metaclass(REC)
            .with_attribute("description", "A recording")
            .with_attribute("channels", 16)
            .with_attribute("tags", vec!["eeg", "sleep"]);

        let mut graph = MemoryGraph::new();
        assert_eq!(m.save_to_graph(&original, &mut graph), 4);

        let loaded = m.object_from_graph(Node::reference("http://example.org/r"), &[Uri::new(REC)], &graph);
        assert_eq!(loaded.get("description"), original.get("description"));
        assert_eq!(loaded.get("channels"), Some(&Value::Int(16)));
        assert_eq!(loaded.get("tags"), Some(&Value::from(vec!["eeg", "sleep"])));
        assert_eq!(loaded.metaclass(), original.metaclass());
    }
}
