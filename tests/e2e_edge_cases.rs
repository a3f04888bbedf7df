//! Edge cases: the scheme heuristic, converter failures, odd datatypes,
//! blank subjects, and objects that reference themselves.

use std::sync::Arc;

use proptest::prelude::*;
use rdf_mapping::vocab::{RDFS, XSD};
use rdf_mapping::{
    make_node, make_value, Converter, Error, Mapping, MappingConfig, Node, Object, PropertyMap, Scope,
    Statement, Uri, Value,
};

fn failing(name: &'static str) -> Converter {
    Converter::new(name, move |v| Err(Error::Conversion {
        converter: name.into(),
        message: format!("cannot handle {}", v.type_name()),
    }))
}

// ============================================================================
// Scheme heuristic
// ============================================================================

proptest! {
    #[test]
    fn prop_text_without_colon_is_literal(text in "[a-zA-Z0-9 _./-]{1,40}") {
        prop_assert!(make_node(&Value::from(text.as_str()), None, None).is_literal());
    }

    #[test]
    fn prop_accepted_scheme_is_reference(scheme in prop::sample::select(vec!["http", "file"]), rest in "[a-z0-9/._-]{0,30}") {
        let text = format!("{scheme}:{rest}");
        prop_assert_eq!(make_node(&Value::from(text.as_str()), None, None), Node::reference(text.as_str()));
    }

    #[test]
    fn prop_other_scheme_is_literal(scheme in "[a-z]{2,8}", rest in "[a-z0-9/]{0,10}") {
        prop_assume!(scheme != "http" && scheme != "file");
        let text = format!("{scheme}:{rest}");
        prop_assert!(make_node(&Value::from(text.as_str()), None, None).is_literal());
    }
}

#[test]
fn test_https_is_not_in_default_schemes() {
    assert!(make_node(&Value::from("https://example.org/x"), None, None).is_literal());

    let config = MappingConfig::from_json(r#"{"uri_schemes": ["http", "https", "file"]}"#).unwrap();
    let mut mapping = Mapping::with_config(config);
    mapping.update(Scope::Universal, [("see", PropertyMap::new(RDFS.term("seeAlso")))]);
    let obj = Object::new("http://example.org/a").with_attribute("see", "https://example.org/x");
    let st: Vec<Statement> = mapping.statement_stream(&obj).collect();
    assert_eq!(st[0].object, Node::reference("https://example.org/x"));
}

// ============================================================================
// Converter failures never abort generation
// ============================================================================

#[test]
fn test_failing_to_wire_falls_back_to_raw_value() {
    let mut mapping = Mapping::new();
    mapping.update(Scope::Universal, [
        ("a", PropertyMap::new("http://example.org/a").with_to_wire(failing("a"))),
        ("b", PropertyMap::new("http://example.org/b")),
    ]);
    let obj = Object::new("http://example.org/x").with_attribute("a", 5).with_attribute("b", "ok");

    let st: Vec<Statement> = mapping.statement_stream(&obj).collect();
    assert_eq!(st.len(), 2);
    assert_eq!(st[0].object, Node::literal("5", None));
}

#[test]
fn test_failing_from_wire_keeps_decoded_value() {
    let mut mapping = Mapping::new();
    mapping.update(Scope::Universal, [(
        "n",
        PropertyMap::new("http://example.org/n").with_datatype(XSD.term("long")).with_from_wire(failing("n")),
    )]);
    let st = Statement::new(Node::reference("http://example.org/x"), Uri::new("http://example.org/n"), Node::literal("9", None));
    assert_eq!(mapping.metadata(&Scope::Universal, &st).value, Value::Int(9));
}

// ============================================================================
// Datatypes
// ============================================================================

#[test]
fn test_unknown_datatype_stays_text() {
    let dt = Uri::new("http://example.org/types#celsius");
    assert_eq!(make_value(Some(&Node::literal("21.5", None)), Some(&dt), None), Value::from("21.5"));
}

#[test]
fn test_out_of_range_integer_stays_text() {
    let big = "18446744073709551615";
    assert_eq!(
        make_value(Some(&Node::literal(big, None)), Some(&XSD.term("unsignedLong")), None),
        Value::from(big)
    );
}

#[test]
fn test_xsd_special_floats() {
    let v = make_value(Some(&Node::literal("INF", None)), Some(&XSD.term("double")), None);
    assert_eq!(v.as_float(), Some(f64::INFINITY));
}

// ============================================================================
// Subjects
// ============================================================================

#[test]
fn test_blank_subject() {
    let mut mapping = Mapping::new();
    mapping.update(Scope::Universal, [("label", PropertyMap::new(RDFS.term("label")))]);
    let obj = Object::with_subject(Node::blank("seg1")).with_attribute("label", "segment");

    let st: Vec<Statement> = mapping.statement_stream(&obj).collect();
    assert_eq!(st[0].subject, Node::blank("seg1"));

    let resolved = mapping.metadata(&Scope::Universal, &st[0]);
    assert_eq!(resolved.subject, Node::blank("seg1"));
}

#[test]
fn test_blank_object_decodes_to_blank_node() {
    let mapping = Mapping::new();
    let st = Statement::new(Node::reference("http://example.org/x"), RDFS.term("seeAlso"), Node::blank("b3"));
    assert_eq!(mapping.metadata(&Scope::Universal, &st).value, Value::Node(Node::blank("b3")));
}

#[test]
fn test_self_reference_terminates() {
    let mut mapping = Mapping::new();
    mapping.update(Scope::Universal, [
        ("label", PropertyMap::new(RDFS.term("label"))),
        ("same", PropertyMap::new("http://www.w3.org/2002/07/owl#sameAs").with_subelement(true)),
    ]);
    // A nested object that shares its parent's subject stands in for a cycle
    // back to an ancestor.
    let twin = Arc::new(
        Object::new("http://example.org/loop")
            .with_attribute("label", "inner")
            .with_attribute("same", Value::Node(Node::reference("http://example.org/loop"))),
    );
    let outer = Object::new("http://example.org/loop")
        .with_attribute("label", "outer")
        .with_attribute("same", Value::from(twin));

    let st: Vec<Statement> = mapping.statement_stream(&outer).collect();
    assert_eq!(st.len(), 2);
}

#[test]
fn test_anonymous_nested_object_is_skipped() {
    let mut mapping = Mapping::new();
    mapping.update(Scope::Universal, [
        ("label", PropertyMap::new(RDFS.term("label"))),
        ("part", PropertyMap::new("http://example.org/part").with_subelement(true)),
    ]);
    let anon = Arc::new(Object::anonymous().with_attribute("label", "nobody"));
    let obj = Object::new("http://example.org/x").with_attribute("part", Value::from(anon));

    // Nothing can reference it, and it has no subject for its own statements.
    assert_eq!(mapping.statement_stream(&obj).count(), 0);
}
