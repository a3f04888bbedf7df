//! Node/value codec: native values to graph nodes and back.
//!
//! Pure functions. Converter failures are logged and contained here so that
//! neither statement generation nor reverse resolution can fail on a value.

use tracing::{error, warn};

use crate::model::{Literal, Node, Uri, Value, ValueKind};
use crate::vocab::{self, DatatypeKind, URI_SCHEMES};
use super::Converter;

/// Build the object node for `value` using the default URI-scheme set.
pub fn make_node(value: &Value, datatype: Option<&Uri>, to_wire: Option<&Converter>) -> Node {
    make_node_with_schemes(value, datatype, to_wire, &URI_SCHEMES)
}

/// Build the object node for `value`.
///
/// Resolution order:
/// 1. reference and blank nodes are returned as they are;
/// 2. a bare URI becomes a reference;
/// 3. a nested object with a subject node yields that node;
/// 4. a nested object with only an identity URI yields a reference to it,
///    unless a custom `to_wire` converter is in effect;
/// 5. anything else is converted, turned into text and written as a
///    literal, except that text starting with an accepted scheme followed
///    by `:` is written as a reference.
pub fn make_node_with_schemes<S: AsRef<str>>(
    value: &Value,
    datatype: Option<&Uri>,
    to_wire: Option<&Converter>,
    schemes: &[S],
) -> Node {
    match value.kind() {
        ValueKind::ResourceReference(Value::Node(node)) => return node.clone(),
        ValueKind::ResourceReference(Value::Uri(uri)) => return Node::Reference(uri.clone()),
        ValueKind::NestedResource(resource) => {
            if let Some(node) = resource.node() {
                return node;
            }
            if to_wire.is_none_or(Converter::is_reference_extractor) {
                if let Some(uri) = resource.uri() {
                    return Node::Reference(uri);
                }
            }
        }
        ValueKind::ResourceReference(_) | ValueKind::Opaque(_) => {}
    }

    let converted = match to_wire {
        Some(converter) => match converter.apply(value) {
            Ok(v) => Some(v),
            Err(e) => {
                error!(converter = converter.name(), error = %e, "exception mapping literal");
                None
            }
        },
        None => None,
    };
    let wire = converted.as_ref().unwrap_or(value);

    let text = wire.lexical();
    if let Some((scheme, _)) = text.split_once(':') {
        if schemes.iter().any(|s| s.as_ref() == scheme) {
            return Node::Reference(Uri::new(text));
        }
    }

    let datatype = match (datatype, wire) {
        (Some(dt), _) => Some(dt.clone()),
        (None, Value::Node(Node::Literal(lit))) => lit.datatype.clone(),
        (None, _) => None,
    };
    Node::Literal(Literal { value: text, datatype })
}

/// Decode an object node into a native value.
///
/// Literals are cast through the XSD numeric table when `datatype` is given;
/// other datatypes, and lexical forms that fail to parse, stay text.
/// `from_wire` runs last.
pub fn make_value(node: Option<&Node>, datatype: Option<&Uri>, from_wire: Option<&Converter>) -> Value {
    let value = match node {
        None => return Value::Null,
        Some(Node::Reference(uri)) => Value::Uri(uri.clone()),
        Some(Node::Blank(id)) => Value::Node(Node::Blank(id.clone())),
        Some(Node::Literal(lit)) => match datatype {
            Some(dt) => cast_literal(&lit.value, dt),
            None => Value::String(lit.value.clone()),
        },
    };

    match from_wire {
        Some(converter) => match converter.apply(&value) {
            Ok(v) => v,
            Err(e) => {
                error!(converter = converter.name(), error = %e, "exception mapping value");
                value
            }
        },
        None => value,
    }
}

fn cast_literal(text: &str, datatype: &Uri) -> Value {
    let cast = match vocab::datatype_kind(datatype) {
        None => return Value::String(text.to_owned()),
        Some(DatatypeKind::Integer) => text.trim().parse::<i64>().map(Value::Int).ok(),
        Some(DatatypeKind::Float) => text.trim().parse::<f64>().map(Value::Float).ok(),
    };
    cast.unwrap_or_else(|| {
        warn!(%datatype, literal = text, "literal does not match its datatype, keeping text");
        Value::String(text.to_owned())
    })
}
