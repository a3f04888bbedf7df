//! Native attribute values as held by mapped objects.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use super::{Node, Resource, Uri};

/// The value of an object attribute.
///
/// Covers what the mapping engine has to tell apart:
/// - Scalars: Bool, Int, Float, String, DateTime
/// - References: Uri, Node (an already-built graph node)
/// - Containers: List (multi-valued attributes)
/// - Nested: Resource (another mapped object)
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<Utc>),
    Uri(Uri),
    Node(Node),
    List(Vec<Value>),
    Resource(Arc<dyn Resource>),
}

/// How a value takes part in node construction.
///
/// Decided once per value by [`Value::kind`] so the codec and the statement
/// stream match on it instead of probing the value repeatedly.
#[derive(Debug, Clone, Copy)]
pub enum ValueKind<'a> {
    /// Plain data that becomes a literal (or a URI-looking literal).
    Opaque(&'a Value),
    /// Something that already names a resource: a bare URI, or a reference
    /// or blank node.
    ResourceReference(&'a Value),
    /// Another mapped object.
    NestedResource(&'a dyn Resource),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::DateTime(_) => "DATETIME",
            Value::Uri(_) => "URI",
            Value::Node(_) => "NODE",
            Value::List(_) => "LIST",
            Value::Resource(_) => "RESOURCE",
        }
    }

    pub fn kind(&self) -> ValueKind<'_> {
        match self {
            Value::Uri(_) => ValueKind::ResourceReference(self),
            Value::Node(node) if node.is_resource() => ValueKind::ResourceReference(self),
            Value::Resource(resource) => ValueKind::NestedResource(resource.as_ref()),
            _ => ValueKind::Opaque(self),
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// Null and the empty string carry no information and are never written.
    pub fn is_absent(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            Value::Uri(uri) => Some(uri),
            Value::Node(node) => node.as_uri(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Arc<dyn Resource>> {
        match self {
            Value::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// Text form used when a value is written as a literal.
    pub fn lexical(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(v) => float_lexical(*v),
            Value::String(s) => s.clone(),
            Value::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::Uri(uri) => uri.to_string(),
            Value::Node(node) => node.lexical().to_owned(),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::lexical).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Resource(r) => r.uri().map(Uri::into_string).unwrap_or_default(),
        }
    }
}

/// XSD spelling for floats: whole numbers keep a fractional digit, and the
/// special values are `INF`, `-INF` and `NaN`.
fn float_lexical(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_owned()
    } else if v.is_infinite() {
        let text = if v > 0.0 { "INF" } else { "-INF" };
        text.to_owned()
    } else if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<DateTime<Utc>> for Value { fn from(v: DateTime<Utc>) -> Self { Value::DateTime(v) } }
impl From<Uri> for Value { fn from(v: Uri) -> Self { Value::Uri(v) } }
impl From<Node> for Value { fn from(v: Node) -> Self { Value::Node(v) } }
impl<R: Resource + 'static> From<Arc<R>> for Value {
    fn from(v: Arc<R>) -> Self { Value::Resource(v) }
}
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

// ============================================================================
// Equality
// ============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Uri(a), Value::Uri(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            // Nested objects are equal when they are the same object or
            // share a subject node.
            (Value::Resource(a), Value::Resource(b)) => {
                Arc::ptr_eq(a, b) || a.node().is_some_and(|n| Some(n) == b.node())
            }
            _ => false,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Uri(uri) => write!(f, "<{uri}>"),
            Value::Node(node) => write!(f, "{node}"),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Resource(r) => match r.node() {
                Some(node) => write!(f, "{node}"),
                None => write!(f, "<anonymous resource>"),
            },
            other => f.write_str(&other.lexical()),
        }
    }
}
