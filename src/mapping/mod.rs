//! # Attribute ⇄ Statement Mapping
//!
//! A [`Mapping`] holds the forward table (scope, attribute) → [`PropertyMap`]
//! and the reverse table (scope, predicate) → [`ReverseEntry`] derived from
//! it.
//!
//! ```text
//! Resource ──statement_stream()──▶ Statements ──▶ graph
//! Statement ──metadata()──▶ (attribute, value, functional) ──▶ Object
//! ```
//!
//! A mapping is built once per type hierarchy with [`Mapping::update`] and
//! then only read. Updates take `&mut self`; readers share `&Mapping`.

pub mod codec;
pub mod property_map;
pub mod reverse;
pub mod stream;

use std::fmt;

use hashbrown::HashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::model::{Statement, Uri};
use crate::vocab::URI_SCHEMES;
use crate::Result;

pub use codec::{make_node, make_node_with_schemes, make_value};
pub use property_map::{Converter, ConvertFn, PropertyMap};
pub use reverse::Resolved;
pub use stream::StatementStream;

// ============================================================================
// Keys
// ============================================================================

/// Which objects a table entry applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    /// Every object, whatever its metaclass.
    Universal,
    /// Only objects declaring this metaclass.
    Metaclass(Uri),
}

impl Scope {
    pub fn metaclass(uri: impl Into<Uri>) -> Self {
        Scope::Metaclass(uri.into())
    }

    /// The scope used to resolve lookups for an object of `metaclass`.
    pub fn of(metaclass: Option<&Uri>) -> Self {
        metaclass.map_or(Scope::Universal, |m| Scope::Metaclass(m.clone()))
    }

    pub fn is_universal(&self) -> bool {
        matches!(self, Scope::Universal)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Universal => write!(f, "*"),
            Scope::Metaclass(m) => write!(f, "<{m}>"),
        }
    }
}

/// Forward table key: (scope, attribute name).
pub type MapKey = (Scope, String);

/// Reverse table key: (scope, predicate URI text).
pub type ReverseKey = (Scope, String);

/// A reverse mapping, from a predicate back to an attribute.
#[derive(Debug, Clone)]
pub struct ReverseEntry {
    pub attribute: String,
    pub datatype: Option<Uri>,
    pub from_wire: Option<Converter>,
    pub functional: bool,
}

impl ReverseEntry {
    fn from_map(attribute: &str, map: &PropertyMap) -> Self {
        Self {
            attribute: attribute.to_owned(),
            datatype: map.datatype().cloned(),
            from_wire: map.from_wire().cloned(),
            functional: map.functional(),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Tunables for a [`Mapping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Schemes that make literal text be written as a reference.
    pub uri_schemes: SmallVec<[String; 2]>,
    /// How many levels of nested objects the statement stream expands.
    /// `None` expands without limit (cycles are still cut).
    pub max_depth: Option<usize>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            uri_schemes: URI_SCHEMES.iter().map(|s| s.to_string()).collect(),
            max_depth: None,
        }
    }
}

impl MappingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Mapping
// ============================================================================

/// Forward and reverse mapping tables for one type hierarchy.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    config: MappingConfig,
    forward: IndexMap<MapKey, PropertyMap>,
    reverse: HashMap<ReverseKey, ReverseEntry>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MappingConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// A mapping seeded with one table.
    pub fn from_table<I, K>(scope: Scope, table: I) -> Self
    where
        I: IntoIterator<Item = (K, PropertyMap)>,
        K: Into<String>,
    {
        let mut mapping = Self::new();
        mapping.update(scope, table);
        mapping
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Merge attribute → PropertyMap entries under `scope`, replacing any
    /// existing entry for the same key, then rebuild the reverse table.
    pub fn update<I, K>(&mut self, scope: Scope, table: I)
    where
        I: IntoIterator<Item = (K, PropertyMap)>,
        K: Into<String>,
    {
        for (attribute, map) in table {
            self.forward.insert((scope.clone(), attribute.into()), map);
        }
        self.rebuild_reverse();
    }

    /// Recompute the whole reverse table from the forward table. When two
    /// attributes in one scope share a predicate, the later entry wins.
    fn rebuild_reverse(&mut self) {
        self.reverse = self.forward.iter()
            .map(|((scope, attribute), map)| {
                let key = (scope.clone(), map.property().to_string());
                (key, ReverseEntry::from_map(attribute, map))
            })
            .collect();
        trace!(forward = self.forward.len(), reverse = self.reverse.len(), "rebuilt reverse mapping");
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Forward entries in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = (&Scope, &str, &PropertyMap)> {
        self.forward.iter().map(|((scope, attribute), map)| (scope, attribute.as_str(), map))
    }

    /// The PropertyMap for `attribute` in `scope`, falling back to the
    /// universal entry.
    pub fn property_map(&self, scope: &Scope, attribute: &str) -> Option<&PropertyMap> {
        let lookup = |s: &Scope| self.forward.get(&(s.clone(), attribute.to_owned()));
        lookup(scope).or_else(|| {
            if scope.is_universal() { None } else { lookup(&Scope::Universal) }
        })
    }

    /// Whether the forward entry (`scope`, `attribute`) is the one in effect
    /// for an object declaring `metaclasses` (most-derived first).
    ///
    /// A metaclass entry is shadowed by an entry for a more-derived
    /// metaclass; the universal entry by any applicable metaclass entry.
    pub fn is_effective(&self, scope: &Scope, attribute: &str, metaclasses: &[Uri]) -> bool {
        let shadowing = match scope {
            Scope::Universal => metaclasses,
            Scope::Metaclass(m) => match metaclasses.iter().position(|c| c == m) {
                Some(i) => &metaclasses[..i],
                None => return false,
            },
        };
        !shadowing.iter().any(|m| {
            self.forward.contains_key(&(Scope::Metaclass(m.clone()), attribute.to_owned()))
        })
    }

    /// The reverse entry for `predicate` in `scope`, falling back to the
    /// universal entry.
    pub fn reverse_entry(&self, scope: &Scope, predicate: &Uri) -> Option<&ReverseEntry> {
        let lookup = |s: &Scope| self.reverse.get(&(s.clone(), predicate.to_string()));
        lookup(scope).or_else(|| {
            if scope.is_universal() { None } else { lookup(&Scope::Universal) }
        })
    }

    /// Scopes consulted for an object declaring `metaclasses`: each
    /// metaclass, most-derived first, then universal.
    fn scope_chain<'m>(metaclasses: &'m [Uri]) -> impl Iterator<Item = Scope> + 'm {
        metaclasses.iter()
            .map(|m| Scope::Metaclass(m.clone()))
            .chain(std::iter::once(Scope::Universal))
    }

    /// The PropertyMap in effect for `attribute` on an object declaring
    /// `metaclasses`. Agrees with [`Mapping::is_effective`].
    pub fn effective_property_map(&self, metaclasses: &[Uri], attribute: &str) -> Option<&PropertyMap> {
        Self::scope_chain(metaclasses)
            .find_map(|scope| self.forward.get(&(scope, attribute.to_owned())))
    }

    /// The reverse entry in effect for `predicate` on an object declaring
    /// `metaclasses`: the first metaclass with an entry wins, then the
    /// universal entry.
    pub fn effective_reverse_entry(&self, metaclasses: &[Uri], predicate: &Uri) -> Option<&ReverseEntry> {
        let key = predicate.to_string();
        Self::scope_chain(metaclasses)
            .find_map(|scope| self.reverse.get(&(scope, key.clone())))
    }

    /// Write every statement of `resource` into `graph`. Returns how many
    /// statements were produced.
    pub fn save_to_graph<G>(&self, resource: &dyn crate::model::Resource, graph: &mut G) -> usize
    where
        G: Extend<Statement>,
    {
        let mut count = 0;
        graph.extend(self.statement_stream(resource).inspect(|_| count += 1));
        count
    }
}
