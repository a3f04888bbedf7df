//! In-memory statement store.
//!
//! Reference implementation of [`Graph`]. Statements are kept in insertion
//! order with set semantics (inserting a duplicate is a no-op), plus a
//! subject index for lookups.
//!
//! ## Limitations
//!
//! - **No querying**: only subject scans and single-object lookups.
//! - **No removal**: statements can be added, never deleted.
//!
//! Use this store for tests, and for round-tripping objects through
//! statements without a real triple store.

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;

use crate::model::{Node, Statement, Uri};
use super::Graph;

// ============================================================================
// MemoryGraph
// ============================================================================

/// In-memory RDF graph.
///
/// Cloning yields another handle on the same statements.
#[derive(Clone, Default)]
pub struct MemoryGraph {
    inner: Arc<RwLock<GraphInner>>,
}

#[derive(Default)]
struct GraphInner {
    statements: Vec<Statement>,
    seen: HashSet<Statement>,
    /// subject → positions in `statements`
    by_subject: HashMap<Node, Vec<usize>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement. Returns false if it was already present.
    pub fn insert(&self, statement: Statement) -> bool {
        let mut inner = self.inner.write();
        inner.insert(statement)
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        self.inner.read().seen.contains(statement)
    }

    pub fn len(&self) -> usize {
        self.inner.read().statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().statements.is_empty()
    }

    /// Every statement with `subject` as subject, in insertion order.
    pub fn statements_about(&self, subject: &Node) -> Vec<Statement> {
        let inner = self.inner.read();
        inner.by_subject.get(subject)
            .map(|positions| positions.iter().map(|&i| inner.statements[i].clone()).collect())
            .unwrap_or_default()
    }

    /// All objects of (`subject`, `predicate`), in insertion order.
    pub fn objects(&self, subject: &Node, predicate: &Uri) -> Vec<Node> {
        let inner = self.inner.read();
        inner.matching(subject, predicate).cloned().collect()
    }

    /// Snapshot of every statement, in insertion order.
    pub fn statements(&self) -> Vec<Statement> {
        self.inner.read().statements.clone()
    }
}

impl GraphInner {
    fn insert(&mut self, statement: Statement) -> bool {
        if !self.seen.insert(statement.clone()) {
            return false;
        }
        let position = self.statements.len();
        self.by_subject.entry(statement.subject.clone()).or_default().push(position);
        self.statements.push(statement);
        true
    }

    fn matching<'a>(&'a self, subject: &Node, predicate: &'a Uri) -> impl Iterator<Item = &'a Node> + 'a {
        self.by_subject.get(subject)
            .into_iter()
            .flatten()
            .map(move |&i| &self.statements[i])
            .filter(move |s| &s.predicate == predicate)
            .map(|s| &s.object)
    }
}

impl Graph for MemoryGraph {
    /// The first matching object in insertion order.
    fn get_object(&self, subject: &Node, predicate: &Uri) -> Option<Node> {
        let inner = self.inner.read();
        inner.matching(subject, predicate).next().cloned()
    }

    fn statements_about(&self, subject: &Node) -> Vec<Statement> {
        MemoryGraph::statements_about(self, subject)
    }
}

impl Extend<Statement> for MemoryGraph {
    fn extend<I: IntoIterator<Item = Statement>>(&mut self, iter: I) {
        let mut inner = self.inner.write();
        for statement in iter {
            inner.insert(statement);
        }
    }
}

impl FromIterator<Statement> for MemoryGraph {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        let mut graph = MemoryGraph::new();
        graph.extend(iter);
        graph
    }
}

impl std::fmt::Debug for MemoryGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGraph").field("statements", &self.len()).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
