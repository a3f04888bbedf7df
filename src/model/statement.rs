//! Statement: a single subject–predicate–object assertion.

use std::fmt;

use serde::{Deserialize, Serialize};
use super::{Node, Uri};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Node,
    pub predicate: Uri,
    pub object: Node,
}

impl Statement {
    pub fn new(subject: Node, predicate: Uri, object: Node) -> Self {
        Self { subject, predicate, object }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}
