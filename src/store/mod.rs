//! # Graph Contract
//!
//! The mapping engine reads a graph through [`Graph`] only, and writes to
//! one through `Extend<Statement>`. A store needs two reads: one object for
//! a (subject, predicate) pair, and a scan of everything about a subject.
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryGraph` | `memory` | In-memory statement set for testing/embedding |

pub mod memory;

use crate::model::{Node, Statement, Uri};

pub use memory::MemoryGraph;

/// Read access to a statement store.
pub trait Graph {
    /// The object of some statement (`subject`, `predicate`, ?), if any.
    ///
    /// When several statements match, which one is returned is up to the
    /// store.
    fn get_object(&self, subject: &Node, predicate: &Uri) -> Option<Node>;

    /// Every statement with `subject` as subject.
    fn statements_about(&self, subject: &Node) -> Vec<Statement>;
}

impl<G: Graph + ?Sized> Graph for &G {
    fn get_object(&self, subject: &Node, predicate: &Uri) -> Option<Node> {
        (**self).get_object(subject, predicate)
    }

    fn statements_about(&self, subject: &Node) -> Vec<Statement> {
        (**self).statements_about(subject)
    }
}
