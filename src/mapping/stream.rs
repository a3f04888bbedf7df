//! Lazy statement generation for a resource and its nested objects.
//!
//! The stream keeps one frame per object being walked. A nested object
//! marked for expansion pushes a new frame, so its statements appear right
//! after the statement that references it, then the parent resumes.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use hashbrown::HashSet;
use tracing::debug;

use crate::model::{Node, Resource, Statement, Value, ValueKind};
use super::{codec, MapKey, Mapping, PropertyMap};

enum Pending<'a> {
    Emit(Statement),
    Expand(&'a dyn Resource),
}

struct Frame<'a> {
    resource: &'a dyn Resource,
    subject: Node,
    entries: indexmap::map::Iter<'a, MapKey, PropertyMap>,
    pending: VecDeque<Pending<'a>>,
}

/// Statements for one resource, produced on demand.
///
/// Dropping the stream part-way is fine; nothing needs cleaning up.
pub struct StatementStream<'a> {
    mapping: &'a Mapping,
    frames: Vec<Frame<'a>>,
    /// Subjects already expanded in this stream. Nested objects may point
    /// back at an ancestor.
    visited: HashSet<Node>,
}

impl Mapping {
    /// Statements for every mapped attribute of `resource`, taken from its
    /// direct attributes and its metadata extension map.
    ///
    /// Empty when the resource has no subject node.
    pub fn statement_stream<'a>(&'a self, resource: &'a dyn Resource) -> StatementStream<'a> {
        let mut stream = StatementStream {
            mapping: self,
            frames: Vec::new(),
            visited: HashSet::new(),
        };
        stream.enter(resource);
        stream
    }
}

impl<'a> StatementStream<'a> {
    fn enter(&mut self, resource: &'a dyn Resource) {
        let Some(subject) = resource.node() else {
            return;
        };
        if !self.visited.insert(subject.clone()) {
            debug!(%subject, "nested resource already expanded, not descending again");
            return;
        }
        let mapping = self.mapping;
        self.frames.push(Frame {
            resource,
            subject,
            entries: mapping.forward.iter(),
            pending: VecDeque::new(),
        });
    }

    fn descend(&mut self, nested: &'a dyn Resource) {
        if self.mapping.config.max_depth.is_some_and(|max| self.frames.len() > max) {
            return;
        }
        self.enter(nested);
    }
}

impl<'a> Frame<'a> {
    fn queue_attribute(&mut self, map: &'a PropertyMap, attribute: &str, schemes: &[String]) {
        let resource = self.resource;
        let sources = [resource.attribute(attribute), resource.extension(attribute)];
        for value in sources.into_iter().flatten() {
            if value.is_absent() {
                continue;
            }
            match value {
                Value::List(items) => {
                    for item in items.iter().filter(|v| !v.is_absent()) {
                        match item.kind() {
                            ValueKind::NestedResource(nested) => self.queue_reference(map, item, nested, schemes),
                            _ => self.queue_literal(map, item, schemes),
                        }
                    }
                }
                _ => match value.kind() {
                    ValueKind::NestedResource(nested) if map.references_resources() => {
                        self.queue_reference(map, value, nested, schemes)
                    }
                    _ => self.queue_literal(map, value, schemes),
                },
            }
        }
    }

    fn queue_reference(&mut self, map: &PropertyMap, value: &Value, nested: &'a dyn Resource, schemes: &[String]) {
        if nested.node().is_none() && nested.uri().is_none() {
            debug!(property = %map.property(), "nested resource has no identity, skipping");
            return;
        }
        let object = codec::make_node_with_schemes(value, None, None, schemes);
        self.emit(map, object);
        if map.subelement() {
            self.pending.push_back(Pending::Expand(nested));
        }
    }

    fn queue_literal(&mut self, map: &PropertyMap, value: &Value, schemes: &[String]) {
        let object = codec::make_node_with_schemes(value, map.datatype(), map.to_wire(), schemes);
        self.emit(map, object);
    }

    fn emit(&mut self, map: &PropertyMap, object: Node) {
        let statement = Statement::new(self.subject.clone(), map.property().clone(), object);
        self.pending.push_back(Pending::Emit(statement));
    }
}

impl<'a> Iterator for StatementStream<'a> {
    type Item = Statement;

    fn next(&mut self) -> Option<Statement> {
        let mapping = self.mapping;
        let schemes = mapping.config.uri_schemes.as_slice();
        loop {
            let frame = self.frames.last_mut()?;
            if let Some(item) = frame.pending.pop_front() {
                match item {
                    Pending::Emit(statement) => return Some(statement),
                    Pending::Expand(nested) => {
                        self.descend(nested);
                        continue;
                    }
                }
            }
            match frame.entries.next() {
                Some(((scope, attribute), map)) => {
                    if mapping.is_effective(scope, attribute, frame.resource.metaclasses()) {
                        frame.queue_attribute(map, attribute, schemes);
                    }
                }
                None => {
                    self.frames.pop();
                }
            }
        }
    }
}

impl FusedIterator for StatementStream<'_> {}
