use crate::error::StorageError;
use catalogue_model::vocab::rdf;
use catalogue_model::{NamedNode, NamedNodeRef, PrefixedGraph};
use std::collections::BTreeMap;

/// Storage seam for the catalogue's dataset of named graphs.
///
/// The bundled implementation is [`MemGraphStorage`](crate::MemGraphStorage).
/// Implementations must provide single-writer/multi-reader isolation: a read
/// transaction observes a consistent snapshot that never includes the partial
/// state of an in-flight write transaction.
pub trait GraphStorage: Send + Sync {
    /// Starts a read transaction over the current snapshot of the dataset.
    fn begin_read(&self) -> Result<Box<dyn ReadTransaction + '_>, StorageError>;

    /// Starts a write transaction.
    ///
    /// Mutations stay private to the transaction until [`commit`] is called;
    /// dropping the transaction without committing discards them.
    ///
    /// [`commit`]: WriteTransaction::commit
    fn begin_write(&self) -> Result<Box<dyn WriteTransaction + '_>, StorageError>;
}

/// A read-only view of the dataset.
pub trait ReadTransaction {
    /// Whether a named graph exists under `name`.
    fn contains(&self, name: NamedNodeRef<'_>) -> bool;

    /// Returns a copy of the named graph stored under `name`.
    fn graph(&self, name: NamedNodeRef<'_>) -> Option<PrefixedGraph>;

    /// Names of all stored graphs.
    fn graph_names(&self) -> Vec<NamedNode>;

    /// Pattern query across every named graph: the names of those graphs
    /// that assert an instance of `class`.
    fn graphs_with_instance_of(&self, class: NamedNodeRef<'_>) -> Vec<NamedNode>;
}

/// A read-write view of the dataset.
///
/// Reads through the [`ReadTransaction`] supertrait observe the transaction's
/// own uncommitted writes.
pub trait WriteTransaction: ReadTransaction {
    /// Stores `graph` under `name`, replacing any previous graph wholesale.
    fn replace(&mut self, name: NamedNodeRef<'_>, graph: PrefixedGraph);

    /// Removes the named graph under `name`. Returns whether it existed.
    fn remove(&mut self, name: NamedNodeRef<'_>) -> bool;

    /// Atomically publishes every mutation made through this transaction.
    fn commit(self: Box<Self>) -> Result<(), StorageError>;
}

/// The dataset state of the in-memory backend, keyed by graph IRI.
pub(crate) type GraphMap = BTreeMap<String, PrefixedGraph>;

/// Shared read logic over a plain graph map, used by both transaction kinds
/// of the in-memory backend.
pub(crate) fn contains_in(graphs: &GraphMap, name: NamedNodeRef<'_>) -> bool {
    graphs.contains_key(name.as_str())
}

pub(crate) fn graph_in(graphs: &GraphMap, name: NamedNodeRef<'_>) -> Option<PrefixedGraph> {
    graphs.get(name.as_str()).cloned()
}

pub(crate) fn names_in(graphs: &GraphMap) -> Vec<NamedNode> {
    // Keys only enter the map through a NamedNode, so they are valid IRIs.
    graphs
        .keys()
        .map(|name| NamedNode::new_unchecked(name.clone()))
        .collect()
}

pub(crate) fn names_with_instance_of(
    graphs: &GraphMap,
    class: NamedNodeRef<'_>,
) -> Vec<NamedNode> {
    graphs
        .iter()
        .filter(|(_, stored)| {
            stored
                .graph
                .subject_for_predicate_object(rdf::TYPE, class)
                .is_some()
        })
        .map(|(name, _)| NamedNode::new_unchecked(name.clone()))
        .collect()
}
