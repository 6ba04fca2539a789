use crate::error::StorageError;
use crate::storage::{
    contains_in, graph_in, names_in, names_with_instance_of, GraphMap, GraphStorage,
    ReadTransaction, WriteTransaction,
};
use catalogue_model::{NamedNode, NamedNodeRef, PrefixedGraph};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// In-memory transactional dataset.
///
/// A write transaction takes the lock in write mode and mutates a private
/// copy of the graph map; `commit` swaps the copy in, so an aborted (dropped)
/// transaction leaves the dataset untouched and readers never observe a
/// half-applied batch. Prefixes are persisted next to the statements, so this
/// backend never loses them on a round trip.
#[derive(Default)]
pub struct MemGraphStorage {
    graphs: RwLock<GraphMap>,
}

impl MemGraphStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphStorage for MemGraphStorage {
    fn begin_read(&self) -> Result<Box<dyn ReadTransaction + '_>, StorageError> {
        let guard = self.graphs.read()?;
        Ok(Box::new(MemReadTransaction { guard }))
    }

    fn begin_write(&self) -> Result<Box<dyn WriteTransaction + '_>, StorageError> {
        let guard = self.graphs.write()?;
        let working = guard.clone();
        Ok(Box::new(MemWriteTransaction { guard, working }))
    }
}

struct MemReadTransaction<'a> {
    guard: RwLockReadGuard<'a, GraphMap>,
}

impl ReadTransaction for MemReadTransaction<'_> {
    fn contains(&self, name: NamedNodeRef<'_>) -> bool {
        contains_in(&self.guard, name)
    }

    fn graph(&self, name: NamedNodeRef<'_>) -> Option<PrefixedGraph> {
        graph_in(&self.guard, name)
    }

    fn graph_names(&self) -> Vec<NamedNode> {
        names_in(&self.guard)
    }

    fn graphs_with_instance_of(&self, class: NamedNodeRef<'_>) -> Vec<NamedNode> {
        names_with_instance_of(&self.guard, class)
    }
}

struct MemWriteTransaction<'a> {
    guard: RwLockWriteGuard<'a, GraphMap>,
    working: GraphMap,
}

impl ReadTransaction for MemWriteTransaction<'_> {
    fn contains(&self, name: NamedNodeRef<'_>) -> bool {
        contains_in(&self.working, name)
    }

    fn graph(&self, name: NamedNodeRef<'_>) -> Option<PrefixedGraph> {
        graph_in(&self.working, name)
    }

    fn graph_names(&self) -> Vec<NamedNode> {
        names_in(&self.working)
    }

    fn graphs_with_instance_of(&self, class: NamedNodeRef<'_>) -> Vec<NamedNode> {
        names_with_instance_of(&self.working, class)
    }
}

impl WriteTransaction for MemWriteTransaction<'_> {
    fn replace(&mut self, name: NamedNodeRef<'_>, graph: PrefixedGraph) {
        self.working.insert(name.as_str().to_owned(), graph);
    }

    fn remove(&mut self, name: NamedNodeRef<'_>) -> bool {
        self.working.remove(name.as_str()).is_some()
    }

    fn commit(mut self: Box<Self>) -> Result<(), StorageError> {
        debug!(graphs = self.working.len(), "committing write transaction");
        *self.guard = std::mem::take(&mut self.working);
        Ok(())
    }
}
