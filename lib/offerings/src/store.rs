use crate::extract::extract_offerings;
use crate::listing::{self, OfferingSummary};
use catalogue_model::vocab::sedimark;
use catalogue_model::{NamedNode, NamedNodeRef, NamedSubgraph, PrefixedGraph};
use catalogue_storage::{GraphStorage, StorageError, WriteTransaction};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Manages offering graphs inside a [`GraphStorage`] dataset.
///
/// All mutation goes through a single write transaction per operation, so a
/// publish batch or a delete is either fully visible or not at all. Reads run
/// inside one read transaction and observe a consistent snapshot.
#[derive(Clone)]
pub struct OfferingStore {
    storage: Arc<dyn GraphStorage>,
    target_class: NamedNode,
}

impl OfferingStore {
    /// Creates a store managing `sedimark:Offering` graphs.
    pub fn new(storage: Arc<dyn GraphStorage>) -> Self {
        Self::with_target_class(storage, sedimark::OFFERING.into_owned())
    }

    /// Creates a store managing instances of an arbitrary class.
    pub fn with_target_class(storage: Arc<dyn GraphStorage>, target_class: NamedNode) -> Self {
        Self {
            storage,
            target_class,
        }
    }

    /// The class whose instances this store extracts and lists.
    pub fn target_class(&self) -> NamedNodeRef<'_> {
        self.target_class.as_ref()
    }

    /// Extracts the offering subgraphs of `document` (no storage access).
    pub fn extract(&self, document: &PrefixedGraph) -> Vec<NamedSubgraph> {
        extract_offerings(document, self.target_class.as_ref())
    }

    /// Commits a batch of extracted subgraphs in one write transaction.
    ///
    /// Each subgraph replaces any previously stored graph of the same name
    /// wholesale. On any error the whole batch is aborted.
    pub fn commit(&self, subgraphs: &[NamedSubgraph]) -> Result<(), StorageError> {
        let mut txn = self.storage.begin_write()?;
        for subgraph in subgraphs {
            let name = subgraph.name.as_ref();
            if txn.contains(name) {
                info!(graph = name.as_str(), "replacing existing named graph");
            }
            txn.replace(name, subgraph.content.clone());
            verify_prefixes(txn.as_mut(), name, &subgraph.content);
        }
        txn.commit()
    }

    /// Reads the named graph stored under `name`, if any.
    pub fn read(&self, name: NamedNodeRef<'_>) -> Result<Option<PrefixedGraph>, StorageError> {
        let txn = self.storage.begin_read()?;
        Ok(txn.graph(name))
    }

    /// Deletes the named graph stored under `name`.
    pub fn delete(&self, name: NamedNodeRef<'_>) -> Result<DeleteOutcome, StorageError> {
        let mut txn = self.storage.begin_write()?;
        if txn.remove(name) {
            txn.commit()?;
            info!(graph = name.as_str(), "deleted offering graph");
            Ok(DeleteOutcome::Deleted)
        } else {
            // Dropping the transaction aborts it.
            Ok(DeleteOutcome::NotFound)
        }
    }

    /// Names of all stored offering graphs.
    pub fn graph_names(&self) -> Result<Vec<NamedNode>, StorageError> {
        let txn = self.storage.begin_read()?;
        Ok(txn.graph_names())
    }

    /// Derives the listing entry of every stored offering inside a single
    /// read transaction.
    pub fn list_offerings(&self) -> Result<Vec<OfferingSummary>, StorageError> {
        let txn = self.storage.begin_read()?;
        Ok(listing::summarize_all(txn.as_ref(), self.target_class.as_ref()))
    }
}

/// Re-reads the just-stored graph and restores its prefixes if the backend
/// dropped any. Statements are unaffected by prefix loss, so a second loss
/// is tolerated rather than failing the commit.
fn verify_prefixes(
    txn: &mut dyn WriteTransaction,
    name: NamedNodeRef<'_>,
    original: &PrefixedGraph,
) {
    let stored = txn.graph(name).map(|g| g.prefixes.len()).unwrap_or(0);
    let expected = original.prefixes.len();
    if stored >= expected {
        return;
    }
    warn!(
        graph = name.as_str(),
        stored, expected, "prefixes lost during storage, restoring them"
    );
    let mut repaired = txn.graph(name).unwrap_or_else(|| original.clone());
    repaired.prefixes = original.prefixes.clone();
    txn.replace(name, repaired);

    let after = txn.graph(name).map(|g| g.prefixes.len()).unwrap_or(0);
    if after < expected {
        warn!(
            graph = name.as_str(),
            restored = after,
            expected,
            "prefixes still incomplete after restoration attempt"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue_model::vocab::rdf;
    use catalogue_model::{Graph, PrefixMap, TripleRef};
    use catalogue_storage::{MemGraphStorage, ReadTransaction};
    use std::collections::HashSet;

    fn named(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    fn offering_subgraph(name: &NamedNode, extra: &[(NamedNode, NamedNode)]) -> NamedSubgraph {
        let mut graph = Graph::new();
        graph.insert(TripleRef::new(name.as_ref(), rdf::TYPE, sedimark::OFFERING));
        for (predicate, object) in extra {
            graph.insert(TripleRef::new(
                name.as_ref(),
                predicate.as_ref(),
                object.as_ref(),
            ));
        }
        let mut prefixes = PrefixMap::new();
        prefixes.insert("sedimark".into(), sedimark::NS.into());
        NamedSubgraph::new(name.clone(), PrefixedGraph::new(graph, prefixes))
    }

    fn store() -> OfferingStore {
        OfferingStore::new(Arc::new(MemGraphStorage::new()))
    }

    #[test]
    fn commit_then_read_round_trips() {
        let store = store();
        let name = named("http://example.org/offer1");
        let subgraph = offering_subgraph(&name, &[]);

        store.commit(std::slice::from_ref(&subgraph)).unwrap();

        let stored = store.read(name.as_ref()).unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored.graph.contains(TripleRef::new(
            name.as_ref(),
            rdf::TYPE,
            sedimark::OFFERING
        )));
        assert_eq!(stored.prefixes, subgraph.content.prefixes);
    }

    #[test]
    fn committing_twice_is_idempotent() {
        let store = store();
        let name = named("http://example.org/offer1");
        let subgraph = offering_subgraph(&name, &[]);

        store.commit(std::slice::from_ref(&subgraph)).unwrap();
        store.commit(std::slice::from_ref(&subgraph)).unwrap();

        assert_eq!(store.graph_names().unwrap(), vec![name.clone()]);
        assert_eq!(store.read(name.as_ref()).unwrap().unwrap().len(), 1);
    }

    #[test]
    fn recommit_supersedes_instead_of_merging() {
        let store = store();
        let name = named("http://example.org/offer1");
        let first = offering_subgraph(
            &name,
            &[(
                named("http://example.org/old"),
                named("http://example.org/a"),
            )],
        );
        let second = offering_subgraph(
            &name,
            &[(
                named("http://example.org/new"),
                named("http://example.org/b"),
            )],
        );

        store.commit(std::slice::from_ref(&first)).unwrap();
        store.commit(std::slice::from_ref(&second)).unwrap();

        let stored = store.read(name.as_ref()).unwrap().unwrap();
        let triples: HashSet<_> = stored.graph.iter().map(|t| t.into_owned()).collect();
        let expected: HashSet<_> = second.content.graph.iter().map(|t| t.into_owned()).collect();
        assert_eq!(triples, expected);
    }

    #[test]
    fn delete_reports_missing_graphs() {
        let store = store();
        let name = named("http://example.org/offer1");

        assert_eq!(
            store.delete(name.as_ref()).unwrap(),
            DeleteOutcome::NotFound
        );

        store
            .commit(&[offering_subgraph(&name, &[])])
            .unwrap();
        assert_eq!(store.delete(name.as_ref()).unwrap(), DeleteOutcome::Deleted);
        assert!(store.read(name.as_ref()).unwrap().is_none());
    }

    // A backend that drops prefixes on the first store of each graph, like
    // some persistent datasets do.
    struct PrefixDroppingStorage {
        inner: MemGraphStorage,
    }

    struct PrefixDroppingTxn<'a> {
        inner: Box<dyn WriteTransaction + 'a>,
        dropped_once: HashSet<String>,
    }

    impl GraphStorage for PrefixDroppingStorage {
        fn begin_read(
            &self,
        ) -> Result<Box<dyn ReadTransaction + '_>, StorageError> {
            self.inner.begin_read()
        }

        fn begin_write(
            &self,
        ) -> Result<Box<dyn WriteTransaction + '_>, StorageError> {
            Ok(Box::new(PrefixDroppingTxn {
                inner: self.inner.begin_write()?,
                dropped_once: HashSet::new(),
            }))
        }
    }

    impl ReadTransaction for PrefixDroppingTxn<'_> {
        fn contains(&self, name: NamedNodeRef<'_>) -> bool {
            self.inner.contains(name)
        }

        fn graph(&self, name: NamedNodeRef<'_>) -> Option<PrefixedGraph> {
            self.inner.graph(name)
        }

        fn graph_names(&self) -> Vec<NamedNode> {
            self.inner.graph_names()
        }

        fn graphs_with_instance_of(&self, class: NamedNodeRef<'_>) -> Vec<NamedNode> {
            self.inner.graphs_with_instance_of(class)
        }
    }

    impl WriteTransaction for PrefixDroppingTxn<'_> {
        fn replace(&mut self, name: NamedNodeRef<'_>, mut graph: PrefixedGraph) {
            if self.dropped_once.insert(name.as_str().to_owned()) {
                graph.prefixes.clear();
            }
            self.inner.replace(name, graph);
        }

        fn remove(&mut self, name: NamedNodeRef<'_>) -> bool {
            self.inner.remove(name)
        }

        fn commit(self: Box<Self>) -> Result<(), StorageError> {
            (*self).inner.commit()
        }
    }

    #[test]
    fn lost_prefixes_are_restored_during_commit() {
        let storage = PrefixDroppingStorage {
            inner: MemGraphStorage::new(),
        };
        let store = OfferingStore::new(Arc::new(storage));
        let name = named("http://example.org/offer1");
        let subgraph = offering_subgraph(&name, &[]);

        store.commit(std::slice::from_ref(&subgraph)).unwrap();

        let stored = store.read(name.as_ref()).unwrap().unwrap();
        assert_eq!(stored.prefixes, subgraph.content.prefixes);
    }
}
