use oxrdf::{Graph, NamedNode};
use std::collections::BTreeMap;

/// Mapping from prefix label to namespace IRI.
///
/// A `BTreeMap` keeps serialization order deterministic.
pub type PrefixMap = BTreeMap<String, String>;

/// An RDF graph together with the namespace prefixes declared by the document
/// it was parsed from.
///
/// The statements are the payload; the prefixes only affect how the graph is
/// serialized back to the client. The two travel together through the whole
/// pipeline so that stored offerings round-trip with the abbreviations the
/// publisher used.
#[derive(Debug, Clone, Default)]
pub struct PrefixedGraph {
    pub graph: Graph,
    pub prefixes: PrefixMap,
}

impl PrefixedGraph {
    pub fn new(graph: Graph, prefixes: PrefixMap) -> Self {
        Self { graph, prefixes }
    }

    /// Number of statements in the graph.
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}

/// An extracted offering description, keyed by the name of the graph it is
/// stored under (the offering's own IRI).
#[derive(Debug, Clone)]
pub struct NamedSubgraph {
    pub name: NamedNode,
    pub content: PrefixedGraph,
}

impl NamedSubgraph {
    pub fn new(name: NamedNode, content: PrefixedGraph) -> Self {
        Self { name, content }
    }
}
