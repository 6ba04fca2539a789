//! Shared data model for the offering catalogue.
//!
//! The RDF primitives come straight from [`oxrdf`]; this crate adds the two
//! catalogue-specific notions on top of them: a [`PrefixedGraph`] (a graph
//! together with the namespace prefixes its source document declared) and a
//! [`NamedSubgraph`] (an extracted offering description keyed by the graph
//! name it will be stored under).

mod graph;
pub mod vocab;

pub use graph::{NamedSubgraph, PrefixMap, PrefixedGraph};

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeRef, Graph, GraphName, GraphNameRef, IriParseError, Literal,
    LiteralRef, NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad,
    QuadRef, Subject, SubjectRef, Term, TermRef, Triple, TripleRef,
};
