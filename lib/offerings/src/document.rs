//! Parsing and serialization of RDF documents.
//!
//! Input documents are parsed into a [`PrefixedGraph`], keeping the prefix
//! declarations the parser saw so they can travel with the extracted
//! subgraphs. Output reuses the same prefixes when serializing a stored
//! graph back to the client.

use catalogue_model::{Graph, PrefixedGraph, Triple};
use oxrdfio::{RdfFormat, RdfParseError, RdfParser, RdfSerializer};
use std::io;
use thiserror::Error;

/// An error raised while reading or writing an RDF document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Parsing(#[from] RdfParseError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("prefix {prefix} maps to an invalid IRI: {iri}")]
    InvalidPrefix { prefix: String, iri: String },
}

/// Parses `data` as an RDF document of the given format.
///
/// Blank nodes are renamed on ingestion so identifiers from separate
/// publications can never collide. Graph name annotations in quad formats
/// are ignored; the catalogue assigns graph names itself.
pub fn parse_document(format: RdfFormat, data: &[u8]) -> Result<PrefixedGraph, DocumentError> {
    let mut parser = RdfParser::from_format(format)
        .rename_blank_nodes()
        .for_reader(data);

    let mut graph = Graph::new();
    for quad in &mut parser {
        graph.insert(&Triple::from(quad?));
    }

    // Prefixes are only complete once the document has been fully read.
    let prefixes = parser
        .prefixes()
        .map(|(name, iri)| (name.to_owned(), iri.to_owned()))
        .collect();
    Ok(PrefixedGraph::new(graph, prefixes))
}

/// Serializes a stored graph in the given format, re-declaring its prefixes.
pub fn serialize_graph(
    format: RdfFormat,
    content: &PrefixedGraph,
) -> Result<Vec<u8>, DocumentError> {
    let mut serializer = RdfSerializer::from_format(format);
    for (prefix, iri) in &content.prefixes {
        serializer =
            serializer
                .with_prefix(prefix, iri)
                .map_err(|_| DocumentError::InvalidPrefix {
                    prefix: prefix.clone(),
                    iri: iri.clone(),
                })?;
    }

    let mut serializer = serializer.for_writer(Vec::new());
    for triple in content.graph.iter() {
        serializer.serialize_triple(triple)?;
    }
    Ok(serializer.finish()?)
}
