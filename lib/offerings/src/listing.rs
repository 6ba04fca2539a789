//! Listing metadata derived from stored offering graphs.

use catalogue_model::vocab::{rdf, sedimark};
use catalogue_model::{Graph, NamedNode, NamedNodeRef, SubjectRef, TermRef};
use catalogue_storage::ReadTransaction;
use std::collections::HashSet;
use tracing::debug;

/// One entry of the offering listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferingSummary {
    /// Name of the stored graph, which is the offering's URI.
    pub uri: NamedNode,
    /// URI of the offering's self-listing, derived from the graph content.
    pub self_listing: NamedNode,
    /// Number of assets the offering advertises.
    pub assets: usize,
}

/// Derives a summary for every graph visible in `txn`.
///
/// Graph names are enumerated directly; when the backend reports none, the
/// instance-pattern query serves as a fallback, since some backends
/// enumerate names incompletely. A graph that disappears between enumeration
/// and read still gets a degenerate entry rather than failing the whole
/// listing.
pub(crate) fn summarize_all(
    txn: &dyn ReadTransaction,
    target_class: NamedNodeRef<'_>,
) -> Vec<OfferingSummary> {
    let mut names = txn.graph_names();
    if names.is_empty() {
        names = txn.graphs_with_instance_of(target_class);
    }

    names
        .into_iter()
        .map(|name| match txn.graph(name.as_ref()) {
            Some(stored) => summarize(name, &stored.graph, target_class),
            None => {
                debug!(graph = name.as_str(), "graph vanished while listing");
                degenerate(name)
            }
        })
        .collect()
}

fn degenerate(name: NamedNode) -> OfferingSummary {
    OfferingSummary {
        self_listing: name.clone(),
        uri: name,
        assets: 0,
    }
}

/// All derivation is scoped to the subject asserting the target class; a
/// graph without one gets a degenerate entry.
fn summarize(
    name: NamedNode,
    graph: &Graph,
    target_class: NamedNodeRef<'_>,
) -> OfferingSummary {
    let Some(offering) = graph.subject_for_predicate_object(rdf::TYPE, target_class) else {
        return degenerate(name);
    };
    let self_listing = derive_self_listing(graph, offering, name.as_ref());
    let assets = count_assets(graph, offering);
    OfferingSummary {
        uri: name,
        self_listing,
        assets,
    }
}

/// Finds the offering's self-listing URI.
///
/// In order of preference: the object of the offering's
/// `sedimark:hasSelfListing` statement, a subject typed
/// `sedimark:Self-Listing`, the offering subject itself, and finally the
/// graph name.
fn derive_self_listing(
    graph: &Graph,
    offering: SubjectRef<'_>,
    name: NamedNodeRef<'_>,
) -> NamedNode {
    for term in graph.objects_for_subject_predicate(offering, sedimark::HAS_SELF_LISTING) {
        if let TermRef::NamedNode(listing) = term {
            return listing.into_owned();
        }
    }
    if let Some(SubjectRef::NamedNode(listing)) =
        graph.subject_for_predicate_object(rdf::TYPE, sedimark::SELF_LISTING)
    {
        return listing.into_owned();
    }
    if let SubjectRef::NamedNode(offering) = offering {
        return offering.into_owned();
    }
    name.into_owned()
}

/// Counts the offering's advertised assets: its own `sedimark:offers`
/// out-edges when present, otherwise distinct subjects typed
/// `sedimark:Asset`.
fn count_assets(graph: &Graph, offering: SubjectRef<'_>) -> usize {
    let offers = graph
        .objects_for_subject_predicate(offering, sedimark::OFFERS)
        .count();
    if offers > 0 {
        return offers;
    }
    graph
        .subjects_for_predicate_object(rdf::TYPE, sedimark::ASSET)
        .collect::<HashSet<_>>()
        .len()
}
