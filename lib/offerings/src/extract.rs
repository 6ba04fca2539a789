//! Subgraph extraction.
//!
//! Given a parsed input document, finds every instance of the target class
//! and computes, per instance, the closure of statements reachable from it
//! through named-node objects. The closure is what gets stored as the
//! offering's named graph.

use catalogue_model::vocab::rdf;
use catalogue_model::{
    Graph, NamedNode, NamedNodeRef, NamedSubgraph, PrefixedGraph, Subject, SubjectRef,
    TermRef, TripleRef,
};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Extracts one [`NamedSubgraph`] per offering instance found in `document`.
///
/// Instances without an IRI cannot name a graph and are skipped with a
/// diagnostic. An empty result means the document contains no recognizable
/// offering; the caller decides how to report that.
pub fn extract_offerings(
    document: &PrefixedGraph,
    target_class: NamedNodeRef<'_>,
) -> Vec<NamedSubgraph> {
    let instances = discover_instances(&document.graph, target_class);
    info!(
        count = instances.len(),
        class = target_class.as_str(),
        "discovered offering instances"
    );

    let mut result = Vec::new();
    for instance in instances {
        let name = match instance {
            Subject::NamedNode(name) => name,
            other => {
                warn!(subject = %other, "skipping offering without an IRI");
                continue;
            }
        };

        let graph = closure(&document.graph, name.as_ref(), target_class);
        debug!(
            graph = name.as_str(),
            statements = graph.len(),
            prefixes = document.prefixes.len(),
            "extracted offering subgraph"
        );
        result.push(NamedSubgraph::new(
            name,
            PrefixedGraph::new(graph, document.prefixes.clone()),
        ));
    }
    result
}

/// Collects the subjects typed as `target_class`.
///
/// When the document asserts no direct instance, falls back to a heuristic:
/// any `rdf:type` object whose IRI contains the target class's local name as
/// a case-sensitive substring is treated as a candidate subclass and its
/// instances are collected instead. This tolerates payloads that only assert
/// a more specific subclass; it is a textual heuristic, not a subclass check.
fn discover_instances(graph: &Graph, target_class: NamedNodeRef<'_>) -> Vec<Subject> {
    let mut instances: Vec<Subject> = graph
        .subjects_for_predicate_object(rdf::TYPE, target_class)
        .map(SubjectRef::into_owned)
        .collect();

    if instances.is_empty() {
        let local = local_name(target_class.as_str());
        let mut candidate_classes: HashSet<NamedNode> = HashSet::new();
        for triple in graph.iter() {
            if triple.predicate != rdf::TYPE {
                continue;
            }
            let class = match triple.object {
                TermRef::NamedNode(class) if class != target_class => class,
                _ => continue,
            };
            if class.as_str().contains(local) && candidate_classes.insert(class.into_owned())
            {
                info!(
                    class = class.as_str(),
                    "no direct instances; treating class as a potential subclass"
                );
                instances.extend(
                    graph
                        .subjects_for_predicate_object(rdf::TYPE, class)
                        .map(SubjectRef::into_owned),
                );
            }
        }
    }

    dedup(instances)
}

fn dedup(instances: Vec<Subject>) -> Vec<Subject> {
    let mut seen = HashSet::new();
    instances
        .into_iter()
        .filter(|instance| seen.insert(instance.clone()))
        .collect()
}

fn local_name(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

/// Computes the closure of statements reachable from `root`.
///
/// Explicit worklist instead of recursion so adversarial documents cannot
/// overflow the stack. Named-node objects are pushed for traversal exactly
/// once; blank-node objects are copied as leaves; cycles terminate through
/// the visited set. The canonical class assertion is added when the document
/// only carried a subclass assertion.
fn closure(
    document: &Graph,
    root: NamedNodeRef<'_>,
    target_class: NamedNodeRef<'_>,
) -> Graph {
    let mut output = Graph::new();
    let mut visited: HashSet<NamedNode> = HashSet::new();
    let mut worklist = vec![root.into_owned()];

    while let Some(resource) = worklist.pop() {
        if !visited.insert(resource.clone()) {
            continue;
        }
        for triple in document.triples_for_subject(resource.as_ref()) {
            output.insert(triple);
            if let TermRef::NamedNode(object) = triple.object {
                let object = object.into_owned();
                if !visited.contains(&object) {
                    worklist.push(object);
                }
            }
        }
    }

    if !output.contains(TripleRef::new(root, rdf::TYPE, target_class)) {
        output.insert(TripleRef::new(root, rdf::TYPE, target_class));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue_model::vocab::sedimark;
    use catalogue_model::{BlankNode, Literal, PrefixMap, Triple};

    fn named(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    fn document(triples: &[Triple]) -> PrefixedGraph {
        let mut graph = Graph::new();
        for triple in triples {
            graph.insert(triple);
        }
        let mut prefixes = PrefixMap::new();
        prefixes.insert("sedimark".into(), sedimark::NS.into());
        prefixes.insert("ex".into(), "http://example.org/".into());
        PrefixedGraph::new(graph, prefixes)
    }

    #[test]
    fn extracts_the_subtree_rooted_at_the_offering() {
        let offer = named("http://example.org/offer1");
        let asset = named("http://example.org/asset1");
        let unrelated = named("http://example.org/unrelated");
        let doc = document(&[
            Triple::new(offer.clone(), rdf::TYPE.into_owned(), sedimark::OFFERING.into_owned()),
            Triple::new(offer.clone(), sedimark::OFFERS.into_owned(), asset.clone()),
            Triple::new(asset.clone(), rdf::TYPE.into_owned(), sedimark::ASSET.into_owned()),
            Triple::new(unrelated.clone(), rdf::TYPE.into_owned(), sedimark::ASSET.into_owned()),
        ]);

        let extracted = extract_offerings(&doc, sedimark::OFFERING);
        assert_eq!(extracted.len(), 1);
        let subgraph = &extracted[0];
        assert_eq!(subgraph.name, offer);
        assert_eq!(subgraph.content.len(), 3);
        assert!(!subgraph.content.graph.contains(TripleRef::new(
            unrelated.as_ref(),
            rdf::TYPE,
            sedimark::ASSET
        )));
        // Prefixes propagate verbatim from the document.
        assert_eq!(subgraph.content.prefixes, doc.prefixes);
    }

    #[test]
    fn cyclic_documents_terminate_with_each_statement_once() {
        let a = named("http://example.org/offer1");
        let b = named("http://example.org/other");
        let link = named("http://example.org/linksTo");
        let doc = document(&[
            Triple::new(a.clone(), rdf::TYPE.into_owned(), sedimark::OFFERING.into_owned()),
            Triple::new(a.clone(), link.clone(), b.clone()),
            Triple::new(b.clone(), link.clone(), a.clone()),
        ]);

        let extracted = extract_offerings(&doc, sedimark::OFFERING);
        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].content.len(), 3);
    }

    #[test]
    fn blank_node_objects_are_leaves() {
        let offer = named("http://example.org/offer1");
        let note = named("http://example.org/note");
        let blank = BlankNode::default();
        let doc = document(&[
            Triple::new(offer.clone(), rdf::TYPE.into_owned(), sedimark::OFFERING.into_owned()),
            Triple::new(offer.clone(), note.clone(), blank.clone()),
            // Only reachable through the blank node, so it must not be pulled in.
            Triple::new(blank.clone(), note.clone(), named("http://example.org/hidden")),
        ]);

        let extracted = extract_offerings(&doc, sedimark::OFFERING);
        assert_eq!(extracted.len(), 1);
        let graph = &extracted[0].content.graph;
        assert_eq!(graph.len(), 2);
        assert!(graph.contains(TripleRef::new(offer.as_ref(), note.as_ref(), &blank)));
    }

    #[test]
    fn subclass_substring_heuristic_applies_when_no_direct_instance() {
        let offer = named("http://example.org/offer1");
        let subclass = named("http://example.org/vocab#DataOffering");
        let doc = document(&[Triple::new(
            offer.clone(),
            rdf::TYPE.into_owned(),
            subclass.clone(),
        )]);

        let extracted = extract_offerings(&doc, sedimark::OFFERING);
        assert_eq!(extracted.len(), 1);
        let graph = &extracted[0].content.graph;
        // The canonical class assertion is added next to the subclass one.
        assert!(graph.contains(TripleRef::new(
            offer.as_ref(),
            rdf::TYPE,
            sedimark::OFFERING
        )));
        assert!(graph.contains(TripleRef::new(offer.as_ref(), rdf::TYPE, subclass.as_ref())));
    }

    #[test]
    fn blank_node_offerings_are_skipped() {
        let blank = BlankNode::default();
        let mut graph = Graph::new();
        graph.insert(TripleRef::new(&blank, rdf::TYPE, sedimark::OFFERING));
        let doc = PrefixedGraph::new(graph, PrefixMap::new());

        assert!(extract_offerings(&doc, sedimark::OFFERING).is_empty());
    }

    #[test]
    fn no_instances_yields_no_subgraphs() {
        let thing = named("http://example.org/thing");
        let doc = document(&[Triple::new(
            thing.clone(),
            named("http://example.org/label"),
            Literal::new_simple_literal("plain"),
        )]);

        assert!(extract_offerings(&doc, sedimark::OFFERING).is_empty());
    }

    #[test]
    fn literal_objects_are_not_traversed() {
        let offer = named("http://example.org/offer1");
        let label = named("http://example.org/label");
        let doc = document(&[
            Triple::new(offer.clone(), rdf::TYPE.into_owned(), sedimark::OFFERING.into_owned()),
            Triple::new(offer.clone(), label.clone(), Literal::new_simple_literal("hi")),
        ]);

        let extracted = extract_offerings(&doc, sedimark::OFFERING);
        assert_eq!(extracted[0].content.len(), 2);
    }
}
