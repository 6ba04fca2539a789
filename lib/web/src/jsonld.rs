//! Expanded JSON-LD output.
//!
//! The default response format: one node object per subject, `@type` for
//! class assertions, `@value`/`@language`/`@type` maps for literals. Built
//! directly instead of going through the RDF I/O layer's streaming writer so
//! that output order is deterministic (subjects and predicates sorted) and
//! responses are stable across requests.

use catalogue_model::vocab::rdf;
use catalogue_model::{Graph, SubjectRef, TermRef};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Serializes `graph` as an expanded JSON-LD array.
pub fn graph_to_expanded_jsonld(graph: &Graph) -> Value {
    let mut subjects: BTreeMap<String, BTreeMap<String, Vec<Value>>> = BTreeMap::new();

    for triple in graph.iter() {
        let subject = match triple.subject {
            SubjectRef::NamedNode(node) => node.as_str().to_owned(),
            SubjectRef::BlankNode(node) => format!("_:{}", node.as_str()),
        };
        let entry = subjects.entry(subject).or_default();

        if triple.predicate == rdf::TYPE {
            if let TermRef::NamedNode(class) = triple.object {
                entry
                    .entry("@type".to_owned())
                    .or_default()
                    .push(Value::String(class.as_str().to_owned()));
                continue;
            }
        }

        let object = match triple.object {
            TermRef::NamedNode(node) => json!({ "@id": node.as_str() }),
            TermRef::BlankNode(node) => json!({ "@id": format!("_:{}", node.as_str()) }),
            TermRef::Literal(literal) => {
                if let Some(language) = literal.language() {
                    json!({ "@value": literal.value(), "@language": language })
                } else if literal.datatype() == catalogue_model::vocab::xsd::STRING {
                    json!({ "@value": literal.value() })
                } else {
                    json!({ "@value": literal.value(), "@type": literal.datatype().as_str() })
                }
            }
        };
        entry
            .entry(triple.predicate.as_str().to_owned())
            .or_default()
            .push(object);
    }

    let nodes: Vec<Value> = subjects
        .into_iter()
        .map(|(subject, properties)| {
            let mut node = Map::new();
            node.insert("@id".to_owned(), Value::String(subject));
            for (predicate, objects) in properties {
                node.insert(predicate, Value::Array(objects));
            }
            Value::Object(node)
        })
        .collect();
    Value::Array(nodes)
}
