//! The `/catalogue/manager` endpoint, a Graph Store Protocol variant.

use crate::error::CatalogueServerError;
use crate::jsonld::graph_to_expanded_jsonld;
use crate::negotiation::{input_format, OfferingFormat};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalogue_model::{NamedNode, PrefixMap};
use catalogue_offerings::document::{parse_document, serialize_graph};
use catalogue_offerings::DeleteOutcome;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Deserialize)]
pub struct GraphParams {
    graph: Option<String>,
    #[serde(default)]
    metadata: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredOffering {
    uri: String,
    statements: usize,
    prefixes: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    status: &'static str,
    message: &'static str,
    stored_offerings: Vec<StoredOffering>,
    total_offerings: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphMetadata {
    status: &'static str,
    graph_uri: String,
    statements: usize,
    prefixes: usize,
    prefix_map: PrefixMap,
}

pub async fn handle_manager_get(
    State(state): State<AppState>,
    Query(params): Query<GraphParams>,
    format: OfferingFormat,
) -> Result<Response, CatalogueServerError> {
    let Some(graph) = params.graph else {
        return summary(&state);
    };
    let name = parse_graph_uri(&graph)?;

    let Some(stored) = state.catalogue.read(name.as_ref())? else {
        return Err(CatalogueServerError::GraphNotFound(graph));
    };

    if params.metadata {
        return Ok(Json(GraphMetadata {
            status: "success",
            graph_uri: graph,
            statements: stored.graph.len(),
            prefixes: stored.prefixes.len(),
            prefix_map: stored.prefixes,
        })
        .into_response());
    }

    let (content_type, body) = match format {
        OfferingFormat::JsonLd => (
            format.media_type(),
            serde_json::to_vec_pretty(&graph_to_expanded_jsonld(&stored.graph))
                .map_err(|e| CatalogueServerError::Internal(e.into()))?,
        ),
        OfferingFormat::Rdf(rdf_format) => {
            (format.media_type(), serialize_graph(rdf_format, &stored)?)
        }
    };
    Ok(([(CONTENT_TYPE, content_type)], body).into_response())
}

/// Diagnostic summary returned when no `graph` parameter is given.
fn summary(state: &AppState) -> Result<Response, CatalogueServerError> {
    let graphs: Vec<String> = state
        .catalogue
        .graph_names()?
        .into_iter()
        .map(NamedNode::into_string)
        .collect();
    Ok(Json(json!({
        "status": "success",
        "storedOfferings": { "count": graphs.len(), "graphs": graphs },
    }))
    .into_response())
}

pub async fn handle_manager_publish(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, CatalogueServerError> {
    if body.is_empty() {
        return Err(CatalogueServerError::BadRequest(
            "Empty request body".to_owned(),
        ));
    }
    let format = input_format(&headers)?;
    let document = parse_document(format, &body)?;

    let subgraphs = state.catalogue.extract(&document);
    if subgraphs.is_empty() {
        return Err(CatalogueServerError::BadRequest(format!(
            "No offerings found in the published document: {} triples contain no instance of {}",
            document.len(),
            state.catalogue.target_class().as_str(),
        )));
    }

    state.catalogue.commit(&subgraphs)?;
    info!(offerings = subgraphs.len(), "stored published offerings");

    let stored_offerings: Vec<StoredOffering> = subgraphs
        .iter()
        .map(|subgraph| StoredOffering {
            uri: subgraph.name.as_str().to_owned(),
            statements: subgraph.content.graph.len(),
            prefixes: subgraph.content.prefixes.len(),
        })
        .collect();
    Ok(Json(PublishResponse {
        status: "success",
        message: "Offerings stored successfully",
        total_offerings: stored_offerings.len(),
        stored_offerings,
    })
    .into_response())
}

pub async fn handle_manager_delete(
    State(state): State<AppState>,
    Query(params): Query<GraphParams>,
) -> Result<Response, CatalogueServerError> {
    let Some(graph) = params.graph else {
        return Err(CatalogueServerError::BadRequest(
            "Missing required 'graph' parameter".to_owned(),
        ));
    };
    let name = parse_graph_uri(&graph)?;

    match state.catalogue.delete(name.as_ref())? {
        DeleteOutcome::Deleted => Ok(Json(json!({
            "status": "success",
            "message": format!("Offering graph deleted: {graph}"),
        }))
        .into_response()),
        DeleteOutcome::NotFound => Err(CatalogueServerError::GraphNotFound(graph)),
    }
}

pub async fn handle_method_not_allowed(method: Method) -> CatalogueServerError {
    CatalogueServerError::MethodNotAllowed(method.to_string())
}

/// Marks every manager response with the handler that produced it.
pub async fn mark_handler(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        axum::http::HeaderName::from_static("x-handler"),
        axum::http::HeaderValue::from_static("offering-manager"),
    );
    response
}

fn parse_graph_uri(graph: &str) -> Result<NamedNode, CatalogueServerError> {
    NamedNode::new(graph).map_err(|_| {
        CatalogueServerError::BadRequest(format!("Invalid graph URI: {graph}"))
    })
}
