//! HTTP surface of the offering catalogue.
//!
//! Exposes a Graph Store Protocol variant under `/catalogue/manager`
//! (publish, read, delete of offering graphs) and the derived listing under
//! `/catalogue/graphs`. All endpoints speak JSON except graph reads, which
//! negotiate an RDF serialization and default to expanded JSON-LD.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use catalogue_offerings::OfferingStore;
use std::net::SocketAddr;
use std::str::FromStr;
use tracing::info;

mod config;
mod error;
mod jsonld;
mod listing;
mod manager;
mod negotiation;

pub use config::ServerConfig;
pub use error::CatalogueServerError;
pub use negotiation::OfferingFormat;

#[derive(Clone)]
pub struct AppState {
    pub catalogue: OfferingStore,
}

pub fn create_router(state: AppState) -> Router {
    let manager = get(manager::handle_manager_get)
        .post(manager::handle_manager_publish)
        .put(manager::handle_manager_publish)
        .delete(manager::handle_manager_delete)
        .fallback(manager::handle_method_not_allowed);

    Router::new()
        .route(
            "/catalogue/manager",
            manager.layer(axum::middleware::from_fn(manager::mark_handler)),
        )
        .route("/catalogue/graphs", get(listing::handle_listing_get))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from_str(&config.bind)?;

    let app = create_router(AppState {
        catalogue: config.catalogue,
    });
    let app = if config.cors {
        app.layer(tower_http::cors::CorsLayer::permissive())
    } else {
        app
    };

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    Ok(axum::serve(listener, app).await?)
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use catalogue_storage::MemGraphStorage;
    use std::sync::Arc;

    AppState {
        catalogue: OfferingStore::new(Arc::new(MemGraphStorage::new())),
    }
}
