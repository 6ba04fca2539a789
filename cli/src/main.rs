use crate::cli::{Args, Command};
use anyhow::Context;
use catalogue_offerings::document::parse_document;
use catalogue_offerings::OfferingStore;
use catalogue_storage::MemGraphStorage;
use catalogue_web::ServerConfig;
use clap::Parser;
use oxrdfio::RdfFormat;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    match args.command {
        Command::Serve { bind, cors, load } => {
            let catalogue = OfferingStore::new(Arc::new(MemGraphStorage::new()));
            for path in &load {
                if let Err(error) = load_file(&catalogue, path) {
                    warn!("failed to load {}: {error:#}", path.display());
                }
            }

            info!("starting catalogue server on http://{bind}");
            info!("offering manager endpoint: http://{bind}/catalogue/manager");
            info!("offering listing endpoint: http://{bind}/catalogue/graphs");
            catalogue_web::serve(ServerConfig {
                catalogue,
                bind,
                cors,
            })
            .await
        }
    }
}

/// Publishes a file into the catalogue through the same extraction and
/// commit path a POST request takes.
fn load_file(catalogue: &OfferingStore, path: &Path) -> anyhow::Result<()> {
    let format = rdf_format_from_path(path)?;
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let document = parse_document(format, &data)?;

    let subgraphs = catalogue.extract(&document);
    if subgraphs.is_empty() {
        warn!("no offerings found in {}", path.display());
        return Ok(());
    }
    catalogue.commit(&subgraphs)?;
    info!(
        offerings = subgraphs.len(),
        file = %path.display(),
        "loaded startup dataset"
    );
    Ok(())
}

fn rdf_format_from_path(path: &Path) -> anyhow::Result<RdfFormat> {
    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .with_context(|| format!("No file extension in {}", path.display()))?;
    RdfFormat::from_extension(ext)
        .with_context(|| format!("The file extension '{ext}' is unknown"))
}
