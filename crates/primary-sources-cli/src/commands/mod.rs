//! CLI command implementations.

pub mod curate;
pub mod datasets;
pub mod ingest;
pub mod stats;
pub mod suggest;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use primary_sources::store::StoreConfig;
use primary_sources::{GraphStore, RdfFormat, SparqlHttpStore};
use tracing::debug;

use crate::cli::Endpoints;

/// Connect to the configured SPARQL endpoints.
pub fn connect(endpoints: &Endpoints) -> Result<Arc<dyn GraphStore>, Box<dyn std::error::Error>> {
    let query = endpoints.query_endpoint.as_deref().ok_or(
        "No SPARQL endpoint configured.\nPass --query-endpoint or set PRIMARY_SOURCES_QUERY_ENDPOINT.",
    )?;

    let mut config = StoreConfig::new(query).with_timeout_secs(endpoints.timeout);
    if let Some(update) = &endpoints.update_endpoint {
        config = config.with_update_endpoint(update.as_str());
    }

    debug!(query, update = config.update_endpoint(), "Connecting to SPARQL store");
    Ok(Arc::new(SparqlHttpStore::new(config)?))
}

/// Use the explicit format, or guess one from the file extension.
pub fn resolve_format(file: &Path, format: Option<RdfFormat>) -> Result<RdfFormat, Box<dyn std::error::Error>> {
    if let Some(format) = format {
        return Ok(format);
    }

    file.extension()
        .and_then(|e| e.to_str())
        .and_then(RdfFormat::from_extension)
        .ok_or_else(|| {
            format!(
                "Cannot guess the RDF format of {}. Pass --format turtle, ntriples or rdfxml.",
                file.display()
            )
            .into()
        })
}
