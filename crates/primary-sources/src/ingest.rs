//! Loading validated datasets into their pending graph.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use oxiri::Iri;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::codec::canonical_term;
use crate::config::PrimarySourcesConfig;
use crate::curation::{dataset_graph, CurationState, GraphBlock, PatternTerm, TriplePattern, Update};
use crate::error::{PrimarySourcesError, Result};
use crate::model::{ParsedGraph, Triple};
use crate::store::GraphStore;
use crate::validation::{DataModelValidator, InvalidComponentReport, RdfFormat, ValidatorConfig};

/// Summary of one ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    pub dataset: String,
    pub graph: String,
    pub format: String,
    pub total_triples: usize,
    pub accepted_triples: usize,
    pub invalid: InvalidComponentReport,
    /// False when nothing was valid and the store was not contacted.
    pub uploaded: bool,
    pub ingested_at: DateTime<Utc>,
}

/// Validates contributed datasets and loads the valid part into
/// `<dataset>/new`, recording the uploader in the metadata graph.
pub struct Ingestor {
    store: Arc<dyn GraphStore>,
    validator: DataModelValidator,
    config: PrimarySourcesConfig,
}

impl Ingestor {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self::with_config(store, PrimarySourcesConfig::default())
    }

    pub fn with_config(store: Arc<dyn GraphStore>, config: PrimarySourcesConfig) -> Self {
        Self {
            store,
            validator: DataModelValidator::with_config(ValidatorConfig::from(&config)),
            config,
        }
    }

    /// Check, partition and upload one dataset.
    ///
    /// A syntax error aborts before anything is sent.
    pub fn ingest(
        &self,
        bytes: &[u8],
        base_uri: &str,
        format: RdfFormat,
        dataset: &str,
        user: &str,
    ) -> Result<IngestionReport> {
        let dataset = dataset.trim_end_matches('/');
        Iri::parse(dataset)
            .map_err(|e| PrimarySourcesError::InvalidLocator(format!("invalid dataset IRI '{}': {}", dataset, e)))?;
        if user.trim().is_empty() {
            return Err(PrimarySourcesError::InvalidLocator("empty user name".to_string()));
        }
        let uploader = self.config.user_iri(user);
        Iri::parse(uploader.as_str())
            .map_err(|e| PrimarySourcesError::InvalidLocator(format!("invalid user IRI '{}': {}", uploader, e)))?;

        let graph = crate::validation::check_syntax(bytes, base_uri, format)?;
        let outcome = self.validator.partition(&graph);
        let target = dataset_graph(dataset, CurationState::New);
        let accepted = canonicalize(&outcome.valid);

        let uploaded = !accepted.is_empty();
        if uploaded {
            let update = self.upload(&target, dataset, &uploader, &accepted);
            self.store.update(&update)?;
            info!(dataset, accepted = accepted.len(), user, "Uploaded dataset");
        } else {
            warn!(dataset, invalid = outcome.report.len(), "No valid triples, nothing uploaded");
        }

        Ok(IngestionReport {
            dataset: dataset.to_string(),
            graph: target,
            format: format.to_string(),
            total_triples: graph.len(),
            accepted_triples: accepted.len(),
            invalid: outcome.report,
            uploaded,
            ingested_at: Utc::now(),
        })
    }

    fn upload(&self, target: &str, dataset: &str, uploader: &str, valid: &ParsedGraph) -> Update {
        Update::insert_data(target, valid.iter()).insert(GraphBlock::new(
            PatternTerm::iri(self.config.metadata_graph.as_str()),
            vec![TriplePattern::new(
                PatternTerm::iri(dataset),
                PatternTerm::iri(self.config.uploader_predicate.as_str()),
                PatternTerm::iri(uploader),
            )],
        ))
    }
}

/// Rewrite literal objects to the lexical form the value codec produces,
/// so later decisions decoded from tokens or JSON match them exactly.
fn canonicalize(valid: &ParsedGraph) -> ParsedGraph {
    let mut rewritten = 0usize;
    let graph = valid
        .iter()
        .map(|triple| {
            let object = canonical_term(&triple.object);
            if object != triple.object {
                rewritten += 1;
            }
            Triple::new(triple.subject.clone(), triple.predicate.clone(), object)
        })
        .collect();
    if rewritten > 0 {
        debug!(rewritten, "Canonicalized literal values");
    }
    graph
}
