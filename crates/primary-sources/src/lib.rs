//! Primary sources: validation and curation of contributed knowledge-graph
//! statements.
//!
//! Third-party datasets are submitted as RDF in the knowledge graph's own
//! statement model. They are checked against five triple shapes, loaded into a
//! per-dataset `new` graph, and then approved or rejected one statement,
//! qualifier or reference at a time by human curators.
//!
//! # Core Principles
//!
//! - **Flag, never repair**: invalid triples are dropped and reported as they are
//! - **One decision, one update**: every curation decision is a single atomic store update
//! - **Lossless values**: graph terms, curator tokens and editing-API JSON convert into each other
//!
//! # Example
//!
//! ```
//! use primary_sources::validation::{DataModelValidator, RdfFormat};
//!
//! let data = r#"
//! <http://www.wikidata.org/entity/Q5921> <http://www.wikidata.org/prop/P999> <http://www.wikidata.org/entity/statement/Q5921-a3b4c5d6-1234-4abc-9def-0123456789ab> .
//! <http://www.wikidata.org/entity/statement/Q5921-a3b4c5d6-1234-4abc-9def-0123456789ab> <http://www.wikidata.org/prop/statement/P999> "Maybelline" .
//! "#;
//!
//! let outcome = DataModelValidator::new()
//!     .check(data.as_bytes(), "http://example.org/", RdfFormat::NTriples)
//!     .unwrap();
//!
//! assert_eq!(outcome.valid.len(), 2);
//! assert!(outcome.is_fully_valid());
//! ```

pub mod codec;
pub mod config;
pub mod curation;
pub mod error;
pub mod ingest;
pub mod model;
pub mod store;
pub mod suggestion;
pub mod term;
pub mod validation;
pub mod vocab;

pub use codec::{QuickStatement, Value};
pub use config::PrimarySourcesConfig;
pub use curation::{CurationRequest, CurationState, Curator, StatementKind, StatementLocator};
pub use error::{PrimarySourcesError, Result};
pub use ingest::{IngestionReport, Ingestor};
pub use model::{GraphTerm, ParsedGraph, Triple};
pub use store::{GraphStore, MockStore, SparqlHttpStore};
pub use suggestion::{Suggester, Suggestion, SuggestionBatch, SuggestionFormatter};
pub use validation::{DataModelValidator, InvalidComponentReport, RdfFormat};
