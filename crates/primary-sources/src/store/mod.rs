//! The external graph store collaborator.
//!
//! Queries return variable bindings as [`Row`]s; updates are sent as bound
//! [`Update`] trees and must be applied atomically by the store.

mod http;
mod mock;
mod results;

pub use http::{SparqlHttpStore, StoreConfig, QUERY_ENDPOINT_ENV, UPDATE_ENDPOINT_ENV};
pub use mock::MockStore;
pub use results::{parse_results, Row};

use crate::curation::Update;
use crate::error::Result;

/// Trait for graph stores.
pub trait GraphStore: Send + Sync {
    /// Get the store name.
    fn name(&self) -> &str;

    /// Evaluate a read query and return its solutions.
    fn query(&self, query: &str) -> Result<Vec<Row>>;

    /// Apply an update as one atomic operation.
    fn update(&self, update: &Update) -> Result<()>;
}
