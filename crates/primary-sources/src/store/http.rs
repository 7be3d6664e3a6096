//! SPARQL 1.1 protocol client.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::curation::Update;
use crate::error::{PrimarySourcesError, Result};

use super::results::{parse_results, Row};
use super::GraphStore;

const RESULTS_JSON: &str = "application/sparql-results+json";

/// Environment variable naming the query endpoint.
pub const QUERY_ENDPOINT_ENV: &str = "PRIMARY_SOURCES_QUERY_ENDPOINT";

/// Environment variable naming the update endpoint.
pub const UPDATE_ENDPOINT_ENV: &str = "PRIMARY_SOURCES_UPDATE_ENDPOINT";

/// Endpoints and transport settings for a SPARQL store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub query_endpoint: String,
    /// Defaults to the query endpoint.
    pub update_endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl StoreConfig {
    pub fn new(query_endpoint: impl Into<String>) -> Self {
        Self {
            query_endpoint: query_endpoint.into(),
            update_endpoint: None,
            timeout_secs: 60,
        }
    }

    pub fn with_update_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.update_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Read endpoints from the environment.
    pub fn from_env() -> Result<Self> {
        let query = std::env::var(QUERY_ENDPOINT_ENV).map_err(|_| {
            PrimarySourcesError::Config(format!("{} environment variable not set", QUERY_ENDPOINT_ENV))
        })?;
        let mut config = Self::new(query);
        config.update_endpoint = std::env::var(UPDATE_ENDPOINT_ENV).ok();
        Ok(config)
    }

    pub fn update_endpoint(&self) -> &str {
        self.update_endpoint.as_deref().unwrap_or(&self.query_endpoint)
    }
}

/// A graph store reached over HTTP.
pub struct SparqlHttpStore {
    client: Client,
    config: StoreConfig,
}

impl SparqlHttpStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PrimarySourcesError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(StoreConfig::from_env()?)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Read the body, turning a non-success status into a store error
    /// carrying the store's own message.
    fn body(response: Response) -> Result<String> {
        let status = response.status();
        let text = response.text().map_err(|e| PrimarySourcesError::Store {
            payload: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(Self::rejected(status, text));
        }
        Ok(text)
    }

    /// The store's message is passed on untouched; the status only goes to
    /// the log.
    fn rejected(status: StatusCode, text: String) -> PrimarySourcesError {
        warn!(status = %status, "Store rejected request");
        PrimarySourcesError::Store { payload: text }
    }
}

impl GraphStore for SparqlHttpStore {
    fn name(&self) -> &str {
        &self.config.query_endpoint
    }

    fn query(&self, query: &str) -> Result<Vec<Row>> {
        debug!(endpoint = %self.config.query_endpoint, "Sending query");
        let response = self
            .client
            .post(&self.config.query_endpoint)
            .header(ACCEPT, RESULTS_JSON)
            .form(&[("query", query)])
            .send()
            .map_err(|e| PrimarySourcesError::Store {
                payload: e.to_string(),
            })?;

        parse_results(&Self::body(response)?)
    }

    fn update(&self, update: &Update) -> Result<()> {
        let endpoint = self.config.update_endpoint();
        debug!(endpoint = %endpoint, "Sending update");
        let response = self
            .client
            .post(endpoint)
            .form(&[("update", update.to_string())])
            .send()
            .map_err(|e| PrimarySourcesError::Store {
                payload: e.to_string(),
            })?;

        Self::body(response).map(|_| ())
    }
}
