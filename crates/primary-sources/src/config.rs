//! Configuration for validation and curation.

use serde::{Deserialize, Serialize};

use crate::error::{PrimarySourcesError, Result};

/// Edit distance at or below which a namespace is reported as a typo.
pub const DEFAULT_TYPO_THRESHOLD: usize = 3;

/// Named graph holding curator activity counters and dataset records.
pub const DEFAULT_METADATA_GRAPH: &str = "http://www.wikidata.org/primary-sources/metadata";

/// Predicate of the per-curator activity counter.
pub const DEFAULT_ACTIVITY_PREDICATE: &str = "http://www.wikidata.org/primary-sources/activity";

/// Predicate linking a dataset to the user who uploaded it.
pub const DEFAULT_UPLOADER_PREDICATE: &str = "http://www.wikidata.org/primary-sources/uploader";

/// Namespace curator user names are appended to.
pub const DEFAULT_USER_NAMESPACE: &str = "http://www.wikidata.org/wiki/User:";

/// Top-level configuration shared by the validator, curator and ingestor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimarySourcesConfig {
    /// Namespace typo threshold for the statement validator.
    pub typo_threshold: usize,
    /// Metadata graph IRI.
    pub metadata_graph: String,
    /// Activity counter predicate IRI.
    pub activity_predicate: String,
    /// Uploader predicate IRI.
    pub uploader_predicate: String,
    /// User namespace IRI.
    pub user_namespace: String,
}

impl Default for PrimarySourcesConfig {
    fn default() -> Self {
        Self {
            typo_threshold: DEFAULT_TYPO_THRESHOLD,
            metadata_graph: DEFAULT_METADATA_GRAPH.to_string(),
            activity_predicate: DEFAULT_ACTIVITY_PREDICATE.to_string(),
            uploader_predicate: DEFAULT_UPLOADER_PREDICATE.to_string(),
            user_namespace: DEFAULT_USER_NAMESPACE.to_string(),
        }
    }
}

impl PrimarySourcesConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace typo threshold.
    pub fn with_typo_threshold(mut self, threshold: usize) -> Self {
        self.typo_threshold = threshold;
        self
    }

    /// Set the metadata graph IRI.
    pub fn with_metadata_graph(mut self, graph: impl Into<String>) -> Self {
        self.metadata_graph = graph.into();
        self
    }

    /// Set the activity counter predicate IRI.
    pub fn with_activity_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.activity_predicate = predicate.into();
        self
    }

    /// Set the user namespace IRI.
    pub fn with_user_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.user_namespace = namespace.into();
        self
    }

    /// Mint the IRI identifying a curator.
    pub fn user_iri(&self, user: &str) -> String {
        format!("{}{}", self.user_namespace, user.trim().replace(' ', "_"))
    }

    /// Check that every IRI-valued field is non-empty.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("metadata_graph", &self.metadata_graph),
            ("activity_predicate", &self.activity_predicate),
            ("uploader_predicate", &self.uploader_predicate),
            ("user_namespace", &self.user_namespace),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(PrimarySourcesError::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PrimarySourcesConfig::default();
        assert_eq!(config.typo_threshold, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_user_iri() {
        let config = PrimarySourcesConfig::new().with_user_namespace("http://example.org/user/");
        assert_eq!(config.user_iri("Hjfocs"), "http://example.org/user/Hjfocs");
        assert_eq!(config.user_iri("Some Curator"), "http://example.org/user/Some_Curator");
    }

    #[test]
    fn test_empty_field_rejected() {
        let config = PrimarySourcesConfig::new().with_metadata_graph("");
        assert!(matches!(config.validate(), Err(PrimarySourcesError::Config(_))));
    }
}
