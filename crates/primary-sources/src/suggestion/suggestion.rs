//! Suggestion types handed to the curation front end.

use serde::{Deserialize, Serialize};

use crate::codec::QuickStatement;

/// One pending statement rendered as a curator line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// IRI of the statement node the line was assembled from.
    pub statement_node: String,

    /// Base URI of the dataset holding the statement.
    pub dataset: String,

    /// Structured form of the line.
    pub statement: QuickStatement,

    /// Tab-separated curator line.
    pub line: String,
}

/// A statement that could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionFailure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_node: Option<String>,
    pub reason: String,
}

/// Formatter output: rendered lines plus whatever had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionBatch {
    pub suggestions: Vec<Suggestion>,
    pub failures: Vec<SuggestionFailure>,
}

impl SuggestionBatch {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.suggestions.iter().map(|s| s.line.as_str())
    }
}

/// A dataset with pending statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub dataset: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uploaders: Vec<String>,
}

/// A curator's decision count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub user: String,
    pub activities: u64,
}
