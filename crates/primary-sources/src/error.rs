//! Error types for the primary-sources library.

use thiserror::Error;

use crate::curation::Slot;

/// Main error type for primary-sources operations.
#[derive(Debug, Error)]
pub enum PrimarySourcesError {
    /// The submitted byte stream is not valid RDF.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: u64,
        column: u64,
        message: String,
    },

    /// A graph component does not fit the position it occupies.
    #[error("Structural violation: '{component}' is not a valid {expected}")]
    StructuralViolation { component: String, expected: String },

    /// A value token or JSON value matches none of the known value shapes.
    #[error("Ambiguous value: {raw}")]
    AmbiguousValue { raw: String },

    /// A literal carries a datatype the codec does not translate.
    #[error("Unsupported datatype: {iri}")]
    UnsupportedDatatype { iri: String },

    /// The external graph store rejected a query or update.
    #[error("Graph store error: {payload}")]
    Store { payload: String },

    /// A curator line violates the line grammar.
    #[error("Malformed curator line '{line}': {reason}")]
    MalformedLine { line: String, reason: String },

    /// A statement locator could not be built from a request.
    #[error("Invalid statement locator: {0}")]
    InvalidLocator(String),

    /// A curation decision names a state that is not reachable.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// An update template was instantiated without a value for one of its slots.
    #[error("Unbound update parameter: {0:?}")]
    UnboundParameter(Slot),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrimarySourcesError {
    /// Shorthand for an [`PrimarySourcesError::AmbiguousValue`].
    pub fn ambiguous(raw: impl Into<String>) -> Self {
        PrimarySourcesError::AmbiguousValue { raw: raw.into() }
    }

    /// Shorthand for a [`PrimarySourcesError::MalformedLine`].
    pub fn malformed_line(line: impl Into<String>, reason: impl Into<String>) -> Self {
        PrimarySourcesError::MalformedLine {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for primary-sources operations.
pub type Result<T> = std::result::Result<T, PrimarySourcesError>;
