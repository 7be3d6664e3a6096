//! Partitioning a graph into valid triples and an invalid-component report.

use serde::{Deserialize, Serialize};

use crate::config::{PrimarySourcesConfig, DEFAULT_TYPO_THRESHOLD};
use crate::error::Result;
use crate::model::{ParsedGraph, Triple};
use crate::term::{classify_namespace, NamespaceMatch};
use crate::vocab;

use super::patterns::{
    classify, ItemPatternValidator, PatternValidator, QualifierPatternValidator,
    ReferencePatternValidator, ReferenceValuePatternValidator, StatementPatternValidator, TripleKind,
};
use super::syntax::{check_syntax, RdfFormat};
use super::violation::{ExpectedKind, InvalidComponentReport, StructuralViolation};

/// Configuration for the statement validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Namespaces within this many edits of the expected one are typos.
    pub typo_threshold: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            typo_threshold: DEFAULT_TYPO_THRESHOLD,
        }
    }
}

impl From<&PrimarySourcesConfig> for ValidatorConfig {
    fn from(config: &PrimarySourcesConfig) -> Self {
        Self {
            typo_threshold: config.typo_threshold,
        }
    }
}

/// Result of partitioning a graph.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Triples with no invalid component.
    pub valid: ParsedGraph,
    /// Invalid components of every other triple, in input order.
    pub report: InvalidComponentReport,
}

impl ValidationOutcome {
    /// Whether every triple was kept.
    pub fn is_fully_valid(&self) -> bool {
        self.report.is_empty()
    }
}

/// Checks contributed graphs against the five triple shapes.
pub struct DataModelValidator {
    config: ValidatorConfig,
    validators: Vec<Box<dyn PatternValidator>>,
}

impl DataModelValidator {
    /// Create a validator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create a validator with a custom configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        let validators: Vec<Box<dyn PatternValidator>> = vec![
            Box::new(ItemPatternValidator),
            Box::new(StatementPatternValidator::new(config.typo_threshold)),
            Box::new(ReferencePatternValidator),
            Box::new(QualifierPatternValidator),
            Box::new(ReferenceValuePatternValidator::new(config.typo_threshold)),
        ];
        Self { config, validators }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Invalid components of a single triple.
    pub fn validate_triple(&self, triple: &Triple) -> Vec<StructuralViolation> {
        let kind = classify(triple);
        match self.validators.iter().find(|v| v.kind() == kind) {
            Some(validator) => validator.validate(triple),
            None => {
                self.log_unrecognized(triple);
                vec![StructuralViolation::new(triple.to_string(), ExpectedKind::KnownPattern)]
            }
        }
    }

    /// Split a graph into its valid subset and a report of everything dropped.
    pub fn partition(&self, graph: &ParsedGraph) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();

        for triple in graph {
            let violations = self.validate_triple(triple);
            if violations.is_empty() {
                outcome.valid.insert(triple.clone());
            } else {
                tracing::debug!(triple = %triple, invalid = violations.len(), "dropping triple");
                outcome.report.extend(violations);
            }
        }

        tracing::info!(
            total = graph.len(),
            valid = outcome.valid.len(),
            invalid_components = outcome.report.len(),
            "validated dataset"
        );
        outcome
    }

    /// Parse and partition in one step. Syntax errors abort the whole input.
    pub fn check(&self, bytes: &[u8], base_uri: &str, format: RdfFormat) -> Result<ValidationOutcome> {
        let graph = check_syntax(bytes, base_uri, format)?;
        Ok(self.partition(&graph))
    }

    fn log_unrecognized(&self, triple: &Triple) {
        let Some(subject) = triple.subject.as_iri() else {
            tracing::debug!(triple = %triple, "blank-node subject");
            return;
        };
        let closest = [vocab::ENTITY, vocab::STATEMENT_NODE, vocab::REFERENCE_NODE]
            .into_iter()
            .map(|ns| classify_namespace(subject, ns, self.config.typo_threshold))
            .min_by_key(|m| match m {
                NamespaceMatch::Exact => 0,
                NamespaceMatch::Typo { distance } | NamespaceMatch::Foreign { distance } => *distance,
            });
        match closest {
            Some(NamespaceMatch::Typo { distance }) => {
                tracing::warn!(subject, distance, "subject namespace looks like a typo");
            }
            _ => tracing::debug!(subject, "subject outside every known namespace"),
        }
    }
}

impl Default for DataModelValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GraphTerm;

    #[test]
    fn test_unrecognized_triple_reported_whole() {
        let t = Triple::iri("http://example.org/s", "http://example.org/p", GraphTerm::plain("o"));
        let validator = DataModelValidator::new();
        let violations = validator.validate_triple(&t);
        assert_eq!(
            violations,
            vec![StructuralViolation::new(
                "<http://example.org/s> <http://example.org/p> \"o\" .",
                ExpectedKind::KnownPattern
            )]
        );
    }

    #[test]
    fn test_partition_empty_graph() {
        let outcome = DataModelValidator::new().partition(&ParsedGraph::new());
        assert!(outcome.valid.is_empty());
        assert!(outcome.is_fully_valid());
    }
}
