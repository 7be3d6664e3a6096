//! Reassembling store rows into curator lines.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

use crate::codec::QuickStatement;
use crate::curation::split_dataset_graph;
use crate::model::GraphTerm;
use crate::store::Row;
use crate::term::statement_subject;
use crate::vocab::Namespace;

use super::{Suggestion, SuggestionBatch, SuggestionFailure};

pub const STATEMENT_VAR: &str = "statement";
pub const DATASET_VAR: &str = "dataset";
pub const PROPERTY_VAR: &str = "property";
pub const VALUE_VAR: &str = "value";

#[derive(Default)]
struct StatementGroup {
    main: Option<(String, GraphTerm)>,
    qualifiers: IndexSet<(String, GraphTerm)>,
    references: IndexSet<(String, GraphTerm)>,
}

/// Groups `(statement, dataset, property, value)` rows by statement node and
/// dataset graph and renders each group as curator lines.
///
/// Rows are routed by the namespace of `property`: `ps:` is the main value,
/// `pq:` a qualifier, `pr:` a reference value. Anything else is ignored. A
/// statement with N reference values yields N lines that repeat the main value
/// and qualifiers; one without references yields a single line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionFormatter;

impl SuggestionFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, rows: &[Row]) -> SuggestionBatch {
        let mut batch = SuggestionBatch::default();
        let mut groups: IndexMap<(String, String), StatementGroup> = IndexMap::new();

        for row in rows {
            let (Some(statement), Some(dataset)) = (row.iri(STATEMENT_VAR), row.iri(DATASET_VAR)) else {
                batch.failures.push(SuggestionFailure {
                    statement_node: row.iri(STATEMENT_VAR).map(str::to_string),
                    reason: "row without statement or dataset".to_string(),
                });
                continue;
            };
            let (Some(property), Some(value)) = (row.iri(PROPERTY_VAR), row.get(VALUE_VAR)) else {
                continue;
            };

            let group = groups
                .entry((statement.to_string(), dataset.to_string()))
                .or_default();

            match Namespace::resolve(property) {
                Some((Namespace::StatementProperty, pid)) => {
                    if group.main.is_none() {
                        group.main = Some((pid.to_string(), value.clone()));
                    } else {
                        debug!(statement, "Statement with more than one main value");
                    }
                }
                Some((Namespace::QualifierProperty, pid)) => {
                    group.qualifiers.insert((pid.to_string(), value.clone()));
                }
                Some((Namespace::ReferenceProperty, pid)) => {
                    group.references.insert((pid.to_string(), value.clone()));
                }
                _ => {}
            }
        }

        for ((statement, dataset), group) in groups {
            match Self::render(&statement, &dataset, group) {
                Ok(suggestions) => batch.suggestions.extend(suggestions),
                Err(reason) => {
                    warn!(statement = %statement, reason = %reason, "Skipping suggestion");
                    batch.failures.push(SuggestionFailure {
                        statement_node: Some(statement),
                        reason,
                    });
                }
            }
        }

        batch
    }

    fn render(statement: &str, dataset: &str, group: StatementGroup) -> Result<Vec<Suggestion>, String> {
        let subject = match Namespace::resolve(statement) {
            Some((Namespace::StatementNode, local)) => statement_subject(local),
            _ => None,
        }
        .ok_or_else(|| "not a statement node".to_string())?;
        let (property, value) = group.main.ok_or_else(|| "no main value".to_string())?;

        let mut base = QuickStatement::new(subject, property, value);
        for (pid, value) in group.qualifiers {
            base = base.with_qualifier(pid, value);
        }

        let dataset = split_dataset_graph(dataset)
            .map(|(base, _)| base)
            .unwrap_or(dataset);

        let statements = if group.references.is_empty() {
            vec![base]
        } else {
            group
                .references
                .into_iter()
                .map(|(pid, value)| base.clone().with_reference(pid, value))
                .collect()
        };

        statements
            .into_iter()
            .map(|statement_line| -> Result<Suggestion, String> {
                let line = statement_line.to_line().map_err(|e| e.to_string())?;
                Ok(Suggestion {
                    statement_node: statement.to_string(),
                    dataset: dataset.to_string(),
                    statement: statement_line,
                    line,
                })
            })
            .collect()
    }
}
