//! Curator lines (QuickStatements).
//!
//! `QID \t PID \t VALUE ( \t PID \t VALUE )* ( \t S<digits> \t VALUE )*`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PrimarySourcesError, Result};
use crate::model::GraphTerm;
use crate::term::{is_valid_term, TermKind};

use super::token::{curator_token_to_graph_term, graph_term_to_curator_token};

/// A property/value pair attached to a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snak {
    /// Property id in `P` form, also for references.
    pub property: String,
    pub value: GraphTerm,
}

impl Snak {
    pub fn new(property: impl Into<String>, value: GraphTerm) -> Self {
        Self {
            property: property.into(),
            value,
        }
    }
}

/// One statement with its qualifiers and references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickStatement {
    pub subject: String,
    pub property: String,
    pub value: GraphTerm,
    #[serde(default)]
    pub qualifiers: Vec<Snak>,
    #[serde(default)]
    pub references: Vec<Snak>,
}

impl QuickStatement {
    pub fn new(subject: impl Into<String>, property: impl Into<String>, value: GraphTerm) -> Self {
        Self {
            subject: subject.into(),
            property: property.into(),
            value,
            qualifiers: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn with_qualifier(mut self, property: impl Into<String>, value: GraphTerm) -> Self {
        self.qualifiers.push(Snak::new(property, value));
        self
    }

    pub fn with_reference(mut self, property: impl Into<String>, value: GraphTerm) -> Self {
        self.references.push(Snak::new(property, value));
        self
    }

    /// Parse a tab-separated curator line.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let tokens: Vec<&str> = line.split('\t').collect();
        let bad = |reason: &str| PrimarySourcesError::malformed_line(line, reason);

        if tokens.len() < 3 {
            return Err(bad("expected at least 3 tab-separated fields"));
        }
        if !is_valid_term(tokens[0], TermKind::Item) {
            return Err(bad("first field is not an item id"));
        }
        if !is_valid_term(tokens[1], TermKind::Property) {
            return Err(bad("second field is not a property id"));
        }
        if tokens.len() % 2 == 0 {
            return Err(bad("property without a value"));
        }

        let mut statement = QuickStatement::new(
            tokens[0],
            tokens[1],
            curator_token_to_graph_term(tokens[2])?,
        );

        for pair in tokens[3..].chunks(2) {
            let (property, value) = (pair[0], pair[1]);
            let value = curator_token_to_graph_term(value)?;

            if let Some(digits) = property.strip_prefix('S') {
                let property = format!("P{}", digits);
                if !is_valid_term(&property, TermKind::Property) {
                    return Err(bad("reference property is not S followed by digits"));
                }
                statement.references.push(Snak::new(property, value));
            } else if is_valid_term(property, TermKind::Property) {
                if !statement.references.is_empty() {
                    return Err(bad("qualifier after a reference"));
                }
                statement.qualifiers.push(Snak::new(property, value));
            } else {
                return Err(bad("unrecognized property field"));
            }
        }

        Ok(statement)
    }

    /// Render as a tab-separated curator line.
    pub fn to_line(&self) -> Result<String> {
        let mut tokens = vec![
            self.subject.clone(),
            self.property.clone(),
            graph_term_to_curator_token(&self.value)?,
        ];
        for snak in &self.qualifiers {
            tokens.push(snak.property.clone());
            tokens.push(graph_term_to_curator_token(&snak.value)?);
        }
        for snak in &self.references {
            tokens.push(snak.property.replacen('P', "S", 1));
            tokens.push(graph_term_to_curator_token(&snak.value)?);
        }
        Ok(tokens.join("\t"))
    }
}

impl fmt::Display for QuickStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_line() {
            Ok(line) => f.write_str(&line),
            Err(_) => write!(f, "{}\t{}\t{}", self.subject, self.property, self.value),
        }
    }
}
