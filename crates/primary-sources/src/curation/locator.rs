//! Statement locators: which statement a decision applies to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::QuickStatement;
use crate::error::{PrimarySourcesError, Result};
use crate::model::GraphTerm;
use crate::term::{is_valid_term, TermKind};

/// What part of a statement a decision targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Claim,
    Qualifier,
    Reference,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::Claim => "claim",
            StatementKind::Qualifier => "qualifier",
            StatementKind::Reference => "reference",
        };
        f.write_str(name)
    }
}

impl FromStr for StatementKind {
    type Err = PrimarySourcesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "claim" => Ok(StatementKind::Claim),
            "qualifier" => Ok(StatementKind::Qualifier),
            "reference" => Ok(StatementKind::Reference),
            other => Err(PrimarySourcesError::InvalidLocator(format!("unknown statement type: {}", other))),
        }
    }
}

/// Identifies a claim, qualifier or reference value within a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLocator {
    pub subject_id: String,
    pub main_property_id: String,
    /// Equal to `main_property_id` for claims.
    pub property_id: String,
    pub value: GraphTerm,
    pub kind: StatementKind,
}

impl StatementLocator {
    /// Build a locator, checking the identifier grammars.
    pub fn new(
        subject_id: impl Into<String>,
        main_property_id: impl Into<String>,
        property_id: impl Into<String>,
        value: GraphTerm,
        kind: StatementKind,
    ) -> Result<Self> {
        let locator = Self {
            subject_id: subject_id.into(),
            main_property_id: main_property_id.into(),
            property_id: property_id.into(),
            value,
            kind,
        };

        if !is_valid_term(&locator.subject_id, TermKind::Item) {
            return Err(PrimarySourcesError::InvalidLocator(format!(
                "'{}' is not an item id",
                locator.subject_id
            )));
        }
        for property in [&locator.main_property_id, &locator.property_id] {
            if !is_valid_term(property, TermKind::Property) {
                return Err(PrimarySourcesError::InvalidLocator(format!(
                    "'{}' is not a property id",
                    property
                )));
            }
        }
        if kind == StatementKind::Claim && locator.property_id != locator.main_property_id {
            return Err(PrimarySourcesError::InvalidLocator(
                "a claim's property must be its main property".to_string(),
            ));
        }
        if matches!(locator.value, GraphTerm::Blank(_)) {
            return Err(PrimarySourcesError::InvalidLocator("blank node value".to_string()));
        }

        Ok(locator)
    }

    pub fn claim(subject_id: &str, property_id: &str, value: GraphTerm) -> Result<Self> {
        Self::new(subject_id, property_id, property_id, value, StatementKind::Claim)
    }

    pub fn qualifier(subject_id: &str, main_property_id: &str, property_id: &str, value: GraphTerm) -> Result<Self> {
        Self::new(subject_id, main_property_id, property_id, value, StatementKind::Qualifier)
    }

    pub fn reference(subject_id: &str, main_property_id: &str, property_id: &str, value: GraphTerm) -> Result<Self> {
        Self::new(subject_id, main_property_id, property_id, value, StatementKind::Reference)
    }

    /// Locate the single part a curator line singles out.
    ///
    /// A bare statement is a claim; one trailing qualifier or reference pair
    /// targets that qualifier or reference value.
    pub fn from_quickstatement(statement: &QuickStatement) -> Result<Self> {
        match (statement.qualifiers.as_slice(), statement.references.as_slice()) {
            ([], []) => Self::claim(&statement.subject, &statement.property, statement.value.clone()),
            ([qualifier], []) => Self::qualifier(
                &statement.subject,
                &statement.property,
                &qualifier.property,
                qualifier.value.clone(),
            ),
            ([], [reference]) => Self::reference(
                &statement.subject,
                &statement.property,
                &reference.property,
                reference.value.clone(),
            ),
            _ => Err(PrimarySourcesError::InvalidLocator(
                "a curator line must carry at most one qualifier or reference".to_string(),
            )),
        }
    }

    /// Parse a curator line and locate it.
    pub fn from_curator_line(line: &str) -> Result<Self> {
        Self::from_quickstatement(&QuickStatement::parse(line)?)
    }
}
