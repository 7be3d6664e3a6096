//! Structural violations and the invalid-component report.

use serde::{Deserialize, Serialize};

use crate::error::PrimarySourcesError;

/// What a rejected component was expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedKind {
    Item,
    ClaimProperty,
    StatementNode,
    StatementProperty,
    QualifierProperty,
    ReferenceProperty,
    ProvenancePredicate,
    ReferenceNode,
    /// A literal, a foreign link, or an item.
    Value,
    /// One of the five triple shapes.
    KnownPattern,
}

impl ExpectedKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ExpectedKind::Item => "item",
            ExpectedKind::ClaimProperty => "claim property",
            ExpectedKind::StatementNode => "statement node",
            ExpectedKind::StatementProperty => "statement property",
            ExpectedKind::QualifierProperty => "qualifier property",
            ExpectedKind::ReferenceProperty => "reference property",
            ExpectedKind::ProvenancePredicate => "provenance predicate",
            ExpectedKind::ReferenceNode => "reference node",
            ExpectedKind::Value => "statement value",
            ExpectedKind::KnownPattern => "triple of a known shape",
        }
    }
}

/// One component that failed its positional check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralViolation {
    /// Raw string form of the subject, predicate, object, or whole triple.
    pub component: String,
    pub expected: ExpectedKind,
}

impl StructuralViolation {
    pub fn new(component: impl Into<String>, expected: ExpectedKind) -> Self {
        Self {
            component: component.into(),
            expected,
        }
    }
}

impl From<StructuralViolation> for PrimarySourcesError {
    fn from(violation: StructuralViolation) -> Self {
        PrimarySourcesError::StructuralViolation {
            component: violation.component,
            expected: violation.expected.label().to_string(),
        }
    }
}

/// Ordered invalid components of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidComponentReport {
    violations: Vec<StructuralViolation>,
}

impl InvalidComponentReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, violations: impl IntoIterator<Item = StructuralViolation>) {
        self.violations.extend(violations);
    }

    pub fn violations(&self) -> &[StructuralViolation] {
        &self.violations
    }

    /// Raw component strings, in input order.
    pub fn components(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.component.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}
