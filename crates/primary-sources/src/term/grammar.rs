//! The four identifier grammars.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::vocab::Namespace;

static ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Q\d+$").unwrap());

static PROPERTY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^P\d+$").unwrap());

static STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(Q\d+)-[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    )
    .unwrap()
});

static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-f]{40}$").unwrap());

/// Kind of identifier a term is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    /// `Q` followed by digits.
    Item,
    /// `P` followed by digits.
    Property,
    /// Statement node local name: an item id, a dash, and a UUID.
    Statement,
    /// Reference node local name: 40 lowercase hex digits.
    Reference,
}

impl TermKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TermKind::Item => "item",
            TermKind::Property => "property",
            TermKind::Statement => "statement node",
            TermKind::Reference => "reference node",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            TermKind::Item => &ITEM,
            TermKind::Property => &PROPERTY,
            TermKind::Statement => &STATEMENT,
            TermKind::Reference => &REFERENCE,
        }
    }
}

/// Check a bare identifier against the grammar of `kind`.
pub fn is_valid_term(term: &str, kind: TermKind) -> bool {
    kind.pattern().is_match(term)
}

/// Check that `iri` lives directly in `namespace` and its local name fits `kind`.
pub fn is_valid_resource(iri: &str, namespace: Namespace, kind: TermKind) -> bool {
    iri.strip_prefix(namespace.iri())
        .map(|local| is_valid_term(local, kind))
        .unwrap_or(false)
}

/// Numeric part of an item id (`Q5921` -> 5921).
pub fn item_numeric_id(item: &str) -> Option<u64> {
    if !is_valid_term(item, TermKind::Item) {
        return None;
    }
    item[1..].parse().ok()
}

/// Item id a statement node belongs to (`Q5921-<uuid>` -> `Q5921`).
pub fn statement_subject(statement: &str) -> Option<&str> {
    STATEMENT
        .captures(statement)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const UUID: &str = "a3b4c5d6-1234-4abc-9def-0123456789ab";

    #[test]
    fn test_item_grammar() {
        assert!(is_valid_term("Q5921", TermKind::Item));
        assert!(!is_valid_term("q5921", TermKind::Item));
        assert!(!is_valid_term("Q", TermKind::Item));
        assert!(!is_valid_term("Q59x", TermKind::Item));
        assert!(!is_valid_term("P5921", TermKind::Item));
    }

    #[test]
    fn test_property_grammar() {
        assert!(is_valid_term("P18", TermKind::Property));
        assert!(!is_valid_term("S18", TermKind::Property));
        assert!(!is_valid_term("P18 ", TermKind::Property));
    }

    #[test]
    fn test_statement_grammar() {
        assert!(is_valid_term(&format!("Q5921-{}", UUID), TermKind::Statement));
        assert!(!is_valid_term(&format!("Q5921{}", UUID), TermKind::Statement));
        assert!(!is_valid_term("Q5921-not-a-uuid", TermKind::Statement));
    }

    #[test]
    fn test_reference_grammar() {
        let sha1 = "288ab581e7d2d02995a26dfa8b091d96e78457fc";
        assert!(is_valid_term(sha1, TermKind::Reference));
        assert!(!is_valid_term(&sha1.to_uppercase(), TermKind::Reference));
        assert!(!is_valid_term(&sha1[1..], TermKind::Reference));
    }

    #[test]
    fn test_resource_namespace() {
        assert!(is_valid_resource(
            "http://www.wikidata.org/entity/Q42",
            Namespace::Entity,
            TermKind::Item
        ));
        assert!(!is_valid_resource(
            "http://www.wikidata.orgg/entity/Q42",
            Namespace::Entity,
            TermKind::Item
        ));
        assert!(!is_valid_resource(
            "http://www.wikidata.org/prop/statement/P18",
            Namespace::ClaimProperty,
            TermKind::Property
        ));
    }

    #[test]
    fn test_helpers() {
        assert_eq!(item_numeric_id("Q5921"), Some(5921));
        assert_eq!(item_numeric_id("P5921"), None);
        assert_eq!(statement_subject(&format!("Q5921-{}", UUID)), Some("Q5921"));
        assert_eq!(statement_subject("Q5921"), None);
    }
}
