//! Triple classification and per-shape validators.

use serde::{Deserialize, Serialize};

use crate::model::{GraphTerm, Triple};
use crate::term::{classify_namespace, is_valid_resource, NamespaceMatch, TermKind};
use crate::vocab::{self, Namespace};

use super::violation::{ExpectedKind, StructuralViolation};

/// Which of the five shapes a triple claims to be, judged by namespace prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripleKind {
    ItemTriple,
    StatementTriple,
    ReferenceTriple,
    QualifierTriple,
    ReferenceValueTriple,
    Unrecognized,
}

/// Classify a triple by the namespaces of its subject and predicate.
///
/// Statement-node subjects with a predicate outside `prov:`/`pq:` are
/// treated as statement triples, so the predicate check reports them.
pub fn classify(triple: &Triple) -> TripleKind {
    let Some(subject) = triple.subject.as_iri() else {
        return TripleKind::Unrecognized;
    };

    if subject.starts_with(vocab::STATEMENT_NODE) {
        if triple.predicate == vocab::DERIVED_FROM {
            TripleKind::ReferenceTriple
        } else if triple.predicate.starts_with(vocab::QUALIFIER_PROPERTY) {
            TripleKind::QualifierTriple
        } else {
            TripleKind::StatementTriple
        }
    } else if subject.starts_with(vocab::ENTITY) {
        TripleKind::ItemTriple
    } else if subject.starts_with(vocab::REFERENCE_NODE) {
        TripleKind::ReferenceValueTriple
    } else {
        TripleKind::Unrecognized
    }
}

/// Validates triples of one shape.
pub trait PatternValidator: Send + Sync {
    /// The shape this validator checks.
    fn kind(&self) -> TripleKind;

    /// Components of `triple` that do not fit their position.
    fn validate(&self, triple: &Triple) -> Vec<StructuralViolation>;
}

/// `wd:Q… p:P… wds:Q…-<uuid>`
pub struct ItemPatternValidator;

impl PatternValidator for ItemPatternValidator {
    fn kind(&self) -> TripleKind {
        TripleKind::ItemTriple
    }

    fn validate(&self, triple: &Triple) -> Vec<StructuralViolation> {
        let mut violations = Vec::new();
        check_node(&triple.subject, Namespace::Entity, TermKind::Item, ExpectedKind::Item, &mut violations);
        check_property(&triple.predicate, Namespace::ClaimProperty, ExpectedKind::ClaimProperty, &mut violations);
        check_node(
            &triple.object,
            Namespace::StatementNode,
            TermKind::Statement,
            ExpectedKind::StatementNode,
            &mut violations,
        );
        violations
    }
}

/// `wds:Q…-<uuid> ps:P… <value>`
pub struct StatementPatternValidator {
    typo_threshold: usize,
}

impl StatementPatternValidator {
    pub fn new(typo_threshold: usize) -> Self {
        Self { typo_threshold }
    }
}

impl PatternValidator for StatementPatternValidator {
    fn kind(&self) -> TripleKind {
        TripleKind::StatementTriple
    }

    fn validate(&self, triple: &Triple) -> Vec<StructuralViolation> {
        let mut violations = Vec::new();
        check_node(
            &triple.subject,
            Namespace::StatementNode,
            TermKind::Statement,
            ExpectedKind::StatementNode,
            &mut violations,
        );
        check_property(
            &triple.predicate,
            Namespace::StatementProperty,
            ExpectedKind::StatementProperty,
            &mut violations,
        );
        check_value(&triple.object, self.typo_threshold, &mut violations);
        violations
    }
}

/// `wds:Q…-<uuid> prov:wasDerivedFrom wdref:<sha1>`
pub struct ReferencePatternValidator;

impl PatternValidator for ReferencePatternValidator {
    fn kind(&self) -> TripleKind {
        TripleKind::ReferenceTriple
    }

    fn validate(&self, triple: &Triple) -> Vec<StructuralViolation> {
        let mut violations = Vec::new();
        check_node(
            &triple.subject,
            Namespace::StatementNode,
            TermKind::Statement,
            ExpectedKind::StatementNode,
            &mut violations,
        );
        if triple.predicate != vocab::DERIVED_FROM {
            violations.push(StructuralViolation::new(
                triple.predicate.as_str(),
                ExpectedKind::ProvenancePredicate,
            ));
        }
        check_node(
            &triple.object,
            Namespace::ReferenceNode,
            TermKind::Reference,
            ExpectedKind::ReferenceNode,
            &mut violations,
        );
        violations
    }
}

/// `wds:Q…-<uuid> pq:P… <value>`
pub struct QualifierPatternValidator;

impl PatternValidator for QualifierPatternValidator {
    fn kind(&self) -> TripleKind {
        TripleKind::QualifierTriple
    }

    fn validate(&self, triple: &Triple) -> Vec<StructuralViolation> {
        let mut violations = Vec::new();
        check_node(
            &triple.subject,
            Namespace::StatementNode,
            TermKind::Statement,
            ExpectedKind::StatementNode,
            &mut violations,
        );
        check_property(
            &triple.predicate,
            Namespace::QualifierProperty,
            ExpectedKind::QualifierProperty,
            &mut violations,
        );
        match &triple.object {
            GraphTerm::Iri(_) => check_node(
                &triple.object,
                Namespace::Entity,
                TermKind::Item,
                ExpectedKind::Item,
                &mut violations,
            ),
            GraphTerm::Blank(_) => {
                violations.push(StructuralViolation::new(triple.object.component(), ExpectedKind::Value))
            }
            _ => {}
        }
        violations
    }
}

/// `wdref:<sha1> pr:P… <value>`
pub struct ReferenceValuePatternValidator {
    typo_threshold: usize,
}

impl ReferenceValuePatternValidator {
    pub fn new(typo_threshold: usize) -> Self {
        Self { typo_threshold }
    }
}

impl PatternValidator for ReferenceValuePatternValidator {
    fn kind(&self) -> TripleKind {
        TripleKind::ReferenceValueTriple
    }

    fn validate(&self, triple: &Triple) -> Vec<StructuralViolation> {
        let mut violations = Vec::new();
        check_node(
            &triple.subject,
            Namespace::ReferenceNode,
            TermKind::Reference,
            ExpectedKind::ReferenceNode,
            &mut violations,
        );
        check_property(
            &triple.predicate,
            Namespace::ReferenceProperty,
            ExpectedKind::ReferenceProperty,
            &mut violations,
        );
        check_value(&triple.object, self.typo_threshold, &mut violations);
        violations
    }
}

fn check_node(
    term: &GraphTerm,
    namespace: Namespace,
    kind: TermKind,
    expected: ExpectedKind,
    violations: &mut Vec<StructuralViolation>,
) {
    let valid = term
        .as_iri()
        .map(|iri| is_valid_resource(iri, namespace, kind))
        .unwrap_or(false);
    if !valid {
        violations.push(StructuralViolation::new(term.component(), expected));
    }
}

fn check_property(
    predicate: &str,
    namespace: Namespace,
    expected: ExpectedKind,
    violations: &mut Vec<StructuralViolation>,
) {
    if !is_valid_resource(predicate, namespace, TermKind::Property) {
        violations.push(StructuralViolation::new(predicate, expected));
    }
}

/// Objects of statement and reference-value triples.
///
/// Literals pass. IRIs in the item namespace must be items; anything else
/// under the root domain is rejected outright; other IRIs are rejected only
/// when their namespace is within `threshold` edits of the item namespace.
fn check_value(object: &GraphTerm, threshold: usize, violations: &mut Vec<StructuralViolation>) {
    let iri = match object {
        GraphTerm::Iri(iri) => iri,
        GraphTerm::Blank(_) => {
            violations.push(StructuralViolation::new(object.component(), ExpectedKind::Value));
            return;
        }
        _ => return,
    };

    if iri.starts_with(vocab::ENTITY) {
        if !is_valid_resource(iri, Namespace::Entity, TermKind::Item) {
            violations.push(StructuralViolation::new(iri.as_str(), ExpectedKind::Item));
        }
        return;
    }
    if iri.starts_with(vocab::ROOT) {
        tracing::debug!(resource = %iri, "root-domain resource outside the item namespace");
        violations.push(StructuralViolation::new(iri.as_str(), ExpectedKind::Item));
        return;
    }

    match classify_namespace(iri, vocab::ENTITY, threshold) {
        NamespaceMatch::Typo { distance } => {
            tracing::debug!(resource = %iri, distance, "likely typo of the item namespace");
            violations.push(StructuralViolation::new(iri.as_str(), ExpectedKind::Item));
        }
        NamespaceMatch::Foreign { distance } => {
            tracing::trace!(resource = %iri, distance, "foreign resource kept as a link value");
        }
        NamespaceMatch::Exact => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = "http://www.wikidata.org/entity/Q5921";
    const STATEMENT: &str =
        "http://www.wikidata.org/entity/statement/Q5921-a3b4c5d6-1234-4abc-9def-0123456789ab";
    const REFERENCE: &str = "http://www.wikidata.org/reference/288ab581e7d2d02995a26dfa8b091d96e78457fc";

    fn triple(s: &str, p: &str, o: GraphTerm) -> Triple {
        Triple::iri(s, p, o)
    }

    #[test]
    fn test_classify_each_shape() {
        let cases = [
            (triple(ITEM, "http://www.wikidata.org/prop/P18", GraphTerm::iri(STATEMENT)), TripleKind::ItemTriple),
            (
                triple(STATEMENT, "http://www.wikidata.org/prop/statement/P18", GraphTerm::plain("x")),
                TripleKind::StatementTriple,
            ),
            (triple(STATEMENT, vocab::DERIVED_FROM, GraphTerm::iri(REFERENCE)), TripleKind::ReferenceTriple),
            (
                triple(STATEMENT, "http://www.wikidata.org/prop/qualifier/P2096", GraphTerm::plain("x")),
                TripleKind::QualifierTriple,
            ),
            (
                triple(REFERENCE, "http://www.wikidata.org/prop/reference/P854", GraphTerm::plain("x")),
                TripleKind::ReferenceValueTriple,
            ),
            (
                triple("http://example.org/x", "http://example.org/p", GraphTerm::plain("x")),
                TripleKind::Unrecognized,
            ),
        ];
        for (triple, expected) in cases {
            assert_eq!(classify(&triple), expected, "{}", triple);
        }
    }

    #[test]
    fn test_blank_subject_unrecognized() {
        let t = Triple::new(GraphTerm::Blank("b0".into()), vocab::DERIVED_FROM, GraphTerm::plain("x"));
        assert_eq!(classify(&t), TripleKind::Unrecognized);
    }

    #[test]
    fn test_item_pattern_bad_predicate() {
        let t = triple(ITEM, "http://www.wikidata.org/prpo/P18", GraphTerm::iri(STATEMENT));
        let violations = ItemPatternValidator.validate(&t);
        assert_eq!(
            violations,
            vec![StructuralViolation::new("http://www.wikidata.org/prpo/P18", ExpectedKind::ClaimProperty)]
        );
    }

    #[test]
    fn test_item_pattern_literal_object() {
        let t = triple(ITEM, "http://www.wikidata.org/prop/P18", GraphTerm::plain("x"));
        let violations = ItemPatternValidator.validate(&t);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].expected, ExpectedKind::StatementNode);
    }

    #[test]
    fn test_statement_value_objects() {
        let validator = StatementPatternValidator::new(3);
        let ps = "http://www.wikidata.org/prop/statement/P18";

        // literal and foreign links pass
        assert!(validator.validate(&triple(STATEMENT, ps, GraphTerm::plain("x"))).is_empty());
        assert!(validator
            .validate(&triple(STATEMENT, ps, GraphTerm::iri("http://www.example.org/totallyelse/pic.jpg")))
            .is_empty());

        // malformed item, root-domain resource, and near-miss namespace fail
        for bad in [
            "http://www.wikidata.org/entity/Q59x",
            "http://www.wikidata.org/wiki/Q5921",
            "http://www.wikidata.orgg/entity/Q5921",
        ] {
            let violations = validator.validate(&triple(STATEMENT, ps, GraphTerm::iri(bad)));
            assert_eq!(violations, vec![StructuralViolation::new(bad, ExpectedKind::Item)]);
        }
    }

    #[test]
    fn test_statement_pattern_unknown_predicate() {
        let validator = StatementPatternValidator::new(3);
        let t = triple(STATEMENT, "http://www.w3.org/2000/01/rdf-schema#label", GraphTerm::plain("x"));
        assert_eq!(validator.validate(&t)[0].expected, ExpectedKind::StatementProperty);
    }

    #[test]
    fn test_reference_pattern() {
        let ok = triple(STATEMENT, vocab::DERIVED_FROM, GraphTerm::iri(REFERENCE));
        assert!(ReferencePatternValidator.validate(&ok).is_empty());

        let bad = triple(STATEMENT, vocab::DERIVED_FROM, GraphTerm::iri("http://www.wikidata.org/reference/XYZ"));
        assert_eq!(ReferencePatternValidator.validate(&bad)[0].expected, ExpectedKind::ReferenceNode);
    }

    #[test]
    fn test_qualifier_iri_must_be_item() {
        let pq = "http://www.wikidata.org/prop/qualifier/P2096";
        assert!(QualifierPatternValidator.validate(&triple(STATEMENT, pq, GraphTerm::iri(ITEM))).is_empty());
        assert!(QualifierPatternValidator
            .validate(&triple(STATEMENT, pq, GraphTerm::lang("caption", "en")))
            .is_empty());
        assert_eq!(
            QualifierPatternValidator
                .validate(&triple(STATEMENT, pq, GraphTerm::iri("http://example.org/x")))
                .len(),
            1
        );
    }

    #[test]
    fn test_reference_value_pattern() {
        let validator = ReferenceValuePatternValidator::new(3);
        let pr = "http://www.wikidata.org/prop/reference/P854";
        assert!(validator
            .validate(&triple(REFERENCE, pr, GraphTerm::iri("http://example.org/source")))
            .is_empty());
        assert_eq!(
            validator
                .validate(&triple(REFERENCE, pr, GraphTerm::iri("http://www.wikidata.orgg/entity/Q1")))
                .len(),
            1
        );
    }
}
