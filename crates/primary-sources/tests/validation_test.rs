//! Integration tests for syntax checking and structural validation.

mod common;

use common::*;
use primary_sources::validation::{check_syntax, DataModelValidator, ExpectedKind, RdfFormat, ValidatorConfig};
use primary_sources::{GraphTerm, PrimarySourcesError, Triple};

fn dataset(claim_namespace: &str) -> String {
    format!(
        "<{item}> <{claim}P18> <{st}> .\n\
         <{st}> <{ps}P18> \"http://example.org/Q5921.jpg\" .\n\
         <{st}> <{pq}P2096> \"caption\"@en .\n",
        item = ITEM,
        claim = claim_namespace,
        st = STATEMENT,
        ps = primary_sources::vocab::STATEMENT_PROPERTY,
        pq = primary_sources::vocab::QUALIFIER_PROPERTY,
    )
}

// =============================================================================
// Validation Scenario
// =============================================================================

#[test]
fn test_well_formed_dataset_is_fully_valid() {
    let outcome = DataModelValidator::new()
        .check(dataset(primary_sources::vocab::CLAIM_PROPERTY).as_bytes(), "http://example.org/", RdfFormat::NTriples)
        .unwrap();

    assert_eq!(outcome.valid.len(), 3);
    assert!(outcome.report.is_empty());
}

#[test]
fn test_misspelled_claim_namespace_drops_one_triple() {
    let outcome = DataModelValidator::new()
        .check(dataset("http://www.wikidata.org/prpo/").as_bytes(), "http://example.org/", RdfFormat::NTriples)
        .unwrap();

    assert_eq!(outcome.valid.len(), 2);
    assert_eq!(outcome.report.components(), vec!["http://www.wikidata.org/prpo/P18"]);
    assert_eq!(outcome.report.violations()[0].expected, ExpectedKind::ClaimProperty);
}

#[test]
fn test_turtle_and_rdfxml_agree() {
    let turtle = format!(
        "@prefix wd: <http://www.wikidata.org/entity/> .\n\
         @prefix p: <http://www.wikidata.org/prop/> .\n\
         wd:Q5921 p:P18 <{}> .\n",
        STATEMENT
    );
    let rdfxml = format!(
        r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:p="http://www.wikidata.org/prop/">
  <rdf:Description rdf:about="{}">
    <p:P18 rdf:resource="{}"/>
  </rdf:Description>
</rdf:RDF>"#,
        ITEM, STATEMENT
    );

    let from_turtle = check_syntax(turtle.as_bytes(), "http://example.org/", RdfFormat::Turtle).unwrap();
    let from_xml = check_syntax(rdfxml.as_bytes(), "http://example.org/", RdfFormat::RdfXml).unwrap();

    assert_eq!(from_turtle.len(), 1);
    assert_eq!(from_turtle.iter().collect::<Vec<_>>(), from_xml.iter().collect::<Vec<_>>());
}

#[test]
fn test_syntax_error_aborts() {
    let result = check_syntax(b"<http://a.org/s> <http://a.org/p> \"open .\n", "http://example.org/", RdfFormat::NTriples);
    match result {
        Err(PrimarySourcesError::Syntax { line, .. }) => assert!(line >= 1),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

// =============================================================================
// Typo Heuristic
// =============================================================================

fn statement_with_value(value: &str) -> Triple {
    Triple::iri(STATEMENT, statement_property("P18"), GraphTerm::iri(value))
}

#[test]
fn test_value_within_typo_distance_is_flagged() {
    let validator = DataModelValidator::new();

    let near = validator.validate_triple(&statement_with_value("http://www.wikidata.orgg/entity/Q5"));
    assert_eq!(near.len(), 1);

    let boundary = validator.validate_triple(&statement_with_value("http://www.wikidata.orggg/entityy/Q5"));
    assert_eq!(boundary.len(), 1);
}

#[test]
fn test_foreign_value_is_kept() {
    let validator = DataModelValidator::new();

    assert!(validator
        .validate_triple(&statement_with_value("http://www.wikidata.orggg/entityyy/Q5"))
        .is_empty());
    assert!(validator
        .validate_triple(&statement_with_value("http://www.example.org/totallyelse/Q5"))
        .is_empty());
}

#[test]
fn test_root_domain_value_outside_items_is_flagged() {
    let violations = DataModelValidator::new()
        .validate_triple(&statement_with_value("http://www.wikidata.org/wiki/Q5"));
    assert_eq!(violations.len(), 1);
}

#[test]
fn test_threshold_is_configurable() {
    let strict = DataModelValidator::with_config(ValidatorConfig { typo_threshold: 0 });
    assert!(strict
        .validate_triple(&statement_with_value("http://www.wikidata.orgg/entity/Q5"))
        .is_empty());
}

// =============================================================================
// Partition
// =============================================================================

#[test]
fn test_unrecognized_subject_reported_whole() {
    let triple = Triple::iri("http://example.org/thing", "http://example.org/p", GraphTerm::plain("x"));
    let outcome = DataModelValidator::new().partition(&[triple.clone()].into_iter().collect());

    assert!(outcome.valid.is_empty());
    assert_eq!(outcome.report.components(), vec![triple.to_string().as_str()]);
}

#[test]
fn test_report_keeps_input_order() {
    let triples = vec![
        Triple::iri("http://www.wikidata.org/entity/X1", claim_property("P1"), GraphTerm::iri(STATEMENT)),
        Triple::iri(ITEM, claim_property("P1"), GraphTerm::iri(STATEMENT)),
        Triple::iri(STATEMENT, primary_sources::vocab::DERIVED_FROM, GraphTerm::iri("http://www.wikidata.org/reference/abc")),
    ];
    let outcome = DataModelValidator::new().partition(&triples.into_iter().collect());

    assert_eq!(outcome.valid.len(), 1);
    assert_eq!(
        outcome.report.components(),
        vec!["http://www.wikidata.org/entity/X1", "http://www.wikidata.org/reference/abc"]
    );
}
