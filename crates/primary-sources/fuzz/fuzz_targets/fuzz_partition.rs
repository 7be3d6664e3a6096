//! Fuzz target for structural validation.
//!
//! Builds triples from arbitrary IRIs and literals and checks that
//! partitioning never panics and never both keeps and reports a triple.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use primary_sources::validation::DataModelValidator;
use primary_sources::{GraphTerm, ParsedGraph, Triple};

#[derive(Arbitrary, Debug)]
enum FuzzTerm {
    Iri(String),
    Literal(String),
    Blank(String),
}

impl From<FuzzTerm> for GraphTerm {
    fn from(term: FuzzTerm) -> Self {
        match term {
            FuzzTerm::Iri(iri) => GraphTerm::Iri(format!("http://www.wikidata.org/{}", iri)),
            FuzzTerm::Literal(text) => GraphTerm::PlainLiteral(text),
            FuzzTerm::Blank(label) => GraphTerm::Blank(label),
        }
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzTriple {
    subject: FuzzTerm,
    predicate: String,
    object: FuzzTerm,
}

fuzz_target!(|triples: Vec<FuzzTriple>| {
    let graph: ParsedGraph = triples
        .into_iter()
        .map(|t| Triple::new(t.subject.into(), format!("http://www.wikidata.org/prop/{}", t.predicate), t.object.into()))
        .collect();

    let validator = DataModelValidator::new();
    let outcome = validator.partition(&graph);

    for triple in &graph {
        let kept = outcome.valid.contains(triple);
        let flagged = !validator.validate_triple(triple).is_empty();
        assert!(kept != flagged);
    }
});
