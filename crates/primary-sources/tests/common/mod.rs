//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use indexmap::IndexSet;

use primary_sources::curation::{Filter, GraphBlock, GroupPattern, PatternTerm, TriplePattern, Update};
use primary_sources::store::{GraphStore, Row};
use primary_sources::vocab;
use primary_sources::{GraphTerm, Result};

pub const DATASET: &str = "http://example.org/cosmetics";
pub const NEW_GRAPH: &str = "http://example.org/cosmetics/new";
pub const ITEM: &str = "http://www.wikidata.org/entity/Q5921";
pub const STATEMENT: &str =
    "http://www.wikidata.org/entity/statement/Q5921-a3b4c5d6-1234-4abc-9def-0123456789ab";
pub const REFERENCE: &str = "http://www.wikidata.org/reference/288ab581e7d2d02995a26dfa8b091d96e78457fc";
pub const CURATOR: &str = "http://www.wikidata.org/wiki/User:Hjfocs";
pub const METADATA_GRAPH: &str = "http://www.wikidata.org/primary-sources/metadata";
pub const ACTIVITY: &str = "http://www.wikidata.org/primary-sources/activity";

pub fn claim_property(pid: &str) -> String {
    format!("{}{}", vocab::CLAIM_PROPERTY, pid)
}

pub fn statement_property(pid: &str) -> String {
    format!("{}{}", vocab::STATEMENT_PROPERTY, pid)
}

pub fn qualifier_property(pid: &str) -> String {
    format!("{}{}", vocab::QUALIFIER_PROPERTY, pid)
}

pub fn reference_property(pid: &str) -> String {
    format!("{}{}", vocab::REFERENCE_PROPERTY, pid)
}

/// A quad: graph, subject, predicate, object.
pub type Quad = (String, GraphTerm, GraphTerm, GraphTerm);

type Solution = HashMap<&'static str, GraphTerm>;

/// Graph store that applies bound updates to an in-memory quad set.
///
/// Only the update forms the curation templates produce are understood.
/// Queries return nothing.
#[derive(Default)]
pub struct InMemoryStore {
    quads: Mutex<IndexSet<Quad>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, graph: &str, subject: &str, predicate: &str, object: GraphTerm) {
        self.quads.lock().unwrap().insert((
            graph.to_string(),
            GraphTerm::iri(subject),
            GraphTerm::iri(predicate),
            object,
        ));
    }

    pub fn contains(&self, graph: &str, subject: &str, predicate: &str, object: &GraphTerm) -> bool {
        self.quads.lock().unwrap().contains(&(
            graph.to_string(),
            GraphTerm::iri(subject),
            GraphTerm::iri(predicate),
            object.clone(),
        ))
    }

    pub fn graph_len(&self, graph: &str) -> usize {
        self.quads.lock().unwrap().iter().filter(|q| q.0 == graph).count()
    }

    /// Current activity count of a curator IRI.
    pub fn activity(&self, curator: &str) -> Option<u64> {
        self.quads
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.0 == METADATA_GRAPH && q.1 == GraphTerm::iri(curator) && q.2 == GraphTerm::iri(ACTIVITY))
            .and_then(|q| match &q.3 {
                GraphTerm::TypedLiteral { lexical, .. } => lexical.parse().ok(),
                _ => None,
            })
    }

    fn resolve(term: &PatternTerm, solution: &Solution) -> Option<GraphTerm> {
        match term {
            PatternTerm::Term(term) => Some(term.clone()),
            PatternTerm::Var(var) => solution.get(var.0).cloned(),
        }
    }

    fn unify(pattern: &PatternTerm, value: &GraphTerm, solution: &mut Solution) -> bool {
        match pattern {
            PatternTerm::Term(term) => term == value,
            PatternTerm::Var(var) => match solution.get(var.0) {
                Some(bound) => bound == value,
                None => {
                    solution.insert(var.0, value.clone());
                    true
                }
            },
        }
    }

    fn match_block(&self, quads: &IndexSet<Quad>, block: &GraphBlock<PatternTerm>, input: Vec<Solution>) -> Vec<Solution> {
        let mut solutions = input;
        for pattern in &block.triples {
            let mut next = Vec::new();
            for solution in &solutions {
                for quad in quads.iter() {
                    let mut candidate = solution.clone();
                    if Self::unify(&block.graph, &GraphTerm::iri(quad.0.as_str()), &mut candidate)
                        && Self::unify(&pattern.subject, &quad.1, &mut candidate)
                        && Self::unify(&pattern.predicate, &quad.2, &mut candidate)
                        && Self::unify(&pattern.object, &quad.3, &mut candidate)
                    {
                        next.push(candidate);
                    }
                }
            }
            solutions = next;
        }
        solutions
    }

    fn evaluate(&self, quads: &IndexSet<Quad>, group: &[GroupPattern<PatternTerm>], input: Vec<Solution>) -> Vec<Solution> {
        let mut solutions = input;
        for element in group {
            solutions = match element {
                GroupPattern::Graph(block) => self.match_block(quads, block, solutions),
                GroupPattern::Optional(inner) => solutions
                    .into_iter()
                    .flat_map(|solution| {
                        let extended = self.evaluate(quads, inner, vec![solution.clone()]);
                        if extended.is_empty() { vec![solution] } else { extended }
                    })
                    .collect(),
                GroupPattern::Filter(Filter::StrStarts { var, prefix }) => solutions
                    .into_iter()
                    .filter(|solution| match solution.get(var.0) {
                        Some(GraphTerm::Iri(iri)) => iri.starts_with(prefix.as_str()),
                        _ => false,
                    })
                    .collect(),
                GroupPattern::Filter(Filter::Under { var, base }) => solutions
                    .into_iter()
                    .filter(|solution| match (solution.get(var.0), Self::resolve(base, solution)) {
                        (Some(GraphTerm::Iri(iri)), Some(GraphTerm::Iri(base))) => iri.starts_with(base.as_str()),
                        _ => false,
                    })
                    .collect(),
                GroupPattern::Increment { from, into } => solutions
                    .into_iter()
                    .map(|mut solution| {
                        let old: u64 = match solution.get(from.0) {
                            Some(GraphTerm::TypedLiteral { lexical, .. }) => lexical.parse().unwrap_or(0),
                            _ => 0,
                        };
                        solution.insert(into.0, GraphTerm::typed((old + 1).to_string(), vocab::XSD_INTEGER));
                        solution
                    })
                    .collect(),
            };
        }
        solutions
    }

    fn instantiate(blocks: &[GraphBlock<PatternTerm>], solutions: &[Solution]) -> Vec<Quad> {
        let mut quads = Vec::new();
        for solution in solutions {
            for block in blocks {
                let Some(GraphTerm::Iri(graph)) = Self::resolve(&block.graph, solution) else {
                    continue;
                };
                for TriplePattern { subject, predicate, object } in &block.triples {
                    if let (Some(s), Some(p), Some(o)) = (
                        Self::resolve(subject, solution),
                        Self::resolve(predicate, solution),
                        Self::resolve(object, solution),
                    ) {
                        quads.push((graph.clone(), s, p, o));
                    }
                }
            }
        }
        quads
    }
}

impl GraphStore for InMemoryStore {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn query(&self, _query: &str) -> Result<Vec<Row>> {
        Ok(Vec::new())
    }

    fn update(&self, update: &Update) -> Result<()> {
        let mut quads = self.quads.lock().unwrap();
        let solutions = self.evaluate(&quads, update.patterns(), vec![Solution::new()]);

        let deleted = Self::instantiate(update.deletes(), &solutions);
        let inserted = Self::instantiate(update.inserts(), &solutions);
        for quad in &deleted {
            quads.shift_remove(quad);
        }
        quads.extend(inserted);
        Ok(())
    }
}
