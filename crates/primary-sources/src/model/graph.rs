//! Triples and duplicate-free triple sets.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::term::GraphTerm;

/// One RDF triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// Subject: an IRI or a blank node.
    pub subject: GraphTerm,
    /// Predicate IRI.
    pub predicate: String,
    /// Object.
    pub object: GraphTerm,
}

impl Triple {
    pub fn new(subject: GraphTerm, predicate: impl Into<String>, object: GraphTerm) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    /// Shorthand for a triple whose subject is an IRI.
    pub fn iri(subject: impl Into<String>, predicate: impl Into<String>, object: GraphTerm) -> Self {
        Self::new(GraphTerm::Iri(subject.into()), predicate, object)
    }
}

/// N-Triples line without the terminating newline.
impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// An insertion-ordered set of triples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedGraph {
    triples: IndexSet<Triple>,
}

impl ParsedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple; returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Serialize as N-Triples.
    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for triple in &self.triples {
            out.push_str(&triple.to_string());
            out.push('\n');
        }
        out
    }
}

impl FromIterator<Triple> for ParsedGraph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParsedGraph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
