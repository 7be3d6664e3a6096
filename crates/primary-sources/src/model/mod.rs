//! Graph terms, triples and triple sets.

mod graph;
mod term;

pub use graph::{ParsedGraph, Triple};
pub use term::{is_language_tag, GraphTerm};
