//! Fuzz target for the RDF syntax check.
//!
//! This fuzzer tests that the syntax check:
//! 1. Never panics on any byte input, in any supported format
//! 2. Reports parse failures as errors, with 1-based positions

#![no_main]

use libfuzzer_sys::fuzz_target;
use primary_sources::validation::{check_syntax, RdfFormat};
use primary_sources::PrimarySourcesError;

fuzz_target!(|data: &[u8]| {
    for format in [RdfFormat::Turtle, RdfFormat::NTriples, RdfFormat::RdfXml] {
        match check_syntax(data, "http://example.org/", format) {
            Ok(graph) => {
                let _ = graph.to_ntriples();
            }
            Err(PrimarySourcesError::Syntax { line, column, .. }) => {
                assert!(line == 0 || column >= 1);
            }
            Err(_) => {}
        }
    }
});
