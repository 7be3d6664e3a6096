//! Fuzz target for curator token decoding.
//!
//! Any token that decodes must encode again, and re-decoding the encoded
//! token must give back the same term.

#![no_main]

use libfuzzer_sys::fuzz_target;
use primary_sources::codec::{curator_token_to_graph_term, graph_term_to_curator_token};

fuzz_target!(|data: &[u8]| {
    let token = String::from_utf8_lossy(data);

    if let Ok(term) = curator_token_to_graph_term(&token) {
        let encoded = graph_term_to_curator_token(&term).expect("decoded term must encode");
        let again = curator_token_to_graph_term(&encoded).expect("encoded token must decode");
        assert_eq!(term, again);
    }
});
