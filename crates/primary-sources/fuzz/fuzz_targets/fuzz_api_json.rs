//! Fuzz target for editing-API JSON decoding.

#![no_main]

use libfuzzer_sys::fuzz_target;
use primary_sources::codec::{api_json_to_graph_term, api_reference_to_graph_term};

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = api_json_to_graph_term(&json);
        let _ = api_reference_to_graph_term(&json);
    }
});
