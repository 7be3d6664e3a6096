//! Fuzz target for curator line parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use primary_sources::codec::QuickStatement;
use primary_sources::curation::StatementLocator;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        if let Ok(statement) = QuickStatement::parse(line) {
            let _ = statement.to_line();
        }
        let _ = StatementLocator::from_curator_line(line);
    }
});
