//! Pending statements rendered as curator lines.
//!
//! Rows fetched from the graph store are grouped by statement node and
//! dataset and reassembled into curator lines by [`SuggestionFormatter`].

mod formatter;
mod query;
mod suggester;
mod suggestion;

pub use formatter::SuggestionFormatter;
pub use query::SuggestionQueries;
pub use suggester::Suggester;
pub use suggestion::{ActivityEntry, DatasetSummary, Suggestion, SuggestionBatch, SuggestionFailure};
