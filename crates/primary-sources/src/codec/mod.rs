//! Value codec between graph terms, curator tokens and editing-API JSON.
//!
//! All three representations funnel through [`Value`], a closed sum of the
//! six supported datatypes (item, string/URL, monolingual text, time, globe
//! coordinate, quantity). Each direction is a single decode followed by a
//! single encode; nothing falls through on failure.
//!
//! ```
//! use primary_sources::codec::{curator_token_to_graph_term, graph_term_to_curator_token};
//!
//! let term = curator_token_to_graph_term("en:\"hello\"").unwrap();
//! assert_eq!(graph_term_to_curator_token(&term).unwrap(), "en:\"hello\"");
//! ```

mod api;
mod quickstatement;
mod token;
mod value;

pub use api::{
    api_json_to_graph_term, api_reference_to_graph_term, graph_term_to_api_json, ApiValue,
    GlobeValue, ItemValue, MonolingualValue, QuantityValue, TimeValue, DAY_PRECISION,
};
pub use quickstatement::{QuickStatement, Snak};
pub use token::{curator_token_to_graph_term, graph_term_to_curator_token};
pub use value::{canonical_term, looks_like_link, Coordinate, Datatype, Timestamp, Value};
