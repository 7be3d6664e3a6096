//! Graph term <-> curator line token.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PrimarySourcesError, Result};
use crate::model::GraphTerm;
use crate::term::{is_valid_term, TermKind};

use super::value::{canonical_amount, is_decimal, Coordinate, Timestamp, Value};

static MONOLINGUAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^([a-zA-Z]{2,8}(?:-[a-zA-Z0-9]{1,8})*):"(.*)"$"#).unwrap());

static TIME_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?\d+-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z)/(\d{1,2})$").unwrap()
});

static COORDINATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@([+-]?\d+(?:\.\d+)?)/([+-]?\d+(?:\.\d+)?)$").unwrap()
});

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"(.*)"$"#).unwrap());

impl Value {
    /// Decode a curator token, trying each shape in a fixed order.
    pub fn from_token(token: &str) -> Result<Self> {
        let token = token.trim();

        if is_valid_term(token, TermKind::Item) {
            return Ok(Value::Item(token.to_string()));
        }
        if let Some(caps) = MONOLINGUAL.captures(token) {
            return Ok(Value::Monolingual {
                lang: caps[1].to_string(),
                text: caps[2].to_string(),
            });
        }
        if let Some(caps) = TIME_TOKEN.captures(token) {
            // precision suffix is not stored in the graph
            return Ok(Value::Time(Timestamp::parse(&caps[1])?));
        }
        if let Some(caps) = COORDINATE_TOKEN.captures(token) {
            return Ok(Value::Coordinate(Coordinate::new(&caps[1], &caps[2])?));
        }
        if is_decimal(token) {
            return Ok(Value::Quantity(canonical_amount(token)?));
        }
        if let Some(caps) = QUOTED.captures(token) {
            return Ok(Value::from_string(&caps[1]));
        }

        Err(PrimarySourcesError::ambiguous(token))
    }

    /// Encode as a curator token.
    pub fn to_token(&self) -> String {
        match self {
            Value::Item(id) => id.clone(),
            Value::Link(url) => format!("\"{}\"", url),
            Value::Text(text) => format!("\"{}\"", text),
            Value::Monolingual { text, lang } => format!("{}:\"{}\"", lang, text),
            Value::Time(ts) => format!("{}/{}", ts.signed(), ts.inferred_precision()),
            Value::Coordinate(coord) => format!("@{}/{}", coord.latitude, coord.longitude),
            Value::Quantity(amount) => amount.clone(),
        }
    }
}

/// Render a graph term as a curator token.
///
/// The globe of a coordinate is not carried in this direction.
pub fn graph_term_to_curator_token(term: &GraphTerm) -> Result<String> {
    Ok(Value::from_term(term)?.to_token())
}

/// Resolve a curator token to a graph term.
///
/// A quoted string that parses as an absolute http(s)/ftp URL becomes an
/// IRI, not a literal.
pub fn curator_token_to_graph_term(token: &str) -> Result<GraphTerm> {
    Ok(Value::from_token(token)?.into_term())
}
