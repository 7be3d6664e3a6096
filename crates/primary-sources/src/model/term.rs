//! RDF terms as they appear in contributed graphs and store results.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LANGUAGE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]{2,8}(?:-[a-zA-Z0-9]{1,8})*$").unwrap());

/// Whether `tag` has the BCP-47 shape: a 2-8 letter primary subtag
/// followed by alphanumeric subtags of up to 8 characters.
pub fn is_language_tag(tag: &str) -> bool {
    LANGUAGE_TAG.is_match(tag)
}

/// A single RDF value.
///
/// Exactly one variant applies to any parsed value: a literal is never both
/// language-tagged and typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GraphTerm {
    /// An absolute IRI.
    Iri(String),
    /// A literal with neither language tag nor datatype.
    PlainLiteral(String),
    /// A language-tagged literal.
    LangLiteral { text: String, lang: String },
    /// A literal with an explicit datatype IRI.
    TypedLiteral { lexical: String, datatype: String },
    /// A blank node label. Never matches a namespace and has no value encoding.
    Blank(String),
}

impl GraphTerm {
    pub fn iri(iri: impl Into<String>) -> Self {
        GraphTerm::Iri(iri.into())
    }

    pub fn plain(text: impl Into<String>) -> Self {
        GraphTerm::PlainLiteral(text.into())
    }

    pub fn lang(text: impl Into<String>, lang: impl Into<String>) -> Self {
        GraphTerm::LangLiteral {
            text: text.into(),
            lang: lang.into(),
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        GraphTerm::TypedLiteral {
            lexical: lexical.into(),
            datatype: datatype.into(),
        }
    }

    /// The IRI, if this term is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            GraphTerm::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, GraphTerm::Iri(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            GraphTerm::PlainLiteral(_) | GraphTerm::LangLiteral { .. } | GraphTerm::TypedLiteral { .. }
        )
    }

    /// Whether the N-Triples form of this term is a single token: IRIs
    /// and datatypes parse as absolute IRIs, language tags have the
    /// BCP-47 shape and blank labels carry no delimiters.
    pub fn is_well_formed(&self) -> bool {
        match self {
            GraphTerm::Iri(iri) => oxiri::Iri::parse(iri.as_str()).is_ok(),
            GraphTerm::PlainLiteral(_) => true,
            GraphTerm::LangLiteral { lang, .. } => is_language_tag(lang),
            GraphTerm::TypedLiteral { datatype, .. } => oxiri::Iri::parse(datatype.as_str()).is_ok(),
            GraphTerm::Blank(label) => {
                !label.is_empty() && label.chars().all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
            }
        }
    }

    /// Raw string form used in invalid-component reports: the bare IRI for
    /// IRIs, the N-Triples form for everything else.
    pub fn component(&self) -> String {
        match self {
            GraphTerm::Iri(iri) => iri.clone(),
            other => other.to_string(),
        }
    }
}

/// Escape a literal's lexical form for N-Triples/SPARQL output.
pub(crate) fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// N-Triples serialization.
impl fmt::Display for GraphTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphTerm::Iri(iri) => write!(f, "<{}>", iri),
            GraphTerm::PlainLiteral(text) => write!(f, "\"{}\"", escape_literal(text)),
            GraphTerm::LangLiteral { text, lang } => write!(f, "\"{}\"@{}", escape_literal(text), lang),
            GraphTerm::TypedLiteral { lexical, datatype } => {
                write!(f, "\"{}\"^^<{}>", escape_literal(lexical), datatype)
            }
            GraphTerm::Blank(label) => write!(f, "_:{}", label),
        }
    }
}
