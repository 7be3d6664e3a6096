//! SPARQL 1.1 JSON results decoding.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::GraphTerm;
use crate::vocab;

/// One solution of a query: variable name to bound term.
///
/// Unbound variables are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row(IndexMap<String, GraphTerm>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, var: impl Into<String>, term: GraphTerm) -> Self {
        self.0.insert(var.into(), term);
        self
    }

    pub fn get(&self, var: &str) -> Option<&GraphTerm> {
        self.0.get(var)
    }

    /// The bound IRI, if `var` is bound to one.
    pub fn iri(&self, var: &str) -> Option<&str> {
        self.get(var).and_then(GraphTerm::as_iri)
    }

    /// Lexical form of a bound literal.
    pub fn literal(&self, var: &str) -> Option<&str> {
        match self.get(var)? {
            GraphTerm::PlainLiteral(text) => Some(text),
            GraphTerm::LangLiteral { text, .. } => Some(text),
            GraphTerm::TypedLiteral { lexical, .. } => Some(lexical),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, GraphTerm)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, GraphTerm)>>(iter: I) -> Self {
        Row(iter.into_iter().collect())
    }
}

#[derive(Deserialize)]
struct ResultsDocument {
    results: ResultsBody,
}

#[derive(Deserialize)]
struct ResultsBody {
    bindings: Vec<IndexMap<String, BoundTerm>>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum BoundTerm {
    Uri {
        value: String,
    },
    Literal {
        value: String,
        #[serde(rename = "xml:lang")]
        lang: Option<String>,
        datatype: Option<String>,
    },
    TypedLiteral {
        value: String,
        datatype: String,
    },
    Bnode {
        value: String,
    },
}

impl From<BoundTerm> for GraphTerm {
    fn from(term: BoundTerm) -> Self {
        match term {
            BoundTerm::Uri { value } => GraphTerm::Iri(value),
            BoundTerm::Literal {
                value,
                lang: Some(lang),
                ..
            } => GraphTerm::lang(value, lang),
            BoundTerm::Literal {
                value,
                datatype: Some(datatype),
                ..
            }
            | BoundTerm::TypedLiteral { value, datatype } => {
                if datatype == vocab::XSD_STRING {
                    GraphTerm::PlainLiteral(value)
                } else {
                    GraphTerm::typed(value, datatype)
                }
            }
            BoundTerm::Literal { value, .. } => GraphTerm::PlainLiteral(value),
            BoundTerm::Bnode { value } => GraphTerm::Blank(value),
        }
    }
}

/// Decode an `application/sparql-results+json` document.
pub fn parse_results(body: &str) -> Result<Vec<Row>> {
    let document: ResultsDocument = serde_json::from_str(body)?;
    Ok(document
        .results
        .bindings
        .into_iter()
        .map(|binding| {
            binding
                .into_iter()
                .map(|(var, term)| (var, GraphTerm::from(term)))
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "head": {"vars": ["statement", "value", "count"]},
        "results": {"bindings": [
            {
                "statement": {"type": "uri", "value": "http://www.wikidata.org/entity/statement/Q1-abc"},
                "value": {"type": "literal", "value": "caption", "xml:lang": "en"},
                "count": {"type": "literal", "value": "3", "datatype": "http://www.w3.org/2001/XMLSchema#integer"}
            },
            {
                "statement": {"type": "bnode", "value": "b0"},
                "value": {"type": "typed-literal", "value": "x", "datatype": "http://www.w3.org/2001/XMLSchema#string"}
            }
        ]}
    }"#;

    #[test]
    fn test_parse_results() {
        let rows = parse_results(BODY).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].iri("statement"), Some("http://www.wikidata.org/entity/statement/Q1-abc"));
        assert_eq!(rows[0].get("value"), Some(&GraphTerm::lang("caption", "en")));
        assert_eq!(rows[0].literal("count"), Some("3"));

        assert_eq!(rows[1].get("statement"), Some(&GraphTerm::Blank("b0".to_string())));
        assert_eq!(rows[1].get("value"), Some(&GraphTerm::plain("x")));
        assert!(rows[1].get("count").is_none());
    }

    #[test]
    fn test_malformed_document() {
        assert!(parse_results("{\"boolean\": true}").is_err());
    }
}
