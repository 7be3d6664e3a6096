//! RDF syntax check.

use std::fmt;
use std::str::FromStr;

use rio_api::model::{Literal, Subject, Term, Triple as RioTriple};
use rio_api::parser::{ParseError, TriplesParser};
use rio_turtle::{NTriplesParser, TurtleParser};
use rio_xml::RdfXmlParser;
use serde::{Deserialize, Serialize};

use crate::error::{PrimarySourcesError, Result};
use crate::model::{GraphTerm, ParsedGraph, Triple};
use crate::vocab;

/// Serialization of a submitted dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdfFormat {
    Turtle,
    NTriples,
    RdfXml,
}

impl RdfFormat {
    /// Guess the format from a file extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nt" | "ntriples" => Some(RdfFormat::NTriples),
            "rdf" | "xml" | "owl" => Some(RdfFormat::RdfXml),
            _ => None,
        }
    }
}

impl FromStr for RdfFormat {
    type Err = PrimarySourcesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(RdfFormat::NTriples),
            "rdfxml" | "rdf/xml" | "xml" => Ok(RdfFormat::RdfXml),
            other => Err(PrimarySourcesError::Config(format!("unknown RDF format: {}", other))),
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RdfFormat::Turtle => "turtle",
            RdfFormat::NTriples => "ntriples",
            RdfFormat::RdfXml => "rdfxml",
        };
        f.write_str(name)
    }
}

/// Parse a byte stream into a triple set.
///
/// Any syntax error rejects the whole input; nothing is partially accepted.
pub fn check_syntax(bytes: &[u8], base_uri: &str, format: RdfFormat) -> Result<ParsedGraph> {
    let base = oxiri::Iri::parse(base_uri.to_string())
        .map_err(|e| PrimarySourcesError::Config(format!("invalid base URI '{}': {}", base_uri, e)))?;

    let graph = match format {
        RdfFormat::Turtle => collect(TurtleParser::new(bytes, Some(base)))?,
        RdfFormat::NTriples => collect(NTriplesParser::new(bytes))?,
        RdfFormat::RdfXml => collect(RdfXmlParser::new(bytes, Some(base)))?,
    };

    tracing::debug!(%format, triples = graph.len(), "parsed dataset");
    Ok(graph)
}

fn collect<P>(mut parser: P) -> Result<ParsedGraph>
where
    P: TriplesParser,
    P::Error: ParseError,
{
    let mut graph = ParsedGraph::new();
    let parsed = parser.parse_all(&mut |triple: RioTriple<'_>| -> std::result::Result<(), P::Error> {
        graph.insert(convert(&triple));
        Ok(())
    });

    parsed.map_err(|e| {
        let (line, column) = e
            .textual_position()
            .map(|pos| (pos.line_number() + 1, pos.byte_number() + 1))
            .unwrap_or((0, 0));
        PrimarySourcesError::Syntax {
            line,
            column,
            message: e.to_string(),
        }
    })?;

    Ok(graph)
}

fn convert(triple: &RioTriple<'_>) -> Triple {
    let subject = match triple.subject {
        Subject::NamedNode(node) => GraphTerm::Iri(node.iri.to_string()),
        Subject::BlankNode(node) => GraphTerm::Blank(node.id.to_string()),
        #[allow(unreachable_patterns)]
        other => GraphTerm::Blank(other.to_string()),
    };
    let object = match triple.object {
        Term::NamedNode(node) => GraphTerm::Iri(node.iri.to_string()),
        Term::BlankNode(node) => GraphTerm::Blank(node.id.to_string()),
        Term::Literal(Literal::Simple { value }) => GraphTerm::PlainLiteral(value.to_string()),
        Term::Literal(Literal::LanguageTaggedString { value, language }) => GraphTerm::LangLiteral {
            text: value.to_string(),
            lang: language.to_string(),
        },
        Term::Literal(Literal::Typed { value, datatype }) if datatype.iri == vocab::XSD_STRING => {
            GraphTerm::PlainLiteral(value.to_string())
        }
        Term::Literal(Literal::Typed { value, datatype }) => GraphTerm::TypedLiteral {
            lexical: value.to_string(),
            datatype: datatype.iri.to_string(),
        },
        #[allow(unreachable_patterns)]
        other => GraphTerm::Blank(other.to_string()),
    };
    Triple::new(subject, triple.predicate.iri, object)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://example.org/dataset";

    #[test]
    fn test_turtle() {
        let ttl = br#"
            @prefix wd: <http://www.wikidata.org/entity/> .
            @prefix pq: <http://www.wikidata.org/prop/qualifier/> .
            wd:Q5921 pq:P2096 "caption"@en , "x"^^<http://www.w3.org/2001/XMLSchema#string> .
        "#;
        let graph = check_syntax(ttl, BASE, RdfFormat::Turtle).unwrap();
        assert_eq!(graph.len(), 2);
        let objects: Vec<_> = graph.iter().map(|t| t.object.clone()).collect();
        assert_eq!(objects, vec![GraphTerm::lang("caption", "en"), GraphTerm::plain("x")]);
    }

    #[test]
    fn test_ntriples_blank_nodes() {
        let nt = b"_:b0 <http://example.org/p> \"1\"^^<http://www.w3.org/2001/XMLSchema#decimal> .\n";
        let graph = check_syntax(nt, BASE, RdfFormat::NTriples).unwrap();
        let triple = graph.iter().next().unwrap();
        assert!(matches!(triple.subject, GraphTerm::Blank(_)));
        assert_eq!(
            triple.object,
            GraphTerm::typed("1", "http://www.w3.org/2001/XMLSchema#decimal")
        );
    }

    #[test]
    fn test_syntax_error_aborts() {
        let broken = b"<http://example.org/s> <http://example.org/p> \"unterminated .\n";
        match check_syntax(broken, BASE, RdfFormat::NTriples) {
            Err(PrimarySourcesError::Syntax { line, .. }) => assert!(line <= 1),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_base_uri() {
        assert!(matches!(
            check_syntax(b"", "not a uri", RdfFormat::Turtle),
            Err(PrimarySourcesError::Config(_))
        ));
    }

    #[test]
    fn test_format_names() {
        assert_eq!("ttl".parse::<RdfFormat>().unwrap(), RdfFormat::Turtle);
        assert_eq!(RdfFormat::from_extension("nt"), Some(RdfFormat::NTriples));
        assert!("csv".parse::<RdfFormat>().is_err());
    }
}
