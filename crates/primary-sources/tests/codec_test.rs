//! Integration tests for the value codec.

use serde_json::json;

use primary_sources::codec::{
    api_json_to_graph_term, canonical_term, curator_token_to_graph_term, graph_term_to_api_json,
    graph_term_to_curator_token, QuickStatement,
};
use primary_sources::vocab;
use primary_sources::{GraphTerm, PrimarySourcesError};

fn unambiguous_terms() -> Vec<GraphTerm> {
    vec![
        GraphTerm::iri("http://www.wikidata.org/entity/Q5921"),
        GraphTerm::lang("hello", "en"),
        GraphTerm::typed("1889-10-18T00:00:00Z", vocab::XSD_DATE_TIME),
        GraphTerm::typed("Point(-0.12 51.5)", vocab::GEO_WKT_LITERAL),
        GraphTerm::typed("-12.5", vocab::XSD_DECIMAL),
        GraphTerm::plain("Maybelline"),
    ]
}

/// Lexical forms the codec rewrites, with the form every direction yields.
fn signed_and_padded_terms() -> Vec<(GraphTerm, GraphTerm)> {
    vec![
        (
            GraphTerm::typed("+12.5", vocab::XSD_DECIMAL),
            GraphTerm::typed("12.5", vocab::XSD_DECIMAL),
        ),
        (
            GraphTerm::typed("+1889-10-18T00:00:00Z", vocab::XSD_DATE_TIME),
            GraphTerm::typed("1889-10-18T00:00:00Z", vocab::XSD_DATE_TIME),
        ),
        (
            GraphTerm::typed("Point(10.0 51.50)", vocab::GEO_WKT_LITERAL),
            GraphTerm::typed("Point(10 51.5)", vocab::GEO_WKT_LITERAL),
        ),
        (
            GraphTerm::typed("Point(+1.250 -0.10)", vocab::GEO_WKT_LITERAL),
            GraphTerm::typed("Point(1.25 -0.1)", vocab::GEO_WKT_LITERAL),
        ),
    ]
}

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn test_signed_and_padded_forms_agree_in_every_direction() {
    for (term, canonical) in signed_and_padded_terms() {
        assert_eq!(canonical_term(&term), canonical);

        let json = graph_term_to_api_json(&term).unwrap().to_json().unwrap();
        assert_eq!(api_json_to_graph_term(&json).unwrap(), canonical, "via {}", json);

        let token = graph_term_to_curator_token(&term).unwrap();
        assert_eq!(curator_token_to_graph_term(&token).unwrap(), canonical, "via {}", token);

        let json = graph_term_to_api_json(&canonical).unwrap().to_json().unwrap();
        assert_eq!(api_json_to_graph_term(&json).unwrap(), canonical, "via {}", json);
    }
}

#[test]
fn test_api_json_round_trip() {
    for term in unambiguous_terms() {
        let json = graph_term_to_api_json(&term).unwrap().to_json().unwrap();
        assert_eq!(api_json_to_graph_term(&json).unwrap(), term, "via {}", json);
    }
}

#[test]
fn test_curator_token_round_trip() {
    for term in unambiguous_terms() {
        let token = graph_term_to_curator_token(&term).unwrap();
        assert_eq!(curator_token_to_graph_term(&token).unwrap(), term, "via {}", token);
    }
}

#[test]
fn test_moon_coordinate_keeps_globe_in_json() {
    let term = GraphTerm::typed(
        "<http://www.wikidata.org/entity/Q405> Point(10.5 20.25)",
        vocab::GEO_WKT_LITERAL,
    );
    let json = graph_term_to_api_json(&term).unwrap().to_json().unwrap();

    assert_eq!(json["globe"], json!("http://www.wikidata.org/entity/Q405"));
    assert_eq!(api_json_to_graph_term(&json).unwrap(), term);
    // the curator token has no room for a globe
    assert_eq!(graph_term_to_curator_token(&term).unwrap(), "@20.25/10.5");
}

// =============================================================================
// Precision
// =============================================================================

#[test]
fn test_time_precision_inference() {
    let cases = [
        ("1889-10-18T00:00:00Z", "+1889-10-18T00:00:00Z/11"),
        ("1889-10-01T00:00:00Z", "+1889-10-01T00:00:00Z/10"),
        ("1889-01-01T00:00:00Z", "+1889-01-01T00:00:00Z/9"),
    ];
    for (lexical, token) in cases {
        let term = GraphTerm::typed(lexical, vocab::XSD_DATE_TIME);
        assert_eq!(graph_term_to_curator_token(&term).unwrap(), token);
    }
}

#[test]
fn test_json_time_precision_is_fixed() {
    let term = GraphTerm::typed("1889-01-01T00:00:00Z", vocab::XSD_DATE_TIME);
    let json = graph_term_to_api_json(&term).unwrap().to_json().unwrap();
    assert_eq!(json["precision"], json!(11));
}

#[test]
fn test_coordinate_precision() {
    let term = GraphTerm::typed("Point(-0.1234 51.5)", vocab::GEO_WKT_LITERAL);
    let json = graph_term_to_api_json(&term).unwrap().to_json().unwrap();
    assert_eq!(json["precision"], json!(0.0001));
}

// =============================================================================
// Ambiguity and Failures
// =============================================================================

#[test]
fn test_quoted_url_becomes_link() {
    let term = curator_token_to_graph_term("\"https://example.org/page\"").unwrap();
    assert_eq!(term, GraphTerm::iri("https://example.org/page"));

    let text = curator_token_to_graph_term("\"just some text\"").unwrap();
    assert_eq!(text, GraphTerm::plain("just some text"));
}

#[test]
fn test_unquoted_garbage_is_ambiguous() {
    assert!(matches!(
        curator_token_to_graph_term("not-a-token"),
        Err(PrimarySourcesError::AmbiguousValue { .. })
    ));
}

#[test]
fn test_unknown_datatype() {
    let term = GraphTerm::typed("true", "http://www.w3.org/2001/XMLSchema#boolean");
    assert!(matches!(
        graph_term_to_curator_token(&term),
        Err(PrimarySourcesError::UnsupportedDatatype { .. })
    ));
    assert!(graph_term_to_api_json(&term).is_err());
}

// =============================================================================
// Curator Lines
// =============================================================================

#[test]
fn test_quickstatement_line_round_trip() {
    let line = "Q5921\tP18\t\"http://example.org/Q5921.jpg\"\tP2096\ten:\"caption\"\tS854\t\"http://example.org/source\"";
    let statement = QuickStatement::parse(line).unwrap();

    assert_eq!(statement.qualifiers.len(), 1);
    assert_eq!(statement.references.len(), 1);
    assert_eq!(statement.to_line().unwrap(), line);
}

#[test]
fn test_quickstatement_rejects_short_lines() {
    assert!(matches!(
        QuickStatement::parse("Q5921\tP18"),
        Err(PrimarySourcesError::MalformedLine { .. })
    ));
}
