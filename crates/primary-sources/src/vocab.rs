//! Namespaces and well-known IRIs of the knowledge graph's RDF export.

/// Root domain shared by every namespace below.
pub const ROOT: &str = "http://www.wikidata.org/";

/// Items (`wd:`).
pub const ENTITY: &str = "http://www.wikidata.org/entity/";
/// Claim properties (`p:`), linking an item to a statement node.
pub const CLAIM_PROPERTY: &str = "http://www.wikidata.org/prop/";
/// Statement-value properties (`ps:`).
pub const STATEMENT_PROPERTY: &str = "http://www.wikidata.org/prop/statement/";
/// Qualifier properties (`pq:`).
pub const QUALIFIER_PROPERTY: &str = "http://www.wikidata.org/prop/qualifier/";
/// Reference-value properties (`pr:`).
pub const REFERENCE_PROPERTY: &str = "http://www.wikidata.org/prop/reference/";
/// Statement nodes (`wds:`).
pub const STATEMENT_NODE: &str = "http://www.wikidata.org/entity/statement/";
/// Reference nodes (`wdref:`).
pub const REFERENCE_NODE: &str = "http://www.wikidata.org/reference/";

/// Provenance edge from a statement node to a reference node.
pub const DERIVED_FROM: &str = "http://www.w3.org/ns/prov#wasDerivedFrom";

pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const GEO_WKT_LITERAL: &str = "http://www.opengis.net/ont/geosparql#wktLiteral";

/// Globe assumed when a coordinate does not name one.
pub const EARTH: &str = "http://www.wikidata.org/entity/Q2";
/// Calendar model attached to every time value.
pub const GREGORIAN_CALENDAR: &str = "http://www.wikidata.org/entity/Q1985727";
/// Unit of a dimensionless quantity.
pub const DIMENSIONLESS_UNIT: &str = "1";

/// Namespace families a predicate or node IRI can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Entity,
    StatementNode,
    ReferenceNode,
    ClaimProperty,
    StatementProperty,
    QualifierProperty,
    ReferenceProperty,
}

impl Namespace {
    /// Namespaces ordered so that longer IRIs are tried before their prefixes.
    const BY_SPECIFICITY: [Namespace; 7] = [
        Namespace::StatementNode,
        Namespace::Entity,
        Namespace::ReferenceNode,
        Namespace::StatementProperty,
        Namespace::QualifierProperty,
        Namespace::ReferenceProperty,
        Namespace::ClaimProperty,
    ];

    /// The namespace IRI.
    pub fn iri(&self) -> &'static str {
        match self {
            Namespace::Entity => ENTITY,
            Namespace::StatementNode => STATEMENT_NODE,
            Namespace::ReferenceNode => REFERENCE_NODE,
            Namespace::ClaimProperty => CLAIM_PROPERTY,
            Namespace::StatementProperty => STATEMENT_PROPERTY,
            Namespace::QualifierProperty => QUALIFIER_PROPERTY,
            Namespace::ReferenceProperty => REFERENCE_PROPERTY,
        }
    }

    /// Conventional prefix label, used in log output.
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Entity => "wd",
            Namespace::StatementNode => "wds",
            Namespace::ReferenceNode => "wdref",
            Namespace::ClaimProperty => "p",
            Namespace::StatementProperty => "ps",
            Namespace::QualifierProperty => "pq",
            Namespace::ReferenceProperty => "pr",
        }
    }

    /// Resolve the most specific namespace an IRI falls into, with its local name.
    pub fn resolve(iri: &str) -> Option<(Namespace, &str)> {
        Self::BY_SPECIFICITY.iter().find_map(|ns| {
            iri.strip_prefix(ns.iri())
                .filter(|local| !local.contains('/'))
                .map(|local| (*ns, local))
        })
    }

    /// Build a full IRI from a local name.
    pub fn expand(&self, local: &str) -> String {
        format!("{}{}", self.iri(), local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_longest_namespace() {
        assert_eq!(
            Namespace::resolve("http://www.wikidata.org/prop/statement/P18"),
            Some((Namespace::StatementProperty, "P18"))
        );
        assert_eq!(
            Namespace::resolve("http://www.wikidata.org/prop/P18"),
            Some((Namespace::ClaimProperty, "P18"))
        );
        assert_eq!(
            Namespace::resolve("http://www.wikidata.org/entity/statement/Q1-abc"),
            Some((Namespace::StatementNode, "Q1-abc"))
        );
        assert_eq!(
            Namespace::resolve("http://www.wikidata.org/entity/Q42"),
            Some((Namespace::Entity, "Q42"))
        );
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(Namespace::resolve("http://example.org/Q42"), None);
        assert_eq!(Namespace::resolve("http://www.wikidata.org/prop/direct/P31"), None);
    }

    #[test]
    fn test_expand() {
        assert_eq!(
            Namespace::QualifierProperty.expand("P2096"),
            "http://www.wikidata.org/prop/qualifier/P2096"
        );
    }
}
