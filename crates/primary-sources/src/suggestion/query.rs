//! Read queries against the dataset and metadata graphs.

use indexmap::IndexMap;
use oxiri::Iri;
use tracing::warn;

use crate::config::PrimarySourcesConfig;
use crate::curation::{dataset_graph, split_dataset_graph, CurationState};
use crate::error::{PrimarySourcesError, Result};
use crate::store::Row;
use crate::term::{is_valid_term, TermKind};
use crate::vocab::{self, Namespace};

use super::formatter::{DATASET_VAR, PROPERTY_VAR, STATEMENT_VAR, VALUE_VAR};
use super::{ActivityEntry, DatasetSummary};

const ITEM_VAR: &str = "item";
const COUNT_VAR: &str = "count";
const UPLOADER_VAR: &str = "uploader";
const USER_VAR: &str = "user";
const ACTIVITIES_VAR: &str = "activities";

/// `<iri>` for an IRI taken from caller input.
fn iri_ref(iri: &str) -> Result<String> {
    Iri::parse(iri)
        .map(|iri| format!("<{}>", iri.as_str()))
        .map_err(|e| PrimarySourcesError::InvalidLocator(format!("invalid IRI '{}': {}", iri, e)))
}

/// Builds the read queries used by the suggestion and statistics views.
#[derive(Debug, Clone, Default)]
pub struct SuggestionQueries {
    config: PrimarySourcesConfig,
}

impl SuggestionQueries {
    pub fn new(config: PrimarySourcesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PrimarySourcesConfig {
        &self.config
    }

    /// Restrict `?dataset` to one dataset's pending graph, or to every
    /// pending graph.
    fn pending_graphs(&self, dataset: Option<&str>) -> Result<String> {
        match dataset {
            Some(dataset) => Ok(format!(
                "  VALUES ?{} {{ {} }}\n",
                DATASET_VAR,
                iri_ref(&dataset_graph(dataset, CurationState::New))?
            )),
            None => Ok(format!(
                "  FILTER(STRENDS(STR(?{}), \"/{}\"))\n",
                DATASET_VAR,
                CurationState::New.suffix()
            )),
        }
    }

    /// Bind `?statement` to statement nodes with something still pending
    /// in `?dataset`: a value of their own, or a value of one of their
    /// references. A provenance edge alone does not count.
    fn pending_statements(&self, dataset: Option<&str>) -> Result<String> {
        Ok(format!(
            "{scope}  GRAPH ?{ds} {{\n    {{ ?{st} ?pendingProperty ?pendingValue . FILTER(?pendingProperty != <{prov}>) }}\n    UNION\n    {{ ?{st} <{prov}> ?pendingReference . ?pendingReference ?pendingProperty ?pendingValue . }}\n  }}\n  FILTER(STRSTARTS(STR(?{st}), \"{wds}\"))\n",
            scope = self.pending_graphs(dataset)?,
            ds = DATASET_VAR,
            st = STATEMENT_VAR,
            prov = vocab::DERIVED_FROM,
            wds = vocab::STATEMENT_NODE,
        ))
    }

    /// The claim edge `subject ?claim ?statement` in any state graph of the
    /// pending graph's dataset. Decided claims keep pending qualifiers and
    /// references, so the edge is not necessarily in `?dataset` itself.
    fn claim_anchor(&self, subject: &str) -> String {
        format!(
            "  GRAPH ?anchor {{ {subject} ?claim ?{st} . }}\n  FILTER(STRSTARTS(STR(?anchor), REPLACE(STR(?{ds}), \"{new}$\", \"\")))\n",
            subject = subject,
            st = STATEMENT_VAR,
            ds = DATASET_VAR,
            new = CurationState::New.suffix(),
        )
    }

    /// Main values, qualifiers and reference values of every pending
    /// statement about `qid`, as rows for the suggestion formatter.
    ///
    /// The main value is read wherever the claim edge lives; qualifiers and
    /// reference values only from the pending graph.
    pub fn item_suggestions(&self, qid: &str, dataset: Option<&str>) -> Result<String> {
        if !is_valid_term(qid, TermKind::Item) {
            return Err(PrimarySourcesError::InvalidLocator(format!("'{}' is not an item id", qid)));
        }

        Ok(format!(
            "SELECT DISTINCT ?{st} ?{ds} ?{p} ?{v} WHERE {{\n{pending}{anchor}  {{\n    GRAPH ?anchor {{ ?{st} ?{p} ?{v} . }}\n    FILTER(STRSTARTS(STR(?{p}), \"{ps}\"))\n  }}\n  UNION\n  {{ GRAPH ?{ds} {{ ?{st} ?{p} ?{v} . }} }}\n  UNION\n  {{ GRAPH ?{ds} {{ ?{st} <{prov}> ?reference . ?reference ?{p} ?{v} . }} }}\n}}\n",
            st = STATEMENT_VAR,
            ds = DATASET_VAR,
            p = PROPERTY_VAR,
            v = VALUE_VAR,
            pending = self.pending_statements(dataset)?,
            anchor = self.claim_anchor(&format!("<{}>", Namespace::Entity.expand(qid))),
            ps = vocab::STATEMENT_PROPERTY,
            prov = vocab::DERIVED_FROM,
        ))
    }

    /// Datasets with a non-empty pending graph, with their uploaders.
    pub fn datasets(&self) -> Result<String> {
        Ok(format!(
            "SELECT DISTINCT ?{ds} ?{up} WHERE {{\n  GRAPH ?{ds} {{ ?s ?p ?o }}\n{scope}  OPTIONAL {{\n    GRAPH {meta} {{ ?base {uploader} ?{up} }}\n    FILTER(STR(?{ds}) = CONCAT(STR(?base), \"/{new}\"))\n  }}\n}}\n",
            ds = DATASET_VAR,
            up = UPLOADER_VAR,
            scope = self.pending_graphs(None)?,
            meta = iri_ref(&self.config.metadata_graph)?,
            uploader = iri_ref(&self.config.uploader_predicate)?,
            new = CurationState::New.suffix(),
        ))
    }

    fn pending_items(&self, dataset: Option<&str>) -> Result<String> {
        Ok(format!(
            "{pending}{anchor}",
            pending = self.pending_statements(dataset)?,
            anchor = self.claim_anchor(&format!("?{}", ITEM_VAR)),
        ))
    }

    /// Number of distinct items with pending statements.
    pub fn pending_count(&self, dataset: Option<&str>) -> Result<String> {
        Ok(format!(
            "SELECT (COUNT(DISTINCT ?{item}) AS ?{count}) WHERE {{\n{body}}}\n",
            item = ITEM_VAR,
            count = COUNT_VAR,
            body = self.pending_items(dataset)?,
        ))
    }

    /// The pending item at `offset` in a stable order.
    pub fn item_at(&self, dataset: Option<&str>, offset: u64) -> Result<String> {
        Ok(format!(
            "SELECT DISTINCT ?{item} WHERE {{\n{body}}}\nORDER BY ?{item}\nOFFSET {offset}\nLIMIT 1\n",
            item = ITEM_VAR,
            body = self.pending_items(dataset)?,
            offset = offset,
        ))
    }

    /// Curators ordered by decision count.
    pub fn leaderboard(&self, limit: usize) -> Result<String> {
        Ok(format!(
            "SELECT ?{user} ?{acts} WHERE {{\n  GRAPH {meta} {{ ?{user} {activity} ?{acts} }}\n}}\nORDER BY DESC(?{acts})\nLIMIT {limit}\n",
            user = USER_VAR,
            acts = ACTIVITIES_VAR,
            meta = iri_ref(&self.config.metadata_graph)?,
            activity = iri_ref(&self.config.activity_predicate)?,
            limit = limit,
        ))
    }

    fn user_name(&self, iri: &str) -> String {
        iri.strip_prefix(self.config.user_namespace.as_str())
            .unwrap_or(iri)
            .to_string()
    }

    pub fn decode_datasets(&self, rows: &[Row]) -> Vec<DatasetSummary> {
        let mut datasets: IndexMap<String, Vec<String>> = IndexMap::new();
        for row in rows {
            let Some(graph) = row.iri(DATASET_VAR) else {
                continue;
            };
            let base = split_dataset_graph(graph).map(|(base, _)| base).unwrap_or(graph);
            let uploaders = datasets.entry(base.to_string()).or_default();
            if let Some(uploader) = row.iri(UPLOADER_VAR) {
                let name = self.user_name(uploader);
                if !uploaders.contains(&name) {
                    uploaders.push(name);
                }
            }
        }

        datasets
            .into_iter()
            .map(|(dataset, uploaders)| DatasetSummary { dataset, uploaders })
            .collect()
    }

    /// Read a count; no rows counts as zero.
    pub fn decode_count(&self, rows: &[Row]) -> Result<u64> {
        let Some(raw) = rows.first().and_then(|row| row.literal(COUNT_VAR)) else {
            return Ok(0);
        };
        raw.parse().map_err(|_| PrimarySourcesError::Store {
            payload: format!("unexpected count: {}", raw),
        })
    }

    pub fn decode_item(&self, rows: &[Row]) -> Option<String> {
        rows.first()
            .and_then(|row| row.iri(ITEM_VAR))
            .and_then(|iri| match Namespace::resolve(iri) {
                Some((Namespace::Entity, qid)) if is_valid_term(qid, TermKind::Item) => Some(qid.to_string()),
                _ => None,
            })
    }

    pub fn decode_leaderboard(&self, rows: &[Row]) -> Vec<ActivityEntry> {
        rows.iter()
            .filter_map(|row| {
                let user = row.iri(USER_VAR)?;
                let raw = row.literal(ACTIVITIES_VAR)?;
                match raw.parse() {
                    Ok(activities) => Some(ActivityEntry {
                        user: self.user_name(user),
                        activities,
                    }),
                    Err(_) => {
                        warn!(user, count = raw, "Ignoring non-numeric activity count");
                        None
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GraphTerm;

    #[test]
    fn test_item_suggestions_query() {
        let query = SuggestionQueries::default()
            .item_suggestions("Q5921", Some("http://example.org/cosmetics"))
            .unwrap();

        assert!(query.contains("VALUES ?dataset { <http://example.org/cosmetics/new> }"));
        assert!(query.contains("<http://www.wikidata.org/entity/Q5921> ?claim ?statement ."));
        assert!(query.contains("<http://www.w3.org/ns/prov#wasDerivedFrom>"));
    }

    #[test]
    fn test_decided_claims_anchor_pending_values() {
        let queries = SuggestionQueries::default();
        let query = queries
            .item_suggestions("Q5921", Some("http://example.org/cosmetics"))
            .unwrap();

        assert!(query.starts_with("SELECT DISTINCT"));
        assert!(query.contains("GRAPH ?anchor { <http://www.wikidata.org/entity/Q5921> ?claim ?statement . }"));
        assert!(query.contains("FILTER(STRSTARTS(STR(?anchor), REPLACE(STR(?dataset), \"new$\", \"\")))"));
        assert!(query.contains("FILTER(?pendingProperty != <http://www.w3.org/ns/prov#wasDerivedFrom>)"));
        assert!(query.contains("GRAPH ?anchor { ?statement ?property ?value . }"));

        let count = queries.pending_count(None).unwrap();
        assert!(count.contains("GRAPH ?anchor { ?item ?claim ?statement . }"));
        assert!(!count.contains("GRAPH ?dataset { ?item"));
    }

    #[test]
    fn test_item_suggestions_rejects_bad_input() {
        let queries = SuggestionQueries::default();
        assert!(queries.item_suggestions("Q5921> } DROP ALL #", None).is_err());
        assert!(queries.item_suggestions("Q1", Some("not an iri")).is_err());
    }

    #[test]
    fn test_all_pending_graphs() {
        let query = SuggestionQueries::default().pending_count(None).unwrap();
        assert!(query.contains("FILTER(STRENDS(STR(?dataset), \"/new\"))"));
        assert!(query.contains("COUNT(DISTINCT ?item)"));
    }

    #[test]
    fn test_item_at() {
        let query = SuggestionQueries::default().item_at(None, 17).unwrap();
        assert!(query.contains("OFFSET 17"));
        assert!(query.contains("LIMIT 1"));
    }

    #[test]
    fn test_decode_datasets() {
        let queries = SuggestionQueries::default();
        let rows = vec![
            Row::new()
                .with(DATASET_VAR, GraphTerm::iri("http://example.org/a/new"))
                .with(UPLOADER_VAR, GraphTerm::iri("http://www.wikidata.org/wiki/User:Hjfocs")),
            Row::new().with(DATASET_VAR, GraphTerm::iri("http://example.org/b/new")),
        ];

        let datasets = queries.decode_datasets(&rows);
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0].dataset, "http://example.org/a");
        assert_eq!(datasets[0].uploaders, vec!["Hjfocs".to_string()]);
        assert!(datasets[1].uploaders.is_empty());
    }

    #[test]
    fn test_decode_count_and_item() {
        let queries = SuggestionQueries::default();
        let count = vec![Row::new().with(COUNT_VAR, GraphTerm::typed("42", vocab::XSD_INTEGER))];
        assert_eq!(queries.decode_count(&count).unwrap(), 42);
        assert_eq!(queries.decode_count(&[]).unwrap(), 0);

        let item = vec![Row::new().with(ITEM_VAR, GraphTerm::iri("http://www.wikidata.org/entity/Q42"))];
        assert_eq!(queries.decode_item(&item), Some("Q42".to_string()));
    }

    #[test]
    fn test_decode_leaderboard() {
        let queries = SuggestionQueries::default();
        let rows = vec![
            Row::new()
                .with(USER_VAR, GraphTerm::iri("http://www.wikidata.org/wiki/User:Hjfocs"))
                .with(ACTIVITIES_VAR, GraphTerm::typed("7", vocab::XSD_INTEGER)),
            Row::new()
                .with(USER_VAR, GraphTerm::iri("http://www.wikidata.org/wiki/User:Other"))
                .with(ACTIVITIES_VAR, GraphTerm::plain("many")),
        ];

        assert_eq!(
            queries.decode_leaderboard(&rows),
            vec![ActivityEntry {
                user: "Hjfocs".to_string(),
                activities: 7
            }]
        );
    }
}
