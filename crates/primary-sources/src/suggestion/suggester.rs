//! Suggestion retrieval through a graph store.

use std::sync::Arc;

use tracing::debug;

use crate::config::PrimarySourcesConfig;
use crate::error::Result;
use crate::store::GraphStore;

use super::formatter::SuggestionFormatter;
use super::query::SuggestionQueries;
use super::{ActivityEntry, DatasetSummary, SuggestionBatch};

/// Runs suggestion and statistics queries and decodes their rows.
pub struct Suggester {
    store: Arc<dyn GraphStore>,
    queries: SuggestionQueries,
    formatter: SuggestionFormatter,
}

impl Suggester {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self::with_config(store, PrimarySourcesConfig::default())
    }

    pub fn with_config(store: Arc<dyn GraphStore>, config: PrimarySourcesConfig) -> Self {
        Self {
            store,
            queries: SuggestionQueries::new(config),
            formatter: SuggestionFormatter::new(),
        }
    }

    /// Pending statements about one item, as curator lines.
    pub fn item(&self, qid: &str, dataset: Option<&str>) -> Result<SuggestionBatch> {
        let rows = self.store.query(&self.queries.item_suggestions(qid, dataset)?)?;
        debug!(qid, rows = rows.len(), "Fetched suggestion rows");
        Ok(self.formatter.format(&rows))
    }

    /// Pending statements about an item picked by `pick(count)`.
    ///
    /// `pick` receives the number of pending items and returns an offset
    /// below it. Returns `None` when nothing is pending.
    pub fn random_item(
        &self,
        dataset: Option<&str>,
        pick: impl FnOnce(u64) -> u64,
    ) -> Result<Option<(String, SuggestionBatch)>> {
        let count = self.pending_count(dataset)?;
        if count == 0 {
            return Ok(None);
        }

        let offset = pick(count).min(count - 1);
        let rows = self.store.query(&self.queries.item_at(dataset, offset)?)?;
        let Some(qid) = self.queries.decode_item(&rows) else {
            return Ok(None);
        };

        let batch = self.item(&qid, dataset)?;
        Ok(Some((qid, batch)))
    }

    pub fn datasets(&self) -> Result<Vec<DatasetSummary>> {
        let rows = self.store.query(&self.queries.datasets()?)?;
        Ok(self.queries.decode_datasets(&rows))
    }

    pub fn pending_count(&self, dataset: Option<&str>) -> Result<u64> {
        let rows = self.store.query(&self.queries.pending_count(dataset)?)?;
        self.queries.decode_count(&rows)
    }

    pub fn leaderboard(&self, limit: usize) -> Result<Vec<ActivityEntry>> {
        let rows = self.store.query(&self.queries.leaderboard(limit)?)?;
        Ok(self.queries.decode_leaderboard(&rows))
    }
}
