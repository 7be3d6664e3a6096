//! In-memory store double for tests and dry runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::curation::Update;
use crate::error::{PrimarySourcesError, Result};

use super::results::Row;
use super::GraphStore;

/// Store that answers queries from canned result sets and records updates.
///
/// Queued result sets are consumed in order; once exhausted, queries return
/// no rows.
#[derive(Default)]
pub struct MockStore {
    results: Mutex<VecDeque<Vec<Row>>>,
    queries: Mutex<Vec<String>>,
    updates: Mutex<Vec<Update>>,
    failure: Option<String>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects everything with `payload`.
    pub fn failing(payload: impl Into<String>) -> Self {
        Self {
            failure: Some(payload.into()),
            ..Self::default()
        }
    }

    /// Queue the rows returned by the next query.
    pub fn with_rows(self, rows: Vec<Row>) -> Self {
        self.push_rows(rows);
        self
    }

    pub fn push_rows(&self, rows: Vec<Row>) {
        if let Ok(mut results) = self.results.lock() {
            results.push_back(rows);
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    pub fn updates(&self) -> Vec<Update> {
        self.updates.lock().map(|u| u.clone()).unwrap_or_default()
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(payload) => Err(PrimarySourcesError::Store {
                payload: payload.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl GraphStore for MockStore {
    fn name(&self) -> &str {
        "mock"
    }

    fn query(&self, query: &str) -> Result<Vec<Row>> {
        self.check()?;
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }
        Ok(self
            .results
            .lock()
            .ok()
            .and_then(|mut results| results.pop_front())
            .unwrap_or_default())
    }

    fn update(&self, update: &Update) -> Result<()> {
        self.check()?;
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(update.clone());
        }
        Ok(())
    }
}
