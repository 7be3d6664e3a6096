//! Executing curation decisions against a graph store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::PrimarySourcesConfig;
use crate::error::Result;
use crate::store::GraphStore;

use super::locator::StatementLocator;
use super::machine::{CurationPlan, CurationStateMachine, SweepScope};
use super::request::CurationRequest;
use super::state::CurationState;

/// Record of an applied decision.
#[derive(Debug, Clone, Serialize)]
pub struct CurationOutcome {
    pub locator: StatementLocator,
    pub state: CurationState,
    pub scope: SweepScope,
    pub user: String,
    pub source_graph: String,
    pub target_graph: String,
    pub decided_at: DateTime<Utc>,
}

/// Applies curator decisions through a [`GraphStore`].
///
/// Each decision is sent as exactly one update; store failures are returned
/// unchanged and nothing is retried.
pub struct Curator {
    store: Arc<dyn GraphStore>,
    machine: CurationStateMachine,
}

impl Curator {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self::with_config(store, PrimarySourcesConfig::default())
    }

    pub fn with_config(store: Arc<dyn GraphStore>, config: PrimarySourcesConfig) -> Self {
        Self {
            store,
            machine: CurationStateMachine::with_config(config),
        }
    }

    pub fn machine(&self) -> &CurationStateMachine {
        &self.machine
    }

    /// Resolve and apply a request.
    pub fn curate(&self, request: &CurationRequest) -> Result<CurationOutcome> {
        let locator = request.locator()?;
        self.decide(&locator, request.state, &request.user, &request.dataset)
    }

    /// Apply a decision on an already resolved statement.
    pub fn decide(
        &self,
        locator: &StatementLocator,
        state: CurationState,
        user: &str,
        dataset: &str,
    ) -> Result<CurationOutcome> {
        let plan = self.machine.plan(locator, state, user, dataset)?;
        self.apply(plan, user)
    }

    fn apply(&self, plan: CurationPlan, user: &str) -> Result<CurationOutcome> {
        if let Err(e) = self.store.update(&plan.update) {
            warn!(
                store = self.store.name(),
                subject = %plan.locator.subject_id,
                error = %e,
                "Curation update rejected"
            );
            return Err(e);
        }

        info!(
            subject = %plan.locator.subject_id,
            property = %plan.locator.property_id,
            state = %plan.state,
            user,
            "Curated statement"
        );

        Ok(CurationOutcome {
            locator: plan.locator,
            state: plan.state,
            scope: plan.scope,
            user: user.to_string(),
            source_graph: plan.source_graph,
            target_graph: plan.target_graph,
            decided_at: Utc::now(),
        })
    }
}
