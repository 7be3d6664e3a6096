//! Workflow states and the dataset graphs that encode them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PrimarySourcesError, Result};

/// Workflow state of a statement, encoded as a dataset graph suffix.
///
/// `New` is the only state with outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurationState {
    New,
    Approved,
    Rejected,
    Duplicate,
    Blacklisted,
}

impl CurationState {
    pub const TERMINAL: [CurationState; 4] = [
        CurationState::Approved,
        CurationState::Rejected,
        CurationState::Duplicate,
        CurationState::Blacklisted,
    ];

    /// Graph suffix.
    pub fn suffix(&self) -> &'static str {
        match self {
            CurationState::New => "new",
            CurationState::Approved => "approved",
            CurationState::Rejected => "rejected",
            CurationState::Duplicate => "duplicate",
            CurationState::Blacklisted => "blacklisted",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CurationState::New => "New",
            CurationState::Approved => "Approved",
            CurationState::Rejected => "Rejected",
            CurationState::Duplicate => "Duplicate",
            CurationState::Blacklisted => "Blacklisted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, CurationState::New)
    }

    /// Check a `New -> target` transition.
    pub fn transition_to(self, target: CurationState) -> Result<CurationState> {
        match (self, target) {
            (CurationState::New, target) if target.is_terminal() => Ok(target),
            (from, to) => Err(PrimarySourcesError::InvalidTransition(format!(
                "{} -> {}",
                from.suffix(),
                to.suffix()
            ))),
        }
    }
}

impl fmt::Display for CurationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for CurationState {
    type Err = PrimarySourcesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "new" => Ok(CurationState::New),
            "approved" => Ok(CurationState::Approved),
            "rejected" => Ok(CurationState::Rejected),
            "duplicate" => Ok(CurationState::Duplicate),
            "blacklisted" => Ok(CurationState::Blacklisted),
            other => Err(PrimarySourcesError::InvalidTransition(format!("unknown state: {}", other))),
        }
    }
}

/// Named graph of a dataset in a given state.
pub fn dataset_graph(dataset: &str, state: CurationState) -> String {
    format!("{}/{}", dataset.trim_end_matches('/'), state.suffix())
}

/// Prefix shared by every state graph of a dataset.
pub fn dataset_base(dataset: &str) -> String {
    format!("{}/", dataset.trim_end_matches('/'))
}

/// Split a dataset graph IRI into its base URI and state.
pub fn split_dataset_graph(graph: &str) -> Option<(&str, CurationState)> {
    let (base, suffix) = graph.rsplit_once('/')?;
    let state = suffix.parse().ok()?;
    (!base.is_empty()).then_some((base, state))
}
