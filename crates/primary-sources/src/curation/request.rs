//! Curation requests as submitted by the curation front end.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::codec::{api_json_to_graph_term, api_reference_to_graph_term, curator_token_to_graph_term};
use crate::error::{PrimarySourcesError, Result};
use crate::model::GraphTerm;

use super::locator::{StatementKind, StatementLocator};
use super::state::CurationState;

/// A curator decision on one statement, qualifier or reference value.
///
/// `value` is either a curator token (a JSON string) or an editing-API value
/// (a JSON object). Reference values may also arrive as a full reference
/// body with `snaks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurationRequest {
    pub qid: String,
    pub main_pid: String,
    /// Qualifier or reference property. Defaults to `main_pid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    pub value: Json,
    #[serde(rename = "type")]
    pub kind: StatementKind,
    pub state: CurationState,
    pub user: String,
    pub dataset: String,
}

impl CurationRequest {
    /// Resolve the request to a statement locator.
    pub fn locator(&self) -> Result<StatementLocator> {
        let (pid, value) = self.resolve_value()?;
        let pid = pid.as_deref().unwrap_or(&self.main_pid);
        StatementLocator::new(&self.qid, &self.main_pid, pid, value, self.kind)
    }

    fn resolve_value(&self) -> Result<(Option<String>, GraphTerm)> {
        match &self.value {
            Json::String(token) => Ok((self.pid.clone(), curator_token_to_graph_term(token)?)),
            json @ Json::Object(body) if body.contains_key("snaks") => {
                let (pid, value) = api_reference_to_graph_term(json)?;
                if let Some(requested) = &self.pid {
                    if *requested != pid {
                        return Err(PrimarySourcesError::InvalidLocator(format!(
                            "reference property {} does not match requested {}",
                            pid, requested
                        )));
                    }
                }
                Ok((Some(pid), value))
            }
            json => Ok((self.pid.clone(), api_json_to_graph_term(json)?)),
        }
    }
}
