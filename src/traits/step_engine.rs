use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::errors::EditFailure;
use crate::params::StepParams;

/// Opaque token naming one committed step in the engine's history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub String);

impl StepId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StepId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One edit pushed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditRequest {
    pub edit_event_type: String,
    pub params: StepParams,
    /// The step this edit is applied on top of; `None` before the first commit.
    pub previous_step_id: Option<StepId>,
}

impl EditRequest {
    pub fn new(params: StepParams, previous_step_id: Option<StepId>) -> Self {
        Self {
            edit_event_type: params.kind().edit_event_type().to_string(),
            params,
            previous_step_id,
        }
    }
}

/// Options for a params query. Currently always empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParamsQueryOptions(pub HashMap<String, serde_json::Value>);

#[async_trait]
pub trait StepEngine: Send + Sync {
    /// Commit an edit, returning the id of the step it produced.
    ///
    /// A `Rejected` failure leaves the engine's history untouched.
    async fn edit(&self, request: &EditRequest) -> Result<StepId, EditFailure>;

    /// Authoritative params of `step_id`, or `Ok(None)` if the engine has no
    /// such step of this type in its active history.
    async fn get_params(
        &self,
        step_type: &str,
        step_id: &StepId,
        options: &ParamsQueryOptions,
    ) -> Result<Option<StepParams>, EditFailure>;
}
