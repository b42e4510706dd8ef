// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;

use crate::errors::{EditErrorDescriptor, EditFailure};
use crate::params::StepParams;
use crate::traits::{
    EditRequest, ExternalUpdate, ParamsQueryOptions, StepEngine, StepId, UpdateCause,
    UpdateChannel, UpdateSubscription,
};

/// A reply queued on the scripted engine, delivered after `delay`.
struct Scripted<T> {
    delay: Duration,
    reply: T,
}

/// A step engine that records every call and answers from scripted queues.
///
/// With an empty edit queue it commits everything, issuing ids "1", "2", ...
/// With an empty query queue it reports every step as not found.
pub struct ScriptedStepEngine {
    edits: Mutex<VecDeque<Scripted<Result<StepId, EditFailure>>>>,
    queries: Mutex<VecDeque<Scripted<Result<Option<StepParams>, EditFailure>>>>,
    edit_log: Mutex<Vec<EditRequest>>,
    query_log: Mutex<Vec<(String, StepId)>>,
    issued: Mutex<u64>,
    updates: broadcast::Sender<ExternalUpdate>,
}

impl Default for ScriptedStepEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedStepEngine {
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(16);
        Self {
            edits: Mutex::new(VecDeque::new()),
            queries: Mutex::new(VecDeque::new()),
            edit_log: Mutex::new(Vec::new()),
            query_log: Mutex::new(Vec::new()),
            issued: Mutex::new(0),
            updates,
        }
    }

    pub fn reply_edit(&self, reply: Result<StepId, EditFailure>) {
        self.reply_edit_after(Duration::ZERO, reply);
    }

    pub fn reply_edit_after(&self, delay: Duration, reply: Result<StepId, EditFailure>) {
        lock(&self.edits).push_back(Scripted { delay, reply });
    }

    /// Queue a rejection carrying `to_fix` as its remediation hint.
    pub fn reject_next_edit(&self, to_fix: &str) {
        self.reply_edit(Err(EditFailure::Rejected(EditErrorDescriptor::new(
            "Edit rejected",
            to_fix,
        ))));
    }

    pub fn reply_query(&self, reply: Result<Option<StepParams>, EditFailure>) {
        self.reply_query_after(Duration::ZERO, reply);
    }

    pub fn reply_query_after(
        &self,
        delay: Duration,
        reply: Result<Option<StepParams>, EditFailure>,
    ) {
        lock(&self.queries).push_back(Scripted { delay, reply });
    }

    /// Every edit request received so far, in order.
    pub fn edits(&self) -> Vec<EditRequest> {
        lock(&self.edit_log).clone()
    }

    /// Every (step_type, step_id) queried so far, in order.
    pub fn queries(&self) -> Vec<(String, StepId)> {
        lock(&self.query_log).clone()
    }

    /// Broadcast an external update to every subscriber.
    pub fn notify(&self, cause: UpdateCause) {
        let _ = self.updates.send(ExternalUpdate { cause });
    }

    pub fn subscriber_count(&self) -> usize {
        self.updates.receiver_count()
    }

    fn next_id(&self) -> StepId {
        let mut issued = lock(&self.issued);
        *issued += 1;
        StepId(issued.to_string())
    }
}

#[async_trait::async_trait]
impl StepEngine for ScriptedStepEngine {
    async fn edit(&self, request: &EditRequest) -> Result<StepId, EditFailure> {
        lock(&self.edit_log).push(request.clone());
        let scripted = lock(&self.edits).pop_front();
        match scripted {
            Some(Scripted { delay, reply }) => {
                tokio::time::sleep(delay).await;
                reply
            }
            None => Ok(self.next_id()),
        }
    }

    async fn get_params(
        &self,
        step_type: &str,
        step_id: &StepId,
        _options: &ParamsQueryOptions,
    ) -> Result<Option<StepParams>, EditFailure> {
        lock(&self.query_log).push((step_type.to_string(), step_id.clone()));
        let scripted = lock(&self.queries).pop_front();
        match scripted {
            Some(Scripted { delay, reply }) => {
                tokio::time::sleep(delay).await;
                reply
            }
            None => Ok(None),
        }
    }
}

impl UpdateChannel for ScriptedStepEngine {
    fn subscribe(&self) -> UpdateSubscription {
        self.updates.subscribe()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
