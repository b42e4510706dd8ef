// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process step engine with an undo/redo history.
//!
//! Models the parts of a real step engine the synchronizer depends on:
//!
//! * Committed steps are kept in order, each with an id, its kind and its
//!   params in wire form
//! * An edit whose `previous_step_id` names the current head step of the same
//!   kind overwrites that step; any other edit appends a new one. A fresh id
//!   is issued either way and the redo stack is discarded
//! * `undo`, `redo`, `clear`, `replay` and `apply_external_edit` move the
//!   active step pointer and broadcast an `ExternalUpdate`; edits made through
//!   `StepEngine::edit` do not
//! * Params queries only see steps that are in the active history
//!
//! Latency and transport faults can be injected for tests and demos.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::errors::{EditErrorDescriptor, EditFailure};
use crate::params::{StepKind, StepParams};
use crate::traits::{
    EditRequest, ExternalUpdate, ParamsQueryOptions, StepEngine, StepId, UpdateCause,
    UpdateChannel, UpdateSubscription,
};

/// Capacity of the update broadcast; slower subscribers see a lag instead.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Custom acceptance check run instead of `StepParams::validate`.
pub type EditValidator =
    Arc<dyn Fn(&StepParams) -> Result<(), EditErrorDescriptor> + Send + Sync>;

#[derive(Debug, Clone)]
struct CommittedStep {
    id: StepId,
    kind: StepKind,
    params: serde_json::Value,
}

#[derive(Debug, Default)]
struct History {
    steps: Vec<CommittedStep>,
    redo: Vec<CommittedStep>,
    next_id: u64,
}

impl History {
    fn issue_id(&mut self) -> StepId {
        self.next_id += 1;
        StepId(self.next_id.to_string())
    }

    fn commit(
        &mut self,
        params: &StepParams,
        previous: Option<&StepId>,
    ) -> Result<StepId, EditFailure> {
        let wire = params
            .to_wire()
            .map_err(|e| EditFailure::Transport(e.to_string()))?;
        let kind = params.kind();
        let id = self.issue_id();
        let step = CommittedStep {
            id: id.clone(),
            kind,
            params: wire,
        };

        let overwrites_head = matches!(
            (self.steps.last(), previous),
            (Some(head), Some(prev)) if &head.id == prev && head.kind == kind
        );
        if overwrites_head {
            self.steps.pop();
        }
        self.steps.push(step);
        self.redo.clear();
        Ok(id)
    }
}

pub struct InMemoryStepEngine {
    history: Mutex<History>,
    updates: broadcast::Sender<ExternalUpdate>,
    latency: Duration,
    edit_delays: Mutex<VecDeque<Duration>>,
    edit_faults: Mutex<VecDeque<String>>,
    query_faults: Mutex<VecDeque<String>>,
    validator: Option<EditValidator>,
    edit_calls: AtomicUsize,
    query_calls: AtomicUsize,
}

impl Default for InMemoryStepEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStepEngine {
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            history: Mutex::new(History::default()),
            updates,
            latency: Duration::ZERO,
            edit_delays: Mutex::new(VecDeque::new()),
            edit_faults: Mutex::new(VecDeque::new()),
            query_faults: Mutex::new(VecDeque::new()),
            validator: None,
            edit_calls: AtomicUsize::new(0),
            query_calls: AtomicUsize::new(0),
        }
    }

    /// Delay applied to every edit and query.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&StepParams) -> Result<(), EditErrorDescriptor> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Make the next edit take `delay` instead of the base latency.
    pub fn delay_next_edit(&self, delay: Duration) {
        lock(&self.edit_delays).push_back(delay);
    }

    /// Make the next edit fail without reaching the history.
    pub fn fail_next_edit_transport(&self, message: impl Into<String>) {
        lock(&self.edit_faults).push_back(message.into());
    }

    pub fn fail_next_query_transport(&self, message: impl Into<String>) {
        lock(&self.query_faults).push_back(message.into());
    }

    pub fn edit_count(&self) -> usize {
        self.edit_calls.load(Ordering::SeqCst)
    }

    pub fn query_count(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// Id of the active step, if any.
    pub fn head(&self) -> Option<StepId> {
        lock(&self.history).steps.last().map(|s| s.id.clone())
    }

    pub fn step_count(&self) -> usize {
        lock(&self.history).steps.len()
    }

    /// Params of an active step, decoded.
    pub fn params_of(&self, id: &StepId) -> Option<StepParams> {
        let history = lock(&self.history);
        let step = history.steps.iter().find(|s| &s.id == id)?;
        StepParams::from_wire(step.kind, step.params.clone()).ok()
    }

    /// Move the head step to the redo stack. Returns `false` if there is nothing to undo.
    pub fn undo(&self) -> bool {
        let undone = {
            let mut history = lock(&self.history);
            match history.steps.pop() {
                Some(step) => {
                    history.redo.push(step);
                    true
                }
                None => false,
            }
        };
        if undone {
            self.notify(UpdateCause::Undo);
        }
        undone
    }

    pub fn redo(&self) -> bool {
        let redone = {
            let mut history = lock(&self.history);
            match history.redo.pop() {
                Some(step) => {
                    history.steps.push(step);
                    true
                }
                None => false,
            }
        };
        if redone {
            self.notify(UpdateCause::Redo);
        }
        redone
    }

    /// Drop every step, as when an analysis is cleared.
    pub fn clear(&self) {
        {
            let mut history = lock(&self.history);
            history.steps.clear();
            history.redo.clear();
        }
        self.notify(UpdateCause::Clear);
    }

    /// Append a saved sequence of steps. Either all of them are committed or,
    /// if one is rejected, none are.
    pub fn replay(&self, steps: Vec<StepParams>) -> Result<Vec<StepId>, EditFailure> {
        for params in &steps {
            self.check(params)?;
        }
        let ids = {
            let mut history = lock(&self.history);
            let mut ids = Vec::with_capacity(steps.len());
            for params in &steps {
                ids.push(history.commit(params, None)?);
            }
            ids
        };
        self.notify(UpdateCause::Replay);
        Ok(ids)
    }

    /// Commit an edit on behalf of some other client and announce it.
    pub fn apply_external_edit(
        &self,
        params: StepParams,
        previous: Option<&StepId>,
    ) -> Result<StepId, EditFailure> {
        self.check(&params)?;
        let id = lock(&self.history).commit(&params, previous)?;
        self.notify(UpdateCause::ExternalEdit);
        Ok(id)
    }

    fn check(&self, params: &StepParams) -> Result<(), EditFailure> {
        let verdict = match &self.validator {
            Some(validator) => validator(params),
            None => params.validate(),
        };
        verdict.map_err(EditFailure::Rejected)
    }

    fn notify(&self, cause: UpdateCause) {
        // No subscribers is not an error.
        let _ = self.updates.send(ExternalUpdate { cause });
    }

    async fn wait(&self, delay: Option<Duration>) {
        let delay = delay.unwrap_or(self.latency);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl StepEngine for InMemoryStepEngine {
    async fn edit(&self, request: &EditRequest) -> Result<StepId, EditFailure> {
        self.edit_calls.fetch_add(1, Ordering::SeqCst);
        let delay = lock(&self.edit_delays).pop_front();
        self.wait(delay).await;

        if let Some(message) = lock(&self.edit_faults).pop_front() {
            return Err(EditFailure::Transport(message));
        }
        self.check(&request.params)?;
        lock(&self.history).commit(&request.params, request.previous_step_id.as_ref())
    }

    async fn get_params(
        &self,
        step_type: &str,
        step_id: &StepId,
        _options: &ParamsQueryOptions,
    ) -> Result<Option<StepParams>, EditFailure> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.wait(None).await;

        if let Some(message) = lock(&self.query_faults).pop_front() {
            return Err(EditFailure::Transport(message));
        }
        let Some(kind) = StepKind::from_step_type(step_type) else {
            return Ok(None);
        };
        let history = lock(&self.history);
        let Some(step) = history
            .steps
            .iter()
            .find(|s| &s.id == step_id && s.kind == kind)
        else {
            return Ok(None);
        };
        StepParams::from_wire(kind, step.params.clone())
            .map(Some)
            .map_err(|e| EditFailure::Transport(e.to_string()))
    }
}

impl UpdateChannel for InMemoryStepEngine {
    fn subscribe(&self) -> UpdateSubscription {
        self.updates.subscribe()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
