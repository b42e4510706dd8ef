// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Push and refresh against the step engine.
//!
//! All mutable state sits behind one `std::sync::Mutex` that is never held
//! across an `.await`: each operation locks to read what it needs, releases,
//! awaits the engine, then locks again to apply the reply. Every change is
//! published to the status watch channel before the lock is released.
//!
//! Operations are stamped with the store generation they were issued at.
//! Under `StaleResponsePolicy::DiscardStale` a reply whose stamp is older than
//! the last applied one is dropped; under `ApplyLatest` every reply is applied
//! in arrival order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span};

use crate::config::{StaleResponsePolicy, SyncConfig};
use crate::engine::debounce::Debouncer;
use crate::engine::status::{SyncPhase, SyncStatus, SyncTracker};
use crate::engine::store::{ParameterStore, ParamsSnapshot};
use crate::errors::{ParamsError, SyncError};
use crate::observability::messages::refresh::{RefreshCompleted, RefreshOutcome, RefreshStarted};
use crate::observability::messages::sync::{
    EditPushFailed, EditPushStarted, EditPushSucceeded, PushSkippedUninitialized,
    StaleResponseDiscarded,
};
use crate::observability::messages::StructuredLog;
use crate::params::{StepKind, StepParams};
use crate::traits::{EditRequest, ParamsQueryOptions, StepEngine, StepId};

struct SyncState {
    store: ParameterStore,
    step_id: Option<StepId>,
    tracker: SyncTracker,
    debouncer: Debouncer,
    applied_generation: u64,
}

impl SyncState {
    fn status(&self) -> SyncStatus {
        let pending = self.debouncer.is_armed() || self.tracker.loading();
        SyncStatus {
            phase: SyncPhase::derive(
                self.store.is_initialized(),
                pending,
                self.tracker.failure().is_some(),
            ),
            error: self.tracker.error(),
            failure: self.tracker.failure().cloned(),
            loading: self.tracker.loading(),
            step_id: self.step_id.clone(),
            generation: self.store.generation(),
        }
    }
}

pub(crate) struct Synchronizer {
    kind: StepKind,
    policy: StaleResponsePolicy,
    engine: Arc<dyn StepEngine>,
    state: Mutex<SyncState>,
    status_tx: watch::Sender<SyncStatus>,
}

impl Synchronizer {
    pub(crate) fn new(
        config: &SyncConfig,
        engine: Arc<dyn StepEngine>,
        shutdown: CancellationToken,
    ) -> Self {
        let state = SyncState {
            store: ParameterStore::new(config.step_kind, config.default_params.clone()),
            step_id: None,
            tracker: SyncTracker::default(),
            debouncer: Debouncer::new(config.debounce_delay(), shutdown),
            applied_generation: 0,
        };
        let (status_tx, _) = watch::channel(state.status());
        Self {
            kind: config.step_kind,
            policy: config.stale_response_policy,
            engine,
            state: Mutex::new(state),
            status_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &SyncState) {
        self.status_tx.send_replace(state.status());
    }

    pub(crate) fn kind(&self) -> StepKind {
        self.kind
    }

    /// Replace the value with `f(previous)` and re-arm the debounce timer.
    ///
    /// `f` runs without the state lock held, so it may call back into the
    /// handle. A set that lands while `f` runs is overwritten.
    pub(crate) fn set_with<F>(self: &Arc<Self>, f: F) -> Result<u64, ParamsError>
    where
        F: FnOnce(Option<&StepParams>) -> StepParams,
    {
        let previous = self.lock().store.get().cloned();
        let next = f(previous.as_ref());

        let mut state = self.lock();
        let generation = state.store.set(next)?;
        let this = Arc::clone(self);
        state
            .debouncer
            .arm(move |seq| async move { this.push_debounced(seq).await });
        self.publish(&state);
        Ok(generation)
    }

    pub(crate) fn snapshot(&self) -> ParamsSnapshot {
        self.lock().store.snapshot()
    }

    pub(crate) fn status(&self) -> SyncStatus {
        self.status_tx.borrow().clone()
    }

    pub(crate) fn watch_status(&self) -> watch::Receiver<SyncStatus> {
        self.status_tx.subscribe()
    }

    pub(crate) fn shutdown(&self) {
        let mut state = self.lock();
        state.debouncer.shutdown();
        self.publish(&state);
    }

    /// Entry point for an elapsed debounce timer armed with `seq`.
    async fn push_debounced(&self, seq: u64) {
        let issued = {
            let mut state = self.lock();
            if !state.debouncer.settle(seq) {
                return;
            }
            let issued = self.issue_push(&mut state);
            self.publish(&state);
            issued
        };
        if let Some((request, stamp, span)) = issued {
            self.complete_push(request, stamp).instrument(span).await;
        }
    }

    /// Build the edit request for the current value, or `None` when there is
    /// nothing to push.
    fn issue_push(&self, state: &mut SyncState) -> Option<(EditRequest, u64, Span)> {
        let edit_event_type = self.kind.edit_event_type();
        let Some(params) = state.store.get().cloned() else {
            PushSkippedUninitialized { edit_event_type }.log();
            return None;
        };
        state.tracker.begin_push();
        let stamp = state.store.generation();
        let request = EditRequest::new(params, state.step_id.clone());
        let started = EditPushStarted {
            edit_event_type,
            generation: stamp,
            previous_step_id: request.previous_step_id.as_ref().map(StepId::as_str),
        };
        started.log();
        let span = started.span("push");
        Some((request, stamp, span))
    }

    async fn complete_push(&self, request: EditRequest, stamp: u64) {
        let result = self.engine.edit(&request).await;

        let mut state = self.lock();
        state.tracker.end_push();
        if self.is_stale(&state, stamp, "push") {
            self.publish(&state);
            return;
        }
        state.applied_generation = stamp;

        let edit_event_type = request.edit_event_type.as_str();
        match result {
            Ok(step_id) => {
                EditPushSucceeded {
                    edit_event_type,
                    generation: stamp,
                    step_id: step_id.as_str(),
                }
                .log();
                state.step_id = Some(step_id);
                state.tracker.clear_error();
            }
            Err(failure) => {
                let failure = SyncError::from(failure);
                EditPushFailed {
                    edit_event_type,
                    generation: stamp,
                    remediation_hint: &failure.remediation_hint(),
                }
                .log();
                state.tracker.record_failure(failure);
            }
        }
        self.publish(&state);
    }

    /// Pull the authoritative params for the current step and overwrite the
    /// store. Cancels any pending quiet period and clears the error.
    pub(crate) async fn refresh(&self) {
        let step_type = self.kind.step_type();
        let (step_id, stamp) = {
            let mut state = self.lock();
            state.debouncer.cancel();
            let stamp = state.store.begin_refresh();
            self.publish(&state);
            (state.step_id.clone(), stamp)
        };

        let started = RefreshStarted {
            step_type,
            step_id: step_id.as_ref().map(StepId::as_str),
        };
        started.log();
        let span = started.span("refresh");
        let (params, outcome, detail) = self.query_step(step_id.as_ref()).instrument(span).await;

        let mut state = self.lock();
        if self.is_stale(&state, stamp, "refresh") {
            return;
        }
        state.applied_generation = stamp;
        state.store.adopt(params);
        state.tracker.clear_error();
        self.publish(&state);

        RefreshCompleted {
            step_type,
            outcome,
            detail: detail.as_deref(),
        }
        .log();
    }

    async fn query_step(
        &self,
        step_id: Option<&StepId>,
    ) -> (Option<StepParams>, RefreshOutcome, Option<String>) {
        let Some(id) = step_id else {
            return (None, RefreshOutcome::DefaultNoStep, None);
        };
        let options = ParamsQueryOptions::default();
        match self.engine.get_params(self.kind.step_type(), id, &options).await {
            Ok(Some(params)) if params.kind() == self.kind => {
                (Some(params), RefreshOutcome::Adopted, None)
            }
            Ok(_) => (None, RefreshOutcome::DefaultNotFound, None),
            Err(failure) => (
                None,
                RefreshOutcome::DefaultTransportFailure,
                Some(failure.to_string()),
            ),
        }
    }

    fn is_stale(&self, state: &SyncState, stamp: u64, operation: &str) -> bool {
        let stale = self.policy == StaleResponsePolicy::DiscardStale
            && stamp < state.applied_generation;
        if stale {
            StaleResponseDiscarded {
                operation,
                stamp,
                applied_generation: state.applied_generation,
            }
            .log();
        }
        stale
    }
}
