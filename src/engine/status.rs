// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error and loading aggregation.
//!
//! `SyncTracker` is the mutable half, owned by the synchronizer: it counts
//! pushes in flight and remembers the last failure. `SyncStatus` is the
//! read-only half handed to callers, either as a snapshot or through a
//! `tokio::sync::watch` channel.

use crate::errors::SyncError;
use crate::traits::StepId;

/// Where one params instance is in its sync lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// No value yet and nothing to push.
    Uninitialized,
    /// Synced, nothing pending.
    Idle,
    /// A quiet period is running or a push is in flight.
    Pending,
    /// The last push failed.
    Errored,
}

impl SyncPhase {
    pub fn derive(initialized: bool, pending: bool, errored: bool) -> SyncPhase {
        if pending {
            SyncPhase::Pending
        } else if errored {
            SyncPhase::Errored
        } else if initialized {
            SyncPhase::Idle
        } else {
            SyncPhase::Uninitialized
        }
    }
}

/// What a caller renders: current error, in-flight flag and step pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncStatus {
    pub phase: SyncPhase,
    /// Remediation hint for the last failure, if any.
    pub error: Option<String>,
    pub failure: Option<SyncError>,
    pub loading: bool,
    pub step_id: Option<StepId>,
    pub generation: u64,
}

impl SyncStatus {
    /// No error and nothing in flight.
    pub fn is_synced(&self) -> bool {
        self.error.is_none() && !self.loading && self.phase != SyncPhase::Pending
    }
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self {
            phase: SyncPhase::Uninitialized,
            error: None,
            failure: None,
            loading: false,
            step_id: None,
            generation: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct SyncTracker {
    failure: Option<SyncError>,
    pushes_in_flight: usize,
}

impl SyncTracker {
    pub fn begin_push(&mut self) {
        self.pushes_in_flight += 1;
    }

    /// Called once per `begin_push`, whatever the outcome.
    pub fn end_push(&mut self) {
        self.pushes_in_flight = self.pushes_in_flight.saturating_sub(1);
    }

    pub fn record_failure(&mut self, failure: SyncError) {
        self.failure = Some(failure);
    }

    pub fn clear_error(&mut self) {
        self.failure = None;
    }

    pub fn loading(&self) -> bool {
        self.pushes_in_flight > 0
    }

    pub fn failure(&self) -> Option<&SyncError> {
        self.failure.as_ref()
    }

    pub fn error(&self) -> Option<String> {
        self.failure.as_ref().map(SyncError::remediation_hint)
    }
}
