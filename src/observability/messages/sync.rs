// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for edit pushes.
//!
//! This module contains message types for logging events related to:
//! * A coalesced edit being pushed to the step engine
//! * The engine committing or declining it
//! * Pushes that are skipped or whose replies are discarded

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Edit push issued to the step engine.
///
/// # Log Level
/// `debug!` - Happens once per debounce window
pub struct EditPushStarted<'a> {
    pub edit_event_type: &'a str,
    pub generation: u64,
    pub previous_step_id: Option<&'a str>,
}

impl Display for EditPushStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pushing {} (generation {}) on top of step {}",
            self.edit_event_type,
            self.generation,
            self.previous_step_id.unwrap_or("<none>")
        )
    }
}

impl StructuredLog for EditPushStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            edit_event_type = self.edit_event_type,
            generation = self.generation,
            previous_step_id = self.previous_step_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "edit_push",
            span_name = name,
            edit_event_type = self.edit_event_type,
            generation = self.generation,
        )
    }
}

/// Step engine committed the pushed edit.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use synced_params::observability::messages::sync::EditPushSucceeded;
///
/// let msg = EditPushSucceeded {
///     edit_event_type: "concat_edit",
///     generation: 2,
///     step_id: "7",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct EditPushSucceeded<'a> {
    pub edit_event_type: &'a str,
    pub generation: u64,
    pub step_id: &'a str,
}

impl Display for EditPushSucceeded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step engine committed {} (generation {}) as step {}",
            self.edit_event_type, self.generation, self.step_id
        )
    }
}

impl StructuredLog for EditPushSucceeded<'_> {
    fn log(&self) {
        tracing::info!(
            edit_event_type = self.edit_event_type,
            generation = self.generation,
            step_id = self.step_id,
            "{}", self
        );
    }
}

/// Step engine declined the edit or could not be reached.
///
/// # Log Level
/// `warn!` - Surfaced to the caller, who is expected to fix the params
pub struct EditPushFailed<'a> {
    pub edit_event_type: &'a str,
    pub generation: u64,
    pub remediation_hint: &'a str,
}

impl Display for EditPushFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step engine did not commit {} (generation {}): {}",
            self.edit_event_type, self.generation, self.remediation_hint
        )
    }
}

impl StructuredLog for EditPushFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            edit_event_type = self.edit_event_type,
            generation = self.generation,
            remediation_hint = self.remediation_hint,
            "{}", self
        );
    }
}

/// Debounce fired while the store held no value.
///
/// # Log Level
/// `debug!` - Only reachable after a refresh reset to an absent default
pub struct PushSkippedUninitialized<'a> {
    pub edit_event_type: &'a str,
}

impl Display for PushSkippedUninitialized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping {} push: params are not initialized",
            self.edit_event_type
        )
    }
}

impl StructuredLog for PushSkippedUninitialized<'_> {
    fn log(&self) {
        tracing::debug!(edit_event_type = self.edit_event_type, "{}", self);
    }
}

/// A reply arrived after a newer one had already been applied.
///
/// # Log Level
/// `debug!` - Expected under the discard-stale policy
pub struct StaleResponseDiscarded<'a> {
    pub operation: &'a str,
    pub stamp: u64,
    pub applied_generation: u64,
}

impl Display for StaleResponseDiscarded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Discarding {} reply stamped {}: generation {} is already applied",
            self.operation, self.stamp, self.applied_generation
        )
    }
}

impl StructuredLog for StaleResponseDiscarded<'_> {
    fn log(&self) {
        tracing::debug!(
            operation = self.operation,
            stamp = self.stamp,
            applied_generation = self.applied_generation,
            "{}", self
        );
    }
}
