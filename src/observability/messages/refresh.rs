// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for refreshes and the external update subscription.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// How a refresh settled the store's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The engine's params for the current step were adopted.
    Adopted,
    /// No step has been committed yet; reset to the default.
    DefaultNoStep,
    /// The current step is no longer in the engine's history.
    DefaultNotFound,
    /// The query failed; fell back to the default.
    DefaultTransportFailure,
}

impl Display for RefreshOutcome {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let label = match self {
            RefreshOutcome::Adopted => "adopted engine params",
            RefreshOutcome::DefaultNoStep => "reset to default (no step yet)",
            RefreshOutcome::DefaultNotFound => "reset to default (step not found)",
            RefreshOutcome::DefaultTransportFailure => "reset to default (query failed)",
        };
        f.write_str(label)
    }
}

/// Update notification received from the step engine.
///
/// # Log Level
/// `debug!` - One per undo, redo or foreign edit
pub struct ExternalUpdateReceived<'a> {
    pub step_type: &'a str,
    pub cause: &'a str,
}

impl Display for ExternalUpdateReceived<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "External update ({}) received for {} params",
            self.cause, self.step_type
        )
    }
}

impl StructuredLog for ExternalUpdateReceived<'_> {
    fn log(&self) {
        tracing::debug!(step_type = self.step_type, cause = self.cause, "{}", self);
    }
}

/// Refresh started for the current step.
///
/// # Log Level
/// `debug!` - Routine
pub struct RefreshStarted<'a> {
    pub step_type: &'a str,
    pub step_id: Option<&'a str>,
}

impl Display for RefreshStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Refreshing {} params for step {}",
            self.step_type,
            self.step_id.unwrap_or("<none>")
        )
    }
}

impl StructuredLog for RefreshStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            step_type = self.step_type,
            step_id = self.step_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "refresh",
            span_name = name,
            step_type = self.step_type,
            step_id = self.step_id,
        )
    }
}

/// Refresh finished.
///
/// # Log Level
/// `info!` for adoption and no-step resets, `warn!` when the query failed
pub struct RefreshCompleted<'a> {
    pub step_type: &'a str,
    pub outcome: RefreshOutcome,
    pub detail: Option<&'a str>,
}

impl Display for RefreshCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Refreshed {} params: {}", self.step_type, self.outcome)?;
        if let Some(detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl StructuredLog for RefreshCompleted<'_> {
    fn log(&self) {
        let outcome = self.outcome.to_string();
        match self.outcome {
            RefreshOutcome::DefaultTransportFailure => tracing::warn!(
                step_type = self.step_type,
                outcome = outcome.as_str(),
                "{}", self
            ),
            _ => tracing::info!(
                step_type = self.step_type,
                outcome = outcome.as_str(),
                "{}", self
            ),
        }
    }
}

/// The update channel closed; no further refreshes will be triggered.
///
/// # Log Level
/// `info!` - Normal when the step engine shuts down first
pub struct SubscriptionClosed<'a> {
    pub step_type: &'a str,
}

impl Display for SubscriptionClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "External update channel closed for {} params",
            self.step_type
        )
    }
}

impl StructuredLog for SubscriptionClosed<'_> {
    fn log(&self) {
        tracing::info!(step_type = self.step_type, "{}", self);
    }
}
