// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Failures produced while synchronizing params with the step engine.
//!
//! None of these cross the public boundary of `SyncedParams` as a `Result`:
//! every failure ends up in the status as a `SyncError`, and the caller
//! renders its remediation hint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Remediation hint shown for failures that never reached the step engine.
pub const TRANSPORT_REMEDIATION_HINT: &str =
    "Could not reach the step engine. Check the connection and try the edit again.";

/// Error object returned by the step engine when it declines an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{header}: {to_fix}")]
pub struct EditErrorDescriptor {
    /// Short summary of what went wrong.
    pub header: String,
    /// Human readable instruction for fixing the params.
    pub to_fix: String,
}

impl EditErrorDescriptor {
    pub fn new(header: impl Into<String>, to_fix: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            to_fix: to_fix.into(),
        }
    }
}

/// Failure reply from a step engine call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditFailure {
    /// The engine evaluated the params and declined them.
    #[error("edit rejected: {0}")]
    Rejected(EditErrorDescriptor),

    /// The request never produced an answer from the engine.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Last sync failure, as surfaced in `SyncStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Backend declined the pushed value; the step pointer is unchanged.
    #[error("{to_fix}")]
    EditRejected { header: String, to_fix: String },

    /// The push did not reach the backend or its reply was lost.
    #[error("{}", TRANSPORT_REMEDIATION_HINT)]
    Transport { message: String },
}

impl SyncError {
    /// The string a caller should render next to the edit controls.
    pub fn remediation_hint(&self) -> String {
        self.to_string()
    }
}

impl From<EditFailure> for SyncError {
    fn from(failure: EditFailure) -> Self {
        match failure {
            EditFailure::Rejected(descriptor) => SyncError::EditRejected {
                header: descriptor.header,
                to_fix: descriptor.to_fix,
            },
            EditFailure::Transport(message) => SyncError::Transport { message },
        }
    }
}
