// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::params::StepKind;
use thiserror::Error;

/// Errors from handling a params value itself, independent of syncing.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// A value of one edit kind was handed to a store configured for another.
    #[error("params of kind '{actual}' cannot be stored in a '{expected}' store")]
    KindMismatch { expected: StepKind, actual: StepKind },

    /// The wire form could not be encoded or decoded.
    #[error("params wire format error: {0}")]
    Wire(#[from] serde_json::Error),
}
