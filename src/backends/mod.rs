// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Step engine implementations.
//!
//! The synchronizer only talks to the `StepEngine` and `UpdateChannel` traits;
//! a production deployment supplies its own engine behind them. This module
//! provides the engines that ship with the crate.
//!
//! # Available Backends
//!
//! ## Memory Backend
//! In-process step history with undo/redo:
//! - **History**: Overwrite-on-head and append semantics, fresh ids per commit
//! - **External Updates**: Undo, redo, clear, replay and foreign edits broadcast updates
//! - **Fault Injection**: Latency, per-call delays, transport faults
//! - **Use Case**: The demo binary, integration tests, prototyping front ends
//!
//! ## Stub Backend (Test-Only)
//! Scripted replies for synchronizer tests (only available in test builds):
//! - **ScriptedStepEngine**: Records every call and answers from queues
//! - **Note**: NOT available in production builds
//!
//! # Examples
//!
//! ```rust
//! use synced_params::backends::memory::InMemoryStepEngine;
//! use synced_params::params::{StepParams, TransposeParams};
//!
//! let engine = InMemoryStepEngine::new();
//! let id = engine.apply_external_edit(StepParams::Transpose(TransposeParams { sheet_index: 0 }), None)?;
//! assert_eq!(engine.head(), Some(id));
//! assert!(engine.undo());
//! assert_eq!(engine.head(), None);
//! # Ok::<(), synced_params::errors::EditFailure>(())
//! ```

pub mod memory;
#[cfg(test)]
pub mod stub;
