// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging done by the synchronizer. Message types follow a struct-based pattern
//! with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep log wording in one place
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by concern:
//! * `messages::sync` - Edit pushes and their outcomes
//! * `messages::refresh` - External updates, refreshes and subscription lifecycle
//!
//! # Usage
//!
//! ```rust
//! use synced_params::observability::messages::sync::EditPushFailed;
//! use synced_params::observability::messages::StructuredLog;
//!
//! let msg = EditPushFailed {
//!     edit_event_type: "graph_style_edit",
//!     generation: 3,
//!     remediation_hint: "bad title",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
