// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! `StructuredLog` to emit it at its level with the fields attached.
//!
//! # Organization
//!
//! * `sync` - Edit push lifecycle (start, success, failure, skipped, stale)
//! * `refresh` - External update handling and subscription lifecycle
//!
//! # Usage Pattern
//!
//! ```rust
//! use synced_params::observability::messages::refresh::RefreshStarted;
//! use synced_params::observability::messages::StructuredLog;
//!
//! let msg = RefreshStarted {
//!     step_type: "concat",
//!     step_id: Some("4"),
//! };
//!
//! let span = msg.span("refresh");
//! let _guard = span.enter();
//! msg.log();
//! ```

pub mod refresh;
pub mod sync;

use tracing::Span;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Build a span carrying the message's fields.
    ///
    /// Only messages that open an operation override this; the rest log
    /// inside whatever span is current.
    fn span(&self, _name: &str) -> Span {
        Span::none()
    }
}
