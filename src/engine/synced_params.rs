// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The caller-facing handle for one synchronized params instance.
//!
//! `SyncedParams` bundles the store, the debounce timer, the synchronizer and
//! the status aggregator behind a small API:
//!
//! 1. `set` / `update` replace the value and restart the quiet period
//! 2. When the quiet period elapses the latest value is pushed with the last
//!    known step id
//! 3. External updates from the step engine (undo, redo, unrelated edits,
//!    replay) pull the authoritative params for the current step
//! 4. `status` / `watch_status` expose the current error and in-flight flag
//!
//! Construction subscribes to the update channel; dropping the handle (or
//! calling `dispose`) cancels the pending timer and the subscription. Replies
//! to calls already in flight are still applied when they arrive.
//!
//! # Example
//! ```rust
//! use std::sync::Arc;
//! use synced_params::backends::memory::InMemoryStepEngine;
//! use synced_params::config::SyncConfig;
//! use synced_params::engine::SyncedParams;
//! use synced_params::params::{GraphStyleParams, StepKind};
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Arc::new(InMemoryStepEngine::new());
//! let config = SyncConfig::new(StepKind::GraphStyle)
//!     .with_default(GraphStyleParams::default())
//!     .with_debounce_ms(500);
//!
//! let params = SyncedParams::new(config, engine.clone(), engine.as_ref())?;
//! params.set(GraphStyleParams::titled("A"))?;
//! params.set(GraphStyleParams::titled("AB"))?;
//!
//! tokio::time::sleep(std::time::Duration::from_millis(600)).await;
//! assert_eq!(engine.edit_count(), 1);
//! assert_eq!(params.step_id().map(|id| id.to_string()), Some("1".to_string()));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::{validate_config, SyncConfig};
use crate::engine::status::SyncStatus;
use crate::engine::store::ParamsSnapshot;
use crate::engine::synchronizer::Synchronizer;
use crate::errors::{ConfigError, ParamsError};
use crate::observability::messages::refresh::{ExternalUpdateReceived, SubscriptionClosed};
use crate::observability::messages::StructuredLog;
use crate::params::StepParams;
use crate::traits::{StepEngine, StepId, UpdateChannel, UpdateSubscription};

pub struct SyncedParams {
    sync: Arc<Synchronizer>,
    shutdown: CancellationToken,
}

impl SyncedParams {
    /// Validate `config`, subscribe to `updates` and start listening.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        config: SyncConfig,
        engine: Arc<dyn StepEngine>,
        updates: &dyn UpdateChannel,
    ) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Invalid)?;

        let shutdown = CancellationToken::new();
        let sync = Arc::new(Synchronizer::new(&config, engine, shutdown.child_token()));
        tokio::spawn(listen_for_updates(
            Arc::clone(&sync),
            updates.subscribe(),
            shutdown.clone(),
        ));

        Ok(Self { sync, shutdown })
    }

    /// Replace the params and restart the debounce timer.
    ///
    /// Returns the new generation. Fails only if `params` is of another kind.
    pub fn set(&self, params: impl Into<StepParams>) -> Result<u64, ParamsError> {
        let params = params.into();
        self.sync.set_with(move |_| params)
    }

    /// Replace the params with a value computed from the current ones.
    ///
    /// `f` receives a copy of the current value and may read from this handle.
    pub fn update<F>(&self, f: F) -> Result<u64, ParamsError>
    where
        F: FnOnce(Option<&StepParams>) -> StepParams,
    {
        self.sync.set_with(f)
    }

    pub fn params(&self) -> Option<StepParams> {
        self.sync.snapshot().params
    }

    pub fn snapshot(&self) -> ParamsSnapshot {
        self.sync.snapshot()
    }

    pub fn status(&self) -> SyncStatus {
        self.sync.status()
    }

    /// Receiver that observes every status change.
    pub fn watch_status(&self) -> watch::Receiver<SyncStatus> {
        self.sync.watch_status()
    }

    /// Remediation hint for the last failed push; `None` when synced cleanly.
    pub fn error(&self) -> Option<String> {
        self.sync.status().error
    }

    pub fn loading(&self) -> bool {
        self.sync.status().loading
    }

    pub fn step_id(&self) -> Option<StepId> {
        self.sync.status().step_id
    }

    /// Pull the authoritative params now, as an external update would.
    pub async fn refresh(&self) {
        self.sync.refresh().await;
    }

    /// Release the timer and the update subscription.
    pub fn dispose(self) {}
}

impl Drop for SyncedParams {
    fn drop(&mut self) {
        self.shutdown.cancel();
        self.sync.shutdown();
    }
}

async fn listen_for_updates(
    sync: Arc<Synchronizer>,
    mut updates: UpdateSubscription,
    shutdown: CancellationToken,
) {
    let step_type = sync.kind().step_type();
    loop {
        let cause = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            received = updates.recv() => match received {
                Ok(update) => update.cause.to_string(),
                // Missed notifications collapse into one refresh.
                Err(RecvError::Lagged(missed)) => format!("{} coalesced updates", missed),
                Err(RecvError::Closed) => {
                    SubscriptionClosed { step_type }.log();
                    break;
                }
            },
        };
        ExternalUpdateReceived {
            step_type,
            cause: &cause,
        }
        .log();
        sync.refresh().await;
    }
}
