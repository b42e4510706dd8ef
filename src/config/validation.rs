// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Validation for `SyncConfig`.
//!
//! All checks run and every problem is collected, so a caller sees the full
//! list in one pass:
//!
//! 1. **Kind**: the default params must belong to the configured step kind
//! 2. **Debounce**: the delay must lie within the supported range
//!
//! Default params are not checked for acceptability. An edit usually opens
//! with an incomplete default (no sheets picked, no column selected), and
//! whether a value is acceptable is the step engine's call on push.
//!
//! Out-of-range delays are still usable (`SyncConfig::debounce_delay` clamps),
//! but file-based configs are rejected so the mistake is visible.

use crate::config::consts::{MAX_DEBOUNCE_DELAY_MS, MIN_DEBOUNCE_DELAY_MS};
use crate::config::SyncConfig;
use crate::errors::ValidationError;

/// Check a config, returning every problem found.
pub fn validate_config(config: &SyncConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(default) = &config.default_params {
        if default.kind() != config.step_kind {
            errors.push(ValidationError::DefaultKindMismatch {
                expected: config.step_kind,
                actual: default.kind(),
            });
        }
    }

    let delay_ms = config.debounce_delay_ms();
    if !(MIN_DEBOUNCE_DELAY_MS..=MAX_DEBOUNCE_DELAY_MS).contains(&delay_ms) {
        errors.push(ValidationError::DebounceOutOfRange {
            delay_ms,
            min_ms: MIN_DEBOUNCE_DELAY_MS,
            max_ms: MAX_DEBOUNCE_DELAY_MS,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
