// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_DEBOUNCE_DELAY_MS, MAX_DEBOUNCE_DELAY_MS, MIN_DEBOUNCE_DELAY_MS};
use crate::errors::ConfigError;
use crate::params::{StepKind, StepParams};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration for one synchronized params instance.
///
/// This is the surface a caller fills in when it opens an edit: which kind of
/// step it edits, what the params look like before any step exists, and how
/// long edits are coalesced before being pushed.
///
/// # Fields
/// * `step_kind` - The edit kind; determines the step type and edit event type
/// * `default_params` - Value used before the first edit and whenever a refresh finds no step (optional)
/// * `debounce_delay_ms` - Quiet period before a push (optional, defaults to 500)
/// * `stale_response_policy` - How late backend replies are treated (optional, defaults to `apply_latest`)
///
/// # Example
/// ```yaml
/// step_kind: graph_style
/// debounce_delay_ms: 250
/// stale_response_policy: discard_stale
/// default_params:
///   step_type: graph_style
///   params:
///     title: ""
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    pub step_kind: StepKind,
    #[serde(default)]
    pub default_params: Option<StepParams>,
    #[serde(default)]
    pub debounce_delay_ms: Option<u64>,
    #[serde(default)]
    pub stale_response_policy: StaleResponsePolicy,
}

/// What to do with a backend reply that resolves after a newer one was applied.
///
/// # Variants
/// * `ApplyLatest` - Apply every reply as it arrives; whichever resolves last wins
/// * `DiscardStale` - Drop replies stamped with an older generation than the last applied one
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    #[default]
    ApplyLatest,
    DiscardStale,
}

impl SyncConfig {
    /// Config for `kind` with no default and the default debounce delay.
    pub fn new(kind: StepKind) -> Self {
        Self {
            step_kind: kind,
            default_params: None,
            debounce_delay_ms: None,
            stale_response_policy: StaleResponsePolicy::default(),
        }
    }

    pub fn with_default(mut self, params: impl Into<StepParams>) -> Self {
        self.default_params = Some(params.into());
        self
    }

    pub fn with_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.debounce_delay_ms = Some(delay_ms);
        self
    }

    pub fn with_stale_response_policy(mut self, policy: StaleResponsePolicy) -> Self {
        self.stale_response_policy = policy;
        self
    }

    /// Configured delay in milliseconds, before clamping.
    pub fn debounce_delay_ms(&self) -> u64 {
        self.debounce_delay_ms.unwrap_or(DEFAULT_DEBOUNCE_DELAY_MS)
    }

    /// Quiet period clamped to the supported range.
    ///
    /// # Example
    /// ```
    /// use synced_params::config::SyncConfig;
    /// use synced_params::params::StepKind;
    /// use std::time::Duration;
    ///
    /// let config = SyncConfig::new(StepKind::Concat).with_debounce_ms(60_000);
    /// assert_eq!(config.debounce_delay(), Duration::from_secs(10)); // Clamped to maximum
    /// ```
    pub fn debounce_delay(&self) -> Duration {
        let ms = self
            .debounce_delay_ms()
            .clamp(MIN_DEBOUNCE_DELAY_MS, MAX_DEBOUNCE_DELAY_MS);
        Duration::from_millis(ms)
    }
}

/// Load a config from a YAML or TOML file, chosen by extension
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SyncConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let cfg: SyncConfig = match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&fs::read_to_string(path)?)?,
        "toml" => toml::from_str(&fs::read_to_string(path)?)?,
        other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    };
    Ok(cfg)
}

/// Load a config and check it with `validate_config`
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<SyncConfig, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
