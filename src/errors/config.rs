// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::params::StepKind;
use std::fmt;
use thiserror::Error;

/// Problems found while validating a `SyncConfig`
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The default params belong to a different edit kind than the config
    DefaultKindMismatch {
        /// Kind the config synchronizes
        expected: StepKind,
        /// Kind of the supplied default
        actual: StepKind,
    },
    /// The debounce delay is outside the supported range
    DebounceOutOfRange {
        /// The configured delay
        delay_ms: u64,
        /// Inclusive lower bound
        min_ms: u64,
        /// Inclusive upper bound
        max_ms: u64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DefaultKindMismatch { expected, actual } => {
                write!(
                    f,
                    "Default params are '{}' but the config synchronizes '{}'",
                    actual, expected
                )
            }
            ValidationError::DebounceOutOfRange {
                delay_ms,
                min_ms,
                max_ms,
            } => {
                write!(
                    f,
                    "Debounce delay {}ms is outside the supported range [{}ms, {}ms]",
                    delay_ms, min_ms, max_ms
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors from loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format '{0}', expected .yaml, .yml or .toml")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
