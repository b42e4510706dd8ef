// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The single params slot owned by one edit session.
//!
//! The store knows nothing about timers or the step engine. It holds the
//! current value, remembers the configured default, and counts generations:
//! every local mutation and every refresh claims the next generation number,
//! which the synchronizer uses to stamp the operations it issues.

use crate::errors::ParamsError;
use crate::params::{StepKind, StepParams};

/// Point-in-time copy of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamsSnapshot {
    pub params: Option<StepParams>,
    pub initialized: bool,
    pub generation: u64,
}

#[derive(Debug)]
pub struct ParameterStore {
    kind: StepKind,
    default: Option<StepParams>,
    value: Option<StepParams>,
    generation: u64,
}

impl ParameterStore {
    /// Create a store holding `default`, which may be absent.
    pub fn new(kind: StepKind, default: Option<StepParams>) -> Self {
        Self {
            kind,
            value: default.clone(),
            default,
            generation: 0,
        }
    }

    /// Replace the value wholesale and claim a new generation.
    pub fn set(&mut self, params: StepParams) -> Result<u64, ParamsError> {
        if params.kind() != self.kind {
            return Err(ParamsError::KindMismatch {
                expected: self.kind,
                actual: params.kind(),
            });
        }
        self.value = Some(params);
        self.generation += 1;
        Ok(self.generation)
    }

    /// Claim a generation for a refresh without touching the value yet.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Overwrite the value with what a refresh settled on.
    ///
    /// `None` falls back to the configured default.
    pub fn adopt(&mut self, params: Option<StepParams>) {
        self.value = match params {
            Some(p) if p.kind() == self.kind => Some(p),
            _ => self.default.clone(),
        };
    }

    pub fn get(&self) -> Option<&StepParams> {
        self.value.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn default_params(&self) -> Option<&StepParams> {
        self.default.as_ref()
    }

    pub fn snapshot(&self) -> ParamsSnapshot {
        ParamsSnapshot {
            params: self.value.clone(),
            initialized: self.is_initialized(),
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{GraphStyleParams, TransposeParams};

    fn graph_store() -> ParameterStore {
        ParameterStore::new(
            StepKind::GraphStyle,
            Some(GraphStyleParams::default().into()),
        )
    }

    #[test]
    fn default_value_initializes_store() {
        let store = graph_store();
        let snapshot = store.snapshot();
        assert!(snapshot.initialized);
        assert_eq!(snapshot.generation, 0);
        assert_eq!(snapshot.params, Some(GraphStyleParams::default().into()));
    }

    #[test]
    fn store_without_default_is_uninitialized() {
        let store = ParameterStore::new(StepKind::Transpose, None);
        assert!(!store.is_initialized());
        assert!(store.get().is_none());
    }

    #[test]
    fn set_replaces_value_and_bumps_generation() {
        let mut store = ParameterStore::new(StepKind::GraphStyle, None);
        assert_eq!(store.set(GraphStyleParams::titled("A").into()).unwrap(), 1);
        assert_eq!(store.set(GraphStyleParams::titled("AB").into()).unwrap(), 2);
        assert_eq!(store.get(), Some(&GraphStyleParams::titled("AB").into()));
    }

    #[test]
    fn set_with_wrong_kind_changes_nothing() {
        let mut store = graph_store();
        let err = store
            .set(TransposeParams { sheet_index: 1 }.into())
            .unwrap_err();
        assert!(matches!(
            err,
            ParamsError::KindMismatch {
                expected: StepKind::GraphStyle,
                actual: StepKind::Transpose
            }
        ));
        assert_eq!(store.generation(), 0);
        assert_eq!(store.get(), store.default_params());
    }

    #[test]
    fn adopt_none_falls_back_to_default() {
        let mut store = graph_store();
        store.set(GraphStyleParams::titled("local").into()).unwrap();
        store.adopt(None);
        assert_eq!(store.get(), Some(&GraphStyleParams::default().into()));
    }

    #[test]
    fn adopt_ignores_foreign_kind() {
        let mut store = graph_store();
        store.adopt(Some(TransposeParams { sheet_index: 0 }.into()));
        assert_eq!(store.get(), store.default_params());
    }
}
