// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::EditErrorDescriptor;
use serde::{Deserialize, Serialize};

/// How columns that exist in only some of the dataframes are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinType {
    #[default]
    Inner,
    Outer,
}

/// Concatenate two or more dataframes into a new one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConcatParams {
    pub join: JoinType,
    pub ignore_index: bool,
    pub sheet_indexes: Vec<usize>,
}

impl ConcatParams {
    pub fn validate(&self) -> Result<(), EditErrorDescriptor> {
        if self.sheet_indexes.is_empty() {
            return Err(EditErrorDescriptor::new(
                "No dataframes selected",
                "Select at least one dataframe to concatenate.",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_is_rejected() {
        let err = ConcatParams::default().validate().unwrap_err();
        assert!(err.to_fix.contains("at least one dataframe"));
    }

    #[test]
    fn outer_join_with_sheets_is_valid() {
        let params = ConcatParams {
            join: JoinType::Outer,
            ignore_index: true,
            sheet_indexes: vec![0, 1],
        };
        assert!(params.validate().is_ok());
    }
}
