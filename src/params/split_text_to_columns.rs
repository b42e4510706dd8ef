// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::EditErrorDescriptor;
use serde::{Deserialize, Serialize};

/// Split one text column into several on a set of delimiters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SplitTextToColumnsParams {
    pub sheet_index: usize,
    pub column_id: String,
    pub delimiters: Vec<String>,
}

impl SplitTextToColumnsParams {
    pub fn validate(&self) -> Result<(), EditErrorDescriptor> {
        if self.column_id.is_empty() {
            return Err(EditErrorDescriptor::new(
                "No column selected",
                "Select a column to split.",
            ));
        }
        if self.delimiters.iter().all(|d| d.is_empty()) {
            return Err(EditErrorDescriptor::new(
                "No delimiter",
                "Add at least one non-empty delimiter to split on.",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_delimiters_are_rejected() {
        let params = SplitTextToColumnsParams {
            sheet_index: 0,
            column_id: "name".to_string(),
            delimiters: vec![String::new()],
        };
        assert_eq!(params.validate().unwrap_err().header, "No delimiter");
    }

    #[test]
    fn missing_column_is_reported_first() {
        let params = SplitTextToColumnsParams::default();
        assert_eq!(params.validate().unwrap_err().header, "No column selected");
    }
}
