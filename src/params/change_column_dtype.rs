// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::EditErrorDescriptor;
use serde::{Deserialize, Serialize};

/// Target dtype for a column conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDtype {
    Bool,
    Int,
    Float,
    #[default]
    Str,
    Datetime,
    Timedelta,
}

/// Convert one or more columns of a sheet to a new dtype.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeColumnDtypeParams {
    pub sheet_index: usize,
    pub column_ids: Vec<String>,
    pub new_dtype: ColumnDtype,
}

impl ChangeColumnDtypeParams {
    pub fn validate(&self) -> Result<(), EditErrorDescriptor> {
        if self.column_ids.is_empty() {
            return Err(EditErrorDescriptor::new(
                "No columns selected",
                "Select at least one column to change the dtype of.",
            ));
        }
        Ok(())
    }
}
