// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::EditErrorDescriptor;
use serde::{Deserialize, Serialize};

/// Transpose a sheet into a new dataframe.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransposeParams {
    pub sheet_index: usize,
}

impl TransposeParams {
    pub fn validate(&self) -> Result<(), EditErrorDescriptor> {
        Ok(())
    }
}
