// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed parameter sets, one per edit kind.
//!
//! Every edit the step engine understands has a concrete params struct with a
//! statically known schema. `StepParams` is the tagged union over all of
//! them and is what the synchronizer stores, pushes and adopts. Values are
//! always replaced wholesale; there is no partial-patch form.
//!
//! # Example
//! ```
//! use synced_params::params::{StepKind, StepParams, TransposeParams};
//!
//! let params = StepParams::Transpose(TransposeParams { sheet_index: 2 });
//! assert_eq!(params.kind(), StepKind::Transpose);
//! assert_eq!(params.kind().edit_event_type(), "transpose_edit");
//! ```

mod change_column_dtype;
mod concat;
mod graph_style;
mod split_text_to_columns;
mod transpose;

pub use change_column_dtype::{ChangeColumnDtypeParams, ColumnDtype};
pub use concat::{ConcatParams, JoinType};
pub use graph_style::GraphStyleParams;
pub use split_text_to_columns::SplitTextToColumnsParams;
pub use transpose::TransposeParams;

use crate::errors::{EditErrorDescriptor, ParamsError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of parameterized operation being synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Concat,
    SplitTextToColumns,
    ChangeColumnDtype,
    Transpose,
    GraphStyle,
}

impl StepKind {
    /// Step type used when querying the engine for a step's params.
    pub fn step_type(self) -> &'static str {
        match self {
            StepKind::Concat => "concat",
            StepKind::SplitTextToColumns => "split_text_to_columns",
            StepKind::ChangeColumnDtype => "change_column_dtype",
            StepKind::Transpose => "transpose",
            StepKind::GraphStyle => "graph_style",
        }
    }

    /// Edit event type sent with every push for this kind.
    pub fn edit_event_type(self) -> &'static str {
        match self {
            StepKind::Concat => "concat_edit",
            StepKind::SplitTextToColumns => "split_text_to_columns_edit",
            StepKind::ChangeColumnDtype => "change_column_dtype_edit",
            StepKind::Transpose => "transpose_edit",
            StepKind::GraphStyle => "graph_style_edit",
        }
    }

    /// Reverse lookup from a step type string.
    pub fn from_step_type(step_type: &str) -> Option<StepKind> {
        [
            StepKind::Concat,
            StepKind::SplitTextToColumns,
            StepKind::ChangeColumnDtype,
            StepKind::Transpose,
            StepKind::GraphStyle,
        ]
        .into_iter()
        .find(|kind| kind.step_type() == step_type)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.step_type())
    }
}

/// One edit's full configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step_type", content = "params", rename_all = "snake_case")]
pub enum StepParams {
    Concat(ConcatParams),
    SplitTextToColumns(SplitTextToColumnsParams),
    ChangeColumnDtype(ChangeColumnDtypeParams),
    Transpose(TransposeParams),
    GraphStyle(GraphStyleParams),
}

impl StepParams {
    pub fn kind(&self) -> StepKind {
        match self {
            StepParams::Concat(_) => StepKind::Concat,
            StepParams::SplitTextToColumns(_) => StepKind::SplitTextToColumns,
            StepParams::ChangeColumnDtype(_) => StepKind::ChangeColumnDtype,
            StepParams::Transpose(_) => StepKind::Transpose,
            StepParams::GraphStyle(_) => StepKind::GraphStyle,
        }
    }

    /// Check the params the way the step engine would before committing them.
    pub fn validate(&self) -> Result<(), EditErrorDescriptor> {
        match self {
            StepParams::Concat(p) => p.validate(),
            StepParams::SplitTextToColumns(p) => p.validate(),
            StepParams::ChangeColumnDtype(p) => p.validate(),
            StepParams::Transpose(p) => p.validate(),
            StepParams::GraphStyle(p) => p.validate(),
        }
    }

    /// Untagged JSON form of the inner params, as the step engine stores them.
    pub fn to_wire(&self) -> Result<serde_json::Value, ParamsError> {
        let value = match self {
            StepParams::Concat(p) => serde_json::to_value(p),
            StepParams::SplitTextToColumns(p) => serde_json::to_value(p),
            StepParams::ChangeColumnDtype(p) => serde_json::to_value(p),
            StepParams::Transpose(p) => serde_json::to_value(p),
            StepParams::GraphStyle(p) => serde_json::to_value(p),
        }?;
        Ok(value)
    }

    /// Decode the wire form for a known kind.
    pub fn from_wire(kind: StepKind, value: serde_json::Value) -> Result<StepParams, ParamsError> {
        let params = match kind {
            StepKind::Concat => StepParams::Concat(serde_json::from_value(value)?),
            StepKind::SplitTextToColumns => {
                StepParams::SplitTextToColumns(serde_json::from_value(value)?)
            }
            StepKind::ChangeColumnDtype => {
                StepParams::ChangeColumnDtype(serde_json::from_value(value)?)
            }
            StepKind::Transpose => StepParams::Transpose(serde_json::from_value(value)?),
            StepKind::GraphStyle => StepParams::GraphStyle(serde_json::from_value(value)?),
        };
        Ok(params)
    }
}

impl From<ConcatParams> for StepParams {
    fn from(p: ConcatParams) -> Self {
        StepParams::Concat(p)
    }
}

impl From<SplitTextToColumnsParams> for StepParams {
    fn from(p: SplitTextToColumnsParams) -> Self {
        StepParams::SplitTextToColumns(p)
    }
}

impl From<ChangeColumnDtypeParams> for StepParams {
    fn from(p: ChangeColumnDtypeParams) -> Self {
        StepParams::ChangeColumnDtype(p)
    }
}

impl From<TransposeParams> for StepParams {
    fn from(p: TransposeParams) -> Self {
        StepParams::Transpose(p)
    }
}

impl From<GraphStyleParams> for StepParams {
    fn from(p: GraphStyleParams) -> Self {
        StepParams::GraphStyle(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_type_lookup_covers_every_kind() {
        for kind in [
            StepKind::Concat,
            StepKind::SplitTextToColumns,
            StepKind::ChangeColumnDtype,
            StepKind::Transpose,
            StepKind::GraphStyle,
        ] {
            assert_eq!(StepKind::from_step_type(kind.step_type()), Some(kind));
            assert!(kind.edit_event_type().starts_with(kind.step_type()));
        }
        assert_eq!(StepKind::from_step_type("pivot"), None);
    }

    #[test]
    fn wire_form_is_untagged_inner_struct() {
        let params = StepParams::GraphStyle(GraphStyleParams::titled("Sales"));
        let wire = params.to_wire().unwrap();
        assert_eq!(wire["title"], "Sales");
        assert!(wire.get("step_type").is_none());

        let decoded = StepParams::from_wire(StepKind::GraphStyle, wire).unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn wire_form_rejects_wrong_kind() {
        let wire = StepParams::Transpose(TransposeParams { sheet_index: 0 })
            .to_wire()
            .unwrap();
        let result = StepParams::from_wire(StepKind::Concat, wire);
        assert!(matches!(result, Err(ParamsError::Wire(_))));
    }

    #[test]
    fn tagged_serde_form_names_the_step_type() {
        let params = StepParams::Concat(ConcatParams::default());
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["step_type"], "concat");
        assert_eq!(json["params"]["join"], "inner");
    }
}
