// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::EditErrorDescriptor;
use serde::{Deserialize, Serialize};

/// Longest title the graph renderer accepts.
pub const MAX_TITLE_LEN: usize = 200;

/// Titles and legend settings for a graph.
///
/// Axis titles left as `None` tell the engine to use its generated default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStyleParams {
    pub title: String,
    #[serde(default)]
    pub x_axis_title: Option<String>,
    #[serde(default)]
    pub y_axis_title: Option<String>,
    #[serde(default = "default_show_legend")]
    pub show_legend: bool,
}

fn default_show_legend() -> bool {
    true
}

impl Default for GraphStyleParams {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_axis_title: None,
            y_axis_title: None,
            show_legend: default_show_legend(),
        }
    }
}

impl GraphStyleParams {
    /// Default style with only the title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), EditErrorDescriptor> {
        let too_long = [Some(&self.title), self.x_axis_title.as_ref(), self.y_axis_title.as_ref()]
            .into_iter()
            .flatten()
            .any(|t| t.chars().count() > MAX_TITLE_LEN);
        if too_long {
            return Err(EditErrorDescriptor::new(
                "Title too long",
                format!("Shorten graph and axis titles to at most {} characters.", MAX_TITLE_LEN),
            ));
        }
        Ok(())
    }
}
