// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod params;
mod sync;

pub use config::{ConfigError, ValidationError};
pub use params::ParamsError;
pub use sync::{EditErrorDescriptor, EditFailure, SyncError, TRANSPORT_REMEDIATION_HINT};
