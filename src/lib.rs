// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // step engine implementations
pub mod config;     // sync config + loading
pub mod engine;     // store, debounce, synchronizer
pub mod errors;     // error handling
pub mod observability;
pub mod params;     // typed params per edit kind
pub mod traits;     // step engine + update channel seams
