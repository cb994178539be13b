// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // stub subsystems
pub mod bootstrap;     // run-once startup sequence
pub mod config;        // settings + constants
pub mod datasets;      // dataset identities
pub mod errors;        // error handling
pub mod lazy;          // lazy top-level symbols
pub mod observability;
pub mod traits;        // collaborator contracts

/// Package version, also served as the `__version__` symbol.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
