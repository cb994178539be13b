// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic the crate emits is a small struct in [`messages`] that
//! implements `Display` (the human-readable line) and
//! [`messages::StructuredLog`] (the `tracing` event with typed fields). Call
//! sites build the struct and call `.log()`; no log text lives at the call site.
//!
//! # Usage
//!
//! ```rust
//! use airflow_bootstrap::observability::messages::lazy::SymbolNotFound;
//! use airflow_bootstrap::observability::messages::StructuredLog;
//!
//! SymbolNotFound { symbol: "NoSuchThing" }.log();
//! ```
//!
//! Subscriber installation happens once, in the binary, through
//! [`init_tracing`].

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
