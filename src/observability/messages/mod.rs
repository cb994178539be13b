// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `bootstrap` - stage lifecycle and settings initialization
//! * `lazy` - deferred imports, symbol resolution and deprecations
//!
//! # Usage Pattern
//!
//! ```rust
//! use airflow_bootstrap::bootstrap::Stage;
//! use airflow_bootstrap::observability::messages::bootstrap::StageSkipped;
//!
//! let msg = StageSkipped {
//!     stage: Stage::Plugins,
//!     reason: "plugins are loaded lazily",
//! };
//!
//! tracing::debug!("{}", msg);
//! ```

use tracing::Span;

pub mod bootstrap;
pub mod lazy;

/// A message that knows how to emit itself as a `tracing` event.
pub trait StructuredLog {
    /// Emit the event at the message's own level, with its fields attached.
    fn log(&self);

    /// A span carrying the message's fields, for work that happens under it.
    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("message", span_name = name)
    }
}
