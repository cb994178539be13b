// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for lazy symbol resolution and deferred module loading.

use thiserror::Error;

/// Failure to load a code unit through the module catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// No loader is registered for the requested location.
    #[error("No module named '{location}'")]
    NotFound { location: String },

    /// The loader ran but could not produce the unit.
    #[error("Failed to import '{location}': {reason}")]
    Failed { location: String, reason: String },
}

/// Failure to resolve a top-level symbol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The name is neither a registered lazy symbol nor a legacy constant.
    #[error("module '{module}' has no attribute '{name}'")]
    AttributeNotFound { module: String, name: String },

    /// The target unit loaded but does not carry the expected member.
    #[error("module '{location}' has no attribute '{member}'")]
    MissingMember { location: String, member: String },

    /// The deferred import failed; the loader's error is passed through as-is.
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Errors raised while assembling a lazy registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Lazy symbol '{symbol}' is registered more than once")]
    DuplicateSymbol { symbol: String },
}
