// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for deferred imports and lazy symbol resolution.

use crate::errors::ImportError;
use crate::lazy::{DeprecationWarning, VersionInfo};
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Target used for deprecation events, so they can be filtered separately.
pub const DEPRECATION_TARGET: &str = "deprecation";

/// A unit was loaded by the module catalog.
///
/// # Log Level
/// `debug!` - Routine, but useful when chasing startup cost
pub struct ModuleImported<'a> {
    pub location: &'a str,
    pub members: usize,
    pub attempt: usize,
}

impl Display for ModuleImported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Imported module '{}' ({} members, attempt {})",
            self.location, self.members, self.attempt
        )
    }
}

impl StructuredLog for ModuleImported<'_> {
    fn log(&self) {
        tracing::debug!(
            location = self.location,
            members = self.members,
            attempt = self.attempt,
            "{}", self
        );
    }
}

/// A unit's loader failed.
///
/// # Log Level
/// `warn!` - The caller receives the error; this records where it came from
pub struct ModuleImportFailed<'a> {
    pub location: &'a str,
    pub error: &'a ImportError,
}

impl Display for ModuleImportFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Import of '{}' failed: {}", self.location, self.error)
    }
}

impl StructuredLog for ModuleImportFailed<'_> {
    fn log(&self) {
        tracing::warn!(location = self.location, error = %self.error, "{}", self);
    }
}

/// A lazy symbol was resolved and cached.
///
/// # Log Level
/// `debug!`
pub struct SymbolResolved<'a> {
    pub symbol: &'a str,
    pub target: &'a str,
    pub kind: &'a str,
}

impl Display for SymbolResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolved '{}' from '{}' as {}",
            self.symbol, self.target, self.kind
        )
    }
}

impl StructuredLog for SymbolResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            symbol = self.symbol,
            target = self.target,
            kind = self.kind,
            "{}", self
        );
    }
}

/// Nobody knows the requested symbol.
///
/// # Log Level
/// `debug!` - The caller gets an error and decides how loud to be
///
/// # Example
/// ```
/// use airflow_bootstrap::observability::messages::lazy::SymbolNotFound;
///
/// let msg = SymbolNotFound { symbol: "NoSuchThing" };
/// assert_eq!(msg.to_string(), "No lazy symbol or legacy constant named 'NoSuchThing'");
/// ```
pub struct SymbolNotFound<'a> {
    pub symbol: &'a str,
}

impl Display for SymbolNotFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "No lazy symbol or legacy constant named '{}'", self.symbol)
    }
}

impl StructuredLog for SymbolNotFound<'_> {
    fn log(&self) {
        tracing::debug!(symbol = self.symbol, "{}", self);
    }
}

/// A legacy version constant was answered.
///
/// # Log Level
/// `debug!` - The deprecation itself is reported separately
pub struct LegacyConstantRead<'a> {
    pub name: &'a str,
    pub interpreter_version: VersionInfo,
    pub answer: bool,
}

impl Display for LegacyConstantRead<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Legacy constant '{}' is {} for interpreter {}",
            self.name, self.answer, self.interpreter_version
        )
    }
}

impl StructuredLog for LegacyConstantRead<'_> {
    fn log(&self) {
        tracing::debug!(
            name = self.name,
            interpreter_version = %self.interpreter_version,
            answer = self.answer,
            "{}", self
        );
    }
}

/// A deprecated name was used.
///
/// # Log Level
/// `warn!` on the `deprecation` target
pub struct DeprecatedAccess<'a> {
    pub warning: &'a DeprecationWarning,
}

impl Display for DeprecatedAccess<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.warning)
    }
}

impl StructuredLog for DeprecatedAccess<'_> {
    fn log(&self) {
        tracing::warn!(
            target: DEPRECATION_TARGET,
            symbol = self.warning.symbol(),
            "{}", self
        );
    }
}
