// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for bootstrap stage lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Bootstrap start and completion
//! * Individual stages running, being skipped, or failing
//! * Settings initialization

use crate::bootstrap::{BootstrapFlags, Stage};
use crate::lazy::VersionInfo;
use crate::observability::messages::StructuredLog;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

fn join_stages(stages: &[Stage]) -> String {
    stages
        .iter()
        .map(Stage::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bootstrap is starting with the given switches.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BootstrapStarted {
    pub flags: BootstrapFlags,
}

impl Display for BootstrapStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting bootstrap: patch_hook={}, as_library={}",
            self.flags.patch_hook, self.flags.as_library
        )
    }
}

impl StructuredLog for BootstrapStarted {
    fn log(&self) {
        tracing::info!(
            patch_hook = self.flags.patch_hook,
            as_library = self.flags.as_library,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "bootstrap",
            span_name = name,
            patch_hook = self.flags.patch_hook,
            as_library = self.flags.as_library,
        )
    }
}

/// A stage finished successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use airflow_bootstrap::bootstrap::Stage;
/// use airflow_bootstrap::observability::messages::bootstrap::StageCompleted;
/// use std::time::Duration;
///
/// let msg = StageCompleted {
///     stage: Stage::Settings,
///     elapsed: Duration::from_millis(12),
/// };
///
/// assert_eq!(msg.to_string(), "Bootstrap stage 'settings' completed in 12ms");
/// ```
pub struct StageCompleted {
    pub stage: Stage,
    pub elapsed: Duration,
}

impl Display for StageCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Bootstrap stage '{}' completed in {:?}",
            self.stage, self.elapsed
        )
    }
}

impl StructuredLog for StageCompleted {
    fn log(&self) {
        tracing::info!(
            stage = self.stage.as_str(),
            elapsed_ms = self.elapsed.as_millis() as u64,
            "{}", self
        );
    }
}

/// A stage's gate was closed.
///
/// # Log Level
/// `debug!` - Expected, routine outcome
pub struct StageSkipped<'a> {
    pub stage: Stage,
    pub reason: &'a str,
}

impl Display for StageSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Bootstrap stage '{}' skipped: {}", self.stage, self.reason)
    }
}

impl StructuredLog for StageSkipped<'_> {
    fn log(&self) {
        tracing::debug!(stage = self.stage.as_str(), reason = self.reason, "{}", self);
    }
}

/// A stage failed; startup is about to abort.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct StageFailed<'a> {
    pub stage: Stage,
    pub error: &'a (dyn Error + Send + Sync),
}

impl Display for StageFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Bootstrap stage '{}' failed: {}", self.stage, self.error)
    }
}

impl StructuredLog for StageFailed<'_> {
    fn log(&self) {
        tracing::error!(
            stage = self.stage.as_str(),
            error = %self.error,
            "{}", self
        );
    }
}

/// Every stage either ran or was skipped.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BootstrapCompleted<'a> {
    pub completed: &'a [Stage],
    pub skipped: &'a [Stage],
    pub elapsed: Duration,
}

impl Display for BootstrapCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Bootstrap completed in {:?}: ran [{}], skipped [{}]",
            self.elapsed,
            join_stages(self.completed),
            join_stages(self.skipped)
        )
    }
}

impl StructuredLog for BootstrapCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            completed = join_stages(self.completed),
            skipped = join_stages(self.skipped),
            elapsed_ms = self.elapsed.as_millis() as u64,
            "{}", self
        );
    }
}

/// A later call to the process-wide initializer found bootstrap already done.
///
/// # Log Level
/// `debug!` - Expected, routine outcome
pub struct BootstrapAlreadyComplete<'a> {
    pub completed: &'a [Stage],
}

impl Display for BootstrapAlreadyComplete<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Bootstrap already completed (ran [{}]); not running again",
            join_stages(self.completed)
        )
    }
}

impl StructuredLog for BootstrapAlreadyComplete<'_> {
    fn log(&self) {
        tracing::debug!(completed = join_stages(self.completed), "{}", self);
    }
}

/// Settings were validated for the first time.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SettingsInitialized {
    pub lazy_load_providers: bool,
    pub lazy_load_plugins: bool,
    pub interpreter_version: VersionInfo,
}

impl Display for SettingsInitialized {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Settings initialized: lazy_load_providers={}, lazy_load_plugins={}, interpreter_version={}",
            self.lazy_load_providers, self.lazy_load_plugins, self.interpreter_version
        )
    }
}

impl StructuredLog for SettingsInitialized {
    fn log(&self) {
        tracing::info!(
            lazy_load_providers = self.lazy_load_providers,
            lazy_load_plugins = self.lazy_load_plugins,
            interpreter_version = %self.interpreter_version,
            "{}", self
        );
    }
}
