// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::BootstrapResult;
use crate::lazy::DeprecationWarning;
use crate::traits::{DeprecationSink, PatchHook, PluginManager, ProviderManager, SettingsStore};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared, ordered record of collaborator calls, e.g. `"providers.initialize_providers_list"`.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| c.as_str() == call)
            .count()
    }
}

/// A patch hook that records the call and patches nothing
pub struct StubPatchHook {
    log: CallLog,
    fail: bool,
}

impl StubPatchHook {
    pub fn new(log: CallLog) -> Self {
        Self { log, fail: false }
    }

    pub fn failing(log: CallLog) -> Self {
        Self { log, fail: true }
    }
}

impl PatchHook for StubPatchHook {
    fn apply(&self) -> BootstrapResult {
        self.log.record("patch_hook.apply");
        if self.fail {
            return Err("Simulated patch hook failure".into());
        }
        Ok(())
    }
}

/// Settings with fixed lazy-load flags
pub struct StubSettings {
    log: CallLog,
    lazy_providers: bool,
    lazy_plugins: bool,
    fail: bool,
}

impl StubSettings {
    pub fn new(log: CallLog, lazy_providers: bool, lazy_plugins: bool) -> Self {
        Self {
            log,
            lazy_providers,
            lazy_plugins,
            fail: false,
        }
    }

    pub fn failing(log: CallLog) -> Self {
        Self {
            log,
            lazy_providers: false,
            lazy_plugins: false,
            fail: true,
        }
    }
}

impl SettingsStore for StubSettings {
    fn initialize(&self) -> BootstrapResult {
        self.log.record("settings.initialize");
        if self.fail {
            return Err("Simulated settings failure".into());
        }
        Ok(())
    }

    fn lazy_load_providers(&self) -> bool {
        self.lazy_providers
    }

    fn lazy_load_plugins(&self) -> bool {
        self.lazy_plugins
    }
}

/// A provider manager that records each entry point and discovers no providers.
///
/// `failing_on` makes one named entry point return an error after recording it.
pub struct StubProviderManager {
    log: CallLog,
    fail_on: Option<&'static str>,
}

impl StubProviderManager {
    pub fn new(log: CallLog) -> Self {
        Self { log, fail_on: None }
    }

    pub fn failing_on(log: CallLog, entry_point: &'static str) -> Self {
        Self {
            log,
            fail_on: Some(entry_point),
        }
    }

    fn call(&self, entry_point: &'static str) -> BootstrapResult {
        self.log.record(format!("providers.{}", entry_point));
        if self.fail_on == Some(entry_point) {
            return Err(format!("Simulated failure in {}", entry_point).into());
        }
        tracing::debug!(entry_point, "stub provider manager called");
        Ok(())
    }
}

impl ProviderManager for StubProviderManager {
    fn initialize_providers_list(&self) -> BootstrapResult {
        self.call("initialize_providers_list")
    }

    fn initialize_providers_hooks(&self) -> BootstrapResult {
        self.call("initialize_providers_hooks")
    }

    fn initialize_providers_extra_links(&self) -> BootstrapResult {
        self.call("initialize_providers_extra_links")
    }
}

/// A plugin manager with no plugins to load
pub struct StubPluginManager {
    log: CallLog,
}

impl StubPluginManager {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl PluginManager for StubPluginManager {
    fn ensure_plugins_loaded(&self) -> BootstrapResult {
        self.log.record("plugins.ensure_plugins_loaded");
        Ok(())
    }
}

/// Keeps every deprecation warning it receives.
#[derive(Debug, Default)]
pub struct RecordingDeprecationSink {
    warnings: Mutex<Vec<DeprecationWarning>>,
}

impl RecordingDeprecationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<DeprecationWarning> {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count_for(&self, symbol: &str) -> usize {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|w| w.symbol() == symbol)
            .count()
    }
}

impl DeprecationSink for RecordingDeprecationSink {
    fn warn(&self, warning: &DeprecationWarning) {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(warning.clone());
    }
}
