// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_INTERPRETER_VERSION, ENV_INTERPRETER_VERSION, ENV_LAZY_DISCOVER_PROVIDERS,
    ENV_LAZY_LOAD_PLUGINS,
};
use crate::errors::{BootstrapResult, ConfigError};
use crate::lazy::VersionInfo;
use crate::observability::messages::bootstrap::SettingsInitialized;
use crate::observability::messages::StructuredLog;
use crate::traits::SettingsStore;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process settings consulted during bootstrap.
///
/// Settings are read from a YAML or TOML document and then overlaid with
/// environment overrides. Every field has a default, so an empty document
/// is a valid configuration.
///
/// # Example
/// ```yaml
/// core:
///   lazy_load_plugins: false
///   lazy_discover_providers: true
/// runtime:
///   interpreter_version: "3.11"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub core: CoreSettings,
    #[serde(default)]
    pub runtime: RuntimeSettings,
    #[serde(skip)]
    initialized: AtomicBool,
}

/// The `[core]` section.
///
/// # Fields
/// * `lazy_load_plugins` - Defer plugin discovery until first use (defaults to true)
/// * `lazy_discover_providers` - Defer provider discovery until first use (defaults to true)
#[derive(Debug, Deserialize, PartialEq)]
pub struct CoreSettings {
    #[serde(default = "default_true")]
    pub lazy_load_plugins: bool,
    #[serde(default = "default_true")]
    pub lazy_discover_providers: bool,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            lazy_load_plugins: true,
            lazy_discover_providers: true,
        }
    }
}

/// The `[runtime]` section.
///
/// `interpreter_version` is the `major.minor` version of the runtime that executes
/// workflow code; legacy version constants are answered against it.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct RuntimeSettings {
    pub interpreter_version: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Overlay overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Overlay overrides from an arbitrary lookup, e.g. a map in tests.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_LAZY_LOAD_PLUGINS) {
            self.core.lazy_load_plugins = parse_bool(ENV_LAZY_LOAD_PLUGINS, &value)?;
        }
        if let Some(value) = lookup(ENV_LAZY_DISCOVER_PROVIDERS) {
            self.core.lazy_discover_providers = parse_bool(ENV_LAZY_DISCOVER_PROVIDERS, &value)?;
        }
        if let Some(value) = lookup(ENV_INTERPRETER_VERSION) {
            self.runtime.interpreter_version = Some(value);
        }
        Ok(())
    }

    /// The configured interpreter version, or the built-in default.
    pub fn interpreter_version(&self) -> Result<VersionInfo, ConfigError> {
        let raw = self
            .runtime
            .interpreter_version
            .as_deref()
            .unwrap_or(DEFAULT_INTERPRETER_VERSION);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: "runtime.interpreter_version".to_string(),
            value: raw.to_string(),
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }
}

impl SettingsStore for Settings {
    /// Validate the settings once; later calls are no-ops.
    fn initialize(&self) -> BootstrapResult {
        if self.is_initialized() {
            return Ok(());
        }

        let version = self.interpreter_version()?;
        if !self.initialized.swap(true, Ordering::AcqRel) {
            SettingsInitialized {
                lazy_load_providers: self.core.lazy_discover_providers,
                lazy_load_plugins: self.core.lazy_load_plugins,
                interpreter_version: version,
            }
            .log();
        }
        Ok(())
    }

    fn lazy_load_providers(&self) -> bool {
        self.core.lazy_discover_providers
    }

    fn lazy_load_plugins(&self) -> bool {
        self.core.lazy_load_plugins
    }
}

/// Interpret a boolean setting the way the settings store always has:
/// `t`/`true`/`1` and `f`/`false`/`0`, case-insensitive, surrounding space ignored.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "t" | "true" | "1" => Ok(true),
        "f" | "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Load settings from a YAML (`.yaml`/`.yml`) or TOML (`.toml`) file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let settings: Settings = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    Ok(settings)
}

/// Load settings from `path` when given, otherwise start from defaults,
/// then apply environment overrides.
pub fn load_settings_or_default(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = match path {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    settings.apply_env_overrides()?;
    settings.interpreter_version()?;
    Ok(settings)
}
