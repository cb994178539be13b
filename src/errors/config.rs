// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be read
    #[error("Failed to read settings file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid YAML for the expected shape
    #[error("Invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The settings file is not valid TOML for the expected shape
    #[error("Invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension does not name a supported format
    #[error("Unsupported settings format for '{path}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat { path: PathBuf },

    /// A setting holds a value that cannot be interpreted
    #[error("Invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },
}
