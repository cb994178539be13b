// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{ENV_AS_LIBRARY, ENV_PATCH_HOOK};

/// Boot-time switches, read once before bootstrap starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapFlags {
    /// Run the patch hook before anything else.
    pub patch_hook: bool,
    /// Skip settings, provider and plugin initialization entirely.
    pub as_library: bool,
}

impl BootstrapFlags {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// A switch is on when its variable is set to any non-empty value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_set = |key: &str| lookup(key).map(|v| !v.is_empty()).unwrap_or(false);
        Self {
            patch_hook: is_set(ENV_PATCH_HOOK),
            as_library: is_set(ENV_AS_LIBRARY),
        }
    }
}
