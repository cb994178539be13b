// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;

#[cfg(test)]
mod integration_tests;
pub mod consts;

pub use loader::{load_settings, load_settings_or_default, CoreSettings, RuntimeSettings, Settings};
