// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ordered, flag-gated startup of the optional subsystems.
//!
//! # Stages
//!
//! | Stage        | Runs when                              | Calls                                  |
//! |--------------|----------------------------------------|----------------------------------------|
//! | `patch_hook` | `_AIRFLOW_PATCH_HOOK` is set           | [`PatchHook::apply`]                   |
//! | `settings`   | not in library mode                    | [`SettingsStore::initialize`]          |
//! | `providers`  | not library mode, providers not lazy   | list, hooks, extra links (in order)    |
//! | `plugins`    | not library mode, plugins not lazy     | [`PluginManager::ensure_plugins_loaded`] |
//!
//! The first failing stage aborts the sequence; nothing is retried.
//!
//! [`PatchHook::apply`]: crate::traits::PatchHook::apply
//! [`SettingsStore::initialize`]: crate::traits::SettingsStore::initialize
//! [`PluginManager::ensure_plugins_loaded`]: crate::traits::PluginManager::ensure_plugins_loaded

mod flags;
mod sequencer;

pub use flags::BootstrapFlags;
pub use sequencer::{initialize, is_initialized, Bootstrap, BootstrapReport, Collaborators, Stage};
