// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Contracts the bootstrap layer uses to reach the subsystems it starts.

pub mod diagnostics;
pub mod managers;
pub mod settings;

pub use diagnostics::DeprecationSink;
pub use managers::{PatchHook, PluginManager, ProviderManager};
pub use settings::SettingsStore;
