// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process stand-ins for the subsystems bootstrap drives.
//!
//! The real settings store, provider manager and plugin manager live outside
//! this crate. The stubs here implement the same traits, record every call in a
//! shared [`stub::CallLog`] and never do real work. The bootstrap binary runs
//! against them and the tests use them to observe call order.
//!
//! ```rust
//! use airflow_bootstrap::backends::stub::{CallLog, StubPluginManager};
//! use airflow_bootstrap::traits::PluginManager;
//!
//! let log = CallLog::default();
//! StubPluginManager::new(log.clone()).ensure_plugins_loaded().unwrap();
//! assert_eq!(log.calls(), vec!["plugins.ensure_plugins_loaded"]);
//! ```

pub mod stub;
