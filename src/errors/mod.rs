// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod bootstrap;
mod config;
mod dataset;
mod resolve;

pub use bootstrap::{BootstrapError, BootstrapResult, BoxedError};
pub use config::ConfigError;
pub use dataset::DatasetError;
pub use resolve::{ImportError, RegistryError, ResolveError};
