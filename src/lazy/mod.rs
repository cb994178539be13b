// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Lazy resolution of top-level symbols.
//!
//! Heavy units (the DAG model, argument references, exceptions) are not loaded
//! when the package starts. Callers ask a [`LazyResolver`] for a symbol by name;
//! the first request loads the owning unit through the [`ModuleCatalog`],
//! extracts the member and caches it, and every later request is a plain map read.
//!
//! ```text
//! resolve(name) → cache hit? → LazyRegistry → ModuleCatalog::import → cache
//!                                  └ miss → LegacyConstants → AttributeNotFound
//! ```

mod catalog;
mod deprecation;
mod legacy;
mod registry;
mod resolver;

#[cfg(test)]
mod integration_tests;

pub use catalog::{Member, Module, ModuleCatalog, TypeHandle};
pub use deprecation::{DeprecationWarning, TracingDeprecationSink};
pub use legacy::{LegacyConstants, VersionInfo};
pub use registry::{LazyImport, LazyRegistry, LazyRegistryBuilder, PUBLIC_EXPORTS};
pub use resolver::{LazyResolver, LazyValue};
