// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::ROOT_MODULE;
use crate::errors::ResolveError;
use crate::lazy::{
    DeprecationWarning, LazyImport, LazyRegistry, LegacyConstants, Member, Module, ModuleCatalog,
    TracingDeprecationSink, VersionInfo,
};
use crate::observability::messages::lazy::{LegacyConstantRead, SymbolNotFound, SymbolResolved};
use crate::observability::messages::StructuredLog;
use crate::traits::DeprecationSink;
use std::any::Any;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Name of the eagerly bound version attribute.
const VERSION_SYMBOL: &str = "__version__";

/// A resolved top-level symbol.
#[derive(Clone)]
pub enum LazyValue {
    /// A whole unit, bound because its registry entry names no member.
    Module(Arc<Module>),
    /// One member extracted from a unit.
    Member(Member),
    /// Answer to a legacy version constant.
    Flag(bool),
    /// The package version string.
    Text(&'static str),
}

impl LazyValue {
    pub fn as_module(&self) -> Option<&Arc<Module>> {
        match self {
            LazyValue::Module(module) => Some(module),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            LazyValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&'static str> {
        match self {
            LazyValue::Text(text) => Some(*text),
            _ => None,
        }
    }

    /// Typed view of a member value.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            LazyValue::Member(member) => member.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// True when both values are the very same object (pointer identity for
    /// modules and members, value equality for flags and text).
    pub fn is_same(&self, other: &LazyValue) -> bool {
        match (self, other) {
            (LazyValue::Module(a), LazyValue::Module(b)) => Arc::ptr_eq(a, b),
            (LazyValue::Member(a), LazyValue::Member(b)) => Arc::ptr_eq(a, b),
            (LazyValue::Flag(a), LazyValue::Flag(b)) => a == b,
            (LazyValue::Text(a), LazyValue::Text(b)) => a == b,
            _ => false,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            LazyValue::Module(_) => "module",
            LazyValue::Member(_) => "member",
            LazyValue::Flag(_) => "flag",
            LazyValue::Text(_) => "text",
        }
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LazyValue::Module(module) => f.debug_tuple("Module").field(module).finish(),
            LazyValue::Member(_) => f.write_str("Member(..)"),
            LazyValue::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
            LazyValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

/// Resolves top-level symbols on demand and remembers the answers.
///
/// Resolution order for `resolve(name)`:
/// 1. the resolved-symbol cache (no loading, no warnings);
/// 2. the [`LazyRegistry`]: load the target unit, extract the member, warn if the
///    alias is deprecated, then cache;
/// 3. the [`LegacyConstants`] table: warn and answer against the interpreter
///    version, without caching;
/// 4. otherwise [`ResolveError::AttributeNotFound`].
///
/// A deprecated alias therefore warns once, when it is first stored. Legacy
/// constants warn on every read.
///
/// The resolver is `Send + Sync`. Two threads missing on the same name at once
/// both reach the catalog, which loads the unit only once. The first value
/// written to the cache is the one both callers receive, and only its writer
/// emits the deprecation warning.
///
/// # Examples
/// ```
/// use airflow_bootstrap::lazy::{LazyRegistry, LazyResolver, ModuleCatalog, VersionInfo};
///
/// let resolver = LazyResolver::new(
///     LazyRegistry::default(),
///     ModuleCatalog::builtin(),
///     VersionInfo::new(3, 12),
/// );
///
/// let version = resolver.resolve("version").unwrap();
/// assert!(version.as_module().is_some());
/// assert_eq!(resolver.resolve("PY39").unwrap().as_flag(), Some(true));
/// assert!(resolver.resolve("NoSuchThing").is_err());
/// ```
pub struct LazyResolver {
    registry: LazyRegistry,
    legacy: LegacyConstants,
    catalog: ModuleCatalog,
    interpreter_version: VersionInfo,
    sink: Arc<dyn DeprecationSink>,
    cache: RwLock<HashMap<String, LazyValue>>,
}

impl LazyResolver {
    pub fn new(
        registry: LazyRegistry,
        catalog: ModuleCatalog,
        interpreter_version: VersionInfo,
    ) -> Self {
        Self {
            registry,
            legacy: LegacyConstants::default(),
            catalog,
            interpreter_version,
            sink: Arc::new(TracingDeprecationSink),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Route deprecation warnings to `sink` instead of the tracing log.
    pub fn with_deprecation_sink(mut self, sink: Arc<dyn DeprecationSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_legacy_constants(mut self, legacy: LegacyConstants) -> Self {
        self.legacy = legacy;
        self
    }

    /// Resolve `name` to its value, loading the owning unit on first use.
    pub fn resolve(&self, name: &str) -> Result<LazyValue, ResolveError> {
        if name == VERSION_SYMBOL {
            return Ok(LazyValue::Text(crate::VERSION));
        }

        if let Some(value) = self.cached(name) {
            return Ok(value);
        }

        let Some(import) = self.registry.get(name) else {
            return self.resolve_legacy(name);
        };

        let value = self.load(import)?;

        // Only the caller whose value lands in the cache reports the deprecation.
        let stored = {
            let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
            match cache.entry(name.to_string()) {
                Entry::Occupied(existing) => return Ok(existing.get().clone()),
                Entry::Vacant(slot) => {
                    if import.deprecated {
                        self.sink.warn(&DeprecationWarning::LazyAlias {
                            symbol: import.symbol.clone(),
                            replacement: import.replacement_path(),
                        });
                    }
                    slot.insert(value).clone()
                }
            }
        };

        SymbolResolved {
            symbol: name,
            target: &import.target,
            kind: stored.kind(),
        }
        .log();

        Ok(stored)
    }

    /// Whether `name` has already been resolved and cached.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn resolved_count(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn registry(&self) -> &LazyRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    pub fn interpreter_version(&self) -> VersionInfo {
        self.interpreter_version
    }

    fn cached(&self, name: &str) -> Option<LazyValue> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn load(&self, import: &LazyImport) -> Result<LazyValue, ResolveError> {
        let module = self.catalog.import(&import.target)?;
        if import.binds_whole_unit() {
            return Ok(LazyValue::Module(module));
        }

        module
            .member(&import.member)
            .cloned()
            .map(LazyValue::Member)
            .ok_or_else(|| ResolveError::MissingMember {
                location: import.target.clone(),
                member: import.member.clone(),
            })
    }

    fn resolve_legacy(&self, name: &str) -> Result<LazyValue, ResolveError> {
        let Some(answer) = self.legacy.evaluate(name, self.interpreter_version) else {
            SymbolNotFound { symbol: name }.log();
            return Err(ResolveError::AttributeNotFound {
                module: ROOT_MODULE.to_string(),
                name: name.to_string(),
            });
        };

        self.sink.warn(&DeprecationWarning::VersionConstant {
            name: name.to_string(),
        });
        LegacyConstantRead {
            name,
            interpreter_version: self.interpreter_version,
            answer,
        }
        .log();

        Ok(LazyValue::Flag(answer))
    }
}

impl fmt::Debug for LazyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyResolver")
            .field("registry", &self.registry)
            .field("catalog", &self.catalog)
            .field("interpreter_version", &self.interpreter_version)
            .field("resolved", &self.resolved_count())
            .finish()
    }
}
