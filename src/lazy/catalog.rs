// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::datasets::Dataset;
use crate::errors::ImportError;
use crate::observability::messages::lazy::{ModuleImportFailed, ModuleImported};
use crate::observability::messages::StructuredLog;
use once_cell::sync::OnceCell;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A member exported by a loaded module.
pub type Member = Arc<dyn Any + Send + Sync>;

type Loader = Box<dyn Fn() -> Result<Module, ImportError> + Send + Sync>;

/// A loaded code unit: a location plus its named members.
pub struct Module {
    location: String,
    members: HashMap<String, Member>,
}

impl Module {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            members: HashMap::new(),
        }
    }

    pub fn with_member<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.members.insert(name.into(), Arc::new(value));
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Typed access to a member; `None` when absent or of another type.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.members.get(name)?.downcast_ref::<T>()
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.member_names().collect();
        names.sort_unstable();
        f.debug_struct("Module")
            .field("location", &self.location)
            .field("members", &names)
            .finish()
    }
}

/// Names a type exported by a module, the way a class object would be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeHandle {
    name: &'static str,
    type_id: TypeId,
}

impl TypeHandle {
    pub fn of<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

struct Slot {
    loader: Loader,
    module: OnceCell<Arc<Module>>,
    loads: AtomicUsize,
}

/// Deferred-import table: location → loader, each location loaded at most once.
///
/// Loading is lazy. Registering a location costs nothing; the loader runs on the
/// first [`import`](ModuleCatalog::import) of that location and its module is kept
/// for the life of the catalog. A failed load is not remembered, so a later
/// import tries again.
///
/// # Examples
/// ```
/// use airflow_bootstrap::lazy::{Module, ModuleCatalog};
///
/// let mut catalog = ModuleCatalog::new();
/// catalog.register(".models.dag", || Ok(Module::new(".models.dag").with_member("DAG", "dag-type")));
///
/// let first = catalog.import(".models.dag").unwrap();
/// let second = catalog.import(".models.dag").unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// assert_eq!(catalog.loads(".models.dag"), 1);
/// ```
#[derive(Default)]
pub struct ModuleCatalog {
    slots: HashMap<String, Slot>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the units this crate provides itself: `.datasets` and `.version`.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(".datasets", || {
            Ok(Module::new(".datasets").with_member("Dataset", TypeHandle::of::<Dataset>("Dataset")))
        });
        catalog.register(".version", || {
            Ok(Module::new(".version")
                .with_member("version", crate::VERSION)
                .with_member("version_info", version_info()?))
        });
        catalog
    }

    /// Register (or replace) the loader for `location`.
    pub fn register<F>(&mut self, location: impl Into<String>, loader: F) -> &mut Self
    where
        F: Fn() -> Result<Module, ImportError> + Send + Sync + 'static,
    {
        self.slots.insert(
            location.into(),
            Slot {
                loader: Box::new(loader),
                module: OnceCell::new(),
                loads: AtomicUsize::new(0),
            },
        );
        self
    }

    /// Load `location`, running its loader only if no earlier import succeeded.
    pub fn import(&self, location: &str) -> Result<Arc<Module>, ImportError> {
        let slot = self.slots.get(location).ok_or_else(|| ImportError::NotFound {
            location: location.to_string(),
        })?;

        slot.module
            .get_or_try_init(|| {
                let count = slot.loads.fetch_add(1, Ordering::AcqRel) + 1;
                match (slot.loader)() {
                    Ok(module) => {
                        ModuleImported {
                            location,
                            members: module.members.len(),
                            attempt: count,
                        }
                        .log();
                        Ok(Arc::new(module))
                    }
                    Err(error) => {
                        ModuleImportFailed {
                            location,
                            error: &error,
                        }
                        .log();
                        Err(error)
                    }
                }
            })
            .cloned()
    }

    pub fn is_loaded(&self, location: &str) -> bool {
        self.slots
            .get(location)
            .map(|slot| slot.module.get().is_some())
            .unwrap_or(false)
    }

    /// How many times the loader for `location` has run.
    pub fn loads(&self, location: &str) -> usize {
        self.slots
            .get(location)
            .map(|slot| slot.loads.load(Ordering::Acquire))
            .unwrap_or(0)
    }
}

/// `(major, minor, patch)` of this package.
fn version_info() -> Result<(u32, u32, u32), ImportError> {
    let part = |raw: &str| {
        raw.parse::<u32>().map_err(|e| ImportError::Failed {
            location: ".version".to_string(),
            reason: format!("invalid version component '{}': {}", raw, e),
        })
    };
    Ok((
        part(env!("CARGO_PKG_VERSION_MAJOR"))?,
        part(env!("CARGO_PKG_VERSION_MINOR"))?,
        part(env!("CARGO_PKG_VERSION_PATCH"))?,
    ))
}

impl fmt::Debug for ModuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut locations: Vec<&str> = self.slots.keys().map(String::as_str).collect();
        locations.sort_unstable();
        f.debug_struct("ModuleCatalog")
            .field("locations", &locations)
            .finish()
    }
}
