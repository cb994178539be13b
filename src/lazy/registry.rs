// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::ROOT_MODULE;
use crate::errors::RegistryError;
use std::collections::HashMap;

/// Symbols the package exports by name.
pub const PUBLIC_EXPORTS: &[&str] = &["__version__", "DAG", "Dataset", "XComArg"];

/// Default lazy symbols in the form (symbol, target, member, deprecated).
const DEFAULT_LAZY_IMPORTS: &[(&str, &str, &str, bool)] = &[
    ("DAG", ".models.dag", "DAG", false),
    ("Dataset", ".datasets", "Dataset", false),
    ("XComArg", ".models.xcom_arg", "XComArg", false),
    ("version", ".version", "", false),
    // Deprecated lazy imports
    ("AirflowException", ".exceptions", "AirflowException", true),
];

/// One lazily resolved symbol.
///
/// An empty `member` binds the whole unit at `target` instead of one of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyImport {
    pub symbol: String,
    pub target: String,
    pub member: String,
    pub deprecated: bool,
}

impl LazyImport {
    pub fn binds_whole_unit(&self) -> bool {
        self.member.is_empty()
    }

    /// Fully qualified path callers should import from instead of the alias.
    pub fn replacement_path(&self) -> String {
        if self.binds_whole_unit() {
            format!("{}{}", ROOT_MODULE, self.target)
        } else {
            format!("{}{}.{}", ROOT_MODULE, self.target, self.member)
        }
    }
}

/// Immutable table of lazy symbols keyed by symbol name.
///
/// # Examples
/// ```
/// use airflow_bootstrap::lazy::LazyRegistry;
///
/// let registry = LazyRegistry::default();
/// let dag = registry.get("DAG").unwrap();
/// assert_eq!(dag.target, ".models.dag");
/// assert!(registry.get("NoSuchThing").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct LazyRegistry {
    entries: HashMap<String, LazyImport>,
    order: Vec<String>,
}

impl LazyRegistry {
    pub fn builder() -> LazyRegistryBuilder {
        LazyRegistryBuilder::default()
    }

    pub fn get(&self, symbol: &str) -> Option<&LazyImport> {
        self.entries.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    /// Symbols in registration order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for LazyRegistry {
    fn default() -> Self {
        let mut order = Vec::with_capacity(DEFAULT_LAZY_IMPORTS.len());
        let mut entries = HashMap::with_capacity(DEFAULT_LAZY_IMPORTS.len());
        for &(symbol, target, member, deprecated) in DEFAULT_LAZY_IMPORTS {
            order.push(symbol.to_string());
            entries.insert(
                symbol.to_string(),
                LazyImport {
                    symbol: symbol.to_string(),
                    target: target.to_string(),
                    member: member.to_string(),
                    deprecated,
                },
            );
        }
        Self { entries, order }
    }
}

/// Collects entries and checks symbol uniqueness before freezing them into a [`LazyRegistry`].
#[derive(Debug, Default)]
pub struct LazyRegistryBuilder {
    imports: Vec<LazyImport>,
}

impl LazyRegistryBuilder {
    pub fn entry(
        mut self,
        symbol: impl Into<String>,
        target: impl Into<String>,
        member: impl Into<String>,
    ) -> Self {
        self.imports.push(LazyImport {
            symbol: symbol.into(),
            target: target.into(),
            member: member.into(),
            deprecated: false,
        });
        self
    }

    pub fn deprecated_entry(
        mut self,
        symbol: impl Into<String>,
        target: impl Into<String>,
        member: impl Into<String>,
    ) -> Self {
        self.imports.push(LazyImport {
            symbol: symbol.into(),
            target: target.into(),
            member: member.into(),
            deprecated: true,
        });
        self
    }

    pub fn build(self) -> Result<LazyRegistry, RegistryError> {
        let mut entries = HashMap::with_capacity(self.imports.len());
        let mut order = Vec::with_capacity(self.imports.len());

        for import in self.imports {
            if entries.contains_key(&import.symbol) {
                return Err(RegistryError::DuplicateSymbol {
                    symbol: import.symbol,
                });
            }
            order.push(import.symbol.clone());
            entries.insert(import.symbol.clone(), import);
        }

        Ok(LazyRegistry { entries, order })
    }
}
