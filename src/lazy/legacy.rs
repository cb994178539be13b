// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Legacy version-constant names such as `PY39`.
//!
//! Old callers asked the package for booleans like `PY39` ("interpreter is 3.9
//! or newer"). These names are answered from a dedicated table, consulted only
//! after the lazy registry misses, and each answer carries a deprecation warning.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Prefix shared by every legacy version constant.
const LEGACY_PREFIX: &str = "PY3";
/// Major version encoded by [`LEGACY_PREFIX`].
const LEGACY_MAJOR: u32 = 3;
/// Minor versions that ever had a constant.
const LEGACY_MINORS: &[u32] = &[6, 7, 8, 9, 10, 11, 12];

/// A `major.minor` interpreter version. Ordering is lexicographic on (major, minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionInfo {
    pub major: u32,
    pub minor: u32,
}

impl VersionInfo {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for VersionInfo {
    type Err = std::num::ParseIntError;

    /// Parses `major.minor`, ignoring any further components (`3.11.4` is `3.11`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let major = parts.next().unwrap_or_default().parse()?;
        let minor = parts.next().unwrap_or_default().parse()?;
        Ok(Self { major, minor })
    }
}

/// Lookup table from legacy constant name to the version it tests for.
#[derive(Debug, Clone)]
pub struct LegacyConstants {
    entries: HashMap<String, VersionInfo>,
}

impl LegacyConstants {
    /// An empty table: every name misses.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<VersionInfo> {
        self.entries.get(name).copied()
    }

    /// Answer `name` against `running`, or `None` when it is not a legacy constant.
    pub fn evaluate(&self, name: &str, running: VersionInfo) -> Option<bool> {
        self.get(name).map(|required| running >= required)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for LegacyConstants {
    fn default() -> Self {
        let entries = LEGACY_MINORS
            .iter()
            .map(|&minor| {
                (
                    format!("{}{}", LEGACY_PREFIX, minor),
                    VersionInfo::new(LEGACY_MAJOR, minor),
                )
            })
            .collect();
        Self { entries }
    }
}
