// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::ROOT_MODULE;
use crate::observability::messages::lazy::DeprecatedAccess;
use crate::observability::messages::StructuredLog;
use crate::traits::DeprecationSink;
use std::fmt;

/// A non-fatal notice that a caller used a deprecated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeprecationWarning {
    /// A deprecated lazy alias was resolved; `replacement` is the preferred import path.
    LazyAlias { symbol: String, replacement: String },
    /// A legacy version constant such as `PY39` was read.
    VersionConstant { name: String },
}

impl DeprecationWarning {
    pub fn symbol(&self) -> &str {
        match self {
            DeprecationWarning::LazyAlias { symbol, .. } => symbol,
            DeprecationWarning::VersionConstant { name } => name,
        }
    }
}

impl fmt::Display for DeprecationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeprecationWarning::LazyAlias {
                symbol,
                replacement,
            } => write!(
                f,
                "Import '{}' directly from the {} module is deprecated and will be removed in the future. \
                 Please import it from '{}'.",
                symbol, ROOT_MODULE, replacement
            ),
            DeprecationWarning::VersionConstant { name } => write!(
                f,
                "Version constraint '{}' is deprecated and will be removed in the future. \
                 Please compare against the runtime interpreter version instead.",
                name
            ),
        }
    }
}

/// Default sink: every warning becomes a `tracing` event on the `deprecation` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDeprecationSink;

impl DeprecationSink for TracingDeprecationSink {
    fn warn(&self, warning: &DeprecationWarning) {
        DeprecatedAccess { warning }.log();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_message_names_replacement() {
        let warning = DeprecationWarning::LazyAlias {
            symbol: "AirflowException".to_string(),
            replacement: "airflow.exceptions.AirflowException".to_string(),
        };

        let message = warning.to_string();
        assert!(message.starts_with("Import 'AirflowException' directly from the airflow module"));
        assert!(message.contains("'airflow.exceptions.AirflowException'"));
        assert_eq!(warning.symbol(), "AirflowException");
    }

    #[test]
    fn test_version_constant_message() {
        let warning = DeprecationWarning::VersionConstant {
            name: "PY39".to_string(),
        };

        assert!(warning.to_string().contains("'PY39' is deprecated"));
    }
}
