// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dataset identities used to mark data dependencies between workflows.
//!
//! A [`Dataset`] is a validated, immutable wrapper around a URI. Two datasets
//! are the same dataset when their URIs are byte-for-byte identical; the
//! optional `extra` metadata travels with the value but never takes part in
//! equality or hashing.
//!
//! # Example
//! ```
//! use airflow_bootstrap::datasets::Dataset;
//!
//! let orders = Dataset::new("s3://warehouse/orders/").unwrap();
//! assert_eq!(orders.uri(), "s3://warehouse/orders/");
//! assert!(Dataset::new("airflow://internal").is_err());
//! ```

use crate::config::consts::{DATASET_URI_MAX_LEN, RESERVED_DATASET_SCHEME};
use crate::errors::DatasetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Free-form metadata attached to a dataset.
pub type DatasetExtra = serde_json::Map<String, serde_json::Value>;

/// A dataset identity: a validated URI plus optional metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DatasetDocument")]
pub struct Dataset {
    uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extra: Option<DatasetExtra>,
}

/// Unvalidated wire shape; every deserialized dataset passes through [`Dataset::with_extra`].
#[derive(Deserialize)]
struct DatasetDocument {
    uri: String,
    #[serde(default)]
    extra: Option<DatasetExtra>,
}

impl TryFrom<DatasetDocument> for Dataset {
    type Error = DatasetError;

    fn try_from(doc: DatasetDocument) -> Result<Self, Self::Error> {
        Dataset::with_extra(doc.uri, doc.extra)
    }
}

impl Dataset {
    /// Schema version for consumers that persist datasets.
    pub const VERSION: u32 = 1;

    /// Create a dataset without metadata.
    pub fn new(uri: impl Into<String>) -> Result<Self, DatasetError> {
        Self::with_extra(uri, None)
    }

    /// Create a dataset, validating `uri` and storing both fields verbatim.
    pub fn with_extra(
        uri: impl Into<String>,
        extra: Option<DatasetExtra>,
    ) -> Result<Self, DatasetError> {
        let uri = uri.into();
        validate_uri(&uri)?;
        Ok(Self { uri, extra })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn extra(&self) -> Option<&DatasetExtra> {
        self.extra.as_ref()
    }

    /// Path-like view of the dataset, for I/O helpers that accept paths.
    pub fn as_path(&self) -> &Path {
        Path::new(&self.uri)
    }
}

/// Apply the URI rules in order; the first failing rule decides the error.
fn validate_uri(uri: &str) -> Result<(), DatasetError> {
    let length = uri.chars().count();
    if length == 0 || length > DATASET_URI_MAX_LEN {
        return Err(DatasetError::Length {
            actual: length,
            max: DATASET_URI_MAX_LEN,
        });
    }

    if uri.chars().all(is_blank) {
        return Err(DatasetError::Blank);
    }

    if !uri.is_ascii() {
        return Err(DatasetError::Encoding);
    }

    if let Some(scheme) = uri_scheme(uri) {
        if scheme == RESERVED_DATASET_SCHEME {
            return Err(DatasetError::ReservedScheme { scheme });
        }
    }

    Ok(())
}

/// Unicode whitespace plus the ASCII information separators `\x1c`..`\x1f`.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Extract the lowercased scheme of a generic URI, if it has one.
///
/// Leading control characters and spaces are ignored and tab/newline bytes are
/// dropped before looking for the scheme, the same way URL splitters treat
/// them. A scheme is an ASCII letter followed by letters, digits, `+`, `-` or
/// `.`, terminated by the first `:`.
fn uri_scheme(uri: &str) -> Option<String> {
    let cleaned: String = uri
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let (candidate, _) = cleaned.split_once(':')?;
    let mut chars = candidate.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }

    Some(candidate.to_ascii_lowercase())
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for Dataset {}

impl Hash for Dataset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl AsRef<Path> for Dataset {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

impl TryFrom<String> for Dataset {
    type Error = DatasetError;

    fn try_from(uri: String) -> Result<Self, Self::Error> {
        Dataset::new(uri)
    }
}

impl TryFrom<&str> for Dataset {
    type Error = DatasetError;

    fn try_from(uri: &str) -> Result<Self, Self::Error> {
        Dataset::new(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of(dataset: &Dataset) -> u64 {
        let mut hasher = DefaultHasher::new();
        dataset.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_valid_uris_are_stored_verbatim() {
        let uris = vec![
            "s3://bucket/key",
            "S3://Bucket/Key/",
            "file:///tmp/data.csv",
            "postgres://host:5432/db?table=orders%20v2",
            "relative/path/without/scheme",
            "x",
            "  padded  ",
            "airflow_like_but_no_scheme",
            "not-airflow://x",
            "3airflow://x",
        ];

        for uri in uris {
            let dataset = Dataset::new(uri)
                .unwrap_or_else(|e| panic!("'{}' should be valid: {}", uri, e));
            assert_eq!(dataset.uri(), uri, "uri must not be normalized");
            assert_eq!(dataset.as_path(), Path::new(uri));
            assert!(dataset.extra().is_none());
        }
    }

    #[test]
    fn test_rejections_table_driven() {
        struct TestCase {
            name: &'static str,
            uri: String,
            expected: DatasetError,
        }

        let test_cases = vec![
            TestCase {
                name: "empty",
                uri: String::new(),
                expected: DatasetError::Length { actual: 0, max: 3000 },
            },
            TestCase {
                name: "too long",
                uri: "a".repeat(3001),
                expected: DatasetError::Length { actual: 3001, max: 3000 },
            },
            TestCase {
                name: "only spaces",
                uri: " ".repeat(5),
                expected: DatasetError::Blank,
            },
            TestCase {
                name: "mixed whitespace",
                uri: " \t\n ".to_string(),
                expected: DatasetError::Blank,
            },
            TestCase {
                name: "information separators",
                uri: "\u{1c}\u{1d}\u{1e}\u{1f}".to_string(),
                expected: DatasetError::Blank,
            },
            TestCase {
                name: "non ascii",
                uri: "caf\u{e9}://x".to_string(),
                expected: DatasetError::Encoding,
            },
            TestCase {
                name: "reserved scheme",
                uri: "airflow://x".to_string(),
                expected: DatasetError::ReservedScheme { scheme: "airflow".to_string() },
            },
            TestCase {
                name: "reserved scheme uppercase",
                uri: "AIRFLOW://x".to_string(),
                expected: DatasetError::ReservedScheme { scheme: "airflow".to_string() },
            },
            TestCase {
                name: "reserved scheme without authority",
                uri: "Airflow:dataset".to_string(),
                expected: DatasetError::ReservedScheme { scheme: "airflow".to_string() },
            },
            TestCase {
                name: "reserved scheme behind leading space",
                uri: "  airflow://x".to_string(),
                expected: DatasetError::ReservedScheme { scheme: "airflow".to_string() },
            },
        ];

        for test_case in test_cases {
            let result = Dataset::new(test_case.uri.clone());
            assert_eq!(
                result.unwrap_err(),
                test_case.expected,
                "Test case '{}' produced the wrong error",
                test_case.name
            );
        }
    }

    #[test]
    fn test_length_boundary_accepted() {
        let uri = "a".repeat(3000);
        assert!(Dataset::new(uri).is_ok());
    }

    #[test]
    fn test_length_check_runs_before_encoding() {
        // 3001 characters of a non-ascii letter: length is reported first
        let uri = "\u{e9}".repeat(3001);
        assert!(matches!(
            Dataset::new(uri),
            Err(DatasetError::Length { actual: 3001, .. })
        ));
    }

    #[test]
    fn test_equality_and_hash_ignore_extra() {
        let mut extra = DatasetExtra::new();
        extra.insert("owner".to_string(), serde_json::json!("data-eng"));

        let plain = Dataset::new("s3://bucket/key").unwrap();
        let annotated = Dataset::with_extra("s3://bucket/key", Some(extra)).unwrap();

        assert_eq!(plain, annotated);
        assert_eq!(hash_of(&plain), hash_of(&annotated));

        let set: HashSet<Dataset> = [plain, annotated].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_equality_is_exact() {
        let a = Dataset::new("s3://bucket/key").unwrap();
        let b = Dataset::new("s3://bucket/key/").unwrap();
        let c = Dataset::new("S3://bucket/key").unwrap();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, Dataset::new("s3://bucket/key").unwrap());
        assert_eq!(hash_of(&a), hash_of(&Dataset::new("s3://bucket/key").unwrap()));
    }

    #[test]
    fn test_serde_round_trip_keeps_extra() {
        let json = r#"{"uri":"s3://bucket/key","extra":{"rows":42}}"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();

        assert_eq!(dataset.uri(), "s3://bucket/key");
        assert_eq!(dataset.extra().unwrap()["rows"], serde_json::json!(42));
        assert_eq!(serde_json::to_string(&dataset).unwrap(), json);
    }

    #[test]
    fn test_deserialize_rejects_invalid_uri() {
        let err = serde_json::from_str::<Dataset>(r#"{"uri":"airflow://x"}"#).unwrap_err();
        assert!(err.to_string().contains("reserved"));

        assert!(serde_json::from_str::<Dataset>(r#"{"uri":"   "}"#).is_err());
    }

    #[test]
    fn test_schema_version() {
        assert_eq!(Dataset::VERSION, 1);
    }
}
