// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Validation failures raised while constructing a [`Dataset`](crate::datasets::Dataset).

use thiserror::Error;

/// Reasons a dataset URI is rejected.
///
/// Validation stops at the first failing rule, so each invalid URI maps to
/// exactly one variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// The URI is empty or longer than the permitted maximum.
    #[error("'uri' must be between 1 and {max} characters, got {actual}")]
    Length { actual: usize, max: usize },

    /// The URI contains nothing but whitespace.
    #[error("uri cannot be just whitespace")]
    Blank,

    /// The URI contains characters outside 7-bit ASCII.
    #[error("'uri' must be ascii")]
    Encoding,

    /// The URI uses a scheme reserved for internal addressing.
    #[error("'uri' scheme `{scheme}` is reserved")]
    ReservedScheme { scheme: String },
}
