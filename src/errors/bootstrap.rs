// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::bootstrap::Stage;
use std::error::Error;
use thiserror::Error;

/// Error type returned by bootstrap collaborators.
pub type BoxedError = Box<dyn Error + Send + Sync + 'static>;

/// A bootstrap stage failed and startup must abort.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Bootstrap stage '{stage}' failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: BoxedError,
    },
}

impl BootstrapError {
    pub fn stage(&self) -> Stage {
        match self {
            BootstrapError::Stage { stage, .. } => *stage,
        }
    }
}

/// Result type alias for bootstrap collaborators.
pub type BootstrapResult<T = ()> = Result<T, BoxedError>;
