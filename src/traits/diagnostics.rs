use crate::lazy::DeprecationWarning;

/// Receives deprecation warnings emitted during symbol resolution.
pub trait DeprecationSink: Send + Sync {
    fn warn(&self, warning: &DeprecationWarning);
}
