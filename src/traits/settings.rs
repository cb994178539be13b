use crate::errors::BootstrapResult;

/// The process settings store.
///
/// `initialize` must be idempotent and must run before anything else reads
/// settings; the two flags decide whether providers and plugins are loaded
/// eagerly during bootstrap.
pub trait SettingsStore: Send + Sync {
    fn initialize(&self) -> BootstrapResult;

    /// `false` means provider discovery happens during bootstrap.
    fn lazy_load_providers(&self) -> bool;

    /// `false` means plugins are loaded during bootstrap.
    fn lazy_load_plugins(&self) -> bool;
}
