use crate::errors::BootstrapResult;

/// Provider registry. Bootstrap calls the three entry points in declaration order;
/// each must be safe to call more than once.
pub trait ProviderManager: Send + Sync {
    fn initialize_providers_list(&self) -> BootstrapResult;

    fn initialize_providers_hooks(&self) -> BootstrapResult;

    fn initialize_providers_extra_links(&self) -> BootstrapResult;
}

/// Plugin registry.
pub trait PluginManager: Send + Sync {
    /// Discover and load plugins if that has not happened yet.
    fn ensure_plugins_loaded(&self) -> BootstrapResult;
}

/// Process-wide patching that must run before networking or threading is touched.
pub trait PatchHook: Send + Sync {
    fn apply(&self) -> BootstrapResult;
}
