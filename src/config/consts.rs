/// Name of the root module, used in "no such attribute" messages and replacement paths
pub const ROOT_MODULE: &str = "airflow";
/// Maximum dataset URI length, in characters
pub const DATASET_URI_MAX_LEN: usize = 3000;
/// URI scheme reserved for internal addressing; datasets may not use it
pub const RESERVED_DATASET_SCHEME: &str = "airflow";

/// Any non-empty value runs the patch hook before anything else starts
pub const ENV_PATCH_HOOK: &str = "_AIRFLOW_PATCH_HOOK";
/// Any non-empty value skips settings, provider and plugin initialization
pub const ENV_AS_LIBRARY: &str = "_AIRFLOW__AS_LIBRARY";

/// Overrides `core.lazy_load_plugins`
pub const ENV_LAZY_LOAD_PLUGINS: &str = "AIRFLOW__CORE__LAZY_LOAD_PLUGINS";
/// Overrides `core.lazy_discover_providers`
pub const ENV_LAZY_DISCOVER_PROVIDERS: &str = "AIRFLOW__CORE__LAZY_DISCOVER_PROVIDERS";
/// Overrides `runtime.interpreter_version`
pub const ENV_INTERPRETER_VERSION: &str = "AIRFLOW__RUNTIME__INTERPRETER_VERSION";

/// Interpreter version assumed when settings do not name one
pub const DEFAULT_INTERPRETER_VERSION: &str = "3.12";
