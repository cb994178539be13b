#[cfg(test)]
mod integration_tests {
    use crate::backends::stub::{CallLog, StubPatchHook, StubPluginManager, StubProviderManager};
    use crate::bootstrap::{Bootstrap, BootstrapFlags, Collaborators, Stage};
    use crate::config::{load_settings, Settings};
    use crate::lazy::{LazyRegistry, LazyResolver, ModuleCatalog, VersionInfo};
    use crate::traits::SettingsStore;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn run_with(settings: &Settings, flags: BootstrapFlags) -> (Vec<Stage>, Vec<String>) {
        let log = CallLog::default();
        let hook = StubPatchHook::new(log.clone());
        let providers = StubProviderManager::new(log.clone());
        let plugins = StubPluginManager::new(log.clone());

        let report = Bootstrap::new(flags)
            .run(&Collaborators {
                patch_hook: &hook,
                settings,
                providers: &providers,
                plugins: &plugins,
            })
            .unwrap();

        (report.completed, log.calls())
    }

    /// Test that a YAML settings file drives the provider and plugin stages
    #[test]
    fn test_yaml_settings_drive_bootstrap() {
        let file = settings_file(
            ".yaml",
            r#"
core:
  lazy_load_plugins: false
  lazy_discover_providers: false
runtime:
  interpreter_version: "3.9"
"#,
        );

        let settings = load_settings(file.path()).unwrap();
        assert!(!settings.lazy_load_plugins());
        assert!(!settings.lazy_load_providers());
        assert_eq!(settings.interpreter_version().unwrap(), VersionInfo::new(3, 9));

        let (completed, calls) = run_with(&settings, BootstrapFlags::default());

        assert_eq!(completed, vec![Stage::Settings, Stage::Providers, Stage::Plugins]);
        assert_eq!(
            calls,
            vec![
                "providers.initialize_providers_list",
                "providers.initialize_providers_hooks",
                "providers.initialize_providers_extra_links",
                "plugins.ensure_plugins_loaded",
            ]
        );
        assert!(settings.is_initialized());
    }

    /// Test that a TOML settings file with defaults leaves discovery deferred
    #[test]
    fn test_toml_defaults_defer_discovery() {
        let file = settings_file(
            ".toml",
            r#"
[runtime]
interpreter_version = "3.12"
"#,
        );

        let settings = load_settings(file.path()).unwrap();
        let (completed, calls) = run_with(&settings, BootstrapFlags::default());

        assert_eq!(completed, vec![Stage::Settings]);
        assert!(calls.is_empty());
    }

    #[test]
    fn test_library_mode_ignores_eager_settings() {
        let file = settings_file(
            ".yml",
            "core:\n  lazy_load_plugins: false\n  lazy_discover_providers: false\n",
        );
        let settings = load_settings(file.path()).unwrap();

        let flags = BootstrapFlags {
            patch_hook: true,
            as_library: true,
        };
        let (completed, calls) = run_with(&settings, flags);

        assert_eq!(completed, vec![Stage::PatchHook]);
        assert_eq!(calls, vec!["patch_hook.apply"]);
        assert!(!settings.is_initialized());
    }

    #[test]
    fn test_invalid_interpreter_version_fails_settings_stage() {
        let file = settings_file(".yaml", "runtime:\n  interpreter_version: \"three\"\n");
        let settings = load_settings(file.path()).unwrap();

        let log = CallLog::default();
        let hook = StubPatchHook::new(log.clone());
        let providers = StubProviderManager::new(log.clone());
        let plugins = StubPluginManager::new(log.clone());

        let error = Bootstrap::new(BootstrapFlags::default())
            .run(&Collaborators {
                patch_hook: &hook,
                settings: &settings,
                providers: &providers,
                plugins: &plugins,
            })
            .unwrap_err();

        assert_eq!(error.stage(), Stage::Settings);
        assert!(log.calls().is_empty());
    }

    /// Test that legacy constants follow the configured interpreter version
    #[test]
    fn test_configured_version_answers_legacy_constants() {
        let test_cases = vec![
            ("3.8", "PY38", true),
            ("3.8", "PY39", false),
            ("3.10", "PY39", true),
            ("3.10", "PY311", false),
            ("3.12.1", "PY312", true),
        ];

        for (configured, constant, expected) in test_cases {
            let file = settings_file(
                ".yaml",
                &format!("runtime:\n  interpreter_version: \"{}\"\n", configured),
            );
            let settings = load_settings(file.path()).unwrap();
            let resolver = LazyResolver::new(
                LazyRegistry::default(),
                ModuleCatalog::builtin(),
                settings.interpreter_version().unwrap(),
            );

            assert_eq!(
                resolver.resolve(constant).unwrap().as_flag(),
                Some(expected),
                "{} on {}",
                constant,
                configured
            );
        }
    }
}
