// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::bootstrap::BootstrapFlags;
use crate::errors::{BootstrapError, BootstrapResult};
use crate::observability::messages::bootstrap::{
    BootstrapAlreadyComplete, BootstrapCompleted, BootstrapStarted, StageCompleted, StageFailed,
    StageSkipped,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{PatchHook, PluginManager, ProviderManager, SettingsStore};
use once_cell::sync::OnceCell;
use std::fmt;
use std::time::Instant;

static BOOTSTRAP: OnceCell<BootstrapReport> = OnceCell::new();

/// One ordered step of startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    PatchHook,
    Settings,
    Providers,
    Plugins,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PatchHook => "patch_hook",
            Stage::Settings => "settings",
            Stage::Providers => "providers",
            Stage::Plugins => "plugins",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subsystems bootstrap drives.
pub struct Collaborators<'a> {
    pub patch_hook: &'a dyn PatchHook,
    pub settings: &'a dyn SettingsStore,
    pub providers: &'a dyn ProviderManager,
    pub plugins: &'a dyn PluginManager,
}

/// What a completed bootstrap did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Stages that ran, in execution order.
    pub completed: Vec<Stage>,
    /// Stages whose gate was closed, in stage order.
    pub skipped: Vec<Stage>,
}

impl BootstrapReport {
    pub fn ran(&self, stage: Stage) -> bool {
        self.completed.contains(&stage)
    }
}

/// Runs the bootstrap stages for one set of flags.
///
/// # Examples
/// ```
/// use airflow_bootstrap::backends::stub::{
///     CallLog, StubPatchHook, StubPluginManager, StubProviderManager, StubSettings,
/// };
/// use airflow_bootstrap::bootstrap::{Bootstrap, BootstrapFlags, Collaborators, Stage};
///
/// let log = CallLog::default();
/// let hook = StubPatchHook::new(log.clone());
/// let settings = StubSettings::new(log.clone(), false, true);
/// let providers = StubProviderManager::new(log.clone());
/// let plugins = StubPluginManager::new(log.clone());
///
/// let report = Bootstrap::new(BootstrapFlags::default())
///     .run(&Collaborators {
///         patch_hook: &hook,
///         settings: &settings,
///         providers: &providers,
///         plugins: &plugins,
///     })
///     .unwrap();
///
/// assert_eq!(report.completed, vec![Stage::Settings, Stage::Providers]);
/// assert_eq!(report.skipped, vec![Stage::PatchHook, Stage::Plugins]);
/// assert_eq!(log.count("plugins.ensure_plugins_loaded"), 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bootstrap {
    flags: BootstrapFlags,
}

impl Bootstrap {
    pub fn new(flags: BootstrapFlags) -> Self {
        Self { flags }
    }

    pub fn run(&self, collaborators: &Collaborators<'_>) -> Result<BootstrapReport, BootstrapError> {
        let started = Instant::now();
        let start = BootstrapStarted { flags: self.flags };
        let span = start.span("bootstrap");
        let _entered = span.enter();
        start.log();

        let mut report = BootstrapReport::default();

        // Stage 0 goes first so the hook sees an untouched process.
        if self.flags.patch_hook {
            run_stage(&mut report, Stage::PatchHook, || collaborators.patch_hook.apply())?;
        } else {
            skip_stage(&mut report, Stage::PatchHook, "patch hook switch not set");
        }

        if self.flags.as_library {
            for stage in [Stage::Settings, Stage::Providers, Stage::Plugins] {
                skip_stage(&mut report, stage, "library mode");
            }
        } else {
            self.run_subsystems(&mut report, collaborators)?;
        }

        BootstrapCompleted {
            completed: &report.completed,
            skipped: &report.skipped,
            elapsed: started.elapsed(),
        }
        .log();

        Ok(report)
    }

    fn run_subsystems(
        &self,
        report: &mut BootstrapReport,
        collaborators: &Collaborators<'_>,
    ) -> Result<(), BootstrapError> {
        let settings = collaborators.settings;
        run_stage(report, Stage::Settings, || settings.initialize())?;

        // Gates are read once, after settings have been initialized.
        let lazy_providers = settings.lazy_load_providers();
        let lazy_plugins = settings.lazy_load_plugins();

        if lazy_providers {
            skip_stage(report, Stage::Providers, "providers are loaded lazily");
        } else {
            let providers = collaborators.providers;
            run_stage(report, Stage::Providers, || {
                providers.initialize_providers_list()?;
                providers.initialize_providers_hooks()?;
                providers.initialize_providers_extra_links()
            })?;
        }

        if lazy_plugins {
            skip_stage(report, Stage::Plugins, "plugins are loaded lazily");
        } else {
            run_stage(report, Stage::Plugins, || {
                collaborators.plugins.ensure_plugins_loaded()
            })?;
        }

        Ok(())
    }
}

fn run_stage<F>(report: &mut BootstrapReport, stage: Stage, body: F) -> Result<(), BootstrapError>
where
    F: FnOnce() -> BootstrapResult,
{
    let started = Instant::now();
    match body() {
        Ok(()) => {
            StageCompleted {
                stage,
                elapsed: started.elapsed(),
            }
            .log();
            report.completed.push(stage);
            Ok(())
        }
        Err(source) => {
            StageFailed {
                stage,
                error: source.as_ref(),
            }
            .log();
            Err(BootstrapError::Stage { stage, source })
        }
    }
}

fn skip_stage(report: &mut BootstrapReport, stage: Stage, reason: &str) {
    StageSkipped { stage, reason }.log();
    report.skipped.push(stage);
}

/// Process-wide bootstrap. The first call runs the stages; later calls return
/// the stored report without touching any collaborator.
///
/// A failed run stores nothing and the error is returned to the caller, which
/// is expected to abort startup.
pub fn initialize(
    flags: BootstrapFlags,
    collaborators: &Collaborators<'_>,
) -> Result<&'static BootstrapReport, BootstrapError> {
    let mut ran = false;
    let report = BOOTSTRAP.get_or_try_init(|| {
        ran = true;
        Bootstrap::new(flags).run(collaborators)
    })?;

    if !ran {
        BootstrapAlreadyComplete {
            completed: &report.completed,
        }
        .log();
    }
    Ok(report)
}

/// Whether [`initialize`] has completed in this process.
pub fn is_initialized() -> bool {
    BOOTSTRAP.get().is_some()
}
