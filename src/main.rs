// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::process::ExitCode;

use airflow_bootstrap::backends::stub::{CallLog, StubPatchHook, StubPluginManager, StubProviderManager};
use airflow_bootstrap::bootstrap::{self, BootstrapFlags, Collaborators};
use airflow_bootstrap::config::load_settings_or_default;
use airflow_bootstrap::lazy::{LazyRegistry, LazyResolver, LazyValue, ModuleCatalog, TypeHandle};
use airflow_bootstrap::observability::init_tracing;
use anyhow::Context;
use clap::Parser;

/// Bootstrap the process, then resolve top-level symbols by name.
#[derive(Debug, Parser)]
#[command(name = "airflow-bootstrap", version)]
struct Args {
    /// Settings file (.yaml, .yml or .toml); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip settings, provider and plugin initialization
    #[arg(long)]
    library: bool,

    /// Run the patch hook before anything else
    #[arg(long)]
    patch_hook: bool,

    /// Symbols to resolve, e.g. `Dataset version PY39 AirflowException`; lists them when empty
    symbols: Vec<String>,
}

fn describe(value: &LazyValue) -> String {
    match value {
        LazyValue::Module(module) => {
            let mut members: Vec<&str> = module.member_names().collect();
            members.sort_unstable();
            format!("module '{}' [{}]", module.location(), members.join(", "))
        }
        LazyValue::Member(_) => match value.downcast_ref::<TypeHandle>() {
            Some(handle) => format!("type {}", handle.name()),
            None => "member".to_string(),
        },
        LazyValue::Flag(flag) => flag.to_string(),
        LazyValue::Text(text) => format!("'{}'", text),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing();

    let settings = load_settings_or_default(args.config.as_deref())
        .context("Failed to load settings")?;
    let interpreter_version = settings.interpreter_version()?;

    let env_flags = BootstrapFlags::from_env();
    let flags = BootstrapFlags {
        patch_hook: env_flags.patch_hook || args.patch_hook,
        as_library: env_flags.as_library || args.library,
    };

    let calls = CallLog::default();
    let hook = StubPatchHook::new(calls.clone());
    let providers = StubProviderManager::new(calls.clone());
    let plugins = StubPluginManager::new(calls.clone());

    let report = bootstrap::initialize(
        flags,
        &Collaborators {
            patch_hook: &hook,
            settings: &settings,
            providers: &providers,
            plugins: &plugins,
        },
    )
    .context("Bootstrap failed")?;

    println!("Bootstrap stages run: {:?}", report.completed);
    println!("Bootstrap stages skipped: {:?}", report.skipped);

    let resolver = LazyResolver::new(
        LazyRegistry::default(),
        ModuleCatalog::builtin(),
        interpreter_version,
    );

    if args.symbols.is_empty() {
        let symbols: Vec<&str> = resolver.registry().symbols().collect();
        println!("Resolvable symbols: {}", symbols.join(", "));
    }

    let mut failures = 0;
    for symbol in &args.symbols {
        match resolver.resolve(symbol) {
            Ok(value) => println!("{} -> {}", symbol, describe(&value)),
            Err(e) => {
                eprintln!("{} -> error: {}", symbol, e);
                failures += 1;
            }
        }
    }

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
