#[cfg(test)]
mod integration_tests {
    use crate::backends::stub::RecordingDeprecationSink;
    use crate::errors::ResolveError;
    use crate::lazy::{
        DeprecationWarning, LazyRegistry, LazyResolver, LazyValue, Module, ModuleCatalog,
        TypeHandle, VersionInfo,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    struct Dag;
    struct XComArg;
    struct AirflowException;

    /// Builtin units plus host-provided models and exceptions, each loader counted.
    fn host_catalog(loads: &Arc<AtomicUsize>) -> ModuleCatalog {
        let mut catalog = ModuleCatalog::builtin();

        let counter = Arc::clone(loads);
        catalog.register(".models.dag", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Module::new(".models.dag").with_member("DAG", TypeHandle::of::<Dag>("DAG")))
        });
        catalog.register(".models.xcom_arg", || {
            Ok(Module::new(".models.xcom_arg")
                .with_member("XComArg", TypeHandle::of::<XComArg>("XComArg")))
        });
        catalog.register(".exceptions", || {
            Ok(Module::new(".exceptions").with_member(
                "AirflowException",
                TypeHandle::of::<AirflowException>("AirflowException"),
            ))
        });

        catalog
    }

    fn resolver(loads: &Arc<AtomicUsize>) -> (LazyResolver, Arc<RecordingDeprecationSink>) {
        let sink = Arc::new(RecordingDeprecationSink::new());
        let resolver = LazyResolver::new(
            LazyRegistry::default(),
            host_catalog(loads),
            VersionInfo::new(3, 11),
        )
        .with_deprecation_sink(sink.clone());
        (resolver, sink)
    }

    #[test]
    fn test_repeated_resolution_loads_once_and_returns_same_value() {
        let loads = Arc::new(AtomicUsize::new(0));
        let (resolver, _sink) = resolver(&loads);

        assert_eq!(loads.load(Ordering::SeqCst), 0, "nothing loads before first access");

        let first = resolver.resolve("DAG").unwrap();
        let second = resolver.resolve("DAG").unwrap();

        assert!(first.is_same(&second));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.catalog().loads(".models.dag"), 1);
        assert!(first.downcast_ref::<TypeHandle>().unwrap().is::<Dag>());
    }

    #[test]
    fn test_every_public_symbol_resolves() {
        let loads = Arc::new(AtomicUsize::new(0));
        let (resolver, _sink) = resolver(&loads);

        let test_cases = vec![
            ("DAG", "DAG"),
            ("Dataset", "Dataset"),
            ("XComArg", "XComArg"),
            ("AirflowException", "AirflowException"),
        ];

        for (symbol, type_name) in test_cases {
            let value = resolver
                .resolve(symbol)
                .unwrap_or_else(|e| panic!("'{}' failed to resolve: {}", symbol, e));
            let handle = value
                .downcast_ref::<TypeHandle>()
                .unwrap_or_else(|| panic!("'{}' should resolve to a type handle", symbol));
            assert_eq!(handle.name(), type_name);
        }

        assert!(matches!(resolver.resolve("version").unwrap(), LazyValue::Module(_)));
        assert_eq!(resolver.resolved_count(), 5);
    }

    #[test]
    fn test_deprecated_alias_warns_on_first_resolution_only() {
        let loads = Arc::new(AtomicUsize::new(0));
        let (resolver, sink) = resolver(&loads);

        let first = resolver.resolve("AirflowException").unwrap();
        let second = resolver.resolve("AirflowException").unwrap();

        assert!(first.is_same(&second));
        assert_eq!(
            sink.warnings(),
            vec![DeprecationWarning::LazyAlias {
                symbol: "AirflowException".to_string(),
                replacement: "airflow.exceptions.AirflowException".to_string(),
            }]
        );
    }

    #[test]
    fn test_non_deprecated_symbols_do_not_warn() {
        let loads = Arc::new(AtomicUsize::new(0));
        let (resolver, sink) = resolver(&loads);

        for symbol in ["DAG", "Dataset", "XComArg", "version", "__version__"] {
            resolver.resolve(symbol).unwrap();
        }
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_unknown_symbol_leaves_no_state() {
        let loads = Arc::new(AtomicUsize::new(0));
        let (resolver, sink) = resolver(&loads);

        assert!(matches!(
            resolver.resolve("NoSuchThing"),
            Err(ResolveError::AttributeNotFound { .. })
        ));
        assert_eq!(resolver.resolved_count(), 0);
        assert_eq!(loads.load(Ordering::SeqCst), 0);
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_legacy_constant_against_interpreter_version() {
        let loads = Arc::new(AtomicUsize::new(0));
        let (resolver, _sink) = resolver(&loads);

        // running 3.11
        assert_eq!(resolver.resolve("PY39").unwrap().as_flag(), Some(true));
        assert_eq!(resolver.resolve("PY311").unwrap().as_flag(), Some(true));
        assert_eq!(resolver.resolve("PY312").unwrap().as_flag(), Some(false));
    }

    #[test]
    fn test_concurrent_first_access_agrees_on_one_value() {
        let loads = Arc::new(AtomicUsize::new(0));
        let (resolver, sink) = resolver(&loads);
        let resolver = Arc::new(resolver);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                thread::spawn(move || {
                    (
                        resolver.resolve("DAG").unwrap(),
                        resolver.resolve("AirflowException").unwrap(),
                    )
                })
            })
            .collect();

        let results: Vec<(LazyValue, LazyValue)> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        let (dag, exception) = &results[0];
        for (other_dag, other_exception) in &results[1..] {
            assert!(dag.is_same(other_dag));
            assert!(exception.is_same(other_exception));
        }
        assert!(dag.is_same(&resolver.resolve("DAG").unwrap()));

        assert_eq!(loads.load(Ordering::SeqCst), 1, "the unit loads once even under races");
        assert_eq!(resolver.resolved_count(), 2);
        assert_eq!(sink.count_for("AirflowException"), 1);
    }

    #[test]
    fn test_racing_first_resolutions_warn_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);

        let mut catalog = ModuleCatalog::builtin();
        catalog.register(".exceptions", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(100));
            Ok(Module::new(".exceptions").with_member(
                "AirflowException",
                TypeHandle::of::<AirflowException>("AirflowException"),
            ))
        });

        let sink = Arc::new(RecordingDeprecationSink::new());
        let resolver = LazyResolver::new(LazyRegistry::default(), catalog, VersionInfo::new(3, 12))
            .with_deprecation_sink(sink.clone());
        let barrier = Barrier::new(4);

        let values: Vec<LazyValue> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        resolver.resolve("AirflowException").unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(values.iter().all(|v| v.is_same(&values[0])));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(sink.count_for("AirflowException"), 1);
    }
}
