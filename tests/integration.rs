// SPDX-License-Identifier: MPL-2.0
use http::{Method, Request, StatusCode};
use l10n_overlay::bundle::{BundleMerger, Properties};
use l10n_overlay::config::{self, Config};
use l10n_overlay::contributor::{
    Contributor, ContributorRegistry, DirectoryContributor, DirectoryLayout, EmbeddedContributor,
};
use l10n_overlay::diagnostics::{DiagnosticsCollector, ResolutionEventKind};
use l10n_overlay::domain::ModuleRef;
use l10n_overlay::host::{
    BundleFactory, ModuleDirectory, PassthroughBundleFactory, StaticModuleDirectory, TemplatingHost,
};
use l10n_overlay::monitor::StatusMonitor;
use l10n_overlay::override_point::OverrideInstaller;
use l10n_overlay::resolver::{NamespaceContext, ResourceContext, Resolver};
use l10n_overlay::resource::LocatedResource;
use rust_embed::RustEmbed;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;

#[derive(RustEmbed)]
#[folder = "tests/data/bundles/"]
struct Bundles;

/// Contributor "A" of the documented scenario: a single in-memory bundle.
struct ContributorA;

impl Contributor for ContributorA {
    fn try_get(&self, path: &str) -> Option<LocatedResource> {
        (path == "io/acme/Foo_de.properties")
            .then(|| LocatedResource::from_bytes("mem:A", b"greeting=Hallo\n".to_vec()))
    }

    fn display_name(&self) -> String {
        "A".to_string()
    }
}

struct Unowned;

impl Contributor for Unowned {
    fn try_get(&self, _path: &str) -> Option<LocatedResource> {
        None
    }
}

fn base_props() -> Properties {
    Properties::from([
        ("greeting".to_string(), "Hello".to_string()),
        ("farewell".to_string(), "Bye".to_string()),
    ])
}

fn write(root: &Path, key: &str, content: &str) {
    let path = root.join(key);
    fs::create_dir_all(path.parent().expect("key has a parent")).expect("create fixture dir");
    fs::write(path, content).expect("write fixture");
}

struct Setup {
    host: Arc<TemplatingHost>,
    registry: Arc<ContributorRegistry>,
    modules: Arc<StaticModuleDirectory>,
    installer: OverrideInstaller,
}

fn setup() -> Setup {
    let host = Arc::new(TemplatingHost::new());
    let registry = Arc::new(ContributorRegistry::new());
    let modules = Arc::new(StaticModuleDirectory::new());
    let installer = OverrideInstaller::new(
        host.clone(),
        registry.clone(),
        modules.clone(),
        Config::default(),
    );
    Setup {
        host,
        registry,
        modules,
        installer,
    }
}

#[test]
fn contributed_bundle_overrides_host_bundle() {
    let setup = setup();
    setup.registry.add(Arc::new(ContributorA));
    setup.installer.install();

    let props = setup.host.load_bundle("io/acme/Foo", "de", base_props());
    assert_eq!(
        props,
        Properties::from([
            ("greeting".to_string(), "Hallo".to_string()),
            ("farewell".to_string(), "Bye".to_string()),
        ])
    );
}

#[test]
fn empty_registry_changes_nothing() {
    let registry = Arc::new(ContributorRegistry::new());
    let resolver = Resolver::new(registry);
    assert!(resolver
        .resolve("missing.properties", &NamespaceContext::default(), None)
        .is_none());

    let merger = BundleMerger::new(resolver, &Config::default());
    let mut props = base_props();
    merger.merge_into("io/acme/Foo", "de", &mut props);
    assert_eq!(props, base_props());
}

#[test]
fn embedded_bundle_decodes_escapes_and_continuations() {
    let setup = setup();
    setup
        .registry
        .add(Arc::new(EmbeddedContributor::<Bundles>::new().named("bundled")));
    setup.installer.install();

    let props = setup
        .host
        .load_bundle("jar:file:/opt/acme.jar!/io/acme/Foo", "de", base_props());
    assert_eq!(props["greeting"], "Hallo");
    assert_eq!(props["subtitle"], "Willkommen zurück");
    assert_eq!(props["multiline"], "erste zweite");
    assert_eq!(props["farewell"], "Bye");
}

#[test]
fn earlier_registration_takes_precedence() {
    let dir = tempdir().expect("failed to create temp dir");
    write(dir.path(), "io/acme/Foo_fr.properties", "greeting=Salut\n");

    let setup = setup();
    setup.registry.add(Arc::new(DirectoryContributor::new(dir.path())));
    setup.registry.add(Arc::new(EmbeddedContributor::<Bundles>::new()));
    setup.installer.install();

    let props = setup.host.load_bundle("io/acme/Foo", "fr", base_props());
    assert_eq!(props["greeting"], "Salut");

    // Only the embedded set has a German bundle.
    let props = setup.host.load_bundle("io/acme/Foo", "de", base_props());
    assert_eq!(props["greeting"], "Hallo");
}

#[test]
fn fallback_returns_exactly_the_default_lookup() {
    struct HomeOnly;

    impl ResourceContext for HomeOnly {
        fn namespace(&self) -> &str {
            "io.acme"
        }

        fn default_lookup(&self, key: &str) -> Option<LocatedResource> {
            (key == "io/acme/home.properties")
                .then(|| LocatedResource::from_bytes("home:io/acme/home.properties", Vec::new()))
        }
    }

    let registry = Arc::new(ContributorRegistry::with_contributors(vec![Arc::new(ContributorA)]));
    let resolver = Resolver::new(registry);

    let found = resolver.resolve("home.properties", &HomeOnly, None);
    assert_eq!(
        found.map(|r| r.locator().to_string()),
        Some("home:io/acme/home.properties".to_string())
    );
    assert!(resolver.resolve("/elsewhere.properties", &HomeOnly, None).is_none());
}

#[test]
fn localized_resources_route_through_owning_module() {
    let dir = tempdir().expect("failed to create temp dir");
    write(dir.path(), "foo/images/x.png", "module image");
    write(dir.path(), "images/x.png", "webapp image");

    let setup = setup();
    setup.modules.install(ModuleRef::new("foo", "plugin/foo/"));
    setup.registry.add(Arc::new(
        DirectoryContributor::new(dir.path()).with_layout(DirectoryLayout::PerModule),
    ));
    setup.installer.install();

    let module_hit = setup
        .host
        .lookup_localized("plugin/foo/images/x.png")
        .expect("module resource");
    assert_eq!(module_hit.read_all().unwrap(), b"module image");

    let webapp_hit = setup.host.lookup_localized("images/x.png").expect("webapp resource");
    assert_eq!(webapp_hit.read_all().unwrap(), b"webapp image");

    assert!(setup.host.lookup_localized("plugin/foo/missing.png").is_none());
}

#[test]
fn search_path_tracks_registry_changes() {
    let setup = setup();
    setup.modules.install(ModuleRef::new("acme", "plugin/acme/"));
    setup
        .modules
        .assign_owner(ContributorA.implementation(), "acme");

    let sync = setup.installer.install();
    assert!(setup.host.debug_search_path().is_empty());

    let a: Arc<dyn Contributor> = Arc::new(ContributorA);
    setup.registry.add(Arc::clone(&a));
    assert_eq!(sync.rebuild_count(), 1);
    assert_eq!(&*setup.host.debug_search_path(), &["plugin/acme/".to_string()]);

    setup.registry.add(Arc::new(Unowned));
    assert_eq!(sync.rebuild_count(), 2);
    assert_eq!(setup.host.debug_search_path().len(), 1);

    setup.registry.add(Arc::new(ContributorA));
    assert_eq!(sync.rebuild_count(), 3);
    assert_eq!(setup.host.debug_search_path().len(), 1);

    setup.registry.remove(&a);
    assert_eq!(sync.rebuild_count(), 4);
    assert_eq!(setup.host.debug_candidates("help.html"), vec!["plugin/acme/help.html"]);

    setup.registry.replace_all(Vec::new());
    assert_eq!(sync.rebuild_count(), 5);
    assert!(setup.host.debug_search_path().is_empty());
}

#[test]
fn concurrent_lookups_see_whole_snapshots() {
    let setup = setup();
    setup.registry.add(Arc::new(ContributorA));
    setup.installer.install();

    let host = setup.host.clone();
    let registry = setup.registry.clone();
    let stop = Arc::new(AtomicBool::new(false));

    let admin = {
        let stop = stop.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                let extra: Arc<dyn Contributor> = Arc::new(Unowned);
                registry.add(Arc::clone(&extra));
                registry.remove(&extra);
            }
            stop.store(true, Ordering::SeqCst);
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let host = host.clone();
            let stop = stop.clone();
            thread::spawn(move || {
                let mut loads = 0;
                while !stop.load(Ordering::SeqCst) || loads < 50 {
                    let props = host.load_bundle("io/acme/Foo", "de", base_props());
                    assert_eq!(props["greeting"], "Hallo");
                    assert_eq!(props["farewell"], "Bye");
                    loads += 1;
                }
            })
        })
        .collect();

    admin.join().expect("admin thread panicked");
    for reader in readers {
        reader.join().expect("reader thread panicked");
    }
    assert_eq!(setup.registry.len(), 1);
}

#[test]
fn monitor_detects_replacement_and_only_post_dismisses() {
    let state_dir = tempdir().expect("failed to create temp dir");
    let setup = setup();
    setup.modules.install(ModuleRef::new("rival", "plugin/rival/"));
    setup
        .modules
        .assign_owner(PassthroughBundleFactory.implementation(), "rival");
    setup.installer.install();

    let modules: Arc<dyn ModuleDirectory> = setup.modules.clone();
    let monitor = StatusMonitor::new(
        setup.host.clone(),
        modules,
        Some(state_dir.path().to_path_buf()),
    );
    assert!(monitor.is_override_active());
    assert!(!monitor.is_activated());

    setup
        .host
        .update(|slots| slots.bundle_factory = Arc::new(PassthroughBundleFactory));
    assert!(monitor.is_activated());
    assert_eq!(
        monitor.offender().and_then(|o| o.module).map(|m| m.name),
        Some("rival".to_string())
    );

    let get = Request::builder()
        .method(Method::GET)
        .uri("/act?no=1")
        .body(Vec::new())
        .unwrap();
    assert_eq!(monitor.handle(&get).status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(monitor.is_activated());

    let post = Request::builder()
        .method(Method::POST)
        .uri("/act")
        .body(b"no=Dismiss".to_vec())
        .unwrap();
    let response = monitor.handle(&post);
    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(!monitor.is_activated());
    assert!(!monitor.is_override_active());

    // Reinstalling brings the override back.
    setup.installer.install();
    assert!(monitor.is_override_active());
}

#[test]
fn configured_markers_shape_bundle_names() {
    let dir = tempdir().expect("failed to create temp dir");
    let config_path = dir.path().join("settings.toml");
    let custom = Config {
        artifact_marker: Some(".zip!".to_string()),
        ..Config::default()
    };
    config::save_to_path(&custom, &config_path).expect("save config");
    let loaded = config::load_from_path(&config_path).expect("load config");
    assert_eq!(loaded, custom);

    let registry = Arc::new(ContributorRegistry::with_contributors(vec![Arc::new(ContributorA)]));
    let merger = BundleMerger::new(Resolver::new(registry), &loaded);

    let mut props = base_props();
    merger.merge_into("file:/opt/acme.zip!/io/acme/Foo", "de", &mut props);
    assert_eq!(props["greeting"], "Hallo");

    let mut props = base_props();
    merger.merge_into("file:/opt/acme.jar!/io/acme/Foo", "de", &mut props);
    assert_eq!(props["greeting"], "Hello");
}

#[test]
fn trace_records_the_merge() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut collector = DiagnosticsCollector::from_config(&Config::default());
    let setup = setup();
    let installer = OverrideInstaller::new(
        setup.host.clone(),
        setup.registry.clone(),
        setup.modules.clone(),
        Config::default(),
    )
    .with_diagnostics(collector.handle());
    setup.registry.add(Arc::new(Unowned));
    setup.registry.add(Arc::new(ContributorA));
    installer.install();

    let props = setup.host.load_bundle("io/acme/Foo", "de", base_props());
    assert_eq!(props["greeting"], "Hallo");

    collector.process_pending();
    let kinds: Vec<_> = collector.events().map(|e| &e.kind).collect();
    assert!(kinds
        .iter()
        .any(|k| matches!(k, ResolutionEventKind::ContributorMiss { .. })));
    assert!(kinds.iter().any(|k| matches!(
        k,
        ResolutionEventKind::ContributorHit { contributor, .. } if contributor == "A"
    )));
    assert!(kinds.iter().any(|k| matches!(
        k,
        ResolutionEventKind::BundleMerged { keys: 1, .. }
    )));

    let json = collector.export_json().expect("trace serializes");
    assert!(json.contains("bundle_merged"));
}

#[test]
fn host_bundle_factory_is_passthrough_until_installed() {
    let setup = setup();
    setup.registry.add(Arc::new(ContributorA));
    assert_eq!(setup.host.load_bundle("io/acme/Foo", "de", base_props()), base_props());
    assert!(setup
        .host
        .bundle_factory()
        .implementation()
        .ends_with("PassthroughBundleFactory"));
}
