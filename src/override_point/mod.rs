// SPDX-License-Identifier: MPL-2.0
//! Taking over the host's bundle and resource lookups.
//!
//! [`OverrideInstaller::install`] runs once at startup. It swaps the host's
//! bundle strategy for an [`OverrideBundleFactory`], installs a
//! [`ModuleResourceProvider`] for localized static files, publishes the debug
//! search path, and keeps that path in step with the contributor registry.

mod factory;
mod provider;
mod search_path;

pub use factory::OverrideBundleFactory;
pub use provider::ModuleResourceProvider;
pub use search_path::{build_debug_search_path, SearchPathSync};

use crate::bundle::BundleMerger;
use crate::config::Config;
use crate::contributor::ContributorRegistry;
use crate::diagnostics::DiagnosticsHandle;
use crate::host::{BundleFactory, ModuleDirectory, ResourceProvider, TemplatingHost};
use crate::resolver::Resolver;
use std::sync::{Arc, OnceLock};

pub struct OverrideInstaller {
    host: Arc<TemplatingHost>,
    registry: Arc<ContributorRegistry>,
    modules: Arc<dyn ModuleDirectory>,
    config: Config,
    diagnostics: Option<DiagnosticsHandle>,
    sync: OnceLock<Arc<SearchPathSync>>,
}

impl OverrideInstaller {
    pub fn new(
        host: Arc<TemplatingHost>,
        registry: Arc<ContributorRegistry>,
        modules: Arc<dyn ModuleDirectory>,
        config: Config,
    ) -> Self {
        Self {
            host,
            registry,
            modules,
            config,
            diagnostics: None,
            sync: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    /// Installs the override into the host.
    ///
    /// Calling it again reinstalls fresh strategies (undoing a foreign
    /// replacement) but never subscribes a second listener, so registry
    /// changes still rebuild the search path exactly once each.
    pub fn install(&self) -> Arc<SearchPathSync> {
        let mut resolver = Resolver::new(Arc::clone(&self.registry));
        if let Some(handle) = &self.diagnostics {
            resolver = resolver.with_diagnostics(handle.clone());
        }

        let factory: Arc<dyn BundleFactory> = Arc::new(OverrideBundleFactory::new(BundleMerger::new(
            resolver.clone(),
            &self.config,
        )));
        let provider: Arc<dyn ResourceProvider> =
            Arc::new(ModuleResourceProvider::new(resolver, Arc::clone(&self.modules)));
        self.host.update(|slots| {
            slots.bundle_factory = factory;
            slots.resource_provider = Some(provider);
        });

        let sync = Arc::clone(self.sync.get_or_init(|| {
            let sync = Arc::new(SearchPathSync::new(
                Arc::clone(&self.host),
                Arc::clone(&self.modules),
                self.diagnostics.clone(),
            ));
            self.registry.subscribe(sync.clone());
            sync
        }));
        sync.refresh(&self.registry);

        log::debug!(
            "Installed bundle override with {} contributor(s)",
            self.registry.len()
        );
        sync
    }

    /// The search-path listener, once [`install`](Self::install) has run.
    pub fn search_path_sync(&self) -> Option<&Arc<SearchPathSync>> {
        self.sync.get()
    }
}
