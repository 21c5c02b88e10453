// SPDX-License-Identifier: MPL-2.0
use crate::host::{ModuleDirectory, ResourceProvider};
use crate::resolver::Resolver;
use crate::resource::LocatedResource;
use std::sync::Arc;

/// Locale-driven resource provider that routes each path to the module it
/// belongs to before walking the contributor chain.
///
/// Installed modules are read from the host on every lookup, so modules
/// installed after startup are routed correctly.
pub struct ModuleResourceProvider {
    resolver: Resolver,
    modules: Arc<dyn ModuleDirectory>,
}

impl ModuleResourceProvider {
    pub fn new(resolver: Resolver, modules: Arc<dyn ModuleDirectory>) -> Self {
        Self { resolver, modules }
    }
}

impl ResourceProvider for ModuleResourceProvider {
    fn lookup(&self, path: &str) -> Option<LocatedResource> {
        self.resolver
            .lookup_scoped(path, &self.modules.installed_modules())
    }
}
