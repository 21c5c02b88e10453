// SPDX-License-Identifier: MPL-2.0
//! Contributor chain resolution.
//!
//! A request is normalized into a key, then offered to each registered
//! contributor in registration order. The first contributor to answer wins and
//! nobody after it is asked. When nobody answers, the calling context's own
//! lookup decides, so an empty registry behaves exactly like no override at
//! all.
//!
//! Every pass walks one registry [`Snapshot`](crate::contributor::Snapshot):
//! a contributor added or removed mid-pass is seen either not at all or for
//! the whole pass.

use crate::contributor::ContributorRegistry;
use crate::diagnostics::{self, DiagnosticsHandle, ResolutionEventKind};
use crate::domain::{ModuleRef, ResourcePath, Scope};
use crate::resource::LocatedResource;
use std::sync::Arc;

/// The caller's side of a lookup: where relative requests are anchored and
/// what to return when no contributor answers.
pub trait ResourceContext {
    /// Dotted namespace relative requests resolve against (e.g. `io.acme`).
    fn namespace(&self) -> &str;

    /// The unoverridden lookup for an already-normalized key.
    fn default_lookup(&self, key: &str) -> Option<LocatedResource>;
}

/// A context with a fixed namespace and no resources of its own.
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext {
    namespace: String,
}

impl NamespaceContext {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

impl ResourceContext for NamespaceContext {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn default_lookup(&self, _key: &str) -> Option<LocatedResource> {
        None
    }
}

#[derive(Clone)]
pub struct Resolver {
    registry: Arc<ContributorRegistry>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Resolver {
    pub fn new(registry: Arc<ContributorRegistry>) -> Self {
        Self {
            registry,
            diagnostics: None,
        }
    }

    /// Records every resolution step on `handle`.
    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    pub(crate) fn diagnostics(&self) -> Option<&DiagnosticsHandle> {
        self.diagnostics.as_ref()
    }

    /// Resolves `request` for `context`, optionally on behalf of `module`.
    ///
    /// A request with a leading `/` is absolute and loses exactly that one
    /// separator; any other request is anchored at the context's namespace.
    /// Falls back to [`ResourceContext::default_lookup`] when no contributor
    /// has the resource.
    pub fn resolve(
        &self,
        request: &str,
        context: &dyn ResourceContext,
        module: Option<&ModuleRef>,
    ) -> Option<LocatedResource> {
        let path = ResourcePath::normalize(request, context.namespace());
        if let Some(found) = self.walk(path.as_str(), module) {
            return Some(found);
        }

        let fallback = context.default_lookup(path.as_str());
        log::debug!(
            "No contributor has '{}'; default lookup {}",
            path,
            if fallback.is_some() { "found it" } else { "found nothing" }
        );
        diagnostics::record(
            self.diagnostics(),
            ResolutionEventKind::FallbackUsed {
                path: path.to_string(),
                found: fallback.is_some(),
            },
        );
        fallback
    }

    /// Looks up a global resource path, routing it to the module whose
    /// base-resource root prefixes it. Only contributors are consulted.
    pub fn lookup_scoped(&self, full_path: &str, modules: &[ModuleRef]) -> Option<LocatedResource> {
        let scope = Scope::of(full_path, modules);
        let module = match scope {
            Scope::Module { module, key } => {
                log::debug!("Looking up localized file '{key}' from module '{module}'");
                Some(module)
            }
            Scope::WebApp { key } => {
                log::debug!("Looking up localized file '{key}' from the web application root");
                None
            }
        };

        let found = self.walk(scope.key(), module);
        if found.is_none() {
            log::debug!("Failed to find localized file '{}'", scope.key());
        }
        found
    }

    /// Offers `key` to each contributor of one snapshot until one answers.
    fn walk(&self, key: &str, module: Option<&ModuleRef>) -> Option<LocatedResource> {
        diagnostics::record(
            self.diagnostics(),
            ResolutionEventKind::LookupStarted {
                path: key.to_string(),
                module: module.map(|m| m.name.clone()),
            },
        );

        let snapshot = self.registry.snapshot();
        for contributor in snapshot.iter() {
            let found = match module {
                Some(module) => contributor.try_get_for_module(key, module),
                None => contributor.try_get(key),
            };
            match found {
                Some(resource) => {
                    log::debug!(
                        "Found localized file '{key}' in {} at {}",
                        contributor.display_name(),
                        resource.locator()
                    );
                    diagnostics::record(
                        self.diagnostics(),
                        ResolutionEventKind::ContributorHit {
                            path: key.to_string(),
                            contributor: contributor.display_name(),
                            locator: resource.locator().to_string(),
                        },
                    );
                    return Some(resource);
                }
                None => diagnostics::record(
                    self.diagnostics(),
                    ResolutionEventKind::ContributorMiss {
                        path: key.to_string(),
                        contributor: contributor.display_name(),
                    },
                ),
            }
        }
        None
    }
}
