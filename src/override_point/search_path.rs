// SPDX-License-Identifier: MPL-2.0
//! The debug search path and its synchronisation with the registry.

use crate::contributor::{self, Contributor, ContributorRegistry, RegistryListener};
use crate::diagnostics::{self, DiagnosticsHandle, ResolutionEventKind};
use crate::host::{ModuleDirectory, TemplatingHost};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Base-resource roots of the modules that ship `contributors`, in
/// contributor order.
///
/// Contributors whose owner the host cannot name are left out. A module that
/// ships several contributors appears once, at its first position.
pub fn build_debug_search_path(
    contributors: &[Arc<dyn Contributor>],
    modules: &dyn ModuleDirectory,
) -> Vec<String> {
    let mut seen = HashSet::new();
    contributors
        .iter()
        .filter_map(|c| contributor::owner_module(c.as_ref(), modules))
        .map(|module| module.base_resource_root)
        .filter(|root| seen.insert(root.clone()))
        .collect()
}

/// Registry listener that rebuilds the host's debug search path.
///
/// Rebuilds are serialized; each one writes the path for the registry
/// contents it was handed, so the host always ends up with the latest.
pub struct SearchPathSync {
    host: Arc<TemplatingHost>,
    modules: Arc<dyn ModuleDirectory>,
    diagnostics: Option<DiagnosticsHandle>,
    rebuilding: Mutex<()>,
    rebuilds: AtomicUsize,
}

impl SearchPathSync {
    pub fn new(
        host: Arc<TemplatingHost>,
        modules: Arc<dyn ModuleDirectory>,
        diagnostics: Option<DiagnosticsHandle>,
    ) -> Self {
        Self {
            host,
            modules,
            diagnostics,
            rebuilding: Mutex::new(()),
            rebuilds: AtomicUsize::new(0),
        }
    }

    /// Number of rebuilds triggered by registry changes so far.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds.load(Ordering::SeqCst)
    }

    /// Writes the path for the registry's current contents.
    pub fn refresh(&self, registry: &ContributorRegistry) {
        let _serialized = self.rebuilding.lock().unwrap_or_else(PoisonError::into_inner);
        self.apply(&registry.snapshot());
    }

    fn apply(&self, contributors: &[Arc<dyn Contributor>]) -> usize {
        let path = build_debug_search_path(contributors, self.modules.as_ref());
        let entries = path.len();
        log::debug!(
            "Debug search path rebuilt from {} contributor(s): {:?}",
            contributors.len(),
            path
        );
        self.host
            .update(|slots| slots.debug_search_path = Arc::from(path));
        entries
    }
}

impl RegistryListener for SearchPathSync {
    fn on_change(&self, contributors: &[Arc<dyn Contributor>]) {
        let _serialized = self.rebuilding.lock().unwrap_or_else(PoisonError::into_inner);
        let entries = self.apply(contributors);
        self.rebuilds.fetch_add(1, Ordering::SeqCst);
        diagnostics::record(
            self.diagnostics.as_ref(),
            ResolutionEventKind::SearchPathRebuilt { entries },
        );
    }
}
