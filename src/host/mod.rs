// SPDX-License-Identifier: MPL-2.0
//! The host templating subsystem, as far as this crate touches it.
//!
//! The host owns three override slots: the bundle-construction strategy used
//! for every bundle load, the debug search path consulted by its fallback
//! diagnostic loader, and the locale-driven resource provider used for
//! localized static files. [`TemplatingHost`] holds them together and exposes
//! one update entry point, so every installation is a single, visible
//! transaction rather than writes to scattered globals.

mod modules;

pub use modules::{ModuleDirectory, StaticModuleDirectory};

use crate::bundle::Properties;
use crate::resource::LocatedResource;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Strategy the host uses to finish building a resource bundle.
///
/// The host loads its own defaults for `(base_name, locale)` and hands them to
/// the installed factory, which returns the properties views will render.
pub trait BundleFactory: Any + Send + Sync {
    fn wrap_up(&self, base_name: &str, locale: &str, props: Properties) -> Properties;

    /// Fully-qualified identifier of the implementing type, used to find the
    /// module that installed it.
    fn implementation(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// The host's own strategy: bundles are used as loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughBundleFactory;

impl BundleFactory for PassthroughBundleFactory {
    fn wrap_up(&self, _base_name: &str, _locale: &str, props: Properties) -> Properties {
        props
    }
}

/// Source of localized static resources (help pages, images) addressed by
/// their global path.
pub trait ResourceProvider: Send + Sync {
    fn lookup(&self, path: &str) -> Option<LocatedResource>;
}

/// Contents of the host's override slots.
#[derive(Clone)]
pub struct OverrideSlots {
    pub bundle_factory: Arc<dyn BundleFactory>,
    /// Base-resource roots searched by the fallback diagnostic loader.
    pub debug_search_path: Arc<[String]>,
    pub resource_provider: Option<Arc<dyn ResourceProvider>>,
}

impl Default for OverrideSlots {
    fn default() -> Self {
        Self {
            bundle_factory: Arc::new(PassthroughBundleFactory),
            debug_search_path: Arc::from(Vec::new()),
            resource_provider: None,
        }
    }
}

impl fmt::Debug for OverrideSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideSlots")
            .field("bundle_factory", &self.bundle_factory.implementation())
            .field("debug_search_path", &self.debug_search_path)
            .field("resource_provider", &self.resource_provider.is_some())
            .finish()
    }
}

#[derive(Default)]
pub struct TemplatingHost {
    slots: RwLock<OverrideSlots>,
}

impl TemplatingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current slots.
    pub fn slots(&self) -> OverrideSlots {
        self.slots.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn bundle_factory(&self) -> Arc<dyn BundleFactory> {
        Arc::clone(&self.slots.read().unwrap_or_else(PoisonError::into_inner).bundle_factory)
    }

    pub fn debug_search_path(&self) -> Arc<[String]> {
        Arc::clone(&self.slots.read().unwrap_or_else(PoisonError::into_inner).debug_search_path)
    }

    pub fn resource_provider(&self) -> Option<Arc<dyn ResourceProvider>> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .resource_provider
            .clone()
    }

    /// The single way to change the slots. `apply` runs under the write lock;
    /// readers see either the old slots or the fully updated ones.
    pub fn update<F>(&self, apply: F)
    where
        F: FnOnce(&mut OverrideSlots),
    {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut *slots);
    }

    /// Builds the bundle for `(base_name, locale)` from the host's own
    /// defaults through the installed strategy.
    pub fn load_bundle(&self, base_name: &str, locale: &str, defaults: Properties) -> Properties {
        self.bundle_factory().wrap_up(base_name, locale, defaults)
    }

    /// Looks up a localized static resource through the installed provider.
    pub fn lookup_localized(&self, path: &str) -> Option<LocatedResource> {
        self.resource_provider()?.lookup(path)
    }

    /// Candidate locations the diagnostic loader tries for `key`, one per
    /// search-path root, in order.
    pub fn debug_candidates(&self, key: &str) -> Vec<String> {
        self.debug_search_path()
            .iter()
            .map(|root| format!("{root}{key}"))
            .collect()
    }
}

impl fmt::Debug for TemplatingHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplatingHost").field("slots", &self.slots()).finish()
    }
}
