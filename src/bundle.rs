// SPDX-License-Identifier: MPL-2.0
//! Merging contributed bundles over the host's own properties.
//!
//! The host asks for a bundle by base name, which is often a full location
//! (`file:/opt/app/acme.jar!/io/acme/Foo` or
//! `/work/acme/src/main/resources/io/acme/Foo`). The merger reduces it to the
//! canonical name `/io/acme/Foo`, resolves `/io/acme/Foo_<locale>.properties`
//! through the contributor chain and lets every contributed entry override the
//! host's value for the same key.
//!
//! A base name that carries neither marker and is not itself a plain key
//! reduces to the empty name, so the request becomes `_<locale>.properties`
//! relative to this module's namespace. That broad fallback is long-standing
//! behavior and is kept, but it is almost never what the caller meant; a
//! debug message flags every such lookup.

use crate::config::Config;
use crate::diagnostics::{self, ResolutionEventKind};
use crate::properties;
use crate::resolver::{ResourceContext, Resolver};
use crate::resource::LocatedResource;
use std::collections::HashMap;

/// Key/value set of one (base name, locale) bundle.
pub type Properties = HashMap<String, String>;

/// The merger's own lookup context. Relative requests resolve against this
/// module's path; the crate ships no bundles, so the default lookup is empty.
struct MergerContext {
    namespace: String,
}

impl ResourceContext for MergerContext {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn default_lookup(&self, _key: &str) -> Option<LocatedResource> {
        None
    }
}

pub struct BundleMerger {
    resolver: Resolver,
    artifact_marker: String,
    development_marker: String,
    extension: String,
    context: MergerContext,
}

impl BundleMerger {
    pub fn new(resolver: Resolver, config: &Config) -> Self {
        Self {
            resolver,
            artifact_marker: config.artifact_marker().to_string(),
            development_marker: config.development_marker().to_string(),
            extension: config.bundle_extension().to_string(),
            context: MergerContext {
                namespace: module_path!().replace("::", "."),
            },
        }
    }

    /// Canonical bundle name for `base_name`.
    ///
    /// Whatever follows the artifact marker, or else the development marker,
    /// is the name. A base name that already is a plain key
    /// (`io/acme/Foo`) is its own name. Anything else yields `""`.
    ///
    /// ```
    /// use l10n_overlay::bundle::BundleMerger;
    /// use l10n_overlay::config::Config;
    /// use l10n_overlay::contributor::ContributorRegistry;
    /// use l10n_overlay::resolver::Resolver;
    /// use std::sync::Arc;
    ///
    /// let merger = BundleMerger::new(
    ///     Resolver::new(Arc::new(ContributorRegistry::new())),
    ///     &Config::default(),
    /// );
    /// assert_eq!(merger.canonical_bundle_name("file:/opt/acme.jar!/io/acme/Foo"), "/io/acme/Foo");
    /// assert_eq!(merger.canonical_bundle_name("io/acme/Foo"), "io/acme/Foo");
    /// assert_eq!(merger.canonical_bundle_name("file:/opt/acme/Foo"), "");
    /// ```
    pub fn canonical_bundle_name<'a>(&self, base_name: &'a str) -> &'a str {
        after_marker(base_name, &self.artifact_marker)
            .or_else(|| after_marker(base_name, &self.development_marker))
            .or_else(|| is_plain_key(base_name).then_some(base_name))
            .unwrap_or("")
    }

    /// Request resolved for `(base_name, locale)`.
    ///
    /// A non-empty canonical name is absolute; the empty one is left relative.
    pub fn bundle_request(&self, base_name: &str, locale: &str) -> String {
        let name = self.canonical_bundle_name(base_name);
        let file = format!("{name}_{locale}.{}", self.extension);
        if name.is_empty() || name.starts_with('/') {
            file
        } else {
            format!("/{file}")
        }
    }

    /// Overlays the contributed bundle for `(base_name, locale)` onto `props`.
    ///
    /// Contributed values replace existing ones; keys the bundle does not
    /// define are kept. A missing bundle leaves `props` as it was, and so does
    /// one that cannot be read or parsed: the problem is logged and the host
    /// keeps its own text. The bundle is parsed in full before the first
    /// entry is applied, so `props` is never left half-merged.
    pub fn merge_into<'p>(
        &self,
        base_name: &str,
        locale: &str,
        props: &'p mut Properties,
    ) -> &'p mut Properties {
        let request = self.bundle_request(base_name, locale);
        if self.canonical_bundle_name(base_name).is_empty() {
            log::debug!("Base name '{base_name}' has no recognizable root; looking up '{request}'");
        }

        let Some(resource) = self.resolver.resolve(&request, &self.context, None) else {
            return props;
        };

        match properties::read(&resource) {
            Ok(entries) => {
                let keys = entries.len();
                props.extend(entries);
                diagnostics::record(
                    self.resolver.diagnostics(),
                    ResolutionEventKind::BundleMerged { bundle: request, keys },
                );
            }
            Err(err) => {
                log::warn!("Failed to load localized resources file {request}: {err}");
                diagnostics::record(
                    self.resolver.diagnostics(),
                    ResolutionEventKind::BundleUnreadable {
                        bundle: request,
                        message: err.to_string(),
                    },
                );
            }
        }
        props
    }
}

fn after_marker<'a>(base_name: &'a str, marker: &str) -> Option<&'a str> {
    base_name
        .find(marker)
        .map(|at| &base_name[at + marker.len()..])
}

/// `io/acme/Foo` rather than a URL, a filesystem path or an empty string.
fn is_plain_key(base_name: &str) -> bool {
    !base_name.is_empty() && !base_name.starts_with('/') && !base_name.contains(':')
}
