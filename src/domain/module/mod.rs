// SPDX-License-Identifier: MPL-2.0
//! Installed modules and module-scope routing.
//!
//! Every installed module exposes its resources under a base-resource root,
//! a URL-like prefix such as `plugin/foo/`. A global resource path that starts
//! with a module's root is looked up relative to that module; any other path
//! is looked up from the web application root.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An installed module of the host application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleRef {
    /// Short name of the module (e.g. `acme-l10n`).
    pub name: String,
    /// Prefix under which the module's resources are addressed.
    pub base_resource_root: String,
}

impl ModuleRef {
    pub fn new(name: impl Into<String>, base_resource_root: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_resource_root: base_resource_root.into(),
        }
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Where a global resource path should be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// Inside `module`, with `key` relative to its base-resource root.
    Module { module: &'a ModuleRef, key: &'a str },
    /// From the web application root, with the path unchanged.
    WebApp { key: &'a str },
}

impl<'a> Scope<'a> {
    /// Routes `path` to the first module whose base-resource root is a literal
    /// prefix of it.
    ///
    /// The host's addressing scheme keeps roots from nesting, so at most one
    /// module matches; if two ever did, the first in `modules` order wins.
    /// Modules with an empty root are skipped since they would claim every path.
    ///
    /// ```
    /// use l10n_overlay::domain::{ModuleRef, Scope};
    ///
    /// let modules = vec![ModuleRef::new("foo", "plugin/foo/")];
    /// match Scope::of("plugin/foo/images/x.png", &modules) {
    ///     Scope::Module { module, key } => {
    ///         assert_eq!(module.name, "foo");
    ///         assert_eq!(key, "images/x.png");
    ///     }
    ///     Scope::WebApp { .. } => unreachable!(),
    /// }
    /// ```
    #[must_use]
    pub fn of(path: &'a str, modules: &'a [ModuleRef]) -> Self {
        modules
            .iter()
            .filter(|module| !module.base_resource_root.is_empty())
            .find_map(|module| {
                path.strip_prefix(module.base_resource_root.as_str())
                    .map(|key| Scope::Module { module, key })
            })
            .unwrap_or(Scope::WebApp { key: path })
    }

    /// The key handed to contributors.
    #[must_use]
    pub fn key(&self) -> &'a str {
        match self {
            Scope::Module { key, .. } | Scope::WebApp { key } => key,
        }
    }
}
