// SPDX-License-Identifier: MPL-2.0
//! `l10n_overlay` lets independently registered contributors override a host
//! application's localized resources.
//!
//! Contributors are consulted in registration order and the first one that
//! has a resource wins; when none has it, the host's own lookup applies
//! unchanged. Contributed `.properties` bundles are merged over the host's
//! bundles key by key. A status monitor tells operators when another module
//! has displaced the override.
//!
//! ```
//! use l10n_overlay::bundle::{BundleMerger, Properties};
//! use l10n_overlay::config::Config;
//! use l10n_overlay::contributor::{Contributor, ContributorRegistry};
//! use l10n_overlay::resolver::Resolver;
//! use l10n_overlay::resource::LocatedResource;
//! use std::sync::Arc;
//!
//! struct German;
//!
//! impl Contributor for German {
//!     fn try_get(&self, path: &str) -> Option<LocatedResource> {
//!         (path == "io/acme/Foo_de.properties")
//!             .then(|| LocatedResource::from_bytes("mem:de", b"greeting=Hallo".to_vec()))
//!     }
//! }
//!
//! let registry = Arc::new(ContributorRegistry::new());
//! registry.add(Arc::new(German));
//! let merger = BundleMerger::new(Resolver::new(registry), &Config::default());
//!
//! let mut props = Properties::from([("greeting".to_string(), "Hello".to_string())]);
//! merger.merge_into("io/acme/Foo", "de", &mut props);
//! assert_eq!(props["greeting"], "Hallo");
//! ```

pub mod bundle;
pub mod config;
pub mod contributor;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod host;
pub mod monitor;
pub mod override_point;
pub mod paths;
pub mod properties;
pub mod resolver;
pub mod resource;

pub use error::{Error, Result};
