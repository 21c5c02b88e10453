// SPDX-License-Identifier: MPL-2.0
//! Resource contributors.
//!
//! A contributor is a pluggable source of localized resources. The host hands
//! the crate an ordered list of them through the [`ContributorRegistry`]; the
//! first contributor that answers a query wins.
//!
//! Two variants ship with the crate:
//!
//! - [`EmbeddedContributor`]: serves an asset set compiled into the
//!   contributor's own crate. It answers module-scoped queries exactly like
//!   unscoped ones and adds nothing beyond what it embeds.
//! - [`DirectoryContributor`]: serves translation files from a directory on
//!   disk, optionally laid out per module.

mod directory;
mod embedded;
mod registry;

use crate::domain::ModuleRef;
use crate::host::ModuleDirectory;
use crate::resource::LocatedResource;

pub use directory::{DirectoryContributor, DirectoryLayout};
pub use embedded::EmbeddedContributor;
pub use registry::{ContributorRegistry, RegistryListener, Snapshot};

/// A source of localized resources.
///
/// Paths passed to contributors are normalized keys: `/`-delimited, without
/// a leading separator.
pub trait Contributor: Send + Sync {
    /// Looks `path` up in this contributor's resources.
    fn try_get(&self, path: &str) -> Option<LocatedResource>;

    /// Looks `path` up on behalf of `module`, with `path` relative to the
    /// module's base-resource root.
    ///
    /// Contributors without module-aware storage answer as for [`try_get`].
    ///
    /// [`try_get`]: Contributor::try_get
    fn try_get_for_module(&self, path: &str, module: &ModuleRef) -> Option<LocatedResource> {
        let _ = module;
        self.try_get(path)
    }

    /// Name shown in diagnostics. Defaults to [`implementation`].
    ///
    /// [`implementation`]: Contributor::implementation
    fn display_name(&self) -> String {
        self.implementation().to_string()
    }

    /// Fully-qualified identifier of the implementing type. The host's module
    /// directory maps it to the module that shipped the contributor.
    fn implementation(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Module that shipped `contributor`, if the host can tell.
///
/// Used for diagnostics and the debug search path only; resolution never
/// depends on it.
pub fn owner_module(
    contributor: &dyn Contributor,
    modules: &dyn ModuleDirectory,
) -> Option<ModuleRef> {
    modules.identify_owner(contributor.implementation())
}
