// SPDX-License-Identifier: MPL-2.0
use super::Contributor;
use crate::domain::ModuleRef;
use crate::resource::LocatedResource;
use std::path::{Component, Path, PathBuf};

/// How a [`DirectoryContributor`] lays out its files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryLayout {
    /// One tree for everything; module-scoped queries search it too.
    #[default]
    Flat,
    /// Global resources at the root, each module's resources under
    /// `<root>/<module name>/`. Module-scoped queries only search the
    /// module's own subtree.
    PerModule,
}

/// Contributor serving translation files from a local directory.
#[derive(Debug, Clone)]
pub struct DirectoryContributor {
    name: String,
    root: PathBuf,
    layout: DirectoryLayout,
}

impl DirectoryContributor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            name: format!("directory:{}", root.display()),
            root,
            layout: DirectoryLayout::Flat,
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: DirectoryLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn find_under(base: &Path, key: &str) -> Option<LocatedResource> {
        let relative = Path::new(key);
        // Keys that could escape the base directory are never served.
        if key.is_empty() || !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }
        let candidate = base.join(relative);
        candidate.is_file().then(|| LocatedResource::file(candidate))
    }
}

impl Contributor for DirectoryContributor {
    fn try_get(&self, path: &str) -> Option<LocatedResource> {
        Self::find_under(&self.root, path)
    }

    fn try_get_for_module(&self, path: &str, module: &ModuleRef) -> Option<LocatedResource> {
        match self.layout {
            DirectoryLayout::Flat => self.try_get(path),
            DirectoryLayout::PerModule => {
                let module_dir = Path::new(&module.name);
                if !module_dir.components().all(|c| matches!(c, Component::Normal(_))) {
                    return None;
                }
                Self::find_under(&self.root.join(module_dir), path)
            }
        }
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}
