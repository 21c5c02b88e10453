// SPDX-License-Identifier: MPL-2.0
//! Installed-module lookup supplied by the host's module manager.

use crate::domain::ModuleRef;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// The host's view of installed modules.
///
/// Ownership of a piece of code is host-specific knowledge; this crate never
/// tries to work it out on its own.
pub trait ModuleDirectory: Send + Sync {
    /// Installed modules in the host's iteration order.
    fn installed_modules(&self) -> Vec<ModuleRef>;

    /// Module that shipped the type named `implementation`, if known.
    fn identify_owner(&self, implementation: &str) -> Option<ModuleRef>;
}

#[derive(Default)]
struct Inventory {
    modules: Vec<ModuleRef>,
    owners: HashMap<String, String>,
}

/// In-memory [`ModuleDirectory`] the host populates as modules come and go.
#[derive(Default)]
pub struct StaticModuleDirectory {
    inventory: RwLock<Inventory>,
}

impl StaticModuleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `module`, replacing any module with the same name in place.
    pub fn install(&self, module: ModuleRef) {
        let mut inventory = self.inventory.write().unwrap_or_else(PoisonError::into_inner);
        match inventory.modules.iter_mut().find(|m| m.name == module.name) {
            Some(existing) => *existing = module,
            None => inventory.modules.push(module),
        }
    }

    /// Uninstalls the module called `name` and forgets the types it owned.
    pub fn uninstall(&self, name: &str) -> bool {
        let mut inventory = self.inventory.write().unwrap_or_else(PoisonError::into_inner);
        let before = inventory.modules.len();
        inventory.modules.retain(|m| m.name != name);
        inventory.owners.retain(|_, owner| owner != name);
        inventory.modules.len() != before
    }

    /// Records that `implementation` ships with the module called `module`.
    pub fn assign_owner(&self, implementation: &str, module: &str) {
        self.inventory
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .owners
            .insert(implementation.to_string(), module.to_string());
    }
}

impl ModuleDirectory for StaticModuleDirectory {
    fn installed_modules(&self) -> Vec<ModuleRef> {
        self.inventory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .modules
            .clone()
    }

    fn identify_owner(&self, implementation: &str) -> Option<ModuleRef> {
        let inventory = self.inventory.read().unwrap_or_else(PoisonError::into_inner);
        let owner = inventory.owners.get(implementation)?;
        inventory.modules.iter().find(|m| &m.name == owner).cloned()
    }
}
