// SPDX-License-Identifier: MPL-2.0
//! Ordered registry of contributors with snapshot iteration.
//!
//! Readers take a [`Snapshot`], an immutable list that later additions or
//! removals never touch, so a resolution pass sees the registry either
//! entirely before or entirely after any concurrent change. Writers build a new
//! list and swap it in.
//!
//! Changes are serialized: a mutation and the listener notifications it
//! triggers finish before the next mutation starts. Listeners therefore run
//! one at a time and always observe changes in order. A listener must not
//! mutate the registry it listens to.

use super::Contributor;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Immutable view of the registry at one point in time, in registration order.
pub type Snapshot = Arc<[Arc<dyn Contributor>]>;

/// Receives a notification after every change to the registry.
pub trait RegistryListener: Send + Sync {
    /// Called once per change with the registry's new contents.
    fn on_change(&self, contributors: &[Arc<dyn Contributor>]);
}

pub struct ContributorRegistry {
    current: RwLock<Snapshot>,
    listeners: RwLock<Vec<Arc<dyn RegistryListener>>>,
    changes: Mutex<()>,
}

impl Default for ContributorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContributorRegistry {
    pub fn new() -> Self {
        Self::with_contributors(Vec::new())
    }

    /// Creates a registry holding `contributors` in the given order.
    pub fn with_contributors(contributors: Vec<Arc<dyn Contributor>>) -> Self {
        Self {
            current: RwLock::new(Snapshot::from(contributors)),
            listeners: RwLock::new(Vec::new()),
            changes: Mutex::new(()),
        }
    }

    /// Current contents, in registration order.
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Registers `listener` for all future changes.
    pub fn subscribe(&self, listener: Arc<dyn RegistryListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Appends `contributor`; it ranks after everything already registered.
    pub fn add(&self, contributor: Arc<dyn Contributor>) {
        self.change(|current| {
            let mut next = current.to_vec();
            next.push(contributor);
            Some(next)
        });
    }

    /// Removes `contributor` (compared by identity). Returns whether it was
    /// registered; nothing is notified otherwise.
    pub fn remove(&self, contributor: &Arc<dyn Contributor>) -> bool {
        self.change(|current| {
            let next: Vec<_> = current
                .iter()
                .filter(|c| !Arc::ptr_eq(*c, contributor))
                .cloned()
                .collect();
            (next.len() != current.len()).then_some(next)
        })
    }

    /// Removes every contributor whose display name is `name`.
    pub fn remove_named(&self, name: &str) -> bool {
        self.change(|current| {
            let next: Vec<_> = current
                .iter()
                .filter(|c| c.display_name() != name)
                .cloned()
                .collect();
            (next.len() != current.len()).then_some(next)
        })
    }

    /// Replaces the whole registry with the host's current discovery result.
    /// Counts as a single change.
    pub fn replace_all(&self, contributors: Vec<Arc<dyn Contributor>>) {
        self.change(|_| Some(contributors));
    }

    /// Applies `update` to the current contents and, if it produced new
    /// contents, swaps them in and notifies listeners.
    fn change<F>(&self, update: F) -> bool
    where
        F: FnOnce(&[Arc<dyn Contributor>]) -> Option<Vec<Arc<dyn Contributor>>>,
    {
        let _serialized = self.changes.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.snapshot();
        let Some(next) = update(&current[..]) else {
            return false;
        };
        let next = Snapshot::from(next);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);

        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener.on_change(&next);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::LocatedResource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Named(&'static str);

    impl Contributor for Named {
        fn try_get(&self, _path: &str) -> Option<LocatedResource> {
            None
        }

        fn display_name(&self) -> String {
            self.0.to_string()
        }
    }

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
        last_len: AtomicUsize,
    }

    impl RegistryListener for Counting {
        fn on_change(&self, contributors: &[Arc<dyn Contributor>]) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_len.store(contributors.len(), Ordering::SeqCst);
        }
    }

    fn names(snapshot: &Snapshot) -> Vec<String> {
        snapshot.iter().map(|c| c.display_name()).collect()
    }

    #[test]
    fn preserves_registration_order() {
        let registry = ContributorRegistry::new();
        registry.add(Arc::new(Named("a")));
        registry.add(Arc::new(Named("b")));
        registry.add(Arc::new(Named("c")));
        assert_eq!(names(&registry.snapshot()), vec!["a", "b", "c"]);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_changes() {
        let registry = ContributorRegistry::new();
        let a: Arc<dyn Contributor> = Arc::new(Named("a"));
        registry.add(Arc::clone(&a));
        let before = registry.snapshot();

        registry.add(Arc::new(Named("b")));
        registry.remove(&a);

        assert_eq!(names(&before), vec!["a"]);
        assert_eq!(names(&registry.snapshot()), vec!["b"]);
    }

    #[test]
    fn each_change_notifies_exactly_once() {
        let registry = ContributorRegistry::new();
        let listener = Arc::new(Counting::default());
        registry.subscribe(listener.clone());

        let a: Arc<dyn Contributor> = Arc::new(Named("a"));
        registry.add(Arc::clone(&a));
        registry.add(Arc::new(Named("b")));
        assert_eq!(listener.calls.load(Ordering::SeqCst), 2);
        assert_eq!(listener.last_len.load(Ordering::SeqCst), 2);

        assert!(registry.remove(&a));
        assert_eq!(listener.calls.load(Ordering::SeqCst), 3);
        assert_eq!(listener.last_len.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn removing_unknown_contributor_is_not_a_change() {
        let registry = ContributorRegistry::new();
        let listener = Arc::new(Counting::default());
        registry.subscribe(listener.clone());

        let stranger: Arc<dyn Contributor> = Arc::new(Named("x"));
        assert!(!registry.remove(&stranger));
        assert!(!registry.remove_named("x"));
        assert_eq!(listener.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn remove_compares_identity_not_name() {
        let registry = ContributorRegistry::new();
        let first: Arc<dyn Contributor> = Arc::new(Named("same"));
        let second: Arc<dyn Contributor> = Arc::new(Named("same"));
        registry.add(Arc::clone(&first));
        registry.add(Arc::clone(&second));

        assert!(registry.remove(&first));
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(&registry.snapshot()[0], &second));
    }

    #[test]
    fn remove_named_drops_all_matches() {
        let registry = ContributorRegistry::with_contributors(vec![
            Arc::new(Named("dup")),
            Arc::new(Named("keep")),
            Arc::new(Named("dup")),
        ]);
        assert!(registry.remove_named("dup"));
        assert_eq!(names(&registry.snapshot()), vec!["keep"]);
    }

    #[test]
    fn replace_all_is_a_single_change() {
        let registry = ContributorRegistry::new();
        let listener = Arc::new(Counting::default());
        registry.subscribe(listener.clone());

        registry.replace_all(vec![Arc::new(Named("x")), Arc::new(Named("y"))]);
        assert_eq!(listener.calls.load(Ordering::SeqCst), 1);
        assert_eq!(names(&registry.snapshot()), vec!["x", "y"]);
        assert!(!registry.is_empty());
    }
}
