//! Document-level listener registry
//!
//! The terminal has a single event stream, so "global" listeners are modelled
//! as entries in a shared table. A component attaches through its own
//! [`ListenerHandle`]; the handle detaches everything it still holds when it
//! is dropped, which keeps registrations scoped to the component's lifetime.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Kinds of window-level events a component can listen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Keyboard,
    PointerDown,
    Resize,
    Scroll,
}

/// Identity of a listener owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(Uuid);

impl OwnerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.0.to_string();
        write!(f, "{}", &id[..8])
    }
}

/// Shared table of active listeners
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    entries: Arc<Mutex<HashSet<(OwnerId, ListenerKind)>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Returns `false` if it was already registered.
    pub fn attach(&self, owner: OwnerId, kind: ListenerKind) -> bool {
        let inserted = self.entries.lock().insert((owner, kind));
        if inserted {
            debug!("listener attached: {} {:?}", owner, kind);
        }
        inserted
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn detach(&self, owner: OwnerId, kind: ListenerKind) -> bool {
        let removed = self.entries.lock().remove(&(owner, kind));
        if removed {
            debug!("listener detached: {} {:?}", owner, kind);
        }
        removed
    }

    /// Remove every listener held by `owner`, returning how many were removed.
    pub fn detach_all(&self, owner: OwnerId) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(entry_owner, _)| *entry_owner != owner);
        let removed = before - entries.len();
        if removed > 0 {
            debug!("{} listeners detached for {}", removed, owner);
        }
        removed
    }

    pub fn is_attached(&self, owner: OwnerId, kind: ListenerKind) -> bool {
        self.entries.lock().contains(&(owner, kind))
    }

    /// Number of registered listeners of a kind
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|(_, entry_kind)| *entry_kind == kind)
            .count()
    }

    pub fn total(&self) -> usize {
        self.entries.lock().len()
    }

    /// Create a handle bound to a fresh owner id
    pub fn handle(&self) -> ListenerHandle {
        ListenerHandle {
            registry: self.clone(),
            owner: OwnerId::new(),
        }
    }
}

/// A component's view of the registry
#[derive(Debug)]
pub struct ListenerHandle {
    registry: ListenerRegistry,
    owner: OwnerId,
}

impl ListenerHandle {
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn attach(&self, kind: ListenerKind) -> bool {
        self.registry.attach(self.owner, kind)
    }

    pub fn attach_all(&self, kinds: &[ListenerKind]) {
        for kind in kinds {
            self.attach(*kind);
        }
    }

    pub fn detach(&self, kind: ListenerKind) -> bool {
        self.registry.detach(self.owner, kind)
    }

    pub fn detach_all(&self) -> usize {
        self.registry.detach_all(self.owner)
    }

    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.registry.is_attached(self.owner, kind)
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.registry.detach_all(self.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_is_idempotent() {
        let registry = ListenerRegistry::new();
        let handle = registry.handle();

        assert!(handle.attach(ListenerKind::Keyboard));
        assert!(!handle.attach(ListenerKind::Keyboard));
        assert_eq!(registry.count(ListenerKind::Keyboard), 1);

        assert!(handle.detach(ListenerKind::Keyboard));
        assert!(!handle.detach(ListenerKind::Keyboard));
        assert_eq!(registry.total(), 0);
    }

    #[test]
    fn test_drop_detaches_everything() {
        let registry = ListenerRegistry::new();
        {
            let handle = registry.handle();
            handle.attach_all(&[ListenerKind::PointerDown, ListenerKind::Scroll]);
            assert_eq!(registry.total(), 2);
        }
        assert_eq!(registry.total(), 0);
    }

    #[test]
    fn test_owners_are_independent() {
        let registry = ListenerRegistry::new();
        let first = registry.handle();
        let second = registry.handle();

        first.attach(ListenerKind::Resize);
        second.attach(ListenerKind::Resize);
        assert_eq!(registry.count(ListenerKind::Resize), 2);

        first.detach_all();
        assert!(!first.is_attached(ListenerKind::Resize));
        assert!(second.is_attached(ListenerKind::Resize));
    }
}
