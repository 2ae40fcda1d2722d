use std::sync::{Arc, PoisonError, RwLock, Weak};

use tracing::trace;

/// A zero-argument change callback.
///
/// Identity is the `Arc` allocation: clones of the same `Listener` are the
/// same listener for removal purposes, two separately allocated closures are
/// not, even when their bodies are identical.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Copy-on-write listener sequence shared by a store and its unsubscribe
/// handles.
///
/// Writers never touch a published sequence: they build a new `Vec` and swap
/// the `Arc`. A notification cycle clones the `Arc` and iterates that, so
/// subscriptions made or dropped mid-cycle only show up in the next cycle.
pub(crate) struct ListenerRegistry {
    listeners: RwLock<Arc<Vec<Listener>>>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self {
            listeners: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// The sequence as of now. Later mutations do not affect it.
    pub(crate) fn snapshot(&self) -> Arc<Vec<Listener>> {
        Arc::clone(&self.listeners.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Append `listener`, returning the new length.
    pub(crate) fn push(&self, listener: Listener) -> usize {
        let mut current = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend(current.iter().cloned());
        next.push(listener);
        let len = next.len();
        *current = Arc::new(next);
        len
    }

    /// Remove every entry identical to `listener`. Returns how many went.
    pub(crate) fn remove(&self, listener: &Listener) -> usize {
        let mut current = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        if !current.iter().any(|l| same_listener(l, listener)) {
            return 0;
        }
        let next: Vec<Listener> = current
            .iter()
            .filter(|l| !same_listener(l, listener))
            .cloned()
            .collect();
        let removed = current.len() - next.len();
        *current = Arc::new(next);
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub(crate) fn contains(&self, listener: &Listener) -> bool {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|l| same_listener(l, listener))
    }
}

/// Pointer identity, ignoring vtables.
pub(crate) fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Calling [`unsubscribe`](Unsubscribe::unsubscribe) removes every entry of
/// the original listener from the store, so subscribing one listener twice
/// gives two entries that are removed together. Further calls are no-ops
/// unless the same listener was subscribed again in between.
///
/// Dropping the handle does *not* unsubscribe; use
/// [`into_guard`](Unsubscribe::into_guard) for that. The handle only holds a
/// weak reference to the store, so it never keeps the store alive.
#[must_use = "the listener stays registered until `unsubscribe` is called"]
pub struct Unsubscribe {
    registry: Weak<ListenerRegistry>,
    listener: Listener,
}

impl Unsubscribe {
    pub(crate) fn new(registry: Weak<ListenerRegistry>, listener: Listener) -> Self {
        Self { registry, listener }
    }

    /// Remove the listener. Returns `true` if any entry was removed.
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let removed = registry.remove(&self.listener);
        trace!(removed, remaining = registry.len(), "listener unsubscribed");
        removed > 0
    }

    /// Whether the store is still alive and still holds this listener.
    pub fn is_subscribed(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(&self.listener))
    }

    /// Turn this handle into a guard that unsubscribes on drop.
    pub fn into_guard(self) -> SubscriptionGuard {
        SubscriptionGuard { handle: Some(self) }
    }
}

impl std::fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("subscribed", &self.is_subscribed())
            .finish_non_exhaustive()
    }
}

/// RAII form of [`Unsubscribe`].
pub struct SubscriptionGuard {
    handle: Option<Unsubscribe>,
}

impl SubscriptionGuard {
    /// Give the handle back without unsubscribing.
    pub fn into_inner(mut self) -> Option<Unsubscribe> {
        self.handle.take()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.unsubscribe();
        }
    }
}

impl std::fmt::Debug for SubscriptionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionGuard").finish_non_exhaustive()
    }
}
