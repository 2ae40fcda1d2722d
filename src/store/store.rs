use std::sync::{Arc, PoisonError, RwLock};

use tracing::{trace, warn};

use super::listeners::{Listener, ListenerRegistry, Unsubscribe};
use super::options::StoreOptions;
use super::setter::SetState;
use super::update::Update;

struct Current<T> {
    value: Arc<T>,
    version: u64,
}

struct StoreInner<T> {
    state: RwLock<Current<T>>,
    listeners: Arc<ListenerRegistry>,
    options: StoreOptions,
}

/// A state container that lives outside any component tree.
///
/// The store holds one value and a list of change listeners. Every write
/// installs a fresh `Arc<T>` and then synchronously runs one notification
/// cycle, with no equality check. Reads hand out the stored `Arc`, so two
/// reads with no write in between are pointer-identical and any write makes
/// the next read pointer-distinct. Renderers that compare snapshots by
/// identity rely on this.
///
/// Cloning a `Store` creates a new handle to the **same** state.
///
/// # Failure Modes
///
/// - **Panicking listener**: the panic unwinds out of the write that
///   triggered the cycle; listeners later in the cycle are skipped. The new
///   value is already installed.
/// - **Re-entrant updater**: an `update_state` closure that touches its own
///   store deadlocks, since the write lock is held for the read-modify-write.
///   Listeners and [`read`](Store::read) closures run with no lock held.
pub struct Store<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self::with_options(initial, StoreOptions::default())
    }

    /// Create a new store configured by `options`.
    pub fn with_options(initial: T, options: StoreOptions) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(Current {
                    value: Arc::new(initial),
                    version: 0,
                }),
                listeners: Arc::new(ListenerRegistry::new()),
                options,
            }),
        }
    }

    /// The current state.
    pub fn get_state(&self) -> Arc<T> {
        Arc::clone(&self.read_current().value)
    }

    /// Read state by reference. The closure sees the current snapshot and
    /// may write to this store.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let value = self.get_state();
        f(&value)
    }

    /// Replace the state and notify listeners.
    pub fn set_state(&self, value: T) {
        self.install(|_| Arc::new(value));
    }

    /// Compute the next state from the previous one and notify listeners.
    ///
    /// ```
    /// use sangtae::create_store;
    ///
    /// let store = create_store(5);
    /// store.update_state(|n| n + 1);
    /// assert_eq!(*store.get_state(), 6);
    /// ```
    pub fn update_state<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        self.install(|prev| Arc::new(f(prev)));
    }

    /// Install an already shared value. Listeners are notified even when
    /// `value` is the `Arc` the store already holds.
    pub fn set_shared(&self, value: Arc<T>) {
        self.install(|_| value);
    }

    /// Apply a tagged [`Update`].
    pub fn apply(&self, update: Update<T>) {
        self.install(|prev| Arc::new(update.resolve(prev)));
    }

    /// Register `listener`. It runs after every write until the returned
    /// handle is used.
    pub fn subscribe(&self, listener: Listener) -> Unsubscribe {
        let count = self.inner.listeners.push(Arc::clone(&listener));
        trace!(store = self.label(), listeners = count, "listener subscribed");

        if let Some(limit) = self.inner.options.listener_warning_threshold {
            if limit.checked_add(1) == Some(count) {
                warn!(
                    store = self.label(),
                    listeners = count,
                    limit,
                    "listener count exceeded threshold, possible subscription leak"
                );
            }
        }

        Unsubscribe::new(Arc::downgrade(&self.inner.listeners), listener)
    }

    /// [`subscribe`](Self::subscribe) for a plain closure.
    pub fn subscribe_fn<F>(&self, f: F) -> Unsubscribe
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(f))
    }

    /// Run one notification cycle over the listeners registered right now.
    pub fn emit_change(&self) {
        let listeners = self.inner.listeners.snapshot();
        trace!(
            store = self.label(),
            listeners = listeners.len(),
            "notifying listeners"
        );
        for listener in listeners.iter() {
            listener();
        }
    }

    /// Number of writes so far. Equal-value writes count.
    pub fn version(&self) -> u64 {
        self.read_current().version
    }

    /// Number of listener entries currently registered.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    /// The name set through [`StoreOptions::name`], if any.
    pub fn name(&self) -> Option<&str> {
        self.inner.options.name.as_deref()
    }

    /// The store's own writer as a standalone handle.
    pub fn setter(&self) -> SetState<T> {
        SetState::new(self.clone())
    }

    /// Whether both handles point at the same store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn install(&self, next: impl FnOnce(&T) -> Arc<T>) {
        let version = {
            let mut current = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let value = next(&*current.value);
            current.value = value;
            current.version += 1;
            current.version
        };
        trace!(store = self.label(), version, "state replaced");
        self.emit_change();
    }

    fn read_current(&self) -> std::sync::RwLockReadGuard<'_, Current<T>> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn label(&self) -> &str {
        self.name().unwrap_or("anonymous")
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.read_current();
        f.debug_struct("Store")
            .field("name", &self.name())
            .field("value", &current.value)
            .field("version", &current.version)
            .field("listener_count", &self.listener_count())
            .finish()
    }
}
