//! Bridging stores to a rendering host.
//!
//! A host that renders from external state exposes one primitive,
//! [`SyncExternalStore::use_sync_external_store`]. It is handed anything that
//! implements [`ExternalStore`] and must:
//!
//! 1. subscribe once per mounted consumer,
//! 2. call `get_snapshot` for the value to render,
//! 3. re-read and re-render when its listener fires,
//! 4. never commit a view in which two reads of the same store disagree.
//!
//! Point 4 is the host's job. A [`Store`] only promises synchronous, ordered
//! delivery and snapshots that are pointer-stable between writes.
//!
//! The `use_*` functions below are pass-throughs over that primitive, and
//! [`get_store_snapshot`] reads without subscribing, for event handlers and
//! other code that runs outside a render pass.

use std::sync::Arc;

use crate::store::{Listener, SetState, Store, StoreOptions, Unsubscribe};

/// A source of snapshots that can be subscribed to.
pub trait ExternalStore {
    type Snapshot: Clone;

    fn subscribe(&self, listener: Listener) -> Unsubscribe;

    fn get_snapshot(&self) -> Self::Snapshot;

    /// Whether two snapshots are the same value as far as re-rendering is
    /// concerned.
    fn same_snapshot(a: &Self::Snapshot, b: &Self::Snapshot) -> bool;

    /// Whether `self` and `other` are handles to one underlying store.
    fn same_store(&self, other: &Self) -> bool;
}

impl<T> ExternalStore for Store<T> {
    type Snapshot = Arc<T>;

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        Store::subscribe(self, listener)
    }

    fn get_snapshot(&self) -> Arc<T> {
        self.get_state()
    }

    fn same_snapshot(a: &Arc<T>, b: &Arc<T>) -> bool {
        Arc::ptr_eq(a, b)
    }

    fn same_store(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// The host's tearing-safe read primitive.
pub trait SyncExternalStore {
    fn use_sync_external_store<S>(&mut self, store: &S) -> S::Snapshot
    where
        S: ExternalStore + Clone + Send + Sync + 'static,
        S::Snapshot: Send + Sync + 'static;
}

/// Allocate an independent store.
pub fn create_store<T>(initial: T) -> Store<T> {
    Store::new(initial)
}

/// Allocate an independent store configured by `options`.
pub fn create_store_with<T>(initial: T, options: StoreOptions) -> Store<T> {
    Store::with_options(initial, options)
}

/// Current value plus the store's writer, subscribing the caller's render.
///
/// ```
/// use sangtae::host::Consumer;
/// use sangtae::{create_store, use_store};
///
/// let count = create_store(0);
/// let mut view = Consumer::mount({
///     let count = count.clone();
///     move |cx| {
///         let (value, set_count) = use_store(cx, &count);
///         (*value, set_count)
///     }
/// })
/// .unwrap();
///
/// let set_count = view.output().unwrap().1.clone();
/// set_count.update(|n| n + 1);
/// assert!(view.is_dirty());
/// assert_eq!(view.render().unwrap().0, 1);
/// ```
pub fn use_store<H, T>(host: &mut H, store: &Store<T>) -> (Arc<T>, SetState<T>)
where
    H: SyncExternalStore,
    T: Send + Sync + 'static,
{
    (host.use_sync_external_store(store), store.setter())
}

/// Current value only, subscribing the caller's render.
pub fn use_get_store<H, T>(host: &mut H, store: &Store<T>) -> Arc<T>
where
    H: SyncExternalStore,
    T: Send + Sync + 'static,
{
    host.use_sync_external_store(store)
}

/// Writer only. Does not subscribe, so writing never re-renders the caller.
pub fn use_set_store<T>(store: &Store<T>) -> SetState<T> {
    store.setter()
}

/// Read the current value directly, outside any render pass.
pub fn get_store_snapshot<T>(store: &Store<T>) -> Arc<T> {
    store.get_state()
}
