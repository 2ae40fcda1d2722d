use std::sync::Arc;

use super::store::Store;
use super::update::Update;

/// The write half of a [`Store`], handed to code that should not read.
///
/// Every method forwards to the store unchanged.
pub struct SetState<T> {
    store: Store<T>,
}

impl<T> SetState<T> {
    pub(crate) fn new(store: Store<T>) -> Self {
        Self { store }
    }

    /// Replace the state, as [`Store::set_state`].
    pub fn set(&self, value: T) {
        self.store.set_state(value);
    }

    /// Derive the next state, as [`Store::update_state`].
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        self.store.update_state(f);
    }

    /// Install a shared value, as [`Store::set_shared`].
    pub fn set_shared(&self, value: Arc<T>) {
        self.store.set_shared(value);
    }

    /// Apply a tagged update, as [`Store::apply`].
    pub fn apply(&self, update: Update<T>) {
        self.store.apply(update);
    }

    /// Whether this writer targets `store`.
    pub fn targets(&self, store: &Store<T>) -> bool {
        self.store.ptr_eq(store)
    }
}

impl<T> Clone for SetState<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T> std::fmt::Debug for SetState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetState")
            .field("store", &self.store.name())
            .finish()
    }
}
