//! # Sangtae
//!
//! An external state store for Rust UIs.
//!
//! A [`Store<T>`] lives outside any component tree. Components read it
//! through a subscription protocol and write it through its setter; every
//! write synchronously notifies every subscribed listener.
//!
//! ## Store (state container)
//!
//! - `get_state` returns the current value as an `Arc<T>` that stays
//!   pointer-identical until the next write
//! - `set_state` / `update_state` / `apply` replace the value and notify,
//!   with no equality check
//! - `subscribe` registers a listener and returns an [`Unsubscribe`] handle
//!
//! ## Adapter (render integration)
//!
//! - [`ExternalStore`] / [`SyncExternalStore`] - the read contract between a
//!   store and a rendering host
//! - [`use_store`], [`use_get_store`], [`use_set_store`] - hook-style accessors
//! - [`get_store_snapshot`] - plain read for code outside a render pass
//! - [`host::Consumer`] - a small host implementing the contract
//!
//! ```
//! use sangtae::create_store;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let count = create_store(0);
//! let seen = Arc::new(AtomicUsize::new(0));
//! let handle = count.subscribe_fn({
//!     let seen = seen.clone();
//!     move || {
//!         seen.fetch_add(1, Ordering::SeqCst);
//!     }
//! });
//!
//! count.update_state(|n| n + 1);
//! assert_eq!(*count.get_state(), 1);
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//!
//! handle.unsubscribe();
//! count.set_state(5);
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

pub mod error;
pub mod external;
pub mod host;
pub mod store;

// Re-export main types for convenience
pub use error::HostError;
pub use external::{
    create_store, create_store_with, get_store_snapshot, use_get_store, use_set_store, use_store,
    ExternalStore, SyncExternalStore,
};
pub use store::{
    Listener, SetState, Store, StoreOptions, SubscriptionGuard, Unsubscribe, Update, Updater,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        // Basic smoke test
        let store = create_store(0);
        assert_eq!(*store.get_state(), 0);
        store.set_state(42);
        assert_eq!(*get_store_snapshot(&store), 42);
    }
}
