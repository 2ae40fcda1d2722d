//! The state container.
//!
//! A [`Store`] owns one value and a copy-on-write list of listeners. Writes
//! replace the value and synchronously notify every listener registered when
//! the notification cycle began.

mod listeners;
mod options;
mod setter;
mod store;
mod update;

pub use listeners::{Listener, SubscriptionGuard, Unsubscribe};
pub use options::StoreOptions;
pub use setter::SetState;
pub use store::Store;
pub use update::{Update, Updater};
