use std::sync::Arc;

/// Per-store settings.
///
/// ```
/// use sangtae::{Store, StoreOptions};
///
/// let store = Store::with_options(
///     0_u32,
///     StoreOptions::new().name("clicks").listener_warning_threshold(64),
/// );
/// assert_eq!(store.name(), Some("clicks"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub(crate) name: Option<Arc<str>>,
    pub(crate) listener_warning_threshold: Option<usize>,
}

impl StoreOptions {
    /// Options with no name and no listener warning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label attached to this store's log events.
    pub fn name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Log a warning the first time the listener count goes above `limit`.
    /// A steadily growing count usually means unsubscribe handles are being
    /// dropped without being called.
    pub fn listener_warning_threshold(mut self, limit: usize) -> Self {
        self.listener_warning_threshold = Some(limit);
        self
    }
}
