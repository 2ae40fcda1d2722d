//! A minimal rendering host.
//!
//! [`Consumer`] implements the external-store read contract the way a UI
//! framework would: one subscription per store per mounted consumer,
//! re-render on notification, and no commit of a pass whose snapshots went
//! stale while it ran. It is small enough to drive headless views and tests.

mod consumer;

pub use consumer::{Consumer, RenderContext};

/// Settings for a [`Consumer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostOptions {
    pub(crate) max_render_passes: usize,
}

impl HostOptions {
    /// Default options: up to 3 render passes per commit.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times one render may be retried because a store changed
    /// mid-pass before giving up with
    /// [`HostError::RenderLoop`](crate::HostError::RenderLoop).
    /// Values below 1 are treated as 1.
    pub fn max_render_passes(mut self, passes: usize) -> Self {
        self.max_render_passes = passes;
        self
    }
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            max_render_passes: 3,
        }
    }
}
