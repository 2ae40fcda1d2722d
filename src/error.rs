//! Host error types

use thiserror::Error;

/// Errors raised by the reference render host.
///
/// The store itself has no error surface; these only come from
/// [`Consumer`](crate::host::Consumer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Store snapshots kept changing while rendering
    #[error("store snapshots changed during each of {passes} render passes")]
    RenderLoop { passes: usize },

    /// Render requested after unmount
    #[error("consumer has been unmounted")]
    Unmounted,
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
