//! Error types for the session layer.

use crate::SessionLifecycle;

/// Errors that can occur while mutating a loot session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The requested lifecycle transition is not permitted by the state
    /// machine (e.g. anything out of `Released`).
    #[error("invalid session transition {from} -> {to}")]
    InvalidTransition {
        from: SessionLifecycle,
        to: SessionLifecycle,
    },

    /// The slot index does not exist in this session.
    #[error("loot slot {0} out of range")]
    SlotOutOfRange(u8),
}
