//! The session lifecycle state machine.

use serde::{Deserialize, Serialize};

/// The lifecycle state of a loot session.
///
/// Transitions follow this shape (`PartiallyConsumed` may repeat as
/// distribution steps land one at a time):
///
/// ```text
/// Uninitialized → Opened → PartiallyConsumed* → FullyConsumed → Released
///                    └──────────────────────────────↑
/// ```
///
/// - **Uninitialized**: The session exists (rewards were generated at the
///   kill) but no player has opened it yet. The kind is still unassigned.
/// - **Opened**: A player opened the session; the kind is fixed and, for
///   group-owned corpses, the roll protocol has been delegated once.
/// - **PartiallyConsumed**: At least one distribution step landed but
///   rewards remain.
/// - **FullyConsumed**: Gold is zero and every slot is looted.
/// - **Released**: Terminal. The container has been torn down; no
///   transition leaves this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionLifecycle {
    Uninitialized,
    Opened,
    PartiallyConsumed,
    FullyConsumed,
    Released,
}

impl SessionLifecycle {
    /// Returns `true` if the session can still hand out rewards.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Opened | Self::PartiallyConsumed)
    }

    /// Returns `true` for the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Released)
    }

    /// Returns `true` if transitioning to `target` is valid.
    ///
    /// An `Opened` session may jump straight to `FullyConsumed` (a single
    /// sweep can drain everything), and `PartiallyConsumed` may repeat.
    /// `Released` admits nothing.
    pub fn can_transition_to(self, target: Self) -> bool {
        use SessionLifecycle::*;
        matches!(
            (self, target),
            (Uninitialized, Opened)
                | (Opened, PartiallyConsumed)
                | (Opened, FullyConsumed)
                | (PartiallyConsumed, PartiallyConsumed)
                | (PartiallyConsumed, FullyConsumed)
                | (FullyConsumed, Released)
        )
    }
}

impl std::fmt::Display for SessionLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Opened => write!(f, "Opened"),
            Self::PartiallyConsumed => write!(f, "PartiallyConsumed"),
            Self::FullyConsumed => write!(f, "FullyConsumed"),
            Self::Released => write!(f, "Released"),
        }
    }
}
