//! Typed outcomes of a membership mutation.

use serde::{Deserialize, Serialize};

/// Outcome of a single role-change request. Precondition violations and
/// idempotent no-ops are ordinary values here, never errors; each maps to a
/// stable result code the API layer reports to operators.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoleChangeOutcome {
    /// The governance transaction was confirmed and took effect. Carries the
    /// ledger's own success message.
    Succeeded {
        /// Message from the normalized receipt.
        message: String,
    },

    /// The node already holds the sealer role; nothing was submitted.
    AlreadySealer,

    /// The node already holds the observer role; nothing was submitted.
    AlreadyObserver,

    /// The node is not a connected group peer, so there is nothing to
    /// remove; nothing was submitted.
    AlreadyRemoved,

    /// The node is not known to the local participant.
    InvalidNodeId,

    /// The node is known but not currently connected, so it cannot be
    /// promoted to a voting role.
    PeersNotConnected,
}

impl RoleChangeOutcome {
    /// Stable result code for this outcome. `0` means the mutation took
    /// effect; positive codes identify the precondition that stopped it.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Succeeded { .. } => 0,
            Self::AlreadySealer => 101,
            Self::AlreadyObserver => 102,
            Self::AlreadyRemoved => 103,
            Self::InvalidNodeId => 104,
            Self::PeersNotConnected => 105,
        }
    }

    /// Human-readable message for this outcome.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Succeeded { message } => message,
            Self::AlreadySealer => "node is already in the sealer list",
            Self::AlreadyObserver => "node is already in the observer list",
            Self::AlreadyRemoved => "node is already removed from the group",
            Self::InvalidNodeId => "invalid node ID",
            Self::PeersNotConnected => "node is not connected with group peers",
        }
    }
}
