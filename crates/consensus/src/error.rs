//! Error taxonomy for membership operations.
//!
//! Precondition violations (unknown node, already in role, not connected)
//! are not errors; they are [`RoleChangeOutcome`](crate::RoleChangeOutcome)
//! values. Everything here is a hard failure the caller must handle.

use palisade_ledger::GroupId;
use thiserror::Error;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A hard failure during a membership operation.
#[derive(Debug, Error)]
pub enum Error {
    /// A ledger membership query failed.
    #[error("ledger query failed: {0}")]
    Ledger(String),

    /// The local participant lacks the group's genesis material, so it
    /// cannot validate the group's consensus rules at all. Fatal for the
    /// group; not retried.
    #[error("genesis config not found for group {0}")]
    GenesisConfigMissing(GroupId),

    /// Signed submission failed in transit, before any receipt existed.
    #[error("transaction submission failed: {0}")]
    Submission(String),

    /// The ledger executed the transaction and rejected it (negative
    /// normalized code), or the receipt could not be normalized at all.
    /// Carries the ledger's or parser's own code and message.
    #[error("execution rejected with code {code}: {message}")]
    Execution {
        /// Normalized code reported by the ledger or receipt parser.
        code: i64,
        /// Message reported by the ledger or receipt parser.
        message: String,
    },
}
