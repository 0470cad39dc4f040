//! Error types for the mock transaction gateway.

use palisade_transact::{TransactionGatewayError, TransactionGatewayErrorKind};
use thiserror::Error;

/// Error type for the mock transaction gateway.
#[derive(Debug, Error)]
pub enum Error {
    /// The local participant refuses to route requests to this group. The
    /// display text matches the message real ledger nodes emit, so callers
    /// exercising the message-substring fallback see the production shape.
    #[error("Don't send requests to this group")]
    GroupUnroutable,

    /// Scripted transport-level failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl TransactionGatewayError for Error {
    fn kind(&self) -> TransactionGatewayErrorKind {
        match self {
            Self::GroupUnroutable => TransactionGatewayErrorKind::GroupUnroutable,
            Self::Transport(_) => TransactionGatewayErrorKind::Transport,
        }
    }
}
