//! Error types for the mock ledger implementation.

use palisade_ledger::{GroupId, LedgerReaderError, LedgerReaderErrorKind};
use thiserror::Error;

/// Error type for the mock ledger implementation.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when a query targets a group the mock has no fixture for.
    #[error("no fixture for group {0}")]
    UnknownGroup(GroupId),

    /// Error when loading or parsing the group fixture file.
    #[error("group fixture file error: {0}")]
    FixtureFile(String),
}

impl LedgerReaderError for Error {
    fn kind(&self) -> LedgerReaderErrorKind {
        match self {
            Self::UnknownGroup(_) => LedgerReaderErrorKind::Protocol,
            Self::FixtureFile(_) => LedgerReaderErrorKind::Other,
        }
    }
}
