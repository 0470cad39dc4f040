//! Abstract read interface over a consortium ledger node: group membership
//! queries plus the execution-mode and genesis-config probes.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::error::Error;
use std::fmt::{self, Debug, Display};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a network participant. Equality is exact string
/// match; the ledger hands these out as hex strings and we never look inside.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap a raw node identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a consensus group. Every query and mutation is scoped to
/// exactly one group.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Wrap a raw group identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for GroupId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A voting member of the consensus group, with its voting weight.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sealer {
    /// The node holding the voting role.
    pub node_id: NodeId,

    /// Non-negative integer voting weight.
    pub weight: u64,
}

/// The kind of ledger read error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LedgerReaderErrorKind {
    /// The ledger node could not be reached.
    Network,

    /// The ledger node answered with something we could not interpret.
    Protocol,

    /// Other/unknown error.
    Other,
}

impl Display for LedgerReaderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Marker trait for [`LedgerReader`] errors.
pub trait LedgerReaderError: Debug + Error + Send + Sync {
    /// Returns the kind of this error.
    fn kind(&self) -> LedgerReaderErrorKind;
}

/// Read-only view over a consortium ledger node. Every call re-queries the
/// node; implementations must not cache across calls, and no consistency is
/// guaranteed between calls beyond best effort at the same approximate
/// instant.
#[async_trait]
pub trait LedgerReader
where
    Self: Send + Sync + Clone + 'static,
{
    /// The error type for this reader.
    type Error: LedgerReaderError;

    /// Node identifiers known to the local participant, in query order.
    async fn known_node_ids(&self, group_id: &GroupId) -> Result<Vec<NodeId>, Self::Error>;

    /// Currently connected group peers, in query order.
    async fn connected_peer_ids(&self, group_id: &GroupId) -> Result<Vec<NodeId>, Self::Error>;

    /// The group's sealer set with voting weights, in query order.
    async fn sealers(&self, group_id: &GroupId) -> Result<Vec<Sealer>, Self::Error>;

    /// The group's observer set, in query order.
    async fn observers(&self, group_id: &GroupId) -> Result<Vec<NodeId>, Self::Error>;

    /// Whether the group executes contracts in the WASM VM rather than
    /// natively. Affects which contract address governance calls target.
    async fn is_wasm_execution(&self, group_id: &GroupId) -> Result<bool, Self::Error>;

    /// Whether the local participant holds the group's genesis material.
    /// Implementations may answer `true` unconditionally where the
    /// underlying node cannot yet report this.
    async fn has_genesis_config(&self, group_id: &GroupId) -> Result<bool, Self::Error>;
}
