//! Read-only directory of a group's nodes.

use palisade_ledger::{GroupId, LedgerReader, NodeId, Sealer};
use tracing::debug;

use crate::error::{Error, Result};

/// Uncached façade over the ledger's membership queries. Every method
/// re-queries the ledger; there is no consistency guarantee across calls
/// beyond best effort at the same approximate instant.
#[derive(Clone, Debug)]
pub struct NodeDirectory<L>
where
    L: LedgerReader,
{
    ledger: L,
}

impl<L> NodeDirectory<L>
where
    L: LedgerReader,
{
    /// Create a directory over the given ledger reader.
    pub const fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// Node identifiers known to the local participant.
    pub async fn known_node_ids(&self, group_id: &GroupId) -> Result<Vec<NodeId>> {
        self.ledger
            .known_node_ids(group_id)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))
    }

    /// Currently connected group peers.
    pub async fn connected_peer_ids(&self, group_id: &GroupId) -> Result<Vec<NodeId>> {
        self.ledger
            .connected_peer_ids(group_id)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))
    }

    /// The group's sealer set with voting weights.
    pub async fn sealers(&self, group_id: &GroupId) -> Result<Vec<Sealer>> {
        self.ledger
            .sealers(group_id)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))
    }

    /// The group's observer set.
    pub async fn observers(&self, group_id: &GroupId) -> Result<Vec<NodeId>> {
        self.ledger
            .observers(group_id)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))
    }

    /// Whether the node is known to the local participant. Every mutation
    /// gates on this before touching group membership.
    pub async fn is_known(&self, group_id: &GroupId, node_id: &NodeId) -> Result<bool> {
        let known = self.known_node_ids(group_id).await?.contains(node_id);
        debug!("node {node_id} known in group {group_id}: {known}");
        Ok(known)
    }
}
