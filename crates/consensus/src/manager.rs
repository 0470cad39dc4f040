//! Membership mutation pipelines.

use palisade_ledger::{GroupId, LedgerReader, NodeId};
use palisade_transact::{
    SubmitRequest, TransactionGateway, TransactionGatewayError, TransactionGatewayErrorKind,
};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::classifier::{self, NodeRole};
use crate::directory::NodeDirectory;
use crate::error::{Error, Result};
use crate::outcome::RoleChangeOutcome;
use crate::receipt::interpret_receipt;
use crate::registry::{
    ExecutionMode, FUNC_ADD_OBSERVER, FUNC_ADD_SEALER, FUNC_REMOVE, FunctionFamily, contract_abi,
    contract_address,
};

/// Message emitted by the local participant once it has detached a node from
/// a group. Seeing it while removing that node means the removal already
/// took effect at the network layer.
const GROUP_UNROUTABLE_PATTERN: &str = "Don't send requests to this group";

/// Whether a submission error means the local participant no longer routes
/// requests to the group for this node. Prefers the gateway's structured
/// error kind; falls back to the message substring for gateways that only
/// surface free text. Single definition so the substring check can be
/// retired without touching call sites.
fn group_unroutable<E>(error: &E) -> bool
where
    E: TransactionGatewayError,
{
    error.kind() == TransactionGatewayErrorKind::GroupUnroutable
        || error.to_string().contains(GROUP_UNROUTABLE_PATTERN)
}

/// Manages consensus group membership: classifies nodes into roles and
/// mutates membership by submitting governance transactions through the
/// signing subsystem.
///
/// Holds no state beyond the collaborator handles; every view is re-queried
/// per call, so concurrent requests are independent. Mutual exclusion
/// between operators mutating the same node is the ledger's ordering
/// problem, not ours.
#[derive(Clone, Debug)]
pub struct ConsensusManager<L, T>
where
    L: LedgerReader,
    T: TransactionGateway,
{
    ledger: L,
    directory: NodeDirectory<L>,
    gateway: T,
}

impl<L, T> ConsensusManager<L, T>
where
    L: LedgerReader,
    T: TransactionGateway,
{
    /// Create a manager over the given collaborators.
    pub fn new(ledger: L, gateway: T) -> Self {
        Self {
            directory: NodeDirectory::new(ledger.clone()),
            ledger,
            gateway,
        }
    }

    /// The node directory backing this manager.
    pub const fn directory(&self) -> &NodeDirectory<L> {
        &self.directory
    }

    /// Role-annotated listing of every node in the group: sealers first,
    /// then observers, then floating peers.
    pub async fn list_roles(&self, group_id: &GroupId) -> Result<Vec<NodeRole>> {
        classifier::classify_all(&self.directory, group_id).await
    }

    /// Promote a known, connected node to the sealer role with the given
    /// voting weight.
    pub async fn add_sealer(
        &self,
        group_id: &GroupId,
        sign_user_id: &str,
        node_id: &NodeId,
        weight: u64,
    ) -> Result<RoleChangeOutcome> {
        info!("adding node {node_id} as sealer of group {group_id} with weight {weight}");

        if !self.directory.is_known(group_id, node_id).await? {
            warn!("node {node_id} is not known in group {group_id}");
            return Ok(RoleChangeOutcome::InvalidNodeId);
        }

        let sealers = self.directory.sealers(group_id).await?;
        if sealers.iter().any(|s| s.node_id == *node_id) {
            return Ok(RoleChangeOutcome::AlreadySealer);
        }

        let peers = self.directory.connected_peer_ids(group_id).await?;
        if !peers.contains(node_id) {
            error!("node {node_id} is not connected with group peers, cannot be added as sealer");
            return Ok(RoleChangeOutcome::PeersNotConnected);
        }

        let has_genesis = self
            .ledger
            .has_genesis_config(group_id)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))?;
        if !has_genesis {
            error!("no genesis config for group {group_id}, cannot validate its consensus rules");
            return Err(Error::GenesisConfigMissing(group_id.clone()));
        }

        let params = vec![json!(node_id.as_str()), json!(weight)];
        let request = self
            .build_request(group_id, sign_user_id, FUNC_ADD_SEALER, params)
            .await?;
        let receipt = self
            .gateway
            .submit_with_sign(request)
            .await
            .map_err(|e| Error::Submission(e.to_string()))?;

        interpret_receipt(self.gateway.parse_receipt(&receipt))
    }

    /// Register a known node as an observer. Observers need not be
    /// connected, so there is no connectivity or genesis gate here.
    pub async fn add_observer(
        &self,
        group_id: &GroupId,
        sign_user_id: &str,
        node_id: &NodeId,
    ) -> Result<RoleChangeOutcome> {
        info!("adding node {node_id} as observer of group {group_id}");

        if !self.directory.is_known(group_id, node_id).await? {
            warn!("node {node_id} is not known in group {group_id}");
            return Ok(RoleChangeOutcome::InvalidNodeId);
        }

        let observers = self.directory.observers(group_id).await?;
        if observers.contains(node_id) {
            return Ok(RoleChangeOutcome::AlreadyObserver);
        }

        let params = vec![json!(node_id.as_str())];
        let request = self
            .build_request(group_id, sign_user_id, FUNC_ADD_OBSERVER, params)
            .await?;
        let receipt = self
            .gateway
            .submit_with_sign(request)
            .await
            .map_err(|e| Error::Submission(e.to_string()))?;

        interpret_receipt(self.gateway.parse_receipt(&receipt))
    }

    /// Remove a node from the consensus group. Removing a node that is no
    /// longer a connected peer is an idempotent no-op.
    pub async fn remove_node(
        &self,
        group_id: &GroupId,
        sign_user_id: &str,
        node_id: &NodeId,
    ) -> Result<RoleChangeOutcome> {
        info!("removing node {node_id} from group {group_id}");

        let peers = self.directory.connected_peer_ids(group_id).await?;
        if !peers.contains(node_id) {
            info!("node {node_id} is not a connected peer of group {group_id}, nothing to remove");
            return Ok(RoleChangeOutcome::AlreadyRemoved);
        }

        let params = vec![json!(node_id.as_str())];
        let request = self
            .build_request(group_id, sign_user_id, FUNC_REMOVE, params)
            .await?;
        let receipt = match self.gateway.submit_with_sign(request).await {
            Ok(receipt) => receipt,
            // The participant stopped routing requests for this node before
            // the receipt came back: the removal already happened at the
            // network layer.
            Err(e) if group_unroutable(&e) => {
                warn!("group {group_id} unroutable for node {node_id}, removal already effective");
                return Ok(RoleChangeOutcome::AlreadyRemoved);
            }
            Err(e) => return Err(Error::Submission(e.to_string())),
        };

        interpret_receipt(self.gateway.parse_receipt(&receipt))
    }

    /// Resolve the governance contract target for the group's current
    /// execution mode and assemble the signed-submission request.
    async fn build_request(
        &self,
        group_id: &GroupId,
        sign_user_id: &str,
        function: &str,
        params: Vec<Value>,
    ) -> Result<SubmitRequest> {
        let is_wasm = self
            .ledger
            .is_wasm_execution(group_id)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))?;
        let mode = ExecutionMode::from_wasm_flag(is_wasm);
        let contract_address = contract_address(FunctionFamily::Consensus, mode).to_string();

        info!("dispatching {function} to {contract_address} for group {group_id} ({mode})");

        Ok(SubmitRequest {
            group_id: group_id.clone(),
            sign_user_id: sign_user_id.to_string(),
            contract_address,
            abi: contract_abi(FunctionFamily::Consensus).to_string(),
            function: function.to_string(),
            params,
            is_wasm,
        })
    }
}
