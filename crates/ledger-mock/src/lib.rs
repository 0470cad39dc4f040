//! Mock implementation of the ledger read interface for testing purposes.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod fixture;

pub use error::Error;

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use palisade_ledger::{GroupId, LedgerReader, NodeId, Sealer};

/// Live membership state of a single mocked group.
#[derive(Clone, Debug, Default)]
pub struct GroupState {
    /// Nodes known to the local participant.
    pub known_nodes: Vec<NodeId>,

    /// Currently connected group peers.
    pub connected_peers: Vec<NodeId>,

    /// Sealer set with voting weights.
    pub sealers: Vec<Sealer>,

    /// Observer set.
    pub observers: Vec<NodeId>,

    /// Whether the group executes contracts in the WASM VM.
    pub wasm: bool,

    /// Whether the local participant holds the group's genesis material.
    pub has_genesis_config: bool,
}

impl GroupState {
    /// A group with the given known and connected nodes, no consensus roles
    /// assigned yet, native execution, genesis material present.
    #[must_use]
    pub fn new(known_nodes: Vec<NodeId>, connected_peers: Vec<NodeId>) -> Self {
        Self {
            known_nodes,
            connected_peers,
            has_genesis_config: true,
            ..Self::default()
        }
    }
}

/// Mock implementation of the ledger read interface, backed by per-group
/// fixture state. Test helpers mutate the shared state so scenarios can
/// evolve group membership between calls.
#[derive(Clone, Debug, Default)]
pub struct MockLedger {
    groups: Arc<RwLock<HashMap<GroupId, GroupState>>>,
}

impl MockLedger {
    /// Create an empty mock ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a group fixture.
    #[must_use]
    pub fn with_group(self, group_id: impl Into<GroupId>, state: GroupState) -> Self {
        self.groups
            .write()
            .unwrap()
            .insert(group_id.into(), state);
        self
    }

    /// Create a mock ledger from a JSON group fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The fixture file cannot be read
    /// - The fixture file contains invalid JSON
    pub fn from_group_fixture_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut file = File::open(path)
            .map_err(|e| Error::FixtureFile(format!("Failed to open fixture file: {e}")))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::FixtureFile(format!("Failed to read fixture file: {e}")))?;

        Self::from_group_fixture_json(&content)
    }

    /// Create a mock ledger from a JSON group fixture string.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture contains invalid JSON.
    pub fn from_group_fixture_json(content: &str) -> Result<Self, Error> {
        let fixture: fixture::Fixture = serde_json::from_str(content)
            .map_err(|e| Error::FixtureFile(format!("Failed to parse fixture file: {e}")))?;

        let groups = fixture
            .groups
            .into_iter()
            .map(|(id, g)| {
                let state = GroupState {
                    known_nodes: g.known_nodes.into_iter().map(NodeId::from).collect(),
                    connected_peers: g.connected_peers.into_iter().map(NodeId::from).collect(),
                    sealers: g
                        .sealers
                        .into_iter()
                        .map(|s| Sealer {
                            node_id: NodeId::from(s.node_id),
                            weight: s.weight,
                        })
                        .collect(),
                    observers: g.observers.into_iter().map(NodeId::from).collect(),
                    wasm: g.wasm,
                    has_genesis_config: g.has_genesis_config,
                };
                (GroupId::from(id), state)
            })
            .collect();

        Ok(Self {
            groups: Arc::new(RwLock::new(groups)),
        })
    }

    /// Drop a node from a group's connected-peer set, mimicking the network
    /// layer disconnecting it after a removal.
    pub fn disconnect_peer(&self, group_id: &GroupId, node_id: &NodeId) {
        if let Some(state) = self.groups.write().unwrap().get_mut(group_id) {
            state.connected_peers.retain(|id| id != node_id);
        }
    }

    /// Replace a group's state wholesale.
    pub fn set_group(&self, group_id: GroupId, state: GroupState) {
        self.groups.write().unwrap().insert(group_id, state);
    }

    fn with_state<R>(
        &self,
        group_id: &GroupId,
        f: impl FnOnce(&GroupState) -> R,
    ) -> Result<R, Error> {
        self.groups
            .read()
            .unwrap()
            .get(group_id)
            .map(f)
            .ok_or_else(|| Error::UnknownGroup(group_id.clone()))
    }
}

#[async_trait]
impl LedgerReader for MockLedger {
    type Error = Error;

    async fn known_node_ids(&self, group_id: &GroupId) -> Result<Vec<NodeId>, Self::Error> {
        self.with_state(group_id, |s| s.known_nodes.clone())
    }

    async fn connected_peer_ids(&self, group_id: &GroupId) -> Result<Vec<NodeId>, Self::Error> {
        self.with_state(group_id, |s| s.connected_peers.clone())
    }

    async fn sealers(&self, group_id: &GroupId) -> Result<Vec<Sealer>, Self::Error> {
        self.with_state(group_id, |s| s.sealers.clone())
    }

    async fn observers(&self, group_id: &GroupId) -> Result<Vec<NodeId>, Self::Error> {
        self.with_state(group_id, |s| s.observers.clone())
    }

    async fn is_wasm_execution(&self, group_id: &GroupId) -> Result<bool, Self::Error> {
        self.with_state(group_id, |s| s.wasm)
    }

    async fn has_genesis_config(&self, group_id: &GroupId) -> Result<bool, Self::Error> {
        self.with_state(group_id, |s| s.has_genesis_config)
    }
}
