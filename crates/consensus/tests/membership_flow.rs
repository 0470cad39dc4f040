//! End-to-end membership flows against fixture-backed mock collaborators.

use palisade_consensus::{ConsensusManager, Role, RoleChangeOutcome};
use palisade_ledger::{GroupId, NodeId};
use palisade_ledger_mock::MockLedger;
use palisade_transact_mock::MockGateway;

const FIXTURE: &str = r#"{
    "groups": {
        "group1": {
            "known_nodes": ["a", "b", "c"],
            "connected_peers": ["a", "b", "c"],
            "sealers": [{"node_id": "a", "weight": 10}],
            "observers": ["b"],
            "wasm": false
        }
    }
}"#;

#[tokio::test]
async fn promote_then_remove_round_trip() {
    let ledger = MockLedger::from_group_fixture_json(FIXTURE).unwrap();
    let gateway = MockGateway::new();
    let manager = ConsensusManager::new(ledger.clone(), gateway.clone());
    let group = GroupId::from("group1");

    let roles = manager.list_roles(&group).await.unwrap();
    assert_eq!(roles.len(), 3);
    assert_eq!(roles[0].role, Role::Sealer);
    assert_eq!(roles[1].role, Role::Observer);
    assert_eq!(roles[2].role, Role::Floating);

    // Promote the floating peer, then remove it again.
    let outcome = manager
        .add_sealer(&group, "operator", &NodeId::from("c"), 5)
        .await
        .unwrap();
    assert_eq!(outcome.code(), 0);

    let outcome = manager
        .remove_node(&group, "operator", &NodeId::from("c"))
        .await
        .unwrap();
    assert_eq!(outcome.code(), 0);
    assert_eq!(gateway.submission_count(), 2);

    // Once the network layer drops the peer, removal becomes a no-op.
    ledger.disconnect_peer(&group, &NodeId::from("c"));
    let outcome = manager
        .remove_node(&group, "operator", &NodeId::from("c"))
        .await
        .unwrap();
    assert_eq!(outcome, RoleChangeOutcome::AlreadyRemoved);
    assert_eq!(gateway.submission_count(), 2);
}

#[tokio::test]
async fn fixture_file_round_trip() {
    let path = std::env::temp_dir().join("palisade-membership-flow-fixture.json");
    std::fs::write(&path, FIXTURE).unwrap();

    let ledger = MockLedger::from_group_fixture_file(&path).unwrap();
    let group = GroupId::from("group1");
    let manager = ConsensusManager::new(ledger, MockGateway::new());

    let roles = manager.list_roles(&group).await.unwrap();
    assert_eq!(roles.len(), 3);

    std::fs::remove_file(&path).ok();
}
