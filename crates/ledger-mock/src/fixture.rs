use std::collections::HashMap;

use serde::Deserialize;

/// Sealer entry in the group fixture file
#[derive(Debug, Deserialize)]
pub struct FixtureSealer {
    pub node_id: String,
    pub weight: u64,
}

/// Group definition in the fixture file
#[derive(Debug, Deserialize)]
pub struct FixtureGroup {
    pub known_nodes: Vec<String>,
    pub connected_peers: Vec<String>,
    #[serde(default)]
    pub sealers: Vec<FixtureSealer>,
    #[serde(default)]
    pub observers: Vec<String>,
    #[serde(default)]
    pub wasm: bool,
    #[serde(default = "default_true")]
    pub has_genesis_config: bool,
}

fn default_true() -> bool {
    true
}

/// Group fixture file
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub groups: HashMap<String, FixtureGroup>,
}
