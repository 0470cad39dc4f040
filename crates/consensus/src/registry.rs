//! Static registry of governance contract targets.
//!
//! Which address a governance call targets depends on the group's execution
//! mode: natively executing groups call the precompiled contract at a fixed
//! address, WASM groups call the same interface at a BFS path. The lookup is
//! centralized here so no call site branches on the mode itself.

use std::fmt::{self, Display};

/// Execution environment of a group's contracts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ExecutionMode {
    /// Contracts run in the native execution environment.
    Native,

    /// Contracts run in the WASM virtual machine.
    Wasm,
}

impl ExecutionMode {
    /// Mode corresponding to the ledger's WASM flag.
    #[must_use]
    pub const fn from_wasm_flag(is_wasm: bool) -> Self {
        if is_wasm { Self::Wasm } else { Self::Native }
    }
}

impl Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Family of governance functions sharing one contract interface.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FunctionFamily {
    /// Consensus membership mutations (sealer/observer/removal).
    Consensus,
}

/// Selector of the add-sealer governance function.
pub const FUNC_ADD_SEALER: &str = "addSealer";

/// Selector of the add-observer governance function.
pub const FUNC_ADD_OBSERVER: &str = "addObserver";

/// Selector of the remove-node governance function.
pub const FUNC_REMOVE: &str = "remove";

const CONSENSUS_PRECOMPILED_ADDRESS: &str = "0x0000000000000000000000000000000000001003";
const CONSENSUS_BFS_PATH: &str = "/sys/consensus";

const CONSENSUS_ABI: &str = r#"[{"inputs":[{"internalType":"string","name":"nodeID","type":"string"},{"internalType":"uint256","name":"weight","type":"uint256"}],"name":"addSealer","outputs":[{"internalType":"int32","name":"","type":"int32"}],"stateMutability":"nonpayable","type":"function"},{"inputs":[{"internalType":"string","name":"nodeID","type":"string"}],"name":"addObserver","outputs":[{"internalType":"int32","name":"","type":"int32"}],"stateMutability":"nonpayable","type":"function"},{"inputs":[{"internalType":"string","name":"nodeID","type":"string"}],"name":"remove","outputs":[{"internalType":"int32","name":"","type":"int32"}],"stateMutability":"nonpayable","type":"function"},{"inputs":[{"internalType":"string","name":"nodeID","type":"string"},{"internalType":"uint256","name":"weight","type":"uint256"}],"name":"setWeight","outputs":[{"internalType":"int32","name":"","type":"int32"}],"stateMutability":"nonpayable","type":"function"}]"#;

/// Resolve the governance contract address for a function family in the
/// given execution mode.
#[must_use]
pub const fn contract_address(family: FunctionFamily, mode: ExecutionMode) -> &'static str {
    match (family, mode) {
        (FunctionFamily::Consensus, ExecutionMode::Native) => CONSENSUS_PRECOMPILED_ADDRESS,
        (FunctionFamily::Consensus, ExecutionMode::Wasm) => CONSENSUS_BFS_PATH,
    }
}

/// Resolve the ABI descriptor for a function family. The ABI is the same in
/// both execution modes; only the address differs.
#[must_use]
pub const fn contract_abi(family: FunctionFamily) -> &'static str {
    match family {
        FunctionFamily::Consensus => CONSENSUS_ABI,
    }
}
