//! Abstract interface for signed governance-transaction submission and
//! receipt parsing against a consortium ledger.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::error::Error;
use std::fmt::{self, Debug, Display};

use async_trait::async_trait;
use bytes::Bytes;
use palisade_ledger::GroupId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;

/// A fully described governance contract call, ready to be signed and
/// submitted on behalf of an operator credential.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// The consensus group the transaction targets.
    pub group_id: GroupId,

    /// Reference to the operator credential held by the signing subsystem.
    pub sign_user_id: String,

    /// Resolved governance contract address (precompiled address or BFS
    /// path, depending on execution mode).
    pub contract_address: String,

    /// ABI descriptor of the governance contract.
    pub abi: String,

    /// Function selector within the governance contract.
    pub function: String,

    /// Call parameters, JSON-encoded for the signing subsystem.
    pub params: Vec<Value>,

    /// Whether the target group executes in the WASM VM.
    pub is_wasm: bool,
}

/// Raw execution receipt as returned by the ledger after confirmation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Hash of the confirmed transaction.
    pub transaction_hash: String,

    /// Raw execution status reported by the ledger.
    pub status: i32,

    /// Opaque output payload of the call.
    pub output: Bytes,

    /// Ledger-reported status message, if any.
    pub message: String,
}

/// Normalized return code extracted from a receipt. Non-negative codes mean
/// the governance call took effect; negative codes carry the ledger's own
/// rejection reason.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RetCode {
    /// Normalized numeric code.
    pub code: i64,

    /// Human-readable message from the ledger.
    pub message: String,
}

impl RetCode {
    /// Build a return code.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for RetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Failure to normalize a receipt. Carries the parser's own code and
/// message, which callers surface unchanged.
#[derive(Clone, Debug, ThisError)]
#[error("receipt parse failed with code {code}: {message}")]
pub struct ReceiptParseError {
    /// Parser-assigned error code.
    pub code: i64,

    /// Parser-assigned message.
    pub message: String,
}

impl ReceiptParseError {
    /// Build a parse error.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// The kind of transaction gateway error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TransactionGatewayErrorKind {
    /// The local participant refuses to route requests to the target group
    /// for this node. For a removal this means the effect already happened
    /// at the network layer.
    GroupUnroutable,

    /// The signing subsystem rejected or failed the request.
    Signer,

    /// Transport-level failure talking to the ledger.
    Transport,

    /// Other/unknown error.
    Other,
}

impl Display for TransactionGatewayErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Marker trait for [`TransactionGateway`] errors.
pub trait TransactionGatewayError: Debug + Error + Send + Sync {
    /// Returns the kind of this error.
    fn kind(&self) -> TransactionGatewayErrorKind;
}

/// Signed-submission gateway: routes a governance call through the external
/// signing subsystem, submits it, and normalizes the resulting receipt.
#[async_trait]
pub trait TransactionGateway
where
    Self: Send + Sync + Clone + 'static,
{
    /// The error type for this gateway.
    type Error: TransactionGatewayError;

    /// Sign and submit a governance contract call, blocking until the
    /// ledger confirms it and returns a receipt.
    async fn submit_with_sign(
        &self,
        request: SubmitRequest,
    ) -> Result<TransactionReceipt, Self::Error>;

    /// Normalize a raw receipt into a return code.
    fn parse_receipt(&self, receipt: &TransactionReceipt) -> Result<RetCode, ReceiptParseError>;
}
