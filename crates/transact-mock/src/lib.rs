//! Mock implementation of the transaction gateway for testing purposes.
//!
//! Records every submitted request and replays scripted outcomes in order,
//! defaulting to a successful receipt when the script runs dry.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

pub use error::Error;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use palisade_transact::{
    ReceiptParseError, RetCode, SubmitRequest, TransactionGateway, TransactionReceipt,
};
use serde::{Deserialize, Serialize};

/// One scripted reaction to a submission.
#[derive(Clone, Debug)]
pub enum ScriptedResponse {
    /// Confirm with a receipt that normalizes to the given return code.
    Receipt(RetCode),

    /// Confirm with a receipt that fails normalization.
    ParseFailure(ReceiptParseError),

    /// Fail submission with the routing-refusal error.
    GroupUnroutable,

    /// Fail submission with a transport error.
    Transport(String),
}

/// Outcome payload the mock folds into a receipt's output so that
/// `parse_receipt` can recover it without shared state.
#[derive(Serialize, Deserialize)]
struct EncodedOutcome {
    code: i64,
    message: String,
    parse_failure: bool,
}

#[derive(Debug, Default)]
struct Inner {
    script: VecDeque<ScriptedResponse>,
    submitted: Vec<SubmitRequest>,
}

/// Mock transaction gateway.
#[derive(Clone, Debug, Default)]
pub struct MockGateway {
    inner: Arc<Mutex<Inner>>,
}

impl MockGateway {
    /// Create a mock gateway that confirms everything with code 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next scripted response. Responses are consumed in FIFO
    /// order; once the queue is empty every submission succeeds with
    /// code 0.
    pub fn queue_response(&self, response: ScriptedResponse) {
        self.inner.lock().unwrap().script.push_back(response);
    }

    /// Every request submitted so far, in order.
    #[must_use]
    pub fn submitted(&self) -> Vec<SubmitRequest> {
        self.inner.lock().unwrap().submitted.clone()
    }

    /// Number of requests submitted so far.
    #[must_use]
    pub fn submission_count(&self) -> usize {
        self.inner.lock().unwrap().submitted.len()
    }
}

#[async_trait]
impl TransactionGateway for MockGateway {
    type Error = Error;

    async fn submit_with_sign(
        &self,
        request: SubmitRequest,
    ) -> Result<TransactionReceipt, Self::Error> {
        let (response, sequence) = {
            let mut inner = self.inner.lock().unwrap();
            inner.submitted.push(request);
            let response = inner
                .script
                .pop_front()
                .unwrap_or_else(|| ScriptedResponse::Receipt(RetCode::new(0, "Success")));
            (response, inner.submitted.len())
        };

        let outcome = match response {
            ScriptedResponse::Receipt(ret_code) => EncodedOutcome {
                code: ret_code.code,
                message: ret_code.message,
                parse_failure: false,
            },
            ScriptedResponse::ParseFailure(parse_error) => EncodedOutcome {
                code: parse_error.code,
                message: parse_error.message,
                parse_failure: true,
            },
            ScriptedResponse::GroupUnroutable => return Err(Error::GroupUnroutable),
            ScriptedResponse::Transport(message) => return Err(Error::Transport(message)),
        };

        Ok(TransactionReceipt {
            transaction_hash: format!("0xmock{sequence:04x}"),
            status: 0,
            output: Bytes::from(serde_json::to_vec(&outcome).unwrap()),
            message: outcome.message.clone(),
        })
    }

    fn parse_receipt(&self, receipt: &TransactionReceipt) -> Result<RetCode, ReceiptParseError> {
        let outcome: EncodedOutcome = serde_json::from_slice(&receipt.output)
            .map_err(|_| ReceiptParseError::new(-1, "malformed receipt output"))?;

        if outcome.parse_failure {
            Err(ReceiptParseError::new(outcome.code, outcome.message))
        } else {
            Ok(RetCode::new(outcome.code, outcome.message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use palisade_ledger::GroupId;
    use palisade_transact::TransactionGatewayError;
    use palisade_transact::TransactionGatewayErrorKind;
    use serde_json::json;

    fn request(function: &str) -> SubmitRequest {
        SubmitRequest {
            group_id: GroupId::from("group1"),
            sign_user_id: "user1".to_string(),
            contract_address: "0x1003".to_string(),
            abi: "[]".to_string(),
            function: function.to_string(),
            params: vec![json!("node")],
            is_wasm: false,
        }
    }

    #[tokio::test]
    async fn test_defaults_to_success() {
        let gateway = MockGateway::new();

        let receipt = gateway.submit_with_sign(request("addSealer")).await.unwrap();
        let ret_code = gateway.parse_receipt(&receipt).unwrap();

        assert_eq!(ret_code, RetCode::new(0, "Success"));
        assert_eq!(gateway.submission_count(), 1);
        assert_eq!(gateway.submitted()[0].function, "addSealer");
    }

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let gateway = MockGateway::new();
        gateway.queue_response(ScriptedResponse::Receipt(RetCode::new(
            -51101,
            "invalid weight",
        )));
        gateway.queue_response(ScriptedResponse::GroupUnroutable);

        let receipt = gateway.submit_with_sign(request("addSealer")).await.unwrap();
        assert_eq!(
            gateway.parse_receipt(&receipt).unwrap(),
            RetCode::new(-51101, "invalid weight")
        );

        let err = gateway
            .submit_with_sign(request("remove"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), TransactionGatewayErrorKind::GroupUnroutable);
        assert!(err.to_string().contains("Don't send requests to this group"));
    }

    #[tokio::test]
    async fn test_scripted_parse_failure() {
        let gateway = MockGateway::new();
        gateway.queue_response(ScriptedResponse::ParseFailure(ReceiptParseError::new(
            -32000,
            "no receipt output",
        )));

        let receipt = gateway.submit_with_sign(request("remove")).await.unwrap();
        let err = gateway.parse_receipt(&receipt).unwrap_err();

        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "no receipt output");
    }
}
