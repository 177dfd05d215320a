//! Relay wire contract and submission outcomes.

use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON-RPC method for private transaction submission.
pub const PRIVATE_TX_METHOD: &str = "eth_sendPrivateTransaction";

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<T> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: [T; 1],
}

/// The single parameter object of `eth_sendPrivateTransaction`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateTransactionParams {
    /// Hex-encoded raw signed transaction.
    pub tx: String,
    /// Highest block the relay may include the transaction in, hex.
    pub max_block_number: String,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Serialize)]
pub struct Preferences {
    pub fast: bool,
    pub privacy: Privacy,
}

#[derive(Debug, Clone, Serialize)]
pub struct Privacy {
    /// Builders the relay shares the transaction with.
    pub builders: Vec<String>,
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// Structured relay error object.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Outcome of one relay exchange.
///
/// `accepted` means the relay acknowledged receipt. It says nothing about
/// on-chain inclusion; the relay may still drop the transaction silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub accepted: bool,
    /// Canonical transaction hash (relay-reported when available).
    pub tx_hash: TxHash,
    /// Verbatim relay message on rejection.
    pub relay_message: Option<String>,
}

impl SubmissionResult {
    pub fn accepted(tx_hash: TxHash) -> Self {
        Self { accepted: true, tx_hash, relay_message: None }
    }

    pub fn rejected(tx_hash: TxHash, message: impl Into<String>) -> Self {
        Self { accepted: false, tx_hash, relay_message: Some(message.into()) }
    }
}

/// Submission failures where the relay's verdict never arrived.
///
/// The true state of the submission is unknown; resubmitting the
/// identical payload is safe because a duplicate raw transaction has the
/// same hash and is a no-op at the relay and on chain.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Transport failure: connection refused, reset, or timed out.
    #[error("relay request failed: {0}")]
    Network(String),

    /// The relay answered with a transient HTTP status (429 or 5xx).
    #[error("relay returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body was not a JSON-RPC response.
    #[error("relay returned a malformed response: {0}")]
    InvalidResponse(String),

    /// The request body could not be signed for the auth header.
    #[error("failed to sign relay request: {0}")]
    Auth(String),
}

impl RelayError {
    /// Whether resubmitting the same payload can help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RelayError::Network(_) | RelayError::Http { .. } | RelayError::InvalidResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_request_wire_shape() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: PRIVATE_TX_METHOD,
            params: [PrivateTransactionParams {
                tx: "0x02abcd".to_string(),
                max_block_number: "0x65".to_string(),
                preferences: Preferences {
                    fast: true,
                    privacy: Privacy { builders: vec!["flashbots".to_string()] },
                },
            }],
        };

        let value: Value = serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(value["method"], "eth_sendPrivateTransaction");
        assert_eq!(value["params"][0]["tx"], "0x02abcd");
        assert_eq!(value["params"][0]["maxBlockNumber"], "0x65");
        assert_eq!(value["params"][0]["preferences"]["fast"], true);
        assert_eq!(value["params"][0]["preferences"]["privacy"]["builders"][0], "flashbots");
    }

    #[test]
    fn test_error_response_parses() {
        let response: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"nonce too low"}}"#,
        )
        .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -32000);
        assert_eq!(error.message, "nonce too low");
        assert!(response.result.is_none());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(RelayError::Network("reset".into()).is_retryable());
        assert!(RelayError::Http { status: 503, body: String::new() }.is_retryable());
        assert!(!RelayError::Auth("bad key".into()).is_retryable());
    }
}
