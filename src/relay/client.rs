//! Private relay submission client.
//!
//! # Responsibilities
//! - Serialize the submission body exactly once and sign those bytes for
//!   the `X-Flashbots-Signature` header
//! - Perform one request-response exchange per submit call
//! - Map the relay's answer onto accepted / rejected / transport error
//! - Drive the caller-level retry that resubmits the identical payload

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::config::RetryPolicy;
use crate::relay::types::{
    JsonRpcRequest, JsonRpcResponse, Preferences, PrivateTransactionParams, Privacy, RelayError,
    SubmissionResult, PRIVATE_TX_METHOD,
};
use crate::resilience::backoff::calculate_backoff;
use crate::tx::{SignedTransaction, Wallet};

/// Request authentication header expected by the relay.
pub const FLASHBOTS_SIGNATURE_HEADER: &str = "X-Flashbots-Signature";

/// Client for a single private relay endpoint.
#[derive(Debug, Clone)]
pub struct RelayClient {
    endpoint: Url,
    http: reqwest::Client,
    wallet: Wallet,
    builders: Vec<String>,
    retry: RetryPolicy,
}

impl RelayClient {
    pub fn new(
        endpoint: Url,
        timeout: Duration,
        wallet: Wallet,
        builders: Vec<String>,
        retry: RetryPolicy,
    ) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Network(e.to_string()))?;
        Ok(Self { endpoint, http, wallet, builders, retry })
    }

    fn request_body(
        &self,
        signed: &SignedTransaction,
        max_block_number: u64,
    ) -> Result<String, RelayError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: PRIVATE_TX_METHOD,
            params: [PrivateTransactionParams {
                tx: signed.raw_hex(),
                max_block_number: format!("0x{max_block_number:x}"),
                preferences: Preferences {
                    fast: true,
                    privacy: Privacy { builders: self.builders.clone() },
                },
            }],
        };
        serde_json::to_string(&request).map_err(|e| RelayError::InvalidResponse(e.to_string()))
    }

    /// Submit a signed transaction. Exactly one exchange; no retries.
    pub async fn submit(
        &self,
        signed: &SignedTransaction,
        max_block_number: u64,
    ) -> Result<SubmissionResult, RelayError> {
        let body = self.request_body(signed, max_block_number)?;
        let signature = self
            .wallet
            .flashbots_signature(&body)
            .map_err(|e| RelayError::Auth(e.to_string()))?;

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(FLASHBOTS_SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        if status.as_u16() == 429 || status.is_server_error() {
            return Err(RelayError::Http { status: status.as_u16(), body: text });
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "relay refused the request");
            return Ok(SubmissionResult::rejected(signed.hash, text));
        }

        let parsed: JsonRpcResponse =
            serde_json::from_str(&text).map_err(|e| RelayError::InvalidResponse(e.to_string()))?;

        if let Some(error) = parsed.error {
            tracing::warn!(code = error.code, message = %error.message, "relay rejected the transaction");
            return Ok(SubmissionResult::rejected(signed.hash, error.message));
        }

        match parsed.result {
            Some(result) => {
                // Prefer the relay-reported hash; fall back to the locally
                // computed one when the result is not a hash string.
                let tx_hash = result
                    .as_str()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(signed.hash);
                tracing::info!(tx_hash = %tx_hash, "relay accepted the transaction");
                Ok(SubmissionResult::accepted(tx_hash))
            }
            None => Err(RelayError::InvalidResponse(
                "response carries neither result nor error".to_string(),
            )),
        }
    }

    /// Submit with the configured retry policy.
    ///
    /// Only transport-class failures are retried, and every attempt sends
    /// the byte-identical payload. A relay rejection is final.
    pub async fn submit_with_retry(
        &self,
        signed: &SignedTransaction,
        max_block_number: u64,
    ) -> Result<SubmissionResult, RelayError> {
        let mut attempt = 0u32;
        loop {
            match self.submit(signed, max_block_number).await {
                Ok(result) => return Ok(result),
                Err(error) if error.is_retryable() && attempt + 1 < self.retry.max_attempts => {
                    attempt += 1;
                    let delay = calculate_backoff(
                        attempt,
                        self.retry.base_delay_ms,
                        self.retry.max_delay_ms,
                    );
                    tracing::warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "relay submission failed, resubmitting the same payload"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
