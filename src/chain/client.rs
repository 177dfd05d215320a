//! Node RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the Ethereum JSON-RPC endpoint
//! - Take one chain-state snapshot per send (nonce, fees, gas, head)
//! - Query receipts and block numbers for confirmation polling
//! - Surface timeouts and transport failures as recoverable errors

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use alloy::eips::BlockNumberOrTag;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use tokio::time::timeout;

use crate::chain::types::{ChainError, ChainResult, ChainState};
use crate::config::Settings;
use crate::tx::PreparedIntent;

/// Ethereum node client wrapper.
#[derive(Clone)]
pub struct ChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: String,
    expected_chain_id: u64,
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a client from resolved settings. The connection itself is
    /// lazy; the first RPC call performs the handshake.
    pub fn new(settings: &Settings) -> Self {
        let provider = ProviderBuilder::new().connect_http(settings.rpc_url.clone());
        Self {
            provider: Arc::new(provider) as Arc<dyn Provider + Send + Sync>,
            rpc_url: settings.rpc_url.to_string(),
            expected_chain_id: settings.chain_id,
            timeout_duration: settings.rpc_timeout,
        }
    }

    /// Run one RPC call under the configured timeout.
    async fn call<T, E>(
        &self,
        fut: impl IntoFuture<Output = Result<T, E>>,
    ) -> ChainResult<T>
    where
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ChainError::Unavailable(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Get the chain id from the node.
    pub async fn chain_id(&self) -> ChainResult<u64> {
        self.call(self.provider.get_chain_id()).await
    }

    /// Verify the node's chain id matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<u64> {
        let actual = self.chain_id().await?;
        if actual != self.expected_chain_id {
            return Err(ChainError::ChainIdMismatch {
                expected: self.expected_chain_id,
                actual,
            });
        }
        Ok(actual)
    }

    /// Get the latest block number.
    pub async fn block_number(&self) -> ChainResult<u64> {
        self.call(self.provider.get_block_number()).await
    }

    /// Get a transaction receipt by hash.
    pub async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> ChainResult<Option<TransactionReceipt>> {
        self.call(self.provider.get_transaction_receipt(tx_hash)).await
    }

    /// Take one chain-state snapshot for the given sender and intent.
    ///
    /// Fees are the node's suggestions used verbatim: max fee is the
    /// latest base fee plus the suggested priority fee. Gas is estimated
    /// against the intent unless the intent carries an explicit limit.
    pub async fn fetch_state(
        &self,
        from: Address,
        intent: &PreparedIntent,
    ) -> ChainResult<ChainState> {
        let chain_id = self.verify_chain_id().await?;

        let nonce = self
            .call(self.provider.get_transaction_count(from).pending())
            .await?;

        let block = self
            .call(self.provider.get_block_by_number(BlockNumberOrTag::Latest))
            .await?
            .ok_or_else(|| ChainError::Unavailable("node returned no latest block".to_string()))?;
        let block_number = block.header.number;

        let (max_fee_per_gas, max_priority_fee_per_gas) = match block.header.base_fee_per_gas {
            Some(base_fee) => {
                let tip = self.call(self.provider.get_max_priority_fee_per_gas()).await?;
                (base_fee as u128 + tip, tip)
            }
            // Pre-London chain: the legacy gas price serves as both bounds.
            None => {
                let price = self.call(self.provider.get_gas_price()).await?;
                (price, price)
            }
        };

        let gas_limit = match intent.gas_limit {
            Some(limit) => limit,
            None => {
                let request = TransactionRequest::default()
                    .with_from(from)
                    .with_to(intent.to)
                    .with_value(intent.value)
                    .with_input(intent.input.clone());
                self.call(self.provider.estimate_gas(request)).await?
            }
        };

        tracing::debug!(
            chain_id,
            block_number,
            nonce,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            gas_limit,
            "chain state snapshot"
        );

        Ok(ChainState {
            chain_id,
            block_number,
            nonce,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            gas_limit,
        })
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.rpc_url)
            .field("expected_chain_id", &self.expected_chain_id)
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
