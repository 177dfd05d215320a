//! End-to-end send orchestration.
//!
//! One instance wires the chain client, wallet, and relay client from a
//! [`Settings`] and runs the full cycle:
//!
//! ```text
//! fetch_state → build → sign → submit_with_retry → SubmissionResult
//! ```
//!
//! Confirmation polling is a separate, opt-in step: relay acceptance and
//! on-chain inclusion are distinct states.

use std::time::Duration;

use alloy::primitives::TxHash;
use thiserror::Error;
use tokio::time::{interval, timeout};

use crate::chain::{ChainClient, ChainError, ConfirmationStatus};
use crate::config::Settings;
use crate::relay::{RelayClient, RelayError, SubmissionResult};
use crate::tx::{builder, Intent, IntentError, SigningError, Wallet};

/// Any failure along the send path, preserving the originating subsystem.
#[derive(Debug, Error)]
pub enum SendError {
    #[error(transparent)]
    Intent(#[from] IntentError),
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error(transparent)]
    Signing(#[from] SigningError),
    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Signs transactions and submits them to the private relay.
pub struct PrivateTransactionSender {
    chain: ChainClient,
    wallet: Wallet,
    relay: RelayClient,
    max_block_window: u64,
    confirmation_blocks: u32,
}

impl PrivateTransactionSender {
    pub fn new(settings: &Settings) -> Result<Self, SendError> {
        let wallet = Wallet::from_private_key(settings.private_key.expose())?;
        tracing::info!(
            address = %wallet.address(),
            environment = %settings.environment,
            relay = %settings.relay_url,
            "sender initialized"
        );

        let chain = ChainClient::new(settings);
        let relay = RelayClient::new(
            settings.relay_url.clone(),
            settings.relay_timeout,
            wallet.clone(),
            settings.builders.clone(),
            settings.retry,
        )?;

        Ok(Self {
            chain,
            wallet,
            relay,
            max_block_window: settings.max_block_window,
            confirmation_blocks: settings.confirmation_blocks,
        })
    }

    /// The sending address.
    pub fn address(&self) -> alloy::primitives::Address {
        self.wallet.address()
    }

    /// Run one build → sign → submit cycle.
    pub async fn send(&self, intent: &Intent) -> Result<SubmissionResult, SendError> {
        let prepared = builder::prepare(intent)?;
        let state = self.chain.fetch_state(self.wallet.address(), &prepared).await?;

        let unsigned = builder::assemble(&prepared, &state);
        let signed = self.wallet.sign_transaction(&unsigned)?;
        tracing::info!(
            tx_hash = %signed.hash,
            nonce = state.nonce,
            to = %prepared.to,
            "transaction signed"
        );

        let max_block_number = state.block_number + self.max_block_window;
        let result = self.relay.submit_with_retry(&signed, max_block_number).await?;
        Ok(result)
    }

    /// Poll for on-chain confirmation of a submitted transaction.
    ///
    /// Resolves once the receipt has `confirmation_blocks` of depth, the
    /// transaction reverts, or `wait` elapses.
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        wait: Duration,
    ) -> Result<ConfirmationStatus, SendError> {
        let required = self.confirmation_blocks;
        let poll_interval = Duration::from_secs(2);

        let outcome = timeout(wait, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.chain.transaction_receipt(tx_hash).await? {
                    Some(receipt) => receipt,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Ok(ConfirmationStatus::Failed("transaction reverted".to_string()));
                }

                let current_block = self.chain.block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32;

                if confirmations >= required {
                    return Ok(ConfirmationStatus::Confirmed { block_number: tx_block });
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations,
                    required,
                    "waiting for confirmations"
                );
            }
        })
        .await;

        match outcome {
            Ok(status) => status.map_err(SendError::Chain),
            Err(_) => Err(ChainError::ConfirmationTimeout(wait.as_secs()).into()),
        }
    }
}
