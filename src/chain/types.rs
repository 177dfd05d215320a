//! Chain-specific types and error definitions.

use thiserror::Error;

/// Errors from node RPC interaction.
///
/// All variants describe conditions outside the caller's control; the
/// chain-state read may be retried with the same intent.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC transport or request failure.
    #[error("node RPC unavailable: {0}")]
    Unavailable(String),

    /// RPC request timed out.
    #[error("node RPC timed out after {0} seconds")]
    Timeout(u64),

    /// The node reports a different chain than configured.
    #[error("chain id mismatch: expected {expected}, node reports {actual}")]
    ChainIdMismatch { expected: u64, actual: u64 },

    /// The transaction did not confirm within the polling window.
    #[error("transaction not confirmed within {0} seconds")]
    ConfirmationTimeout(u64),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Snapshot of the chain state a transaction is built against.
///
/// The builder uses these values exactly as supplied; in particular the
/// nonce is never cached or incremented locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainState {
    /// Chain id reported by the node.
    pub chain_id: u64,
    /// Latest block number at snapshot time.
    pub block_number: u64,
    /// Next nonce for the sending address.
    pub nonce: u64,
    /// Suggested max fee per gas (base fee + priority fee), in wei.
    pub max_fee_per_gas: u128,
    /// Suggested max priority fee per gas, in wei.
    pub max_priority_fee_per_gas: u128,
    /// Estimated gas limit for the intent.
    pub gas_limit: u64,
}

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction is pending, no receipt yet.
    Pending,
    /// Transaction has been mined but not enough confirmations.
    Confirming { current: u32, required: u32 },
    /// Transaction is confirmed with required block depth.
    Confirmed { block_number: u64 },
    /// Transaction reverted or was dropped.
    Failed(String),
}
