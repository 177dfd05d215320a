//! Transaction pipeline types and error definitions.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use thiserror::Error;

/// Caller-supplied transaction intent, prior to any validation.
#[derive(Debug, Clone, Default)]
pub struct Intent {
    /// Recipient address as supplied, hex with optional `0x` prefix.
    pub recipient: String,
    /// Value to transfer, in wei.
    pub value: U256,
    /// Optional calldata as a hex string.
    pub data: Option<String>,
    /// Explicit gas limit; when absent the chain estimate is used.
    pub gas_limit: Option<u64>,
    /// Explicit max fee per gas in wei; when absent the chain suggestion
    /// is used.
    pub max_fee_per_gas: Option<u128>,
    /// Explicit max priority fee per gas in wei.
    pub max_priority_fee_per_gas: Option<u128>,
}

/// Intent after field validation, ready for estimation and assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedIntent {
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
    pub gas_limit: Option<u64>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
}

/// An unsigned EIP-1559 transaction.
///
/// Fields the signer requires are optional here so that signing can
/// enforce required-field validation; [`crate::tx::builder`] always
/// populates all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
    pub nonce: Option<u64>,
    pub gas_limit: Option<u64>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
    pub chain_id: Option<u64>,
}

/// A signed raw transaction ready for relay submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// EIP-2718 encoded payload (type-2 prefix).
    pub raw: Bytes,
    /// Canonical transaction hash, the identifier for status queries.
    pub hash: TxHash,
}

impl SignedTransaction {
    /// Hex encoding of the raw payload, `0x`-prefixed, as submitted on
    /// the wire.
    pub fn raw_hex(&self) -> String {
        alloy::hex::encode_prefixed(&self.raw)
    }
}

/// Errors raised while validating a caller intent.
#[derive(Debug, Error)]
pub enum IntentError {
    /// The recipient does not parse as a 20-byte address.
    #[error("invalid recipient address '{0}'")]
    InvalidRecipient(String),

    /// The calldata hex does not decode.
    #[error("invalid calldata hex: {0}")]
    InvalidData(String),
}

/// Errors raised while loading a key or signing a transaction.
///
/// These indicate a corrupted key or a malformed transaction and are
/// never swallowed; a signing failure can mask a key-loading bug.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The private key does not parse as a secp256k1 key.
    #[error("private key is not a valid secp256k1 key")]
    InvalidKey,

    /// A required transaction field is absent.
    #[error("unsigned transaction is missing required field '{0}'")]
    MissingField(&'static str),

    /// The underlying signer failed.
    #[error("signing failed: {0}")]
    Signature(String),
}
