//! Key custody and transaction signing.
//!
//! # Security
//! - The private key is parsed once and held only in process memory
//! - Key material never appears in logs, errors, or Debug output
//! - Signing has no side effects; the payload is the only output

use alloy::consensus::{SignableTransaction, TxEip1559, TxEnvelope};
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TxSignerSync;
use alloy::primitives::{keccak256, Address, TxKind};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::tx::types::{SignedTransaction, SigningError, UnsignedTransaction};

/// Wallet holding the signing key.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key, `0x` prefix
    /// optional.
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, SigningError> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let signer: PrivateKeySigner =
            key_hex.parse().map_err(|_| SigningError::InvalidKey)?;
        Ok(Self { signer })
    }

    /// The wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign an unsigned transaction into its raw EIP-2718 payload.
    ///
    /// Deterministic (RFC 6979): the same transaction and key always
    /// produce byte-identical output.
    pub fn sign_transaction(
        &self,
        unsigned: &UnsignedTransaction,
    ) -> Result<SignedTransaction, SigningError> {
        let mut tx = TxEip1559 {
            chain_id: unsigned.chain_id.ok_or(SigningError::MissingField("chain_id"))?,
            nonce: unsigned.nonce.ok_or(SigningError::MissingField("nonce"))?,
            gas_limit: unsigned.gas_limit.ok_or(SigningError::MissingField("gas_limit"))?,
            max_fee_per_gas: unsigned
                .max_fee_per_gas
                .ok_or(SigningError::MissingField("max_fee_per_gas"))?,
            max_priority_fee_per_gas: unsigned
                .max_priority_fee_per_gas
                .ok_or(SigningError::MissingField("max_priority_fee_per_gas"))?,
            to: TxKind::Call(unsigned.to),
            value: unsigned.value,
            input: unsigned.input.clone(),
            ..Default::default()
        };

        let signature = self
            .signer
            .sign_transaction_sync(&mut tx)
            .map_err(|e| SigningError::Signature(e.to_string()))?;
        let signed = tx.into_signed(signature);
        let hash = *signed.hash();
        let envelope = TxEnvelope::Eip1559(signed);

        Ok(SignedTransaction { raw: envelope.encoded_2718().into(), hash })
    }

    /// Compute the `X-Flashbots-Signature` header value for a request
    /// body: an EIP-191 personal signature over the hex digest of the
    /// body, prefixed with the signing address.
    pub fn flashbots_signature(&self, body: &str) -> Result<String, SigningError> {
        let digest = alloy::hex::encode_prefixed(keccak256(body.as_bytes()));
        let signature = self
            .signer
            .sign_message_sync(digest.as_bytes())
            .map_err(|e| SigningError::Signature(e.to_string()))?;
        Ok(format!(
            "{}:{}",
            self.address(),
            alloy::hex::encode_prefixed(signature.as_bytes())
        ))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet").field("address", &self.address()).finish()
    }
}
