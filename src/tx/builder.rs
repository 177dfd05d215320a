//! Intent validation and transaction assembly.
//!
//! # Responsibilities
//! - Validate caller-supplied recipient and calldata
//! - Merge the intent with a chain-state snapshot into an unsigned
//!   transaction
//!
//! # Design Decisions
//! - Pure functions, no I/O: chain state goes in as data
//! - Nonce and chain id are taken verbatim from the snapshot; the builder
//!   never guesses, caches, or increments a nonce
//! - Chain-suggested gas values are used as-is, no markup

use alloy::primitives::{Address, Bytes};

use crate::chain::ChainState;
use crate::tx::types::{Intent, IntentError, PreparedIntent, UnsignedTransaction};

/// Validate an intent's free-form fields.
pub fn prepare(intent: &Intent) -> Result<PreparedIntent, IntentError> {
    let to: Address = intent
        .recipient
        .parse()
        .map_err(|_| IntentError::InvalidRecipient(intent.recipient.clone()))?;

    let input = match &intent.data {
        Some(hex) => hex
            .parse::<Bytes>()
            .map_err(|e| IntentError::InvalidData(e.to_string()))?,
        None => Bytes::new(),
    };

    Ok(PreparedIntent {
        to,
        value: intent.value,
        input,
        gas_limit: intent.gas_limit,
        max_fee_per_gas: intent.max_fee_per_gas,
        max_priority_fee_per_gas: intent.max_priority_fee_per_gas,
    })
}

/// Merge a validated intent with a chain-state snapshot.
///
/// Explicit intent values win; everything else comes from the snapshot
/// unchanged.
pub fn assemble(intent: &PreparedIntent, state: &ChainState) -> UnsignedTransaction {
    UnsignedTransaction {
        to: intent.to,
        value: intent.value,
        input: intent.input.clone(),
        nonce: Some(state.nonce),
        gas_limit: Some(intent.gas_limit.unwrap_or(state.gas_limit)),
        max_fee_per_gas: Some(intent.max_fee_per_gas.unwrap_or(state.max_fee_per_gas)),
        max_priority_fee_per_gas: Some(
            intent
                .max_priority_fee_per_gas
                .unwrap_or(state.max_priority_fee_per_gas),
        ),
        chain_id: Some(state.chain_id),
    }
}

/// Validate and assemble in one step.
pub fn build(intent: &Intent, state: &ChainState) -> Result<UnsignedTransaction, IntentError> {
    Ok(assemble(&prepare(intent)?, state))
}
