//! Transaction pipeline: intent validation, assembly, and signing.
//!
//! # Data Flow
//! ```text
//! Intent (CLI / caller)
//!     → builder.rs (validate fields, merge chain snapshot)
//!     → UnsignedTransaction
//!     → wallet.rs (deterministic EIP-1559 signing)
//!     → SignedTransaction (raw payload + hash)
//! ```
//!
//! # Security Constraints
//! - The private key lives only inside [`Wallet`]; signing produces the
//!   payload and nothing else
//! - Signing is deterministic: the same unsigned transaction and key
//!   always yield byte-identical output

pub mod builder;
pub mod types;
pub mod wallet;

pub use types::{
    Intent, IntentError, PreparedIntent, SignedTransaction, SigningError, UnsignedTransaction,
};
pub use wallet::Wallet;
