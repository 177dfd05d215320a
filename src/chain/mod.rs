//! Node-facing chain subsystem.
//!
//! # Data Flow
//! ```text
//! Settings (RPC endpoint, chain id, timeout)
//!     → client.rs (HTTP provider, per-call timeouts)
//!     → ChainState snapshot (nonce, fees, gas, head block)
//!     → consumed by the transaction builder
//! ```
//!
//! # Design Decisions
//! - Every RPC call carries its own timeout; a slow node surfaces as a
//!   recoverable error, never a hang
//! - The reported chain id must match configuration before anything is
//!   signed against it

pub mod client;
pub mod types;

pub use client::ChainClient;
pub use types::{ChainError, ChainResult, ChainState, ConfirmationStatus};
