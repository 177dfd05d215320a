//! Private relay subsystem.
//!
//! # Data Flow
//! ```text
//! SignedTransaction
//!     → types.rs (JSON-RPC body, serialized exactly once)
//!     → wallet signature over the body bytes (request auth header)
//!     → client.rs (single POST, outcome mapping)
//!     → SubmissionResult {accepted, tx_hash, relay_message}
//! ```
//!
//! # Design Decisions
//! - One request-response exchange per submit call; no hidden retries
//! - A structured relay rejection is a result, not an error; it is
//!   final for this payload and never retried
//! - Transport failures leave the submission state unknown, so the retry
//!   layer resubmits the byte-identical payload

pub mod client;
pub mod types;

pub use client::RelayClient;
pub use types::{RelayError, SubmissionResult};
