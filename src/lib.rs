//! Private Ethereum Transaction Sender
//!
//! Signs a single transaction and submits it to a private relay
//! (`eth_sendPrivateTransaction`) instead of broadcasting it to the public
//! mempool, keeping the payload out of sight of front-runners until a
//! builder includes it.
//!
//! # Architecture Overview
//!
//! ```text
//!   .env / process environment
//!            │
//!            ▼
//!      ┌──────────┐       ┌───────────┐       ┌────────────┐
//!      │  config  │──────▶│   chain   │──────▶│     tx     │
//!      │ settings │       │ snapshot  │       │ build+sign │
//!      └──────────┘       └─────┬─────┘       └──────┬─────┘
//!                               │                    │
//!                               │ receipts           ▼
//!                               │              ┌────────────┐
//!                               └──────────────│   relay    │
//!                            (confirmation     │  submit    │
//!                               polling)       └──────┬─────┘
//!                                                     │
//!                                                     ▼
//!                                        status line + exit code
//! ```
//!
//! # Security Constraints
//! - The private key is read once from the environment and never logged,
//!   serialized, or written to disk
//! - Every node read and the relay submission carry independent timeouts
//! - Transport-level retries resubmit the identical signed payload; a
//!   transaction is never rebuilt with a fresh nonce automatically

// Core pipeline
pub mod chain;
pub mod relay;
pub mod tx;

// Cross-cutting concerns
pub mod config;
pub mod observability;
pub mod resilience;

// Orchestration
pub mod sender;

pub use config::Settings;
pub use relay::SubmissionResult;
pub use sender::{PrivateTransactionSender, SendError};
pub use tx::Intent;
