//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, loaded by the entry point)
//!     → process environment
//!     → loader.rs (read & validate variables)
//!     → Settings (typed, immutable)
//!     → passed explicitly into each component
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; there is no reload path
//! - Components never read the environment themselves, so tests can
//!   inject a plain map instead of mutating process state
//! - The private key is wrapped in a type that redacts itself from
//!   Debug/Display output

pub mod loader;
pub mod schema;

pub use loader::{from_source, load, ConfigError, EnvSource, ProcessEnv};
pub use schema::{Environment, RetryPolicy, SecretString, Settings};
