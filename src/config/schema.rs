//! Configuration schema definitions.
//!
//! The complete settings surface of the tool. Everything here is resolved
//! once at startup by [`crate::config::loader`] and stays immutable for
//! the lifetime of the process.

use std::fmt;
use std::time::Duration;

use url::Url;

/// Default private relay endpoint.
pub const DEFAULT_RELAY_URL: &str = "https://relay.flashbots.net";

/// Deployment environment, selected via `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse an `APP_ENV` value. Matching is case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "development" => Some(Self::Development),
            "production" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A secret value that never appears in Debug or Display output.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Access the underlying secret. Callers must not log the result.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(<redacted>)")
    }
}

/// Retry policy for relay submissions.
///
/// Retries apply only to transport-level failures and always resubmit the
/// identical signed payload.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first submission.
    pub max_attempts: u32,
    /// Base delay for the exponential backoff.
    pub base_delay_ms: u64,
    /// Upper bound on a single backoff delay.
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 5_000,
        }
    }
}

/// Resolved application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Deployment environment (log formatting, startup banner).
    pub environment: Environment,

    /// Hex-encoded signing key, `0x` prefix optional.
    pub private_key: SecretString,

    /// Ethereum node JSON-RPC endpoint.
    pub rpc_url: Url,

    /// Private relay JSON-RPC endpoint.
    pub relay_url: Url,

    /// Expected chain id; the node's reported id must match.
    pub chain_id: u64,

    /// Timeout applied independently to every node RPC call.
    pub rpc_timeout: Duration,

    /// Timeout for the relay submission exchange.
    pub relay_timeout: Duration,

    /// The relay's `maxBlockNumber` is the current head plus this window.
    pub max_block_window: u64,

    /// Builders the relay is asked to share the transaction with.
    pub builders: Vec<String>,

    /// Relay submission retry policy.
    pub retry: RetryPolicy,

    /// Confirmations required before a transaction counts as included.
    pub confirmation_blocks: u32,
}

/// Builders of the reference deployment; overridable via `BUILDERS`.
pub fn default_builders() -> Vec<String> {
    [
        "beaverbuild.org",
        "Titan",
        "flashbots",
        "f1b.io",
        "rsync",
        "builder0x69",
        "EigenPhi",
        "boba-builder",
        "Gambit Labs",
        "payload",
        "Loki",
        "BuildAI",
        "JetBuilder",
        "tbuilder",
        "penguinbuild",
        "bobthebuilder",
        "BTCS",
        "bloXroute",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
