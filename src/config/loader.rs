//! Settings loading from the environment.
//!
//! # Responsibilities
//! - Read recognized variables from an injectable source
//! - Validate the private key, endpoint URLs, and numeric values
//! - Produce an immutable [`Settings`] or a precise [`ConfigError`]
//!
//! # Design Decisions
//! - Validation happens here, once; downstream components receive data
//!   they can trust
//! - Error messages name the offending variable but never echo secret
//!   values

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use alloy::signers::local::PrivateKeySigner;
use thiserror::Error;
use url::Url;

use crate::config::schema::{
    default_builders, Environment, RetryPolicy, SecretString, Settings, DEFAULT_RELAY_URL,
};

pub const ENV_PRIVATE_KEY: &str = "PRIVATE_KEY";
pub const ENV_APP_ENV: &str = "APP_ENV";
pub const ENV_RPC_URL: &str = "ETH_RPC_URL";
pub const ENV_RELAY_URL: &str = "RELAY_URL";
pub const ENV_CHAIN_ID: &str = "CHAIN_ID";
pub const ENV_RPC_TIMEOUT_SECS: &str = "RPC_TIMEOUT_SECS";
pub const ENV_RELAY_TIMEOUT_SECS: &str = "RELAY_TIMEOUT_SECS";
pub const ENV_MAX_BLOCK_WINDOW: &str = "MAX_BLOCK_WINDOW";
pub const ENV_BUILDERS: &str = "BUILDERS";
pub const ENV_MAX_RETRIES: &str = "MAX_RETRIES";
pub const ENV_RETRY_BASE_DELAY_MS: &str = "RETRY_BASE_DELAY_MS";
pub const ENV_CONFIRMATION_BLOCKS: &str = "CONFIRMATION_BLOCKS";

/// Errors raised while resolving [`Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    /// The private key does not parse as a secp256k1 key.
    #[error("{0} is not a valid hex-encoded private key")]
    InvalidPrivateKey(&'static str),

    /// `APP_ENV` holds an unknown value.
    #[error("unrecognized {ENV_APP_ENV} value '{0}' (expected 'development' or 'production')")]
    UnknownEnvironment(String),

    /// An endpoint variable does not parse as a URL.
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    /// A numeric variable does not parse.
    #[error("{var} is not a valid number: {reason}")]
    InvalidNumber { var: &'static str, reason: String },
}

/// Source of configuration variables.
///
/// Production reads the process environment; tests inject a map so they
/// never mutate global state.
pub trait EnvSource {
    fn get(&self, name: &str) -> Option<String>;
}

/// The process environment.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// Load settings from the process environment.
pub fn load() -> Result<Settings, ConfigError> {
    from_source(&ProcessEnv)
}

/// Load settings from an explicit variable source.
pub fn from_source(source: &impl EnvSource) -> Result<Settings, ConfigError> {
    let environment = match source.get(ENV_APP_ENV) {
        Some(raw) => {
            Environment::parse(&raw).ok_or_else(|| ConfigError::UnknownEnvironment(raw))?
        }
        None => Environment::Development,
    };

    let private_key = source
        .get(ENV_PRIVATE_KEY)
        .ok_or(ConfigError::MissingVar(ENV_PRIVATE_KEY))?;
    // Parse once to reject malformed keys up front; only the hex string is
    // retained, wrapped so it cannot leak through Debug output.
    let stripped = private_key.strip_prefix("0x").unwrap_or(&private_key);
    stripped
        .parse::<PrivateKeySigner>()
        .map_err(|_| ConfigError::InvalidPrivateKey(ENV_PRIVATE_KEY))?;

    let rpc_url = parse_url_var(source, ENV_RPC_URL)?
        .ok_or(ConfigError::MissingVar(ENV_RPC_URL))?;
    let relay_url = match parse_url_var(source, ENV_RELAY_URL)? {
        Some(url) => url,
        None => Url::parse(DEFAULT_RELAY_URL).expect("default relay URL is valid"),
    };

    let chain_id = parse_num_var(source, ENV_CHAIN_ID)?.unwrap_or(1);
    let rpc_timeout_secs: u64 = parse_num_var(source, ENV_RPC_TIMEOUT_SECS)?.unwrap_or(5);
    let relay_timeout_secs: u64 = parse_num_var(source, ENV_RELAY_TIMEOUT_SECS)?.unwrap_or(10);
    let max_block_window = parse_num_var(source, ENV_MAX_BLOCK_WINDOW)?.unwrap_or(1);
    let confirmation_blocks = parse_num_var(source, ENV_CONFIRMATION_BLOCKS)?.unwrap_or(1);

    let retry = RetryPolicy {
        max_attempts: parse_num_var(source, ENV_MAX_RETRIES)?
            .unwrap_or(RetryPolicy::default().max_attempts),
        base_delay_ms: parse_num_var(source, ENV_RETRY_BASE_DELAY_MS)?
            .unwrap_or(RetryPolicy::default().base_delay_ms),
        max_delay_ms: RetryPolicy::default().max_delay_ms,
    };

    let builders = match source.get(ENV_BUILDERS) {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(String::from)
            .collect(),
        None => default_builders(),
    };

    Ok(Settings {
        environment,
        private_key: SecretString::new(private_key),
        rpc_url,
        relay_url,
        chain_id,
        rpc_timeout: Duration::from_secs(rpc_timeout_secs),
        relay_timeout: Duration::from_secs(relay_timeout_secs),
        max_block_window,
        builders,
        retry,
        confirmation_blocks,
    })
}

fn parse_url_var(source: &impl EnvSource, var: &'static str) -> Result<Option<Url>, ConfigError> {
    match source.get(var) {
        Some(raw) => Url::parse(&raw)
            .map(Some)
            .map_err(|e| ConfigError::InvalidUrl { var, reason: e.to_string() }),
        None => Ok(None),
    }
}

fn parse_num_var<T>(source: &impl EnvSource, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match source.get(var) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidNumber { var, reason: e.to_string() }),
        None => Ok(None),
    }
}
