//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Pick the output format from the deployment environment
//!
//! # Design Decisions
//! - Pretty multi-line output in development, compact single-line
//!   records without ANSI codes in production
//! - `RUST_LOG` overrides the default filter
//! - Secrets are structurally absent: nothing hands the private key to a
//!   log macro

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

/// Initialize the global tracing subscriber. Call once.
pub fn init(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "private_tx_sender=info".into());

    match environment {
        Environment::Development => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Environment::Production => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().compact().with_ansi(false))
                .init();
        }
    }
}
