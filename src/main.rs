//! Command-line entry point.
//!
//! One invocation performs one build → sign → submit cycle and exits:
//! 0 when the relay accepted (and, with `--wait`, the transaction
//! confirmed), 1 on rejection or failed confirmation, 2 on configuration
//! errors, 3 on any other send failure.

use std::time::Duration;

use alloy::primitives::U256;
use clap::Parser;

use private_tx_sender::chain::ConfirmationStatus;
use private_tx_sender::config;
use private_tx_sender::observability::logging;
use private_tx_sender::sender::PrivateTransactionSender;
use private_tx_sender::tx::Intent;
use private_tx_sender::Settings;

const EXIT_REJECTED: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_SEND: i32 = 3;

/// Sign one Ethereum transaction and submit it to a private relay.
#[derive(Parser)]
#[command(name = "private-tx-sender", long_about = None)]
struct Cli {
    /// Recipient address (0x-prefixed).
    #[arg(long)]
    to: String,

    /// Value to transfer, in wei.
    #[arg(long, default_value = "0")]
    value_wei: U256,

    /// Calldata as a hex string.
    #[arg(long)]
    data: Option<String>,

    /// Explicit gas limit (skips estimation).
    #[arg(long)]
    gas_limit: Option<u64>,

    /// Explicit max fee per gas, in wei.
    #[arg(long)]
    max_fee_per_gas: Option<u128>,

    /// Explicit max priority fee per gas, in wei.
    #[arg(long)]
    max_priority_fee_per_gas: Option<u128>,

    /// Poll for on-chain confirmation after relay acceptance.
    #[arg(long)]
    wait: bool,

    /// Maximum time to wait for confirmation, in seconds.
    #[arg(long, default_value_t = 360)]
    wait_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = match config::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(EXIT_CONFIG);
        }
    };
    logging::init(settings.environment);

    std::process::exit(run(cli, settings).await);
}

async fn run(cli: Cli, settings: Settings) -> i32 {
    let intent = Intent {
        recipient: cli.to,
        value: cli.value_wei,
        data: cli.data,
        gas_limit: cli.gas_limit,
        max_fee_per_gas: cli.max_fee_per_gas,
        max_priority_fee_per_gas: cli.max_priority_fee_per_gas,
    };

    let sender = match PrivateTransactionSender::new(&settings) {
        Ok(sender) => sender,
        Err(e) => {
            eprintln!("startup error: {e}");
            return EXIT_SEND;
        }
    };

    let result = match sender.send(&intent).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("send failed: {e}");
            return EXIT_SEND;
        }
    };

    if !result.accepted {
        println!(
            "transaction {} rejected by relay: {}",
            result.tx_hash,
            result.relay_message.as_deref().unwrap_or("no message")
        );
        return EXIT_REJECTED;
    }
    println!("transaction {} accepted by relay", result.tx_hash);

    if cli.wait {
        let wait = Duration::from_secs(cli.wait_timeout_secs);
        match sender.wait_for_confirmation(result.tx_hash, wait).await {
            Ok(ConfirmationStatus::Confirmed { block_number }) => {
                println!("transaction {} confirmed in block {}", result.tx_hash, block_number);
            }
            Ok(ConfirmationStatus::Failed(reason)) => {
                println!("transaction {} failed: {}", result.tx_hash, reason);
                return EXIT_REJECTED;
            }
            Ok(_) => {
                println!("transaction {} still unconfirmed", result.tx_hash);
                return EXIT_REJECTED;
            }
            Err(e) => {
                eprintln!("confirmation wait failed: {e}");
                return EXIT_REJECTED;
            }
        }
    }

    0
}
