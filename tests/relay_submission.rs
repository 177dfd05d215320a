//! Relay submission contract tests against a local stub.

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use alloy::primitives::{keccak256, Bytes, Signature, U256};
use url::Url;

use private_tx_sender::config::RetryPolicy;
use private_tx_sender::relay::{RelayClient, RelayError};
use private_tx_sender::tx::{SignedTransaction, UnsignedTransaction, Wallet};

use common::{spawn_relay_stub, RelayStub, StubResponse};

// Well-known test private key (Anvil's first account)
const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn test_wallet() -> Wallet {
    Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap()
}

fn test_signed() -> SignedTransaction {
    let unsigned = UnsignedTransaction {
        to: "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D".parse().unwrap(),
        value: U256::from(10u64).pow(U256::from(18u64)),
        input: Bytes::new(),
        nonce: Some(5),
        gas_limit: Some(21_000),
        max_fee_per_gas: Some(20_000_000_000),
        max_priority_fee_per_gas: Some(1_000_000_000),
        chain_id: Some(1),
    };
    test_wallet().sign_transaction(&unsigned).unwrap()
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy { max_attempts: 3, base_delay_ms: 10, max_delay_ms: 50 }
}

fn relay_client(addr: SocketAddr, retry: RetryPolicy) -> RelayClient {
    RelayClient::new(
        Url::parse(&format!("http://{addr}/")).unwrap(),
        Duration::from_secs(2),
        test_wallet(),
        vec!["flashbots".to_string()],
        retry,
    )
    .unwrap()
}

#[tokio::test]
async fn test_accepts_on_result() {
    let stub = RelayStub::new();
    let signed = test_signed();
    let hash_hex = format!("{}", signed.hash);
    stub.push_response(StubResponse::Result(hash_hex.clone().into()));

    let addr = spawn_relay_stub(stub.clone()).await;
    let client = relay_client(addr, fast_retry());

    let result = client.submit(&signed, 101).await.unwrap();
    assert!(result.accepted);
    assert_eq!(format!("{}", result.tx_hash), hash_hex);
    assert!(result.relay_message.is_none());
}

#[tokio::test]
async fn test_rejection_surfaced_verbatim() {
    let stub = RelayStub::new();
    stub.push_response(StubResponse::Error { code: -32000, message: "nonce too low".to_string() });

    let addr = spawn_relay_stub(stub.clone()).await;
    let client = relay_client(addr, fast_retry());

    let signed = test_signed();
    let result = client.submit(&signed, 101).await.unwrap();
    assert!(!result.accepted);
    assert_eq!(result.tx_hash, signed.hash);
    assert!(result.relay_message.unwrap().contains("nonce too low"));
}

#[tokio::test]
async fn test_duplicate_submission_is_idempotent() {
    // Empty script: the stub acknowledges with the hash of the payload,
    // so a duplicate submission must yield the identical hash.
    let stub = RelayStub::new();
    let addr = spawn_relay_stub(stub.clone()).await;
    let client = relay_client(addr, fast_retry());

    let signed = test_signed();
    let first = client.submit(&signed, 101).await.unwrap();
    let second = client.submit(&signed, 101).await.unwrap();

    assert!(first.accepted);
    assert!(second.accepted);
    assert_eq!(first.tx_hash, second.tx_hash);
    assert_eq!(first.tx_hash, signed.hash);
}

#[tokio::test]
async fn test_retry_resubmits_identical_payload() {
    let stub = RelayStub::new();
    stub.push_response(StubResponse::Status(500));
    // Second attempt falls through to the acknowledging default.

    let addr = spawn_relay_stub(stub.clone()).await;
    let client = relay_client(addr, fast_retry());

    let signed = test_signed();
    let result = client.submit_with_retry(&signed, 101).await.unwrap();
    assert!(result.accepted);

    let recorded = stub.recorded();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].body, recorded[1].body);
}

#[tokio::test]
async fn test_rejection_is_not_retried() {
    let stub = RelayStub::new();
    stub.push_response(StubResponse::Error { code: -32000, message: "nonce too low".to_string() });

    let addr = spawn_relay_stub(stub.clone()).await;
    let client = relay_client(addr, fast_retry());

    let result = client.submit_with_retry(&test_signed(), 101).await.unwrap();
    assert!(!result.accepted);
    assert_eq!(stub.recorded().len(), 1);
}

#[tokio::test]
async fn test_network_error_after_exhausted_retries() {
    // Bind a listener and drop it so the port refuses connections.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = relay_client(addr, RetryPolicy { max_attempts: 2, base_delay_ms: 10, max_delay_ms: 20 });
    let err = client.submit_with_retry(&test_signed(), 101).await.unwrap_err();
    assert!(matches!(err, RelayError::Network(_)));
}

#[tokio::test]
async fn test_signature_header_recovers_wallet_address() {
    let stub = RelayStub::new();
    let addr = spawn_relay_stub(stub.clone()).await;
    let client = relay_client(addr, fast_retry());
    let wallet = test_wallet();

    client.submit(&test_signed(), 101).await.unwrap();

    let recorded = stub.recorded();
    let header = recorded[0].signature.clone().expect("auth header present");
    let (claimed, sig_hex) = header.split_once(':').unwrap();
    assert_eq!(claimed, wallet.address().to_string());

    let bytes = alloy::hex::decode(sig_hex).unwrap();
    let signature = Signature::try_from(bytes.as_slice()).unwrap();
    let digest = alloy::hex::encode_prefixed(keccak256(recorded[0].body.as_bytes()));
    let recovered = signature.recover_address_from_msg(digest.as_bytes()).unwrap();
    assert_eq!(recovered, wallet.address());
}

#[tokio::test]
async fn test_max_block_number_is_hex_encoded() {
    let stub = RelayStub::new();
    let addr = spawn_relay_stub(stub.clone()).await;
    let client = relay_client(addr, fast_retry());

    client.submit(&test_signed(), 101).await.unwrap();

    let recorded = stub.recorded();
    let body: serde_json::Value = serde_json::from_str(&recorded[0].body).unwrap();
    assert_eq!(body["method"], "eth_sendPrivateTransaction");
    assert_eq!(body["params"][0]["maxBlockNumber"], "0x65");
    assert_eq!(body["params"][0]["preferences"]["fast"], true);
}
