//! Shared stubs for integration tests.
//!
//! Two local HTTP servers back the tests: a relay stub that records every
//! submission (body + auth header) and answers from a script, and a node
//! stub that serves canned JSON-RPC chain state.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::keccak256;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// One recorded relay submission.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub body: String,
    pub signature: Option<String>,
}

/// Scripted relay answer, consumed front to back. With an empty script
/// the stub acknowledges every submission with the hash of the submitted
/// payload, deduplicating naturally.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum StubResponse {
    Result(Value),
    Error { code: i64, message: String },
    Status(u16),
}

#[derive(Default)]
pub struct RelayStub {
    pub requests: Mutex<Vec<RecordedRequest>>,
    pub script: Mutex<VecDeque<StubResponse>>,
}

impl RelayStub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[allow(dead_code)]
    pub fn push_response(&self, response: StubResponse) {
        self.script.lock().unwrap().push_back(response);
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn relay_handler(
    State(stub): State<Arc<RelayStub>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    stub.requests.lock().unwrap().push(RecordedRequest {
        body: body.clone(),
        signature: headers
            .get("x-flashbots-signature")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    });

    let scripted = stub.script.lock().unwrap().pop_front();
    match scripted {
        Some(StubResponse::Result(result)) => {
            Json(json!({"jsonrpc": "2.0", "id": 1, "result": result})).into_response()
        }
        Some(StubResponse::Error { code, message }) => Json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": code, "message": message}
        }))
        .into_response(),
        Some(StubResponse::Status(status)) => {
            (StatusCode::from_u16(status).unwrap(), String::new()).into_response()
        }
        // Acknowledge with the canonical hash of the submitted payload.
        None => {
            let parsed: Value = serde_json::from_str(&body).unwrap();
            let tx_hex = parsed["params"][0]["tx"].as_str().unwrap();
            let raw = alloy::hex::decode(tx_hex).unwrap();
            let hash = alloy::hex::encode_prefixed(keccak256(&raw));
            Json(json!({"jsonrpc": "2.0", "id": 1, "result": hash})).into_response()
        }
    }
}

/// Spawn the relay stub, returning its address.
pub async fn spawn_relay_stub(stub: Arc<RelayStub>) -> SocketAddr {
    let app = Router::new().route("/", post(relay_handler)).with_state(stub);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Canned chain state served by the node stub.
#[derive(Debug, Clone)]
pub struct NodeStub {
    pub chain_id: u64,
    pub block_number: u64,
    pub nonce: u64,
    pub base_fee: u128,
    pub priority_fee: u128,
    pub gas_estimate: u64,
    /// When set, every request stalls for this long before answering.
    pub stall: Option<Duration>,
}

impl Default for NodeStub {
    fn default() -> Self {
        Self {
            chain_id: 1,
            block_number: 100,
            nonce: 5,
            base_fee: 19_000_000_000,
            priority_fee: 1_000_000_000,
            gas_estimate: 21_000,
            stall: None,
        }
    }
}

fn latest_block_json(number: u64, base_fee: u128) -> Value {
    let zero32 = format!("0x{}", "0".repeat(64));
    json!({
        "hash": zero32,
        "parentHash": zero32,
        "sha3Uncles": zero32,
        "miner": "0x0000000000000000000000000000000000000000",
        "stateRoot": zero32,
        "transactionsRoot": zero32,
        "receiptsRoot": zero32,
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "difficulty": "0x0",
        "number": format!("0x{number:x}"),
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x0",
        "timestamp": "0x0",
        "extraData": "0x",
        "mixHash": zero32,
        "nonce": "0x0000000000000000",
        "baseFeePerGas": format!("0x{base_fee:x}"),
        "size": "0x0",
        "transactions": [],
        "uncles": [],
    })
}

async fn node_handler(State(stub): State<Arc<NodeStub>>, Json(request): Json<Value>) -> Json<Value> {
    if let Some(stall) = stub.stall {
        tokio::time::sleep(stall).await;
    }

    let method = request["method"].as_str().unwrap_or_default();
    let result = match method {
        "eth_chainId" => json!(format!("0x{:x}", stub.chain_id)),
        "eth_blockNumber" => json!(format!("0x{:x}", stub.block_number)),
        "eth_getTransactionCount" => json!(format!("0x{:x}", stub.nonce)),
        "eth_maxPriorityFeePerGas" => json!(format!("0x{:x}", stub.priority_fee)),
        "eth_gasPrice" => json!(format!("0x{:x}", stub.base_fee + stub.priority_fee)),
        "eth_estimateGas" => json!(format!("0x{:x}", stub.gas_estimate)),
        "eth_getBlockByNumber" => latest_block_json(stub.block_number, stub.base_fee),
        "eth_getTransactionReceipt" => Value::Null,
        _ => Value::Null,
    };

    Json(json!({"jsonrpc": "2.0", "id": request["id"].clone(), "result": result}))
}

/// Spawn the node stub, returning its address.
pub async fn spawn_node_stub(stub: NodeStub) -> SocketAddr {
    let app = Router::new()
        .route("/", post(node_handler))
        .with_state(Arc::new(stub));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
