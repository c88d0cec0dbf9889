//! In-process stand-ins for the pinning service and the wallet's JSON-RPC endpoint.
//!
//! Each mock binds to an ephemeral port and records what it received.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use ip_registration_portal::domain::contract::ContractCall;
use ip_registration_portal::error::{RegistrationError, Result};
use ip_registration_portal::{ContentIdentifier, MetadataDocument, PinningService, WalletSession};
use primitive_types::H160;
use serde_json::{json, Value as JsonValue};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const TEST_JWT: &str = "test-jwt";
pub const TX_HASH: &str = "0xabababababababababababababababababababababababababababababababab";
/// The only address the fake node reports code for.
pub const CONTRACT: &str = "0x00000000000000000000000000000000000000c0";
pub const CONTRACT_CODE: &str = "0x6080604052";

pub fn recipient() -> H160 {
    H160::from_low_u64_be(0x1234)
}

// ---------------------------------------------------------------------------
// Trait-level mocks (no sockets)
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PinLog {
    pub files: Vec<(String, usize)>,
    pub documents: Vec<MetadataDocument>,
}

/// Hands out queued hashes in order; an empty queue produces an upload error.
pub struct MockPinning {
    pub log: Mutex<PinLog>,
    hashes: Mutex<VecDeque<String>>,
}

impl MockPinning {
    pub fn with_hashes(hashes: &[&str]) -> Arc<Self> {
        Arc::new(MockPinning {
            log: Mutex::new(PinLog::default()),
            hashes: Mutex::new(hashes.iter().map(|h| h.to_string()).collect()),
        })
    }

    pub async fn calls(&self) -> usize {
        let log = self.log.lock().await;
        log.files.len() + log.documents.len()
    }

    async fn next(&self) -> Result<ContentIdentifier> {
        match self.hashes.lock().await.pop_front() {
            Some(h) => Ok(ContentIdentifier::ipfs(&h)),
            None => Err(RegistrationError::Upload(
                "pinFileToIPFS returned 500 Internal Server Error".to_string(),
            )),
        }
    }
}

#[async_trait]
impl PinningService for MockPinning {
    async fn upload_file(&self, bytes: &[u8], filename: &str) -> Result<ContentIdentifier> {
        self.log
            .lock()
            .await
            .files
            .push((filename.to_string(), bytes.len()));
        self.next().await
    }

    async fn upload_json(&self, document: &MetadataDocument) -> Result<ContentIdentifier> {
        self.log.lock().await.documents.push(document.clone());
        self.next().await
    }
}

pub struct MockWallet {
    pub address: Option<H160>,
    pub reject: bool,
    pub sent: Mutex<Vec<ContractCall>>,
}

impl MockWallet {
    pub fn connected() -> Arc<Self> {
        Arc::new(MockWallet {
            address: Some(recipient()),
            reject: false,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn disconnected() -> Arc<Self> {
        Arc::new(MockWallet {
            address: None,
            reject: false,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(MockWallet {
            address: Some(recipient()),
            reject: true,
            sent: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl WalletSession for MockWallet {
    async fn connected_address(&self) -> Result<Option<H160>> {
        Ok(self.address)
    }

    async fn submit_write(&self, _from: H160, call: &ContractCall) -> Result<String> {
        self.sent.lock().await.push(call.clone());
        if self.reject {
            return Err(RegistrationError::Transaction(
                "eth_sendTransaction rejected (4001): User rejected the request.".to_string(),
            ));
        }
        let n = self.sent.lock().await.len();
        Ok(format!("0x{:064x}", n))
    }
}

// ---------------------------------------------------------------------------
// HTTP mocks
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PinataRecord {
    pub authorization: Vec<String>,
    pub file_names: Vec<String>,
    pub json_bodies: Vec<JsonValue>,
}

#[derive(Clone)]
struct PinataState {
    record: Arc<Mutex<PinataRecord>>,
    fail_status: Option<StatusCode>,
}

fn auth_header(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn pin_file(
    State(state): State<PinataState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut record = state.record.lock().await;
    record.authorization.push(auth_header(&headers));
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            record
                .file_names
                .push(field.file_name().unwrap_or_default().to_string());
        }
    }
    if let Some(status) = state.fail_status {
        return (status, Json(json!({ "error": "Invalid authentication" }))).into_response();
    }
    (
        StatusCode::OK,
        Json(json!({ "IpfsHash": "Qm123", "PinSize": 42, "Timestamp": "2026-01-01T00:00:00Z" })),
    )
        .into_response()
}

async fn pin_json(
    State(state): State<PinataState>,
    headers: HeaderMap,
    Json(body): Json<JsonValue>,
) -> impl IntoResponse {
    let mut record = state.record.lock().await;
    record.authorization.push(auth_header(&headers));
    record.json_bodies.push(body);
    (StatusCode::OK, Json(json!({ "IpfsHash": "Qm456" })))
}

async fn test_authentication(headers: HeaderMap) -> impl IntoResponse {
    if auth_header(&headers) != format!("Bearer {}", TEST_JWT) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "reason": "INVALID_CREDENTIALS" } })),
        )
            .into_response();
    }
    (
        StatusCode::OK,
        Json(json!({ "message": "Congratulations! You are communicating with the Pinata API!" })),
    )
        .into_response()
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

/// Starts a fake Pinata API; returns the pinning base URL and the shared record.
pub async fn start_mock_pinata(fail_status: Option<StatusCode>) -> (String, Arc<Mutex<PinataRecord>>) {
    let record = Arc::new(Mutex::new(PinataRecord::default()));
    let state = PinataState {
        record: record.clone(),
        fail_status,
    };
    let router = Router::new()
        .route("/pinning/pinFileToIPFS", post(pin_file))
        .route("/pinning/pinJSONToIPFS", post(pin_json))
        .route("/data/testAuthentication", get(test_authentication))
        .with_state(state);
    let base = serve(router).await;
    (format!("{}/pinning", base), record)
}

#[derive(Default)]
pub struct RpcRecord {
    pub methods: Vec<String>,
    pub transactions: Vec<JsonValue>,
}

#[derive(Clone)]
struct RpcState {
    record: Arc<Mutex<RpcRecord>>,
    accounts: Vec<String>,
}

async fn rpc(State(state): State<RpcState>, Json(req): Json<JsonValue>) -> Json<JsonValue> {
    let id = req.get("id").cloned().unwrap_or(JsonValue::Null);
    let method = req
        .get("method")
        .and_then(|m| m.as_str())
        .unwrap_or_default()
        .to_string();
    let mut record = state.record.lock().await;
    record.methods.push(method.clone());

    let result = match method.as_str() {
        "eth_accounts" => json!(state.accounts),
        "eth_chainId" => json!("0x1cbc67c35a"),
        "web3_clientVersion" => json!("mock/v1"),
        "eth_getCode" => match req["params"][0].as_str() {
            Some(CONTRACT) => json!(CONTRACT_CODE),
            _ => json!("0x"),
        },
        "eth_sendTransaction" => {
            let tx = req["params"][0].clone();
            record.transactions.push(tx);
            json!(TX_HASH)
        }
        _ => {
            return Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": "method not found" }
            }))
        }
    };
    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

/// Starts a fake JSON-RPC wallet endpoint exposing `accounts`.
pub async fn start_mock_rpc(accounts: &[&str]) -> (String, Arc<Mutex<RpcRecord>>) {
    let record = Arc::new(Mutex::new(RpcRecord::default()));
    let state = RpcState {
        record: record.clone(),
        accounts: accounts.iter().map(|a| a.to_string()).collect(),
    };
    let router = Router::new().route("/", post(rpc)).with_state(state);
    (serve(router).await, record)
}
