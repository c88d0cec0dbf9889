// Responsible for all communication with the EVM chain, via the wallet's JSON-RPC endpoint.
//
// Signing happens on the other side of the endpoint (node-managed or external signer),
// so the crate only ever asks for accounts and hands over unsigned transactions.

use async_trait::async_trait;
use primitive_types::{H160, H256};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::domain::contract::ContractCall;
use crate::error::{RegistrationError, Result};
use crate::infra::config::{self, Settings};

/// Supplies the connected account and submits write transactions on its behalf.
#[async_trait]
pub trait WalletSession: Send + Sync {
    /// `None` when no account is connected.
    async fn connected_address(&self) -> Result<Option<H160>>;

    /// Sends `call` from `from` and returns the transaction hash.
    async fn submit_write(&self, from: H160, call: &ContractCall) -> Result<String>;
}

#[derive(Deserialize, Debug)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize, Debug)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

pub fn format_address(address: &H160) -> String {
    format!("0x{}", hex::encode(address.as_bytes()))
}

fn parse_tx_hash(raw: &str) -> Result<H256> {
    let s = raw.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s)
        .map_err(|_| RegistrationError::Transaction(format!("invalid transaction hash: {}", raw)))?;
    if bytes.len() != 32 {
        return Err(RegistrationError::Transaction(format!(
            "transaction hash must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(H256::from_slice(&bytes))
}

fn parse_quantity(raw: &str) -> Result<u64> {
    let s = raw.trim_start_matches("0x");
    u64::from_str_radix(s, 16)
        .map_err(|_| RegistrationError::Transaction(format!("invalid quantity: {}", raw)))
}

pub struct JsonRpcWallet {
    http: Client,
    rpc_url: String,
    /// Overrides the provider's first account when set.
    account: Option<H160>,
    next_id: AtomicU64,
}

impl JsonRpcWallet {
    pub fn new(rpc_url: impl Into<String>, account: Option<H160>) -> Self {
        JsonRpcWallet {
            http: Client::new(),
            rpc_url: rpc_url.into(),
            account,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.evm_rpc_url.clone(), settings.wallet_address)
    }

    async fn rpc<T: DeserializeOwned>(&self, method: &str, params: JsonValue) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!("> Wallet: {} (id={})", method, id);

        let resp = self
            .http
            .post(&self.rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method,
                "params": params,
            }))
            .send()
            .await
            .map_err(|e| RegistrationError::Transaction(format!("{}: {}", method, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistrationError::Transaction(format!(
                "{} returned {}: {}",
                method,
                status,
                body.trim()
            )));
        }

        let body: RpcResponse<T> = resp
            .json()
            .await
            .map_err(|e| RegistrationError::Transaction(format!("{}: malformed response: {}", method, e)))?;

        if let Some(err) = body.error {
            return Err(RegistrationError::Transaction(format!(
                "{} rejected ({}): {}",
                method, err.code, err.message
            )));
        }
        body.result
            .ok_or_else(|| RegistrationError::Transaction(format!("{}: empty result", method)))
    }

    pub async fn chain_id(&self) -> Result<u64> {
        let raw: String = self.rpc("eth_chainId", json!([])).await?;
        parse_quantity(&raw)
    }

    pub async fn client_version(&self) -> Result<String> {
        self.rpc("web3_clientVersion", json!([])).await
    }

    /// Deployed bytecode at `address` (`0x` when nothing is deployed).
    pub async fn code_at(&self, address: H160) -> Result<String> {
        self.rpc("eth_getCode", json!([format_address(&address), "latest"]))
            .await
    }
}

#[async_trait]
impl WalletSession for JsonRpcWallet {
    async fn connected_address(&self) -> Result<Option<H160>> {
        if let Some(account) = self.account {
            return Ok(Some(account));
        }
        let accounts: Vec<String> = self.rpc("eth_accounts", json!([])).await?;
        match accounts.first() {
            None => Ok(None),
            Some(raw) => config::parse_address(raw)
                .map(Some)
                .map_err(|e| RegistrationError::Transaction(format!("eth_accounts {}", e))),
        }
    }

    async fn submit_write(&self, from: H160, call: &ContractCall) -> Result<String> {
        let data = call.calldata()?;
        let tx = json!({
            "from": format_address(&from),
            "to": format_address(&call.address),
            "data": format!("0x{}", hex::encode(&data)),
        });
        info!(
            "> Wallet: sending {} to {} from {}",
            call.function.signature(),
            format_address(&call.address),
            format_address(&from)
        );

        let raw: String = self.rpc("eth_sendTransaction", json!([tx])).await?;
        let hash = parse_tx_hash(&raw)?;
        Ok(format!("0x{}", hex::encode(hash.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_hash_must_be_32_bytes() {
        let ok = format!("0x{}", "ab".repeat(32));
        assert!(parse_tx_hash(&ok).is_ok());
        assert!(parse_tx_hash("0x1234").is_err());
        assert!(parse_tx_hash("0xzz").is_err());
    }

    #[test]
    fn quantities_are_hex() {
        assert_eq!(parse_quantity("0x1cbc67c35a").unwrap(), 123_420_001_114);
        assert!(parse_quantity("0xnope").is_err());
    }

    #[test]
    fn addresses_render_full_lowercase_hex() {
        let a = H160::from_low_u64_be(0xAB);
        assert_eq!(format_address(&a), "0x00000000000000000000000000000000000000ab");
    }
}
