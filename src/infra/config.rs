//! Centralized configuration (environment variables + defaults).

use crate::domain::registration::FormVariant;
use crate::error::{RegistrationError, Result};
use primitive_types::H160;

pub const DEFAULT_PINATA_API_URL: &str = "https://api.pinata.cloud/pinning";
pub const DEFAULT_EXPLORER_BASE_URL: &str = "https://basecamp.cloud.blockscout.com";
pub const DEFAULT_API_BIND_ADDR: &str = "0.0.0.0:3000";

fn required(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(RegistrationError::Config(format!("{} must be set", name))),
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Pinata JWT used as the bearer credential (required).
pub fn pinata_jwt() -> Result<String> {
    required("PINATA_JWT")
}

/// Pinata pinning base URL, without trailing slash.
pub fn pinata_api_url() -> String {
    optional("PINATA_API_URL")
        .unwrap_or_else(|| DEFAULT_PINATA_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Ethereum JSON-RPC endpoint of the wallet/session provider (required).
pub fn evm_rpc_url() -> Result<String> {
    required("EVM_RPC_URL")
}

/// Deployed registry contract address (required).
pub fn contract_address() -> Result<H160> {
    let raw = required("CONTRACT_ADDRESS")?;
    parse_address(&raw)
        .map_err(|e| RegistrationError::Config(format!("CONTRACT_ADDRESS {}", e)))
}

/// Account to transact from. When unset, the provider's first account is used.
pub fn wallet_address() -> Result<Option<H160>> {
    optional("WALLET_ADDRESS")
        .map(|raw| {
            parse_address(&raw)
                .map_err(|e| RegistrationError::Config(format!("WALLET_ADDRESS {}", e)))
        })
        .transpose()
}

pub fn explorer_base_url() -> String {
    optional("EXPLORER_BASE_URL")
        .unwrap_or_else(|| DEFAULT_EXPLORER_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Which field set / contract signature forms use (`standard` or `heritage`).
pub fn form_variant() -> Result<FormVariant> {
    match optional("FORM_VARIANT") {
        None => Ok(FormVariant::Standard),
        Some(raw) => raw
            .parse::<FormVariant>()
            .map_err(|e| RegistrationError::Config(format!("FORM_VARIANT {}", e))),
    }
}

pub fn api_bind_addr() -> String {
    optional("API_BIND_ADDR").unwrap_or_else(|| DEFAULT_API_BIND_ADDR.to_string())
}

/// Parses a `0x`-prefixed (or bare) 20-byte hex address.
pub fn parse_address(raw: &str) -> std::result::Result<H160, String> {
    let s = raw.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|_| format!("is not valid hex: {}", raw))?;
    if bytes.len() != 20 {
        return Err(format!("must be a 20-byte address, got {} bytes", bytes.len()));
    }
    Ok(H160::from_slice(&bytes))
}

/// Everything the pipeline needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub pinata_jwt: String,
    pub pinata_api_url: String,
    pub evm_rpc_url: String,
    pub contract_address: H160,
    pub wallet_address: Option<H160>,
    pub explorer_base_url: String,
    pub form_variant: FormVariant,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Settings {
            pinata_jwt: pinata_jwt()?,
            pinata_api_url: pinata_api_url(),
            evm_rpc_url: evm_rpc_url()?,
            contract_address: contract_address()?,
            wallet_address: wallet_address()?,
            explorer_base_url: explorer_base_url(),
            form_variant: form_variant()?,
        })
    }
}
