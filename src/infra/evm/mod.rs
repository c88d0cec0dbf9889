pub mod client;

pub use client::{format_address, JsonRpcWallet, WalletSession};
