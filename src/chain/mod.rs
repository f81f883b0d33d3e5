pub mod evm;

use async_trait::async_trait;
use ethers::types::{Address, H256, U256};
use ethers::utils::format_ether;

use crate::error::BridgeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSession {
    pub account: Option<Address>,
    pub chain_id: u64,
}

impl WalletSession {
    pub fn connected(account: Address, chain_id: u64) -> Self {
        Self {
            account: Some(account),
            chain_id,
        }
    }

    pub fn disconnected(chain_id: u64) -> Self {
        Self {
            account: None,
            chain_id,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransfer {
    pub tx_hash: H256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: H256,
    pub block_number: u64,
}

#[async_trait]
pub trait ChainGateway: Send + Sync {
    async fn balance(&self, account: Address) -> Result<U256, BridgeError>;

    async fn network_name(&self) -> Result<String, BridgeError>;

    async fn submit_transfer(
        &self,
        token: Address,
        destination: Address,
        amount: U256,
    ) -> Result<PendingTransfer, BridgeError>;

    async fn submit_mint(&self, token: Address, amount: U256)
    -> Result<PendingTransfer, BridgeError>;

    // A missing receipt is an error.
    async fn await_receipt(&self, pending: &PendingTransfer) -> Result<Receipt, BridgeError>;
}

pub fn hash_hex(hash: &H256) -> String {
    format!("{hash:#x}")
}

pub fn network_display_name(chain_id: u64) -> String {
    let name = match chain_id {
        1 => "mainnet",
        10 => "optimism",
        11_155_111 => "sepolia",
        11_155_420 => "optimism-sepolia",
        _ => "unknown",
    };
    capitalize(name)
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_native_balance(balance: U256) -> String {
    let eth = format_ether(balance);
    match eth.parse::<f64>() {
        Ok(v) => format!("{v:.5}"),
        Err(_) => eth,
    }
}

pub fn classify_submit_error(message: String) -> BridgeError {
    let lower = message.to_lowercase();
    if lower.contains("user rejected")
        || lower.contains("user denied")
        || lower.contains("rejected by user")
        || lower.contains("code: 4001")
    {
        BridgeError::UserRejected
    } else {
        BridgeError::Chain(message)
    }
}
