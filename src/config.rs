use anyhow::{Context as _, Result};
use ethers::types::{Address, U256};
use ethers::utils::parse_ether;

pub const DEFAULT_RELAYER_URL: &str = "https://navette.jcloud.ik-server.com";
pub const DEFAULT_RELAYER_ADDRESS: &str = "0xd6B159d56749BeE815dF460FB373B2A1EC1517A8";
pub const DEFAULT_MIN_NATIVE_BALANCE_ETH: &str = "0.025";
pub const DEFAULT_MINT_AMOUNT: &str = "10000";

pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;
pub const ORIGIN_TX_EXPLORER: &str = "https://sepolia.etherscan.io/tx/";
pub const DESTINATION_TX_EXPLORER: &str = "https://sepolia-optimism.etherscan.io/tx/";

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub token_contract: Address,
    pub relayer_address: Address,
    pub min_native_balance: U256,
    pub mint_amount: U256,
}

impl BridgeConfig {
    pub fn new(
        token_contract: &str,
        relayer_address: &str,
        min_native_balance_eth: &str,
        mint_amount: &str,
    ) -> Result<Self> {
        Ok(Self {
            token_contract: token_contract.parse().context("parse token_contract")?,
            relayer_address: relayer_address.parse().context("parse relayer_address")?,
            min_native_balance: parse_ether(min_native_balance_eth)
                .context("parse min_native_balance")?,
            mint_amount: parse_ether(mint_amount).context("parse mint_amount")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub relayer_url: String,
    pub faucet_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            relayer_url: DEFAULT_RELAYER_URL.to_string(),
            faucet_url: None,
            request_timeout_secs: 30,
        }
    }
}

pub fn origin_tx_link(tx_hash: &str) -> String {
    format!("{ORIGIN_TX_EXPLORER}{tx_hash}")
}

pub fn destination_tx_link(tx_id: &str) -> String {
    format!("{DESTINATION_TX_EXPLORER}{tx_id}")
}

pub fn address_link(chain_id: u64, address: &str) -> String {
    let base = if chain_id == SEPOLIA_CHAIN_ID {
        "https://sepolia.etherscan.io/address/"
    } else {
        "https://etherscan.io/address/"
    };
    format!("{base}{address}")
}
