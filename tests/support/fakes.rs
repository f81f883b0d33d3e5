use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ethers::types::{Address, H256, U256};
use ethers::utils::parse_ether;

use navette::chain::{ChainGateway, PendingTransfer, Receipt};
use navette::config::BridgeConfig;
use navette::error::BridgeError;
use navette::funding::Faucet;
use navette::relay::Relayer;
use navette::swap::BridgeRecord;

pub const TOKEN: &str = "0x1111111111111111111111111111111111111111";
pub const RELAYER: &str = "0xd6B159d56749BeE815dF460FB373B2A1EC1517A8";

pub fn eth(amount: &str) -> U256 {
    parse_ether(amount).unwrap()
}

pub fn test_config() -> BridgeConfig {
    BridgeConfig::new(TOKEN, RELAYER, "0.025", "10000").unwrap()
}

pub fn account() -> Address {
    Address::from_low_u64_be(0xa11ce)
}

pub fn record(hash: &str, block_number: u64, send_tx: &str) -> BridgeRecord {
    BridgeRecord {
        hash: hash.to_string(),
        executed: !send_tx.is_empty(),
        user: "0x2222222222222222222222222222222222222222".to_string(),
        operator: RELAYER.to_string(),
        block_number,
        is_erc20: true,
        origin_token: TOKEN.to_string(),
        destination_token: "0x3333333333333333333333333333333333333333".to_string(),
        amount: 8.0,
        send_tx: send_tx.to_string(),
    }
}

pub struct FakeGateway {
    balances: Mutex<VecDeque<U256>>,
    submit: Result<PendingTransfer, BridgeError>,
    receipt: Result<Receipt, BridgeError>,
    pub balance_calls: AtomicUsize,
    pub transfers: Mutex<Vec<(Address, Address, U256)>>,
    pub mints: Mutex<Vec<(Address, U256)>>,
}

impl FakeGateway {
    /// Balance answers are consumed in order; the last one repeats.
    pub fn new(balances: &[U256]) -> Self {
        let tx_hash = H256::from_low_u64_be(0xabc);
        Self {
            balances: Mutex::new(balances.iter().copied().collect()),
            submit: Ok(PendingTransfer { tx_hash }),
            receipt: Ok(Receipt {
                tx_hash,
                block_number: 7_000_000,
            }),
            balance_calls: AtomicUsize::new(0),
            transfers: Mutex::new(Vec::new()),
            mints: Mutex::new(Vec::new()),
        }
    }

    pub fn with_submit(mut self, submit: Result<PendingTransfer, BridgeError>) -> Self {
        self.submit = submit;
        self
    }

    pub fn with_receipt(mut self, receipt: Result<Receipt, BridgeError>) -> Self {
        self.receipt = receipt;
        self
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainGateway for FakeGateway {
    async fn balance(&self, _account: Address) -> Result<U256, BridgeError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        let mut balances = self.balances.lock().unwrap();
        let value = if balances.len() > 1 {
            balances.pop_front()
        } else {
            balances.front().copied()
        };
        value.ok_or_else(|| BridgeError::Connection("no active wallet session".to_string()))
    }

    async fn network_name(&self) -> Result<String, BridgeError> {
        Ok("Sepolia".to_string())
    }

    async fn submit_transfer(
        &self,
        token: Address,
        destination: Address,
        amount: U256,
    ) -> Result<PendingTransfer, BridgeError> {
        self.transfers
            .lock()
            .unwrap()
            .push((token, destination, amount));
        self.submit.clone()
    }

    async fn submit_mint(
        &self,
        token: Address,
        amount: U256,
    ) -> Result<PendingTransfer, BridgeError> {
        self.mints.lock().unwrap().push((token, amount));
        self.submit.clone()
    }

    async fn await_receipt(&self, _pending: &PendingTransfer) -> Result<Receipt, BridgeError> {
        self.receipt.clone()
    }
}

pub struct FakeFaucet {
    result: Result<String, BridgeError>,
    pub calls: AtomicUsize,
}

impl FakeFaucet {
    pub fn ok() -> Self {
        Self {
            result: Ok("0xfaucet".to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(BridgeError::Faucet(message.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Faucet for FakeFaucet {
    async fn request_funds(&self, _account: Address) -> Result<String, BridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

pub struct FakeRelayer {
    confirm: Result<BridgeRecord, BridgeError>,
    swaps: Vec<BridgeRecord>,
    pub submitted: Mutex<Vec<String>>,
}

impl FakeRelayer {
    pub fn confirming(confirm: Result<BridgeRecord, BridgeError>) -> Self {
        Self {
            confirm,
            swaps: Vec::new(),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn listing(swaps: Vec<BridgeRecord>) -> Self {
        Self {
            confirm: Err(BridgeError::Connection("not used".to_string())),
            swaps,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn submitted_hashes(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Relayer for FakeRelayer {
    async fn confirm_relay(&self, origin_tx_hash: &str) -> Result<BridgeRecord, BridgeError> {
        self.submitted
            .lock()
            .unwrap()
            .push(origin_tx_hash.to_string());
        self.confirm.clone()
    }

    async fn list_swaps(&self) -> Result<Vec<BridgeRecord>, BridgeError> {
        Ok(self.swaps.clone())
    }
}
