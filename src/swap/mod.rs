pub mod flow;
pub mod ledger;

use ethers::types::U256;
use ethers::utils::{WEI_IN_ETHER, parse_ether};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::BridgeError;

pub const MIN_SWAP_TOKENS: u64 = 1;
pub const MAX_SWAP_TOKENS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRecord {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub executed: bool,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub block_number: u64,
    #[serde(rename = "isERC20", default)]
    pub is_erc20: bool,
    #[serde(rename = "tokenAddressOnSepolia", default)]
    pub origin_token: String,
    #[serde(rename = "tokenAddressOnOPSepolia", default)]
    pub destination_token: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub send_tx: String,
}

impl BridgeRecord {
    pub fn is_complete(&self) -> bool {
        !self.send_tx.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapPhase {
    Idle,
    CheckingFunds,
    AwaitingSignature,
    AwaitingConfirmation,
    ConfirmingRelay,
    Succeeded,
    Failed,
}

impl SwapPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SwapPhase::Succeeded | SwapPhase::Failed)
    }

    pub fn can_transition_to(self, next: SwapPhase) -> bool {
        use SwapPhase::*;

        if next == Failed {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Idle, CheckingFunds)
                | (CheckingFunds, AwaitingSignature)
                | (AwaitingSignature, AwaitingConfirmation)
                | (AwaitingConfirmation, ConfirmingRelay)
                | (ConfirmingRelay, Succeeded)
        )
    }
}

#[derive(Debug, Clone)]
pub struct SwapSession {
    id: Uuid,
    requested_amount: U256,
    phase: SwapPhase,
    origin_tx_hash: Option<String>,
    destination_tx_id: Option<String>,
    last_error: Option<BridgeError>,
}

impl SwapSession {
    pub fn new(requested_amount: U256) -> Result<Self, BridgeError> {
        let min = WEI_IN_ETHER * U256::from(MIN_SWAP_TOKENS);
        let max = WEI_IN_ETHER * U256::from(MAX_SWAP_TOKENS);
        if requested_amount < min || requested_amount > max {
            return Err(BridgeError::InvalidAmount(format!(
                "amount must be between {MIN_SWAP_TOKENS} and {MAX_SWAP_TOKENS} tokens"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            requested_amount,
            phase: SwapPhase::Idle,
            origin_tx_hash: None,
            destination_tx_id: None,
            last_error: None,
        })
    }

    // 18 decimals, e.g. "8" or "1.5".
    pub fn from_token_amount(amount: &str) -> Result<Self, BridgeError> {
        let wei = parse_ether(amount.trim())
            .map_err(|e| BridgeError::InvalidAmount(format!("{amount}: {e}")))?;
        Self::new(wei)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn requested_amount(&self) -> U256 {
        self.requested_amount
    }

    pub fn phase(&self) -> SwapPhase {
        self.phase
    }

    pub fn origin_tx_hash(&self) -> Option<&str> {
        self.origin_tx_hash.as_deref()
    }

    pub fn destination_tx_id(&self) -> Option<&str> {
        self.destination_tx_id.as_deref()
    }

    pub fn last_error(&self) -> Option<&BridgeError> {
        self.last_error.as_ref()
    }

    pub(crate) fn enter(&mut self, next: SwapPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal swap transition {:?} -> {:?}",
            self.phase,
            next
        );
        tracing::debug!(session_id = %self.id, from = ?self.phase, to = ?next, "swap phase");
        self.phase = next;
    }

    pub(crate) fn record_origin(&mut self, tx_hash: String) {
        if self.origin_tx_hash.is_none() {
            self.origin_tx_hash = Some(tx_hash);
        }
    }

    pub(crate) fn succeed(&mut self, destination_tx_id: String) {
        self.destination_tx_id = Some(destination_tx_id);
        self.enter(SwapPhase::Succeeded);
    }

    pub(crate) fn fail(&mut self, err: BridgeError) {
        self.last_error = Some(err);
        self.enter(SwapPhase::Failed);
    }
}
