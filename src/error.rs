use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("wallet is not connected")]
    NotConnected,

    #[error("transaction was rejected by the signer")]
    UserRejected,

    #[error("chain error: {0}")]
    Chain(String),

    #[error("transaction {tx_hash} failed or was reverted")]
    TransactionReverted { tx_hash: String },

    #[error("relayer rejected the swap (status {status}): {body}")]
    RelayRejected { status: u16, body: String },

    #[error("relay of {origin_tx_hash} is not confirmed yet: {reason}")]
    RelayIncomplete {
        origin_tx_hash: String,
        reason: String,
    },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("faucet request failed: {0}")]
    Faucet(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("swap session {0} has already been run")]
    SessionUsed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Pending,
}

impl BridgeError {
    pub fn severity(&self) -> Severity {
        match self {
            BridgeError::RelayIncomplete { .. } => Severity::Pending,
            _ => Severity::Error,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        !matches!(self, BridgeError::RelayRejected { .. })
    }

    // Funds may have left the user's wallet.
    pub fn funds_moved(&self) -> bool {
        matches!(
            self,
            BridgeError::RelayRejected { .. } | BridgeError::RelayIncomplete { .. }
        )
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        BridgeError::Connection(err.to_string())
    }
}
